use std::sync::Arc;

use crate::api::{ApiClient, Transport};
use crate::format::{format_currency, or_dash, StatusClass};
use crate::models::Material;

use super::{Cell, LoadFuture, Section, SectionContent, TableRow, TableView};

pub const COLUMNS: &[&str] = &[
    "ID", "Nombre", "Unidad", "Precio", "Stock", "Estado", "Proveedor", "Total", "Acciones",
];

pub fn rows(materials: &[Material]) -> Vec<TableRow> {
    materials
        .iter()
        .map(|material| {
            TableRow::new(vec![
                Cell::text(material.id.to_string()),
                Cell::text(material.name.as_str()),
                Cell::text(or_dash(material.unit.as_deref())),
                Cell::text(format_currency(material.unit_price.as_ref())),
                Cell::text("-"),
                Cell::badge("Disponible", StatusClass::Active),
                Cell::text("-"),
                Cell::text("-"),
                Cell::actions(),
            ])
        })
        .collect()
}

pub fn load<T: Transport>(api: Arc<ApiClient<T>>, filter: Option<String>) -> LoadFuture {
    Box::pin(async move {
        let materials = api.list_materials(filter.as_deref()).await?;
        Ok(SectionContent::Table(TableView::with_rows(
            Section::Materials,
            rows(&materials),
        )))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn price_and_unit_cells() {
        let materials = vec![Material {
            id: 4,
            name: "Cemento gris".to_string(),
            unit: Some("saco".to_string()),
            unit_price: Some(json!("85")),
        }];

        let rows = rows(&materials);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].cells[2].text, "saco");
        assert_eq!(rows[0].cells[3].text, "Q85.00");
        assert_eq!(rows[0].cells[5].badge, Some(StatusClass::Active));
    }

    #[test]
    fn unreadable_price_falls_back_to_zero() {
        let materials = vec![Material {
            id: 5,
            name: "Arena".to_string(),
            unit: None,
            unit_price: Some(json!("por definir")),
        }];

        assert_eq!(rows(&materials)[0].cells[3].text, "Q. 0.00");
    }
}
