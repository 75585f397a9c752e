use std::sync::Arc;

use crate::api::{ApiClient, Transport};
use crate::format::{or_dash, status_class};
use crate::models::Work;

use super::{Cell, LoadFuture, Section, SectionContent, TableRow, TableView};

pub const COLUMNS: &[&str] = &[
    "ID", "Nombre", "Ubicación", "Tipo", "Estado", "Inicio", "Fin", "Progreso", "Acciones",
];

pub fn rows(works: &[Work]) -> Vec<TableRow> {
    works
        .iter()
        .map(|work| {
            TableRow::new(vec![
                Cell::text(work.id.to_string()),
                Cell::text(work.name.as_str()),
                Cell::text(or_dash(work.location.as_deref())),
                Cell::text(or_dash(work.kind.as_deref())),
                Cell::badge(
                    or_dash(work.status.as_deref()),
                    status_class(work.status.as_deref()),
                ),
                // The backend has no schedule or progress for works yet
                Cell::text("-"),
                Cell::text("-"),
                Cell::text("0%"),
                Cell::actions(),
            ])
        })
        .collect()
}

pub fn load<T: Transport>(api: Arc<ApiClient<T>>, filter: Option<String>) -> LoadFuture {
    Box::pin(async move {
        let works = api.list_works(filter.as_deref()).await?;
        Ok(SectionContent::Table(TableView::with_rows(
            Section::Works,
            rows(&works),
        )))
    })
}
