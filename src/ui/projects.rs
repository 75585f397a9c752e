use std::sync::Arc;

use tracing::warn;

use crate::api::{ApiClient, Transport};
use crate::format::{or_dash, status_class};
use crate::models::Project;

use super::{Cell, LoadFuture, Section, SectionContent, TableRow, TableView};

pub const COLUMNS: &[&str] = &[
    "ID", "Nombre", "Obra", "Inicio", "Fin", "Estado", "Progreso", "Empleados", "Acciones",
];

pub fn rows(projects: &[Project]) -> Vec<TableRow> {
    projects
        .iter()
        .map(|project| {
            let start = project.start_date.map(|d| d.format("%Y-%m-%d").to_string());
            let end = project.end_date.map(|d| d.format("%Y-%m-%d").to_string());

            TableRow::new(vec![
                Cell::text(project.id.to_string()),
                Cell::text(project.name.as_str()),
                Cell::text(project.work_id.to_string()),
                Cell::text(or_dash(start.as_deref())),
                Cell::text(or_dash(end.as_deref())),
                Cell::badge(
                    or_dash(project.status.as_deref()),
                    status_class(project.status.as_deref()),
                ),
                Cell::text("0%"),
                Cell::text("0"),
                Cell::actions(),
            ])
        })
        .collect()
}

/// The search filter of this section is a work id.
fn work_filter(filter: Option<&str>) -> Option<i32> {
    let filter = filter.map(str::trim).filter(|f| !f.is_empty())?;
    match filter.parse() {
        Ok(id) => Some(id),
        Err(_) => {
            warn!(filter, "ignoring non-numeric work filter for projects");
            None
        }
    }
}

pub fn load<T: Transport>(api: Arc<ApiClient<T>>, filter: Option<String>) -> LoadFuture {
    Box::pin(async move {
        let projects = api.list_projects(work_filter(filter.as_deref())).await?;
        Ok(SectionContent::Table(TableView::with_rows(
            Section::Projects,
            rows(&projects),
        )))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeTransport;
    use crate::api::Method;
    use crate::format::StatusClass;
    use chrono::NaiveDate;
    use serde_json::json;

    #[test]
    fn dates_and_status_badge() {
        let projects = vec![Project {
            id: 12,
            name: "Cimentación".to_string(),
            work_id: 3,
            start_date: NaiveDate::from_ymd_opt(2024, 2, 1),
            end_date: None,
            status: Some("En planificación".to_string()),
        }];

        let rows = rows(&projects);

        assert_eq!(
            rows[0].texts(),
            vec![
                "12",
                "Cimentación",
                "3",
                "2024-02-01",
                "-",
                "En planificación",
                "0%",
                "0",
                "Ver | Editar | Eliminar",
            ]
        );
        assert_eq!(rows[0].cells[5].badge, Some(StatusClass::InProcess));
    }

    #[test]
    fn work_filter_parses_ids_only() {
        assert_eq!(work_filter(Some(" 7 ")), Some(7));
        assert_eq!(work_filter(Some("puente")), None);
        assert_eq!(work_filter(Some("")), None);
        assert_eq!(work_filter(None), None);
    }

    #[tokio::test]
    async fn load_passes_work_filter_and_parses_dates() {
        let api = Arc::new(ApiClient::new(FakeTransport::new().respond(
            Method::Get,
            "/proyectos",
            200,
            json!([{"id_proyecto": 1, "nombre_proyecto": "Muros", "id_obra": 4,
                    "fecha_inicio_proyecto": "2024-05-10", "fecha_fin_proyecto": null,
                    "estado_proyecto": null}]),
        )));

        let content = load(api.clone(), Some("4".to_string())).await.unwrap();

        assert_eq!(content.row_count(), 1);
        assert_eq!(
            api.transport().calls()[0].query,
            vec![("obra_id".to_string(), "4".to_string())]
        );
    }
}
