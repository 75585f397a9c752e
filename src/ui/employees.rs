use std::sync::Arc;

use crate::api::{ApiClient, Transport};
use crate::format::{format_currency, or_dash, StatusClass};
use crate::models::Employee;

use super::{Cell, LoadFuture, Section, SectionContent, TableRow, TableView};

pub const COLUMNS: &[&str] = &[
    "ID", "Nombre", "Tipo", "Salario", "Estado", "Obras", "Contacto", "Acciones",
];

pub fn rows(employees: &[Employee]) -> Vec<TableRow> {
    employees
        .iter()
        .map(|employee| {
            TableRow::new(vec![
                Cell::text(employee.id.to_string()),
                Cell::text(employee.name.as_str()),
                Cell::text(or_dash(employee.kind.as_deref())),
                Cell::text(format_currency(employee.fixed_salary.as_ref())),
                Cell::badge("Activo", StatusClass::Active),
                Cell::text("0"),
                Cell::text("-"),
                Cell::actions(),
            ])
        })
        .collect()
}

pub fn load<T: Transport>(api: Arc<ApiClient<T>>, filter: Option<String>) -> LoadFuture {
    Box::pin(async move {
        let employees = api.list_employees(filter.as_deref()).await?;
        Ok(SectionContent::Table(TableView::with_rows(
            Section::Employees,
            rows(&employees),
        )))
    })
}
