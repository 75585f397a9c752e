use std::sync::Arc;

use crate::api::{ApiClient, Transport};
use crate::format::{format_currency, or_dash};
use crate::models::{Employee, Material, Work};

use super::{LoadFuture, SectionContent};

/// How many works and employees the summary previews.
pub const RECENT_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardView {
    Loading,
    Ready(DashboardSummary),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub total_works: usize,
    pub total_employees: usize,
    pub total_materials: usize,
    pub recent_works: Vec<RecentItem>,
    pub recent_employees: Vec<RecentItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecentItem {
    pub title: String,
    pub detail: String,
}

/// "Recent" is the server's order; nothing is re-sorted here.
pub fn summarize(
    works: &[Work],
    employees: &[Employee],
    materials: &[Material],
) -> DashboardSummary {
    let recent_works = works
        .iter()
        .take(RECENT_LIMIT)
        .map(|work| RecentItem {
            title: work.name.clone(),
            detail: format!(
                "Tipo: {} | Estado: {}",
                or_dash(work.kind.as_deref()),
                or_dash(work.status.as_deref())
            ),
        })
        .collect();

    let recent_employees = employees
        .iter()
        .take(RECENT_LIMIT)
        .map(|employee| RecentItem {
            title: employee.name.clone(),
            detail: format!(
                "Tipo: {} | Salario: {}",
                or_dash(employee.kind.as_deref()),
                format_currency(employee.fixed_salary.as_ref())
            ),
        })
        .collect();

    DashboardSummary {
        total_works: works.len(),
        total_employees: employees.len(),
        total_materials: materials.len(),
        recent_works,
        recent_employees,
    }
}

/// Fetches works, employees and materials concurrently. The first failure
/// fails the whole dashboard, so counts are never shown partially.
pub fn load<T: Transport>(api: Arc<ApiClient<T>>, _filter: Option<String>) -> LoadFuture {
    Box::pin(async move {
        let (works, employees, materials) = tokio::try_join!(
            api.list_works(None),
            api.list_employees(None),
            api.list_materials(None),
        )?;
        Ok(SectionContent::Dashboard(DashboardView::Ready(summarize(
            &works, &employees, &materials,
        ))))
    })
}
