//! Sections of the dashboard and the render model they produce.
//!
//! Renderers never touch the terminal: they return a [`SectionContent`],
//! which `draw` turns into tui widgets.

pub mod dashboard;
pub mod draw;
pub mod employees;
pub mod materials;
pub mod navigation;
pub mod projects;
pub mod works;

use std::future::Future;
use std::pin::Pin;

use crate::api::ApiError;
use crate::format::StatusClass;

pub use dashboard::{DashboardSummary, DashboardView, RecentItem};

pub const LOADING_TEXT: &str = "Cargando…";

/// Text of the inert per-row action buttons.
pub const ACTIONS_TEXT: &str = "Ver | Editar | Eliminar";

/// Pending result of a section renderer.
pub type LoadFuture = Pin<Box<dyn Future<Output = Result<SectionContent, ApiError>> + Send>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Dashboard,
    Works,
    Employees,
    Materials,
    Projects,
}

impl Section {
    /// Menu order.
    pub const ALL: [Section; 5] = [
        Section::Dashboard,
        Section::Works,
        Section::Employees,
        Section::Materials,
        Section::Projects,
    ];

    pub fn index(self) -> usize {
        match self {
            Section::Dashboard => 0,
            Section::Works => 1,
            Section::Employees => 2,
            Section::Materials => 3,
            Section::Projects => 4,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            Section::Dashboard => "dashboard",
            Section::Works => "obras",
            Section::Employees => "empleados",
            Section::Materials => "materiales",
            Section::Projects => "proyectos",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Section::Dashboard => "Dashboard",
            Section::Works => "Obras",
            Section::Employees => "Empleados",
            Section::Materials => "Materiales",
            Section::Projects => "Proyectos",
        }
    }

    pub fn next(self) -> Section {
        Section::ALL[(self.index() + 1) % Section::ALL.len()]
    }

    pub fn previous(self) -> Section {
        Section::ALL[(self.index() + Section::ALL.len() - 1) % Section::ALL.len()]
    }

    /// Only table sections take a search filter.
    pub fn accepts_filter(self) -> bool {
        !matches!(self, Section::Dashboard)
    }

    fn columns(self) -> &'static [&'static str] {
        match self {
            Section::Dashboard => &[],
            Section::Works => works::COLUMNS,
            Section::Employees => employees::COLUMNS,
            Section::Materials => materials::COLUMNS,
            Section::Projects => projects::COLUMNS,
        }
    }

    /// Placeholder shown while the section's request is in flight.
    pub fn loading_content(self) -> SectionContent {
        match self {
            Section::Dashboard => SectionContent::Dashboard(DashboardView::Loading),
            _ => SectionContent::Table(TableView::placeholder(self, LOADING_TEXT)),
        }
    }

    /// Placeholder that replaces the section after a failed request.
    pub fn error_content(self) -> SectionContent {
        match self {
            Section::Dashboard => SectionContent::Dashboard(DashboardView::Failed(
                "Error cargando el panel".to_string(),
            )),
            _ => SectionContent::Table(TableView::placeholder(
                self,
                &format!("Error cargando {}", self.id()),
            )),
        }
    }
}

/// Whatever currently fills the content area.
#[derive(Debug, Clone, PartialEq)]
pub enum SectionContent {
    Dashboard(DashboardView),
    Table(TableView),
}

impl SectionContent {
    pub fn row_count(&self) -> usize {
        match self {
            SectionContent::Table(TableView { body: TableBody::Rows(rows), .. }) => rows.len(),
            _ => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    pub section: Section,
    pub columns: &'static [&'static str],
    pub body: TableBody,
}

impl TableView {
    pub fn placeholder(section: Section, text: &str) -> Self {
        Self {
            section,
            columns: section.columns(),
            body: TableBody::Placeholder(text.to_string()),
        }
    }

    pub fn with_rows(section: Section, rows: Vec<TableRow>) -> Self {
        Self {
            section,
            columns: section.columns(),
            body: TableBody::Rows(rows),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TableBody {
    /// A single full-width message (loading, error).
    Placeholder(String),
    Rows(Vec<TableRow>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub cells: Vec<Cell>,
}

impl TableRow {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    pub fn texts(&self) -> Vec<&str> {
        self.cells.iter().map(|c| c.text.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub text: String,
    pub badge: Option<StatusClass>,
}

impl Cell {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            badge: None,
        }
    }

    pub fn badge(text: impl Into<String>, class: StatusClass) -> Self {
        Self {
            text: text.into(),
            badge: Some(class),
        }
    }

    pub fn actions() -> Self {
        Self::text(ACTIONS_TEXT)
    }
}
