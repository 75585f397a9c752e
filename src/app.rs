use std::collections::HashMap;
use std::sync::Arc;

use crossterm::event::KeyCode;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, error, info, warn};

use crate::api::{ApiClient, ApiError, Transport};
use crate::ui::navigation::{DispatchTable, Navigator, Ticket};
use crate::ui::{Section, SectionContent};

/// Result of one renderer run, tagged with the activation it belongs to.
#[derive(Debug)]
pub struct LoadOutcome {
    pub ticket: Ticket,
    pub result: Result<SectionContent, ApiError>,
}

/// Messages from background tasks to the UI loop.
#[derive(Debug)]
pub enum AppEvent {
    Loaded(LoadOutcome),
    Health(bool),
}

// Main application state
pub struct App<T: Transport> {
    api: Arc<ApiClient<T>>,
    dispatch: DispatchTable<T>,
    navigator: Navigator,
    content: SectionContent,
    filters: HashMap<Section, String>,
    search_input: Option<String>,
    selected: usize,
    api_online: Option<bool>,
    events_tx: UnboundedSender<AppEvent>,
    events_rx: UnboundedReceiver<AppEvent>,
}

impl<T: Transport> App<T> {
    pub fn new(api: ApiClient<T>, dispatch: DispatchTable<T>) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            api: Arc::new(api),
            dispatch,
            navigator: Navigator::new(),
            content: Section::Dashboard.loading_content(),
            filters: HashMap::new(),
            search_input: None,
            selected: 0,
            api_online: None,
            events_tx,
            events_rx,
        }
    }

    pub fn active_section(&self) -> Section {
        self.navigator.active()
    }

    pub fn content(&self) -> &SectionContent {
        &self.content
    }

    pub fn filter(&self, section: Section) -> Option<&str> {
        self.filters.get(&section).map(String::as_str)
    }

    pub fn search_input(&self) -> Option<&str> {
        self.search_input.as_deref()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn api_online(&self) -> Option<bool> {
        self.api_online
    }

    /// Show `section` with its loading placeholder and start its renderer.
    /// Must be called from within the tokio runtime.
    pub fn activate(&mut self, section: Section) {
        let ticket = self.navigator.activate(section);
        info!(section = section.id(), token = ticket.token, "activating section");

        self.content = section.loading_content();
        self.selected = 0;

        let loader = self.dispatch.loader(section);
        let load = loader(self.api.clone(), self.filters.get(&section).cloned());
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = load.await;
            // The receiver only goes away when the app shuts down
            let _ = tx.send(AppEvent::Loaded(LoadOutcome { ticket, result }));
        });
    }

    /// Re-fetch and re-render the visible section.
    pub fn reload(&mut self) {
        self.activate(self.active_section());
    }

    /// Probe `/health` in the background; the header shows the answer.
    pub fn probe_health(&self) {
        let api = self.api.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let online = match api.health().await {
                Ok(status) => status.ok,
                Err(e) => {
                    warn!(error = %e, "health probe failed");
                    false
                }
            };
            let _ = tx.send(AppEvent::Health(online));
        });
    }

    /// Put a renderer result on screen unless the user has moved on.
    /// Returns whether the outcome was applied.
    pub fn apply(&mut self, outcome: LoadOutcome) -> bool {
        let LoadOutcome { ticket, result } = outcome;
        if !self.navigator.is_current(&ticket) {
            debug!(
                section = ticket.section.id(),
                token = ticket.token,
                "discarding stale section result"
            );
            return false;
        }

        self.content = match result {
            Ok(content) => content,
            Err(e) => {
                error!(section = ticket.section.id(), error = %e, "failed to load section");
                ticket.section.error_content()
            }
        };
        self.selected = 0;
        true
    }

    fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Loaded(outcome) => {
                self.apply(outcome);
            }
            AppEvent::Health(online) => self.api_online = Some(online),
        }
    }

    /// Apply everything background tasks reported since the last call.
    pub fn drain_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.handle_event(event);
        }
    }

    /// Wait for the next background message and apply it.
    #[cfg(test)]
    pub async fn process_next_event(&mut self) -> bool {
        match self.events_rx.recv().await {
            Some(event) => {
                let applied = matches!(
                    &event,
                    AppEvent::Loaded(o) if self.navigator.is_current(&o.ticket)
                );
                self.handle_event(event);
                applied
            }
            None => false,
        }
    }

    pub fn next(&mut self) {
        let rows = self.content.row_count();
        if rows == 0 {
            return;
        }
        self.selected = if self.selected >= rows - 1 { 0 } else { self.selected + 1 };
    }

    pub fn previous(&mut self) {
        let rows = self.content.row_count();
        if rows == 0 {
            return;
        }
        self.selected = if self.selected == 0 { rows - 1 } else { self.selected - 1 };
    }

    fn apply_search(&mut self, term: String) {
        let section = self.active_section();
        let term = term.trim().to_string();
        if term.is_empty() {
            self.filters.remove(&section);
        } else {
            self.filters.insert(section, term);
        }
        self.reload();
    }

    /// Returns true when the user asked to quit.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        if let Some(input) = self.search_input.as_mut() {
            match code {
                KeyCode::Esc => self.search_input = None,
                KeyCode::Enter => {
                    let term = self.search_input.take().unwrap_or_default();
                    self.apply_search(term);
                }
                KeyCode::Backspace => {
                    input.pop();
                }
                KeyCode::Char(c) => input.push(c),
                _ => {}
            }
            return false;
        }

        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Tab | KeyCode::Right => self.activate(self.active_section().next()),
            KeyCode::BackTab | KeyCode::Left => self.activate(self.active_section().previous()),
            KeyCode::Char(c @ '1'..='5') => {
                let index = c as usize - '1' as usize;
                self.activate(Section::ALL[index]);
            }
            KeyCode::Char('r') => self.reload(),
            KeyCode::Char('/') => {
                let section = self.active_section();
                if section.accepts_filter() {
                    self.search_input = Some(self.filter(section).unwrap_or_default().to_string());
                }
            }
            KeyCode::Down => self.next(),
            KeyCode::Up => self.previous(),
            _ => {}
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeTransport;
    use crate::api::Method;
    use crate::ui::{DashboardView, TableBody, TableView, LOADING_TEXT};
    use serde_json::{json, Value};

    fn works_json(n: i32) -> Value {
        Value::Array(
            (1..=n)
                .map(|id| json!({"id_obra": id, "nombre_obra": format!("Obra {id}"),
                                 "estado_obra": "En proceso"}))
                .collect(),
        )
    }

    fn employees_json(n: i32) -> Value {
        Value::Array(
            (1..=n)
                .map(|id| json!({"id_empleado": id, "nombre_empleado": format!("Empleado {id}"),
                                 "salario_fijo_empleado": 2500}))
                .collect(),
        )
    }

    fn backend() -> FakeTransport {
        FakeTransport::new()
            .respond(Method::Get, "/obras", 200, works_json(4))
            .respond(Method::Get, "/empleados", 200, employees_json(2))
            .respond(Method::Get, "/materiales", 200, json!([]))
            .respond(Method::Get, "/proyectos", 200, json!([]))
            .respond(Method::Get, "/health", 200, json!({"ok": true}))
    }

    fn app(transport: FakeTransport) -> App<FakeTransport> {
        App::new(ApiClient::new(transport), DispatchTable::standard().unwrap())
    }

    fn calls(app: &App<FakeTransport>, path: &str) -> usize {
        app.api.transport().count(Method::Get, path)
    }

    #[tokio::test]
    async fn startup_renders_dashboard_totals() {
        let mut app = app(backend());
        app.activate(Section::Dashboard);
        assert_eq!(app.content(), &SectionContent::Dashboard(DashboardView::Loading));

        assert!(app.process_next_event().await);

        let SectionContent::Dashboard(DashboardView::Ready(summary)) = app.content() else {
            panic!("dashboard should be ready");
        };
        assert_eq!(summary.total_works, 4);
        assert_eq!(summary.total_employees, 2);
        assert_eq!(summary.total_materials, 0);
        assert_eq!(summary.recent_employees[1].detail, "Tipo: - | Salario: Q2,500.00");
    }

    #[tokio::test]
    async fn dashboard_shows_error_instead_of_partial_counts() {
        let transport = FakeTransport::new()
            .respond(Method::Get, "/obras", 200, works_json(4))
            .fail(Method::Get, "/empleados", "connection reset")
            .respond(Method::Get, "/materiales", 200, json!([]));
        let mut app = app(transport);

        app.activate(Section::Dashboard);
        app.process_next_event().await;

        assert_eq!(app.content(), &Section::Dashboard.error_content());
    }

    #[tokio::test]
    async fn table_section_shows_loading_then_rows() {
        let mut app = app(backend());

        app.activate(Section::Works);
        assert_eq!(
            app.content(),
            &SectionContent::Table(TableView::placeholder(Section::Works, LOADING_TEXT))
        );

        app.process_next_event().await;
        assert_eq!(app.content().row_count(), 4);
    }

    #[tokio::test]
    async fn failed_section_shows_error_placeholder() {
        let transport = FakeTransport::new().respond_text(Method::Get, "/obras", 500, "boom");
        let mut app = app(transport);

        app.activate(Section::Works);
        app.process_next_event().await;

        let SectionContent::Table(view) = app.content() else {
            panic!("works is a table section");
        };
        assert_eq!(view.body, TableBody::Placeholder("Error cargando obras".to_string()));
    }

    #[tokio::test]
    async fn navigating_back_refetches_and_rebuilds() {
        let mut app = app(backend());

        app.activate(Section::Works);
        app.process_next_event().await;
        app.activate(Section::Employees);
        app.process_next_event().await;
        assert_eq!(app.content().row_count(), 2);
        app.activate(Section::Works);
        app.process_next_event().await;

        assert_eq!(calls(&app, "/obras"), 2);
        assert_eq!(calls(&app, "/empleados"), 1);
        assert_eq!(app.active_section(), Section::Works);
        assert_eq!(app.content().row_count(), 4);
    }

    #[tokio::test]
    async fn stale_result_is_discarded() {
        let mut app = app(backend());

        app.activate(Section::Works);
        app.activate(Section::Employees);

        let first = app.process_next_event().await;
        let second = app.process_next_event().await;

        // exactly one of the two outcomes (the employees one) is applied
        assert!(first ^ second);
        let SectionContent::Table(view) = app.content() else {
            panic!("employees is a table section");
        };
        assert_eq!(view.section, Section::Employees);
        assert_eq!(app.content().row_count(), 2);
    }

    #[tokio::test]
    async fn number_keys_and_tab_switch_sections() {
        let mut app = app(backend());

        assert!(!app.handle_key(KeyCode::Char('3')));
        assert_eq!(app.active_section(), Section::Employees);
        app.handle_key(KeyCode::Tab);
        assert_eq!(app.active_section(), Section::Materials);
        app.handle_key(KeyCode::BackTab);
        app.handle_key(KeyCode::BackTab);
        assert_eq!(app.active_section(), Section::Works);
        assert!(app.handle_key(KeyCode::Char('q')));
    }

    #[tokio::test]
    async fn search_filter_is_sent_with_the_reload() {
        let mut app = app(backend());
        app.activate(Section::Works);
        app.process_next_event().await;

        app.handle_key(KeyCode::Char('/'));
        for c in "puentex".chars() {
            app.handle_key(KeyCode::Char(c));
        }
        app.handle_key(KeyCode::Backspace);
        assert_eq!(app.search_input(), Some("puente"));
        app.handle_key(KeyCode::Enter);
        app.process_next_event().await;

        assert_eq!(app.filter(Section::Works), Some("puente"));
        let last = app.api.transport().calls().pop().unwrap();
        assert_eq!(last.query, vec![("q".to_string(), "puente".to_string())]);
    }

    #[tokio::test]
    async fn search_is_not_offered_on_dashboard() {
        let mut app = app(backend());

        app.handle_key(KeyCode::Char('/'));

        assert_eq!(app.search_input(), None);
    }

    #[tokio::test]
    async fn row_selection_wraps() {
        let mut app = app(backend());
        app.activate(Section::Employees);
        app.process_next_event().await;

        app.handle_key(KeyCode::Up);
        assert_eq!(app.selected(), 1);
        app.handle_key(KeyCode::Down);
        assert_eq!(app.selected(), 0);
    }

    #[tokio::test]
    async fn health_probe_updates_status() {
        let mut app = app(backend());
        assert_eq!(app.api_online(), None);

        app.probe_health();
        app.process_next_event().await;

        assert_eq!(app.api_online(), Some(true));
    }
}
