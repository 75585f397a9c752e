use tui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{
        Block, Borders, Cell as TuiCell, List, ListItem, ListState, Paragraph, Row, Table,
        TableState,
    },
    Frame,
};

use crate::api::Transport;
use crate::app::App;
use crate::format::StatusClass;

use super::{
    DashboardSummary, DashboardView, RecentItem, Section, SectionContent, TableBody, TableView,
    LOADING_TEXT,
};

const MENU_WIDTH: u16 = 20;

fn badge_style(class: StatusClass) -> Style {
    let color = match class {
        StatusClass::Completed => Color::Green,
        StatusClass::Suspended => Color::Red,
        StatusClass::InProcess => Color::Yellow,
        StatusClass::Active => Color::Cyan,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

pub fn render_app<B: Backend, T: Transport>(frame: &mut Frame<B>, app: &App<T>) {
    let size = frame.size();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Min(1),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(size);

    render_header(frame, chunks[0], app.api_online());

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(MENU_WIDTH), Constraint::Min(1)].as_ref())
        .split(chunks[1]);

    render_menu(frame, body[0], app.active_section());

    let section = app.active_section();
    match app.content() {
        SectionContent::Dashboard(view) => render_dashboard(frame, body[1], view),
        SectionContent::Table(view) => {
            render_table(frame, body[1], view, app.filter(section), app.selected())
        }
    }

    render_footer(frame, chunks[2], app);
}

fn render_header<B: Backend>(frame: &mut Frame<B>, area: Rect, api_online: Option<bool>) {
    let (status, color) = match api_online {
        Some(true) => ("API: en línea", Color::Green),
        Some(false) => ("API: sin conexión", Color::Red),
        None => ("API: verificando…", Color::Yellow),
    };

    let header = Paragraph::new(Spans::from(vec![
        Span::styled("Constructora", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("  |  "),
        Span::styled(status, Style::default().fg(color)),
    ]))
    .block(Block::default().borders(Borders::ALL));

    frame.render_widget(header, area);
}

fn render_menu<B: Backend>(frame: &mut Frame<B>, area: Rect, active: Section) {
    let items: Vec<ListItem> = Section::ALL
        .iter()
        .enumerate()
        .map(|(i, section)| ListItem::new(format!("{} {}", i + 1, section.title())))
        .collect();

    let menu = List::new(items)
        .block(Block::default().title("Menú").borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = ListState::default();
    state.select(Some(active.index()));
    frame.render_stateful_widget(menu, area, &mut state);
}

fn section_title(view: &TableView, filter: Option<&str>) -> String {
    match filter {
        Some(term) => format!("{} (filtro: {})", view.section.title(), term),
        None => view.section.title().to_string(),
    }
}

fn render_table<B: Backend>(
    frame: &mut Frame<B>,
    area: Rect,
    view: &TableView,
    filter: Option<&str>,
    selected: usize,
) {
    let block = Block::default()
        .title(section_title(view, filter))
        .borders(Borders::ALL);

    let rows = match &view.body {
        TableBody::Placeholder(text) => {
            let placeholder = Paragraph::new(text.as_str())
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(placeholder, area);
            return;
        }
        TableBody::Rows(rows) => rows,
    };

    let header = Row::new(view.columns.iter().copied())
        .style(Style::default().add_modifier(Modifier::BOLD))
        .bottom_margin(1);

    let body = rows.iter().map(|row| {
        Row::new(row.cells.iter().map(|cell| match cell.badge {
            Some(class) => TuiCell::from(Span::styled(cell.text.clone(), badge_style(class))),
            None => TuiCell::from(cell.text.clone()),
        }))
    });

    let widths: Vec<Constraint> = view
        .columns
        .iter()
        .map(|_| Constraint::Ratio(1, view.columns.len() as u32))
        .collect();

    let table = Table::new(body)
        .header(header)
        .block(block)
        .widths(&widths)
        .highlight_style(Style::default().bg(Color::Blue).fg(Color::White));

    let mut state = TableState::default();
    if !rows.is_empty() {
        state.select(Some(selected));
    }
    frame.render_stateful_widget(table, area, &mut state);
}

fn render_dashboard<B: Backend>(frame: &mut Frame<B>, area: Rect, view: &DashboardView) {
    let block = Block::default().title("Dashboard").borders(Borders::ALL);

    let summary = match view {
        DashboardView::Loading => {
            let loading = Paragraph::new(LOADING_TEXT)
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(loading, area);
            return;
        }
        DashboardView::Failed(message) => {
            let failed = Paragraph::new(message.as_str())
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Red))
                .block(block);
            frame.render_widget(failed, area);
            return;
        }
        DashboardView::Ready(summary) => summary,
    };

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)].as_ref())
        .split(inner);

    render_totals(frame, chunks[0], summary);

    let lists = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)].as_ref())
        .split(chunks[1]);

    render_recent(frame, lists[0], "Obras recientes", &summary.recent_works);
    render_recent(frame, lists[1], "Actividad reciente", &summary.recent_employees);
}

fn render_totals<B: Backend>(frame: &mut Frame<B>, area: Rect, summary: &DashboardSummary) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            [
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
            ]
            .as_ref(),
        )
        .split(area);

    let totals = [
        ("Obras", summary.total_works),
        ("Empleados", summary.total_employees),
        ("Materiales", summary.total_materials),
    ];
    for ((label, total), card) in totals.iter().zip(cards.iter()) {
        let widget = Paragraph::new(Span::styled(
            total.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center)
        .block(Block::default().title(*label).borders(Borders::ALL));
        frame.render_widget(widget, *card);
    }
}

fn render_recent<B: Backend>(
    frame: &mut Frame<B>,
    area: Rect,
    title: &str,
    items: &[RecentItem],
) {
    let items: Vec<ListItem> = items
        .iter()
        .map(|item| {
            ListItem::new(vec![
                Spans::from(Span::styled(
                    item.title.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Spans::from(item.detail.clone()),
            ])
        })
        .collect();

    let list = List::new(items).block(Block::default().title(title).borders(Borders::ALL));
    frame.render_widget(list, area);
}

fn render_footer<B: Backend, T: Transport>(frame: &mut Frame<B>, area: Rect, app: &App<T>) {
    let text = match app.search_input() {
        Some(input) => format!("Buscar: {}_  | <Enter> Aplicar | <Esc> Cancelar", input),
        None if app.active_section().accepts_filter() => {
            "<1-5/Tab> Sección | <Up/Down> Fila | </> Buscar | <R> Recargar | <Q> Salir"
                .to_string()
        }
        None => "<1-5/Tab> Sección | <R> Recargar | <Q> Salir".to_string(),
    };

    let footer = Paragraph::new(text)
        .block(Block::default().borders(Borders::TOP))
        .style(Style::default().fg(Color::White));

    frame.render_widget(footer, area);
}
