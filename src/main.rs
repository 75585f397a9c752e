use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use tracing::info;
use tui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use obras_dashboard::api::{ApiClient, HttpTransport, Transport};
use obras_dashboard::app::App;
use obras_dashboard::ui::draw::render_app;
use obras_dashboard::ui::navigation::DispatchTable;
use obras_dashboard::ui::Section;
use obras_dashboard::config::Config;
use obras_dashboard::logging;

/// How long to wait for a key before redrawing with any new results
const TICK: Duration = Duration::from_millis(100);

/// Terminal dashboard for the construction management API
#[derive(Debug, Parser)]
#[command(name = "obras-dashboard", version)]
struct Cli {
    /// Base URL of the API (overrides API_BASE_URL)
    #[arg(long)]
    api_url: Option<String>,

    /// Log file path (overrides LOG_FILE)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load()?.with_overrides(cli.api_url, cli.log_file);
    logging::init(config.log_file())?;
    info!(api = config.api_base_url(), "starting obras dashboard");

    let api = ApiClient::new(HttpTransport::new(config.api_base_url()));
    let dispatch = DispatchTable::standard()?;

    // Setup terminal
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(api, dispatch);
    app.probe_health();
    app.activate(Section::Dashboard);

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    terminal::disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        tracing::error!(error = %err, "dashboard stopped");
        println!("Error: {}", err);
    }

    Ok(())
}

fn run_app<B: Backend, T: Transport>(terminal: &mut Terminal<B>, app: &mut App<T>) -> Result<()> {
    loop {
        app.drain_events();
        terminal.draw(|f| render_app(f, app))?;

        if event::poll(TICK)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && app.handle_key(key.code) {
                    break;
                }
            }
        }
    }

    Ok(())
}
