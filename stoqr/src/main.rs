//! STOQR - terminal client for the inventory API
//!
//! ```sh
//! # Item list against a local API
//! stoqr --api-url http://localhost:8080/api
//!
//! # Open straight on a scanned code
//! stoqr --route https://stoqr.example.com/items/withdraw/7
//! ```

use std::cell::RefCell;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use stoqr::{logging, Runtime, StoqrUi};
use stoqr_core::state::SPINNER_TICK_MS;
use stoqr_core::{Action, ApiClient, AppState, ClientConfig, FileConfig, Route, WithdrawMethod};

/// STOQR inventory client
#[derive(Parser, Debug)]
#[command(name = "stoqr", version)]
#[command(about = "Track stock levels and withdraw items by QR code")]
struct Args {
    /// Base URL of the items API
    #[arg(long, env = "STOQR_API_URL")]
    api_url: Option<String>,

    /// Base URL QR codes point at
    #[arg(long, env = "STOQR_PUBLIC_URL")]
    public_url: Option<String>,

    /// Per-request timeout in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// HTTP method for withdrawals (get or post)
    #[arg(long)]
    withdraw_method: Option<WithdrawMethod>,

    /// Reload the item list every N seconds (0 disables)
    #[arg(long)]
    refresh_secs: Option<u64>,

    /// Screen to open, as a path or full URL (e.g. /items/qr/7)
    #[arg(long, default_value = "/items")]
    route: Route,

    /// Config file [default: <config dir>/stoqr/config.toml]
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Args {
    fn overrides(&self) -> FileConfig {
        FileConfig {
            api_url: self.api_url.clone(),
            public_url: self.public_url.clone(),
            timeout_ms: self.timeout_ms,
            withdraw_method: self.withdraw_method,
            refresh_secs: self.refresh_secs,
        }
    }

    fn resolve_config(&self) -> Result<ClientConfig, stoqr_core::ConfigError> {
        let path = self.config.clone().unwrap_or_else(FileConfig::default_path);
        let mut config = ClientConfig::from_file(FileConfig::load(&path)?);
        config.apply(self.overrides());
        config.validate()
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();

    let config = match args.resolve_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    let api = match ApiClient::new(&config) {
        Ok(api) => api,
        Err(e) => {
            eprintln!("Error: could not create HTTP client: {}", e);
            std::process::exit(1);
        }
    };

    logging::init();
    tracing::info!(api_url = %config.api_url, route = %args.route, "starting");

    // ===== Terminal setup =====
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, config, api, args.route).await;

    // ===== Cleanup =====
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    config: ClientConfig,
    api: ApiClient,
    route: Route,
) -> io::Result<()> {
    let mut runtime = Runtime::new(AppState::new(&config.public_url), api);

    runtime
        .subscriptions()
        .interval("tick", Duration::from_millis(SPINNER_TICK_MS), || {
            Action::Tick
        });
    if let Some(period) = config.refresh {
        runtime
            .subscriptions()
            .interval("refresh", period, || Action::ItemsFetch);
    }

    runtime.enqueue(Action::NavigateTo(route));

    let ui = RefCell::new(StoqrUi::new());
    runtime
        .run(
            terminal,
            |frame, area, state| ui.borrow_mut().render(frame, area, state),
            |event, state| ui.borrow_mut().map_event(event, state),
        )
        .await
}
