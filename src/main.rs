use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use clap::Parser;
use color_eyre::eyre::{Result, eyre};
use rust_decimal::Decimal;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use wallet_recharge::{
    app::App,
    client::{HttpBalanceProvider, TerminalCheckout},
    commands::WidgetCommand,
    domain::Currency,
    state::{Widget, WidgetCallbacks, WidgetConfig, WidgetDeps},
    tui,
};

/// Wallet recharge widget running in the terminal
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Config file to load instead of the default location
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Payment gateway API key
    #[arg(long)]
    api_key: Option<String>,

    /// ISO currency code, e.g. INR or USD
    #[arg(long)]
    currency: Option<String>,

    /// Endpoint returning the wallet balance as JSON
    #[arg(long)]
    balance_url: Option<String>,

    /// Balance to show before the first fetch
    #[arg(long)]
    balance: Option<Decimal>,

    /// Write logs to this file (RUST_LOG sets the filter)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Save the effective config to the default location and exit
    #[arg(long)]
    init_config: bool,
}

impl Cli {
    fn resolve_config(&self) -> Result<WidgetConfig> {
        let mut config = match &self.config {
            Some(path) => WidgetConfig::try_load_from(path)
                .map_err(|e| eyre!("Failed to load {}: {e}", path.display()))?,
            None => WidgetConfig::load(),
        };

        if let Some(key) = &self.api_key {
            config.api_key = Some(key.clone());
        }
        if let Some(code) = &self.currency {
            config.currency = Currency::new(code.as_str());
        }
        if let Some(url) = &self.balance_url {
            config.balance_api_url = Some(url.clone());
        }
        if let Some(balance) = self.balance {
            config.balance = Some(balance);
        }
        Ok(config)
    }
}

/// Logs go to a file; the terminal belongs to the UI.
fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .try_init()
        .map_err(|e| eyre!("Failed to initialize logging: {e}"))?;

    tracing::info!(path = %path.display(), "Logging initialized");
    Ok(())
}

fn logging_callbacks() -> WidgetCallbacks {
    WidgetCallbacks::new()
        .on_success(|payment| {
            tracing::info!(
                payment_id = %payment.payment_id,
                amount = %payment.amount,
                currency = %payment.currency,
                "Recharge succeeded"
            );
        })
        .on_failure(|failure| {
            tracing::warn!(
                code = %failure.error.code,
                amount = %failure.amount,
                "Recharge failed: {}",
                failure.error.description
            );
        })
        .on_close(|| tracing::info!("Widget closed"))
        .on_balance_loaded(|balance| tracing::info!(%balance, "Balance loaded"))
        .on_balance_error(|error| tracing::warn!("Balance unavailable: {error}"))
}

/// Application entry point
#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let config = cli.resolve_config()?;
    if cli.init_config {
        let path = config.save()?;
        println!("Config written to {}", path.display());
        return Ok(());
    }

    let checkout = TerminalCheckout::new();
    let balance_provider =
        HttpBalanceProvider::new().map_err(|e| eyre!("Failed to build HTTP client: {e}"))?;
    let deps = WidgetDeps::new(Arc::new(balance_provider), Arc::new(checkout.clone()));
    let widget = Widget::new(config, logging_callbacks(), deps);

    let mut app = App::new(widget, checkout);
    app.dispatch(WidgetCommand::Show);

    let mut terminal = tui::init()?;
    let result = app.run(&mut terminal);
    app.shutdown();
    tui::restore()?;

    result
}
