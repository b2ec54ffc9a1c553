use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;

use roost::app::{App, AppEvent};
use roost::auth::{HttpIdentityProvider, IdentityProvider};
use roost::config::{Config, IDENTITY_ENDPOINT_ENV, PUBLISHABLE_KEY_ENV};
use roost::listings::{CategoryId, ListingStore};
use roost::theme::ThemeVariant;
use roost::ui;

/// Get the config directory path (~/.config/roost/)
fn get_config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    let config_dir = PathBuf::from(home).join(".config").join("roost");
    Ok(config_dir)
}

/// Route logs to `roost.log` in the config directory when `RUST_LOG` is set.
///
/// The TUI owns stdout, so nothing is written there.
fn init_logging(config_dir: &std::path::Path) -> Result<()> {
    if std::env::var_os("RUST_LOG").is_none() {
        return Ok(());
    }

    let log_path = config_dir.join("roost.log");
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file '{}'", log_path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[derive(Parser, Debug)]
#[command(name = "roost", about = "Browse vacation-rental listings by category")]
struct Args {
    /// Listings fixture (JSON array) to load instead of the bundled one
    #[arg(long, value_name = "FILE")]
    listings: Option<PathBuf>,

    /// Config file (defaults to ~/.config/roost/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Category to select at startup
    #[arg(long, value_name = "NAME")]
    category: Option<String>,

    /// Theme variant (dark or light)
    #[arg(long, value_name = "NAME")]
    theme: Option<String>,

    /// Screen to open at startup, e.g. /listing/10003
    #[arg(long, value_name = "PATH")]
    open: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Set up config directory
    let config_dir = get_config_dir()?;
    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir).context("Failed to create config directory")?;
    }

    // Set directory permissions on Unix (user-only access)
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if let Ok(metadata) = std::fs::metadata(&config_dir) {
            let mut perms = metadata.permissions();
            perms.set_mode(0o700);
            // Logging is not up yet; a failure here is not worth aborting for
            let _ = std::fs::set_permissions(&config_dir, perms);
        }
    }

    init_logging(&config_dir)?;

    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| config_dir.join("config.toml"));
    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config '{}'", config_path.display()))?;

    // Listing fixture: CLI flag, then config, then the bundled copy
    let store = match args.listings.as_ref().or(config.listings_path.as_ref()) {
        Some(path) => ListingStore::load(path)
            .with_context(|| format!("Failed to load listings from '{}'", path.display()))?,
        None => ListingStore::bundled().context("Failed to load bundled listings")?,
    };
    tracing::info!(listings = store.len(), "Listing store ready");

    let Some(identity) = config.identity.resolve() else {
        eprintln!("Error: No identity service configured.");
        eprintln!();
        eprintln!(
            "Set {} and {}, or add an [identity] table to {}.",
            PUBLISHABLE_KEY_ENV,
            IDENTITY_ENDPOINT_ENV,
            config_path.display()
        );
        std::process::exit(1);
    };
    let provider = HttpIdentityProvider::new(&identity.endpoint, identity.publishable_key)
        .context("Failed to set up identity provider")?;
    let provider: Arc<dyn IdentityProvider> = Arc::new(provider);

    let mut app = App::new(store, config.settle_delay(), Some(provider));

    for warning in app.keybindings.apply_overrides(&config.keybindings) {
        tracing::warn!(warning = %warning, "Ignoring keybinding override");
    }

    let theme_name = args.theme.as_deref().unwrap_or(&config.theme);
    match ThemeVariant::from_str_name(theme_name) {
        Some(variant) => app.set_theme(variant),
        None => tracing::warn!(theme = %theme_name, "Unknown theme, using dark"),
    }

    // Create event channel for background tasks
    let (event_tx, event_rx) = mpsc::channel::<AppEvent>(32);

    if let Some(name) = args.category.as_deref() {
        match CategoryId::from_name(name) {
            Some(id) => app.select_category(Some(id), &event_tx),
            None => {
                // Unknown names still go through the feed and settle empty
                tracing::warn!(category = %name, "Unknown category");
                app.feed.select_category(name, &event_tx);
            }
        }
    }

    if let Some(path) = args.open.as_deref() {
        if !app.open_path(path) {
            anyhow::bail!("Nothing to open at '{}'", path);
        }
    }

    if !app.session.is_signed_in() {
        app.present_login();
    }

    // Run the TUI
    ui::run(&mut app, event_tx, event_rx).await?;

    println!("Goodbye!");
    Ok(())
}
