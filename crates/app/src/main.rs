use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use mentor_core::Clock;
use services::{AppServices, IdentityConfig};
use storage::Storage;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

const DEFAULT_DB_URL: &str = "sqlite://physics-mentor.sqlite3";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  physics-mentor [--db <sqlite_url>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db {DEFAULT_DB_URL}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  PHYSICS_MENTOR_DB_URL        database location (overridden by --db)");
    eprintln!("  PHYSICS_MENTOR_API_KEY       identity provider key; accounts are off without it");
    eprintln!("  PHYSICS_MENTOR_IDENTITY_URL  identity provider base URL");
    eprintln!("  RUST_LOG                     log filter (default: info)");
}

enum Parsed {
    Run(Args),
    Help,
}

struct Args {
    db_url: String,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Parsed, ArgsError> {
        let mut db_url = std::env::var("PHYSICS_MENTOR_DB_URL")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map_or_else(|| DEFAULT_DB_URL.into(), normalize_sqlite_url);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--help" | "-h" => return Ok(Parsed::Help),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Parsed::Run(Self { db_url }))
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let parsed = match Args::parse(&mut argv).inspect_err(|e| {
        eprintln!("{e}");
        print_usage();
    })? {
        Parsed::Help => {
            print_usage();
            return Ok(());
        }
        Parsed::Run(args) => args,
    };

    init_tracing();

    // Open + migrate SQLite at startup. Keep this in the binary glue so core/services stay pure.
    prepare_sqlite_file(&parsed.db_url)?;
    let storage = Storage::sqlite(&parsed.db_url).await?;
    info!(db = %parsed.db_url, "storage ready");

    let identity = IdentityConfig::from_env()?;
    if identity.is_none() {
        warn!("PHYSICS_MENTOR_API_KEY is not set; accounts are disabled");
    }

    let services = AppServices::from_storage(storage, Clock::default_clock(), identity)?;
    let app: Arc<dyn UiApp> = Arc::new(services);
    let context = build_app_context(&app);

    // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Physics Mentor")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
