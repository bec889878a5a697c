//! `arena-importer` -- load one file of rows into a single entity table.
//!
//! Rows are read from a JSON array or a headed CSV file and run through the
//! batch import orchestrator. The summary is printed to stdout as JSON;
//! failing rows are also written to `batch_import_errors`.
//!
//! # Environment variables
//!
//! | Variable                  | Required | Default | Description                     |
//! |---------------------------|----------|---------|---------------------------------|
//! | `DATABASE_URL`            | yes      | --      | PostgreSQL connection string    |
//! | `DB_MAX_CONNECTIONS`      | no       | `20`    | Pool size                       |
//! | `DB_ACQUIRE_TIMEOUT_SECS` | no       | `5`     | Seconds to wait for a connection|
//! | `IMPORT_SOURCE`           | no       | `<kind>_<api\|csv>` | Provenance tag      |
//! | `LOG_FORMAT`              | no       | --      | `json` for structured logs      |

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use arena_core::import::{Channel, EntityKind};
use arena_db::DbConfig;
use arena_pipeline::import::{parse_csv_rows, parse_json_rows, RawRow};
use arena_pipeline::Importer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Csv,
}

impl Format {
    /// `.csv` files are CSV, everything else JSON.
    fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => Self::Csv,
            _ => Self::Json,
        }
    }

    fn channel(self) -> Channel {
        match self {
            Self::Json => Channel::Api,
            Self::Csv => Channel::Csv,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "arena-importer", version, about = "Batch-import esports records")]
struct Args {
    /// Entity kind, e.g. `players` or `match_games`.
    kind: EntityKind,

    /// File holding the rows.
    file: PathBuf,

    /// Provenance tag stored with every failed row.
    #[arg(long, env = "IMPORT_SOURCE")]
    source: Option<String>,

    /// Payload format. Guessed from the file extension when omitted.
    #[arg(long, value_enum)]
    format: Option<Format>,

    /// Apply pending migrations before importing.
    #[arg(long)]
    migrate: bool,
}

impl Args {
    fn format(&self) -> Format {
        self.format.unwrap_or_else(|| Format::from_path(&self.file))
    }

    fn source(&self) -> String {
        self.source
            .clone()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| self.kind.source_tag(self.format().channel()))
    }
}

fn decode_rows(format: Format, payload: &str) -> anyhow::Result<Vec<RawRow>> {
    let rows = match format {
        Format::Json => parse_json_rows(payload)?,
        Format::Csv => parse_csv_rows(payload)?,
    };
    Ok(rows)
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "arena_importer=info,arena_pipeline=info,arena_db=info".into());

    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    let fmt_layer = if json {
        tracing_subscriber::fmt::layer().json().boxed()
    } else {
        tracing_subscriber::fmt::layer().boxed()
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let args = Args::parse();
    let format = args.format();
    let source = args.source();

    let payload = std::fs::read_to_string(&args.file)
        .with_context(|| format!("reading {}", args.file.display()))?;
    let rows = decode_rows(format, &payload)
        .with_context(|| format!("decoding {} as {format:?}", args.file.display()))?;

    let config = DbConfig::from_env()?;
    let pool = arena_db::create_pool(&config)
        .await
        .context("connecting to the database")?;
    arena_db::health_check(&pool).await?;
    tracing::info!(max_connections = config.max_connections, "Database connected");

    if args.migrate {
        arena_db::run_migrations(&pool).await?;
        tracing::info!("Migrations applied");
    }

    tracing::info!(kind = %args.kind, source = %source, rows = rows.len(), "Starting import");

    let importer = Importer::new(pool.clone(), pool);
    let summary = importer.import_kind(args.kind, &source, &rows).await;

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
