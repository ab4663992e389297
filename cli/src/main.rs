//! CSMS reservations — operator CLI
//!
//! Thin front-end over the reservation store for inspecting and fixing
//! reservation rows by hand.
//!
//! ```sh
//! # List active reservations of a charge point
//! csms-reservations list --charge-box-id CP001 --active
//!
//! # Create, confirm and consume a reservation
//! csms-reservations insert --id-tag TAG-001 --charge-box-id CP001 \
//!     --start 2026-10-14T10:00:00Z --expiry 2026-10-14T11:00:00Z
//! csms-reservations accept 7
//! csms-reservations use 7 42
//!
//! # Validate config without touching the database
//! csms-reservations check
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use tracing::{error, info, warn};

use csms_reservations::{
    init_tracing, AppConfig, NewReservation, Reservation, ReservationQuery, ReservationStatus,
    StoreHandle, StoreOptions,
};

/// Reservation store maintenance for the CSMS.
#[derive(Parser, Debug)]
#[command(
    name = "csms-reservations",
    version,
    about = "Inspect and update charge point reservations",
    long_about = "CSMS reservations: list, create and move charge point reservations \
                  through their WAITING / ACCEPTED / CANCELLED / USED lifecycle.\n\n\
                  Default config: ~/.config/csms-reservations/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "CSMS_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    /// Override the database url.
    #[arg(long, global = true)]
    database_url: Option<String>,

    /// Skip database migrations on startup.
    #[arg(long, global = true)]
    no_migrate: bool,

    /// Print results as JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List reservations, ordered by expiry.
    List(ListArgs),
    /// Ids of accepted, unexpired reservations for a charge point.
    ActiveIds { charge_box_id: String },
    /// Show a single reservation.
    Show { id: i32 },
    /// Create a WAITING reservation.
    Insert(InsertArgs),
    /// Mark a reservation ACCEPTED.
    Accept { id: i32 },
    /// Mark a reservation CANCELLED.
    Cancel { id: i32 },
    /// Mark a reservation USED by a transaction.
    Use { id: i32, transaction_id: i32 },
    /// Delete a reservation.
    Delete { id: i32 },
    /// Apply pending database migrations.
    Migrate,
    /// Validate the configuration file and exit.
    Check,
}

#[derive(Args, Debug)]
struct ListArgs {
    #[arg(long)]
    charge_box_id: Option<String>,
    /// Filter by id tag.
    #[arg(long)]
    user_id: Option<String>,
    /// WAITING, ACCEPTED, CANCELLED or USED.
    #[arg(long, value_parser = parse_status)]
    status: Option<ReservationStatus>,
    /// Only reservations expiring in the future.
    #[arg(long, conflicts_with_all = ["from", "to"])]
    active: bool,
    /// Window start (RFC 3339); requires --to.
    #[arg(long, requires = "to", value_parser = parse_timestamp)]
    from: Option<DateTime<Utc>>,
    /// Window end (RFC 3339); requires --from.
    #[arg(long, requires = "from", value_parser = parse_timestamp)]
    to: Option<DateTime<Utc>>,
}

#[derive(Args, Debug)]
struct InsertArgs {
    #[arg(long)]
    id_tag: String,
    #[arg(long)]
    charge_box_id: String,
    /// RFC 3339 timestamp.
    #[arg(long, value_parser = parse_timestamp)]
    start: DateTime<Utc>,
    /// RFC 3339 timestamp.
    #[arg(long, value_parser = parse_timestamp)]
    expiry: DateTime<Utc>,
}

/// Case-insensitive for operator input; stored column text is matched exactly.
fn parse_status(s: &str) -> Result<ReservationStatus, String> {
    s.to_ascii_uppercase()
        .parse()
        .map_err(|e: csms_reservations::DomainError| e.to_string())
}

fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("invalid RFC 3339 timestamp '{}': {}", s, e))
}

impl ListArgs {
    fn into_query(self) -> ReservationQuery {
        let mut query = ReservationQuery {
            charge_box_id: self.charge_box_id,
            user_id: self.user_id,
            status: self.status,
            period: None,
        };
        if self.active {
            query = query.active();
        } else if let (Some(from), Some(to)) = (self.from, self.to) {
            query = query.between(from, to);
        }
        query
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(csms_reservations::default_config_path);

    let mut config = match AppConfig::load(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            // Fallback tracing init so main can report the error
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .init();
            return Err(e.into());
        }
    };

    // ── Apply CLI overrides ────────────────────────────────────
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }

    init_tracing(&config);
    info!("Configuration loaded from {}", config_path.display());

    let opts = StoreOptions {
        config,
        auto_migrate: !cli.no_migrate,
        database_url: cli.database_url.clone(),
    };

    if let Command::Check = cli.command {
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   Database    : {}", opts.effective_database_url());
        println!("   Log level   : {}", opts.config.logging.level);
        println!("   Log format  : {}", opts.config.logging.format);
        return Ok(());
    }

    let handle = StoreHandle::open(opts).await?;

    let result = execute(&handle, cli.command, cli.json).await;
    if let Err(e) = handle.close().await {
        warn!(error = %e, "Failed to close database connection");
    }
    result
}

async fn execute(
    handle: &StoreHandle,
    command: Command,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = &handle.reservations;

    match command {
        Command::List(args) => {
            let reservations = store.list(&args.into_query()).await?;
            print_reservations(&reservations, json)?;
        }
        Command::ActiveIds { charge_box_id } => {
            let ids = store.list_active_ids(&charge_box_id).await?;
            if json {
                println!("{}", serde_json::to_string(&ids)?);
            } else {
                for id in ids {
                    println!("{}", id);
                }
            }
        }
        Command::Show { id } => match store.find_by_id(id).await? {
            Some(r) => print_reservations(std::slice::from_ref(&r), json)?,
            None => return Err(format!("Reservation {} not found", id).into()),
        },
        Command::Insert(args) => {
            if args.expiry <= args.start {
                return Err("expiry must be after start".into());
            }
            let overlapping = store
                .count_overlapping(&args.charge_box_id, args.start, args.expiry)
                .await?;
            if overlapping > 0 {
                warn!(
                    charge_box_id = %args.charge_box_id,
                    overlapping,
                    "New reservation overlaps existing reservations"
                );
            }
            let id = store
                .insert(NewReservation::new(
                    args.id_tag,
                    args.charge_box_id,
                    args.start,
                    args.expiry,
                ))
                .await?;
            println!("{}", id);
        }
        Command::Accept { id } => report_update(id, store.accept(id).await?),
        Command::Cancel { id } => report_update(id, store.cancel(id).await?),
        Command::Use { id, transaction_id } => {
            report_update(id, store.mark_used(id, transaction_id).await?)
        }
        Command::Delete { id } => {
            store.delete(id).await?;
        }
        Command::Migrate => {
            handle.migrate().await?;
        }
        // handled before the store is opened
        Command::Check => {}
    }

    Ok(())
}

fn report_update(id: i32, rows: u64) {
    if rows == 0 {
        warn!(reservation_id = id, "No reservation with this id");
    }
}

fn print_reservations(
    reservations: &[Reservation],
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(reservations)?);
        return Ok(());
    }

    println!(
        "{:>6}  {:<10}  {:<20}  {:<16}  {:<20}  {:<20}  {:>6}",
        "ID", "STATUS", "ID TAG", "CHARGE BOX", "START", "EXPIRY", "TX"
    );
    for r in reservations {
        println!(
            "{:>6}  {:<10}  {:<20}  {:<16}  {:<20}  {:<20}  {:>6}",
            r.id,
            r.status,
            r.id_tag,
            r.charge_box_id,
            r.start_datetime.format("%Y-%m-%d %H:%M:%S"),
            r.expiry_datetime.format("%Y-%m-%d %H:%M:%S"),
            r.transaction_id
                .map(|t| t.to_string())
                .unwrap_or_else(|| "-".into()),
        );
    }
    Ok(())
}
