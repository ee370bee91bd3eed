use clap::{Parser, ValueEnum};
use feeledger::application::engine::{AllocationRequest, FeeEngine};
use feeledger::domain::money::{Money, Rate};
use feeledger::domain::policy::{AllocationMode, AllocationPolicy, BaseRatePolicy, FeeBasis};
use feeledger::domain::ports::LedgerStoreBox;
use feeledger::infrastructure::in_memory::InMemoryLedgerStore;
#[cfg(feature = "storage-rocksdb")]
use feeledger::infrastructure::rocksdb::RocksDBStore;
use feeledger::interfaces::csv::calendar_reader::read_calendar;
use feeledger::interfaces::csv::installment_reader::InstallmentReader;
use feeledger::interfaces::csv::ledger_writer::LedgerWriter;
use miette::{IntoDiagnostic, Result};
use rust_decimal::Decimal;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Csv,
    Json,
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input installments CSV file
    input: PathBuf,

    /// Calendar CSV (competence, payment_date) used to project missing payment dates
    #[arg(long)]
    calendar: Option<PathBuf>,

    /// Contractual fee total as a fixed figure
    #[arg(long, conflicts_with = "fee_percent", required_unless_present = "fee_percent")]
    fee_total: Option<Decimal>,

    /// Contractual fee as a percentage of the total net benefit (e.g. 30)
    #[arg(long)]
    fee_percent: Option<Decimal>,

    /// Fee already collected in prior cycles
    #[arg(long, default_value = "0")]
    already_paid: Decimal,

    #[arg(long, value_enum, default_value_t = AllocationMode::Tiered)]
    mode: AllocationMode,

    #[arg(long, value_enum, default_value_t = BaseRatePolicy::Position)]
    base_rate: BaseRatePolicy,

    /// First run for this client: charge already-paid releases too
    #[arg(long)]
    first_run: bool,

    /// Client identifier the snapshot is stored under
    #[arg(long, default_value = "default")]
    client: String,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long)]
    db_path: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
    format: OutputFormat,
}

fn open_store(db_path: Option<PathBuf>) -> Result<LedgerStoreBox> {
    match db_path {
        #[cfg(feature = "storage-rocksdb")]
        Some(path) => {
            let store = RocksDBStore::open(path).into_diagnostic()?;
            Ok(Box::new(store))
        }
        #[cfg(not(feature = "storage-rocksdb"))]
        Some(_) => {
            tracing::warn!(
                "Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to In-Memory storage."
            );
            Ok(Box::new(InMemoryLedgerStore::new()))
        }
        None => Ok(Box::new(InMemoryLedgerStore::new())),
    }
}

fn fee_basis(cli: &Cli) -> Result<FeeBasis> {
    match (cli.fee_total, cli.fee_percent) {
        (Some(total), _) => Ok(FeeBasis::Fixed(Money::non_negative(total).into_diagnostic()?)),
        (None, Some(percent)) => Ok(FeeBasis::PercentOfNet(
            Rate::from_percent(percent).into_diagnostic()?,
        )),
        (None, None) => Err(miette::miette!("one of --fee-total or --fee-percent is required")),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let policy = AllocationPolicy::default()
        .with_mode(cli.mode)
        .with_base_rate(cli.base_rate)
        .with_charge_paid_releases(cli.first_run);
    let basis = fee_basis(&cli)?;
    let already_paid = Money::non_negative(cli.already_paid).into_diagnostic()?;

    let mut engine = FeeEngine::new(open_store(cli.db_path.clone())?, policy);
    if let Some(path) = &cli.calendar {
        let calendar = read_calendar(File::open(path).into_diagnostic()?).into_diagnostic()?;
        info!(entries = calendar.len(), "loaded disbursement calendar");
        engine = engine.with_calendar(Box::new(calendar));
    }

    let file = File::open(&cli.input).into_diagnostic()?;
    let installments = InstallmentReader::new(file).read_all().into_diagnostic()?;
    info!(installments = installments.len(), "loaded installments");

    let outcome = engine
        .run(AllocationRequest {
            client: cli.client,
            installments,
            fee_basis: basis,
            already_paid,
        })
        .await
        .into_diagnostic()?;

    let stdout = io::stdout();
    let mut writer = LedgerWriter::new(stdout.lock());
    match cli.format {
        OutputFormat::Csv => writer.write_rows(&outcome.ledger).into_diagnostic()?,
        OutputFormat::Json => writer.write_json(&outcome).into_diagnostic()?,
    }

    Ok(())
}
