//! Pharmacy Stock - command line client
//!
//! Talks to the inventory backend for day-to-day stock work: browsing the
//! catalog and stock, registering batch movements from a JSON file, and
//! pulling dashboard figures and reports.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Deserialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use pharmacy_client::grid::GridState;
use pharmacy_client::movement::{self, MovementDialog, MovementSubmitter};
use pharmacy_client::notify::{Notifier, TracingNotifier};
use pharmacy_client::{ApiClient, Config, Session, TokenStore};
use shared::{AlertSettings, ConsumptionPeriod, Credentials, ItemKind, MovementDirection};

#[derive(Parser)]
#[command(name = "pharmacy-cli", version, about = "Pharmacy stock management client")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sign in and remember the session
    Login {
        #[arg(long)]
        login: String,
        #[arg(long, env = "PHARMA_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// List catalog items
    Items {
        #[arg(long, value_enum, default_value_t = KindArg::Medicine)]
        kind: KindArg,
        #[arg(long)]
        search: Option<String>,
        #[arg(long, default_value_t = 0)]
        page: u32,
        #[arg(long, default_value_t = shared::DEFAULT_PAGE_SIZE)]
        size: u32,
    },
    /// List sectors
    Sectors,
    /// Stock totals per item
    Stock {
        #[arg(long)]
        search: Option<String>,
        #[arg(long, default_value_t = 0)]
        page: u32,
        #[arg(long, default_value_t = shared::DEFAULT_PAGE_SIZE)]
        size: u32,
    },
    /// Lots of one item
    Lots { item_id: Uuid },
    /// Movement history
    Movements,
    /// Details of one movement
    Movement { id: Uuid },
    /// Dashboard counters, alerts and consumption
    Dashboard {
        #[arg(long, default_value = "month")]
        period: ConsumptionPeriod,
    },
    /// Show or change alert thresholds
    Settings {
        #[arg(long)]
        expiry_days: Option<u32>,
        #[arg(long)]
        low_stock: Option<u32>,
    },
    /// Download the daily outflow report (PDF)
    Report {
        date: NaiveDate,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Register an inbound batch from a JSON file
    Inbound {
        #[arg(long)]
        file: PathBuf,
    },
    /// Register an outbound batch from a JSON file
    Outbound {
        #[arg(long)]
        file: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    Medicine,
    Supply,
}

impl From<KindArg> for ItemKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Medicine => ItemKind::Medicine,
            KindArg::Supply => ItemKind::Supply,
        }
    }
}

/// Batch movement file
#[derive(Debug, Deserialize)]
struct BatchFile {
    #[serde(default)]
    note: String,
    /// Destination sector, outbound only
    sector: Option<Uuid>,
    lines: Vec<BatchLine>,
}

#[derive(Debug, Deserialize)]
struct BatchLine {
    item: Uuid,
    quantity: i64,
    lot: Option<String>,
    expiry: Option<NaiveDate>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pharmacy_cli=info,pharmacy_client=info,notification=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;
    tracing::debug!(environment = %config.environment, "Configuration loaded");

    let cli = Cli::parse();

    let session = Session::new();
    let store = TokenStore::new(&config.session.token_file);
    store
        .restore(&session)
        .await
        .context("reading the stored session")?;
    let client = ApiClient::new(&config.api, session)?;

    match cli.command {
        Command::Login { login, password } => {
            let token = client.login(&Credentials { login, password }).await?;
            store.save(&token).await?;
            println!("Signed in.");
        }
        Command::Logout => {
            client.logout();
            store.clear().await?;
            println!("Signed out.");
        }
        Command::Whoami => {
            let me = client.me().await?;
            println!("{} ({})", me.name, me.login);
        }
        Command::Items {
            kind,
            search,
            page,
            size,
        } => {
            let mut grid = GridState::for_items(kind.into());
            grid.set_page_size(size);
            if let Some(term) = search {
                grid.set_search_input(term);
                grid.apply_search();
            }
            grid.set_page(page);
            let result = client.list_items(&grid.query()).await?;
            for item in &result.content {
                let stock = match item.has_stock {
                    Some(true) => "in stock",
                    Some(false) => "no stock",
                    None => "",
                };
                println!(
                    "{}  {:<40} min {:>5} {:<6} {}",
                    item.id, item.name, item.minimum_stock, item.unit, stock
                );
            }
            println!(
                "page {}/{} ({} items)",
                grid.page() + 1,
                result.page_count(grid.page_size()).max(1),
                result.total_elements
            );
        }
        Command::Sectors => {
            for sector in client.list_sectors().await? {
                println!("{}  {}", sector.id, sector.display_name);
            }
        }
        Command::Stock { search, page, size } => {
            let mut grid = GridState::for_stock();
            grid.set_page_size(size);
            if let Some(term) = search {
                grid.set_search_input(term);
                grid.apply_search();
            }
            grid.set_page(page);
            let result = client.stock_balances(&grid.query()).await?;
            for row in &result.content {
                println!(
                    "{}  {:<40} {:<8} {:>8}",
                    row.item_id, row.item_name, row.kind, row.total_quantity
                );
            }
            println!("{} items with stock", result.total_elements);
        }
        Command::Lots { item_id } => {
            let today = movement::today();
            for lot in client.lots_for_item(item_id).await? {
                println!(
                    "{}  lot {:<15} expires {} ({:>4} days) qty {:>6}",
                    lot.id,
                    lot.lot_number,
                    lot.expiry_date,
                    lot.days_until_expiry(today),
                    lot.quantity
                );
            }
        }
        Command::Movements => {
            for row in client.movement_history().await? {
                println!(
                    "{}  {}  {:<16} {:>3} items {:>6} units  {}  {}",
                    row.id,
                    row.moved_at.format("%Y-%m-%d %H:%M"),
                    row.kind.to_string(),
                    row.total_items,
                    row.total_quantity,
                    row.sector_name.as_deref().unwrap_or("-"),
                    row.employee_name
                );
            }
        }
        Command::Movement { id } => {
            let details = client.movement_details(id).await?;
            println!(
                "{} on {} by {}",
                details.kind,
                details.moved_at.format("%Y-%m-%d %H:%M"),
                details.employee_name
            );
            if let Some(sector) = &details.sector_name {
                println!("Sector: {}", sector);
            }
            if let Some(note) = details.note.as_deref().filter(|n| !n.is_empty()) {
                println!("Note: {}", note);
            }
            for item in &details.items {
                println!("  {:<40} {:<12} {:>6}", item.item_name, item.item_type, item.quantity);
            }
            println!("Total: {}", details.total_quantity());
        }
        Command::Dashboard { period } => {
            let (stats, expiring, low) = tokio::try_join!(
                client.dashboard_stats(),
                client.expiring_lots(),
                client.low_stock()
            )?;
            println!(
                "Medicines: {} ({} with stock)   Supplies: {} ({} with stock)",
                stats.total_medicamentos,
                stats.medicamentos_com_estoque,
                stats.total_insumos,
                stats.insumos_com_estoque
            );
            println!("Expiring lots ({}):", stats.lotes_proximos_vencimento);
            for alert in &expiring {
                let days = alert
                    .days_to_expiry
                    .map(|d| format!("{} days", d))
                    .unwrap_or_default();
                println!("  {:<40} {} {}", alert.item_name, alert.extra_info, days);
            }
            println!("Low stock ({}):", stats.itens_estoque_baixo);
            for alert in &low {
                println!("  {:<40} {}", alert.item_name, alert.extra_info);
            }
            println!("Movements per month:");
            for month in client.movements_per_month().await? {
                println!(
                    "  {}  in {:>6}  out {:>6}",
                    month.month_label(),
                    month.inbound,
                    month.outbound
                );
            }
            println!("Consumption by sector ({}):", period.as_str());
            for row in client.consumption_by_sector(period).await? {
                println!("  {:<30} {:>8}", row.sector_name, row.total_quantity);
            }
        }
        Command::Settings {
            expiry_days,
            low_stock,
        } => {
            let mut settings: AlertSettings = client.alert_settings().await?;
            if expiry_days.is_some() || low_stock.is_some() {
                if let Some(days) = expiry_days {
                    settings.expiry_warning_days = days;
                }
                if let Some(limit) = low_stock {
                    settings.low_stock_threshold = limit;
                }
                client.save_alert_settings(&settings).await?;
                println!("Settings saved.");
            }
            println!(
                "Expiry warning: {} days, low stock threshold: {}",
                settings.expiry_warning_days, settings.low_stock_threshold
            );
        }
        Command::Report { date, out } => {
            let report = client.daily_outflow_report(date).await?;
            let path = out.unwrap_or_else(|| PathBuf::from(&report.file_name));
            tokio::fs::write(&path, &report.bytes)
                .await
                .with_context(|| format!("writing {}", path.display()))?;
            println!("Saved {} ({} bytes)", path.display(), report.bytes.len());
        }
        Command::Inbound { file } => {
            register_batch(&client, MovementDirection::Inbound, &file).await?;
        }
        Command::Outbound { file } => {
            register_batch(&client, MovementDirection::Outbound, &file).await?;
        }
    }

    Ok(())
}

/// Drive the movement dialog from a batch file
async fn register_batch(
    client: &ApiClient,
    direction: MovementDirection,
    file: &Path,
) -> anyhow::Result<()> {
    let contents = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("reading {}", file.display()))?;
    let batch: BatchFile =
        serde_json::from_str(&contents).with_context(|| format!("parsing {}", file.display()))?;

    let notifier: Arc<dyn Notifier> = Arc::new(TracingNotifier);
    let mut dialog = MovementDialog::new(direction, notifier);
    dialog.open();
    dialog.load_catalog(client).await?;

    dialog.set_note(batch.note)?;
    if let Some(sector) = batch.sector {
        dialog.select_sector(sector)?;
    }

    let today = movement::today();
    for (idx, line) in batch.lines.into_iter().enumerate() {
        dialog
            .select_item(line.item)
            .with_context(|| format!("line {}: item {}", idx + 1, line.item))?;
        dialog.set_quantity(line.quantity)?;
        dialog.set_lot_number(line.lot.unwrap_or_default())?;
        dialog.set_expiry_date(line.expiry)?;
        dialog
            .add_line(today)
            .with_context(|| format!("line {}", idx + 1))?;
    }

    let submitter = MovementSubmitter::new(Arc::new(client.clone()));
    let lines = dialog.lines().len();
    dialog
        .submit(&submitter, || println!("Registered {} line(s).", lines))
        .await?;
    Ok(())
}
