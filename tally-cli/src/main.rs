use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};
use tally_core::{
    Account, Direction, TOWNS, Town, canonical_county, detect_transaction_location, extract_base_location,
    extract_county_from_address, find_town, format_town_display, towns_in_county,
};
use tally_finance::{
    Invoice, MerchantRulesClassifier, RecategoriseMode, Recategoriser, classify_trip_expense,
    detect_trips, get_account_suggestion,
};
use tally_ingest::{extract_merchant_name, extract_vendor_name, read_booked_csv, read_transactions_csv};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod state;
mod store;

use store::JsonFileStore;

#[derive(Parser, Debug)]
#[command(
    name = "tally",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("TALLY_BUILD_SHA"), ")"),
    about = "Irish sole-trader bookkeeping: merchant matching, trips and recategorisation"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show how a single bank description is interpreted
    Classify {
        description: String,

        /// Treat the line as money in
        #[arg(long)]
        income: bool,
    },

    /// Resolve an address to a base town and county
    Locate {
        address: String,

        /// Second address to try when the first has no known town
        #[arg(long)]
        fallback: Option<String>,
    },

    /// List the town reference table
    Towns {
        #[arg(long)]
        county: Option<String>,
    },

    /// Detect business trips in a statement CSV
    Trips {
        #[arg(long)]
        csv: PathBuf,

        /// Home address (defaults to the business address in config)
        #[arg(long)]
        base: Option<String>,

        /// Print trips as JSON
        #[arg(long)]
        json: bool,
    },

    /// Reclassify a statement and write the resulting updates
    Recategorise {
        #[arg(long)]
        csv: PathBuf,

        /// Chart of accounts as a JSON array of {id, name, account_type}
        #[arg(long)]
        accounts: PathBuf,

        #[arg(long, value_enum, default_value_t = ModeArg::Uncategorised)]
        mode: ModeArg,

        /// Invoices as a JSON array of {id, date, job_start?, job_end?}
        #[arg(long)]
        invoices: Option<PathBuf>,

        /// Where to write updates (default: updates.json)
        #[arg(long, default_value = "updates.json")]
        out: PathBuf,
    },

    /// Manage ~/.tally/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config if none exists
    Init,
    /// Print the effective config
    Show,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum ModeArg {
    Uncategorised,
    Miscellaneous,
    All,
}

impl From<ModeArg> for RecategoriseMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Uncategorised => RecategoriseMode::UncategorisedOnly,
            ModeArg::Miscellaneous => RecategoriseMode::ReclassifyMiscellaneous,
            ModeArg::All => RecategoriseMode::ReclassifyAll,
        }
    }
}

fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config()?;
    init_tracing(&cfg.log_level);

    match cli.command {
        Command::Classify {
            description,
            income,
        } => classify(&description, income),

        Command::Locate { address, fallback } => locate(&address, fallback.as_deref()),

        Command::Towns { county } => list_towns(county.as_deref())?,

        Command::Trips { csv, base, json } => {
            let base = base_town(base.as_deref(), &cfg);
            let txns = read_transactions_csv(&csv)?;
            let trips = detect_trips(&txns, base);

            if json {
                println!("{}", serde_json::to_string_pretty(&trips)?);
                return Ok(());
            }

            println!("Parsed {} transactions from {}", txns.len(), csv.display());
            println!("Base: {}", base.unwrap_or("(none)"));
            println!("Detected {} trips\n", trips.len());
            for trip in &trips {
                println!(
                    "{} | {} to {} | {} txns | total=€{:.2}",
                    trip.location,
                    trip.start_date,
                    trip.end_date,
                    trip.transactions.len(),
                    trip.total_spend
                );
                for t in &trip.transactions {
                    println!(
                        "    {} {:<40} {:>10.2}  [{}]",
                        t.transaction.date,
                        t.transaction.description,
                        t.transaction.abs_amount(),
                        t.expense_type
                    );
                }
            }
        }

        Command::Recategorise {
            csv,
            accounts,
            mode,
            invoices,
            out,
        } => {
            let txns = read_booked_csv(&csv)?;
            let accounts: Vec<Account> = read_json(&accounts)?;
            let invoices: Vec<Invoice> = match invoices {
                Some(p) => read_json(&p)?,
                None => Vec::new(),
            };

            let mut options = cfg.recategorise.options(mode.into());
            if let Some(base) = base_town(None, &cfg) {
                options = options.with_base_location(base);
            }

            info!(transactions = txns.len(), accounts = accounts.len(), ?options, "recategorising");
            let recategoriser = Recategoriser::new(
                MerchantRulesClassifier,
                JsonFileStore::new(out.clone()),
                accounts,
                options,
            );
            let report = recategoriser.run(&txns, &invoices).await;
            let written = recategoriser.store().save()?;

            println!("{}", serde_json::to_string_pretty(&report)?);
            eprintln!("Wrote {} updates to {}", written, out.display());
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                println!("# {}", config::config_path()?.display());
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&s).with_context(|| format!("parse {}", path.display()))
}

/// Home town from an explicit address, else the configured business addresses
fn base_town(address: Option<&str>, cfg: &config::Config) -> Option<&'static str> {
    let base = match address {
        Some(a) => extract_base_location(Some(a), None),
        None => extract_base_location(cfg.business.primary(), cfg.business.fallback()),
    };
    if base.is_none() && (address.is_some() || cfg.business.primary().is_some()) {
        warn!("no known town in the business address; every located expense is a trip candidate");
    }
    base
}

fn classify(description: &str, income: bool) {
    let direction = if income { Direction::Income } else { Direction::Expense };
    let vendor = extract_vendor_name(description);
    let matched = extract_merchant_name(&vendor);

    println!("Vendor:   {}", vendor);
    println!("Merchant: {}", matched.clean_name);
    match matched.matched_merchant {
        Some(m) => {
            println!("Category: {} ({}, VAT {})", m.category, m.business_type, m.vat_rate);
            match get_account_suggestion(m.category, direction, Some(m.vat_rate)) {
                Some(s) => println!(
                    "Account:  {} [{}] confidence={}",
                    s.account_name, s.account_type, s.confidence
                ),
                None => println!("Account:  (no mapping for {})", direction.as_str()),
            }
        }
        None => println!("Category: (unknown merchant)"),
    }
    println!("Location: {}", detect_transaction_location(description).unwrap_or("(none)"));
    println!("Trip expense type: {}", classify_trip_expense(description));
}

fn locate(address: &str, fallback: Option<&str>) {
    match extract_base_location(Some(address), fallback) {
        Some(name) => {
            let display = find_town(name)
                .map(format_town_display)
                .unwrap_or_else(|| name.to_string());
            println!("Base:   {}", display);
        }
        None => println!("Base:   (unknown)"),
    }
    println!(
        "County: {}",
        extract_county_from_address(address).unwrap_or("(unknown)")
    );
}

fn list_towns(county: Option<&str>) -> Result<()> {
    let towns: Vec<&Town> = match county {
        Some(c) => {
            let Some(county) = canonical_county(c) else {
                bail!("unknown county: {}", c);
            };
            towns_in_county(county)
        }
        None => TOWNS.iter().collect(),
    };

    for town in &towns {
        println!("{:<28} {:>4} km", format_town_display(town), town.distance_from_dublin);
    }
    println!("\n{} towns", towns.len());
    Ok(())
}
