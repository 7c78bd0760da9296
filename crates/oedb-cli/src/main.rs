use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "oedb")]
#[command(about = "OE part number lookup and inventory database")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Look up an OE number and print what the catalog knows about it.
    Lookup {
        query: String,
        /// Print the extraction as JSON instead of text.
        #[arg(long)]
        json: bool,
    },
    /// Look up an OE number and save it with classification and stock info.
    Add {
        query: String,
        /// Vehicle make, e.g. "BMW".
        #[arg(long)]
        brand: String,
        #[arg(long)]
        category: String,
        #[arg(long)]
        sub_category: String,
        /// Part number to mark as the default alternative; falls back to
        /// the first listed product.
        #[arg(long)]
        default_pn: Option<String>,
        #[arg(long, default_value_t = 0)]
        qty: u32,
        #[arg(long, default_value_t = 2)]
        min_stock: u32,
        #[arg(long, default_value_t = 10)]
        max_stock: u32,
        #[arg(long, default_value = "0")]
        unit_price_myr: Decimal,
        #[arg(long, default_value = "")]
        location: String,
        #[arg(long, default_value = "")]
        supplier: String,
    },
    /// Print stock levels, flagging parts under their minimum.
    Inventory {
        /// Only show parts that need reordering.
        #[arg(long)]
        reorder_only: bool,
    },
    /// Write table snapshots to a directory.
    Export {
        #[arg(long, default_value = "./export")]
        out: PathBuf,
        #[arg(long, value_enum, default_value_t = ExportFormat::Csv)]
        format: ExportFormat,
    },
    /// Delete every saved row. Requires --yes.
    Clear {
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ExportFormat {
    Csv,
    Json,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = oedb_core::config::load_app_config()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone())),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Lookup { query, json } => commands::run_lookup(&config, &query, json).await,
        Commands::Add {
            query,
            brand,
            category,
            sub_category,
            default_pn,
            qty,
            min_stock,
            max_stock,
            unit_price_myr,
            location,
            supplier,
        } => {
            let classification = oedb_core::Classification {
                brand,
                category,
                sub_category,
                location,
                quantity: qty,
                min_stock,
                max_stock,
                unit_price_myr,
                supplier,
            };
            commands::run_add(&config, &query, classification, default_pn.as_deref()).await
        }
        Commands::Inventory { reorder_only } => commands::run_inventory(&config, reorder_only),
        Commands::Export { out, format } => commands::run_export(&config, &out, format),
        Commands::Clear { yes } => commands::run_clear(&config, yes),
    }
}
