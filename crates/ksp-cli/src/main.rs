mod watch;

use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use ksp_client::{KspClient, PartialProduct, Product};
use ksp_core::Language;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "ksp-cli")]
#[command(about = "KSP storefront command line interface")]
struct Cli {
    /// Storefront language (`en` or `he`); overrides `KSP_LANGUAGE`.
    #[arg(long, global = true)]
    language: Option<Language>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show a product by its uin.
    Product {
        uin: i64,
        /// Print the parsed product as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Search the catalog.
    Search { query: String },
    /// Show per-branch availability of a product.
    Stock { uin: i64 },
    /// Poll a product and report branches that gain or lose stock.
    Watch {
        uin: i64,
        /// Seconds between polls; overrides `KSP_POLL_INTERVAL_SECS`.
        #[arg(long)]
        interval_secs: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut config = ksp_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    if let Some(language) = cli.language {
        config.language = language;
    }

    let client = KspClient::from_config(&config)?;

    match cli.command {
        Commands::Product { uin, json } => {
            let product = fetch_product(&client, uin).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&product)?);
            } else {
                print_product(&product);
            }
        }
        Commands::Search { query } => {
            let hits = client.search(&query).await?;
            if hits.is_empty() {
                println!("no results for \"{query}\"");
            }
            for hit in &hits {
                print_hit(hit);
            }
        }
        Commands::Stock { uin } => {
            let product = fetch_product(&client, uin).await?;
            let stock = product.stock().await?;
            let mut branches: Vec<_> = stock.into_iter().collect();
            branches.sort();
            for (branch, in_stock) in branches {
                let status = if in_stock { "in stock" } else { "out of stock" };
                println!("{branch}: {status}");
            }
        }
        Commands::Watch { uin, interval_secs } => {
            let interval = Duration::from_secs(
                interval_secs
                    .unwrap_or(config.poll_interval_secs)
                    .max(1),
            );
            let product = fetch_product(&client, uin).await?;
            watch::run(&product, interval).await;
        }
    }

    Ok(())
}

async fn fetch_product(client: &KspClient, uin: i64) -> anyhow::Result<Product> {
    client
        .get_product(uin)
        .await
        .with_context(|| format!("failed to fetch product {uin}"))?
        .with_context(|| format!("no product with uin {uin}"))
}

fn print_product(product: &Product) {
    println!("{} (uin {}, sku {})", product.name(), product.uin(), product.sku());
    println!("  price: {} (up to {} payments)", product.price(), product.max_payments);
    println!("  {}", product.description);
    if let Some(note) = &product.note {
        println!("  note: {}", note.description);
    }
    for delivery in &product.delivery_flags {
        let window = match (delivery.time.min, delivery.time.max) {
            (Some(min), Some(max)) => format!("{min}-{max} days"),
            (Some(days), None) | (None, Some(days)) => format!("{days} days"),
            (None, None) => "unspecified".to_owned(),
        };
        println!(
            "  delivery: {} to {} for {} ({window})",
            delivery.flag.name, delivery.place, delivery.price
        );
    }
    for tag in &product.tags {
        println!("  {}: {}", tag.name, tag.description);
    }
    if !product.variants.is_empty() {
        let variants: Vec<String> = product.variants.iter().map(i64::to_string).collect();
        println!("  variants: {}", variants.join(", "));
    }
}

fn print_hit(hit: &PartialProduct) {
    println!("{:>10}  {:>8}  {}", hit.uin, hit.price, hit.name);
}
