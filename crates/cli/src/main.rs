//! ToolQuote CLI - browse the catalog, manage the cart, submit quotes.
//!
//! # Usage
//!
//! ```bash
//! # List the catalog, optionally filtered
//! tq-cli catalog list --brand Makita --purpose Demolition
//!
//! # Watch the catalog refresh on its configured period
//! tq-cli catalog watch
//!
//! # Manage the persisted cart
//! tq-cli cart add <product-id> -q 2
//! tq-cli cart list
//! tq-cli cart set 0 5
//! tq-cli cart remove 0
//! tq-cli cart clear
//!
//! # Submit a quote for the carted products
//! tq-cli quote submit -n "Ana Torres" -p 5512345678 -t purchase --consent --send
//! ```
//!
//! # Commands
//!
//! - `catalog` - Fetch and filter the product feed
//! - `cart` - Inspect and mutate the persisted cart
//! - `quote` - Validate the form, generate the document, dispatch it

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "tq-cli")]
#[command(author, version, about = "ToolQuote CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the product catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Manage the persisted cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Submit a quote request
    Quote {
        #[command(subcommand)]
        action: QuoteAction,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// Fetch the catalog and print it, optionally filtered
    List {
        /// Only show this brand
        #[arg(long)]
        brand: Option<String>,

        /// Only show this purpose
        #[arg(long)]
        purpose: Option<String>,

        /// Only show this product type
        #[arg(long)]
        kind: Option<String>,
    },
    /// Re-fetch the catalog on the configured period and print grid changes
    Watch,
}

#[derive(Subcommand)]
enum CartAction {
    /// Add a product to the cart (merges with an existing entry)
    Add {
        /// Product id from the catalog
        product_id: String,

        /// Units to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Print the cart
    List,
    /// Set an entry's quantity
    Set {
        /// Entry index (see `cart list`)
        index: usize,

        /// New quantity; clamped to the entry's stock ceiling
        quantity: String,
    },
    /// Remove an entry
    Remove {
        /// Entry index (see `cart list`)
        index: usize,
    },
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
enum QuoteAction {
    /// Generate a quote for the carted products
    Submit {
        /// Customer name
        #[arg(short, long)]
        name: String,

        /// National phone number
        #[arg(short, long)]
        phone: String,

        /// International calling code
        #[arg(long, default_value = "52")]
        code: String,

        /// Customer email (optional)
        #[arg(short, long)]
        email: Option<String>,

        /// Quotation type (`purchase`, `rental`, `maintenance_service`)
        #[arg(short = 't', long = "type")]
        quotation_type: String,

        /// Service description (required for `maintenance_service`)
        #[arg(short, long)]
        description: Option<String>,

        /// Agree to the data-use terms
        #[arg(long)]
        consent: bool,

        /// Dispatch the quote to the configured recipients
        #[arg(long)]
        send: bool,

        /// Save the generated document to this path
        #[arg(short, long)]
        output: Option<std::path::PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Catalog { action } => match action {
            CatalogAction::List {
                brand,
                purpose,
                kind,
            } => commands::catalog::list(brand, purpose, kind).await?,
            CatalogAction::Watch => commands::catalog::watch().await?,
        },
        Commands::Cart { action } => match action {
            CartAction::Add {
                product_id,
                quantity,
            } => commands::cart::add(&product_id, quantity).await?,
            CartAction::List => commands::cart::list()?,
            CartAction::Set { index, quantity } => commands::cart::set(index, &quantity)?,
            CartAction::Remove { index } => commands::cart::remove(index)?,
            CartAction::Clear => commands::cart::clear()?,
        },
        Commands::Quote { action } => match action {
            QuoteAction::Submit {
                name,
                phone,
                code,
                email,
                quotation_type,
                description,
                consent,
                send,
                output,
            } => {
                commands::quote::submit(commands::quote::SubmitArgs {
                    name,
                    phone,
                    code,
                    email,
                    quotation_type,
                    description,
                    consent,
                    send,
                    output,
                })
                .await?;
            }
        },
    }
    Ok(())
}
