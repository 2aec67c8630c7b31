//! Lit Candle CLI - Terminal front end for the shopping cart.
//!
//! # Usage
//!
//! ```bash
//! # Add a candle (repeat to bump the quantity)
//! lc-cli add --id p1 --name "Candle A" --price 12.50 --image img/candle-a.jpg
//!
//! # Change quantities; zero or less removes the line
//! lc-cli set --id p1 --quantity 3
//! lc-cli inc --id p1
//! lc-cli dec --id p1
//!
//! # Inspect the cart
//! lc-cli show
//! lc-cli count
//! ```
//!
//! # Commands
//!
//! - `add`, `remove`, `set`, `inc`, `dec`, `clear` - Change the cart
//! - `show`, `count` - Render the cart or its item count
//! - `checkout` - Report why checkout is unavailable
//!
//! The cart lives in the file store configured by `LIT_CANDLE_DATA_DIR`
//! (see `lit_candle_cart::config`). Set `LIT_CANDLE_LOG_FORMAT=json` for
//! JSON log lines.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use lit_candle_cart::CartConfig;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod render;

use commands::cart::{self, CartCommandError};

#[derive(Parser)]
#[command(name = "lc-cli")]
#[command(author, version, about = "Lit Candle cart tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add one unit of a product
    Add {
        /// Product id
        #[arg(long)]
        id: String,

        /// Product name (ignored if the product is already in the cart)
        #[arg(long)]
        name: String,

        /// Unit price, e.g. 12.50 or $12.50
        #[arg(long)]
        price: String,

        /// Product image URI
        #[arg(long)]
        image: Option<String>,
    },
    /// Remove a product from the cart
    Remove {
        /// Product id
        #[arg(long)]
        id: String,
    },
    /// Set a product's quantity (zero or less removes it)
    Set {
        /// Product id
        #[arg(long)]
        id: String,

        /// New quantity
        #[arg(short, long, allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Increase a product's quantity by one
    Inc {
        /// Product id
        #[arg(long)]
        id: String,
    },
    /// Decrease a product's quantity by one (never below one)
    Dec {
        /// Product id
        #[arg(long)]
        id: String,
    },
    /// Empty the cart
    Clear,
    /// Show cart contents and totals
    Show,
    /// Show the number of items in the cart
    Count,
    /// Proceed to checkout
    Checkout,
}

fn init_tracing() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "lit_candle_cli=info,lit_candle_cart=info".into());

    let json = std::env::var("LIT_CANDLE_LOG_FORMAT").is_ok_and(|format| format == "json");

    let registry = tracing_subscriber::registry().with(env_filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().without_time().with_target(false))
            .init();
    }
}

fn main() {
    init_tracing();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = CartConfig::from_env()?;
    let mut session = cart::Session::open(&config)?;

    let outcome: Result<(), CartCommandError> = match cli.command {
        Commands::Add {
            id,
            name,
            price,
            image,
        } => cart::add(&mut session, &id, &name, &price, image),
        Commands::Remove { id } => cart::remove(&mut session, &id),
        Commands::Set { id, quantity } => cart::set_quantity(&mut session, &id, quantity),
        Commands::Inc { id } => cart::increment(&mut session, &id),
        Commands::Dec { id } => cart::decrement(&mut session, &id),
        Commands::Clear => {
            cart::clear(&mut session);
            Ok(())
        }
        Commands::Show => {
            cart::show(&session);
            Ok(())
        }
        Commands::Count => {
            cart::count(&session);
            Ok(())
        }
        Commands::Checkout => cart::checkout(&session),
    };

    session.report();
    outcome?;
    Ok(())
}
