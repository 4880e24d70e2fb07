//! # Command Line
//!
//! `clap` definitions for the `artvault` binary and the dispatch from a
//! parsed command to the marketplace commands.
//!
//! ```text
//! artvault [--config PATH] [--db PATH] [--quiet] <COMMAND>
//!
//!   gallery    [--search TEXT] [--category CAT] [--price BUCKET]
//!   categories
//!   upload     --title T --price P --category C --image PATH_OR_URL ...
//!   register   --name N --email E --password P [--artist-name A] [--bio B]
//!   login      --email E --password P
//!   logout
//!   whoami
//!   profile
//!   artist     <ID>
//!   cart       show | add <ID> | set <ID> <QTY> | remove <ID>
//!   checkout   --card-number .. --expiry .. --cvv .. --cardholder .. ...
//!   config     [--save]
//! ```
//!
//! Every command prints its result as JSON on stdout.

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use serde_json::Value;
use std::path::PathBuf;

use crate::commands::account::{self, LoginForm, RegisterForm};
use crate::commands::upload::{self, UploadForm};
use crate::commands::{cart, checkout, config, gallery, profile};
use crate::error::ApiError;
use crate::payment::PaymentDetails;
use crate::App;

#[derive(Debug, Parser)]
#[command(name = "artvault", about = "ArtVault art marketplace", long_about = None)]
pub struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true, env = "ARTVAULT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Storage database file, overriding the config
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Send notifications to the log instead of the terminal
    #[arg(long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Browse unsold artworks
    Gallery(GalleryArgs),

    /// List the artwork categories
    Categories,

    /// List a new artwork for sale
    Upload(UploadArgs),

    /// Create an account and sign in
    Register(RegisterArgs),

    /// Sign in with an email address
    Login(LoginArgs),

    /// Sign out and empty the cart
    Logout,

    /// Show the signed-in account
    Whoami,

    /// Show your artist profile
    Profile,

    /// Show an artist's artworks
    Artist {
        /// Artist account id
        id: String,
    },

    /// Inspect or edit the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },

    /// Pay for the cart
    Checkout(CheckoutArgs),

    /// Print the active configuration
    Config {
        /// Also write it to the config file
        #[arg(long)]
        save: bool,
    },
}

#[derive(Debug, Default, Args)]
pub struct GalleryArgs {
    /// Matches title or artist name, case-insensitive
    #[arg(long, default_value = "")]
    pub search: String,

    /// painting, photography, digital, sculpture, drawing, mixed-media
    #[arg(long, default_value = "")]
    pub category: String,

    /// under-100, 100-500, 500-1000, over-1000
    #[arg(long, default_value = "")]
    pub price: String,
}

#[derive(Debug, Args)]
pub struct UploadArgs {
    #[arg(long)]
    pub title: String,

    #[arg(long, default_value = "")]
    pub description: String,

    /// Price in dollars, e.g. 450 or 450.00
    #[arg(long)]
    pub price: String,

    #[arg(long)]
    pub category: String,

    #[arg(long, default_value = "")]
    pub medium: String,

    #[arg(long, default_value = "")]
    pub dimensions: String,

    /// http(s) URL or local image file
    #[arg(long)]
    pub image: String,
}

impl From<UploadArgs> for UploadForm {
    fn from(args: UploadArgs) -> Self {
        UploadForm {
            title: args.title,
            description: args.description,
            price: args.price,
            category: args.category,
            medium: args.medium,
            dimensions: args.dimensions,
            image: args.image,
        }
    }
}

#[derive(Debug, Args)]
pub struct RegisterArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub password: String,

    /// Display name on listings; defaults to --name
    #[arg(long)]
    pub artist_name: Option<String>,

    #[arg(long)]
    pub bio: Option<String>,
}

impl From<RegisterArgs> for RegisterForm {
    fn from(args: RegisterArgs) -> Self {
        RegisterForm {
            name: args.name,
            email: args.email,
            password: args.password,
            artist_name: args.artist_name,
            bio: args.bio,
        }
    }
}

#[derive(Debug, Args)]
pub struct LoginArgs {
    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub password: String,
}

impl From<LoginArgs> for LoginForm {
    fn from(args: LoginArgs) -> Self {
        LoginForm {
            email: args.email,
            password: args.password,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum CartAction {
    /// Show items and totals
    Show,

    /// Add a listing (or bump its quantity)
    Add { id: String },

    /// Set a line's quantity
    Set {
        id: String,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },

    /// Remove a line
    Remove { id: String },
}

#[derive(Debug, Args)]
pub struct CheckoutArgs {
    #[arg(long)]
    pub card_number: String,

    /// MM/YY
    #[arg(long)]
    pub expiry: String,

    #[arg(long)]
    pub cvv: String,

    #[arg(long)]
    pub cardholder: String,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub address: String,

    #[arg(long)]
    pub city: String,

    #[arg(long)]
    pub zip: String,
}

impl From<CheckoutArgs> for PaymentDetails {
    fn from(args: CheckoutArgs) -> Self {
        PaymentDetails {
            card_number: args.card_number,
            expiry_date: args.expiry,
            cvv: args.cvv,
            cardholder_name: args.cardholder,
            email: args.email,
            address: args.address,
            city: args.city,
            zip_code: args.zip,
        }
    }
}

fn to_json<T: Serialize>(value: T) -> Result<Value, ApiError> {
    serde_json::to_value(value)
        .map_err(|e| ApiError::internal(format!("Failed to serialize response: {e}")))
}

/// Runs one command against `app` and returns its JSON result.
pub async fn execute(app: &App, command: Command) -> Result<Value, ApiError> {
    let App {
        store,
        session,
        config: cfg,
        config_path,
        notifier,
    } = app;
    let notifier = notifier.as_ref();

    match command {
        Command::Gallery(args) => to_json(gallery::list_gallery(
            session,
            &args.search,
            &args.category,
            &args.price,
        )),
        Command::Categories => to_json(gallery::list_categories()),
        Command::Artist { id } => to_json(gallery::view_artist(session, notifier, &id)?),
        Command::Upload(args) => {
            to_json(upload::upload_listing(store, session, notifier, args.into()).await?)
        }
        Command::Register(args) => {
            to_json(account::register(store, session, notifier, args.into()).await?)
        }
        Command::Login(args) => {
            to_json(account::login(store, session, notifier, args.into()).await?)
        }
        Command::Logout => {
            account::logout(store, session, notifier).await?;
            to_json(serde_json::json!({ "signedIn": false }))
        }
        Command::Whoami => {
            let account = account::current_account(session);
            to_json(serde_json::json!({
                "signedIn": account.is_some(),
                "account": account,
            }))
        }
        Command::Profile => to_json(profile::get_profile(session, cfg)?),
        Command::Cart { action } => match action {
            CartAction::Show => to_json(cart::get_cart(session, cfg)),
            CartAction::Add { id } => {
                to_json(cart::add_to_cart(store, session, cfg, notifier, &id).await?)
            }
            CartAction::Set { id, quantity } => {
                to_json(cart::update_cart_item(store, session, cfg, &id, quantity).await?)
            }
            CartAction::Remove { id } => {
                to_json(cart::remove_from_cart(store, session, cfg, notifier, &id).await?)
            }
        },
        Command::Checkout(args) => {
            to_json(checkout::checkout(store, session, cfg, notifier, args.into()).await?)
        }
        Command::Config { save: false } => to_json(config::get_config(cfg)),
        Command::Config { save: true } => {
            let path = config::save_config(cfg, config_path.as_deref())?;
            to_json(serde_json::json!({
                "saved": path,
                "config": config::get_config(cfg),
            }))
        }
    }
}
