//! Murti CLI - store administration from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Sign in (password from MURTI_ADMIN_PASSWORD or stdin)
//! murti login -e admin@example.com
//!
//! # Second page of products matching "idol"
//! murti products list --page 2 --limit 20 --search idol
//!
//! # Move an order along
//! murti orders status 65f1c0ffee shipped --note "Dispatched via BlueDart"
//!
//! # Monthly sales for a quarter
//! murti reports sales --from 2024-04-01 --to 2024-06-30 --group-by month
//! ```
//!
//! Results are printed as JSON. The session token is kept in
//! `MURTI_TOKEN_FILE` (default `<config dir>/murti/session.json`).
//!
//! # Environment Variables
//!
//! - `MURTI_API_URL` - Store API base URL
//! - `MURTI_API_TIMEOUT_SECS` - Per-request timeout
//! - `MURTI_TOKEN_FILE` - Session file location
//! - `MURTI_LOG_JSON` - Emit logs as JSON lines
//! - `RUST_LOG` - Log filter (default `murti_admin=info,murti=info`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use murti_admin::config::token_file_from_env;
use murti_admin::types::{GroupBy, StatusFilter};
use murti_admin::{AdminApi, ClientConfig, FileTokenStore};
use murti_core::{CategoryId, OrderId, OrderStatus, PaymentStatus, ProductId, UserId, UserRole};
use rust_decimal::Decimal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod error;
mod output;

use error::CliError;

#[derive(Parser)]
#[command(name = "murti")]
#[command(author, version, about = "Murti store admin tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and keep the session token
    Login {
        /// Admin email address
        #[arg(short, long)]
        email: String,

        /// Password; read from stdin when not given
        #[arg(long, env = "MURTI_ADMIN_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Forget the session token
    Logout,
    /// Show the signed-in profile
    Whoami,
    /// Manage products
    Products {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Manage categories
    Categories {
        #[command(subcommand)]
        action: CategoryAction,
    },
    /// Manage orders
    Orders {
        #[command(subcommand)]
        action: OrderAction,
    },
    /// Manage customer and staff accounts
    Users {
        #[command(subcommand)]
        action: UserAction,
    },
    /// Manage coupons
    Coupons {
        #[command(subcommand)]
        action: CouponAction,
    },
    /// Analytics
    Reports {
        #[command(subcommand)]
        action: ReportAction,
    },
    /// Business settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(Args)]
struct Paging {
    /// Page number (1-based)
    #[arg(long)]
    page: Option<u32>,

    /// Items per page
    #[arg(long)]
    limit: Option<u32>,

    /// Free-text search
    #[arg(long)]
    search: Option<String>,
}

#[derive(Subcommand)]
enum ProductAction {
    /// List products
    List {
        #[command(flatten)]
        paging: Paging,

        /// Only products in this category
        #[arg(long)]
        category: Option<CategoryId>,

        /// `active` or `inactive`
        #[arg(long)]
        status: Option<StatusFilter>,

        /// Only featured (true) or non-featured (false) products
        #[arg(long)]
        featured: Option<bool>,
    },
    /// Show one product
    Get { id: ProductId },
    /// Toggle active status, or the featured flag with --featured
    Toggle {
        id: ProductId,

        #[arg(long)]
        featured: bool,
    },
    /// Change the stock level
    Stock {
        id: ProductId,

        /// Replace stock with this quantity
        #[arg(long, conflicts_with_all = ["add", "subtract"])]
        set: Option<u32>,

        /// Add this quantity
        #[arg(long, conflicts_with = "subtract")]
        add: Option<u32>,

        /// Remove this quantity
        #[arg(long)]
        subtract: Option<u32>,

        /// Reason recorded in the movement log
        #[arg(long)]
        reason: Option<String>,
    },
}

#[derive(Subcommand)]
enum CategoryAction {
    /// List categories
    List {
        #[command(flatten)]
        paging: Paging,
    },
}

#[derive(Subcommand)]
enum OrderAction {
    /// List orders
    List {
        #[command(flatten)]
        paging: Paging,

        /// Order status, e.g. `pending` or `out_for_delivery`
        #[arg(long)]
        status: Option<OrderStatus>,

        /// Payment status, e.g. `paid`
        #[arg(long)]
        payment_status: Option<PaymentStatus>,
    },
    /// Show one order
    Get { id: OrderId },
    /// Move an order to a new status
    Status {
        id: OrderId,
        status: OrderStatus,

        /// Note recorded in the status history
        #[arg(long)]
        note: Option<String>,
    },
    /// Assign a delivery partner or a courier
    AssignDelivery {
        id: OrderId,

        /// In-house delivery partner's user ID
        #[arg(long, conflicts_with_all = ["courier", "tracking"])]
        partner: Option<UserId>,

        /// Courier name
        #[arg(long, requires = "tracking")]
        courier: Option<String>,

        /// Courier tracking number
        #[arg(long, requires = "courier")]
        tracking: Option<String>,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// List accounts
    List {
        #[command(flatten)]
        paging: Paging,

        /// `user`, `admin` or `delivery_partner`
        #[arg(long)]
        role: Option<UserRole>,
    },
    /// Change an account's role
    Role { id: UserId, role: UserRole },
}

#[derive(Subcommand)]
enum CouponAction {
    /// List coupons
    List {
        #[command(flatten)]
        paging: Paging,
    },
    /// Check a coupon code against an order amount
    Validate { code: String, amount: Decimal },
}

#[derive(Subcommand)]
enum ReportAction {
    /// Sales totals and time series
    Sales {
        /// First day, `YYYY-MM-DD`
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Last day, `YYYY-MM-DD`
        #[arg(long)]
        to: Option<NaiveDate>,

        /// `day`, `week` or `month`
        #[arg(long)]
        group_by: Option<GroupBy>,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Print all business settings
    Show,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "murti_admin=info,murti=info".into());

    // Logs go to stderr so stdout stays parseable JSON
    let json = std::env::var_os("MURTI_LOG_JSON").is_some();
    let json_layer = json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer = (!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

fn connect() -> Result<AdminApi, CliError> {
    let config = ClientConfig::from_env()?;
    let tokens = FileTokenStore::new(token_file_from_env()?);
    tracing::debug!(base_url = %config.base_url, session = %tokens.path().display(), "Connecting");
    Ok(AdminApi::connect(&config, Arc::new(tokens))?)
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let api = connect()?;

    match cli.command {
        Commands::Login { email, password } => {
            commands::session::login(&api, &email, password).await
        }
        Commands::Logout => commands::session::logout(&api),
        Commands::Whoami => commands::session::whoami(&api).await,
        Commands::Products { action } => match action {
            ProductAction::List {
                paging,
                category,
                status,
                featured,
            } => {
                let query = murti_admin::types::ProductQuery {
                    page: paging.page,
                    limit: paging.limit,
                    search: paging.search,
                    category,
                    status,
                    featured,
                    sort: None,
                };
                commands::catalog::list_products(&api, &query).await
            }
            ProductAction::Get { id } => commands::catalog::get_product(&api, &id).await,
            ProductAction::Toggle { id, featured } => {
                commands::catalog::toggle_product(&api, &id, featured).await
            }
            ProductAction::Stock {
                id,
                set,
                add,
                subtract,
                reason,
            } => {
                let update = commands::catalog::stock_update(set, add, subtract, reason)?;
                commands::catalog::update_stock(&api, &id, &update).await
            }
        },
        Commands::Categories { action } => match action {
            CategoryAction::List { paging } => {
                let query = murti_admin::types::CategoryQuery {
                    page: paging.page,
                    limit: paging.limit,
                    search: paging.search,
                    status: None,
                };
                commands::catalog::list_categories(&api, &query).await
            }
        },
        Commands::Orders { action } => match action {
            OrderAction::List {
                paging,
                status,
                payment_status,
            } => {
                let query = murti_admin::types::OrderQuery {
                    page: paging.page,
                    limit: paging.limit,
                    search: paging.search,
                    status,
                    payment_status,
                    ..Default::default()
                };
                commands::orders::list(&api, &query).await
            }
            OrderAction::Get { id } => commands::orders::get(&api, &id).await,
            OrderAction::Status { id, status, note } => {
                commands::orders::update_status(&api, &id, status, note.as_deref()).await
            }
            OrderAction::AssignDelivery {
                id,
                partner,
                courier,
                tracking,
            } => {
                let assignment = commands::orders::delivery_assignment(partner, courier, tracking)?;
                commands::orders::assign_delivery(&api, &id, &assignment).await
            }
        },
        Commands::Users { action } => match action {
            UserAction::List { paging, role } => {
                let query = murti_admin::types::UserQuery {
                    page: paging.page,
                    limit: paging.limit,
                    search: paging.search,
                    role,
                    status: None,
                };
                commands::people::list_users(&api, &query).await
            }
            UserAction::Role { id, role } => commands::people::update_role(&api, &id, role).await,
        },
        Commands::Coupons { action } => match action {
            CouponAction::List { paging } => {
                let query = murti_admin::types::CouponQuery {
                    page: paging.page,
                    limit: paging.limit,
                    search: paging.search,
                    status: None,
                };
                commands::people::list_coupons(&api, &query).await
            }
            CouponAction::Validate { code, amount } => {
                commands::people::validate_coupon(&api, &code, amount).await
            }
        },
        Commands::Reports { action } => match action {
            ReportAction::Sales { from, to, group_by } => {
                let range = murti_admin::types::ReportRange {
                    start_date: from,
                    end_date: to,
                    group_by,
                };
                commands::reports::sales(&api, &range).await
            }
        },
        Commands::Settings { action } => match action {
            SettingsAction::Show => commands::reports::show_settings(&api).await,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_product_listing() {
        let cli = Cli::try_parse_from([
            "murti", "products", "list", "--page", "2", "--limit", "20", "--search", "idol",
        ]);
        assert!(matches!(
            cli.map(|c| c.command),
            Ok(Commands::Products {
                action: ProductAction::List { .. }
            })
        ));
    }

    #[test]
    fn test_rejects_unknown_order_status() {
        assert!(Cli::try_parse_from(["murti", "orders", "status", "o1", "teleported"]).is_err());
    }

    #[test]
    fn test_courier_requires_tracking() {
        assert!(
            Cli::try_parse_from(["murti", "orders", "assign-delivery", "o1", "--courier", "DTDC"])
                .is_err()
        );
    }
}
