use clap::{Parser, Subcommand};
use medica_client::models::{OrderStatus, SortOrder};
use rust_decimal::Decimal;
use tracing_subscriber::{EnvFilter, fmt};

mod commands;
mod render;

/// Medica storefront from the terminal.
///
/// The session comes from `MEDICA_COOKIE`, the backend from `BACKEND_URL`.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Browse the shop
    Medicines {
        #[arg(long)]
        search: Option<String>,

        #[arg(long)]
        page: Option<u32>,

        #[arg(long)]
        limit: Option<u32>,

        #[arg(long)]
        sort_by: Option<String>,

        #[arg(long, value_parser = parse_sort_order)]
        sort_order: Option<SortOrder>,

        /// Only listings that are currently active
        #[arg(long)]
        active: bool,
    },

    Medicine {
        id: String,
    },

    Featured,

    Popular,

    /// List categories, or one category's medicines
    Categories {
        id: Option<String>,
    },

    #[command(subcommand)]
    Cart(CartCommand),

    /// Place a cash-on-delivery order for everything in the cart
    Checkout {
        #[arg(long)]
        address: String,
    },

    #[command(subcommand)]
    Orders(OrdersCommand),

    Review {
        medicine_id: String,

        #[arg(long)]
        rating: u8,

        #[arg(long)]
        comment: String,
    },

    Whoami,

    Profile {
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        phone: Option<String>,
    },

    #[command(subcommand)]
    Seller(SellerCommand),

    #[command(subcommand)]
    Admin(AdminCommand),
}

#[derive(Subcommand, Debug)]
enum CartCommand {
    Show,

    Add {
        medicine_id: String,

        #[arg(long, default_value_t = 1)]
        quantity: u32,
    },

    /// Set a line's quantity; zero or less removes it
    Update {
        id: String,

        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },

    Remove {
        id: String,
    },

    Clear,
}

#[derive(Subcommand, Debug)]
enum OrdersCommand {
    List,

    Show { id: String },

    Cancel { id: String },
}

#[derive(Subcommand, Debug)]
enum SellerCommand {
    Stats,

    Medicines {
        #[arg(long)]
        page: Option<u32>,

        #[arg(long)]
        limit: Option<u32>,
    },

    Orders {
        #[arg(long)]
        page: Option<u32>,

        #[arg(long)]
        limit: Option<u32>,
    },

    AddMedicine {
        #[arg(long)]
        name: String,

        #[arg(long)]
        description: String,

        #[arg(long)]
        price: Decimal,

        #[arg(long)]
        stocks: u32,

        #[arg(long)]
        manufacturer: String,

        #[arg(long)]
        category_id: String,

        #[arg(long)]
        thumbnail: Option<String>,
    },

    UpdateMedicine {
        id: String,

        #[arg(long)]
        name: String,

        #[arg(long)]
        description: String,

        #[arg(long)]
        price: Decimal,

        #[arg(long)]
        stocks: u32,

        #[arg(long)]
        manufacturer: String,

        #[arg(long)]
        featured: bool,

        #[arg(long)]
        inactive: bool,
    },

    DeleteMedicine {
        id: String,
    },

    UpdateStatus {
        order_id: String,

        /// Pending, Confirmed, Shipped, Delivered or Cancelled
        status: OrderStatus,
    },
}

#[derive(Subcommand, Debug)]
enum AdminCommand {
    Stats,

    Users,

    /// Flip a user between active and inactive
    SetStatus {
        user_id: String,
    },

    DeleteUser {
        user_id: String,
    },

    AddCategory {
        name: String,

        #[arg(long, default_value = "")]
        description: String,
    },
}

fn parse_sort_order(raw: &str) -> Result<SortOrder, String> {
    match raw.to_ascii_lowercase().as_str() {
        "asc" => Ok(SortOrder::Asc),
        "desc" => Ok(SortOrder::Desc),
        other => Err(format!("expected asc or desc, got {other}")),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    commands::run(args.command).await
}
