//! odk entry point.
//!
//! This binary is intentionally thin: it parses arguments, sets up
//! tracing, connects the pool, and renders whatever structured result
//! or error the core returns. All transactional semantics live in
//! odk-core.

use std::collections::BTreeMap;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use odk_core::{NewCustomer, NewOrder, NewProduct, NewSupplier};

#[derive(Parser)]
#[command(name = "odk")]
#[command(about = "orderdesk business-records CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Database commands
    Db {
        #[command(subcommand)]
        cmd: DbCmd,
    },

    /// Order workflow (create, pay, list)
    Order {
        #[command(subcommand)]
        cmd: OrderCmd,
    },

    /// Customer registration and deletion
    Customer {
        #[command(subcommand)]
        cmd: CustomerCmd,
    },

    /// Product registration and deletion
    Product {
        #[command(subcommand)]
        cmd: ProductCmd,
    },

    /// Supplier registration and deletion
    Supplier {
        #[command(subcommand)]
        cmd: SupplierCmd,
    },
}

#[derive(Subcommand)]
enum DbCmd {
    Status,

    /// Apply SQL migrations.
    Migrate,
}

#[derive(Subcommand)]
enum OrderCmd {
    /// Create a multi-line order atomically; prints the new order number.
    Create {
        /// Customer number
        #[arg(long)]
        customer: i64,

        /// Order date (YYYY-MM-DD)
        #[arg(long)]
        date: String,

        /// Line item as SKU=QTY (repeatable)
        #[arg(long = "line", required = true)]
        lines: Vec<String>,
    },

    /// Record a payment for an order (at most one per order).
    Pay {
        /// Order number
        #[arg(long)]
        order: i64,

        /// Paying customer number
        #[arg(long)]
        customer: i64,
    },

    /// List orders with paid status.
    List {
        #[arg(long, default_value_t = 50)]
        limit: i64,

        #[arg(long, default_value_t = 0)]
        offset: i64,

        /// Emit JSON instead of a table
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum CustomerCmd {
    Add {
        #[arg(long)]
        number: i64,

        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        address: Option<String>,
    },

    /// Delete the customer and every dependent row (orders, line items,
    /// payments, process rows) in one transaction.
    Delete {
        #[arg(long)]
        number: i64,
    },
}

#[derive(Subcommand)]
enum ProductCmd {
    Add {
        #[arg(long)]
        sku: String,

        #[arg(long)]
        name: String,

        /// Price in integer cents
        #[arg(long = "price-cents")]
        price_cents: i64,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        ean: Option<String>,
    },

    /// Delete the product, every order containing it (whole orders),
    /// and its supplier/delivery rows in one transaction.
    Delete {
        #[arg(long)]
        sku: String,
    },
}

#[derive(Subcommand)]
enum SupplierCmd {
    Add {
        #[arg(long)]
        tin: String,

        /// Product this supplier sells (must exist)
        #[arg(long)]
        sku: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        address: Option<String>,

        /// Contract date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
    },

    /// Delete the supplier and its delivery rows in one transaction.
    Delete {
        #[arg(long)]
        tin: String,
    },
}

/// Parse a `SKU=QTY` argument into a line-item pair.
fn parse_line(raw: &str) -> Result<(String, i32)> {
    let (sku, qty) = raw
        .split_once('=')
        .with_context(|| format!("line item '{raw}' is not SKU=QTY"))?;
    if sku.is_empty() {
        bail!("line item '{raw}' has an empty SKU");
    }
    let qty: i32 = qty
        .parse()
        .with_context(|| format!("line item '{raw}' has a non-integer quantity"))?;
    Ok((sku.to_string(), qty))
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env.local if present (dev convenience). Silent if the file
    // does not exist; production injects env vars directly.
    let _ = dotenvy::from_filename(".env.local");

    init_tracing();

    let cli = Cli::parse();
    let pool = odk_db::connect_from_env().await?;

    match cli.cmd {
        Commands::Db { cmd } => match cmd {
            DbCmd::Status => {
                let s = odk_db::status(&pool).await?;
                println!("db_ok={} has_orders_table={}", s.ok, s.has_orders_table);
            }
            DbCmd::Migrate => {
                odk_db::migrate(&pool).await?;
                println!("migrations applied");
            }
        },

        Commands::Order { cmd } => match cmd {
            OrderCmd::Create { customer, date, lines } => {
                let mut items: BTreeMap<String, i32> = BTreeMap::new();
                for raw in &lines {
                    let (sku, qty) = parse_line(raw)?;
                    // Repeating a SKU accumulates its quantity.
                    *items.entry(sku).or_insert(0) += qty;
                }
                let order = NewOrder { cust_no: customer, date, lines: items };
                let order_no = odk_core::create_order(&pool, &order).await?;
                println!("order_no={order_no}");
            }
            OrderCmd::Pay { order, customer } => {
                odk_core::record_payment(&pool, order, customer).await?;
                println!("payment recorded for order {order}");
            }
            OrderCmd::List { limit, offset, json } => {
                let orders = odk_core::list_orders(&pool, limit, offset).await?;
                if json {
                    println!("{}", serde_json::to_string_pretty(&orders)?);
                } else {
                    for o in orders {
                        println!(
                            "order_no={} cust_no={} date={} paid={}",
                            o.order_no, o.cust_no, o.date, o.is_paid
                        );
                    }
                }
            }
        },

        Commands::Customer { cmd } => match cmd {
            CustomerCmd::Add { number, name, email, phone, address } => {
                let c = NewCustomer { cust_no: number, name, email, phone, address };
                odk_core::register_customer(&pool, &c).await?;
                println!("customer {number} registered");
            }
            CustomerCmd::Delete { number } => {
                odk_core::delete_customer(&pool, number).await?;
                println!("customer {number} deleted with all dependent rows");
            }
        },

        Commands::Product { cmd } => match cmd {
            ProductCmd::Add { sku, name, price_cents, description, ean } => {
                let p = NewProduct { sku: sku.clone(), name, description, price_cents, ean };
                odk_core::register_product(&pool, &p).await?;
                println!("product {sku} registered");
            }
            ProductCmd::Delete { sku } => {
                odk_core::delete_product(&pool, &sku).await?;
                println!("product {sku} deleted with all orders containing it");
            }
        },

        Commands::Supplier { cmd } => match cmd {
            SupplierCmd::Add { tin, sku, name, address, date } => {
                let s = NewSupplier { tin: tin.clone(), name, address, sku, date };
                odk_core::register_supplier(&pool, &s).await?;
                println!("supplier {tin} registered");
            }
            SupplierCmd::Delete { tin } => {
                odk_core::delete_supplier(&pool, &tin).await?;
                println!("supplier {tin} deleted with its deliveries");
            }
        },
    }

    Ok(())
}
