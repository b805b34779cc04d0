use clap::{Args, Parser, Subcommand};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;

#[derive(Parser, Debug)]
#[command(name = "emenu")]
#[command(about = "client cli used by customers and staff to interact with the ordering service", version, long_about = None
)]
struct Cli {
    #[arg(long, env = "EMENU_HOST", default_value = "http://localhost:8080", help = "Ordering service address")]
    host: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// show the menu
    Menu {
        #[arg(long, help = "One of en, zh, ko, ja.", default_value = "ja")]
        locale: String,
    },
    /// cart related ops
    #[command(arg_required_else_help = true)]
    Cart(CartArgs),
    /// submit the cart of a table
    #[command(arg_required_else_help = true)]
    Checkout {
        #[arg(short = 't', help = "Table id", value_parser = clap::value_parser!(i16).range(0..))]
        table: i16,
    },
    /// list receipts of a table
    #[command(arg_required_else_help = true)]
    Orders {
        #[arg(short = 't', help = "Table id", value_parser = clap::value_parser!(i16).range(0..))]
        table: i16,
    },
    /// check how a text fits on one receipt line
    #[command(arg_required_else_help = true)]
    Measure {
        text: String,
        #[arg(long, help = "Font size, 1 to 3.", default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=3))]
        font_size: u8,
    },
}

#[derive(Debug, Args)]
struct CartArgs {
    #[arg(short = 't', help = "Table id", value_parser = clap::value_parser!(i16).range(0..))]
    table: i16,
    #[command(subcommand)]
    command: CartCmds,
}

#[derive(Debug, Subcommand)]
enum CartCmds {
    List,
    #[command(arg_required_else_help = true)]
    Add {
        #[arg(long, help = "Id of the dish to add.", value_name = "DISH_ID")]
        dish: i64,
        #[arg(long, help = "Quantity to add, negative to take away.", default_value_t = 1, allow_negative_numbers = true)]
        quantity: i32,
    },
    #[command(arg_required_else_help = true)]
    Set {
        #[arg(long, help = "Id of the dish to change.", value_name = "DISH_ID")]
        dish: i64,
        #[arg(long, help = "New quantity, 0 removes the dish.")]
        quantity: i32,
    },
}

#[derive(Debug, Deserialize)]
struct CartLine {
    dish: Dish,
    quantity: i32,
}

#[derive(Debug, Deserialize)]
struct Dish {
    id: i64,
    unit_price: i64,
}

#[derive(Debug, Deserialize)]
struct CartResponse {
    lines: Vec<CartLine>,
    total: i64,
    count: i64,
}

#[derive(Debug, Deserialize)]
struct Receipt {
    id: String,
    lines: Vec<CartLine>,
    total: i64,
}

#[derive(Debug, Deserialize)]
struct OrdersResponse {
    orders: Vec<Receipt>,
}

#[derive(Debug, Deserialize)]
struct CheckoutResponse {
    order: Option<Receipt>,
}

#[derive(Debug, Deserialize)]
struct MeasureResponse {
    width: usize,
    capacity: usize,
    clamped: String,
    truncated: bool,
}

fn print_cart(cart: &CartResponse) {
    for line in &cart.lines {
        println!("  dish={} x{} @{}", line.dish.id, line.quantity, line.dish.unit_price);
    }
    println!("items={} total={}", cart.count, cart.total);
}

/// Print the body on success, or a message matching the status.
async fn report(res: Response) -> Result<Option<Response>, anyhow::Error> {
    match res.status() {
        StatusCode::OK => Ok(Some(res)),
        StatusCode::BAD_REQUEST => {
            println!("Bad request");
            Ok(None)
        }
        StatusCode::NOT_FOUND => {
            println!("Resource not found");
            Ok(None)
        }
        StatusCode::BAD_GATEWAY | StatusCode::GATEWAY_TIMEOUT => {
            println!("Backend unavailable: {}", res.text().await?);
            Ok(None)
        }
        unexpected => {
            println!("got unexpected status code, {}", unexpected);
            Ok(None)
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let args = Cli::parse();
    let host = args.host.trim_end_matches('/').to_string();
    let client = Client::new();

    match args.command {
        Commands::Menu { locale } => {
            let res = client.get(format!("{}/v1/menu", host)).query(&[("locale", locale)]).send().await?;
            if let Some(res) = report(res).await? {
                let menu: serde_json::Value = res.json().await?;
                println!("{}", serde_json::to_string_pretty(&menu)?);
            }
        }
        Commands::Cart(cart) => {
            let table = cart.table;
            let res = match cart.command {
                CartCmds::List => client.get(format!("{}/v1/table/{}/cart", host, table)).send().await?,
                CartCmds::Add { dish, quantity } => {
                    println!("adding dish={} x{} to table={}", dish, quantity, table);
                    client
                        .post(format!("{}/v1/table/{}/cart/items", host, table))
                        .json(&serde_json::json!({ "dish_id": dish, "quantity": quantity }))
                        .send()
                        .await?
                }
                CartCmds::Set { dish, quantity } => {
                    println!("setting dish={} to x{} on table={}", dish, quantity, table);
                    client
                        .patch(format!("{}/v1/table/{}/cart/items/{}", host, table, dish))
                        .json(&serde_json::json!({ "quantity": quantity }))
                        .send()
                        .await?
                }
            };
            if let Some(res) = report(res).await? {
                print_cart(&res.json::<CartResponse>().await?);
            }
        }
        Commands::Checkout { table } => {
            let res = client.post(format!("{}/v1/table/{}/checkout", host, table)).send().await?;
            if let Some(res) = report(res).await? {
                match res.json::<CheckoutResponse>().await?.order {
                    Some(order) => println!("ordered receipt={} lines={} total={}", order.id, order.lines.len(), order.total),
                    None => println!("cart of table {} is empty, nothing to order", table),
                }
            }
        }
        Commands::Orders { table } => {
            let res = client.get(format!("{}/v1/table/{}/orders", host, table)).send().await?;
            if let Some(res) = report(res).await? {
                for order in res.json::<OrdersResponse>().await?.orders {
                    println!("receipt={} lines={} total={}", order.id, order.lines.len(), order.total);
                }
            }
        }
        Commands::Measure { text, font_size } => {
            let res = client
                .post(format!("{}/v1/text/measure", host))
                .json(&serde_json::json!({ "text": text, "font_size": font_size }))
                .send()
                .await?;
            if let Some(res) = report(res).await? {
                let m = res.json::<MeasureResponse>().await?;
                println!("width={} capacity={}", m.width, m.capacity);
                if m.truncated {
                    println!("does not fit, printed as: {}", m.clamped);
                }
            }
        }
    };
    Ok(())
}
