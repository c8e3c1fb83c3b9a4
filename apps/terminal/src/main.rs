//! # Salepoint Terminal
//!
//! Interactive cashier console over the POS session core.
//!
//! ## Command Loop
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  scan <code|name>   resolve and add one unit                            │
//! │  add <id>           add one unit of a listed product                    │
//! │  cart               show the current ledger                             │
//! │  qty <id> <delta>   adjust a line (negative to decrease)                │
//! │  rm <id>            remove a line                                       │
//! │  method <m>         cash | card | mobile                                │
//! │  pay                submit the sale and print the receipt               │
//! │  categories [text]  list (or search) active categories                  │
//! │  clear              discard the ledger                                  │
//! │  quit               exit (the ledger is NOT persisted)                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;

use std::io::{self, BufRead, Write};

use tracing::info;
use tracing_subscriber::EnvFilter;

use salepoint_client::{ClientConfig, HttpClient, Session};
use salepoint_core::{Cart, Money, PaymentMethod};
use salepoint_pos::{Notice, PosSession, RestBackend};

use crate::config::TerminalConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Quiet by default; RUST_LOG overrides
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_target(false)
        .init();

    let config = TerminalConfig::load()?;
    info!(base_url = %config.base_url, "configuration loaded");

    let session_ctx = match &config.token {
        Some(token) => Session::with_token(token.clone()),
        None => Session::anonymous(),
    };
    let client_config = ClientConfig::new(&config.base_url)
        .with_session(session_ctx)
        .with_timeout_secs(config.http_timeout_secs);
    let http = HttpClient::new(&client_config)?;
    let backend = RestBackend::new(http);

    let mut pos = PosSession::with_catalog_page_size(backend, config.page_size);
    pos.start().await;
    println!(
        "Salepoint terminal ready - {} products, {} categories cached. Type 'help'.",
        pos.catalog().len(),
        pos.categories().len()
    );

    let stdin = io::stdin();
    loop {
        print!("pos> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
        let rest = rest.trim();

        match command {
            "scan" => match pos.scan(rest).await {
                Ok(notice) => println!("{}", notice),
                Err(err) => println!("error: {}", err),
            },
            "add" => match rest.parse::<i64>() {
                Ok(id) => println!("{}", pos.add_product(id)),
                Err(_) => println!("usage: add <id>"),
            },
            "cart" => print!("{}", render_cart(pos.cart())),
            "qty" => match parse_qty(rest) {
                Some((id, delta)) => println!("{}", pos.update_quantity(id, delta)),
                None => println!("usage: qty <id> <delta>"),
            },
            "rm" => match rest.parse::<i64>() {
                Ok(id) => println!("{}", pos.remove_line(id)),
                Err(_) => println!("usage: rm <id>"),
            },
            "method" => match parse_method(rest) {
                Some(method) => {
                    pos.set_payment_method(method);
                    println!("Payment method set to {}", method.as_str());
                }
                None => println!("usage: method <cash|card|mobile>"),
            },
            "pay" => match pos.checkout().await {
                Ok(Notice::SaleCompleted(receipt)) => println!("{}", receipt),
                Ok(notice) => println!("{}", notice),
                Err(err) => println!("error: {}", err),
            },
            "categories" => {
                let matches = if rest.is_empty() {
                    pos.categories().iter().collect()
                } else {
                    pos.find_categories(rest)
                };
                if matches.is_empty() {
                    println!("No categories");
                } else {
                    for category in matches {
                        println!("  [{}] {}", category.id, category.name);
                    }
                }
            }
            "clear" => println!("{}", pos.clear_cart()),
            "help" => print_help(),
            "quit" | "exit" => break,
            other => println!("Unknown command '{}'. Type 'help'.", other),
        }
    }

    info!("terminal session ended");
    Ok(())
}

fn parse_qty(rest: &str) -> Option<(i64, i64)> {
    let mut parts = rest.split_whitespace();
    let id = parts.next()?.parse().ok()?;
    let delta = parts.next()?.parse().ok()?;
    Some((id, delta))
}

fn parse_method(rest: &str) -> Option<PaymentMethod> {
    match rest.to_lowercase().as_str() {
        "cash" => Some(PaymentMethod::Cash),
        "card" => Some(PaymentMethod::Card),
        "mobile" => Some(PaymentMethod::Mobile),
        _ => None,
    }
}

fn render_cart(cart: &Cart) -> String {
    if cart.is_empty() {
        return "Cart is empty\n".to_string();
    }
    let mut out = String::new();
    out.push_str("  id    item                       qty    line total\n");
    for line in cart.lines() {
        out.push_str(&format!(
            "  {:<5} {:<26} {:<6} {:>10}\n",
            line.product_id,
            line.name,
            line.quantity,
            Money::from_cents(line.line_total_cents()).to_string()
        ));
    }
    out.push_str(&format!(
        "  TOTAL {:>44}\n",
        Money::from_cents(cart.total_cents()).to_string()
    ));
    out
}

fn print_help() {
    println!("  scan <code|name>   resolve and add one unit");
    println!("  add <id>           add one unit of a listed product");
    println!("  cart               show the current ledger");
    println!("  qty <id> <delta>   adjust a line (negative to decrease)");
    println!("  rm <id>            remove a line");
    println!("  method <m>         cash | card | mobile");
    println!("  pay                submit the sale and print the receipt");
    println!("  categories [text]  list (or search) active categories");
    println!("  clear              discard the ledger");
    println!("  quit               exit");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_qty() {
        assert_eq!(parse_qty("3 -2"), Some((3, -2)));
        assert_eq!(parse_qty("3"), None);
        assert_eq!(parse_qty("x y"), None);
    }

    #[test]
    fn test_parse_method() {
        assert_eq!(parse_method("CARD"), Some(PaymentMethod::Card));
        assert_eq!(parse_method("cheque"), None);
    }
}
