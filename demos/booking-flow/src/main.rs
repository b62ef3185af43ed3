//! Booking flow binary
//!
//! Configure with `TICKETING_*` variables (a `.env` file is read if present):
//!
//! ```text
//! TICKETING_ENVIRONMENT=qa
//! TICKETING_USERNAME=me
//! TICKETING_PASSWORD=secret
//! ```
//!
//! Then `booking-flow <search> [quantity]`. `DEMO_COUPON` applies a coupon
//! and `DEMO_EMAIL` runs checkout for that shopper.

use booking_flow::{FlowOptions, run};
use ticketing_sdk::{Shopper, TicketingClient};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,ticketing_sdk=debug,booking_flow=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut args = std::env::args().skip(1);
    let search = args.next().unwrap_or_else(|| "wicked".to_string());
    let quantity = match args.next() {
        Some(value) => value.parse()?,
        None => 2,
    };

    let shopper = std::env::var("DEMO_EMAIL").ok().map(|email| Shopper {
        email,
        first_name: "Demo".to_string(),
        last_name: "Shopper".to_string(),
        ..Shopper::default()
    });
    let options = FlowOptions {
        search,
        quantity,
        today: chrono::Utc::now().date_naive(),
        coupon: std::env::var("DEMO_COUPON").ok(),
        shopper,
    };

    let client = TicketingClient::from_env()?;
    let summary = run(&client, &options).await?;

    println!("=== Booking flow ===\n");
    println!("Product:     {}", summary.product_id);
    println!("Performance: {}", summary.performance.datetime);
    println!("Basket:      {}", summary.basket.reference);
    match summary.basket.total_sale_price() {
        Some(total) => println!("Total:       {total}"),
        None => println!("Total:       n/a"),
    }
    if options.coupon.is_some() {
        println!("Coupon:      {}", if summary.coupon_applied { "applied" } else { "rejected" });
    }
    match &summary.payment {
        Some(payment) => println!("Payment:     {} ({})", payment.payment_id, payment.amount),
        None => println!("Payment:     skipped (set DEMO_EMAIL to check out)"),
    }

    Ok(())
}
