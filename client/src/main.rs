use anyhow::Result;
use clap::{Parser, Subcommand};
use client::{ApiClient, ClientConfig, PriceQuery, DEFAULT_BASE_URL};
use serde_json::json;
use stay_core::dates::StayDates;
use stay_core::fetch::RetryPolicy;
use stay_core::guests::GuestCounter;
use stay_core::pricing::price_breakdown;
use std::time::Duration;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "client")]
#[command(about = "Fetch hotel details and room prices from the hotel API")]
struct Cli {
    /// Base URL of the hotel API
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,
    /// Request timeout seconds
    #[arg(long, default_value_t = 12)]
    timeout_secs: u64,
    /// Delay between attempts, in milliseconds
    #[arg(long, default_value_t = 1000)]
    delay_ms: u64,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Hotel details, retried on failure
    Details {
        #[arg(long)]
        id: String,
        #[arg(long, default_value_t = 3)]
        max_retries: u32,
    },
    /// Room prices, polled until the upstream finishes pricing
    Prices {
        #[arg(long)]
        hotel: String,
        #[arg(long)]
        destination: String,
        /// YYYY-MM-DD
        #[arg(long)]
        checkin: String,
        /// YYYY-MM-DD
        #[arg(long)]
        checkout: String,
        #[arg(long, default_value_t = 2)]
        adults: u32,
        #[arg(long, default_value_t = 0)]
        children: u32,
        #[arg(long, default_value_t = 1)]
        rooms: u32,
        #[arg(long, default_value = "SGD")]
        currency: String,
        #[arg(long, default_value_t = 5)]
        max_attempts: u32,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(std::io::stderr).init();
    let cli = Cli::parse();
    let delay = Duration::from_millis(cli.delay_ms);
    let mut config = ClientConfig { base_url: cli.base_url, timeout_secs: cli.timeout_secs, ..Default::default() };

    match cli.command {
        Command::Details { id, max_retries } => {
            config.details_policy = RetryPolicy::new(max_retries, delay);
            let api = ApiClient::new(&config)?;
            let hotel = api.hotel_details(&id).await?;
            let images = hotel.image_urls();
            let mut out = serde_json::to_value(&hotel)?;
            out["images"] = json!(images);
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Command::Prices { hotel, destination, checkin, checkout, adults, children, rooms, currency, max_attempts } => {
            let stay = StayDates::parse(&checkin, &checkout)?;
            stay.validate(time::OffsetDateTime::now_utc().date())?;
            let guests = GuestCounter::new(adults, children, rooms);
            config.prices_policy = RetryPolicy::new(max_attempts, delay);
            let api = ApiClient::new(&config)?;

            let query = PriceQuery::new(destination, &stay, &guests).with_currency(currency);
            let outcome = api.room_prices(&hotel, &query).await?;
            eprintln!("client: outcome={} nights={}", outcome.label(), stay.nights());
            for room in outcome.into_items() {
                let line = json!({
                    "key": room.key,
                    "room_name": room.display_name(),
                    "rooms_available": room.rooms_available,
                    "breakdown": price_breakdown(Some(&room), guests.rooms(), stay.nights()),
                });
                println!("{line}");
            }
        }
    }
    Ok(())
}
