use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use serde::Deserialize;

#[derive(Parser)]
#[command(name = "cambio-poller")]
#[command(about = "Polls the quote service and archives the bid", long_about = None)]
struct Cli {
    /// Base URL of the quote service.
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    /// Seconds between polls.
    #[arg(short, long, default_value_t = 10)]
    interval_secs: u64,

    /// File the bid line is written to.
    #[arg(short, long, default_value = "cotacao.txt")]
    output: PathBuf,

    /// Label prefixing the bid in the output file.
    #[arg(short, long, default_value = "Dólar")]
    label: String,
}

#[derive(Deserialize)]
struct BidPayload {
    bid: String,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let endpoint = format!("{}/cotacao", cli.url.trim_end_matches('/'));

    println!("Polling {} every {}s", endpoint, cli.interval_secs);

    loop {
        match fetch_bid(&client, &endpoint).await {
            Ok(bid) => {
                let line = format!("{}: {}\n", cli.label, bid);
                match std::fs::write(&cli.output, &line) {
                    Ok(()) => println!("{} <- {}", cli.output.display(), line.trim_end()),
                    Err(e) => eprintln!("Error: failed to write {}: {}", cli.output.display(), e),
                }
            }
            Err(e) => eprintln!("Error: failed to fetch bid: {}", e),
        }

        tokio::time::sleep(Duration::from_secs(cli.interval_secs)).await;
    }
}

async fn fetch_bid(
    client: &reqwest::Client,
    endpoint: &str,
) -> Result<String, Box<dyn std::error::Error>> {
    let res = client.get(endpoint).send().await?;
    let status = res.status();
    if !status.is_success() {
        let body = res.text().await.unwrap_or_default();
        return Err(format!("quote service returned {}: {}", status, body).into());
    }

    let payload: BidPayload = res.json().await?;
    Ok(payload.bid)
}
