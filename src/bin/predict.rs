use clap::Parser;
use commodex::application::pipeline;
use commodex::config::Config;
use commodex::infrastructure::yahoo::YahooClient;

#[derive(Parser)]
#[command(author, version, about = "Predict the next close for a commodity", long_about = None)]
struct Cli {
    /// Commodity ticker (Yahoo Finance futures code)
    #[arg(default_value = "GC=F")]
    symbol: String,

    /// Lookback window in days
    #[arg(short, long)]
    days: Option<i64>,

    /// Alert threshold as a fraction (0.015 = 1.5%)
    #[arg(short, long)]
    threshold: Option<f64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();

    let cli = Cli::parse();
    let mut config = Config::from_env()?;
    if let Some(days) = cli.days {
        anyhow::ensure!(days > 0, "--days must be positive");
        config.lookback_days = days;
    }
    if let Some(threshold) = cli.threshold {
        anyhow::ensure!(
            threshold.is_finite() && threshold >= 0.0,
            "--threshold must be a non-negative finite number"
        );
        config.alert_threshold = threshold;
    }

    let source = YahooClient::new(config.yahoo_base_url.clone());
    match pipeline::run(&source, &config, &cli.symbol).await? {
        Some(outcome) => {
            let change = outcome.decision.percent_change;
            println!("Current Price:        ${:.2}", outcome.current);
            println!("Predicted Next Close: ${:.2}", outcome.predicted);
            println!("Expected Change:      {:.2}%", change);

            match outcome.decision.direction {
                Some(direction) if outcome.decision.fired => {
                    println!("ALERT: {} signal, expected change {:.2}%", direction, change);
                }
                _ => {
                    println!("No alert. Market stable. Change only: {:.2}%", change);
                }
            }
        }
        None => println!("Data fetch failed or returned no data."),
    }

    Ok(())
}
