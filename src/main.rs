use commodex::config::Config;
use commodex::interfaces::dashboard::DashboardApp;
use tracing::info;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();

    let config = Config::from_env()?;
    info!("Launching commodity dashboard");

    let native_options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([960.0, 640.0])
            .with_title("Commodity Price Predictor"),
        ..Default::default()
    };

    eframe::run_native(
        "Commodity Price Predictor",
        native_options,
        Box::new(move |_cc| Ok(Box::new(DashboardApp::new(config)))),
    )
    .map_err(|e| anyhow::anyhow!("Eframe error: {}", e))?;

    Ok(())
}
