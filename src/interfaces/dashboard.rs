//! Interactive commodity dashboard.
//!
//! A button grid over the commodity catalog; picking one runs the full
//! pipeline for a trailing window ending today and shows three metrics
//! plus an alert banner. The pipeline runs on a worker thread and hands
//! its result back over a channel so the UI thread never blocks on
//! network I/O.

use crate::application::pipeline::{self, PipelineOutcome};
use crate::config::{self, Config};
use crate::infrastructure::yahoo::YahooClient;
use std::sync::mpsc;
use std::time::Duration;
use tracing::error;

type RunResult = Result<Option<PipelineOutcome>, String>;

enum RunStatus {
    Running,
    /// `None` is the soft "no data" outcome.
    Ready(Option<PipelineOutcome>),
    Failed(String),
}

/// Per-session UI state: the selected commodity persists across frames
/// and interactions.
struct Selection {
    name: String,
    ticker: String,
}

pub struct DashboardApp {
    config: Config,
    selection: Selection,
    status: RunStatus,
    pending: Option<mpsc::Receiver<RunResult>>,
}

impl DashboardApp {
    pub fn new(config: Config) -> Self {
        let (name, ticker) = config::DEFAULT_COMMODITY;
        let mut app = Self {
            config,
            selection: Selection {
                name: name.to_string(),
                ticker: ticker.to_string(),
            },
            status: RunStatus::Running,
            pending: None,
        };
        app.start_run();
        app
    }

    fn start_run(&mut self) {
        let (tx, rx) = mpsc::channel();
        self.pending = Some(rx);
        self.status = RunStatus::Running;

        let config = self.config.clone();
        let ticker = self.selection.ticker.clone();
        std::thread::spawn(move || {
            let result = run_blocking(config, &ticker);
            if tx.send(result).is_err() {
                error!("dashboard closed before pipeline result arrived");
            }
        });
    }

    fn poll_worker(&mut self, ctx: &egui::Context) {
        let received = match &self.pending {
            Some(rx) => rx.try_recv(),
            None => return,
        };
        match received {
            Ok(Ok(outcome)) => {
                self.status = RunStatus::Ready(outcome);
                self.pending = None;
            }
            Ok(Err(message)) => {
                self.status = RunStatus::Failed(message);
                self.pending = None;
            }
            Err(mpsc::TryRecvError::Empty) => {
                ctx.request_repaint_after(Duration::from_millis(200));
            }
            Err(mpsc::TryRecvError::Disconnected) => {
                self.status = RunStatus::Failed("pipeline worker exited".to_string());
                self.pending = None;
            }
        }
    }

    fn select(&mut self, name: &str, ticker: &str) {
        self.selection = Selection {
            name: name.to_string(),
            ticker: ticker.to_string(),
        };
        self.start_run();
    }
}

fn run_blocking(config: Config, ticker: &str) -> RunResult {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| e.to_string())?;

    rt.block_on(async {
        let source = YahooClient::new(config.yahoo_base_url.clone());
        pipeline::run(&source, &config, ticker)
            .await
            .map_err(|e| e.to_string())
    })
}

const BUTTONS_PER_ROW: usize = 4;

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_worker(ctx);

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.heading("Commodity Price Predictor");
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.label("Select a commodity");
            ui.add_space(4.0);

            let busy = self.pending.is_some();
            let mut clicked: Option<(&str, &str)> = None;
            for chunk in config::commodity_catalog().chunks(BUTTONS_PER_ROW) {
                ui.horizontal(|ui| {
                    for (name, ticker) in chunk.iter().copied() {
                        let button = ui.add_enabled(!busy, egui::Button::new(name));
                        if button.clicked() {
                            clicked = Some((name, ticker));
                        }
                    }
                });
            }
            if let Some((name, ticker)) = clicked {
                self.select(name, ticker);
            }

            ui.separator();
            ui.label(
                egui::RichText::new(format!(
                    "Currently viewing: {} ({})",
                    self.selection.name, self.selection.ticker
                ))
                .strong(),
            );
            ui.add_space(8.0);

            match &self.status {
                RunStatus::Running => {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label("Fetching data and training model...");
                    });
                }
                RunStatus::Ready(Some(outcome)) => {
                    ui.columns(3, |cols| {
                        metric(&mut cols[0], "Current Price", format!("${:.2}", outcome.current));
                        metric(
                            &mut cols[1],
                            "Predicted Close",
                            format!("${:.2}", outcome.predicted),
                        );
                        metric(
                            &mut cols[2],
                            "Expected Change",
                            format!("{:.2}%", outcome.decision.percent_change),
                        );
                    });
                    ui.add_space(8.0);

                    if let (true, Some(direction)) =
                        (outcome.decision.fired, outcome.decision.direction)
                    {
                        ui.label(
                            egui::RichText::new(format!(
                                "{} SIGNAL TRIGGERED (expected change {:.2}%)",
                                direction, outcome.decision.percent_change
                            ))
                            .color(egui::Color32::from_rgb(255, 180, 0))
                            .strong(),
                        );
                    } else {
                        ui.label(
                            egui::RichText::new("No actionable signal right now.")
                                .color(egui::Color32::from_rgb(120, 200, 120)),
                        );
                    }
                }
                RunStatus::Ready(None) => {
                    ui.label(
                        egui::RichText::new(
                            "No data found or failed to load. Try another commodity.",
                        )
                        .color(egui::Color32::from_rgb(255, 200, 100)),
                    );
                }
                RunStatus::Failed(message) => {
                    ui.label(
                        egui::RichText::new(format!("Pipeline error: {message}"))
                            .color(egui::Color32::from_rgb(255, 80, 80)),
                    );
                }
            }
        });
    }
}

fn metric(ui: &mut egui::Ui, label: &str, value: String) {
    ui.vertical(|ui| {
        ui.label(egui::RichText::new(label).small());
        ui.label(egui::RichText::new(value).heading());
    });
}
