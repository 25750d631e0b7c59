use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use color_eyre::Result;

use sysoverview::app::App;
use sysoverview::config::{Config, load_config, load_config_from_path};
use sysoverview::event::EventHandler;
use sysoverview::logging;
use sysoverview::system::collector::SysinfoSource;
use sysoverview::system::gpu;
use sysoverview::system::sampler::Sampler;
use sysoverview::ui;

#[derive(Parser)]
#[command(
    name = "sysoverview",
    version,
    about = "Real-time terminal dashboard for CPU, memory, disk, network, process and GPU metrics"
)]
struct Cli {
    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Refresh rate in milliseconds
    #[arg(long)]
    refresh_rate: Option<u64>,

    /// Number of processes listed in the top-processes panel
    #[arg(long)]
    top: Option<usize>,

    /// Skip GPU detection
    #[arg(long, default_value_t = false)]
    no_gpu: bool,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print a single sample as JSON instead of starting the dashboard
    #[arg(long, default_value_t = false)]
    once: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let config = load_config_for_cli(&cli);
    logging::init(config.logging.file.as_deref(), &config.logging.level)?;

    let tick_rate = Duration::from_millis(config.general.refresh_rate_ms.max(1));
    let sampler = Sampler::new(
        Box::new(SysinfoSource::new()),
        gpu::detect(&config.gpu),
        config.sample_limits(),
    );
    tracing::info!(
        refresh_ms = config.general.refresh_rate_ms,
        gpu = sampler.gpu_label(),
        "starting"
    );

    if cli.once {
        return print_once(sampler, tick_rate).await;
    }

    let app = App::new(sampler, config.thresholds);
    let mut terminal = ratatui::try_init()?;
    let result = run(&mut terminal, app, tick_rate).await;
    ratatui::restore();
    result?;

    println!("Goodbye!");
    Ok(())
}

async fn run(
    terminal: &mut ratatui::DefaultTerminal,
    mut app: App,
    tick_rate: Duration,
) -> Result<()> {
    let mut events = EventHandler::new(tick_rate);

    terminal.draw(|frame| ui::draw(frame, &app))?;

    while app.is_running() {
        let Some(event) = events.next().await else {
            break;
        };
        app.handle_event(event)?;
        if app.is_running() {
            terminal.draw(|frame| ui::draw(frame, &app))?;
        }
    }

    tracing::info!(ticks = app.ticks, "stopped");
    Ok(())
}

async fn print_once(mut sampler: Sampler, interval: Duration) -> Result<()> {
    let baseline = sampler.baseline_at(Instant::now());
    tokio::time::sleep(interval).await;
    let (sample, _) = sampler.sample(&baseline)?;
    println!("{}", sample.to_pretty_json()?);
    Ok(())
}

fn load_config_for_cli(cli: &Cli) -> Config {
    let mut config = match &cli.config {
        Some(path) => load_config_from_path(path),
        None => load_config(),
    };

    if let Some(rate) = cli.refresh_rate {
        config.general.refresh_rate_ms = rate;
    }
    if let Some(top) = cli.top {
        config.general.top_processes = top;
    }
    if cli.no_gpu {
        config.gpu.enabled = false;
    }
    if let Some(ref path) = cli.log_file {
        config.logging.file = Some(path.clone());
    }

    config
}
