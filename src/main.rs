//! Diagrams CLI - interactive diagram engine

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use diagram_engine::{
    DerivedView, DiagramConfig, DiagramError, FixSuggestion, MetricSelectorWidget, StageCycle,
    ToggleParityWidget,
};

#[derive(Parser)]
#[command(name = "diagrams")]
#[command(about = "Diagrams - interactive parity grid, stage pathway and metric chart")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive terminal dashboard
    Tui {
        /// Path to a diagram config (.yaml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Write logs to this file (logs are discarded otherwise)
        #[arg(long)]
        log_file: Option<PathBuf>,
    },

    /// Print the JSON render description of one widget
    Show {
        /// Widget to render
        #[arg(value_enum)]
        widget: WidgetKind,

        /// Toggle a parity element (repeatable)
        #[arg(short, long = "toggle", value_name = "ID")]
        toggles: Vec<u8>,

        /// Metric to select (campuses, faculty, schools)
        #[arg(short, long)]
        metric: Option<String>,

        /// Stage index to render
        #[arg(short, long, default_value_t = 0)]
        stage: usize,

        /// Path to a diagram config (.yaml)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Validate a config file, or dump the effective config
    Config {
        /// Path to a diagram config (.yaml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print the effective config as YAML
        #[arg(long)]
        dump: bool,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum WidgetKind {
    Parity,
    Stage,
    Metric,
}

/// Where log output goes
enum LogTarget<'a> {
    Stderr,
    File(&'a Path),
    Discard,
}

fn env_filter() -> EnvFilter {
    EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into())
}

fn init_tracing(target: LogTarget<'_>) -> Result<(), DiagramError> {
    let builder = tracing_subscriber::fmt().with_env_filter(env_filter());
    match target {
        LogTarget::Stderr => builder.with_writer(std::io::stderr).init(),
        LogTarget::File(path) => {
            let file = File::create(path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init()
        }
        LogTarget::Discard => builder.with_writer(std::io::sink).init(),
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    // Load .env file (ignore if not present)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Tui { config, log_file } => run_tui(config.as_deref(), log_file.as_deref()).await,
        Commands::Show {
            widget,
            toggles,
            metric,
            stage,
            config,
        } => init_tracing(LogTarget::Stderr).and_then(|_| {
            show_widget(widget, &toggles, metric.as_deref(), stage, config.as_deref())
        }),
        Commands::Config { config, dump } => {
            init_tracing(LogTarget::Stderr).and_then(|_| check_config(config.as_deref(), dump))
        }
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        if let Some(suggestion) = e.fix_suggestion() {
            eprintln!("  {} {}", "Fix:".yellow(), suggestion);
        }
        std::process::exit(1);
    }
}

async fn run_tui(config: Option<&Path>, log_file: Option<&Path>) -> Result<(), DiagramError> {
    init_tracing(log_file.map_or(LogTarget::Discard, LogTarget::File))?;

    let config = DiagramConfig::load(config)?;
    diagram_engine::tui::run(config)
        .await
        .map_err(|e| DiagramError::TuiError {
            reason: format!("{:#}", e),
        })
}

fn print_json<T: Serialize>(value: &T) -> Result<(), DiagramError> {
    let json = serde_json::to_string_pretty(value).map_err(std::io::Error::other)?;
    println!("{}", json);
    Ok(())
}

fn show_widget(
    widget: WidgetKind,
    toggles: &[u8],
    metric: Option<&str>,
    stage: usize,
    config: Option<&Path>,
) -> Result<(), DiagramError> {
    let config = DiagramConfig::load(config)?;

    match widget {
        WidgetKind::Parity => {
            let mut parity = ToggleParityWidget::new(&config.parity);
            for id in toggles {
                parity.toggle(*id)?;
            }
            print_json(&parity.view())
        }
        WidgetKind::Stage => {
            let cycle = StageCycle::at(&config.stages, stage)?;
            print_json(&cycle.view())
        }
        WidgetKind::Metric => {
            let mut selector = MetricSelectorWidget::new(&config.metrics);
            if let Some(key) = metric {
                selector.select_str(key)?;
            }
            print_json(&selector.view())
        }
    }
}

fn check_config(path: Option<&Path>, dump: bool) -> Result<(), DiagramError> {
    let config = DiagramConfig::load(path)?;

    if dump {
        print!("{}", config.to_yaml()?);
        return Ok(());
    }

    let source = DiagramConfig::resolve_path(path)
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(built-in)".to_string());

    println!("{} Config '{}' is valid", "✓".green(), source);
    println!(
        "  Parity: {} elements, {} indicators",
        config.parity.elements.len(),
        config.parity.indicators.len()
    );
    println!(
        "  Stages: {} every {}ms",
        config.stages.stages.len(),
        config.stages.interval_ms
    );
    println!(
        "  Metrics: {} series ({} → {}), default {}",
        config.metrics.series.len(),
        config.metrics.prior_period,
        config.metrics.current_period,
        config.metrics.default
    );

    Ok(())
}
