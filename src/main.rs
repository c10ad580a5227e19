//! CLI entry point: pick the periods to sweep, run them sequentially, and
//! export whatever accumulated — even after an interruption.

use std::path::PathBuf;

use anyhow::Result;
use clap::{CommandFactory, Parser, ValueEnum};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use congreso_lgbt_scraper::application::{ApiSweepEngine, SweepEngine};
use congreso_lgbt_scraper::domain::era::Era;
use congreso_lgbt_scraper::domain::terms::SEARCH_TERMS;
use congreso_lgbt_scraper::infrastructure::{init_logging, Exporter, HttpClient, ScraperConfig};

/// Scrape LGBT-related legislation from Peru's Congress archives.
#[derive(Parser)]
#[command(name = "congreso-lgbt-scraper", version, about)]
struct Cli {
    /// Sweep the current period (2021+) through the spley-portal API.
    #[arg(long)]
    current: bool,

    /// Sweep one historical period through its legacy portal.
    #[arg(long, value_enum)]
    period: Option<PeriodArg>,

    /// Sweep every period, newest first.
    #[arg(long)]
    all: bool,

    /// Test mode: only the first five catalog terms.
    #[arg(long)]
    test: bool,

    /// Output directory for export artifacts.
    #[arg(long)]
    output: Option<PathBuf>,

    /// JSON config file overriding the defaults.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PeriodArg {
    #[value(name = "2016")]
    P2016,
    #[value(name = "2011")]
    P2011,
    #[value(name = "2006")]
    P2006,
    #[value(name = "2001")]
    P2001,
    #[value(name = "2000")]
    P2000,
}

impl From<PeriodArg> for Era {
    fn from(period: PeriodArg) -> Self {
        match period {
            PeriodArg::P2016 => Era::P2016,
            PeriodArg::P2011 => Era::P2011,
            PeriodArg::P2006 => Era::P2006,
            PeriodArg::P2001 => Era::P2001,
            PeriodArg::P2000 => Era::P1995,
        }
    }
}

fn selected_eras(cli: &Cli) -> Vec<Era> {
    if cli.all {
        return Era::ALL.to_vec();
    }
    let mut eras = Vec::new();
    if cli.current {
        eras.push(Era::Current);
    }
    if let Some(period) = cli.period {
        eras.push(period.into());
    }
    eras
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging()?;
    let cli = Cli::parse();

    let eras = selected_eras(&cli);
    if eras.is_empty() {
        Cli::command().print_help()?;
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => ScraperConfig::load(path).await?,
        None => ScraperConfig::default(),
    };
    if let Some(output) = cli.output {
        config.output_dir = output;
    }

    let search_terms: Vec<&str> = if cli.test {
        info!("test mode: limiting the sweep to the first five terms");
        SEARCH_TERMS.iter().take(5).copied().collect()
    } else {
        SEARCH_TERMS.to_vec()
    };

    let http = HttpClient::new(config.http_config())?;
    let exporter = Exporter::new(config.output_dir.clone());

    let cancel = CancellationToken::new();
    let watcher = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupt received, finishing the current unit of work");
            watcher.cancel();
        }
    });

    for era in eras {
        info!("starting period {} ({})", era.label(), era.year_range());
        let records = match era {
            Era::Current => {
                ApiSweepEngine::new(&http, &config)
                    .run(&search_terms, &cancel)
                    .await
            }
            legacy => match SweepEngine::new(&http, legacy, &config) {
                Some(engine) => engine.run(&search_terms, &cancel).await,
                None => Vec::new(),
            },
        };

        // export runs no matter how the sweep ended
        if let Err(e) = exporter.save_results(&records, era.label()) {
            error!("export failed for period {}: {e:#}", era.label());
            return Err(e);
        }

        if cancel.is_cancelled() {
            break;
        }
    }

    info!("all requested periods completed");
    Ok(())
}
