use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use foundation::ids::SlideId;
use streaming::FsSource;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "storymap", about = "Story map dataset tooling")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load each slide's dataset and print a summary.
    Check {
        /// Directory holding `<slide-id>.json` files.
        #[arg(long, default_value = "data")]
        data: PathBuf,
        /// Print reports as JSON lines.
        #[arg(long)]
        json: bool,
        #[arg(required = true)]
        slides: Vec<String>,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Check { data, json, slides } => check(data, json, slides),
    }
}

fn check(data: PathBuf, json: bool, slides: Vec<String>) -> ExitCode {
    let source = FsSource::new(&data);
    let ids: Vec<SlideId> = slides.into_iter().map(SlideId::new).collect();

    let mut failures = 0usize;
    for (id, result) in ids.iter().zip(tools::check_datasets(&source, &ids)) {
        match result {
            Ok(report) if json => match serde_json::to_string(&report) {
                Ok(line) => println!("{line}"),
                Err(e) => {
                    error!(slide = %id, error = %e, "failed to encode report");
                    failures += 1;
                }
            },
            Ok(report) => {
                let bounds = match report.bounds {
                    Some(b) => format!(
                        "[{}, {}, {}, {}]{}",
                        b.west,
                        b.south,
                        b.east,
                        b.north,
                        if report.explicit_bbox { " (bbox)" } else { "" }
                    ),
                    None => "none".to_string(),
                };
                println!("{}: {} features, bounds {bounds}", report.slide_id, report.features);
                for (color, count) in &report.palette {
                    println!("  {color}  {count}");
                }
            }
            Err(e) => {
                error!(slide = %id, error = %e, "dataset failed");
                failures += 1;
            }
        }
    }

    info!(checked = ids.len(), failures, data = %data.display(), "check finished");
    if failures == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
