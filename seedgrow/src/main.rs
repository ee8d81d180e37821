use clap::{Parser, Subcommand};
use log::{error, info};
use std::path::PathBuf;

use seedgrow::config::{CliOverrides, load_config};
use seedgrow::pipeline::{load_source, run_batch, run_seed_job};
use seedgrow::region::{DEFAULT_THRESHOLD, Seed};

/// seedgrow - Seeded region-growing segmentation
#[derive(Parser, Debug)]
#[command(name = "seedgrow", version, author, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run every seed of a batch configuration
    Batch {
        /// TOML batch file (built-in sample batch when omitted)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Similarity threshold, overriding the configuration
        #[arg(short, long)]
        threshold: Option<u32>,

        /// Directory holding the input images
        #[arg(long)]
        input_dir: Option<PathBuf>,

        /// Directory receiving the results
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },

    /// Grow one region from one image
    Grow {
        /// Input image (PNG or PNM)
        image: PathBuf,

        /// Seed as ROW,COL (e.g., "120,48")
        #[arg(short, long, value_parser = parse_seed)]
        seed: Seed,

        /// Similarity threshold
        #[arg(short, long, default_value_t = DEFAULT_THRESHOLD)]
        threshold: u32,

        /// Directory receiving the results
        #[arg(short, long, default_value = "resultados_imagens")]
        output_dir: PathBuf,
    },
}

fn parse_seed(s: &str) -> Result<Seed, String> {
    let (row, col) = s
        .split_once(',')
        .ok_or_else(|| format!("expected ROW,COL, got {:?}", s))?;
    let row = row
        .trim()
        .parse::<i64>()
        .map_err(|e| format!("bad row {:?}: {}", row, e))?;
    let col = col
        .trim()
        .parse::<i64>()
        .map_err(|e| format!("bad column {:?}: {}", col, e))?;
    Ok(Seed::new(row, col))
}

/// Main entry point
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(if args.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .init();

    match args.command {
        Command::Batch {
            config,
            threshold,
            input_dir,
            output_dir,
        } => {
            let cli = CliOverrides {
                input_dir,
                output_dir,
                threshold,
            };
            let config = load_config(config.as_deref(), Some(&cli))?;
            let summary = run_batch(&config)?;
            if !summary.is_success() {
                std::process::exit(1);
            }
        }
        Command::Grow {
            image,
            seed,
            threshold,
            output_dir,
        } => {
            let source = load_source(&image)?;
            let stem = image
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("image");
            match run_seed_job(&source, stem, 1, seed, threshold, &output_dir) {
                Ok(report) => info!(
                    "region of {} pixels written to {}",
                    report.stats.accepted,
                    report.artifacts.mask.display()
                ),
                Err(e) => {
                    error!("seed {} failed: {}", seed, e);
                    return Err(e.into());
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_seed() {
        assert_eq!(parse_seed("120,48"), Ok(Seed::new(120, 48)));
        assert_eq!(parse_seed(" -1 , 5 "), Ok(Seed::new(-1, 5)));
        assert!(parse_seed("120").is_err());
        assert!(parse_seed("a,b").is_err());
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_grow_args() {
        let args = Args::try_parse_from(["seedgrow", "-v", "grow", "in.png", "--seed", "3,4"]).unwrap();
        assert!(args.verbose);
        match args.command {
            Command::Grow {
                seed,
                threshold,
                output_dir,
                ..
            } => {
                assert_eq!(seed, Seed::new(3, 4));
                assert_eq!(threshold, DEFAULT_THRESHOLD);
                assert_eq!(output_dir, PathBuf::from("resultados_imagens"));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
