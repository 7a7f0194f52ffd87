use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use jobnorm::export::{export_to_path, ExportFormat, RunReport};
use jobnorm::inspect::describe_token;
use jobnorm_core::{Config, NormalizationPipeline, SalaryRangeParser};
use jobnorm_feeds::{source_for_path, SourceBatch, SourceOptions};

#[derive(Parser)]
#[command(name = "jobnorm", about = "Normalize scraped job listings into structured records")]
struct Cli {
    /// Write debug logs to /tmp/jobnorm-debug.log (tail -f to inspect).
    #[arg(long, global = true)]
    debug: bool,

    /// Config file layered over the built-in defaults.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Read a scraper export, normalize it and write the structured records.
    Run {
        /// Input file (.csv, .jsonl or .ndjson).
        input: PathBuf,

        /// Output file; format follows the extension unless --format is given.
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[arg(long, value_enum)]
        format: Option<ExportFormat>,

        /// Also write a JSON run report here.
        #[arg(long)]
        report: Option<PathBuf>,

        /// Clean salaries with the strict OCR rules before parsing.
        #[arg(long)]
        ocr: bool,

        /// Drop listings whose full text repeats an earlier one.
        #[arg(long)]
        dedupe: bool,

        /// Normalize on the worker pool (overrides the config).
        #[arg(long)]
        parallel: bool,

        /// Minimum surviving records (overrides the config).
        #[arg(long)]
        min_samples: Option<usize>,
    },

    /// Parse individual salary tokens and print the result.
    Salary {
        #[arg(required = true)]
        tokens: Vec<String>,

        /// Apply strict OCR cleaning first.
        #[arg(long)]
        ocr: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug)?;

    let cfg = Config::load(cli.config.as_deref()).context("loading configuration")?;

    match cli.command {
        Command::Run {
            input,
            output,
            format,
            report: report_path,
            ocr,
            dedupe,
            parallel,
            min_samples,
        } => {
            let mut pipeline = NormalizationPipeline::from_config(&cfg)?;
            if let Some(n) = min_samples {
                pipeline = pipeline.with_min_samples(n);
            }

            let mut source = source_for_path(&input)?;
            let options = SourceOptions {
                dedupe,
                ocr: ocr.then(|| cfg.salary.clone()),
            };
            let batch = SourceBatch::collect(source.as_mut(), &options)
                .with_context(|| format!("reading {}", input.display()))?;

            let out = if parallel || cfg.pipeline.parallel {
                pipeline.run_items_parallel(batch.items)?
            } else {
                pipeline.run_items(batch.items)?
            };

            let report = RunReport::new(
                source.name(),
                batch.duplicates,
                batch.ocr_discarded,
                out.stats.clone(),
                &out.records,
                pipeline.band(),
            );
            println!("{}", report.stats);
            match &report.modeling {
                Some(summary) => println!("{summary}"),
                None => tracing::warn!("no kept record states a degree; salary summary skipped"),
            }

            if let Some(path) = output {
                let format = format.unwrap_or_else(|| ExportFormat::from_path(&path));
                export_to_path(&out.records, format, &path)?;
            }
            if let Some(path) = report_path {
                report.write_to_path(&path)?;
            }
        }
        Command::Salary { tokens, ocr } => {
            let parser = SalaryRangeParser::new(cfg.salary.clone());
            for token in &tokens {
                println!("{}", describe_token(&parser, token, ocr));
            }
        }
    }
    Ok(())
}

fn init_logging(debug: bool) -> anyhow::Result<()> {
    use tracing_subscriber::EnvFilter;

    if debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/jobnorm-debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                EnvFilter::try_from_env("RUST_LOG").unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("jobnorm debug log started, tail -f /tmp/jobnorm-debug.log");
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                EnvFilter::try_from_env("RUST_LOG").unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .init();
    }
    Ok(())
}
