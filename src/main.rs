use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use factcheck_rs::config::{Config, SearchProvider};
use factcheck_rs::export::{document_blocks, text_export};
use factcheck_rs::sink::{deliver, AnsiSink, PlainTextSink};
use factcheck_rs::trust::{classify, HttpProbe};
use factcheck_rs::*;

#[derive(Parser)]
#[command(name = "factcheck", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
    /// Overrides SEARCH_PROVIDER
    #[arg(long, value_enum)]
    provider: Option<SearchProvider>,
    /// Overrides LLM_MODEL
    #[arg(long)]
    model: Option<String>,
}

#[derive(Subcommand)]
enum Cmd {
    /// Fact-check one closed question
    Check {
        claim: String,
        #[arg(long)]
        export_txt: Option<PathBuf>,
        /// Document layout as JSON blocks
        #[arg(long)]
        export_doc: Option<PathBuf>,
        /// No colors
        #[arg(long)]
        plain: bool,
    },
    /// Print the trust facts of URLs
    Classify { urls: Vec<String> },
    /// Serve POST /check over HTTP
    Serve {
        #[arg(long)]
        addr: Option<String>,
    },
}

fn print_plan(plan: &RenderPlan, plain: bool) {
    if plain {
        let mut sink = PlainTextSink::new();
        deliver(plan, &mut sink);
        print!("{}", sink.into_string());
    } else {
        let mut sink = AnsiSink::new();
        deliver(plan, &mut sink);
        print!("{}", sink.into_string());
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,factcheck_rs=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let mut config = Config::from_env().context("Failed to load configuration")?;
    if let Some(provider) = cli.provider {
        config.search_provider = provider;
    }
    if let Some(model) = cli.model {
        config.llm_model = model;
    }

    match cli.cmd {
        Cmd::Check { claim, export_txt, export_doc, plain } => {
            let pipeline = config.pipeline()?;
            let report = match pipeline.run(&claim).await {
                Outcome::Rejected { message } => {
                    eprintln!("{message}");
                    std::process::exit(2);
                }
                Outcome::Rendered(report) | Outcome::Failed(report) => report,
            };
            print_plan(&report.plan, plain);
            println!("\n{}", report.reliability.verdict);

            if let Some(path) = export_txt {
                std::fs::write(&path, text_export(&report.claim, &report.response))
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                tracing::info!(path = %path.display(), "text export written");
            }
            if let Some(path) = export_doc {
                let blocks = document_blocks(&report.claim, &report.response);
                std::fs::write(&path, serde_json::to_vec_pretty(&blocks)?)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                tracing::info!(path = %path.display(), "document export written");
            }
        }
        Cmd::Classify { urls } => {
            let probe = HttpProbe::new(config.probe_timeout)?;
            for url in urls {
                let fact = classify(&url, &probe).await;
                println!("{url}\t{}", serde_json::to_string(&fact)?);
            }
        }
        Cmd::Serve { addr } => {
            let addr = addr.unwrap_or_else(|| format!("0.0.0.0:{}", config.port));
            factcheck_rs::server::run_server(config.pipeline()?, &addr).await?;
        }
    }
    Ok(())
}
