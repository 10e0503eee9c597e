//! Command Line Interface for batch liquidity increases.
use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use clmm_liq_execution::prelude::*;
use clmm_liq_protocols::context::ChainContext;
use clmm_liq_protocols::fetcher::RpcStateFetcher;
use clmm_liq_protocols::rpc::RpcProvider;
use clmm_liq_protocols::submitter::{RpcSubmitter, SubmitOptions};
use dotenv::dotenv;
use solana_sdk::signer::Signer;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[derive(Parser)]
#[command(name = "clmm-liq")]
#[command(about = "Batch liquidity increases for concentrated-liquidity positions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add liquidity to every position listed in the config, in order
    IncreaseLiquidity {
        /// JSON run configuration
        #[arg(short, long)]
        config: PathBuf,

        /// Authority keypair (JSON array of 64 bytes)
        #[arg(short, long, env = "KEYPAIR_PATH")]
        keypair: PathBuf,

        /// RPC endpoint, overrides the config file
        #[arg(short, long, env = "RPC_URL")]
        url: Option<String>,

        /// Simulate each transaction instead of sending it
        #[arg(long)]
        simulate: bool,

        /// Abort the whole run after this many seconds
        #[arg(long)]
        timeout_secs: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::IncreaseLiquidity {
            config,
            keypair,
            url,
            simulate,
            timeout_secs,
        } => {
            let run_config = RunConfig::load(&config)
                .with_context(|| format!("Failed to load {}", config.display()))?;
            let authority = load_keypair(&keypair).context("Failed to load authority keypair")?;

            let Some(url) = url.or_else(|| run_config.url.clone()) else {
                bail!("No RPC endpoint: pass --url, set RPC_URL or add \"url\" to the config");
            };

            println!("📡 Connecting to {url}...");
            let provider = Arc::new(RpcProvider::new(url, run_config.commitment));
            let ctx = Arc::new(ChainContext::new(
                run_config.program_id,
                SubmitOptions { simulate },
            ));
            let fetcher = Arc::new(RpcStateFetcher::new(provider.clone(), run_config.program_id));
            let submitter = Arc::new(RpcSubmitter::new(provider));
            let orchestrator = Orchestrator::new(ctx, fetcher, submitter);

            info!(
                authority = %authority.pubkey(),
                requests = run_config.requests.len(),
                simulate,
                "Starting liquidity increases"
            );
            println!(
                "🚀 Increasing liquidity on {} position(s){}",
                run_config.requests.len(),
                if simulate { " (simulation)" } else { "" }
            );

            let run = orchestrator.run(&authority, &run_config.requests);
            let report = match timeout_secs {
                Some(secs) => tokio::time::timeout(Duration::from_secs(secs), run)
                    .await
                    .with_context(|| format!("Run timed out after {secs}s"))?,
                None => run.await,
            };

            print_report(&report);
            report.into_result()?;
        }
    }

    Ok(())
}

fn print_report(report: &RunReport) {
    println!("\n📊 Run {}", report.run_id);
    println!("════════════════════════════════════");
    for outcome in &report.outcomes {
        println!(
            "✅ #{:<3} {} -> {} (token0 {}, token1 {})",
            outcome.index,
            outcome.position,
            outcome.signature,
            outcome.quote.token_0.required,
            outcome.quote.token_1.required
        );
    }
    if let Some(failure) = &report.failure {
        println!(
            "❌ #{:<3} failed at {}: {}",
            failure.index, failure.stage, failure.error
        );
    }
    println!("Completed: {}", report.completed());
    println!("════════════════════════════════════");
}
