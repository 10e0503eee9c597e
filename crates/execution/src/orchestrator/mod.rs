//! Sequential, fail-fast driver for batch liquidity increases.

mod report;

pub use report::{RunFailure, RunReport, Stage, SubmissionOutcome};

use crate::config::PositionRequest;
use crate::error::RequestError;
use chrono::Utc;
use clmm_liq_domain::MathError;
use clmm_liq_domain::math::tick_math::get_sqrt_price_at_tick;
use clmm_liq_domain::value_objects::{Price, PriceRange};
use clmm_liq_protocols::accounts::PositionSnapshot;
use clmm_liq_protocols::context::ChainContext;
use clmm_liq_protocols::error::SubmitError;
use clmm_liq_protocols::fetcher::StateFetcher;
use clmm_liq_protocols::instructions::IncreaseLiquidityBuilder;
use clmm_liq_protocols::pool::AmmPool;
use clmm_liq_protocols::submitter::{SignerSet, TransactionSubmitter};
use solana_sdk::signer::Signer;
use std::sync::Arc;
use tracing::{Instrument, error, info, info_span};
use uuid::Uuid;

/// Error tagged with the stage that raised it.
struct Failure {
    stage: Stage,
    error: RequestError,
}

fn at<E: Into<RequestError>>(stage: Stage) -> impl FnOnce(E) -> Failure {
    move |error| Failure {
        stage,
        error: error.into(),
    }
}

/// Runs position requests one after another against a shared context.
pub struct Orchestrator {
    ctx: Arc<ChainContext>,
    fetcher: Arc<dyn StateFetcher>,
    builder: IncreaseLiquidityBuilder,
    submitter: Arc<dyn TransactionSubmitter>,
}

impl Orchestrator {
    /// Creates a new orchestrator.
    pub fn new(
        ctx: Arc<ChainContext>,
        fetcher: Arc<dyn StateFetcher>,
        submitter: Arc<dyn TransactionSubmitter>,
    ) -> Self {
        Self {
            ctx,
            fetcher,
            builder: IncreaseLiquidityBuilder::new(),
            submitter,
        }
    }

    /// Processes `requests` in order, stopping at the first failure.
    ///
    /// Nothing is retried and completed requests are not undone.
    pub async fn run(
        &self,
        authority: &(dyn Signer + Send + Sync),
        requests: &[PositionRequest],
    ) -> RunReport {
        let run_id = Uuid::new_v4();
        let span = info_span!("increase_liquidity", run_id = %run_id);

        async move {
            info!(
                requests = requests.len(),
                authority = %authority.pubkey(),
                program_id = %self.ctx.program_id(),
                simulate = self.ctx.submit_options().simulate,
                "Starting batch"
            );

            let mut report = RunReport::new(run_id);
            for (index, request) in requests.iter().enumerate() {
                match self.process(index, authority, request).await {
                    Ok(outcome) => report.outcomes.push(outcome),
                    Err(Failure { stage, error }) => {
                        error!(index, stage = %stage, error = %error, "Request failed, aborting batch");
                        report.failure = Some(RunFailure {
                            index,
                            stage,
                            error,
                        });
                        break;
                    }
                }
            }

            if report.is_success() {
                info!(completed = report.completed(), "Batch completed");
            }
            report
        }
        .instrument(span)
        .await
    }

    async fn process(
        &self,
        index: usize,
        authority: &(dyn Signer + Send + Sync),
        request: &PositionRequest,
    ) -> Result<SubmissionOutcome, Failure> {
        let pool_state = self
            .fetcher
            .fetch_pool(&request.pool)
            .await
            .map_err(at(Stage::FetchPool))?;
        let amm_config = self
            .fetcher
            .fetch_config(&pool_state.amm_config)
            .await
            .map_err(at(Stage::FetchConfig))?;
        let pool = AmmPool::new(
            self.ctx.clone(),
            request.pool,
            pool_state,
            amm_config,
            self.fetcher.clone(),
        );

        let price = pool.token_price().map_err(at(Stage::PriceMath))?;
        info!(
            index,
            pool = %request.pool,
            price = %price,
            tick_current = pool.pool_state().tick_current,
            trade_fee_rate = pool.amm_config().trade_fee_rate,
            "Pool price"
        );

        let position = self
            .fetcher
            .fetch_position(&request.position)
            .await
            .map_err(at(Stage::FetchPosition))?;
        log_position_bounds(index, &pool, &position, price).map_err(at(Stage::PriceMath))?;

        let built = self
            .builder
            .build(
                &authority.pubkey(),
                &pool,
                &position,
                request.liquidity_delta,
                request.slippage,
            )
            .await
            .map_err(at(Stage::Build))?;

        let signers = SignerSet::assemble(authority, &built.signers);
        let signature = self
            .submitter
            .submit(&built.instructions, &signers, self.ctx.submit_options())
            .await
            .map_err(|e| match e {
                SubmitError::Signing(_) | SubmitError::NoSigners => at(Stage::Sign)(e),
                _ => at(Stage::Submit)(e),
            })?;
        info!(index, position = %request.position, signature = %signature, "Liquidity increased");

        Ok(SubmissionOutcome {
            index,
            pool: request.pool,
            position: request.position,
            signature,
            quote: built.quote,
            confirmed_at: Utc::now(),
        })
    }
}

fn log_position_bounds(
    index: usize,
    pool: &AmmPool,
    position: &PositionSnapshot,
    price: Price,
) -> Result<(), MathError> {
    let state = pool.pool_state();
    let sqrt_price_lower = get_sqrt_price_at_tick(position.tick_lower_index)?;
    let sqrt_price_upper = get_sqrt_price_at_tick(position.tick_upper_index)?;
    let range = PriceRange::from_sqrt_prices(
        sqrt_price_lower,
        sqrt_price_upper,
        state.mint_decimals_0,
        state.mint_decimals_1,
    )?;

    info!(
        index,
        tick_lower = position.tick_lower_index,
        sqrt_price_lower,
        price_lower = %range.lower_price,
        tick_upper = position.tick_upper_index,
        sqrt_price_upper,
        price_upper = %range.upper_price,
        in_range = range.contains(price),
        "Position bounds"
    );
    Ok(())
}
