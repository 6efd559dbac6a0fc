use std::sync::Arc;

use crate::cases;
use crate::context::Context;
use crate::error::{AppError, AppResult};
use crate::http::{RunSettings, build_client, preflight, run_all};
use crate::logging::Logger;
use crate::shutdown_handlers::{shutdown_channel, spawn_signal_handler};

use super::types::{LoadPlan, RunPlan};

pub(crate) async fn execute_plan(plan: RunPlan) -> AppResult<()> {
    match plan {
        RunPlan::List => {
            for name in cases::names() {
                println!("{}", name);
            }
            Ok(())
        }
        RunPlan::Load(load) => run_load(&load).await,
    }
}

async fn run_load(plan: &LoadPlan) -> AppResult<()> {
    let logger = match Logger::from_config(&plan.logging) {
        Ok(logger) => Arc::new(logger),
        Err(err) => {
            tracing::error!("{}", err);
            return Err(AppError::from(err));
        }
    };
    let ctx = Context::background();

    let selected = match cases::select(&plan.args.test_names) {
        Ok(selected) => selected,
        Err(err) => crate::log_fatal!(logger, &ctx, "{}", err),
    };
    let settings = match RunSettings::from_args(&plan.args) {
        Ok(settings) => settings,
        Err(err) => crate::log_fatal!(logger, &ctx, "{}", err),
    };
    let client = match build_client(&settings) {
        Ok(client) => client,
        Err(err) => crate::log_fatal!(logger, &ctx, "{}", err),
    };

    let (shutdown_tx, _shutdown_rx) = shutdown_channel();
    let signal_handle = spawn_signal_handler(&shutdown_tx);
    let ctx = ctx.with_shutdown(&shutdown_tx);

    if let Err(err) = preflight(&client, &settings).await {
        crate::log_fatal!(logger, &ctx, "Gateway {} is not reachable: {}", settings.gateway_url, err);
    }

    crate::log_info!(
        logger,
        &ctx,
        "Starting load run against {} with {} test(s)",
        settings.gateway_url,
        selected.len()
    );
    let result = run_all(&client, &selected, &settings, &logger, &ctx).await;

    drop(shutdown_tx.send(()));
    signal_handle.await?;

    let outcomes = match result {
        Ok(outcomes) => outcomes,
        Err(err) => crate::log_fatal!(logger, &ctx, "Load run failed: {}", err),
    };
    let requests = outcomes
        .iter()
        .fold(0_u64, |acc, outcome| acc.saturating_add(outcome.requests));
    let successes = outcomes
        .iter()
        .fold(0_u64, |acc, outcome| acc.saturating_add(outcome.successes));
    crate::log_info!(
        logger,
        &ctx,
        "Load run finished: {} test(s), {} requests, {} successful",
        outcomes.len(),
        requests,
        successes
    );
    logger.close();
    Ok(())
}
