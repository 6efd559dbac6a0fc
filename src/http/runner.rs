use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::Client;
use tokio::task::JoinSet;
use tokio::time::{MissedTickBehavior, interval, sleep};

use crate::cases::TestCase;
use crate::context::Context;
use crate::error::AppResult;
use crate::logging::Logger;
use crate::shutdown::ShutdownReceiver;

use super::handlers::{PreparedCase, Tally, dispatch};
use super::settings::RunSettings;

/// Summary of one test after its requests have drained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestOutcome {
    pub name: &'static str,
    pub requests: u64,
    pub successes: u64,
    pub rejected: u64,
    pub errors: u64,
    pub elapsed: Duration,
    pub interrupted: bool,
}

impl TestOutcome {
    #[must_use]
    pub const fn all_failed(&self) -> bool {
        self.requests > 0 && self.successes == 0
    }
}

/// Drive one test case at the configured rate until its duration elapses or
/// a shutdown is broadcast. In-flight requests are awaited before returning.
///
/// # Errors
///
/// Returns an error when the case URL cannot be resolved or a request task
/// panics.
pub async fn run_test(
    client: &Client,
    case: &'static TestCase,
    settings: &RunSettings,
    logger: &Arc<Logger>,
    ctx: &Context,
) -> AppResult<TestOutcome> {
    let ctx = ctx.for_test(case.name);
    crate::log_info!(
        logger,
        &ctx,
        "Executing test: {} ({} {}) for {:?} at {} req/s",
        case.name,
        case.method,
        case.path,
        settings.duration,
        settings.rate.get()
    );

    let prepared = Arc::new(PreparedCase::new(case, settings, logger, &ctx)?);
    let tally = Arc::new(Tally::default());
    let mut shutdown_rx = ctx.shutdown().map(tokio::sync::broadcast::Sender::subscribe);
    let mut in_flight = JoinSet::new();
    let mut ticker = interval(settings.request_interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let deadline = sleep(settings.duration);
    tokio::pin!(deadline);

    let started = Instant::now();
    let mut seq: u64 = 0;
    let mut interrupted = false;
    loop {
        tokio::select! {
            () = &mut deadline => break,
            () = shutdown_requested(shutdown_rx.as_mut()) => {
                interrupted = true;
                break;
            }
            _ = ticker.tick() => {
                in_flight.spawn(dispatch(
                    client.clone(),
                    Arc::clone(&prepared),
                    seq,
                    Arc::clone(logger),
                    ctx.clone(),
                    Arc::clone(&tally),
                ));
                seq = seq.saturating_add(1);
            }
            Some(joined) = in_flight.join_next() => joined?,
        }
    }

    while let Some(joined) = in_flight.join_next().await {
        joined?;
    }

    let outcome = TestOutcome {
        name: case.name,
        requests: Tally::load(&tally.sent),
        successes: Tally::load(&tally.succeeded),
        rejected: Tally::load(&tally.rejected),
        errors: Tally::load(&tally.failed),
        elapsed: started.elapsed(),
        interrupted,
    };
    crate::log_info!(
        logger,
        &ctx,
        "Finished test: {} requests={} ok={} rejected={} errors={} elapsed={:?}{}",
        outcome.name,
        outcome.requests,
        outcome.successes,
        outcome.rejected,
        outcome.errors,
        outcome.elapsed,
        if interrupted { " (interrupted)" } else { "" }
    );
    if outcome.all_failed() {
        crate::log_error!(
            logger,
            &ctx,
            "Test {} got no successful responses out of {} requests",
            outcome.name,
            outcome.requests
        );
    }
    Ok(outcome)
}

/// Run the selected cases one after another, pausing `cooldown` between them.
///
/// # Errors
///
/// Returns the first error raised by [`run_test`].
pub async fn run_all(
    client: &Client,
    cases: &[&'static TestCase],
    settings: &RunSettings,
    logger: &Arc<Logger>,
    ctx: &Context,
) -> AppResult<Vec<TestOutcome>> {
    let mut shutdown_rx = ctx.shutdown().map(tokio::sync::broadcast::Sender::subscribe);
    let mut outcomes = Vec::with_capacity(cases.len());
    for (index, case) in cases.iter().enumerate() {
        if index > 0
            && let Some(cooldown) = settings.cooldown
        {
            crate::log_debug!(logger, ctx, "Cooling down for {:?}", cooldown);
            tokio::select! {
                () = sleep(cooldown) => {}
                () = shutdown_requested(shutdown_rx.as_mut()) => break,
            }
        }
        let outcome = run_test(client, case, settings, logger, ctx).await?;
        let interrupted = outcome.interrupted;
        outcomes.push(outcome);
        if interrupted {
            crate::log_warn!(logger, ctx, "Run interrupted, skipping remaining tests");
            break;
        }
    }
    Ok(outcomes)
}

/// Resolves once shutdown is broadcast. Without a receiver it never resolves.
async fn shutdown_requested(shutdown_rx: Option<&mut ShutdownReceiver>) {
    match shutdown_rx {
        Some(rx) => {
            drop(rx.recv().await);
        }
        None => std::future::pending::<()>().await,
    }
}
