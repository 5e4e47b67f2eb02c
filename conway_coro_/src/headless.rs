// headless.rs - Tick loop without a window, paced by a tokio interval

use std::time::Duration;

use tokio::time::{MissedTickBehavior, interval};
use tracing::{info, warn};

use crate::simulation::Simulation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeadlessOptions {
    /// Stop after this many generations; run until interrupted when `None`.
    pub generations: Option<u64>,
    pub stop_on_cycle: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    GenerationLimit,
    Cycle,
    Interrupted,
}

/// Drives `sim` once per `period` until a stop condition is met.
pub async fn run(sim: &mut Simulation, period: Duration, options: HeadlessOptions) -> StopReason {
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    info!(?period, generations = ?options.generations, "headless run started");

    loop {
        if options
            .generations
            .is_some_and(|limit| sim.generation() >= limit)
        {
            info!(generation = sim.generation(), "generation limit reached");
            return StopReason::GenerationLimit;
        }

        tokio::select! {
            _ = ticker.tick() => {
                let report = sim.tick();
                let census = report.census;
                info!(
                    generation = report.generation,
                    alive = census.alive(),
                    born = census.new,
                    died = census.died,
                    "tick"
                );
                if report.cycle_detected && options.stop_on_cycle {
                    info!(generation = report.generation, "cycle detected, stopping");
                    return StopReason::Cycle;
                }
            }
            result = &mut ctrl_c => {
                if let Err(err) = result {
                    warn!(%err, "ctrl-c handler failed");
                }
                return StopReason::Interrupted;
            }
        }
    }
}
