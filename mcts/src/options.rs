use std::time::Duration;

use anyhow::Result;

use common::{Config, ConfigLoader};

/// Knobs an orchestrator wires into the concrete policies: the UCB
/// exploration factor, the fan-out width of the parallel tiers and the
/// build budgets.
#[derive(Clone, Debug)]
pub struct SearchOptions {
    pub ucb_factor: f64,
    pub parallelism: usize,
    pub max_passes: usize,
    pub max_duration: Option<Duration>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            ucb_factor: 2.0,
            parallelism: num_cpus::get(),
            max_passes: 800,
            max_duration: None,
        }
    }
}

impl Config for SearchOptions {
    fn load(config: &ConfigLoader) -> Result<Self> {
        let defaults = SearchOptions::default();

        Ok(Self {
            ucb_factor: config
                .get("ucb_factor")
                .and_then(|value| value.as_f64())
                .unwrap_or(defaults.ucb_factor),
            parallelism: config
                .get("parallelism")
                .and_then(|value| value.as_usize())
                .unwrap_or(defaults.parallelism),
            max_passes: config
                .get("max_passes")
                .and_then(|value| value.as_usize())
                .unwrap_or(defaults.max_passes),
            max_duration: config
                .get("max_duration_ms")
                .and_then(|value| value.as_usize())
                .map(|millis| Duration::from_millis(millis as u64))
                .or(defaults.max_duration),
        })
    }
}
