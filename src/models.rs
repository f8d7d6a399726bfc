use serde::{Deserialize, Serialize};
use std::fmt;

/// Run configuration as loaded from a config file or assembled from flags.
///
/// An empty `compare` list means a single scenario with `counters` servers;
/// otherwise one scenario is run per entry and `counters` is ignored.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct SimConfig {
    pub clients: usize,
    pub arrival_rate: f64,
    pub service_rate: f64,
    #[serde(default = "default_counters")]
    pub counters: usize,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub compare: Vec<usize>,
}

impl SimConfig {
    pub fn is_comparison(&self) -> bool {
        !self.compare.is_empty()
    }

    pub fn scenarios(&self) -> Vec<Scenario> {
        if self.compare.is_empty() {
            return vec![self.scenario_with(self.counters)];
        }
        self.compare
            .iter()
            .map(|&counters| self.scenario_with(counters))
            .collect()
    }

    fn scenario_with(&self, counters: usize) -> Scenario {
        Scenario {
            counters,
            arrival_rate: self.arrival_rate,
            service_rate: self.service_rate,
            clients: self.clients,
            seed: self.seed,
        }
    }
}

/// One parameterized simulation run.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Scenario {
    pub counters: usize,
    pub arrival_rate: f64,
    pub service_rate: f64,
    pub clients: usize,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Scenario {
    pub fn new(counters: usize, arrival_rate: f64, service_rate: f64, clients: usize) -> Self {
        Self {
            counters,
            arrival_rate,
            service_rate,
            clients,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} counter(s), {} clients, lambda={}, mu={}",
            self.counters, self.clients, self.arrival_rate, self.service_rate
        )
    }
}

fn default_counters() -> usize {
    1
}
