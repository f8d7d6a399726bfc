use serde::Serialize;

use crate::events::SimTime;

#[derive(Clone, Debug)]
pub struct CounterState {
    pub id: usize,
    pub next_available: f64,
    pub busy_time: f64,
}

impl CounterState {
    pub fn idle(id: usize) -> Self {
        Self {
            id,
            next_available: 0.0,
            busy_time: 0.0,
        }
    }
}

#[derive(Clone, Debug)]
pub struct EngineState {
    pub time: SimTime,
    pub counters: Vec<CounterState>,
    pub queue_len: usize,
    pub busy: usize,
    pub clients: Vec<ClientRecord>,
}

/// A client that has been assigned a counter. Times are in minutes.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ClientRecord {
    pub id: usize,
    pub counter_id: usize,
    pub arrival: f64,
    pub service_start: f64,
    pub service_time: f64,
    pub departure: f64,
}

impl ClientRecord {
    pub fn wait(&self) -> f64 {
        self.service_start - self.arrival
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct WaitPercentiles {
    pub p50: f64,
    pub p90: f64,
    pub p95: f64,
    pub p99: f64,
}

/// Flat statistics record for one scenario.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScenarioStats {
    pub counters: usize,
    pub clients: usize,
    pub arrival_rate: f64,
    pub service_rate: f64,
    pub seed: Option<u64>,
    pub mean_wait: f64,
    pub max_wait: f64,
    pub max_queue: usize,
    pub served: usize,
    pub total_time: f64,
    pub utilization: f64,
    pub wait_percentiles: WaitPercentiles,
}

/// Recorded whenever the queue reaches a new maximum length.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CongestionPeak {
    pub time: f64,
    pub queue_len: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TimelineFrame {
    pub time: f64,
    pub queue_len: usize,
    pub busy: usize,
}

#[derive(Clone, Debug, Serialize)]
pub struct SimulationResult {
    pub stats: ScenarioStats,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub clients: Vec<ClientRecord>,
    pub congestion_peaks: Vec<CongestionPeak>,
    #[serde(skip)]
    pub timeline: Vec<TimelineFrame>,
}
