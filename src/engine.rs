use std::cmp::Reverse;
use std::collections::BinaryHeap;

use tracing::{debug, info, trace};

use crate::dispatch::pick_earliest_available;
use crate::error::{Error, Result};
use crate::events::{Event, ScheduledEvent, SimTime};
use crate::models::Scenario;
use crate::sampling::{is_valid_rate, ExpSampler};
use crate::state::{
    ClientRecord, CongestionPeak, CounterState, EngineState, ScenarioStats, SimulationResult,
    TimelineFrame,
};
use crate::stats;

pub struct SimulationEngine {
    pub scenario: Scenario,
    pub state: EngineState,
    sampler: ExpSampler,
}

impl SimulationEngine {
    pub fn new(scenario: Scenario) -> Result<Self> {
        validate_scenario(&scenario)?;
        let sampler = ExpSampler::new(scenario.arrival_rate, scenario.service_rate, scenario.seed)?;
        let state = EngineState {
            time: SimTime::ZERO,
            counters: (0..scenario.counters).map(CounterState::idle).collect(),
            queue_len: 0,
            busy: 0,
            clients: Vec::with_capacity(scenario.clients),
        };

        Ok(Self {
            scenario,
            state,
            sampler,
        })
    }

    /// Runs the scenario to completion. Per-client records and the timeline
    /// are only kept when `store_records` is set.
    pub fn run(mut self, store_records: bool) -> SimulationResult {
        let client_count = self.scenario.clients;
        debug!(scenario = %self.scenario, seed = ?self.scenario.seed, "running scenario");

        // All gaps are drawn before any service time so that runs differing
        // only in counter count see identical clients.
        let arrivals = self.sampler.arrival_times(client_count);
        let service_times: Vec<f64> = (0..client_count)
            .map(|_| self.sampler.service_time())
            .collect();

        let mut events: BinaryHeap<Reverse<ScheduledEvent>> = BinaryHeap::new();
        for (idx, &arrival) in arrivals.iter().enumerate() {
            events.push(Reverse(ScheduledEvent::new(
                arrival,
                Event::ClientArrival { client_id: idx + 1 },
            )));
        }

        let mut waits = Vec::with_capacity(client_count);
        let mut max_queue = 0usize;
        let mut congestion_peaks = Vec::new();
        let mut timeline = Vec::new();
        let mut total_time = 0.0f64;

        while let Some(Reverse(scheduled)) = events.pop() {
            self.state.time = scheduled.time;
            let now = scheduled.time.as_f64();
            match scheduled.event {
                Event::ClientArrival { client_id } => {
                    let idx = client_id - 1;
                    let counter_idx = pick_earliest_available(&self.state.counters);
                    let counter = &mut self.state.counters[counter_idx];

                    let service_start = now.max(counter.next_available);
                    let service_time = service_times[idx];
                    let departure = service_start + service_time;
                    counter.next_available = departure;
                    counter.busy_time += service_time;

                    let queued = service_start > now;
                    if queued {
                        self.state.queue_len += 1;
                        if self.state.queue_len > max_queue {
                            max_queue = self.state.queue_len;
                            congestion_peaks.push(CongestionPeak {
                                time: now,
                                queue_len: max_queue,
                            });
                        }
                    }

                    trace!(
                        client_id,
                        counter = counter.id,
                        arrival = now,
                        service_start,
                        departure,
                        "client assigned"
                    );

                    waits.push(service_start - now);
                    total_time = total_time.max(departure);
                    self.state.clients.push(ClientRecord {
                        id: client_id,
                        counter_id: counter.id,
                        arrival: now,
                        service_start,
                        service_time,
                        departure,
                    });
                    events.push(Reverse(ScheduledEvent::new(
                        service_start,
                        Event::ServiceStart {
                            client_id,
                            counter_id: counter_idx,
                            queued,
                        },
                    )));
                }
                Event::ServiceStart {
                    client_id,
                    counter_id,
                    queued,
                } => {
                    if queued {
                        self.state.queue_len -= 1;
                    }
                    self.state.busy += 1;
                    let departure = self.state.clients[client_id - 1].departure;
                    events.push(Reverse(ScheduledEvent::new(
                        departure,
                        Event::ClientDeparture {
                            client_id,
                            counter_id,
                        },
                    )));
                }
                Event::ClientDeparture { .. } => {
                    self.state.busy -= 1;
                }
            }

            if store_records {
                timeline.push(TimelineFrame {
                    time: now,
                    queue_len: self.state.queue_len,
                    busy: self.state.busy,
                });
            }
        }

        let busy_time = self
            .state
            .counters
            .iter()
            .map(|counter| counter.busy_time)
            .sum::<f64>();
        let stats = ScenarioStats {
            counters: self.scenario.counters,
            clients: client_count,
            arrival_rate: self.scenario.arrival_rate,
            service_rate: self.scenario.service_rate,
            seed: self.scenario.seed,
            mean_wait: stats::mean(&waits),
            max_wait: waits.iter().copied().fold(0.0, f64::max),
            max_queue,
            served: self.state.clients.len(),
            total_time,
            utilization: stats::utilization(busy_time, self.scenario.counters, total_time),
            wait_percentiles: stats::wait_percentiles(&waits),
        };

        info!(
            counters = stats.counters,
            mean_wait = stats.mean_wait,
            max_queue = stats.max_queue,
            utilization = stats.utilization,
            "scenario complete"
        );

        SimulationResult {
            stats,
            clients: if store_records {
                std::mem::take(&mut self.state.clients)
            } else {
                Vec::new()
            },
            congestion_peaks,
            timeline,
        }
    }
}

/// Runs one scenario keeping per-client records and the event timeline.
pub fn simulate(scenario: &Scenario) -> Result<SimulationResult> {
    run_simulation_with_options(scenario, true)
}

/// Runs one scenario and returns only its statistics record.
pub fn run_scenario(scenario: &Scenario) -> Result<ScenarioStats> {
    run_simulation_with_options(scenario, false).map(|result| result.stats)
}

/// Runs each scenario independently, in the order given. Every scenario is
/// validated before the first one starts.
pub fn run_comparison(scenarios: &[Scenario]) -> Result<Vec<ScenarioStats>> {
    for scenario in scenarios {
        validate_scenario(scenario)?;
    }
    scenarios.iter().map(run_scenario).collect()
}

pub fn run_simulation_with_options(
    scenario: &Scenario,
    store_records: bool,
) -> Result<SimulationResult> {
    let engine = SimulationEngine::new(scenario.clone())?;
    Ok(engine.run(store_records))
}

pub fn validate_scenario(scenario: &Scenario) -> Result<()> {
    if scenario.counters == 0 {
        return Err(Error::CountersZero);
    }
    if scenario.clients == 0 {
        return Err(Error::ClientsZero);
    }
    if !is_valid_rate(scenario.arrival_rate) {
        return Err(Error::InvalidArrivalRate(scenario.arrival_rate));
    }
    if !is_valid_rate(scenario.service_rate) {
        return Err(Error::InvalidServiceRate(scenario.service_rate));
    }
    Ok(())
}
