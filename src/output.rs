use serde::Serialize;

use crate::state::{CongestionPeak, ScenarioStats, SimulationResult, TimelineFrame};

const BAR_WIDTH: usize = 40;

/// What a run produced: one full result, or one stats record per compared
/// scenario in the order requested.
pub enum RunOutput {
    Single(SimulationResult),
    Comparison(Vec<ScenarioStats>),
}

impl RunOutput {
    pub fn scenarios(&self) -> Vec<&ScenarioStats> {
        match self {
            RunOutput::Single(result) => vec![&result.stats],
            RunOutput::Comparison(stats) => stats.iter().collect(),
        }
    }
}

pub trait Formatter {
    fn write(&self, output: &RunOutput) -> String;
}

pub struct HumanFormatter;
pub struct SummaryFormatter;
pub struct JsonFormatter;

impl Formatter for HumanFormatter {
    fn write(&self, output: &RunOutput) -> String {
        match output {
            RunOutput::Single(result) => format_result(&result.stats),
            RunOutput::Comparison(stats) => format_comparison(stats),
        }
    }
}

impl Formatter for SummaryFormatter {
    fn write(&self, output: &RunOutput) -> String {
        output
            .scenarios()
            .into_iter()
            .map(|stats| {
                format!(
                    "{} counter(s): mean wait {:.2} min, max congestion {}\n",
                    stats.counters, stats.mean_wait, stats.max_queue
                )
            })
            .collect()
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    scenarios: Vec<&'a ScenarioStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    congestion_peaks: Option<&'a [CongestionPeak]>,
}

impl Formatter for JsonFormatter {
    fn write(&self, output: &RunOutput) -> String {
        let report = JsonReport {
            scenarios: output.scenarios(),
            congestion_peaks: match output {
                RunOutput::Single(result) => Some(result.congestion_peaks.as_slice()),
                RunOutput::Comparison(_) => None,
            },
        };
        match serde_json::to_string_pretty(&report) {
            Ok(json) => format!("{}\n", json),
            Err(err) => format!("{{\"error\": \"{}\"}}\n", err),
        }
    }
}

pub fn format_result(stats: &ScenarioStats) -> String {
    let mut lines = vec![
        format!("Simulation complete for {} clients:", stats.clients),
        format!("  Counters: {}", stats.counters),
        format!("  Arrival rate (lambda): {}", stats.arrival_rate),
        format!("  Service rate (mu): {}", stats.service_rate),
    ];
    if let Some(seed) = stats.seed {
        lines.push(format!("  Seed: {}", seed));
    }
    lines.extend([
        format!("  Mean wait: {:.2} minutes", stats.mean_wait),
        format!("  Max congestion: {} clients in queue", stats.max_queue),
        format!("  Clients served: {}", stats.served),
        format!("  Total simulated time: {:.2} minutes", stats.total_time),
        format!("  Counter utilization: {:.1}%", stats.utilization * 100.0),
        "  Wait statistics (minutes):".to_string(),
        format!("    max: {:.2}", stats.max_wait),
        format!("    p50: {:.2}", stats.wait_percentiles.p50),
        format!("    p90: {:.2}", stats.wait_percentiles.p90),
        format!("    p95: {:.2}", stats.wait_percentiles.p95),
        format!("    p99: {:.2}", stats.wait_percentiles.p99),
    ]);
    lines.join("\n") + "\n"
}

pub fn format_comparison(stats: &[ScenarioStats]) -> String {
    let Some(first) = stats.first() else {
        return String::new();
    };
    let mut out = format!(
        "Scenario comparison ({} clients, lambda={}, mu={}",
        first.clients, first.arrival_rate, first.service_rate
    );
    if let Some(seed) = first.seed {
        out.push_str(&format!(", seed={}", seed));
    }
    out.push_str("):\n");
    for entry in stats {
        out.push_str(&format!(
            "  {} counter(s): mean wait {:.2} min, max congestion {}, utilization {:.1}%\n",
            entry.counters,
            entry.mean_wait,
            entry.max_queue,
            entry.utilization * 100.0
        ));
    }
    out
}

/// Text bars of queue length and busy counters for every event up to
/// `duration` simulated minutes.
pub fn render_timeline(timeline: &[TimelineFrame], duration: f64) -> String {
    let mut out = String::from("Timeline:\n");
    for frame in timeline.iter().take_while(|frame| frame.time <= duration) {
        let queue_bar = "█".repeat(frame.queue_len.min(BAR_WIDTH));
        let busy_bar = "▓".repeat(frame.busy.min(BAR_WIDTH));
        out.push_str(&format!(
            "t={:7.2} | queue={:3} {:<width$} | busy={:2} {}\n",
            frame.time,
            frame.queue_len,
            queue_bar,
            frame.busy,
            busy_bar,
            width = BAR_WIDTH
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::WaitPercentiles;

    fn stats(counters: usize, mean_wait: f64, max_queue: usize) -> ScenarioStats {
        ScenarioStats {
            counters,
            clients: 10,
            arrival_rate: 1.0,
            service_rate: 0.5,
            seed: Some(42),
            mean_wait,
            max_wait: 4.0,
            max_queue,
            served: 10,
            total_time: 20.0,
            utilization: 0.75,
            wait_percentiles: WaitPercentiles {
                p50: 1.0,
                p90: 2.5,
                p95: 3.0,
                p99: 3.5,
            },
        }
    }

    fn single(stats: ScenarioStats) -> RunOutput {
        RunOutput::Single(SimulationResult {
            stats,
            clients: Vec::new(),
            congestion_peaks: vec![CongestionPeak {
                time: 1.5,
                queue_len: 1,
            }],
            timeline: Vec::new(),
        })
    }

    #[test]
    fn human_single_lists_all_stats() {
        let expected = concat!(
            "Simulation complete for 10 clients:\n",
            "  Counters: 1\n",
            "  Arrival rate (lambda): 1\n",
            "  Service rate (mu): 0.5\n",
            "  Seed: 42\n",
            "  Mean wait: 1.23 minutes\n",
            "  Max congestion: 3 clients in queue\n",
            "  Clients served: 10\n",
            "  Total simulated time: 20.00 minutes\n",
            "  Counter utilization: 75.0%\n",
            "  Wait statistics (minutes):\n",
            "    max: 4.00\n",
            "    p50: 1.00\n",
            "    p90: 2.50\n",
            "    p95: 3.00\n",
            "    p99: 3.50\n",
        );
        assert_eq!(HumanFormatter.write(&single(stats(1, 1.234, 3))), expected);
    }

    #[test]
    fn human_comparison_keeps_order() {
        let output = RunOutput::Comparison(vec![stats(3, 0.1, 0), stats(1, 2.0, 5)]);
        let expected = concat!(
            "Scenario comparison (10 clients, lambda=1, mu=0.5, seed=42):\n",
            "  3 counter(s): mean wait 0.10 min, max congestion 0, utilization 75.0%\n",
            "  1 counter(s): mean wait 2.00 min, max congestion 5, utilization 75.0%\n",
        );
        assert_eq!(HumanFormatter.write(&output), expected);
    }

    #[test]
    fn summary_prints_one_line_per_scenario() {
        let output = RunOutput::Comparison(vec![stats(1, 2.0, 5), stats(2, 0.5, 1)]);
        assert_eq!(
            SummaryFormatter.write(&output),
            "1 counter(s): mean wait 2.00 min, max congestion 5\n\
             2 counter(s): mean wait 0.50 min, max congestion 1\n"
        );
    }

    #[test]
    fn json_single_includes_congestion_peaks() {
        let json = JsonFormatter.write(&single(stats(1, 1.0, 1)));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["scenarios"][0]["counters"], 1);
        assert_eq!(value["scenarios"][0]["max_queue"], 1);
        assert_eq!(value["congestion_peaks"][0]["queue_len"], 1);
    }

    #[test]
    fn json_comparison_omits_congestion_peaks() {
        let json = JsonFormatter.write(&RunOutput::Comparison(vec![stats(2, 1.0, 1)]));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value.get("congestion_peaks").is_none());
        assert_eq!(value["scenarios"].as_array().map(Vec::len), Some(1));
    }

    #[test]
    fn timeline_stops_at_duration() {
        let frames = [
            TimelineFrame {
                time: 0.5,
                queue_len: 0,
                busy: 1,
            },
            TimelineFrame {
                time: 1.0,
                queue_len: 2,
                busy: 1,
            },
            TimelineFrame {
                time: 5.0,
                queue_len: 1,
                busy: 1,
            },
        ];
        let rendered = render_timeline(&frames, 1.0);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Timeline:");
        assert!(lines[2].starts_with("t=   1.00 | queue=  2 ██"));
        assert!(lines[2].ends_with("| busy= 1 ▓"));
    }
}
