use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{Error, Result};
use crate::output::format_result;
use crate::state::{ScenarioStats, SimulationResult};

const REPORT_SAMPLE: usize = 50;

pub fn detailed_report(result: &SimulationResult) -> String {
    let mut out = format_result(&result.stats);
    out.push_str("\nMax congestion moments (time, queue length when a new max was reached):\n");
    for peak in result.congestion_peaks.iter().take(REPORT_SAMPLE) {
        out.push_str(&format!("  t={:.2}  q={}\n", peak.time, peak.queue_len));
    }
    out.push_str(&format!("\nWait distribution (first {} values):\n", REPORT_SAMPLE));
    for client in result.clients.iter().take(REPORT_SAMPLE) {
        out.push_str(&format!("{:.4}\n", client.wait()));
    }
    out
}

pub fn comparison_report(stats: &[ScenarioStats]) -> String {
    let Some(first) = stats.first() else {
        return String::new();
    };
    let mut out = format!("Scenario comparison ({} clients)\n", first.clients);
    out.push_str(&format!(
        "arrival_rate={} service_rate={}",
        first.arrival_rate, first.service_rate
    ));
    if let Some(seed) = first.seed {
        out.push_str(&format!(" seed={}", seed));
    }
    out.push_str("\n\n");
    for entry in stats {
        out.push_str(&format!(
            "{} counter(s): avg_wait={:.4} max_queue={} util={:.4} total={:.2}\n",
            entry.counters, entry.mean_wait, entry.max_queue, entry.utilization, entry.total_time
        ));
    }
    out
}

pub fn write_detailed_report(result: &SimulationResult, dir: &Path) -> Result<PathBuf> {
    write_report(dir, "queue_report", &detailed_report(result))
}

pub fn write_comparison_report(stats: &[ScenarioStats], dir: &Path) -> Result<PathBuf> {
    write_report(dir, "queue_compare", &comparison_report(stats))
}

fn write_report(dir: &Path, prefix: &str, contents: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir).map_err(|err| {
        Error::ReportIo(format!(
            "failed to create reports directory '{}': {}",
            dir.display(),
            err
        ))
    })?;
    let path = report_path(dir, prefix);
    fs::write(&path, contents).map_err(|err| {
        Error::ReportIo(format!(
            "failed to write report '{}': {}",
            path.display(),
            err
        ))
    })?;
    info!(path = %path.display(), "report written");
    Ok(path)
}

fn report_path(dir: &Path, prefix: &str) -> PathBuf {
    let stamp = Local::now().format("%Y%m%d_%H%M%S");
    dir.join(format!("{}_{}.txt", prefix, stamp))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{run_comparison, simulate};
    use crate::models::Scenario;

    #[test]
    fn detailed_report_caps_wait_samples() {
        let result = simulate(&Scenario::new(1, 2.0, 1.0, 120).with_seed(3))
            .expect("simulation should succeed");
        let report = detailed_report(&result);
        let waits_section = report
            .split("Wait distribution (first 50 values):\n")
            .nth(1)
            .expect("wait section should be present");
        assert_eq!(waits_section.lines().count(), 50);
        assert!(report.starts_with("Simulation complete for 120 clients:"));
    }

    #[test]
    fn comparison_report_lists_scenarios_in_order() {
        let scenarios = vec![
            Scenario::new(2, 1.0, 0.7, 40).with_seed(1),
            Scenario::new(1, 1.0, 0.7, 40).with_seed(1),
        ];
        let stats = run_comparison(&scenarios).expect("comparison should succeed");
        let report = comparison_report(&stats);
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines[0], "Scenario comparison (40 clients)");
        assert_eq!(lines[1], "arrival_rate=1 service_rate=0.7 seed=1");
        assert!(lines[3].starts_with("2 counter(s): avg_wait="));
        assert!(lines[4].starts_with("1 counter(s): avg_wait="));
    }

    #[test]
    fn reports_are_written_under_new_directory() {
        let tmp = tempfile::tempdir().expect("temp dir should be created");
        let dir = tmp.path().join("nested").join("reports");
        let result = simulate(&Scenario::new(2, 1.0, 1.0, 10).with_seed(8))
            .expect("simulation should succeed");

        let path = write_detailed_report(&result, &dir).expect("report should be written");
        assert!(path.starts_with(&dir));
        let name = path.file_name().and_then(|name| name.to_str()).unwrap();
        assert!(name.starts_with("queue_report_") && name.ends_with(".txt"));
        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, detailed_report(&result));
    }
}
