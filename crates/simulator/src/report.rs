//! Human-readable and JSON reports.

use crate::ReplicationSummary;
use qsim_simulation::{CollectionReport, Simulation, SimulationConfig, SimulationResult};
use qsim_stats::{ConfidenceInterval, ReportDetail};
use serde::{Deserialize, Serialize};

/// Everything worth reporting about a single run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub config: SimulationConfig,
    pub result: SimulationResult,
    pub counters: CollectionReport,
    /// t interval for the mean waiting time, if defined.
    pub waiting_time_interval: Option<ConfidenceInterval>,
    pub events_processed: u64,
}

impl RunReport {
    /// Collect the report of a finished run.
    pub fn from_simulation(sim: &Simulation, result: SimulationResult) -> Self {
        Self {
            config: sim.config().clone(),
            result,
            counters: sim.counters().report(),
            waiting_time_interval: sim.waiting_time_confidence_interval().ok(),
            events_processed: sim.stats().events_processed,
        }
    }

    /// Print a boxed summary to stdout.
    pub fn print_summary(&self) {
        let r = &self.result;
        println!("\n═══════════════════════════════════════════");
        println!("         QUEUEING SIMULATION REPORT         ");
        println!("═══════════════════════════════════════════");
        println!();
        println!(
            "Station: S = {}, rho = {:.3}",
            self.config.buffer_size, self.config.rho
        );
        println!();
        println!("Packets:");
        println!("  Total:      {}", r.packets_total);
        println!("  Accepted:   {}", r.packets_accepted);
        println!("  Dropped:    {}", r.packets_dropped);
        println!("  Completed:  {}", r.packets_completed);
        println!();
        println!("Performance:");
        println!("  Blocking probability: {:.6}", r.blocking_probability);
        println!("  Utilization:          {:.6}", r.system_utilization);
        println!("  Mean queue length:    {:.6}", r.mean_queue_length);
        println!("  Throughput:           {:.6}", r.throughput);
        match (r.mean_waiting_time, &self.waiting_time_interval) {
            (Some(w), Some(ci)) => println!(
                "  Mean waiting time:    {w:.6} [{:.6}, {:.6}] (alpha = {})",
                ci.lower, ci.upper, ci.alpha
            ),
            (Some(w), None) => println!("  Mean waiting time:    {w:.6}"),
            _ => println!("  Mean waiting time:    n/a"),
        }
        println!();
        println!("Counters:");
        for report in self.counters.iter() {
            println!("  {report}");
            if let ReportDetail::Autocorrelation { lags } = &report.detail {
                let shown: Vec<String> = lags
                    .iter()
                    .take(6)
                    .map(|l| match l.correlation {
                        Some(c) => format!("{}:{c:.3}", l.lag),
                        None => format!("{}:n/a", l.lag),
                    })
                    .collect();
                println!("    lags {}", shown.join(" "));
            }
        }
        println!();
        println!(
            "Simulated time: {:.3} ({} events)",
            r.final_time, self.events_processed
        );
        println!("═══════════════════════════════════════════\n");
    }
}

fn print_interval(label: &str, ci: Option<&ConfidenceInterval>) {
    match ci {
        Some(ci) => println!(
            "  {label:<22}{:.6} ± {:.6}",
            ci.mean,
            ci.half_width()
        ),
        None => println!("  {label:<22}n/a"),
    }
}

impl ReplicationSummary {
    /// Print a boxed summary to stdout.
    pub fn print_summary(&self) {
        println!("\n═══════════════════════════════════════════");
        println!("          REPLICATION SUMMARY               ");
        println!("═══════════════════════════════════════════");
        println!();
        println!(
            "Station: S = {}, rho = {:.3}, {} replications ({:?})",
            self.config.buffer_size,
            self.config.rho,
            self.replications(),
            self.mode
        );
        println!();
        println!("Means (alpha = {}):", self.config.alpha);
        print_interval("Blocking probability:", self.blocking_probability.as_ref());
        print_interval("Utilization:", self.system_utilization.as_ref());
        print_interval("Mean waiting time:", self.mean_waiting_time.as_ref());
        println!();
        let packets: u64 = self.runs.iter().map(|r| r.packets_total).sum();
        let dropped: u64 = self.runs.iter().map(|r| r.packets_dropped).sum();
        println!("Packets: {packets} total, {dropped} dropped");
        println!("═══════════════════════════════════════════\n");
    }
}
