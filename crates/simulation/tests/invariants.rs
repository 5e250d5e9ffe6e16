//! Invariants that must hold throughout a run.

use qsim_core::EventKind;
use qsim_simulation::{Simulation, SimulationConfig};
use qsim_stats::Counter;
use tracing_test::traced_test;

/// Blocking probability of an M/M/1 station with `places` room in total.
fn mm1k_blocking(rho: f64, places: i32) -> f64 {
    (1.0 - rho) * rho.powi(places) / (1.0 - rho.powi(places + 1))
}

#[traced_test]
#[test]
fn test_buffer_and_conservation_hold_at_every_step() {
    let buffer_size = 3;
    let config = SimulationConfig::new(buffer_size).with_rho(0.95);
    let mut sim = Simulation::new(config).unwrap();

    sim.run_to_packet_count_limit(1, false).unwrap();
    for _ in 0..2_000 {
        let result = sim.run_to_packet_count_limit(1, true).unwrap();

        assert!(
            sim.state().queue_length() <= buffer_size,
            "Buffer overflow: {} > {}",
            sim.state().queue_length(),
            buffer_size
        );
        assert_eq!(
            result.packets_total,
            result.packets_accepted + result.packets_dropped,
            "Conservation violated"
        );
        if sim.state().queue_length() > 0 {
            assert!(sim.state().is_busy(), "Packets waiting while server idle");
        }
    }
}

#[test]
fn test_time_is_monotonic() {
    let config = SimulationConfig::new(2).with_rho(0.7).with_sim_time(3_000.0);
    let mut sim = Simulation::new(config).unwrap();
    sim.enable_event_trace();
    sim.run_to_time_limit().unwrap();

    let trace = sim.event_trace().unwrap();
    for pair in trace.windows(2) {
        assert!(
            pair[0].timestamp <= pair[1].timestamp,
            "Time went backwards: {} -> {}",
            pair[0].timestamp,
            pair[1].timestamp
        );
    }
}

#[test]
fn test_every_completion_was_counted() {
    let config = SimulationConfig::new(4).with_rho(0.8).with_sim_time(10_000.0);
    let mut sim = Simulation::new(config).unwrap();
    let result = sim.run_to_time_limit().unwrap();

    let in_system = sim.state().queue_length() as u64 + u64::from(sim.state().is_busy());
    assert_eq!(result.packets_accepted, result.packets_completed + in_system);
    assert_eq!(
        sim.counters().waiting_time.sample_count() as u64,
        result.packets_completed
    );
    assert_eq!(
        sim.stats().events_by_kind[EventKind::ServiceCompletion.index()],
        result.packets_completed
    );
}

#[traced_test]
#[test]
fn test_long_run_matches_queueing_theory() {
    let rho = 0.5;
    let config = SimulationConfig::new(4).with_rho(rho).with_sim_time(100_000.0);
    let mut sim = Simulation::new(config).unwrap();
    let result = sim.run_to_time_limit().unwrap();

    // Four waiting places plus the server.
    let expected_blocking = mm1k_blocking(rho, 5);
    assert!(
        (result.blocking_probability - expected_blocking).abs() < 0.005,
        "blocking {} vs {}",
        result.blocking_probability,
        expected_blocking
    );

    let expected_utilization = rho * (1.0 - expected_blocking);
    assert!(
        (result.system_utilization - expected_utilization).abs() < 0.02,
        "utilization {} vs {}",
        result.system_utilization,
        expected_utilization
    );

    // Service time is drawn independently of the inter-arrival time.
    let report = sim.counters().iat_service.report();
    let correlation = sim.counters().iat_service.correlation().unwrap();
    assert!(correlation.abs() < 0.05, "{report}");

    // System time contains service time.
    assert!(sim.counters().service_system.correlation().unwrap() > 0.3);
}
