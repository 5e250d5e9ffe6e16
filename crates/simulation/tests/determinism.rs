//! Tests for deterministic simulation.
//!
//! Two runs built from the same configuration must agree bit for bit, both
//! in their aggregate results and in the exact sequence of processed events.

use qsim_simulation::{Simulation, SimulationConfig};
use tracing_test::traced_test;

fn high_load_config() -> SimulationConfig {
    SimulationConfig::new(4)
        .with_rho(0.9)
        .with_sim_time(100_000.0)
        .with_seeds(0, 1)
}

#[traced_test]
#[test]
fn test_identical_runs_match_exactly() {
    let mut a = Simulation::new(high_load_config()).unwrap();
    let mut b = Simulation::new(high_load_config()).unwrap();

    let first = a.run_to_time_limit().unwrap();
    let second = b.run_to_time_limit().unwrap();

    assert_eq!(
        first.blocking_probability.to_bits(),
        second.blocking_probability.to_bits(),
        "Blocking probability should be identical"
    );
    assert_eq!(
        first.system_utilization.to_bits(),
        second.system_utilization.to_bits(),
        "Utilization should be identical"
    );
    assert_eq!(first, second);
    assert_eq!(a.stats(), b.stats());
    assert_eq!(a.counters().report(), b.counters().report());
}

#[traced_test]
#[test]
fn test_identical_event_sequences() {
    let config = high_load_config().with_sim_time(2_000.0);
    let mut a = Simulation::new(config.clone()).unwrap();
    let mut b = Simulation::new(config).unwrap();
    a.enable_event_trace();
    b.enable_event_trace();

    a.run_to_time_limit().unwrap();
    b.run_to_time_limit().unwrap();

    let (ta, tb) = (a.event_trace().unwrap(), b.event_trace().unwrap());
    assert!(!ta.is_empty());
    assert_eq!(ta.len(), tb.len());
    for (x, y) in ta.iter().zip(tb) {
        assert_eq!(x.kind, y.kind);
        assert_eq!(x.timestamp.to_bits(), y.timestamp.to_bits());
    }
}

#[test]
fn test_different_seeds_diverge() {
    let mut a = Simulation::new(high_load_config().with_sim_time(5_000.0)).unwrap();
    let mut b = Simulation::new(high_load_config().with_sim_time(5_000.0).with_seeds(2, 3)).unwrap();

    let first = a.run_to_time_limit().unwrap();
    let second = b.run_to_time_limit().unwrap();
    assert_ne!(first, second);
}

#[test]
fn test_reset_replays_identically() {
    let config = high_load_config().with_sim_time(5_000.0);
    let mut sim = Simulation::new(config.clone()).unwrap();
    let first = sim.run_to_time_limit().unwrap();

    sim.reset().unwrap();
    let replay = sim.run_to_time_limit().unwrap();

    let fresh = Simulation::new(config).unwrap().run_to_time_limit().unwrap();
    assert_eq!(first, replay);
    assert_eq!(first, fresh);
}
