use election::{RoundOutcome, BARRIER_1_PATH, ELECTION_PATH};

use crate::steps;
use crate::steps::ensemble;
use crate::steps::ghost::GhostCandidate;

/// Ensemble of three where one member passes the first barrier and never registers.
pub fn run() {
    let ensemble = ensemble::create_heuristic_ensemble(&[0.2, 0.4], Some(3), 0.0, steps::get_short_timings());
    let store = ensemble.store.clone();

    let ghost = GhostCandidate::new(&store, "ghost");
    ghost.join_first_barrier();

    let outcomes = ensemble.run_rounds(1);

    for candidate_outcomes in outcomes.values() {
        assert_eq!(vec![RoundOutcome::QuorumTimeout], *candidate_outcomes);
    }
    assert!(store.list_children(ELECTION_PATH).is_empty());
    assert_eq!(vec!["ghost".to_string()], store.list_children(BARRIER_1_PATH));

    ghost.close();
    assert!(store.list_children(BARRIER_1_PATH).is_empty());
}
