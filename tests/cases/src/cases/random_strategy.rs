use election::{RoundOutcome, ELECTION_PATH};

use crate::steps;
use crate::steps::ensemble;

pub fn run() {
    let rounds = 3;
    let ensemble = ensemble::create_random_ensemble(4, steps::get_timings());
    let store = ensemble.store.clone();

    let outcomes = ensemble.run_rounds(rounds);

    for round in 0..rounds {
        let elected = ensemble::elected_in_round(&outcomes, round);
        info!("Round {} elected {:?}", round, elected);
        assert_eq!(1, elected.len());

        for candidate_outcomes in outcomes.values() {
            assert_ne!(RoundOutcome::QuorumTimeout, candidate_outcomes[round]);
            assert_ne!(RoundOutcome::BarrierTimeout, candidate_outcomes[round]);
        }
    }
    assert!(store.list_children(ELECTION_PATH).is_empty());
}
