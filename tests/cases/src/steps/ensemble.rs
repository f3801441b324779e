use std::collections::HashMap;
use std::sync::atomic::AtomicUsize;
use std::sync::Arc;
use std::thread;

use election::{ElectionTimings, RoundOutcome, Strategy};
use election_modules::MemoryCoordinationStore;

use super::{create_candidate, CandidateParams, CaseCandidate};

/// Candidates sharing one in-process store.
pub struct CaseEnsemble {
    pub store: MemoryCoordinationStore,
    pub candidates: Vec<CaseCandidate>,
    pub leaderships: Arc<AtomicUsize>,
}

pub fn hostname(idx: usize) -> String {
    format!("candidate-{}", idx)
}

/// Creates one heuristic candidate per load. The ensemble size is the number of loads
/// unless given explicitly.
pub fn create_heuristic_ensemble(
    loads: &[f64],
    ensemble_size: Option<usize>,
    random_weight: f64,
    timings: ElectionTimings,
) -> CaseEnsemble {
    let store = MemoryCoordinationStore::new();
    let leaderships = Arc::new(AtomicUsize::new(0));
    let ensemble_size = ensemble_size.unwrap_or_else(|| loads.len());

    let candidates = loads
        .iter()
        .enumerate()
        .map(|(idx, load)| {
            create_candidate(CandidateParams {
                store: &store,
                hostname: &hostname(idx + 1),
                ensemble_size,
                load: *load,
                random_weight,
                strategy: Strategy::Heuristic,
                timings,
                leaderships: leaderships.clone(),
            })
        })
        .collect();

    CaseEnsemble {
        store,
        candidates,
        leaderships,
    }
}

pub fn create_random_ensemble(size: usize, timings: ElectionTimings) -> CaseEnsemble {
    let store = MemoryCoordinationStore::new();
    let leaderships = Arc::new(AtomicUsize::new(0));

    let candidates = (1..=size)
        .map(|idx| {
            create_candidate(CandidateParams {
                store: &store,
                hostname: &hostname(idx),
                ensemble_size: size,
                load: 0.0,
                random_weight: 0.0,
                strategy: Strategy::Random,
                timings,
                leaderships: leaderships.clone(),
            })
        })
        .collect();

    CaseEnsemble {
        store,
        candidates,
        leaderships,
    }
}

impl CaseEnsemble {
    /// Runs the given number of consecutive rounds on every candidate, each on its own
    /// thread, and collects the outcomes per hostname.
    pub fn run_rounds(self, rounds: usize) -> HashMap<String, Vec<RoundOutcome>> {
        let mut handles = Vec::new();
        for candidate in self.candidates {
            let handle = thread::spawn(move || {
                let hostname = candidate.config().labels.hostname.clone();
                let random_weight = candidate.config().random_weight;

                let outcomes: Vec<RoundOutcome> = (0..rounds)
                    .map(|_| candidate.run_election(random_weight).expect("round completes"))
                    .collect();

                (hostname, outcomes)
            });
            handles.push(handle);
        }

        handles
            .into_iter()
            .map(|handle| handle.join().expect("candidate thread completes"))
            .collect()
    }
}

/// Hostnames of the candidates elected in the given round.
pub fn elected_in_round(outcomes: &HashMap<String, Vec<RoundOutcome>>, round: usize) -> Vec<String> {
    let mut elected: Vec<String> = outcomes
        .iter()
        .filter(|(_, rounds)| rounds[round].is_elected())
        .map(|(hostname, _)| hostname.clone())
        .collect();
    elected.sort();

    elected
}
