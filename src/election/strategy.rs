use crate::candidate::configuration::CandidateLabels;
use crate::experiment;
use crate::load::{LoadSampler, NULL_LOAD};
use crate::participant::{RegistrationRecord, RoundIdentity};

/// Random weight of a heuristic election when none is configured: the load alone decides.
pub const DEFAULT_HEURISTIC_RANDOM_WEIGHT: f64 = 0.0;

/// Random weight of a random election: the identity alone decides.
pub const RANDOM_ELECTION_WEIGHT: f64 = 1.0;

/// Ranking flavour of an election: what a candidate publishes when registering
/// and how much randomness the ranking uses.
pub trait RegistrationStrategy {
    fn random_weight(&self) -> f64;

    fn registration_record(&self, labels: &CandidateLabels, identity: RoundIdentity) -> RegistrationRecord;
}

/// Publishes the sampled host load with the registration.
#[derive(Debug)]
pub struct HeuristicRegistration<'a, Ls: LoadSampler> {
    load_sampler: &'a Ls,
    random_weight: f64,
}

impl<'a, Ls: LoadSampler> HeuristicRegistration<'a, Ls> {
    pub fn new(load_sampler: &'a Ls, random_weight: f64) -> HeuristicRegistration<'a, Ls> {
        HeuristicRegistration {
            load_sampler,
            random_weight,
        }
    }

    pub fn with_default_weight(load_sampler: &'a Ls) -> HeuristicRegistration<'a, Ls> {
        HeuristicRegistration::new(load_sampler, DEFAULT_HEURISTIC_RANDOM_WEIGHT)
    }
}

impl<'a, Ls: LoadSampler> RegistrationStrategy for HeuristicRegistration<'a, Ls> {
    fn random_weight(&self) -> f64 {
        self.random_weight
    }

    fn registration_record(&self, labels: &CandidateLabels, identity: RoundIdentity) -> RegistrationRecord {
        let load = self.load_sampler.sample_load();
        if load == NULL_LOAD {
            warn!("Load of {} is unavailable", labels.node_name);
        }
        experiment::print_load(labels, load);

        RegistrationRecord {
            hostname: labels.hostname.clone(),
            identity,
            load: Some(load),
        }
    }
}

/// Registers without a load. Peers rank it with the default load, which the
/// full random weight cancels out.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct RandomRegistration;

impl RegistrationStrategy for RandomRegistration {
    fn random_weight(&self) -> f64 {
        RANDOM_ELECTION_WEIGHT
    }

    fn registration_record(&self, labels: &CandidateLabels, identity: RoundIdentity) -> RegistrationRecord {
        RegistrationRecord {
            hostname: labels.hostname.clone(),
            identity,
            load: None,
        }
    }
}
