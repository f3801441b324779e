//! # Barrier-synchronized leader election
//!
//! An ensemble of identical candidates elects exactly one leader per round, communicating
//! only through a hierarchical coordination store with persistent and ephemeral nodes.
//! Rounds are separated by two barriers; candidates register under a fresh random identity
//! and are ranked by a blend of their host load and that identity.

#![warn(missing_debug_implementations, unsafe_code)]

#[macro_use]
extern crate log;
#[macro_use]
extern crate crossbeam_channel;
#[macro_use]
extern crate derive_more;

mod candidate;
mod common;
mod coordination;
mod election;
mod errors;
mod experiment;
mod load;
mod participant;

pub use candidate::configuration::{validate_random_weight, CandidateConfiguration, CandidateLabels, Strategy};
pub use candidate::{Candidate, LeaderTask};
pub use common::{run_worker, Worker, WorkerPool};
pub use coordination::session::{colocated_store_address, Session, STORE_SERVICE_SUFFIX};
pub use coordination::{
    child_path, create_if_absent, delete_if_present, Connector, CoordinationClient, CreateMode, SessionEvent,
};
pub use election::strategy::{
    HeuristicRegistration, RandomRegistration, RegistrationStrategy, DEFAULT_HEURISTIC_RANDOM_WEIGHT,
    RANDOM_ELECTION_WEIGHT,
};
pub use election::{
    bootstrap_structures, Election, ElectionParams, ElectionTimings, RoundOutcome, BARRIER_1_PATH, BARRIER_2_PATH,
    ELECTION_PATH, STRUCTURAL_PATHS,
};
pub use errors::{new_err, ElectionError, ErrorKind};
pub use experiment::{LeadPhase, EXPERIMENT_TARGET};
pub use load::{LoadSampler, NULL_LOAD};
pub use participant::{extract_participants, winner, Participant, RegistrationRecord, RoundIdentity, DEFAULT_LOAD};

pub type CandidateWorker = Worker<ElectionError>;

/// Runs the candidate on its own thread until a fatal error occurs or the worker
/// is asked to terminate. The join handle yields the error that stopped it.
pub fn start_candidate<C, Ls, Lt>(candidate: Candidate<C, Ls, Lt>) -> CandidateWorker
where
    C: CoordinationClient,
    Ls: LoadSampler,
    Lt: LeaderTask,
{
    common::run_worker(candidate::run_candidate, candidate)
}
