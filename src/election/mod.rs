pub mod barrier;
pub mod strategy;

use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::Receiver;

use self::barrier::{check_interrupted, Barrier};
use self::strategy::RegistrationStrategy;
use crate::candidate::configuration::CandidateLabels;
use crate::coordination::{child_path, delete_if_present, ensure_persistent, CoordinationClient, CreateMode};
use crate::errors::Result;
use crate::participant::{extract_participants, winner, Participant, RoundIdentity};

pub const ELECTION_PATH: &str = "/election";
pub const BARRIER_1_PATH: &str = "/barrier1";
pub const BARRIER_2_PATH: &str = "/barrier2";

/// Persistent nodes shared by all rounds.
pub const STRUCTURAL_PATHS: [&str; 3] = [ELECTION_PATH, BARRIER_1_PATH, BARRIER_2_PATH];

/// Poll intervals and deadlines of an election round. Deadlines are measured from the
/// start of the corresponding wait.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct ElectionTimings {
    pub barrier_poll_interval: Duration,
    pub registration_timeout: Duration,
    pub barrier_timeout: Duration,
}

impl Default for ElectionTimings {
    fn default() -> Self {
        ElectionTimings {
            barrier_poll_interval: Duration::from_millis(1000),
            registration_timeout: Duration::from_millis(30_000),
            barrier_timeout: Duration::from_millis(30_000),
        }
    }
}

/// Result of a single round for one candidate.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Display)]
pub enum RoundOutcome {
    /// This candidate leads the round.
    Elected,

    /// Another candidate leads the round.
    NotElected,

    /// Not enough candidates registered in time.
    QuorumTimeout,

    /// Not enough candidates reached the second barrier in time.
    BarrierTimeout,
}

impl RoundOutcome {
    pub fn is_elected(self) -> bool {
        self == RoundOutcome::Elected
    }
}

#[derive(Debug)]
pub struct ElectionParams<'a, C, S>
where
    C: CoordinationClient,
    S: RegistrationStrategy,
{
    pub client: &'a C,
    pub strategy: &'a S,
    pub labels: &'a CandidateLabels,
    pub identity: RoundIdentity,
    pub ensemble_size: usize,
    pub timings: ElectionTimings,
    pub interrupt_rx: Receiver<()>,
}

/// One election round of one candidate.
///
/// A round goes through the following steps:
/// 1. wait at the first barrier until the whole ensemble is present;
/// 2. leave the second barrier of the previous round and wait until it drains;
/// 3. register;
/// 4. wait until the whole ensemble registered, or give up after the registration timeout;
/// 5. rank the registered participants;
/// 6. leave the first barrier and enter the second one, giving up after the barrier timeout;
/// 7. unregister.
///
/// A candidate that gives up at step 4 or 6 loses the round.
#[derive(Debug)]
pub struct Election<'a, C, S>
where
    C: CoordinationClient,
    S: RegistrationStrategy,
{
    client: &'a C,
    strategy: &'a S,
    labels: &'a CandidateLabels,
    identity: RoundIdentity,
    ensemble_size: usize,
    timings: ElectionTimings,
    interrupt_rx: Receiver<()>,
    registration_path: Option<String>,
}

/// Creates the persistent election and barrier nodes unless they exist.
pub fn bootstrap_structures<C: CoordinationClient>(client: &C) -> Result<()> {
    for path in STRUCTURAL_PATHS.iter() {
        ensure_persistent(client, path)?;
    }
    Ok(())
}

impl<'a, C, S> Election<'a, C, S>
where
    C: CoordinationClient,
    S: RegistrationStrategy,
{
    pub fn new(params: ElectionParams<'a, C, S>) -> Result<Election<'a, C, S>> {
        bootstrap_structures(params.client)?;

        Ok(Election {
            client: params.client,
            strategy: params.strategy,
            labels: params.labels,
            identity: params.identity,
            ensemble_size: params.ensemble_size,
            timings: params.timings,
            interrupt_rx: params.interrupt_rx,
            registration_path: None,
        })
    }

    pub fn identity(&self) -> RoundIdentity {
        self.identity
    }

    /// Runs the round to completion. Store failures and interruptions are returned as errors;
    /// timeouts are reported as lost rounds.
    pub fn wait_for_result(mut self) -> Result<RoundOutcome> {
        self.barrier(BARRIER_1_PATH).enter(None)?;

        self.barrier(BARRIER_2_PATH).leave()?;

        self.register()?;

        let registrations = match self.wait_for_registrations()? {
            Some(registrations) => registrations,
            None => {
                self.barrier(BARRIER_1_PATH).withdraw()?;
                self.unregister()?;
                return Ok(RoundOutcome::QuorumTimeout);
            }
        };

        info!("Determining the election result...");
        let participants = extract_participants(&registrations, self.strategy.random_weight());
        info!("Extracted election participants: {}", format_participants(&participants));
        let won = self.won_the_election(&participants);

        self.barrier(BARRIER_1_PATH).leave()?;
        let synchronized = self
            .barrier(BARRIER_2_PATH)
            .enter(Some(self.timings.barrier_timeout))?;

        self.unregister()?;

        let outcome = if !synchronized {
            RoundOutcome::BarrierTimeout
        } else if won {
            RoundOutcome::Elected
        } else {
            RoundOutcome::NotElected
        };
        debug!("Round {} finished: {}", self.identity, outcome);

        Ok(outcome)
    }

    fn barrier(&self, path: &'a str) -> Barrier<'_, C> {
        Barrier::new(
            self.client,
            path,
            &self.labels.hostname,
            self.ensemble_size,
            self.timings.barrier_poll_interval,
            &self.interrupt_rx,
        )
    }

    fn register(&mut self) -> Result<()> {
        let record = self.strategy.registration_record(self.labels, self.identity);
        let path = child_path(ELECTION_PATH, &record.node_name());

        info!("Registering with path: {}", path);
        self.client
            .create(&path, Some(&record.payload()), CreateMode::Ephemeral)?;
        self.registration_path = Some(path);

        Ok(())
    }

    fn unregister(&mut self) -> Result<()> {
        if let Some(path) = self.registration_path.take() {
            delete_if_present(self.client, &path)?;
        }
        Ok(())
    }

    /// Polls the registrations without sleeping. Returns None on timeout.
    fn wait_for_registrations(&self) -> Result<Option<Vec<String>>> {
        let started = Instant::now();
        let mut registrations = self.client.children(ELECTION_PATH)?;

        while registrations.len() < self.ensemble_size {
            if started.elapsed() >= self.timings.registration_timeout {
                warn!(
                    "Timeout waiting for registrations: {} of {} candidates registered",
                    registrations.len(),
                    self.ensemble_size
                );
                return Ok(None);
            }
            check_interrupted(&self.interrupt_rx)?;
            thread::yield_now();

            registrations = self.client.children(ELECTION_PATH)?;
        }

        Ok(Some(registrations))
    }

    fn won_the_election(&self, participants: &[Participant]) -> bool {
        let elected = match winner(participants) {
            Some(participant) => participant.identity() == self.identity,
            None => false,
        };

        if elected {
            info!("Won election!");
        } else {
            info!("Lost election...");
        }
        elected
    }
}

fn format_participants(participants: &[Participant]) -> String {
    let names: Vec<String> = participants.iter().map(|p| p.to_string()).collect();

    format!("[{}]", names.join(", "))
}
