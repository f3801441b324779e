pub mod configuration;

use crossbeam_channel::Receiver;

use self::configuration::{validate_random_weight, CandidateConfiguration, Strategy};
use crate::coordination::session::Session;
use crate::coordination::CoordinationClient;
use crate::election::strategy::{HeuristicRegistration, RandomRegistration, RegistrationStrategy};
use crate::election::{Election, ElectionParams, RoundOutcome};
use crate::errors::{ElectionError, Result};
use crate::experiment::{self, LeadPhase};
use crate::load::LoadSampler;
use crate::participant::RoundIdentity;

/// Privileged work performed by the elected candidate, once per won round.
pub trait LeaderTask: Send + 'static {
    fn lead(&mut self) -> std::result::Result<(), ElectionError>;
}

impl<F> LeaderTask for F
where
    F: FnMut() -> std::result::Result<(), ElectionError> + Send + 'static,
{
    fn lead(&mut self) -> std::result::Result<(), ElectionError> {
        self()
    }
}

/// Candidate of the ensemble. Takes part in one election round after another and
/// runs the leader task whenever it wins.
#[derive(Debug)]
pub struct Candidate<C, Ls, Lt>
where
    C: CoordinationClient,
    Ls: LoadSampler,
    Lt: LeaderTask,
{
    session: Session<C>,
    config: CandidateConfiguration,
    load_sampler: Ls,
    leader_task: Lt,
    interrupt_rx: Receiver<()>,
}

impl<C, Ls, Lt> Candidate<C, Ls, Lt>
where
    C: CoordinationClient,
    Ls: LoadSampler,
    Lt: LeaderTask,
{
    pub fn new(
        session: Session<C>,
        config: CandidateConfiguration,
        load_sampler: Ls,
        leader_task: Lt,
    ) -> Result<Candidate<C, Ls, Lt>> {
        config.validate()?;
        experiment::print_init(config.ensemble_size, config.effective_random_weight());

        Ok(Candidate {
            session,
            config,
            load_sampler,
            leader_task,
            interrupt_rx: crossbeam_channel::never(),
        })
    }

    /// Makes running rounds stop with an `Interrupted` error once the receiver
    /// yields a message or disconnects.
    pub fn with_interrupt(mut self, interrupt_rx: Receiver<()>) -> Candidate<C, Ls, Lt> {
        self.interrupt_rx = interrupt_rx;
        self
    }

    pub fn config(&self) -> &CandidateConfiguration {
        &self.config
    }

    pub fn session(&self) -> &Session<C> {
        &self.session
    }

    /// Takes part in a single round under a fresh round identity.
    /// The random weight applies to heuristic elections only.
    pub fn run_election(&self, random_weight: f64) -> Result<RoundOutcome> {
        match self.config.strategy {
            Strategy::Heuristic => {
                validate_random_weight(random_weight)?;
                let strategy = HeuristicRegistration::new(&self.load_sampler, random_weight);
                self.run_round(&strategy)
            }
            Strategy::Random => self.run_round(&RandomRegistration),
        }
    }

    fn run_round<S: RegistrationStrategy>(&self, strategy: &S) -> Result<RoundOutcome> {
        let election = Election::new(ElectionParams {
            client: self.session.client(),
            strategy,
            labels: &self.config.labels,
            identity: RoundIdentity::generate(),
            ensemble_size: self.config.ensemble_size,
            timings: self.config.timings,
            interrupt_rx: self.interrupt_rx.clone(),
        })?;

        debug!("Candidate {} joined round {}", self.config.labels.hostname, election.identity());
        election.wait_for_result()
    }

    /// Runs rounds until a fatal error occurs. The session is closed before the
    /// error is returned, which drops every ephemeral node of this candidate.
    pub fn run(mut self) -> ElectionError {
        let err = loop {
            if let Err(err) = self.lead_round() {
                break err;
            }
        };
        error!("Candidate {} stopped: {}", self.config.labels.hostname, err);

        if let Err(close_err) = self.session.close() {
            error!("Cannot close the coordination store session: {}", close_err);
        }
        err
    }

    fn lead_round(&mut self) -> Result<()> {
        info!("Candidate {} running for leader (again)...", self.config.labels.hostname);

        let outcome = self.run_election(self.config.random_weight)?;
        if outcome.is_elected() {
            experiment::print_lead(&self.config.labels, LeadPhase::Start);
            self.leader_task.lead()?;
            experiment::print_lead(&self.config.labels, LeadPhase::End);
        }
        Ok(())
    }
}

/// Worker entry point: runs the candidate until a fatal error or termination request.
pub fn run_candidate<C, Ls, Lt>(candidate: Candidate<C, Ls, Lt>, terminate_worker_rx: Receiver<()>) -> ElectionError
where
    C: CoordinationClient,
    Ls: LoadSampler,
    Lt: LeaderTask,
{
    candidate.with_interrupt(terminate_worker_rx).run()
}
