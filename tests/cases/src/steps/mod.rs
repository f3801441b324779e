use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use election::{
    Candidate, CandidateConfiguration, CandidateLabels, ElectionError, ElectionTimings, LeaderTask, Session,
    Strategy,
};
use election_modules::{FixedLoadSampler, MemoryCoordinationStore, MemorySession};

pub mod ensemble;
pub mod ghost;

pub const STORE_ADDRESS: &str = "inproc-store";

pub type CaseCandidate = Candidate<MemorySession, FixedLoadSampler, CountingLeaderTask>;

pub fn sleep_ms(millis: u64) {
    thread::sleep(Duration::from_millis(millis));
}

pub fn init_test_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Fast rounds with deadlines long enough for a loaded test machine.
pub fn get_timings() -> ElectionTimings {
    ElectionTimings {
        barrier_poll_interval: Duration::from_millis(20),
        registration_timeout: Duration::from_millis(3000),
        barrier_timeout: Duration::from_millis(3000),
    }
}

/// Short deadlines for the cases expecting a round to give up.
pub fn get_short_timings() -> ElectionTimings {
    ElectionTimings {
        barrier_poll_interval: Duration::from_millis(20),
        registration_timeout: Duration::from_millis(300),
        barrier_timeout: Duration::from_millis(300),
    }
}

pub fn get_labels(hostname: &str) -> CandidateLabels {
    CandidateLabels {
        hostname: hostname.to_string(),
        node_name: format!("{}-node", hostname),
    }
}

pub fn connect(store: &MemoryCoordinationStore) -> Session<MemorySession> {
    Session::connect(store, STORE_ADDRESS).expect("in-process store connects")
}

/// Counts the won rounds of the candidates sharing the counter.
#[derive(Clone, Debug, Default)]
pub struct CountingLeaderTask {
    leaderships: Arc<AtomicUsize>,
}

impl CountingLeaderTask {
    pub fn new(leaderships: Arc<AtomicUsize>) -> CountingLeaderTask {
        CountingLeaderTask { leaderships }
    }
}

impl LeaderTask for CountingLeaderTask {
    fn lead(&mut self) -> Result<(), ElectionError> {
        self.leaderships.fetch_add(1, Ordering::SeqCst);
        sleep_ms(10);
        Ok(())
    }
}

pub struct CandidateParams<'a> {
    pub store: &'a MemoryCoordinationStore,
    pub hostname: &'a str,
    pub ensemble_size: usize,
    pub load: f64,
    pub random_weight: f64,
    pub strategy: Strategy,
    pub timings: ElectionTimings,
    pub leaderships: Arc<AtomicUsize>,
}

pub fn create_candidate(params: CandidateParams) -> CaseCandidate {
    let mut config = CandidateConfiguration::new(get_labels(params.hostname), params.ensemble_size);
    config.random_weight = params.random_weight;
    config.strategy = params.strategy;
    config.timings = params.timings;

    Candidate::new(
        connect(params.store),
        config,
        FixedLoadSampler::new(params.load),
        CountingLeaderTask::new(params.leaderships),
    )
    .expect("valid candidate configuration")
}

/// Polls the condition until it holds or the timeout expires.
pub fn wait_until<F: Fn() -> bool>(condition: F, timeout: Duration) -> bool {
    let started = Instant::now();
    while started.elapsed() < timeout {
        if condition() {
            return true;
        }
        sleep_ms(10);
    }

    condition()
}
