use election::{
    bootstrap_structures, child_path, CoordinationClient, CreateMode, RegistrationRecord, RoundIdentity,
    BARRIER_1_PATH, ELECTION_PATH,
};
use election_modules::{MemoryCoordinationStore, MemorySession};

/// Session that takes the first steps of a round by hand and then stops cooperating.
pub struct GhostCandidate {
    pub session: MemorySession,
    pub hostname: String,
}

impl GhostCandidate {
    pub fn new(store: &MemoryCoordinationStore, hostname: &str) -> GhostCandidate {
        let (session, _events) = store.open_session();
        bootstrap_structures(&session).expect("structures created");

        GhostCandidate {
            session,
            hostname: hostname.to_string(),
        }
    }

    pub fn join_first_barrier(&self) {
        self.session
            .create(&child_path(BARRIER_1_PATH, &self.hostname), None, CreateMode::Ephemeral)
            .expect("barrier child created");
    }

    pub fn leave_first_barrier(&self) {
        self.session
            .delete(&child_path(BARRIER_1_PATH, &self.hostname))
            .expect("barrier child deleted");
    }

    pub fn register(&self, load: f64) {
        let record = RegistrationRecord {
            hostname: self.hostname.clone(),
            identity: RoundIdentity::generate(),
            load: Some(load),
        };

        self.session
            .create(
                &child_path(ELECTION_PATH, &record.node_name()),
                Some(&record.payload()),
                CreateMode::Ephemeral,
            )
            .expect("registration created");
    }

    pub fn close(self) {
        self.session.close().expect("session closes");
    }
}
