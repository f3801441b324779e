use crate::election::strategy::{DEFAULT_HEURISTIC_RANDOM_WEIGHT, RANDOM_ELECTION_WEIGHT};
use crate::election::ElectionTimings;
use crate::errors::{new_err, ErrorKind, Result};
use crate::participant::NAME_IDENTITY_DELIMITER;

/// Names of the process running a candidate.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct CandidateLabels {
    /// Stable per-process key of the barrier and registration nodes.
    pub hostname: String,

    /// Name of the cluster node the process runs on. Diagnostics only.
    pub node_name: String,
}

/// Ranking flavour used by the candidate.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Display)]
pub enum Strategy {
    /// Lowest load wins, blended with the configured random weight.
    Heuristic,

    /// Random identity alone decides.
    Random,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CandidateConfiguration {
    pub labels: CandidateLabels,

    /// Number of candidates expected in every round.
    pub ensemble_size: usize,

    /// Weight of the random ranking component, between 0.0 and 1.0. Heuristic elections only.
    pub random_weight: f64,

    pub strategy: Strategy,
    pub timings: ElectionTimings,
}

impl CandidateConfiguration {
    /// Heuristic configuration with the default random weight and timings.
    pub fn new(labels: CandidateLabels, ensemble_size: usize) -> CandidateConfiguration {
        CandidateConfiguration {
            labels,
            ensemble_size,
            random_weight: DEFAULT_HEURISTIC_RANDOM_WEIGHT,
            strategy: Strategy::Heuristic,
            timings: ElectionTimings::default(),
        }
    }

    /// Random weight the rankings of this candidate actually use.
    pub fn effective_random_weight(&self) -> f64 {
        match self.strategy {
            Strategy::Heuristic => self.random_weight,
            Strategy::Random => RANDOM_ELECTION_WEIGHT,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.ensemble_size == 0 {
            return new_err(
                ErrorKind::InvalidConfiguration,
                "Ensemble size must be positive".to_string(),
                String::new(),
            );
        }

        validate_random_weight(self.random_weight)?;

        let hostname = &self.labels.hostname;
        if hostname.is_empty() || hostname.contains(NAME_IDENTITY_DELIMITER) || hostname.contains('/') {
            return new_err(
                ErrorKind::InvalidConfiguration,
                format!("Invalid hostname '{}'", hostname),
                format!("hostname must be non-empty and contain neither '{}' nor '/'", NAME_IDENTITY_DELIMITER),
            );
        }

        Ok(())
    }
}

pub fn validate_random_weight(random_weight: f64) -> Result<()> {
    if !(random_weight >= 0.0 && random_weight <= 1.0) {
        return new_err(
            ErrorKind::InvalidConfiguration,
            format!("The provided weight {} is outside the valid range [0, 1]", random_weight),
            String::new(),
        );
    }
    Ok(())
}
