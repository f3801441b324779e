//! Single-line status records used for offline analysis of election timing and outcomes.
//! Records are logged on the `experiment` target.

use chrono::Utc;

use crate::candidate::configuration::CandidateLabels;

pub const EXPERIMENT_TARGET: &str = "experiment";
const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Display)]
pub enum LeadPhase {
    #[display(fmt = "START")]
    Start,
    #[display(fmt = "END")]
    End,
}

pub fn timestamp() -> String {
    Utc::now().format(TIME_FORMAT).to_string()
}

pub fn init_line(ensemble_size: usize, random_weight: f64) -> String {
    format!("INIT: ensemble size={}, random weight={:.6}", ensemble_size, random_weight)
}

pub fn load_line(timestamp: &str, labels: &CandidateLabels, load: f64) -> String {
    format!(
        "EXP-LOAD, {}, {}, {}, {:.6}",
        timestamp, labels.node_name, labels.hostname, load
    )
}

pub fn lead_line(timestamp: &str, labels: &CandidateLabels, phase: LeadPhase) -> String {
    format!(
        "EXP-LEAD, {}, {}, {}, {}",
        timestamp, labels.node_name, labels.hostname, phase
    )
}

pub fn print_init(ensemble_size: usize, random_weight: f64) {
    info!(target: EXPERIMENT_TARGET, "{}", init_line(ensemble_size, random_weight));
}

pub fn print_load(labels: &CandidateLabels, load: f64) {
    info!(target: EXPERIMENT_TARGET, "{}", load_line(&timestamp(), labels, load));
}

pub fn print_lead(labels: &CandidateLabels, phase: LeadPhase) {
    info!(target: EXPERIMENT_TARGET, "{}", lead_line(&timestamp(), labels, phase));
}
