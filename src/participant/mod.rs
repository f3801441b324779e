use core::fmt;
use std::cmp::Ordering;

use uuid::Uuid;

use crate::errors::{new_err, ErrorKind, Result};
use crate::load::NULL_LOAD;

pub const NAME_IDENTITY_DELIMITER: char = '#';
pub const IDENTITY_LOAD_DELIMITER: char = '_';

/// Load assumed for records published without one, and for unavailable loads.
pub const DEFAULT_LOAD: f64 = 0.5;
pub const MAX_LOAD: f64 = 1.0;

/// Random identity of a candidate for a single round. A new one is generated
/// for every round so the random ranking component is redrawn each time.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct RoundIdentity(Uuid);

impl RoundIdentity {
    pub fn generate() -> RoundIdentity {
        RoundIdentity(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> RoundIdentity {
        RoundIdentity(uuid)
    }

    pub fn parse(identity: &str) -> Result<RoundIdentity> {
        match Uuid::parse_str(identity) {
            Ok(uuid) => Ok(RoundIdentity(uuid)),
            Err(err) => new_err(
                ErrorKind::MalformedRecord,
                format!("Invalid round identity '{}'", identity),
                err.to_string(),
            ),
        }
    }

    pub fn uuid(&self) -> Uuid {
        self.0
    }

    /// Maps the high 64 bits of the identity onto [0, 1].
    ///
    /// The bits are read as unsigned. Reading them as a signed value would put half
    /// of all identities below zero and favour them whenever the random weight is high.
    pub fn random_component(&self) -> f64 {
        let high = (self.0.as_u128() >> 64) as u64;

        high as f64 / u64::MAX as f64
    }
}

impl fmt::Display for RoundIdentity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Registration of a candidate for a round: `hostname#identity[_load]`.
/// The same string is used as the registration node name and its payload.
#[derive(Clone, Debug, PartialEq)]
pub struct RegistrationRecord {
    pub hostname: String,
    pub identity: RoundIdentity,
    pub load: Option<f64>,
}

impl RegistrationRecord {
    pub fn node_name(&self) -> String {
        match self.load {
            Some(load) => format!(
                "{}{}{}{}{}",
                self.hostname, NAME_IDENTITY_DELIMITER, self.identity, IDENTITY_LOAD_DELIMITER, load
            ),
            None => format!("{}{}{}", self.hostname, NAME_IDENTITY_DELIMITER, self.identity),
        }
    }

    pub fn payload(&self) -> Vec<u8> {
        self.node_name().into_bytes()
    }

    /// Parses a registration node name. The hostname is everything before the last
    /// `#`; the load, when present, follows the first `_` after the identity.
    pub fn parse(node_name: &str) -> Result<RegistrationRecord> {
        let (hostname, identity_and_load) = match node_name.rfind(NAME_IDENTITY_DELIMITER) {
            Some(idx) => (&node_name[..idx], &node_name[idx + 1..]),
            None => {
                return new_err(
                    ErrorKind::MalformedRecord,
                    format!("Registration '{}' has no identity", node_name),
                    String::new(),
                )
            }
        };

        let (identity, load) = match identity_and_load.find(IDENTITY_LOAD_DELIMITER) {
            Some(idx) => {
                let load_str = &identity_and_load[idx + 1..];
                let load = parse_load(node_name, load_str)?;
                (&identity_and_load[..idx], Some(load))
            }
            None => (identity_and_load, None),
        };

        Ok(RegistrationRecord {
            hostname: hostname.to_string(),
            identity: RoundIdentity::parse(identity)?,
            load,
        })
    }
}

fn parse_load(node_name: &str, load_str: &str) -> Result<f64> {
    match load_str.parse::<f64>() {
        Ok(load) if load.is_finite() => Ok(load),
        Ok(load) => new_err(
            ErrorKind::MalformedRecord,
            format!("Registration '{}' has a non-finite load", node_name),
            load.to_string(),
        ),
        Err(err) => new_err(
            ErrorKind::MalformedRecord,
            format!("Registration '{}' has an invalid load", node_name),
            err.to_string(),
        ),
    }
}

/// Registered candidate as seen by every other candidate of the round.
///
/// Participants are ordered by their order number, ties broken by identity,
/// so two participants compare equal only when their identities are equal.
#[derive(Clone, Debug)]
pub struct Participant {
    name: String,
    identity: RoundIdentity,
    load: f64,
    random_weight: f64,
}

impl Participant {
    /// Loads above 1.0 are clamped. The unavailable-load sentinel is replaced
    /// with `DEFAULT_LOAD`; other loads are kept as published.
    pub fn new(name: String, identity: RoundIdentity, load: f64, random_weight: f64) -> Participant {
        let load = if load > MAX_LOAD {
            MAX_LOAD
        } else if load == NULL_LOAD {
            DEFAULT_LOAD
        } else {
            load
        };

        Participant {
            name,
            identity,
            load,
            random_weight,
        }
    }

    pub fn from_record(record: RegistrationRecord, random_weight: f64) -> Participant {
        let load = record.load.unwrap_or(DEFAULT_LOAD);

        Participant::new(record.hostname, record.identity, load, random_weight)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn identity(&self) -> RoundIdentity {
        self.identity
    }

    pub fn load(&self) -> f64 {
        self.load
    }

    /// Weighted sum of the random component and the load, lowest wins.
    pub fn order_number(&self) -> f64 {
        self.random_weight * self.identity.random_component() + (1.0 - self.random_weight) * self.load
    }
}

impl Ord for Participant {
    fn cmp(&self, other: &Participant) -> Ordering {
        self.order_number()
            .partial_cmp(&other.order_number())
            .unwrap_or(Ordering::Equal)
            .then_with(|| self.identity.cmp(&other.identity))
    }
}

impl PartialOrd for Participant {
    fn partial_cmp(&self, other: &Participant) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Participant {
    fn eq(&self, other: &Participant) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Participant {}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}_{:.3}", self.name, self.load)
    }
}

/// Builds participants from the registration node names of a round.
/// Malformed registrations are skipped: every candidate skips the same ones.
pub fn extract_participants(registrations: &[String], random_weight: f64) -> Vec<Participant> {
    registrations
        .iter()
        .filter_map(|node_name| match RegistrationRecord::parse(node_name) {
            Ok(record) => Some(Participant::from_record(record, random_weight)),
            Err(err) => {
                warn!("Skipping registration: {}", err);
                None
            }
        })
        .collect()
}

/// Participant with the smallest order number.
pub fn winner(participants: &[Participant]) -> Option<&Participant> {
    participants.iter().min()
}
