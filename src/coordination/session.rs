use crossbeam_channel::Receiver;

use super::{CoordinationClient, Connector, SessionEvent};
use crate::errors::{new_err, ErrorKind, Result};

/// Suffix of the headless service name the store nodes are reachable through.
pub const STORE_SERVICE_SUFFIX: &str = ".zk-hs.mtd.svc.cluster.local";

/// Address of the store instance co-located with the given host.
pub fn colocated_store_address(hostname: &str) -> String {
    format!("{}{}", hostname, STORE_SERVICE_SUFFIX)
}

/// Established store session. Closing it removes the ephemeral nodes of this candidate.
#[derive(Debug)]
pub struct Session<C: CoordinationClient> {
    client: C,
    address: String,
}

impl<C: CoordinationClient> Session<C> {
    /// Connects to the store and blocks until the session is usable.
    /// Connection errors are returned as is: there is no retry at this level.
    pub fn connect<Cn>(connector: &Cn, address: &str) -> Result<Session<C>>
    where
        Cn: Connector<Client = C>,
    {
        info!("Connecting to the coordination store at {}", address);
        let (client, events) = connector.open(address)?;

        await_connected(&events, address)?;
        info!("Connected to the coordination store at {}", address);

        Ok(Session {
            client,
            address: address.to_string(),
        })
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn close(self) -> Result<()> {
        info!("Closing the coordination store session at {}", self.address);
        self.client.close()
    }
}

fn await_connected(events: &Receiver<SessionEvent>, address: &str) -> Result<()> {
    loop {
        match events.recv() {
            Ok(SessionEvent::Connected) => return Ok(()),
            Ok(SessionEvent::Disconnected) => {
                debug!("Session to {} is not connected yet", address);
            }
            Ok(SessionEvent::Expired) => {
                return new_err(
                    ErrorKind::ConnectionLoss,
                    format!("Cannot connect to {}", address),
                    "session expired before it was established".to_string(),
                );
            }
            Err(err) => {
                return new_err(
                    ErrorKind::ConnectionLoss,
                    format!("Cannot connect to {}", address),
                    err.to_string(),
                );
            }
        }
    }
}
