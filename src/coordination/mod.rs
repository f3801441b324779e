pub mod session;

#[cfg(test)]
pub(crate) mod mock;

use crossbeam_channel::Receiver;

use crate::errors::{ElectionError, ErrorKind, Result};

/// Lifetime of a coordination node.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Display)]
pub enum CreateMode {
    /// Survives the creating session.
    Persistent,

    /// Removed by the store when the creating session ends.
    Ephemeral,
}

/// Session state notifications delivered by the store client.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Display)]
pub enum SessionEvent {
    Connected,
    Disconnected,
    Expired,
}

/// Hierarchical coordination store operations used by the election.
///
/// Implementations report `ErrorKind::NodeExists` when creating an occupied path and
/// `ErrorKind::NoSuchNode` when deleting or listing an absent one. Any other error is
/// treated as fatal for the current round.
pub trait CoordinationClient: Send + 'static {
    /// Creates a node with an optional payload. The parent must exist.
    fn create(&self, path: &str, payload: Option<&[u8]>, mode: CreateMode) -> std::result::Result<(), ElectionError>;

    /// Deletes a node regardless of its version.
    fn delete(&self, path: &str) -> std::result::Result<(), ElectionError>;

    /// Checks whether a node exists.
    fn exists(&self, path: &str) -> std::result::Result<bool, ElectionError>;

    /// Lists the names of the direct children of a node. Order is irrelevant.
    fn children(&self, path: &str) -> std::result::Result<Vec<String>, ElectionError>;

    /// Ends the session. Ephemeral nodes of the session are removed by the store.
    fn close(&self) -> std::result::Result<(), ElectionError>;
}

/// Opens store sessions.
pub trait Connector {
    type Client: CoordinationClient;

    /// Starts connecting to the store. The returned receiver delivers the session state
    /// changes, `SessionEvent::Connected` once the session is usable.
    fn open(&self, address: &str) -> std::result::Result<(Self::Client, Receiver<SessionEvent>), ElectionError>;
}

pub fn child_path(parent: &str, child: &str) -> String {
    format!("{}/{}", parent, child)
}

/// Creates a node, treating an existing node as success.
pub fn create_if_absent<C: CoordinationClient>(
    client: &C,
    path: &str,
    payload: Option<&[u8]>,
    mode: CreateMode,
) -> Result<()> {
    match client.create(path, payload, mode) {
        Err(ref err) if err.kind() == ErrorKind::NodeExists => {
            warn!("Node {} already exists", path);
            Ok(())
        }
        result => result,
    }
}

/// Deletes a node, treating an absent node as success.
pub fn delete_if_present<C: CoordinationClient>(client: &C, path: &str) -> Result<()> {
    match client.delete(path) {
        Ok(()) => {
            debug!("Deleted node {}", path);
            Ok(())
        }
        Err(ref err) if err.kind() == ErrorKind::NoSuchNode => {
            debug!("Node {} does not exist", path);
            Ok(())
        }
        Err(err) => Err(err),
    }
}

/// Creates a persistent node unless it exists. Safe to call concurrently from many candidates.
pub fn ensure_persistent<C: CoordinationClient>(client: &C, path: &str) -> Result<()> {
    if !client.exists(path)? {
        create_if_absent(client, path, None, CreateMode::Persistent)?;
    }
    Ok(())
}
