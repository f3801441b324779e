use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

use crossbeam_channel::{Receiver, Sender};
use parking_lot::Mutex;

use election::{new_err, Connector, CoordinationClient, CreateMode, ElectionError, ErrorKind, SessionEvent};

const ROOT_PATH: &str = "/";

/// In-process hierarchical coordination store. Shared between sessions by cloning.
/// Ephemeral nodes are removed when the owning session is closed or expired.
#[derive(Clone, Debug, Default)]
pub struct MemoryCoordinationStore {
    store: Arc<Mutex<StoreInternal>>,
}

/// Client handle of a single store session.
#[derive(Clone, Debug)]
pub struct MemorySession {
    id: u64,
    store: MemoryCoordinationStore,
}

#[derive(Clone, Debug)]
struct Node {
    payload: Vec<u8>,
    mode: CreateMode,
    owner: u64,
    children: BTreeSet<String>,
}

#[derive(Debug)]
struct StoreInternal {
    nodes: BTreeMap<String, Node>,
    sessions: HashMap<u64, Sender<SessionEvent>>,
    last_session_id: u64,
}

impl Default for StoreInternal {
    fn default() -> Self {
        let mut nodes = BTreeMap::new();
        nodes.insert(
            ROOT_PATH.to_string(),
            Node {
                payload: Vec::new(),
                mode: CreateMode::Persistent,
                owner: 0,
                children: BTreeSet::new(),
            },
        );

        StoreInternal {
            nodes,
            sessions: HashMap::new(),
            last_session_id: 0,
        }
    }
}

fn split_path(path: &str) -> Result<(&str, &str), ElectionError> {
    let invalid = !path.starts_with('/') || path.len() < 2 || path.ends_with('/') || path.contains("//");
    if invalid {
        return new_err(
            ErrorKind::NoSuchNode,
            format!("Invalid node path: {}", path),
            String::new(),
        );
    }

    match path.rfind('/') {
        Some(0) => Ok((ROOT_PATH, &path[1..])),
        Some(idx) => Ok((&path[..idx], &path[idx + 1..])),
        None => new_err(ErrorKind::NoSuchNode, format!("Invalid node path: {}", path), String::new()),
    }
}

fn expired_err<T>(session_id: u64) -> Result<T, ElectionError> {
    new_err(
        ErrorKind::SessionExpired,
        format!("Session {} is closed", session_id),
        String::new(),
    )
}

impl StoreInternal {
    fn check_session(&self, session_id: u64) -> Result<(), ElectionError> {
        if !self.sessions.contains_key(&session_id) {
            return expired_err(session_id);
        }
        Ok(())
    }

    fn create(&mut self, session_id: u64, path: &str, payload: &[u8], mode: CreateMode) -> Result<(), ElectionError> {
        self.check_session(session_id)?;
        let (parent_path, name) = split_path(path)?;

        if self.nodes.contains_key(path) {
            return new_err(ErrorKind::NodeExists, format!("Node {} exists", path), String::new());
        }

        match self.nodes.get_mut(parent_path) {
            Some(parent) => {
                parent.children.insert(name.to_string());
            }
            None => {
                return new_err(
                    ErrorKind::NoSuchNode,
                    format!("Parent node {} does not exist", parent_path),
                    String::new(),
                )
            }
        }

        trace!("Session {} created {} node {}", session_id, mode, path);
        self.nodes.insert(
            path.to_string(),
            Node {
                payload: payload.to_vec(),
                mode,
                owner: session_id,
                children: BTreeSet::new(),
            },
        );
        Ok(())
    }

    fn delete(&mut self, path: &str) -> Result<(), ElectionError> {
        let (parent_path, name) = split_path(path)?;

        match self.nodes.get(path) {
            None => return new_err(ErrorKind::NoSuchNode, format!("Node {} does not exist", path), String::new()),
            Some(node) if !node.children.is_empty() => {
                return new_err(ErrorKind::NotEmpty, format!("Node {} has children", path), String::new())
            }
            Some(_) => {}
        }

        self.nodes.remove(path);
        if let Some(parent) = self.nodes.get_mut(parent_path) {
            parent.children.remove(name);
        }
        Ok(())
    }

    fn children(&self, path: &str) -> Result<Vec<String>, ElectionError> {
        match self.nodes.get(path) {
            Some(node) => Ok(node.children.iter().cloned().collect()),
            None => new_err(ErrorKind::NoSuchNode, format!("Node {} does not exist", path), String::new()),
        }
    }

    fn open_session(&mut self, events_tx: Sender<SessionEvent>) -> u64 {
        self.last_session_id += 1;
        self.sessions.insert(self.last_session_id, events_tx);

        self.last_session_id
    }

    // Removes the session and its ephemeral nodes, deepest first.
    fn end_session(&mut self, session_id: u64) -> Option<Sender<SessionEvent>> {
        let events_tx = self.sessions.remove(&session_id)?;

        let mut ephemerals: Vec<String> = self
            .nodes
            .iter()
            .filter(|(_, node)| node.mode == CreateMode::Ephemeral && node.owner == session_id)
            .map(|(path, _)| path.clone())
            .collect();
        ephemerals.sort_by_key(|path| std::cmp::Reverse(path.matches('/').count()));

        for path in ephemerals {
            if let Err(err) = self.delete(&path) {
                warn!("Cannot remove ephemeral node {} of session {}: {}", path, session_id, err);
            }
        }

        Some(events_tx)
    }
}

impl MemoryCoordinationStore {
    pub fn new() -> MemoryCoordinationStore {
        MemoryCoordinationStore::default()
    }

    /// Opens a session directly, without the connection handshake.
    pub fn open_session(&self) -> (MemorySession, Receiver<SessionEvent>) {
        let (events_tx, events_rx) = crossbeam_channel::unbounded();
        let id = self.store.lock().open_session(events_tx.clone());

        if events_tx.send(SessionEvent::Connected).is_err() {
            warn!("Session {} event receiver is gone", id);
        }
        debug!("Session {} opened", id);

        let session = MemorySession {
            id,
            store: self.clone(),
        };
        (session, events_rx)
    }

    /// Expires a session as the store would after missed heartbeats. Its ephemeral
    /// nodes are removed and the session receives `SessionEvent::Expired`.
    pub fn expire_session(&self, session_id: u64) -> bool {
        let events_tx = self.store.lock().end_session(session_id);

        match events_tx {
            Some(events_tx) => {
                info!("Session {} expired", session_id);
                if events_tx.send(SessionEvent::Expired).is_err() {
                    debug!("Session {} event receiver is gone", session_id);
                }
                true
            }
            None => false,
        }
    }

    /// Lists the children of a node regardless of session state. Absent nodes have no children.
    pub fn list_children(&self, path: &str) -> Vec<String> {
        self.store.lock().children(path).unwrap_or_default()
    }

    pub fn node_payload(&self, path: &str) -> Option<Vec<u8>> {
        self.store.lock().nodes.get(path).map(|node| node.payload.clone())
    }

    pub fn node_exists(&self, path: &str) -> bool {
        self.store.lock().nodes.contains_key(path)
    }

    pub fn session_count(&self) -> usize {
        self.store.lock().sessions.len()
    }
}

impl Connector for MemoryCoordinationStore {
    type Client = MemorySession;

    fn open(&self, address: &str) -> Result<(MemorySession, Receiver<SessionEvent>), ElectionError> {
        debug!("Opening in-process store session for address {}", address);

        Ok(self.open_session())
    }
}

impl MemorySession {
    pub fn id(&self) -> u64 {
        self.id
    }
}

impl CoordinationClient for MemorySession {
    fn create(&self, path: &str, payload: Option<&[u8]>, mode: CreateMode) -> Result<(), ElectionError> {
        self.store
            .store
            .lock()
            .create(self.id, path, payload.unwrap_or_default(), mode)
    }

    fn delete(&self, path: &str) -> Result<(), ElectionError> {
        let mut store = self.store.store.lock();
        store.check_session(self.id)?;

        store.delete(path)
    }

    fn exists(&self, path: &str) -> Result<bool, ElectionError> {
        let store = self.store.store.lock();
        store.check_session(self.id)?;

        Ok(store.nodes.contains_key(path))
    }

    fn children(&self, path: &str) -> Result<Vec<String>, ElectionError> {
        let store = self.store.store.lock();
        store.check_session(self.id)?;

        store.children(path)
    }

    fn close(&self) -> Result<(), ElectionError> {
        let events_tx = self.store.store.lock().end_session(self.id);

        match events_tx {
            Some(_) => {
                debug!("Session {} closed", self.id);
                Ok(())
            }
            None => expired_err(self.id),
        }
    }
}
