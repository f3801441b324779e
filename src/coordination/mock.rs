//! Single-threaded store used by unit tests.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

use crossbeam_channel::{Receiver, Sender};

use super::{CoordinationClient, Connector, CreateMode, SessionEvent};
use crate::errors::{new_err, ElectionError, ErrorKind};

#[derive(Debug, Default)]
pub(crate) struct MockStore {
    nodes: RefCell<BTreeMap<String, CreateMode>>,
    expired: Cell<bool>,
}

impl MockStore {
    fn prefix(path: &str) -> String {
        if path == "/" {
            path.to_string()
        } else {
            format!("{}/", path)
        }
    }

    fn parent(path: &str) -> &str {
        match path.rfind('/') {
            Some(0) | None => "/",
            Some(idx) => &path[..idx],
        }
    }

    fn check_session(&self) -> Result<(), ElectionError> {
        if self.expired.get() {
            return new_err(ErrorKind::SessionExpired, "Session expired".to_string(), String::new());
        }
        Ok(())
    }
}

impl CoordinationClient for MockStore {
    fn create(&self, path: &str, _payload: Option<&[u8]>, mode: CreateMode) -> Result<(), ElectionError> {
        self.check_session()?;
        let parent = MockStore::parent(path);
        if parent != "/" && !self.exists(parent)? {
            return new_err(ErrorKind::NoSuchNode, parent.to_string(), String::new());
        }
        if self.exists(path)? {
            return new_err(ErrorKind::NodeExists, path.to_string(), String::new());
        }
        self.nodes.borrow_mut().insert(path.to_string(), mode);
        Ok(())
    }

    fn delete(&self, path: &str) -> Result<(), ElectionError> {
        self.check_session()?;
        match self.nodes.borrow_mut().remove(path) {
            Some(_) => Ok(()),
            None => new_err(ErrorKind::NoSuchNode, path.to_string(), String::new()),
        }
    }

    fn exists(&self, path: &str) -> Result<bool, ElectionError> {
        self.check_session()?;
        Ok(self.nodes.borrow().contains_key(path))
    }

    fn children(&self, path: &str) -> Result<Vec<String>, ElectionError> {
        self.check_session()?;
        let prefix = MockStore::prefix(path);
        let children: Vec<String> = self
            .nodes
            .borrow()
            .keys()
            .filter_map(|key| {
                if key.starts_with(&prefix) && !key[prefix.len()..].contains('/') {
                    Some(key[prefix.len()..].to_string())
                } else {
                    None
                }
            })
            .collect();
        Ok(children)
    }

    fn close(&self) -> Result<(), ElectionError> {
        self.expired.set(true);
        Ok(())
    }
}

#[derive(Debug, Default)]
pub(crate) struct MockConnector;

impl Connector for MockConnector {
    type Client = MockStore;

    fn open(&self, _address: &str) -> Result<(MockStore, Receiver<SessionEvent>), ElectionError> {
        let (tx, rx): (Sender<SessionEvent>, Receiver<SessionEvent>) = crossbeam_channel::unbounded();
        tx.send(SessionEvent::Connected)
            .expect("can send session event");

        Ok((MockStore::default(), rx))
    }
}
