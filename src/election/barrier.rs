use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, TryRecvError};

use crate::coordination::{child_path, create_if_absent, delete_if_present, CoordinationClient, CreateMode};
use crate::errors::{new_err, ErrorKind, Result};

/// Rendezvous point of the ensemble. Every candidate is represented by an ephemeral
/// child named after its hostname.
#[derive(Debug)]
pub struct Barrier<'a, C: CoordinationClient> {
    client: &'a C,
    path: &'a str,
    member_path: String,
    size: usize,
    poll_interval: Duration,
    interrupt_rx: &'a Receiver<()>,
}

impl<'a, C: CoordinationClient> Barrier<'a, C> {
    pub fn new(
        client: &'a C,
        path: &'a str,
        member: &str,
        size: usize,
        poll_interval: Duration,
        interrupt_rx: &'a Receiver<()>,
    ) -> Barrier<'a, C> {
        Barrier {
            client,
            path,
            member_path: child_path(path, member),
            size,
            poll_interval,
            interrupt_rx,
        }
    }

    /// Joins the barrier and waits until the whole ensemble joined.
    /// Returns false when the optional timeout expires first.
    pub fn enter(&self, timeout: Option<Duration>) -> Result<bool> {
        info!("Entering {}", self.path);
        create_if_absent(self.client, &self.member_path, None, CreateMode::Ephemeral)?;
        let started = Instant::now();

        loop {
            let members = self.client.children(self.path)?.len();
            if members >= self.size {
                return Ok(true);
            }

            if let Some(timeout) = timeout {
                if started.elapsed() >= timeout {
                    warn!(
                        "Timeout entering {}: {} of {} candidates present",
                        self.path, members, self.size
                    );
                    return Ok(false);
                }
            }

            trace!("Waiting at {}: {} of {} candidates present", self.path, members, self.size);
            pause(self.poll_interval, self.interrupt_rx)?;
        }
    }

    /// Removes this candidate from the barrier and waits until every other candidate left.
    pub fn leave(&self) -> Result<()> {
        delete_if_present(self.client, &self.member_path)?;

        while !self.client.children(self.path)?.is_empty() {
            pause(self.poll_interval, self.interrupt_rx)?;
        }
        info!("Leaving {}", self.path);

        Ok(())
    }

    /// Removes this candidate from the barrier without waiting for the others.
    pub fn withdraw(&self) -> Result<()> {
        info!("Withdrawing from {}", self.path);
        delete_if_present(self.client, &self.member_path)
    }
}

/// Sleeps for the poll interval unless a termination request arrives first.
pub(crate) fn pause(interval: Duration, interrupt_rx: &Receiver<()>) -> Result<()> {
    let timeout = crossbeam_channel::after(interval);
    select!(
        recv(interrupt_rx) -> _ => {
            return interrupted();
        },
        recv(timeout) -> _ => {},
    );

    Ok(())
}

/// Fails if a termination request is pending. Used by the polls that do not sleep.
pub(crate) fn check_interrupted(interrupt_rx: &Receiver<()>) -> Result<()> {
    match interrupt_rx.try_recv() {
        Err(TryRecvError::Empty) => Ok(()),
        _ => interrupted(),
    }
}

fn interrupted<T>() -> Result<T> {
    new_err(
        ErrorKind::Interrupted,
        "Election round interrupted".to_string(),
        String::new(),
    )
}
