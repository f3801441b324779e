use std::thread;
use std::thread::JoinHandle;

use crossbeam_channel::{Receiver, Sender};

/// Thread running a long-lived routine that stops on a termination request.
#[derive(Debug)]
pub struct Worker<R> {
    pub join_handle: JoinHandle<R>,
    pub terminate_worker_tx: Sender<()>,
}

pub fn run_worker<T, R, F>(worker: F, params: T) -> Worker<R>
where
    T: Send + 'static,
    R: Send + 'static,
    F: FnOnce(T, Receiver<()>) -> R + Send + 'static,
{
    let (terminate_worker_tx, terminate_worker_rx): (Sender<()>, Receiver<()>) = crossbeam_channel::unbounded();

    let join_handle = thread::spawn(move || worker(params, terminate_worker_rx));

    Worker {
        join_handle,
        terminate_worker_tx,
    }
}

#[derive(Debug)]
pub struct WorkerPool<R> {
    workers: Vec<Worker<R>>,
}

impl<R> WorkerPool<R> {
    pub fn new(workers: Vec<Worker<R>>) -> WorkerPool<R> {
        WorkerPool { workers }
    }

    pub fn len(&self) -> usize {
        self.workers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workers.is_empty()
    }

    pub fn terminate(&self) {
        for worker in &self.workers {
            let send_result = worker.terminate_worker_tx.send(());
            if send_result.is_err() {
                error!("Cannot send termination signal")
            }
        }
    }

    /// Waits for every worker. Workers that panicked are logged and left out.
    pub fn join(self) -> Vec<R> {
        let mut results = Vec::new();
        for worker in self.workers {
            match worker.join_handle.join() {
                Ok(result) => results.push(result),
                Err(_) => error!("Worker panicked"),
            }
        }
        results
    }
}
