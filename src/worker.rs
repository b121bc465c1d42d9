//! Background solving with cancellation and deadlines.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::debug;

use crate::config::SearchConfig;
use crate::error::PuzzleError;
use crate::search::{Solution, Solver};
use crate::state::PuzzleState;

type SolveResult = Result<Solution, PuzzleError>;

/// A search running on its own thread.
///
/// The search state is owned by that thread alone; cancelling simply makes
/// the search return early and drop it. Dropping the task cancels it.
#[derive(Debug)]
pub struct SolveTask {
    cancel: Arc<AtomicBool>,
    result_rx: Receiver<SolveResult>,
    thread: Option<JoinHandle<()>>,
}

/// Starts solving `start` -> `goal` on a background thread.
pub fn spawn_solve(start: PuzzleState, goal: PuzzleState, config: SearchConfig) -> SolveTask {
    let cancel = Arc::new(AtomicBool::new(false));
    let (result_tx, result_rx) = mpsc::channel();

    let flag = Arc::clone(&cancel);
    let thread = thread::spawn(move || {
        let result = Solver::new(config)
            .with_cancel_flag(&flag)
            .solve(&start, &goal);
        // the receiver may already be gone if the task was dropped
        let _ = result_tx.send(result);
    });

    SolveTask {
        cancel,
        result_rx,
        thread: Some(thread),
    }
}

impl SolveTask {
    /// Requests cancellation; the search stops before its next expansion.
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    /// Returns `true` once the search thread has returned.
    pub fn is_finished(&self) -> bool {
        self.thread.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Blocks until the search finishes.
    pub fn wait(mut self) -> SolveResult {
        let result = self.result_rx.recv().unwrap_or(Err(PuzzleError::Cancelled));
        self.join();
        result
    }

    /// Blocks for at most `timeout`, cancelling the search if it is still
    /// running by then.
    ///
    /// A search that completes while being cancelled still returns its
    /// solution.
    pub fn wait_timeout(mut self, timeout: Duration) -> SolveResult {
        let result = match self.result_rx.recv_timeout(timeout) {
            Ok(result) => result,
            Err(RecvTimeoutError::Timeout) => {
                debug!(event = "solve_deadline", timeout_ms = timeout.as_millis() as u64);
                self.cancel();
                self.result_rx.recv().unwrap_or(Err(PuzzleError::Cancelled))
            }
            Err(RecvTimeoutError::Disconnected) => Err(PuzzleError::Cancelled),
        };
        self.join();
        result
    }

    fn join(&mut self) {
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

impl Drop for SolveTask {
    fn drop(&mut self) {
        if self.thread.is_some() {
            self.cancel();
            self.join();
        }
    }
}
