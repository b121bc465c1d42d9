//! Sequential playback of a solved path.
//!
//! [`Player`] is an explicit cursor advanced by the caller's own clock.
//! [`Playback`] drives the same cursor from a background thread at a fixed
//! cadence and can be stopped at any time without leaving timers behind.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::debug;

use crate::search::Solution;
use crate::state::PuzzleState;

/// One emitted step of a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Zero-based index into the path; step 0 is the start state.
    pub step: usize,
    pub state: PuzzleState,
}

/// Cursor over a complete path, yielding each state exactly once in order.
#[derive(Debug, Clone)]
pub struct Player {
    path: Vec<PuzzleState>,
    position: usize,
}

impl Player {
    pub fn new(path: Vec<PuzzleState>) -> Self {
        Self { path, position: 0 }
    }

    pub fn from_solution(solution: &Solution) -> Self {
        Self::new(solution.path.clone())
    }

    /// The state the next call to `next` will emit.
    pub fn peek(&self) -> Option<&PuzzleState> {
        self.path.get(self.position)
    }

    /// Number of frames emitted so far.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn remaining(&self) -> usize {
        self.path.len() - self.position
    }

    pub fn len(&self) -> usize {
        self.path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    pub fn is_finished(&self) -> bool {
        self.position >= self.path.len()
    }

    /// Restarts from the first state.
    pub fn rewind(&mut self) {
        self.position = 0;
    }
}

impl Iterator for Player {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        let state = self.path.get(self.position)?.clone();
        let frame = Frame {
            step: self.position,
            state,
        };
        self.position += 1;
        Some(frame)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining(), Some(self.remaining()))
    }
}

impl ExactSizeIterator for Player {}

/// How a playback run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackEnd {
    /// Frames delivered before the run ended.
    pub emitted: usize,
    /// `true` if stopped early (explicit stop, dropped handle or receiver).
    pub stopped: bool,
}

/// Handle to a running playback thread.
///
/// Dropping the handle stops playback and joins the thread.
#[derive(Debug)]
pub struct PlaybackHandle {
    stop_tx: Sender<()>,
    thread: Option<JoinHandle<PlaybackEnd>>,
}

impl PlaybackHandle {
    /// Stops playback and waits for the thread to finish.
    pub fn stop(mut self) -> PlaybackEnd {
        let _ = self.stop_tx.send(());
        self.finish()
    }

    /// Waits for playback to run to completion.
    pub fn join(mut self) -> PlaybackEnd {
        self.finish()
    }

    fn finish(&mut self) -> PlaybackEnd {
        match self.thread.take().map(JoinHandle::join) {
            Some(Ok(end)) => end,
            Some(Err(_)) | None => PlaybackEnd {
                emitted: 0,
                stopped: true,
            },
        }
    }
}

impl Drop for PlaybackHandle {
    fn drop(&mut self) {
        if let Some(thread) = self.thread.take() {
            let _ = self.stop_tx.send(());
            let _ = thread.join();
        }
    }
}

/// Fixed-cadence emitter.
pub struct Playback;

impl Playback {
    /// Starts emitting `player`'s remaining frames, one every `interval`.
    ///
    /// The first frame is sent immediately. Frames arrive on the returned
    /// receiver strictly in path order.
    pub fn start(player: Player, interval: Duration) -> (PlaybackHandle, Receiver<Frame>) {
        let (frame_tx, frame_rx) = mpsc::channel();
        let (stop_tx, stop_rx) = mpsc::channel();

        let thread = thread::spawn(move || run(player, interval, frame_tx, stop_rx));

        (
            PlaybackHandle {
                stop_tx,
                thread: Some(thread),
            },
            frame_rx,
        )
    }
}

fn run(
    mut player: Player,
    interval: Duration,
    frames: Sender<Frame>,
    stop: Receiver<()>,
) -> PlaybackEnd {
    debug!(event = "playback_start", frames = player.remaining());
    let mut emitted = 0;

    while let Some(frame) = player.next() {
        if frames.send(frame).is_err() {
            debug!(event = "playback_receiver_gone", emitted);
            return PlaybackEnd {
                emitted,
                stopped: true,
            };
        }
        emitted += 1;

        if player.is_finished() {
            break;
        }
        match stop.recv_timeout(interval) {
            Err(RecvTimeoutError::Timeout) => {}
            Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                debug!(event = "playback_stopped", emitted);
                return PlaybackEnd {
                    emitted,
                    stopped: true,
                };
            }
        }
    }

    debug!(event = "playback_end", emitted);
    PlaybackEnd {
        emitted,
        stopped: false,
    }
}
