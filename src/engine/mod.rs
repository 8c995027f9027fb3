//! Stepwise sorting execution engine
//!
//! This module provides the core playback logic:
//! - [`continuation`]: per-algorithm continuation states (the tagged
//!   "where execution currently is" union)
//! - [`bubble`], [`merge`], [`quick`]: the three step machines
//! - [`errors`]: engine error types
//!
//! # Execution Model
//!
//! A sort runs as a sequence of micro-steps: the smallest unit of progress
//! that triggers one render and one delay (a single comparison, swap, or
//! element write). The [`Engine`] owns the shared mutable state of a
//! session — sequence, continuation, snapshot history, generation token —
//! and a cooperative playback driver advances it one micro-step per
//! elapsed delay. Before each micro-step a full snapshot is pushed, so the
//! session can be rewound to any prior micro-step exactly.
//!
//! # Cancellation
//!
//! `reset` bumps the generation token synchronously. A driver loop bound
//! to an older generation observes the mismatch at its next suspension
//! check and dies silently, performing zero side effects; this is normal
//! control flow, not an error.

pub mod bubble;
pub mod continuation;
pub mod errors;
pub mod merge;
pub mod quick;

use std::time::{Duration, Instant};

use rand::seq::SliceRandom;

use crate::engine::continuation::{Algorithm, Continuation};
use crate::engine::errors::EngineError;
use crate::history::{History, HistoryEntry};
use crate::render::{HighlightSpec, Renderer};

/// Default snapshot history budget (256 MB).
pub const DEFAULT_HISTORY_LIMIT: usize = 256 * 1024 * 1024;

/// Which delay knob a control call adjusts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelayKind {
    /// Primary delay after each comparison render.
    Step,
    /// Secondary delay after each swap render (bubble, quick). Zero skips
    /// the wait but never the render.
    Swap,
    /// Secondary delay for merge comparisons; element writes wait half of
    /// it.
    Merge,
}

/// Configured inter-step delays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delays {
    pub step: Duration,
    pub swap: Duration,
    pub merge: Duration,
}

impl Delays {
    /// All delays zero; renders still happen, waits do not.
    pub fn zero() -> Self {
        Delays {
            step: Duration::ZERO,
            swap: Duration::ZERO,
            merge: Duration::ZERO,
        }
    }

    fn set(&mut self, kind: DelayKind, millis: u64) {
        let d = Duration::from_millis(millis);
        match kind {
            DelayKind::Step => self.step = d,
            DelayKind::Swap => self.swap = d,
            DelayKind::Merge => self.merge = d,
        }
    }
}

impl Default for Delays {
    /// 300 ms everywhere, matching the original visualizer's defaults.
    fn default() -> Self {
        Delays {
            step: Duration::from_millis(300),
            swap: Duration::from_millis(300),
            merge: Duration::from_millis(300),
        }
    }
}

/// Result of one driver iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The sort suspended; the driver should wake again after `wait`.
    Suspended { wait: Duration },
    /// The sort ran out of micro-steps; playback stopped.
    Completed,
}

/// Handle for the single active playback loop of a session.
///
/// Captures the generation at `start()`; a bumped generation at the next
/// tick means this loop was orphaned by a reset and must die without
/// touching anything.
#[derive(Debug, Clone, Copy)]
struct Driver {
    generation: u64,
    next_step_at: Instant,
}

/// The session object: all shared mutable state of one visualization run.
///
/// Everything the control surface and the playback driver touch lives
/// here — there is no ambient global state. Exactly one driver loop may be
/// alive per session; `start` while one is alive is a no-op.
pub struct Engine {
    /// Working array; a permutation of `[0, size)` after `reset(size)`.
    sequence: Vec<u32>,

    /// Session identity; bumped only by reset.
    generation: u64,

    /// Whether playback is running. Cleared by pause, completion, rewind,
    /// and reset; observed by the driver at each suspension check.
    playing: bool,

    /// Where the active sort currently is; `None` when idle or complete.
    continuation: Option<Continuation>,

    /// Selected algorithm for the current session.
    algorithm: Algorithm,

    /// Snapshot stack for rewind.
    history: History,

    /// Configured inter-step delays.
    delays: Delays,

    /// The (at most one) active playback loop.
    driver: Option<Driver>,

    /// Highlight currently on screen; snapshotted into history entries so
    /// rewind can repaint the exact prior frame.
    last_highlight: HighlightSpec,
}

impl Engine {
    /// Create an engine with an empty sequence. Call [`Engine::reset`]
    /// (or [`Engine::reset_with`]) before starting playback.
    pub fn new(algorithm: Algorithm, history_memory_limit: usize) -> Self {
        Engine {
            sequence: Vec::new(),
            generation: 0,
            playing: false,
            continuation: None,
            algorithm,
            history: History::new(history_memory_limit),
            delays: Delays::default(),
            driver: None,
            last_highlight: HighlightSpec::new(),
        }
    }

    // ========== Control surface ==========

    /// Begin (or resume) playback. A no-op while a loop is already alive
    /// for the current generation. Seeds a fresh continuation when no sort
    /// is mid-flight, so starting on a finished session re-sorts.
    pub fn start(&mut self) {
        self.start_at(Instant::now());
    }

    /// [`Engine::start`] with an explicit clock, for deterministic tests.
    pub fn start_at(&mut self, now: Instant) {
        let loop_alive = self.playing
            && self
                .driver
                .as_ref()
                .is_some_and(|d| d.generation == self.generation);
        if loop_alive || self.sequence.len() < 2 {
            return;
        }

        if self.continuation.is_none() {
            self.continuation = Some(Continuation::initial(self.algorithm, self.sequence.len()));
        }
        self.playing = true;
        self.driver = Some(Driver {
            generation: self.generation,
            next_step_at: now,
        });
    }

    /// Stop playback at the next suspension check. The continuation is
    /// kept, so a later `start` resumes exactly where it left off.
    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// Step back one micro-step, restoring sequence and continuation to
    /// exactly the values captured before it. Pauses first (the original
    /// visualizer force-pauses on rewind); a no-op when the history is
    /// empty. Never touches the generation.
    pub fn rewind(&mut self, renderer: &mut dyn Renderer) {
        self.playing = false;
        self.driver = None;

        if let Some(entry) = self.history.pop() {
            self.sequence = entry.sequence;
            self.continuation = entry.continuation;
            self.last_highlight = entry.highlight;
            renderer.render(&self.sequence, &self.last_highlight);
        }
    }

    /// Start a new session over a uniformly shuffled permutation of
    /// `[0, size)`. Bumps the generation (orphaning any in-flight loop),
    /// clears the history and continuation, stops playback, and renders
    /// the fresh array unhighlighted. Sizes below 2 are rejected and
    /// nothing changes.
    pub fn reset(&mut self, size: usize, renderer: &mut dyn Renderer) -> Result<(), EngineError> {
        if size < 2 {
            return Err(EngineError::InvalidSize { size });
        }

        let mut values: Vec<u32> = (0..size as u32).collect();
        values.shuffle(&mut rand::rng());
        self.install(values, renderer);
        Ok(())
    }

    /// Start a new session over a fixed dataset instead of a shuffle.
    /// Same semantics as [`Engine::reset`] otherwise.
    pub fn reset_with(
        &mut self,
        values: Vec<u32>,
        renderer: &mut dyn Renderer,
    ) -> Result<(), EngineError> {
        if values.len() < 2 {
            return Err(EngineError::InvalidSize { size: values.len() });
        }

        self.install(values, renderer);
        Ok(())
    }

    fn install(&mut self, values: Vec<u32>, renderer: &mut dyn Renderer) {
        self.generation += 1;
        self.playing = false;
        self.continuation = None;
        self.history.clear();
        self.sequence = values;
        self.last_highlight = HighlightSpec::new();
        renderer.render(&self.sequence, &self.last_highlight);
    }

    /// Switch algorithms. Resets the session over a fresh shuffle of the
    /// current size; a no-op when the algorithm is already selected.
    pub fn set_algorithm(
        &mut self,
        algorithm: Algorithm,
        renderer: &mut dyn Renderer,
    ) -> Result<(), EngineError> {
        if algorithm == self.algorithm {
            return Ok(());
        }
        self.algorithm = algorithm;
        self.reset(self.sequence.len(), renderer)
    }

    /// Adjust one delay knob. Takes effect from the next micro-step.
    pub fn set_delay(&mut self, kind: DelayKind, millis: u64) {
        self.delays.set(kind, millis);
    }

    /// Advance a single micro-step manually while paused (the forward
    /// button of the original UI). Ignored while playback is running.
    pub fn step_forward(&mut self, renderer: &mut dyn Renderer) -> Result<(), EngineError> {
        if self.playing || self.sequence.len() < 2 {
            return Ok(());
        }
        if self.continuation.is_none() {
            self.continuation = Some(Continuation::initial(self.algorithm, self.sequence.len()));
        }
        self.step_once(renderer).map(|_| ())
    }

    // ========== Playback driver ==========

    /// One iteration of the cooperative playback loop. The UI calls this
    /// every event-loop pass; between any two micro-steps the driver
    /// re-checks, in order: that its generation is still current (a stale
    /// loop dies silently with zero side effects), that playback has not
    /// been paused (the continuation survives), and that the configured
    /// delay has elapsed.
    pub fn tick(
        &mut self,
        now: Instant,
        renderer: &mut dyn Renderer,
    ) -> Result<(), EngineError> {
        let Some(driver) = self.driver else {
            return Ok(());
        };

        if driver.generation != self.generation {
            // Orphaned by a reset; die without touching anything.
            self.driver = None;
            return Ok(());
        }
        if !self.playing {
            // Suspend, keeping the continuation for a later start.
            self.driver = None;
            return Ok(());
        }
        if now < driver.next_step_at {
            return Ok(());
        }

        match self.step_once(renderer) {
            Ok(StepOutcome::Suspended { wait }) => {
                self.driver = Some(Driver {
                    generation: driver.generation,
                    next_step_at: now + wait,
                });
                Ok(())
            }
            Ok(StepOutcome::Completed) => {
                self.driver = None;
                Ok(())
            }
            Err(e) => {
                self.playing = false;
                self.driver = None;
                Err(e)
            }
        }
    }

    /// Execute exactly one micro-step: push the pre-step snapshot, advance
    /// the continuation, render. On completion the continuation is cleared,
    /// playback stops, and the final frame renders unhighlighted.
    fn step_once(&mut self, renderer: &mut dyn Renderer) -> Result<StepOutcome, EngineError> {
        let n = self.sequence.len();

        let complete = match &self.continuation {
            None => true,
            Some(cont) => cont.is_complete(n),
        };
        if complete {
            self.continuation = None;
            self.playing = false;
            self.last_highlight = HighlightSpec::new();
            renderer.render(&self.sequence, &self.last_highlight);
            return Ok(StepOutcome::Completed);
        }

        // Snapshot before any mutation; a failed push means the step
        // simply does not happen.
        self.history
            .push(HistoryEntry {
                sequence: self.sequence.clone(),
                continuation: self.continuation.clone(),
                highlight: self.last_highlight.clone(),
            })
            .map_err(|_| EngineError::HistoryLimitExceeded {
                current: self.history.memory_usage(),
                limit: self.history.memory_limit(),
            })?;

        if let Some(cont) = self.continuation.as_mut() {
            let step = cont.advance(&mut self.sequence, &self.delays);
            renderer.render(&self.sequence, &step.highlight);
            self.last_highlight = step.highlight;
            Ok(StepOutcome::Suspended { wait: step.wait })
        } else {
            Ok(StepOutcome::Completed)
        }
    }

    // ========== Getter methods for UI ==========

    /// The working array.
    pub fn sequence(&self) -> &[u32] {
        &self.sequence
    }

    /// Current generation token.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether playback is running.
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Where the active sort currently is, if one is mid-flight.
    pub fn continuation(&self) -> Option<&Continuation> {
        self.continuation.as_ref()
    }

    /// Selected algorithm.
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Number of forward micro-steps currently rewindable.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Estimated snapshot memory in use.
    pub fn history_memory(&self) -> usize {
        self.history.memory_usage()
    }

    /// Configured delays.
    pub fn delays(&self) -> Delays {
        self.delays
    }
}
