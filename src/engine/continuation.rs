//! Per-algorithm continuation states behind one tagged union.
//!
//! A continuation is the minimal data needed to resume a sort at its next
//! micro-step: loop indices for bubble, an emulated call stack for merge,
//! a range stack plus partition sub-state for quick. The engine snapshots
//! it wholesale into history entries, so every field must clone cheaply
//! and compare structurally.

use std::time::Duration;

use crate::engine::bubble::BubbleState;
use crate::engine::merge::MergeState;
use crate::engine::quick::QuickState;
use crate::engine::Delays;
use crate::render::HighlightSpec;

/// Which sorting algorithm a session runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    Bubble,
    Merge,
    Quick,
}

impl Algorithm {
    /// Parse a command-line name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "bubble" | "bubble-sort" => Some(Algorithm::Bubble),
            "merge" | "merge-sort" => Some(Algorithm::Merge),
            "quick" | "quick-sort" => Some(Algorithm::Quick),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Bubble => "bubble sort",
            Algorithm::Merge => "merge sort",
            Algorithm::Quick => "quick sort",
        }
    }
}

/// The result of advancing a continuation by one micro-step: what to
/// render and how long the driver should wait before the next step.
#[derive(Debug, Clone)]
pub struct MicroStep {
    pub highlight: HighlightSpec,
    pub wait: Duration,
}

/// "Where execution currently is" for the active sort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Continuation {
    Bubble(BubbleState),
    Merge(MergeState),
    Quick(QuickState),
}

impl Continuation {
    /// Seed the initial continuation for a fresh sort over `n` elements.
    /// Requires `n >= 2`; the engine rejects smaller sequences at reset.
    pub fn initial(algorithm: Algorithm, n: usize) -> Self {
        match algorithm {
            Algorithm::Bubble => Continuation::Bubble(BubbleState::new()),
            Algorithm::Merge => Continuation::Merge(MergeState::new(n)),
            Algorithm::Quick => Continuation::Quick(QuickState::new(n)),
        }
    }

    /// Whether the sort has no further micro-steps.
    pub fn is_complete(&self, n: usize) -> bool {
        match self {
            Continuation::Bubble(state) => state.is_complete(n),
            Continuation::Merge(state) => state.is_complete(),
            Continuation::Quick(state) => state.is_complete(),
        }
    }

    /// Advance exactly one micro-step. Must not be called once complete.
    pub fn advance(&mut self, sequence: &mut [u32], delays: &Delays) -> MicroStep {
        match self {
            Continuation::Bubble(state) => state.advance(sequence, delays),
            Continuation::Merge(state) => state.advance(sequence, delays),
            Continuation::Quick(state) => state.advance(sequence, delays),
        }
    }

    /// Short state readout for the UI sidebar.
    pub fn describe(&self) -> String {
        match self {
            Continuation::Bubble(state) => state.describe(),
            Continuation::Merge(state) => state.describe(),
            Continuation::Quick(state) => state.describe(),
        }
    }

    /// Rough byte estimate for snapshot accounting.
    pub fn estimated_size(&self) -> usize {
        match self {
            Continuation::Bubble(_) => std::mem::size_of::<BubbleState>(),
            Continuation::Merge(state) => state.estimated_size(),
            Continuation::Quick(state) => state.estimated_size(),
        }
    }
}
