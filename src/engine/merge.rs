//! Merge sort as an interruptible step machine.
//!
//! The natural recursion is emulated with an explicit frame stack so the
//! machine can suspend at any comparison or element write, not only at
//! call boundaries: a suspended native call cannot be snapshotted and
//! resumed across arbitrary pause points. Ranges are processed depth-first
//! — sort the left half fully, then the right half, then merge — which
//! reproduces the recursion order of the textbook algorithm.
//!
//! The merge of a fixed `(low, mid, high)` runs as a sub-machine. Each
//! element copy is two micro-steps: a comparison render (merge delay) and
//! a write render (half the merge delay). Phase transitions that exhaust a
//! loop fall through to the next phase within the same logical step, so
//! the machine never suspends idly between phases.

use crate::engine::continuation::MicroStep;
use crate::engine::Delays;
use crate::render::{HighlightSpec, Role};

/// Where a frame is in its sort-left / sort-right / merge sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStage {
    SortLeft,
    SortRight,
    MergeHalves,
}

/// One emulated recursive call over the inclusive range `[low, high]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeFrame {
    pub low: usize,
    pub high: usize,
    pub stage: FrameStage,
}

impl MergeFrame {
    fn new(low: usize, high: usize) -> Self {
        MergeFrame {
            low,
            high,
            stage: FrameStage::SortLeft,
        }
    }
}

/// Phase of the active merge sub-machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergePhase {
    /// Render both subrange highlights and copy the range into `aux`.
    Init,
    /// Render the `aux[i]` vs `aux[j]` comparison.
    Compare,
    /// Write the winner of the last comparison into the main sequence.
    Write,
    /// Right run exhausted: render the next surviving left element.
    LeftRemain,
    /// Write the left element rendered by `LeftRemain`.
    LeftWrite,
    /// Left run exhausted: render the next surviving right element.
    RightRemain,
    /// Write the right element rendered by `RightRemain`.
    RightWrite,
    /// Render the fully merged range and retire the sub-machine.
    Complete,
}

/// Merge sub-machine for a fixed `(low, mid, high)` range.
///
/// `aux` snapshots `sequence[low..=high]` at `Init`; `i` and `j` walk the
/// left (`[low, mid]`) and right (`[mid+1, high]`) runs inside `aux`, `k`
/// is the write cursor in the main sequence. All three are absolute
/// indices; `aux` is indexed relative to `low`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOp {
    pub low: usize,
    pub mid: usize,
    pub high: usize,
    pub aux: Vec<u32>,
    pub i: usize,
    pub j: usize,
    pub k: usize,
    pub phase: MergePhase,
}

impl MergeOp {
    fn new(low: usize, mid: usize, high: usize) -> Self {
        MergeOp {
            low,
            mid,
            high,
            aux: Vec::new(),
            i: low,
            j: mid + 1,
            k: low,
            phase: MergePhase::Init,
        }
    }

    fn left(&self, index: usize) -> u32 {
        self.aux[index - self.low]
    }

    fn runs(&self) -> HighlightSpec {
        HighlightSpec::new()
            .span(Role::LeftRun, self.low, self.mid)
            .span(Role::RightRun, self.mid + 1, self.high)
    }

    /// Advance the merge one micro-step. A step returned with the phase
    /// already at [`MergePhase::Complete`] is the closing merged-range
    /// render; the caller retires the sub-machine on seeing it.
    fn advance(&mut self, sequence: &mut [u32], delays: &Delays) -> MicroStep {
        loop {
            match self.phase {
                MergePhase::Init => {
                    self.aux = sequence[self.low..=self.high].to_vec();
                    self.phase = MergePhase::Compare;
                    return MicroStep {
                        highlight: self.runs(),
                        wait: delays.step,
                    };
                }
                MergePhase::Compare => {
                    if self.i > self.mid {
                        self.phase = MergePhase::RightRemain;
                    } else if self.j > self.high {
                        self.phase = MergePhase::LeftRemain;
                    } else {
                        self.phase = MergePhase::Write;
                        return MicroStep {
                            highlight: self
                                .runs()
                                .mark(Role::Comparing, self.i)
                                .mark(Role::Comparing, self.j)
                                .mark(Role::Writing, self.k),
                            wait: delays.merge,
                        };
                    }
                }
                MergePhase::Write => {
                    // Ties take the left run, preserving stability.
                    if self.left(self.i) <= self.left(self.j) {
                        sequence[self.k] = self.left(self.i);
                        self.i += 1;
                    } else {
                        sequence[self.k] = self.left(self.j);
                        self.j += 1;
                    }
                    let written = self.k;
                    self.k += 1;
                    self.phase = MergePhase::Compare;
                    return MicroStep {
                        highlight: self.runs().mark(Role::Writing, written),
                        wait: delays.merge / 2,
                    };
                }
                MergePhase::LeftRemain => {
                    if self.i > self.mid {
                        self.phase = MergePhase::Complete;
                    } else {
                        self.phase = MergePhase::LeftWrite;
                        return MicroStep {
                            highlight: self
                                .runs()
                                .mark(Role::Comparing, self.i)
                                .mark(Role::Writing, self.k),
                            wait: delays.merge,
                        };
                    }
                }
                MergePhase::LeftWrite => {
                    sequence[self.k] = self.left(self.i);
                    let written = self.k;
                    self.i += 1;
                    self.k += 1;
                    self.phase = MergePhase::LeftRemain;
                    return MicroStep {
                        highlight: self.runs().mark(Role::Writing, written),
                        wait: delays.merge / 2,
                    };
                }
                MergePhase::RightRemain => {
                    if self.j > self.high {
                        self.phase = MergePhase::Complete;
                    } else {
                        self.phase = MergePhase::RightWrite;
                        return MicroStep {
                            highlight: self
                                .runs()
                                .mark(Role::Comparing, self.j)
                                .mark(Role::Writing, self.k),
                            wait: delays.merge,
                        };
                    }
                }
                MergePhase::RightWrite => {
                    sequence[self.k] = self.left(self.j);
                    let written = self.k;
                    self.j += 1;
                    self.k += 1;
                    self.phase = MergePhase::RightRemain;
                    return MicroStep {
                        highlight: self.runs().mark(Role::Writing, written),
                        wait: delays.merge / 2,
                    };
                }
                MergePhase::Complete => {
                    return MicroStep {
                        highlight: HighlightSpec::new().span(Role::Merged, self.low, self.high),
                        wait: delays.step,
                    };
                }
            }
        }
    }
}

/// Continuation state: the emulated call stack plus the active merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeState {
    pub frames: Vec<MergeFrame>,
    pub merge: Option<MergeOp>,
}

impl MergeState {
    pub fn new(n: usize) -> Self {
        MergeState {
            frames: vec![MergeFrame::new(0, n - 1)],
            merge: None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.merge.is_none() && self.frames.is_empty()
    }

    /// Advance exactly one micro-step. Must not be called once complete.
    pub fn advance(&mut self, sequence: &mut [u32], delays: &Delays) -> MicroStep {
        loop {
            if let Some(op) = self.merge.as_mut() {
                let step = op.advance(sequence, delays);
                // The closing merged-range render retires the sub-machine
                // and pops the parent frame in the same logical step.
                if op.phase == MergePhase::Complete {
                    self.merge = None;
                    self.frames.pop();
                }
                return step;
            }

            let Some(frame) = self.frames.last_mut() else {
                // Callers check is_complete first; render nothing if not.
                return MicroStep {
                    highlight: HighlightSpec::new(),
                    wait: delays.step,
                };
            };

            if frame.low >= frame.high {
                self.frames.pop();
                continue;
            }

            let (low, high) = (frame.low, frame.high);
            let mid = low + (high - low) / 2;
            match frame.stage {
                FrameStage::SortLeft => {
                    frame.stage = FrameStage::SortRight;
                    self.frames.push(MergeFrame::new(low, mid));
                }
                FrameStage::SortRight => {
                    frame.stage = FrameStage::MergeHalves;
                    self.frames.push(MergeFrame::new(mid + 1, high));
                }
                FrameStage::MergeHalves => {
                    self.merge = Some(MergeOp::new(low, mid, high));
                }
            }
        }
    }

    /// Short state readout for the UI sidebar.
    pub fn describe(&self) -> String {
        match &self.merge {
            Some(op) => format!(
                "merging [{}, {}] | [{}, {}], depth {}",
                op.low,
                op.mid,
                op.mid + 1,
                op.high,
                self.frames.len()
            ),
            None => format!("splitting, depth {}", self.frames.len()),
        }
    }

    pub fn estimated_size(&self) -> usize {
        let frames = self.frames.len() * std::mem::size_of::<MergeFrame>();
        let aux = self
            .merge
            .as_ref()
            .map(|op| op.aux.len() * std::mem::size_of::<u32>())
            .unwrap_or(0);
        frames + aux + std::mem::size_of::<Self>()
    }
}
