//! Bubble sort as an interruptible step machine.
//!
//! One micro-step is one comparison of adjacent elements `(j, j+1)`. An
//! out-of-order pair routes through a dedicated swap micro-step with its
//! own history entry and its own (secondary) delay, so a pause or rewind
//! can land between the comparison and the swap it triggered.

use crate::engine::continuation::MicroStep;
use crate::engine::Delays;
use crate::render::{HighlightSpec, Role};

/// Sub-phase within the inner loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BubblePhase {
    /// About to compare `(j, j+1)`.
    Compare,
    /// The previous comparison found `seq[j] > seq[j+1]`; swap next.
    Swap,
}

/// Continuation state: outer pass `i`, inner index `j`.
///
/// `i ∈ [0, n-1)`, `j ∈ [0, n-1-i)`. Advancing `j` past `n-2-i` rolls over
/// to `(i+1, 0)`; `i` reaching `n-1` means the sort is complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BubbleState {
    pub i: usize,
    pub j: usize,
    pub phase: BubblePhase,
}

impl BubbleState {
    pub fn new() -> Self {
        BubbleState {
            i: 0,
            j: 0,
            phase: BubblePhase::Compare,
        }
    }

    pub fn is_complete(&self, n: usize) -> bool {
        self.i >= n.saturating_sub(1)
    }

    /// Advance exactly one micro-step. Must not be called once complete.
    pub fn advance(&mut self, sequence: &mut [u32], delays: &Delays) -> MicroStep {
        let n = sequence.len();
        let j = self.j;

        match self.phase {
            BubblePhase::Compare => {
                if sequence[j] > sequence[j + 1] {
                    self.phase = BubblePhase::Swap;
                } else {
                    self.step_indices(n);
                }
                MicroStep {
                    highlight: HighlightSpec::new().span(Role::Comparing, j, j + 1),
                    wait: delays.step,
                }
            }
            BubblePhase::Swap => {
                sequence.swap(j, j + 1);
                self.phase = BubblePhase::Compare;
                self.step_indices(n);
                MicroStep {
                    highlight: HighlightSpec::new().span(Role::Comparing, j, j + 1),
                    wait: delays.swap,
                }
            }
        }
    }

    /// Move to the next comparison, rolling the inner loop over into the
    /// next outer pass when it reaches `n-1-i`.
    fn step_indices(&mut self, n: usize) {
        if self.j + 1 < n - 1 - self.i {
            self.j += 1;
        } else {
            self.j = 0;
            self.i += 1;
        }
    }

    /// Short state readout for the UI sidebar.
    pub fn describe(&self) -> String {
        format!("pass {}, comparing ({}, {})", self.i + 1, self.j, self.j + 1)
    }
}

impl Default for BubbleState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_to_end(values: &mut Vec<u32>) -> (usize, usize) {
        let delays = Delays::zero();
        let mut state = BubbleState::new();
        let mut comparisons = 0;
        let mut swaps = 0;
        while !state.is_complete(values.len()) {
            match state.phase {
                BubblePhase::Compare => comparisons += 1,
                BubblePhase::Swap => swaps += 1,
            }
            state.advance(values, &delays);
        }
        (comparisons, swaps)
    }

    #[test]
    fn sorts_and_counts_micro_steps() {
        let mut values = vec![5, 3, 1, 4, 2];
        let (comparisons, swaps) = run_to_end(&mut values);
        assert_eq!(values, vec![1, 2, 3, 4, 5]);
        // n(n-1)/2 comparisons for n=5; swaps equal the inversion count.
        assert_eq!(comparisons, 10);
        assert_eq!(swaps, 7);
    }

    #[test]
    fn already_sorted_input_never_swaps() {
        let mut values = vec![1, 2, 3];
        let (comparisons, swaps) = run_to_end(&mut values);
        assert_eq!(values, vec![1, 2, 3]);
        assert_eq!(comparisons, 3);
        assert_eq!(swaps, 0);
    }

    #[test]
    fn two_element_sequence() {
        let mut values = vec![9, 4];
        run_to_end(&mut values);
        assert_eq!(values, vec![4, 9]);
    }

    #[test]
    fn swap_step_follows_out_of_order_comparison() {
        let mut values = vec![2, 1];
        let delays = Delays::zero();
        let mut state = BubbleState::new();

        let step = state.advance(&mut values, &delays);
        assert_eq!(state.phase, BubblePhase::Swap);
        assert_eq!(values, vec![2, 1], "comparison must not mutate");
        assert_eq!(step.highlight.role_at(0), Some(Role::Comparing));

        state.advance(&mut values, &delays);
        assert_eq!(values, vec![1, 2]);
        assert!(state.is_complete(values.len()));
    }
}
