//! Quick sort as an interruptible step machine.
//!
//! Recursion is replaced by an explicit range stack so that *any*
//! comparison or swap can be a suspension point, not just range
//! boundaries. The outer loop pops `(low, high)` ranges and runs the
//! Lomuto partition sub-machine (pivot = rightmost element); the resulting
//! subranges are pushed right-then-left so the left range is processed
//! next. Both the range stack and the partition sub-state live in the
//! continuation, so a pause mid-partition resumes at the exact next
//! unvisited index.

use crate::engine::continuation::MicroStep;
use crate::engine::Delays;
use crate::render::{HighlightSpec, Role};

/// Phase of the active partition sub-machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartitionPhase {
    /// Render the pivot before the first comparison.
    Init,
    /// Render the comparison of `sequence[j]` against the pivot value.
    Comparing,
    /// The previous comparison found an element smaller than the pivot;
    /// swap it into the boundary slot.
    Swap,
    /// Swap the pivot into its final position.
    FinalSwap,
    /// Partition finished; `pivot_index` holds the settled position.
    Complete,
}

/// Lomuto partition over the inclusive range `[low, high]`.
///
/// `boundary` is the index of the last element known smaller than the
/// pivot; `None` stands in for the textbook `low - 1` sentinel, keeping
/// the machine in unsigned indices. The next swap target is therefore
/// `boundary + 1`, or `low` when no smaller element has been seen yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartitionState {
    pub low: usize,
    pub high: usize,
    pub pivot_value: u32,
    pub pivot_index: usize,
    pub boundary: Option<usize>,
    pub j: usize,
    pub phase: PartitionPhase,
}

impl PartitionState {
    fn new(low: usize, high: usize, sequence: &[u32]) -> Self {
        PartitionState {
            low,
            high,
            pivot_value: sequence[high],
            pivot_index: high,
            boundary: None,
            j: low,
            phase: PartitionPhase::Init,
        }
    }

    fn swap_target(&self) -> usize {
        self.boundary.map_or(self.low, |b| b + 1)
    }

    fn comparison_highlight(&self) -> HighlightSpec {
        let mut spec = HighlightSpec::new().mark(Role::Pivot, self.pivot_index);
        if let Some(b) = self.boundary {
            spec = spec.mark(Role::Boundary, b);
        }
        spec.mark(Role::Comparing, self.j)
    }
}

/// Continuation state: pending ranges plus the active partition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickState {
    pub ranges: Vec<(usize, usize)>,
    pub partition: Option<PartitionState>,
}

impl QuickState {
    pub fn new(n: usize) -> Self {
        QuickState {
            ranges: vec![(0, n - 1)],
            partition: None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.partition.is_none() && self.ranges.is_empty()
    }

    /// Advance exactly one micro-step. Must not be called once complete.
    pub fn advance(&mut self, sequence: &mut [u32], delays: &Delays) -> MicroStep {
        loop {
            if let Some(p) = self.partition.as_mut() {
                match p.phase {
                    PartitionPhase::Init => {
                        p.phase = PartitionPhase::Comparing;
                        return MicroStep {
                            highlight: HighlightSpec::new().mark(Role::Pivot, p.pivot_index),
                            wait: delays.step,
                        };
                    }
                    PartitionPhase::Comparing => {
                        if p.j < p.high {
                            let highlight = p.comparison_highlight();
                            if sequence[p.j] < p.pivot_value {
                                p.phase = PartitionPhase::Swap;
                            } else {
                                p.j += 1;
                            }
                            return MicroStep {
                                highlight,
                                wait: delays.step,
                            };
                        }
                        // Every index visited; place the pivot within the
                        // same logical step.
                        p.phase = PartitionPhase::FinalSwap;
                    }
                    PartitionPhase::Swap => {
                        let target = p.swap_target();
                        sequence.swap(target, p.j);
                        p.boundary = Some(target);
                        let highlight = p.comparison_highlight();
                        p.j += 1;
                        p.phase = PartitionPhase::Comparing;
                        return MicroStep {
                            highlight,
                            wait: delays.swap,
                        };
                    }
                    PartitionPhase::FinalSwap => {
                        let target = p.swap_target();
                        sequence.swap(target, p.high);
                        p.pivot_index = target;
                        p.phase = PartitionPhase::Complete;
                        return MicroStep {
                            highlight: HighlightSpec::new().mark(Role::Pivot, target),
                            wait: delays.swap,
                        };
                    }
                    PartitionPhase::Complete => {
                        let (low, high, pivot) = (p.low, p.high, p.pivot_index);
                        self.partition = None;
                        // Right range first so the left range pops next.
                        if pivot + 1 < high {
                            self.ranges.push((pivot + 1, high));
                        }
                        if pivot > low + 1 {
                            self.ranges.push((low, pivot - 1));
                        }
                    }
                }
                continue;
            }

            match self.ranges.pop() {
                Some((low, high)) => {
                    self.partition = Some(PartitionState::new(low, high, sequence));
                }
                None => {
                    // Callers check is_complete first; render nothing if not.
                    return MicroStep {
                        highlight: HighlightSpec::new(),
                        wait: delays.step,
                    };
                }
            }
        }
    }

    /// Short state readout for the UI sidebar.
    pub fn describe(&self) -> String {
        match &self.partition {
            Some(p) => format!(
                "partitioning [{}, {}], pivot {}, {} pending",
                p.low,
                p.high,
                p.pivot_value,
                self.ranges.len()
            ),
            None => format!("{} ranges pending", self.ranges.len()),
        }
    }

    pub fn estimated_size(&self) -> usize {
        self.ranges.len() * std::mem::size_of::<(usize, usize)>() + std::mem::size_of::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_to_end(values: &mut Vec<u32>) {
        let delays = Delays::zero();
        let mut state = QuickState::new(values.len());
        while !state.is_complete() {
            state.advance(values, &delays);
        }
    }

    #[test]
    fn sorts_to_completion() {
        let mut values = vec![3, 1, 4, 1, 5, 9, 2, 6];
        run_to_end(&mut values);
        assert_eq!(values, vec![1, 1, 2, 3, 4, 5, 6, 9]);
    }

    #[test]
    fn first_partition_places_pivot() {
        let mut values = vec![3, 1, 4, 1, 5, 9, 2, 6];
        let delays = Delays::zero();
        let mut state = QuickState::new(values.len());

        // Drive until the first partition settles its pivot.
        loop {
            state.advance(&mut values, &delays);
            if let Some(p) = &state.partition {
                if p.phase == PartitionPhase::Complete {
                    break;
                }
            }
        }

        let p = state.partition.as_ref().unwrap();
        // Six elements are smaller than the pivot 6, so it settles at 6.
        assert_eq!(p.pivot_index, 6);
        assert_eq!(values[6], 6);
        assert!(values[..6].iter().all(|&v| v < 6));
        assert!(values[7..].iter().all(|&v| v > 6));
    }

    #[test]
    fn left_range_processed_first() {
        let mut values = vec![3, 1, 4, 1, 5, 9, 2, 6];
        let delays = Delays::zero();
        let mut state = QuickState::new(values.len());

        // Step past the first partition's Complete bookkeeping: the next
        // partition must cover the left subrange.
        loop {
            state.advance(&mut values, &delays);
            if let Some(p) = &state.partition {
                if p.low == 0 && p.high == 5 {
                    return;
                }
                assert!(
                    !(p.low == 7),
                    "right subrange must not start before the left"
                );
            }
        }
    }

    #[test]
    fn reverse_sorted_input() {
        let mut values = vec![5, 4, 3, 2, 1];
        run_to_end(&mut values);
        assert_eq!(values, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn pause_mid_partition_resumes_at_next_index() {
        let mut values = vec![4, 2, 5, 1, 3];
        let delays = Delays::zero();
        let mut state = QuickState::new(values.len());

        state.advance(&mut values, &delays); // pivot render
        state.advance(&mut values, &delays); // compare j=0

        // Snapshot mid-partition, run one more step, restore: the restored
        // machine must replay the exact same step.
        let saved_state = state.clone();
        let saved_values = values.clone();
        let step = state.advance(&mut values, &delays);

        let mut restored = saved_state;
        let mut restored_values = saved_values;
        let replayed = restored.advance(&mut restored_values, &delays);
        assert_eq!(step.highlight, replayed.highlight);
        assert_eq!(values, restored_values);
        assert_eq!(state, restored);
    }
}
