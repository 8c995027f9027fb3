// Snapshot history for rewindable playback

use crate::engine::continuation::Continuation;
use crate::render::HighlightSpec;

/// One rewind point: the full state immediately before a forward mutation.
///
/// `highlight` is the spec that was on screen when this state was current,
/// so rewinding can repaint the exact frame the user saw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub sequence: Vec<u32>,
    pub continuation: Option<Continuation>,
    pub highlight: HighlightSpec,
}

impl HistoryEntry {
    /// Estimate the memory usage of this entry in bytes.
    pub fn estimated_size(&self) -> usize {
        // This is a rough estimate
        let sequence_size = self.sequence.len() * std::mem::size_of::<u32>();

        let continuation_size = self
            .continuation
            .as_ref()
            .map(|c| c.estimated_size())
            .unwrap_or(0);

        sequence_size + continuation_size + self.highlight.estimated_size()
    }
}

/// LIFO stack of rewind points with a configurable memory limit.
///
/// Entries are pushed before every forward micro-step and consumed by
/// rewind; reset clears the stack wholesale. The top always corresponds to
/// the state immediately before the most recent forward mutation.
#[derive(Debug)]
pub struct History {
    entries: Vec<HistoryEntry>,
    max_memory: usize,
    current_memory: usize,
}

impl History {
    pub fn new(max_memory: usize) -> Self {
        History {
            entries: Vec::new(),
            max_memory,
            current_memory: 0,
        }
    }

    /// Push a rewind point. Fails without modifying the stack when the
    /// memory limit would be exceeded.
    pub fn push(&mut self, entry: HistoryEntry) -> Result<(), String> {
        let entry_size = entry.estimated_size();

        if self.current_memory + entry_size > self.max_memory {
            return Err(format!(
                "History memory limit exceeded: {} + {} > {}",
                self.current_memory, entry_size, self.max_memory
            ));
        }

        self.current_memory += entry_size;
        self.entries.push(entry);
        Ok(())
    }

    /// Pop the most recent rewind point, if any.
    pub fn pop(&mut self) -> Option<HistoryEntry> {
        let entry = self.entries.pop()?;
        self.current_memory = self.current_memory.saturating_sub(entry.estimated_size());
        Some(entry)
    }

    /// Drop all entries (on reset).
    pub fn clear(&mut self) {
        self.entries.clear();
        self.current_memory = 0;
    }

    /// Number of rewind points currently held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Current estimated memory usage.
    pub fn memory_usage(&self) -> usize {
        self.current_memory
    }

    /// Configured memory limit.
    pub fn memory_limit(&self) -> usize {
        self.max_memory
    }
}
