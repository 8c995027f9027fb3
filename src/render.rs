//! Rendering seam between the engine and its display.
//!
//! The engine never draws anything itself: every micro-step emits one
//! [`Renderer::render`] call carrying the current sequence and a
//! [`HighlightSpec`] describing which indices play which visual role.
//! The TUI implements [`Renderer`] by recording the frame and painting it
//! on the next draw; tests implement it by recording frames for assertions.

/// Visual role of a highlighted index range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Pivot element (quick sort).
    Pivot,
    /// Elements currently being compared.
    Comparing,
    /// Position being written to (merge sort).
    Writing,
    /// Boundary of the "smaller than pivot" region (quick sort).
    Boundary,
    /// Left subrange of an in-progress merge.
    LeftRun,
    /// Right subrange of an in-progress merge.
    RightRun,
    /// Freshly merged range.
    Merged,
}

/// One role-tagged inclusive index range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mark {
    pub role: Role,
    pub start: usize,
    pub end: usize,
}

/// Descriptive highlight metadata for one rendered frame.
///
/// Marks are ordered: when ranges overlap, later marks take precedence.
/// This mirrors the draw order of the original visualizer (subrange fills
/// first, then comparison and write markers on top).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HighlightSpec {
    pub marks: Vec<Mark>,
}

impl HighlightSpec {
    pub fn new() -> Self {
        HighlightSpec { marks: Vec::new() }
    }

    /// Add a single-index mark.
    pub fn mark(mut self, role: Role, index: usize) -> Self {
        self.marks.push(Mark {
            role,
            start: index,
            end: index,
        });
        self
    }

    /// Add an inclusive range mark.
    pub fn span(mut self, role: Role, start: usize, end: usize) -> Self {
        self.marks.push(Mark { role, start, end });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// The effective role at `index`, honoring later-mark precedence.
    pub fn role_at(&self, index: usize) -> Option<Role> {
        self.marks
            .iter()
            .rev()
            .find(|m| m.start <= index && index <= m.end)
            .map(|m| m.role)
    }

    /// Rough byte estimate for snapshot accounting.
    pub fn estimated_size(&self) -> usize {
        self.marks.len() * std::mem::size_of::<Mark>()
    }
}

/// Display capability consumed by the engine.
///
/// `render` is a pure side effect and must not block beyond its own
/// synchronous cost; the playback driver calls it once per micro-step,
/// once per rewind, and once per reset.
pub trait Renderer {
    fn render(&mut self, sequence: &[u32], highlight: &HighlightSpec);
}

/// Renderer that discards every frame. Useful for headless driving.
#[derive(Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _sequence: &[u32], _highlight: &HighlightSpec) {}
}
