//! # Introduction
//!
//! sortty is an educational sorting visualizer built around a resumable,
//! rewindable, cancelable stepwise execution engine.  Bubble, merge, and
//! quick sort run as sequences of discrete micro-steps that can be paused
//! at any point, resumed exactly where they left off, stepped backward to
//! any prior micro-step, and invalidated instantly when the dataset is
//! reset.  The bars are painted in a terminal UI built with
//! [ratatui](https://docs.rs/ratatui).
//!
//! ## Playback pipeline
//!
//! ```text
//! Control (start/pause/rewind/reset) → Engine → Step machines → Renderer
//!                                        ↕
//!                                 Snapshot history
//! ```
//!
//! 1. [`engine`] — the session object: sequence, continuation states,
//!    generation-token cancellation, and the cooperative playback driver.
//! 2. [`history`] — snapshot stack with a configurable memory limit,
//!    enabling exact rewind to any prior micro-step.
//! 3. [`render`] — the [`render::Renderer`] capability the engine emits
//!    frames through, and the role-tagged [`render::HighlightSpec`].
//! 4. [`ui`] — ratatui-based TUI; not part of the stable library API.
//!
//! ## Supported algorithms
//!
//! Bubble sort (adjacent comparisons with dedicated swap sub-steps),
//! merge sort (explicit frame-stack recursion emulation), quick sort
//! (explicit range stack with a Lomuto partition sub-machine).

pub mod engine;
pub mod history;
pub mod render;
pub mod ui;
