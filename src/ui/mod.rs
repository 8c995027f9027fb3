//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into three layers:
//!
//! - **[`app`]** — application state, keyboard event loop, and the
//!   [`app::FrameStore`] that bridges the engine's push-style renderer to
//!   ratatui's per-frame drawing
//! - **[`panes`]** — stateless render functions for each visible pane
//!   (bar chart, session sidebar, status bar)
//! - **[`theme`]** — centralized color palette used by all panes
//!
//! The entry point for consumers is [`App`]: construct it with an
//! [`Engine`] and call [`App::run`] to start the event loop.
//!
//! [`Engine`]: crate::engine::Engine
//! [`App::run`]: app::App::run

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;
