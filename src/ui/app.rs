//! Main TUI application state and event loop

use crate::engine::continuation::Algorithm;
use crate::engine::{DelayKind, Engine};
use crate::render::{HighlightSpec, Renderer};
use crate::ui::panes;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};

/// Size and delay knobs with the ranges the original UI suggests.
const SIZE_MIN: usize = 10;
const SIZE_MAX: usize = 200;
const SIZE_STEP: usize = 5;
const STEP_DELAY_MIN: u64 = 10;
const SECONDARY_DELAY_MIN: u64 = 0;
const DELAY_MAX: u64 = 500;
const DELAY_STEP: u64 = 10;

/// Latest frame emitted by the engine.
///
/// The engine renders by side effect whenever a micro-step, rewind, or
/// reset happens; the TUI paints whatever frame was recorded last. This
/// bridges the engine's push-style [`Renderer`] to ratatui's per-frame
/// immediate-mode drawing.
#[derive(Debug, Default)]
pub struct FrameStore {
    pub sequence: Vec<u32>,
    pub highlight: HighlightSpec,
}

impl Renderer for FrameStore {
    fn render(&mut self, sequence: &[u32], highlight: &HighlightSpec) {
        self.sequence = sequence.to_vec();
        self.highlight = highlight.clone();
    }
}

/// The main application state
pub struct App {
    /// The playback engine
    engine: Engine,

    /// Last frame the engine rendered
    frame_store: FrameStore,

    /// Dataset size used for the next reset
    size: usize,

    /// Delay knobs in milliseconds (mirrored into the engine)
    step_delay_ms: u64,
    secondary_delay_ms: u64,

    /// Whether the app should quit
    should_quit: bool,

    /// Status message to display
    status_message: String,

    /// Last time space was pressed (for debouncing)
    last_space_press: Instant,
}

impl App {
    /// Create a new app. The engine is reset over `size` elements before
    /// the first frame.
    pub fn new(mut engine: Engine, size: usize) -> Self {
        let mut frame_store = FrameStore::default();
        // Sizes are pre-clamped by main; a failure here cannot happen.
        let _ = engine.reset(size, &mut frame_store);

        App {
            engine,
            frame_store,
            size,
            step_delay_ms: 300,
            secondary_delay_ms: 300,
            should_quit: false,
            status_message: String::from("Ready!"),
            last_space_press: Instant::now()
                .checked_sub(Duration::from_secs(1))
                .unwrap_or_else(Instant::now),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            // Drive the playback loop; completion shows up as the engine
            // clearing its playing flag.
            let was_playing = self.engine.is_playing();
            if let Err(e) = self.engine.tick(Instant::now(), &mut self.frame_store) {
                self.status_message = format!("Playback stopped: {}", e);
            } else if was_playing && !self.engine.is_playing() {
                self.status_message = String::from("Sorting complete");
            }

            // Use poll with timeout so playback keeps advancing
            if event::poll(Duration::from_millis(15))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Bars + sidebar on top, status bar at the bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(30)])
            .split(main_chunks[0]);

        panes::render_bars_pane(
            frame,
            columns[0],
            &self.frame_store.sequence,
            &self.frame_store.highlight,
        );

        panes::render_session_pane(frame, columns[1], &self.engine);

        panes::render_status_bar(
            frame,
            main_chunks[1],
            &self.status_message,
            self.engine.history_len(),
            self.engine.is_playing(),
        );
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Char(' ') => {
                // Toggle playback (200ms debounce against key repeat)
                if self.last_space_press.elapsed() >= Duration::from_millis(200) {
                    self.last_space_press = Instant::now();
                    if self.engine.is_playing() {
                        self.engine.pause();
                        self.status_message = String::from("Paused");
                    } else {
                        self.engine.start();
                        self.status_message = String::from("Sorting...");
                    }
                }
            }
            KeyCode::Right => {
                if !self.engine.is_playing() {
                    match self.engine.step_forward(&mut self.frame_store) {
                        Ok(()) => self.status_message = String::from("Stepped forward"),
                        Err(e) => self.status_message = format!("Cannot step: {}", e),
                    }
                }
            }
            KeyCode::Left => {
                self.engine.rewind(&mut self.frame_store);
                self.status_message = if self.engine.history_len() == 0 {
                    String::from("At the beginning")
                } else {
                    String::from("Rewound")
                };
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.reset();
            }
            KeyCode::Char('1') => self.select_algorithm(Algorithm::Bubble),
            KeyCode::Char('2') => self.select_algorithm(Algorithm::Merge),
            KeyCode::Char('3') => self.select_algorithm(Algorithm::Quick),
            KeyCode::Up => {
                self.size = (self.size + SIZE_STEP).min(SIZE_MAX);
                self.reset();
            }
            KeyCode::Down => {
                self.size = self.size.saturating_sub(SIZE_STEP).max(SIZE_MIN);
                self.reset();
            }
            KeyCode::Char('[') => {
                self.step_delay_ms =
                    self.step_delay_ms.saturating_sub(DELAY_STEP).max(STEP_DELAY_MIN);
                self.apply_delays();
            }
            KeyCode::Char(']') => {
                self.step_delay_ms = (self.step_delay_ms + DELAY_STEP).min(DELAY_MAX);
                self.apply_delays();
            }
            KeyCode::Char('{') => {
                self.secondary_delay_ms = self
                    .secondary_delay_ms
                    .saturating_sub(DELAY_STEP)
                    .max(SECONDARY_DELAY_MIN);
                self.apply_delays();
            }
            KeyCode::Char('}') => {
                self.secondary_delay_ms = (self.secondary_delay_ms + DELAY_STEP).min(DELAY_MAX);
                self.apply_delays();
            }
            _ => {}
        }
    }

    fn reset(&mut self) {
        match self.engine.reset(self.size, &mut self.frame_store) {
            Ok(()) => self.status_message = format!("Reset (n = {})", self.size),
            Err(e) => self.status_message = format!("Reset failed: {}", e),
        }
    }

    fn select_algorithm(&mut self, algorithm: Algorithm) {
        if algorithm == self.engine.algorithm() {
            return;
        }
        match self.engine.set_algorithm(algorithm, &mut self.frame_store) {
            Ok(()) => self.status_message = format!("Switched to {}", algorithm.name()),
            Err(e) => self.status_message = format!("Switch failed: {}", e),
        }
    }

    fn apply_delays(&mut self) {
        self.engine.set_delay(DelayKind::Step, self.step_delay_ms);
        self.engine.set_delay(DelayKind::Swap, self.secondary_delay_ms);
        self.engine.set_delay(DelayKind::Merge, self.secondary_delay_ms);
        self.status_message = format!(
            "Delays: step {} ms, secondary {} ms",
            self.step_delay_ms, self.secondary_delay_ms
        );
    }
}
