//! Rendering logic for each TUI pane

use crate::engine::continuation::Algorithm;
use crate::engine::Engine;
use crate::render::{HighlightSpec, Role};
use crate::ui::theme::DEFAULT_THEME;

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Padding, Paragraph},
    Frame,
};

/// Color for one bar, honoring later-mark precedence in the highlight.
fn bar_color(highlight: &HighlightSpec, index: usize) -> Color {
    match highlight.role_at(index) {
        Some(Role::Pivot) => DEFAULT_THEME.pivot,
        Some(Role::Comparing) => DEFAULT_THEME.comparing,
        Some(Role::Writing) => DEFAULT_THEME.writing,
        Some(Role::Boundary) => DEFAULT_THEME.boundary,
        Some(Role::LeftRun) => DEFAULT_THEME.left_run,
        Some(Role::RightRun) => DEFAULT_THEME.right_run,
        Some(Role::Merged) => DEFAULT_THEME.merged,
        None => DEFAULT_THEME.bar,
    }
}

/// Render the bar-chart visualization of the working array.
pub fn render_bars_pane(
    frame: &mut Frame,
    area: Rect,
    sequence: &[u32],
    highlight: &HighlightSpec,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border_focused))
        .title(" Array ");

    let inner_width = area.width.saturating_sub(2) as usize;
    let n = sequence.len().max(1);

    // Widest bars that still fit; drop the gap when space runs out.
    let (bar_width, bar_gap) = if inner_width >= n * 3 {
        (((inner_width / n) - 1) as u16, 1)
    } else if inner_width >= n * 2 {
        (1u16, 1u16)
    } else {
        (1u16, 0u16)
    };

    // Label bars with their values only when there is room to read them.
    let show_values = bar_width >= 2 && sequence.len() <= 50;

    let bars: Vec<Bar> = sequence
        .iter()
        .enumerate()
        .map(|(index, &value)| {
            let mut bar = Bar::default()
                // +1 so the smallest element still paints a visible bar.
                .value(u64::from(value) + 1)
                .style(Style::default().fg(bar_color(highlight, index)));
            bar = if show_values {
                bar.text_value(value.to_string())
            } else {
                bar.text_value(String::new())
            };
            bar
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .bar_width(bar_width)
        .bar_gap(bar_gap)
        .data(BarGroup::default().bars(&bars));

    frame.render_widget(chart, area);
}

/// Render the session sidebar: algorithm, playback state, delays, and a
/// readout of where the active continuation currently is.
pub fn render_session_pane(frame: &mut Frame, area: Rect, engine: &Engine) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border_normal))
        .title(" Session ")
        .padding(Padding::horizontal(1));

    let label = Style::default().fg(DEFAULT_THEME.comment);
    let value = Style::default().fg(DEFAULT_THEME.fg);

    let state = if engine.is_playing() {
        Span::styled("sorting", Style::default().fg(DEFAULT_THEME.success))
    } else if engine.continuation().is_some() {
        Span::styled("paused", Style::default().fg(DEFAULT_THEME.comparing))
    } else {
        Span::styled("idle", Style::default().fg(DEFAULT_THEME.comment))
    };

    let delays = engine.delays();
    let secondary_label = match engine.algorithm() {
        Algorithm::Merge => "merge delay",
        _ => "swap delay",
    };
    let secondary = match engine.algorithm() {
        Algorithm::Merge => delays.merge,
        _ => delays.swap,
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled("algorithm  ", label),
            Span::styled(engine.algorithm().name(), value),
        ]),
        Line::from(vec![Span::styled("state      ", label), state]),
        Line::from(vec![
            Span::styled("size       ", label),
            Span::styled(engine.sequence().len().to_string(), value),
        ]),
        Line::from(vec![
            Span::styled("step delay ", label),
            Span::styled(format!("{} ms", delays.step.as_millis()), value),
        ]),
        Line::from(vec![
            Span::styled(format!("{:<11}", secondary_label), label),
            Span::styled(format!("{} ms", secondary.as_millis()), value),
        ]),
        Line::from(vec![
            Span::styled("steps      ", label),
            Span::styled(engine.history_len().to_string(), value),
        ]),
        Line::from(vec![
            Span::styled("snapshots  ", label),
            Span::styled(format_bytes(engine.history_memory()), value),
        ]),
    ];

    if let Some(cont) = engine.continuation() {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(cont.describe(), value)));
    }

    lines.push(Line::default());
    for (color, text) in legend(engine.algorithm()) {
        lines.push(Line::from(vec![
            Span::styled("▮ ", Style::default().fg(color)),
            Span::styled(text, label),
        ]));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Color legend for the selected algorithm.
fn legend(algorithm: Algorithm) -> Vec<(Color, &'static str)> {
    match algorithm {
        Algorithm::Bubble => vec![(DEFAULT_THEME.comparing, "comparing")],
        Algorithm::Merge => vec![
            (DEFAULT_THEME.left_run, "left run"),
            (DEFAULT_THEME.right_run, "right run"),
            (DEFAULT_THEME.comparing, "comparing"),
            (DEFAULT_THEME.writing, "writing"),
            (DEFAULT_THEME.merged, "merged"),
        ],
        Algorithm::Quick => vec![
            (DEFAULT_THEME.pivot, "pivot"),
            (DEFAULT_THEME.comparing, "comparing"),
            (DEFAULT_THEME.boundary, "boundary"),
        ],
    }
}

fn format_bytes(bytes: usize) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{} B", bytes)
    }
}

/// Render the bottom status bar: playback info on the left, keybinds on
/// the right.
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    message: &str,
    steps: usize,
    is_playing: bool,
) {
    let layout = ratatui::layout::Layout::default()
        .direction(ratatui::layout::Direction::Horizontal)
        .constraints([
            ratatui::layout::Constraint::Percentage(40),
            ratatui::layout::Constraint::Percentage(60),
        ])
        .split(area);

    // Left side: step counter and status message
    let left_spans = vec![
        Span::styled(
            format!(" {} Step {} ", if is_playing { "▶" } else { "⏸" }, steps),
            Style::default()
                .bg(DEFAULT_THEME.primary)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {} ", message),
            Style::default()
                .bg(DEFAULT_THEME.status_bg)
                .fg(DEFAULT_THEME.fg),
        ),
    ];

    let left_paragraph = Paragraph::new(Line::from(left_spans))
        .style(Style::default().bg(DEFAULT_THEME.status_bg))
        .alignment(Alignment::Left);

    frame.render_widget(left_paragraph, layout[0]);

    // Right side: keybinds with visual grouping
    let key_style = Style::default().bg(DEFAULT_THEME.comment).fg(Color::Black);
    let desc_style = Style::default()
        .bg(DEFAULT_THEME.status_bg)
        .fg(DEFAULT_THEME.fg);

    let right_spans = vec![
        Span::styled(" ␣ ", key_style),
        Span::styled(" play ", desc_style),
        Span::styled(" →/← ", key_style),
        Span::styled(" step/rewind ", desc_style),
        Span::styled(" r ", key_style),
        Span::styled(" reset ", desc_style),
        Span::styled(" 1-3 ", key_style),
        Span::styled(" algorithm ", desc_style),
        Span::styled(" ↑/↓ ", key_style),
        Span::styled(" size ", desc_style),
        Span::styled(" q ", key_style),
        Span::styled(" quit ", desc_style),
    ];

    let right_paragraph = Paragraph::new(Line::from(right_spans))
        .style(Style::default().bg(DEFAULT_THEME.status_bg))
        .alignment(Alignment::Right);

    frame.render_widget(right_paragraph, layout[1]);
}
