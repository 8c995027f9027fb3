use ratatui::style::Color;

pub struct Theme {
    #[allow(dead_code)] // Background color field for future use
    pub bg: Color,
    pub fg: Color,
    pub primary: Color,   // Blue
    pub comment: Color,   // Grey
    pub success: Color,   // Green
    pub error: Color,     // Red
    pub border_focused: Color,
    pub border_normal: Color,
    pub status_bg: Color,
    pub bar: Color,          // Default bar color
    pub pivot: Color,        // Pivot element
    pub comparing: Color,    // Elements being compared
    pub writing: Color,      // Position being written to
    pub boundary: Color,     // Partition boundary marker
    pub left_run: Color,     // Left subrange of a merge
    pub right_run: Color,    // Right subrange of a merge
    pub merged: Color,       // Freshly merged range
}

pub const DEFAULT_THEME: Theme = Theme {
    bg: Color::Rgb(30, 30, 46),
    fg: Color::Rgb(205, 214, 244),
    primary: Color::Rgb(137, 180, 250), // Blue
    comment: Color::Rgb(108, 112, 134),
    success: Color::Rgb(166, 227, 161),
    error: Color::Rgb(243, 139, 168),
    border_focused: Color::Rgb(249, 226, 175), // Yellow border for focus
    border_normal: Color::Rgb(108, 112, 134),  // Grey border for normal
    status_bg: Color::Rgb(50, 50, 70),
    bar: Color::Rgb(137, 180, 250),       // Blue bars by default
    pivot: Color::Rgb(243, 139, 168),     // Red for the pivot
    comparing: Color::Rgb(250, 179, 135), // Orange for comparisons
    writing: Color::Rgb(203, 166, 247),   // Purple for writes
    boundary: Color::Rgb(148, 226, 213),  // Teal for the boundary
    left_run: Color::Rgb(116, 199, 236),  // Light blue for the left run
    right_run: Color::Rgb(166, 227, 161), // Green for the right run
    merged: Color::Rgb(249, 226, 175),    // Yellow for merged ranges
};
