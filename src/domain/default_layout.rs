// Built-in dashboard arrangement used when a user has no saved layout
use super::layout::{Breakpoint, LayoutSnapshot, WidgetPlacement};

pub const DEFAULT_WIDGET_IDS: [&str; 9] = [
    "stats-steps",
    "stats-calories",
    "stats-hrv",
    "stats-sleep",
    "performance-chart",
    "ai-recommendations",
    "goal-progress",
    "daily-plan",
    "weekly-summary",
];

// (x, y, w, h) per widget, in DEFAULT_WIDGET_IDS order
type Cells = [(u32, u32, u32, u32); 9];

const LG: Cells = [
    (0, 0, 3, 2),
    (3, 0, 3, 2),
    (6, 0, 3, 2),
    (9, 0, 3, 2),
    (0, 2, 8, 4),
    (8, 2, 4, 4),
    (0, 6, 8, 4),
    (8, 6, 4, 3),
    (8, 9, 4, 3),
];

const MD: Cells = [
    (0, 0, 2, 2),
    (2, 0, 2, 2),
    (4, 0, 2, 2),
    (6, 0, 2, 2),
    (0, 2, 6, 4),
    (6, 2, 4, 4),
    (0, 6, 6, 4),
    (6, 6, 4, 3),
    (6, 9, 4, 3),
];

const SM: Cells = [
    (0, 0, 3, 2),
    (3, 0, 3, 2),
    (0, 2, 3, 2),
    (3, 2, 3, 2),
    (0, 4, 6, 4),
    (0, 8, 6, 4),
    (0, 12, 6, 4),
    (0, 16, 6, 3),
    (0, 19, 6, 3),
];

const XS: Cells = [
    (0, 0, 4, 2),
    (0, 2, 4, 2),
    (0, 4, 4, 2),
    (0, 6, 4, 2),
    (0, 8, 4, 4),
    (0, 12, 4, 4),
    (0, 16, 4, 4),
    (0, 20, 4, 3),
    (0, 23, 4, 3),
];

fn placements(cells: &Cells) -> Vec<WidgetPlacement> {
    DEFAULT_WIDGET_IDS
        .iter()
        .zip(cells.iter())
        .map(|(id, &(x, y, w, h))| WidgetPlacement::new(*id, x, y, w, h))
        .collect()
}

/// The default snapshot. `xxs` is intentionally absent.
pub fn default_layouts() -> LayoutSnapshot {
    LayoutSnapshot::new()
        .with_breakpoint(Breakpoint::Lg, placements(&LG))
        .with_breakpoint(Breakpoint::Md, placements(&MD))
        .with_breakpoint(Breakpoint::Sm, placements(&SM))
        .with_breakpoint(Breakpoint::Xs, placements(&XS))
}
