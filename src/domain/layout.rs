// Widget layout domain models
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Viewport width tier. Declaration order is widest first, which is also
/// the order breakpoints appear in a serialized snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    Lg,
    Md,
    Sm,
    Xs,
    Xxs,
}

impl Breakpoint {
    pub const ALL: [Breakpoint; 5] = [
        Breakpoint::Lg,
        Breakpoint::Md,
        Breakpoint::Sm,
        Breakpoint::Xs,
        Breakpoint::Xxs,
    ];

    /// Minimum viewport width in pixels for this breakpoint to apply
    pub fn min_width(self) -> u32 {
        match self {
            Breakpoint::Lg => 1200,
            Breakpoint::Md => 996,
            Breakpoint::Sm => 768,
            Breakpoint::Xs => 480,
            Breakpoint::Xxs => 0,
        }
    }

    pub fn columns(self) -> u32 {
        match self {
            Breakpoint::Lg => 12,
            Breakpoint::Md => 10,
            Breakpoint::Sm => 6,
            Breakpoint::Xs => 4,
            Breakpoint::Xxs => 2,
        }
    }

    /// Pick the widest breakpoint whose threshold fits the viewport
    pub fn for_width(width_px: u32) -> Self {
        Self::ALL
            .into_iter()
            .find(|bp| width_px >= bp.min_width())
            .unwrap_or(Breakpoint::Xxs)
    }
}

/// Size bounds applied to every widget, in grid cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetConstraints {
    pub min_w: u32,
    pub min_h: u32,
    pub max_w: u32,
    pub max_h: u32,
}

pub const WIDGET_CONSTRAINTS: WidgetConstraints = WidgetConstraints {
    min_w: 2,
    min_h: 2,
    max_w: 12,
    max_h: 8,
};

impl WidgetConstraints {
    pub fn allows(&self, w: u32, h: u32) -> bool {
        (self.min_w..=self.max_w).contains(&w) && (self.min_h..=self.max_h).contains(&h)
    }
}

/// One widget's position and span within a breakpoint's grid.
///
/// The id travels as `i` on the wire, which is the key the grid engine
/// emits; `id` is accepted on input as well.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetPlacement {
    #[serde(rename = "i", alias = "id")]
    pub id: String,
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl WidgetPlacement {
    pub fn new(id: impl Into<String>, x: u32, y: u32, w: u32, h: u32) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            w,
            h,
        }
    }

    /// Clamp the span into the constraints and the column count, then pull
    /// the origin left so the widget stays inside the grid
    fn clamped(mut self, constraints: &WidgetConstraints, columns: u32) -> Self {
        let max_w = constraints.max_w.min(columns).max(constraints.min_w);
        self.w = self.w.clamp(constraints.min_w, max_w);
        self.h = self.h.clamp(constraints.min_h, constraints.max_h);
        if self.x.saturating_add(self.w) > columns {
            self.x = columns.saturating_sub(self.w);
        }
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutViolation {
    DuplicateWidget { breakpoint: Breakpoint, id: String },
    SizeOutOfBounds { breakpoint: Breakpoint, id: String, w: u32, h: u32 },
    OutsideGrid { breakpoint: Breakpoint, id: String },
}

/// The full set of placements across breakpoints: the unit of persistence
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayoutSnapshot {
    layouts: BTreeMap<Breakpoint, Vec<WidgetPlacement>>,
}

impl LayoutSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_breakpoint(mut self, breakpoint: Breakpoint, placements: Vec<WidgetPlacement>) -> Self {
        self.layouts.insert(breakpoint, placements);
        self
    }

    pub fn placements(&self, breakpoint: Breakpoint) -> Option<&[WidgetPlacement]> {
        self.layouts.get(&breakpoint).map(Vec::as_slice)
    }

    pub fn placement(&self, breakpoint: Breakpoint, id: &str) -> Option<&WidgetPlacement> {
        self.placements(breakpoint)?.iter().find(|p| p.id == id)
    }

    pub fn breakpoints(&self) -> impl Iterator<Item = Breakpoint> + '_ {
        self.layouts.keys().copied()
    }

    /// Resolve the arrangement rendered at a viewport width
    pub fn for_width(&self, width_px: u32) -> (Breakpoint, &[WidgetPlacement]) {
        let breakpoint = Breakpoint::for_width(width_px);
        (breakpoint, self.placements(breakpoint).unwrap_or(&[]))
    }

    /// Return a copy with one widget moved. `None` if the widget is not
    /// placed at that breakpoint.
    pub fn with_moved(&self, breakpoint: Breakpoint, id: &str, x: u32, y: u32) -> Option<Self> {
        let mut next = self.clone();
        let placement = next.placement_mut(breakpoint, id)?;
        placement.x = x;
        placement.y = y;
        let clamped = placement.clone().clamped(&WIDGET_CONSTRAINTS, breakpoint.columns());
        *placement = clamped;
        Some(next)
    }

    /// Return a copy with one widget resized, clamped to the widget
    /// constraints and the breakpoint's column count
    pub fn with_resized(&self, breakpoint: Breakpoint, id: &str, w: u32, h: u32) -> Option<Self> {
        let mut next = self.clone();
        let placement = next.placement_mut(breakpoint, id)?;
        placement.w = w;
        placement.h = h;
        let clamped = placement.clone().clamped(&WIDGET_CONSTRAINTS, breakpoint.columns());
        *placement = clamped;
        Some(next)
    }

    /// Check ids are unique per breakpoint and every span honours the
    /// constraints. Overlapping cells are not a violation.
    pub fn violations(&self, constraints: &WidgetConstraints) -> Vec<LayoutViolation> {
        let mut violations = Vec::new();
        for (&breakpoint, placements) in &self.layouts {
            for (idx, p) in placements.iter().enumerate() {
                if placements[..idx].iter().any(|other| other.id == p.id) {
                    violations.push(LayoutViolation::DuplicateWidget {
                        breakpoint,
                        id: p.id.clone(),
                    });
                }
                if !constraints.allows(p.w, p.h) {
                    violations.push(LayoutViolation::SizeOutOfBounds {
                        breakpoint,
                        id: p.id.clone(),
                        w: p.w,
                        h: p.h,
                    });
                }
                if p.x.saturating_add(p.w) > breakpoint.columns() {
                    violations.push(LayoutViolation::OutsideGrid {
                        breakpoint,
                        id: p.id.clone(),
                    });
                }
            }
        }
        violations
    }

    fn placement_mut(&mut self, breakpoint: Breakpoint, id: &str) -> Option<&mut WidgetPlacement> {
        self.layouts.get_mut(&breakpoint)?.iter_mut().find(|p| p.id == id)
    }
}

/// Widget list stored when a submitted layout does not have snapshot shape
pub const FALLBACK_WIDGETS: [&str; 4] = ["fitness", "nutrition", "goals", "recommendations"];

/// Contents of a persisted layout record's `layoutData`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LayoutData {
    Snapshot(LayoutSnapshot),
    WidgetList { widgets: Vec<String> },
}

impl LayoutData {
    pub fn fallback() -> Self {
        LayoutData::WidgetList {
            widgets: FALLBACK_WIDGETS.iter().map(|w| w.to_string()).collect(),
        }
    }

    /// Interpret an arbitrary submitted payload, falling back to the default
    /// widget list when it is not a snapshot
    pub fn from_submitted(value: serde_json::Value) -> Self {
        match serde_json::from_value::<LayoutSnapshot>(value) {
            Ok(snapshot) => LayoutData::Snapshot(snapshot),
            Err(e) => {
                tracing::debug!("Submitted layout is not a snapshot ({}), using fallback", e);
                LayoutData::fallback()
            }
        }
    }

    pub fn as_snapshot(&self) -> Option<&LayoutSnapshot> {
        match self {
            LayoutData::Snapshot(snapshot) => Some(snapshot),
            LayoutData::WidgetList { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_breakpoint_for_width() {
        assert_eq!(Breakpoint::for_width(1400), Breakpoint::Lg);
        assert_eq!(Breakpoint::for_width(1200), Breakpoint::Lg);
        assert_eq!(Breakpoint::for_width(1199), Breakpoint::Md);
        assert_eq!(Breakpoint::for_width(800), Breakpoint::Sm);
        assert_eq!(Breakpoint::for_width(480), Breakpoint::Xs);
        assert_eq!(Breakpoint::for_width(320), Breakpoint::Xxs);
        assert_eq!(Breakpoint::for_width(0), Breakpoint::Xxs);
    }

    #[test]
    fn test_breakpoint_columns() {
        let cols: Vec<u32> = Breakpoint::ALL.iter().map(|bp| bp.columns()).collect();
        assert_eq!(cols, vec![12, 10, 6, 4, 2]);
    }

    #[test]
    fn test_placement_wire_format() {
        let placement = WidgetPlacement::new("stats-hrv", 6, 0, 3, 2);
        let value = serde_json::to_value(&placement).unwrap();
        assert_eq!(value, json!({ "i": "stats-hrv", "x": 6, "y": 0, "w": 3, "h": 2 }));

        let aliased: WidgetPlacement =
            serde_json::from_value(json!({ "id": "stats-hrv", "x": 6, "y": 0, "w": 3, "h": 2 })).unwrap();
        assert_eq!(aliased, placement);
    }

    #[test]
    fn test_snapshot_serializes_in_breakpoint_order() {
        let snapshot = LayoutSnapshot::new()
            .with_breakpoint(Breakpoint::Xs, vec![])
            .with_breakpoint(Breakpoint::Lg, vec![]);
        let text = serde_json::to_string(&snapshot).unwrap();
        assert_eq!(text, r#"{"lg":[],"xs":[]}"#);
    }

    #[test]
    fn test_with_moved_leaves_others_untouched() {
        let snapshot = LayoutSnapshot::new().with_breakpoint(
            Breakpoint::Lg,
            vec![
                WidgetPlacement::new("a", 0, 0, 3, 2),
                WidgetPlacement::new("b", 3, 0, 3, 2),
            ],
        );
        let moved = snapshot.with_moved(Breakpoint::Lg, "b", 0, 4).unwrap();
        assert_eq!(moved.placement(Breakpoint::Lg, "b"), Some(&WidgetPlacement::new("b", 0, 4, 3, 2)));
        assert_eq!(moved.placement(Breakpoint::Lg, "a"), snapshot.placement(Breakpoint::Lg, "a"));
        assert!(snapshot.with_moved(Breakpoint::Md, "b", 0, 0).is_none());
    }

    #[test]
    fn test_with_resized_clamps() {
        let snapshot = LayoutSnapshot::new()
            .with_breakpoint(Breakpoint::Sm, vec![WidgetPlacement::new("a", 4, 0, 2, 2)]);
        let resized = snapshot.with_resized(Breakpoint::Sm, "a", 20, 1).unwrap();
        // sm has 6 columns, so width caps at 6 and the widget slides to x=0
        assert_eq!(resized.placement(Breakpoint::Sm, "a"), Some(&WidgetPlacement::new("a", 0, 0, 6, 2)));
    }

    #[test]
    fn test_violations() {
        let snapshot = LayoutSnapshot::new().with_breakpoint(
            Breakpoint::Xs,
            vec![
                WidgetPlacement::new("a", 0, 0, 4, 2),
                WidgetPlacement::new("a", 0, 0, 4, 2),
                WidgetPlacement::new("b", 2, 0, 4, 9),
            ],
        );
        let violations = snapshot.violations(&WIDGET_CONSTRAINTS);
        assert_eq!(
            violations,
            vec![
                LayoutViolation::DuplicateWidget { breakpoint: Breakpoint::Xs, id: "a".into() },
                LayoutViolation::SizeOutOfBounds { breakpoint: Breakpoint::Xs, id: "b".into(), w: 4, h: 9 },
                LayoutViolation::OutsideGrid { breakpoint: Breakpoint::Xs, id: "b".into() },
            ]
        );
    }

    #[test]
    fn test_far_right_origin_is_outside_grid() {
        let snapshot = LayoutSnapshot::new()
            .with_breakpoint(Breakpoint::Lg, vec![WidgetPlacement::new("stats-hrv", u32::MAX, 0, 3, 2)]);
        assert_eq!(
            snapshot.violations(&WIDGET_CONSTRAINTS),
            vec![LayoutViolation::OutsideGrid {
                breakpoint: Breakpoint::Lg,
                id: "stats-hrv".to_string(),
            }]
        );

        let moved = snapshot.with_moved(Breakpoint::Lg, "stats-hrv", u32::MAX, 0).unwrap();
        assert_eq!(
            moved.placement(Breakpoint::Lg, "stats-hrv"),
            Some(&WidgetPlacement::new("stats-hrv", 9, 0, 3, 2))
        );
    }

    #[test]
    fn test_layout_data_from_submitted() {
        let data = LayoutData::from_submitted(json!({ "lg": [{ "i": "a", "x": 0, "y": 0, "w": 2, "h": 2 }] }));
        assert!(data.as_snapshot().is_some());

        let data = LayoutData::from_submitted(json!({ "huge": [1, 2, 3] }));
        assert_eq!(data, LayoutData::fallback());

        let data = LayoutData::from_submitted(json!("not a layout"));
        assert_eq!(data, LayoutData::fallback());
    }

    #[test]
    fn test_layout_data_deserializes_fallback_list() {
        let data: LayoutData =
            serde_json::from_value(json!({ "widgets": ["fitness", "nutrition", "goals", "recommendations"] })).unwrap();
        assert_eq!(data, LayoutData::fallback());
    }
}
