use std::collections::BTreeMap;

/// Points required to advance out of the given level.
pub trait ThresholdSource {
    fn required_points(&self, level: i32) -> i64;
}

/// Formulaic fallback used when no per-level setting exists.
pub struct FormulaThresholds;

impl ThresholdSource for FormulaThresholds {
    fn required_points(&self, level: i32) -> i64 {
        i64::from(level) * 100
    }
}

/// Snapshot of the configured `level_settings` rows, loaded in one batch so
/// the level-up loop never goes back to the store per iteration.
pub struct TableThresholds {
    overrides: BTreeMap<i32, i64>,
}

impl TableThresholds {
    pub fn new(rows: impl IntoIterator<Item = (i32, i64)>) -> Self {
        Self {
            overrides: rows.into_iter().collect(),
        }
    }
}

impl ThresholdSource for TableThresholds {
    fn required_points(&self, level: i32) -> i64 {
        // A non-positive configured threshold would keep the normalization
        // loop alive forever, so it is clamped to 1.
        self.overrides
            .get(&level)
            .copied()
            .unwrap_or_else(|| FormulaThresholds.required_points(level))
            .max(1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelProgress {
    pub level: i32,
    pub points: i64,
    pub levels_gained: i32,
}

/// Credits `delta` points and normalizes (level, points) against the
/// thresholds. The loop only fires upward: a negative delta is accepted
/// as-is and never de-levels, even when it leaves points negative.
pub fn apply(level: i32, points: i64, delta: i64, thresholds: &dyn ThresholdSource) -> LevelProgress {
    let mut level = level.max(1);
    let mut points = points + delta;
    let mut levels_gained = 0;

    while points >= thresholds.required_points(level) {
        points -= thresholds.required_points(level);
        level += 1;
        levels_gained += 1;
    }

    LevelProgress {
        level,
        points,
        levels_gained,
    }
}
