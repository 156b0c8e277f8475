//! Narrative acts and their progress ranges.
//!
//! Acts partition `[0, 1]` into half-open ranges `[start, end)`. The upper
//! boundary `progress == 1.0` belongs to the last act.

use serde::{Deserialize, Serialize};

/// Identifier of a narrative act (1-based in authored content).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActId(pub u8);

impl ActId {
    /// Roman numeral label used by overlays ("I" .. "X"), or the number.
    pub fn numeral(&self) -> String {
        const NUMERALS: [&str; 10] = ["I", "II", "III", "IV", "V", "VI", "VII", "VIII", "IX", "X"];
        match self.0 {
            n @ 1..=10 => NUMERALS[(n - 1) as usize].to_string(),
            n => n.to_string(),
        }
    }
}

impl std::fmt::Display for ActId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Act {}", self.numeral())
    }
}

/// A half-open progress range `[start, end)` owned by one act.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActRange {
    pub act: ActId,
    pub start: f64,
    pub end: f64,
}

impl ActRange {
    pub fn new(act: u8, start: f64, end: f64) -> Self {
        Self {
            act: ActId(act),
            start,
            end,
        }
    }

    /// Whether `progress` falls in `[start, end)`.
    pub fn contains(&self, progress: f64) -> bool {
        progress >= self.start && progress < self.end
    }

    /// Range width.
    pub fn span(&self) -> f64 {
        self.end - self.start
    }

    /// Position of `progress` inside this range, clamped to `[0, 1]`.
    pub fn local(&self, progress: f64) -> f64 {
        if self.span() <= 0.0 {
            return 0.0;
        }
        ((progress - self.start) / self.span()).clamp(0.0, 1.0)
    }
}

/// Resolve the act owning `progress`.
///
/// Scans `ranges` in order and returns the first with
/// `start <= progress < end`. Progress that matches no range falls back to
/// the last range (this is how `progress == 1.0` resolves), except progress
/// below the first range (or NaN), which resolves to the first range.
/// Returns `None` only for an empty slice.
pub fn resolve_act(progress: f64, ranges: &[ActRange]) -> Option<ActId> {
    let first = ranges.first()?;
    if progress.is_nan() || progress < first.start {
        return Some(first.act);
    }
    ranges
        .iter()
        .find(|range| range.contains(progress))
        .or(ranges.last())
        .map(|range| range.act)
}

/// Tolerance when checking that consecutive ranges touch.
const BOUNDARY_EPSILON: f64 = 1e-9;

/// A validated partition of `[0, 1]` into act ranges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ActRange>", into = "Vec<ActRange>")]
pub struct ActTable {
    ranges: Vec<ActRange>,
}

impl ActTable {
    /// Validate and build a table.
    ///
    /// Boundaries within tolerance are snapped so the stored ranges touch
    /// exactly and span `[0, 1]`.
    pub fn new(mut ranges: Vec<ActRange>) -> Result<Self, ActError> {
        let (first, last) = match (ranges.first(), ranges.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(ActError::Empty),
        };

        if first.start.abs() > BOUNDARY_EPSILON {
            return Err(ActError::DoesNotStartAtZero { start: first.start });
        }
        if (last.end - 1.0).abs() > BOUNDARY_EPSILON {
            return Err(ActError::DoesNotEndAtOne { end: last.end });
        }

        for (i, range) in ranges.iter().enumerate() {
            if !range.start.is_finite() || !range.end.is_finite() || range.end <= range.start {
                return Err(ActError::EmptyRange { act: range.act });
            }
            if ranges[..i].iter().any(|r| r.act == range.act) {
                return Err(ActError::DuplicateAct { act: range.act });
            }
            if let Some(next) = ranges.get(i + 1) {
                let gap = next.start - range.end;
                if gap > BOUNDARY_EPSILON {
                    return Err(ActError::Gap {
                        after: range.act,
                        from: range.end,
                        to: next.start,
                    });
                }
                if gap < -BOUNDARY_EPSILON {
                    return Err(ActError::Overlap {
                        first: range.act,
                        second: next.act,
                    });
                }
            }
        }

        ranges[0].start = 0.0;
        for i in 1..ranges.len() {
            ranges[i].start = ranges[i - 1].end;
        }
        let last = ranges.len() - 1;
        ranges[last].end = 1.0;
        if let Some(range) = ranges.iter().find(|r| r.end <= r.start) {
            return Err(ActError::EmptyRange { act: range.act });
        }

        Ok(Self { ranges })
    }

    /// The five-act breakdown of the default story.
    pub fn five_act() -> Self {
        Self {
            ranges: vec![
                ActRange::new(1, 0.0, 0.2),
                ActRange::new(2, 0.2, 0.35),
                ActRange::new(3, 0.35, 0.6),
                ActRange::new(4, 0.6, 0.8),
                ActRange::new(5, 0.8, 1.0),
            ],
        }
    }

    /// Resolve the act owning `progress`. Always returns an act.
    pub fn resolve(&self, progress: f64) -> ActId {
        // The table is never empty, so the fallback is unreachable.
        resolve_act(progress, &self.ranges).unwrap_or(ActId(0))
    }

    pub fn ranges(&self) -> &[ActRange] {
        &self.ranges
    }

    pub fn range_of(&self, act: ActId) -> Option<&ActRange> {
        self.ranges.iter().find(|r| r.act == act)
    }

    pub fn contains_act(&self, act: ActId) -> bool {
        self.range_of(act).is_some()
    }

    pub fn first(&self) -> ActId {
        self.ranges[0].act
    }

    pub fn last(&self) -> ActId {
        self.ranges[self.ranges.len() - 1].act
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}

impl Default for ActTable {
    fn default() -> Self {
        Self::five_act()
    }
}

impl TryFrom<Vec<ActRange>> for ActTable {
    type Error = ActError;

    fn try_from(ranges: Vec<ActRange>) -> Result<Self, Self::Error> {
        Self::new(ranges)
    }
}

impl From<ActTable> for Vec<ActRange> {
    fn from(table: ActTable) -> Self {
        table.ranges
    }
}

/// Ways an act table can fail to partition `[0, 1]`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ActError {
    #[error("act table is empty")]
    Empty,

    #[error("first act starts at {start}, expected 0")]
    DoesNotStartAtZero { start: f64 },

    #[error("last act ends at {end}, expected 1")]
    DoesNotEndAtOne { end: f64 },

    #[error("{act} has an empty or invalid range")]
    EmptyRange { act: ActId },

    #[error("{act} appears more than once")]
    DuplicateAct { act: ActId },

    #[error("gap after {after}: nothing covers [{from}, {to})")]
    Gap { after: ActId, from: f64, to: f64 },

    #[error("{first} overlaps {second}")]
    Overlap { first: ActId, second: ActId },
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_reference_boundaries() {
        let table = ActTable::five_act();
        assert_eq!(table.resolve(0.0), ActId(1));
        assert_eq!(table.resolve(0.199), ActId(1));
        assert_eq!(table.resolve(0.2), ActId(2));
        assert_eq!(table.resolve(0.35), ActId(3));
        assert_eq!(table.resolve(0.6), ActId(4));
        assert_eq!(table.resolve(0.8), ActId(5));
        assert_eq!(table.resolve(0.999_999), ActId(5));
    }

    #[test]
    fn test_upper_boundary_falls_back_to_last_act() {
        let table = ActTable::five_act();
        // [0.8, 1.0) does not contain 1.0; the fallback must still pick act 5.
        assert!(!table.ranges()[4].contains(1.0));
        assert_eq!(table.resolve(1.0), ActId(5));
        assert_eq!(resolve_act(1.0, table.ranges()), Some(ActId(5)));
    }

    #[test]
    fn test_out_of_range_inputs() {
        let table = ActTable::five_act();
        assert_eq!(table.resolve(-0.5), ActId(1));
        assert_eq!(table.resolve(f64::NAN), ActId(1));
        assert_eq!(table.resolve(3.0), ActId(5));
        assert_eq!(resolve_act(0.5, &[]), None);
    }

    #[test]
    fn test_rejects_gaps_and_overlaps() {
        let gap = ActTable::new(vec![ActRange::new(1, 0.0, 0.4), ActRange::new(2, 0.5, 1.0)]);
        assert!(matches!(gap, Err(ActError::Gap { .. })));

        let overlap =
            ActTable::new(vec![ActRange::new(1, 0.0, 0.6), ActRange::new(2, 0.5, 1.0)]);
        assert!(matches!(overlap, Err(ActError::Overlap { .. })));

        let short = ActTable::new(vec![ActRange::new(1, 0.0, 0.9)]);
        assert_eq!(short, Err(ActError::DoesNotEndAtOne { end: 0.9 }));

        let late = ActTable::new(vec![ActRange::new(1, 0.1, 1.0)]);
        assert_eq!(late, Err(ActError::DoesNotStartAtZero { start: 0.1 }));

        let dup = ActTable::new(vec![ActRange::new(1, 0.0, 0.5), ActRange::new(1, 0.5, 1.0)]);
        assert_eq!(dup, Err(ActError::DuplicateAct { act: ActId(1) }));

        assert_eq!(ActTable::new(vec![]), Err(ActError::Empty));
    }

    #[test]
    fn test_tolerated_gap_is_closed() {
        let table = ActTable::new(vec![
            ActRange::new(1, 0.0, 0.3),
            ActRange::new(2, 0.3 + 5e-10, 0.6),
            ActRange::new(3, 0.6, 1.0 - 5e-10),
        ])
        .unwrap();

        assert_eq!(table.ranges()[1].start, 0.3);
        assert_eq!(table.ranges()[2].end, 1.0);
        assert_eq!(table.resolve(0.300_000_000_2), ActId(2));
        assert_eq!(table.resolve(0.999_999_999_8), ActId(3));
        for pair in table.ranges().windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
    }

    #[test]
    fn test_tolerated_overlap_cannot_swallow_a_range() {
        let squeezed = ActTable::new(vec![
            ActRange::new(1, 0.0, 0.5),
            ActRange::new(2, 0.5 - 5e-10, 0.5 - 1e-10),
            ActRange::new(3, 0.5 - 1e-10, 1.0),
        ]);
        assert_eq!(squeezed, Err(ActError::EmptyRange { act: ActId(2) }));
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: ActTable =
            serde_json::from_str(r#"[{"act":1,"start":0,"end":0.5},{"act":2,"start":0.5,"end":1}]"#)
                .unwrap();
        assert_eq!(ok.len(), 2);
        assert_eq!(ok.last(), ActId(2));

        let bad: Result<ActTable, _> =
            serde_json::from_str(r#"[{"act":1,"start":0,"end":0.4},{"act":2,"start":0.5,"end":1}]"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_local_progress_and_labels() {
        let range = ActRange::new(3, 0.35, 0.6);
        assert!((range.local(0.475) - 0.5).abs() < 1e-12);
        assert_eq!(range.local(0.9), 1.0);
        assert_eq!(ActId(3).to_string(), "Act III");
        assert_eq!(ActId(12).numeral(), "12");
    }

    proptest! {
        #[test]
        fn prop_every_progress_resolves_to_its_range(p in 0.0f64..=1.0) {
            let table = ActTable::five_act();
            let act = table.resolve(p);
            let range = table.range_of(act).unwrap();
            prop_assert!(range.contains(p) || (p == 1.0 && act == table.last()));
            let owners = table.ranges().iter().filter(|r| r.contains(p)).count();
            prop_assert!(owners <= 1);
        }
    }
}
