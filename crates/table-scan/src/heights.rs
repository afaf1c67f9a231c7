//! Per-column usable height thresholds.

use std::collections::BTreeMap;

/// Usable height in meters per data column, built fresh for every pass.
///
/// A usable-height row sets the baseline; a later cloud-base row replaces it
/// only with a positive value. Columns never set have no threshold, and wind
/// layers in such columns are never usable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeightThresholds {
    by_column: BTreeMap<usize, i64>,
}

impl HeightThresholds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a usable-height cell. `None` (unreadable cell) clears the column.
    pub fn set_usable_height(&mut self, column: usize, meters: Option<i64>) {
        match meters {
            Some(meters) => {
                self.by_column.insert(column, meters);
            }
            None => {
                self.by_column.remove(&column);
            }
        }
    }

    /// Record a cloud-base cell. Zero, negative or missing values keep the
    /// current threshold.
    pub fn apply_cloud_base(&mut self, column: usize, meters: Option<i64>) -> bool {
        match meters {
            Some(meters) if meters > 0 => {
                self.by_column.insert(column, meters);
                true
            }
            _ => false,
        }
    }

    pub fn threshold(&self, column: usize) -> Option<i64> {
        self.by_column.get(&column).copied()
    }

    /// Whether a wind layer at `height` lies within the usable band.
    pub fn is_usable(&self, column: usize, height: u32) -> bool {
        self.threshold(column)
            .map(|threshold| i64::from(height) <= threshold)
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.by_column.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_column.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_cloud_base_keeps_baseline() {
        let mut t = HeightThresholds::new();
        t.set_usable_height(2, Some(1800));
        assert!(!t.apply_cloud_base(2, Some(0)));
        assert_eq!(t.threshold(2), Some(1800));
    }

    #[test]
    fn test_positive_cloud_base_overrides() {
        let mut t = HeightThresholds::new();
        t.set_usable_height(2, Some(1800));
        assert!(t.apply_cloud_base(2, Some(1500)));
        assert_eq!(t.threshold(2), Some(1500));
    }

    #[test]
    fn test_missing_cloud_base_keeps_baseline() {
        let mut t = HeightThresholds::new();
        t.set_usable_height(0, Some(1200));
        t.apply_cloud_base(0, None);
        t.apply_cloud_base(0, Some(-50));
        assert_eq!(t.threshold(0), Some(1200));
    }

    #[test]
    fn test_usability_predicate() {
        let mut t = HeightThresholds::new();
        t.set_usable_height(0, Some(1500));
        assert!(t.is_usable(0, 1200));
        assert!(t.is_usable(0, 1500));
        assert!(!t.is_usable(0, 1800));
        assert!(!t.is_usable(1, 0));
    }

    #[test]
    fn test_unreadable_usable_height_clears_column() {
        let mut t = HeightThresholds::new();
        t.set_usable_height(0, Some(1500));
        t.set_usable_height(0, None);
        assert_eq!(t.threshold(0), None);
        assert!(t.is_empty());
    }
}
