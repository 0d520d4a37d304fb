use crate::model::FilterParams;
use tracing::debug;

/// Holds the one active date-range filter for the dashboard view.
#[derive(Debug, Clone, Default)]
pub struct FilterController {
    active: FilterParams,
    explicitly_applied: bool,
}

impl FilterController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the active filter and returns the params for the next fetch.
    ///
    /// An all-empty filter fetches the same data as [`clear`](Self::clear) but
    /// still counts as applied for [`is_active`](Self::is_active).
    pub fn apply(&mut self, params: FilterParams) -> FilterParams {
        debug!(start = ?params.start_date, end = ?params.end_date, "Applying filter");
        self.active = params;
        self.explicitly_applied = true;
        self.active
    }

    pub fn clear(&mut self) -> FilterParams {
        debug!("Clearing filter");
        self.active = FilterParams::unfiltered();
        self.explicitly_applied = false;
        self.active
    }

    pub fn active(&self) -> FilterParams {
        self.active
    }

    /// Drives the "filter active" badge.
    pub fn is_active(&self) -> bool {
        self.explicitly_applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_apply_replaces_previous_filter() {
        let mut controller = FilterController::new();
        assert!(!controller.is_active());

        controller.apply(FilterParams::range(Some(date("2024-01-01")), None));
        let next = controller.apply(FilterParams::range(None, Some(date("2024-02-01"))));

        assert_eq!(next.start_date, None);
        assert_eq!(controller.active().end_date, Some(date("2024-02-01")));
        assert!(controller.is_active());
    }

    #[test]
    fn test_empty_apply_fetches_unfiltered_but_stays_active() {
        let mut controller = FilterController::new();
        let params = controller.apply(FilterParams::default());

        assert!(params.is_unfiltered());
        assert!(controller.is_active());
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut controller = FilterController::new();
        controller.apply(FilterParams::single_day(date("2024-03-01")));

        let params = controller.clear();
        assert!(params.is_unfiltered());
        assert!(!controller.is_active());
    }
}
