use crate::model::AggregateStats;
use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, warn};

/// Per-day view state handed to the day picker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyView {
    pub available_dates: Vec<NaiveDate>,
    pub selected_date: Option<NaiveDate>,
    pub has_previous: bool,
    pub has_next: bool,
}

/// Ordered index of report dates, most recent first.
///
/// "Previous" steps to the next older date, "next" to the next newer one.
/// Stepping past either end leaves the date unchanged.
#[derive(Debug, Clone, Default)]
pub struct DateNavigator {
    index: Vec<NaiveDate>,
}

impl DateNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_payload(payload: &AggregateStats) -> Self {
        let mut navigator = Self::new();
        navigator.rebuild(payload);
        navigator
    }

    /// Rebuilds the index from the `daily_trend` keys of `payload`.
    pub fn rebuild(&mut self, payload: &AggregateStats) -> usize {
        let mut dates: Vec<NaiveDate> = payload
            .daily_trend
            .keys()
            .filter_map(|key| match NaiveDate::parse_from_str(key, "%Y-%m-%d") {
                Ok(date) => Some(date),
                Err(e) => {
                    warn!("Skipping daily trend key {:?}: {}", key, e);
                    None
                }
            })
            .collect();

        dates.sort_unstable_by(|a, b| b.cmp(a));
        dates.dedup();

        debug!("Rebuilt date index with {} dates", dates.len());
        self.index = dates;
        self.index.len()
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.index
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// The most recent date, selected on first load.
    pub fn default_selection(&self) -> Option<NaiveDate> {
        self.index.first().copied()
    }

    fn position(&self, date: NaiveDate) -> Option<usize> {
        self.index.iter().position(|d| *d == date)
    }

    /// `date` if it is part of the index.
    pub fn current(&self, date: NaiveDate) -> Option<NaiveDate> {
        self.position(date).map(|pos| self.index[pos])
    }

    pub fn has_previous(&self, date: NaiveDate) -> bool {
        self.position(date)
            .map_or(false, |pos| pos + 1 < self.index.len())
    }

    pub fn has_next(&self, date: NaiveDate) -> bool {
        self.position(date).map_or(false, |pos| pos > 0)
    }

    pub fn previous(&self, date: NaiveDate) -> NaiveDate {
        match self.position(date) {
            Some(pos) if pos + 1 < self.index.len() => self.index[pos + 1],
            _ => date,
        }
    }

    pub fn next(&self, date: NaiveDate) -> NaiveDate {
        match self.position(date) {
            Some(pos) if pos > 0 => self.index[pos - 1],
            _ => date,
        }
    }

    pub fn view(&self, selected: Option<NaiveDate>) -> DailyView {
        DailyView {
            available_dates: self.index.clone(),
            selected_date: selected,
            has_previous: selected.map_or(false, |d| self.has_previous(d)),
            has_next: selected.map_or(false, |d| self.has_next(d)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DailyBucket, OrderedMap};

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn payload_with_days(days: &[&str]) -> AggregateStats {
        let daily_trend: OrderedMap<DailyBucket> = days
            .iter()
            .map(|d| (d.to_string(), DailyBucket { sales: 1.0, liters: 1.0 }))
            .collect();
        AggregateStats {
            total_transactions: days.len() as u64,
            daily_trend,
            ..Default::default()
        }
    }

    #[test]
    fn test_rebuild_sorts_descending() {
        let navigator =
            DateNavigator::from_payload(&payload_with_days(&["2024-03-01", "2024-03-03", "2024-03-02"]));

        assert_eq!(
            navigator.dates(),
            &[date("2024-03-03"), date("2024-03-02"), date("2024-03-01")]
        );
        assert_eq!(navigator.default_selection(), Some(date("2024-03-03")));
    }

    #[test]
    fn test_navigation_boundaries() {
        let navigator =
            DateNavigator::from_payload(&payload_with_days(&["2024-03-03", "2024-03-02", "2024-03-01"]));

        let oldest = date("2024-03-01");
        assert!(!navigator.has_previous(oldest));
        assert!(navigator.has_next(oldest));
        assert_eq!(navigator.previous(oldest), oldest);
        assert_eq!(navigator.next(oldest), date("2024-03-02"));

        let newest = date("2024-03-03");
        assert!(!navigator.has_next(newest));
        assert!(navigator.has_previous(newest));
        assert_eq!(navigator.next(newest), newest);
        assert_eq!(navigator.previous(newest), date("2024-03-02"));
    }

    #[test]
    fn test_unknown_date_has_no_neighbours() {
        let navigator = DateNavigator::from_payload(&payload_with_days(&["2024-03-03", "2024-03-01"]));
        let missing = date("2024-03-02");

        assert_eq!(navigator.current(missing), None);
        assert!(!navigator.has_previous(missing));
        assert!(!navigator.has_next(missing));
        assert_eq!(navigator.previous(missing), missing);
        assert_eq!(navigator.next(missing), missing);
    }

    #[test]
    fn test_non_contiguous_dates_step_over_gaps() {
        let navigator =
            DateNavigator::from_payload(&payload_with_days(&["2024-01-05", "2024-02-20", "2024-01-10"]));

        assert_eq!(navigator.previous(date("2024-02-20")), date("2024-01-10"));
        assert_eq!(navigator.next(date("2024-01-05")), date("2024-01-10"));
    }

    #[test]
    fn test_empty_index_has_no_selection() {
        let mut navigator = DateNavigator::from_payload(&payload_with_days(&["2024-03-01"]));
        assert_eq!(navigator.rebuild(&AggregateStats::default()), 0);
        assert!(navigator.is_empty());
        assert_eq!(navigator.default_selection(), None);

        let view = navigator.view(None);
        assert!(view.available_dates.is_empty());
        assert!(!view.has_previous && !view.has_next);
    }

    #[test]
    fn test_invalid_keys_are_skipped() {
        let navigator = DateNavigator::from_payload(&payload_with_days(&["2024-03-01", "not-a-date"]));
        assert_eq!(navigator.dates(), &[date("2024-03-01")]);
    }

    #[test]
    fn test_view_reports_flags_for_selection() {
        let navigator =
            DateNavigator::from_payload(&payload_with_days(&["2024-03-03", "2024-03-02", "2024-03-01"]));
        let view = navigator.view(Some(date("2024-03-02")));

        assert_eq!(view.available_dates.len(), 3);
        assert!(view.has_previous);
        assert!(view.has_next);
    }
}
