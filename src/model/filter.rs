use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Date-range restriction for the stats endpoint. Both bounds are inclusive.
///
/// Both bounds absent means "unfiltered". An inverted range is not rejected
/// here; the server answers it with an empty payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterParams {
    #[serde(
        default,
        deserialize_with = "optional_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_date: Option<NaiveDate>,
    #[serde(
        default,
        deserialize_with = "optional_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_date: Option<NaiveDate>,
}

// Form inputs send "" for an untouched date picker.
fn optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

impl FilterParams {
    pub fn unfiltered() -> Self {
        Self::default()
    }

    pub fn range(start_date: Option<NaiveDate>, end_date: Option<NaiveDate>) -> Self {
        Self { start_date, end_date }
    }

    pub fn single_day(date: NaiveDate) -> Self {
        Self {
            start_date: Some(date),
            end_date: Some(date),
        }
    }

    pub fn is_unfiltered(&self) -> bool {
        self.start_date.is_none() && self.end_date.is_none()
    }

    /// Query string pairs for the stats endpoint; absent bounds are omitted.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(start) = self.start_date {
            pairs.push(("start_date", start.format("%Y-%m-%d").to_string()));
        }
        if let Some(end) = self.end_date {
            pairs.push(("end_date", end.format("%Y-%m-%d").to_string()));
        }
        pairs
    }
}
