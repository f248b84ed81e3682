use crate::api::reduce::Reducer;
use tracing::warn;

/// Sums the values as signed integers. Values that do not parse are skipped.
pub struct SumReducer;

impl Reducer for SumReducer {
    fn reduce(&self, key: &str, values: &[String]) -> String {
        let mut total: i64 = 0;
        for value in values {
            match value.trim().parse::<i64>() {
                Ok(n) => total = total.saturating_add(n),
                Err(_) => warn!("skipping non-numeric value {:?} for key {:?}", value, key),
            }
        }
        total.to_string()
    }
}

/// Emits how many values were recorded for the key.
pub struct CountReducer;

impl Reducer for CountReducer {
    fn reduce(&self, _key: &str, values: &[String]) -> String {
        values.len().to_string()
    }
}

pub struct ConcatReducer {
    pub separator: String,
}

impl ConcatReducer {
    pub fn new(separator: &str) -> Self {
        ConcatReducer {
            separator: separator.to_string(),
        }
    }
}

impl Reducer for ConcatReducer {
    fn reduce(&self, _key: &str, values: &[String]) -> String {
        values.join(&self.separator)
    }
}
