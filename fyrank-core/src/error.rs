/// Error types for input validation.
///
/// Only recoverable conditions live here: values that arrive from a user or a
/// file and may be wrong. Caller bugs (unknown ids, self-comparisons, fewer
/// than two entities to pair) panic instead.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, PartialEq)]
pub enum Error {
    /// A preference weight outside the -2..=2 scale.
    #[error("Invalid preference weight {0}: expected an integer from -2 to 2")]
    InvalidPreference(i8),

    /// A dimension weight outside [0, 1] or not finite.
    #[error("Invalid {dimension} weight {value}: expected a number from 0 to 1")]
    WeightOutOfRange {
        dimension: &'static str,
        value: f64,
    },

    /// A programme carrying more placements than the data format allows.
    #[error("Programme {job_id} has {count} placements, at most {max} are allowed")]
    TooManyPlacements {
        job_id: String,
        count: usize,
        max: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_preference() {
        let msg = Error::InvalidPreference(3).to_string();
        assert!(msg.contains("Invalid preference weight 3"));
    }

    #[test]
    fn test_error_display_weight() {
        let msg = Error::WeightOutOfRange { dimension: "region", value: 1.5 }.to_string();
        assert!(msg.contains("region"));
        assert!(msg.contains("1.5"));
    }
}
