use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Series is not strictly ascending: {current} follows {previous}")]
    UnorderedSeries {
        previous: NaiveDate,
        current: NaiveDate,
    },

    #[error("Unknown indicator: {0}")]
    UnknownIndicator(String),

    #[error("Unknown cadence: {0}")]
    UnknownCadence(String),
}
