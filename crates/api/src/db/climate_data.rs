use async_trait::async_trait;

use super::{
    DailyTemperatureSummary, DateRange, PrecipitationReading, Station, TemperatureObservation,
};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Climate store unavailable: {0}")]
    Unavailable(#[source] sqlx::Error),
    #[error("Failed to query climate store: {0}")]
    Query(#[source] sqlx::Error),
    #[error("Invalid measurement date {date:?}: {source}")]
    InvalidDate {
        date: String,
        source: time::error::Parse,
    },
    #[error("No calendar date exists one year before {0}")]
    DateOutOfRange(String),
    #[error("Failed to format date: {0}")]
    DateFormat(#[from] time::error::Format),
    #[error("Climate store schema mismatch: {0}")]
    Schema(String),
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        let unreachable = match &err {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => true,
            sqlx::Error::Database(db) => db
                .code()
                .is_some_and(|code| is_connection_failure(&code)),
            _ => false,
        };

        if unreachable {
            Error::Unavailable(err)
        } else {
            Error::Query(err)
        }
    }
}

/// SQLite result codes for a database file that cannot be opened or read:
/// IOERR, CANTOPEN and NOTADB. Extended codes keep the primary code in the
/// low byte.
fn is_connection_failure(code: &str) -> bool {
    const SQLITE_IOERR: i32 = 10;
    const SQLITE_CANTOPEN: i32 = 14;
    const SQLITE_NOTADB: i32 = 26;

    match code.parse::<i32>() {
        Ok(code) => matches!(code & 0xff, SQLITE_IOERR | SQLITE_CANTOPEN | SQLITE_NOTADB),
        Err(_) => false,
    }
}

impl Error {
    /// True when the store could not be reached at all, as opposed to a
    /// query that ran and failed.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Error::Unavailable(_))
    }
}

/// Read-only access to the measurement and station tables.
///
/// Date arguments are `YYYY-MM-DD` strings compared lexicographically by
/// the store.
#[async_trait]
pub trait ClimateData: Sync + Send {
    /// Latest measurement date, `None` when the table is empty
    async fn most_recent_date(&self) -> Result<Option<String>, Error>;
    /// `(date, prcp)` for every station on or after `cutoff`
    async fn precipitation_since(&self, cutoff: &str)
        -> Result<Vec<PrecipitationReading>, Error>;
    async fn stations(&self) -> Result<Vec<Station>, Error>;
    /// Greatest station code with a measurement on or after `cutoff`
    async fn most_active_station_since(&self, cutoff: &str) -> Result<Option<String>, Error>;
    async fn station_temperatures_since(
        &self,
        station: &str,
        cutoff: &str,
    ) -> Result<Vec<TemperatureObservation>, Error>;
    /// Min/avg/max `tobs` per date inside `range`, ascending by date
    async fn daily_temperature_summary(
        &self,
        range: &DateRange,
    ) -> Result<Vec<DailyTemperatureSummary>, Error>;
}
