use async_trait::async_trait;
use log::{debug, info};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions},
    QueryBuilder, Sqlite,
};
use std::time::Duration;

use super::{
    ClimateData, DailyTemperatureSummary, DateRange, Error, PrecipitationReading, Station,
    TemperatureObservation, CLIMATE_SCHEMA,
};

/// Pooled, read-only view of the climate database. Every query checks a
/// connection out of the pool for its own duration.
#[derive(Clone)]
pub struct ClimateAccess {
    pool: SqlitePool,
}

impl ClimateAccess {
    /// Open `path` read-only and validate its schema.
    pub async fn connect(path: &str, max_connections: u32) -> Result<Self, Error> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .read_only(true)
            .create_if_missing(false)
            .pragma("busy_timeout", "5000");

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(30))
            .connect_with(options)
            .await?;

        let access = Self::from_pool(pool);
        access.validate_schema().await?;
        info!("Climate database opened read-only at: {}", path);

        Ok(access)
    }

    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Fail unless every declared table and column exists.
    pub async fn validate_schema(&self) -> Result<(), Error> {
        for table in CLIMATE_SCHEMA.iter() {
            let columns: Vec<String> =
                sqlx::query_scalar("SELECT name FROM pragma_table_info(?)")
                    .bind(table.name)
                    .fetch_all(&self.pool)
                    .await?;
            table.check(&columns)?;
            debug!("table `{}` has columns {:?}", table.name, columns);
        }
        Ok(())
    }
}

#[async_trait]
impl ClimateData for ClimateAccess {
    async fn most_recent_date(&self) -> Result<Option<String>, Error> {
        let date: Option<String> = sqlx::query_scalar("SELECT MAX(date) FROM measurement")
            .fetch_one(&self.pool)
            .await?;
        Ok(date)
    }

    async fn precipitation_since(
        &self,
        cutoff: &str,
    ) -> Result<Vec<PrecipitationReading>, Error> {
        let readings = sqlx::query_as::<_, PrecipitationReading>(
            "SELECT date, prcp FROM measurement WHERE date >= ?",
        )
        .bind(cutoff)
        .fetch_all(&self.pool)
        .await?;
        Ok(readings)
    }

    async fn stations(&self) -> Result<Vec<Station>, Error> {
        let stations = sqlx::query_as::<_, Station>(
            "SELECT id, station, name, latitude, longitude, elevation FROM station",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(stations)
    }

    async fn most_active_station_since(&self, cutoff: &str) -> Result<Option<String>, Error> {
        let station: Option<String> =
            sqlx::query_scalar("SELECT MAX(station) FROM measurement WHERE date >= ?")
                .bind(cutoff)
                .fetch_one(&self.pool)
                .await?;
        Ok(station)
    }

    async fn station_temperatures_since(
        &self,
        station: &str,
        cutoff: &str,
    ) -> Result<Vec<TemperatureObservation>, Error> {
        let observations = sqlx::query_as::<_, TemperatureObservation>(
            "SELECT date, tobs FROM measurement WHERE station = ? AND date >= ?",
        )
        .bind(station)
        .bind(cutoff)
        .fetch_all(&self.pool)
        .await?;
        Ok(observations)
    }

    async fn daily_temperature_summary(
        &self,
        range: &DateRange,
    ) -> Result<Vec<DailyTemperatureSummary>, Error> {
        let mut query = QueryBuilder::<Sqlite>::new(
            "SELECT date, \
             CAST(MIN(tobs) AS REAL) AS tmin, \
             CAST(AVG(tobs) AS REAL) AS tavg, \
             CAST(MAX(tobs) AS REAL) AS tmax \
             FROM measurement WHERE date >= ",
        );
        query.push_bind(range.start.clone());
        if let Some(end) = &range.end {
            query.push(" AND date <= ");
            query.push_bind(end.clone());
        }
        query.push(" GROUP BY date ORDER BY date");

        let summaries = query
            .build_query_as::<DailyTemperatureSummary>()
            .fetch_all(&self.pool)
            .await?;
        Ok(summaries)
    }
}
