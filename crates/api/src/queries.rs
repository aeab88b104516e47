use log::debug;

use crate::db::{
    one_year_before, ClimateData, DailyTemperatureSummary, DateRange, Error,
    PrecipitationByDate, Station, TemperatureObservation,
};

/// Lower bound for the last-year endpoints, `None` when there are no
/// measurements to anchor the window on.
pub async fn last_year_cutoff(db: &dyn ClimateData) -> Result<Option<String>, Error> {
    match db.most_recent_date().await? {
        Some(most_recent) => {
            let cutoff = one_year_before(&most_recent)?;
            debug!("last year window: {} to {}", cutoff, most_recent);
            Ok(Some(cutoff))
        }
        None => {
            debug!("measurement table is empty, no last year window");
            Ok(None)
        }
    }
}

pub async fn last_year_precipitation(db: &dyn ClimateData) -> Result<PrecipitationByDate, Error> {
    let Some(cutoff) = last_year_cutoff(db).await? else {
        return Ok(PrecipitationByDate::default());
    };

    let readings = db.precipitation_since(&cutoff).await?;
    Ok(readings.into_iter().collect())
}

pub async fn all_stations(db: &dyn ClimateData) -> Result<Vec<Station>, Error> {
    db.stations().await
}

/// Observed temperatures over the last year for the "most active" station.
///
/// The most active station is the greatest station code reporting inside
/// the window, not the one with the most observations.
pub async fn most_active_station_temperatures(
    db: &dyn ClimateData,
) -> Result<Vec<TemperatureObservation>, Error> {
    let Some(cutoff) = last_year_cutoff(db).await? else {
        return Ok(vec![]);
    };

    let Some(station) = db.most_active_station_since(&cutoff).await? else {
        return Ok(vec![]);
    };
    debug!("most active station since {}: {}", cutoff, station);

    db.station_temperatures_since(&station, &cutoff).await
}

pub async fn temperature_summary(
    db: &dyn ClimateData,
    range: &DateRange,
) -> Result<Vec<DailyTemperatureSummary>, Error> {
    db.daily_temperature_summary(range).await
}
