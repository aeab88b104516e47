use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// One `(date, prcp)` row from the measurement table.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct PrecipitationReading {
    pub date: String,
    pub prcp: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Station {
    pub id: i64,
    /// Station code, e.g. `USC00519397`
    pub station: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct TemperatureObservation {
    pub date: String,
    pub tobs: f64,
}

/// Per-date aggregate of observed temperatures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct DailyTemperatureSummary {
    pub date: String,
    #[serde(rename = "TMIN")]
    pub tmin: f64,
    #[serde(rename = "TMAX")]
    pub tmax: f64,
    #[serde(rename = "TAVG")]
    pub tavg: f64,
}

/// Inclusive date window for the temperature summary. Bounds are passed to
/// the store verbatim and compared as `YYYY-MM-DD` strings.
#[derive(Debug, Clone, PartialEq)]
pub struct DateRange {
    pub start: String,
    pub end: Option<String>,
}

impl DateRange {
    pub fn starting(start: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: None,
        }
    }

    pub fn between(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: Some(end.into()),
        }
    }
}

/// Precipitation values keyed by measurement date. Several stations may
/// report on the same date, so each date maps to every value seen for it in
/// query order. Keys serialize in ascending date order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct PrecipitationByDate(BTreeMap<String, Vec<Option<f64>>>);

impl PrecipitationByDate {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, date: &str) -> Option<&[Option<f64>]> {
        self.0.get(date).map(Vec::as_slice)
    }

    pub fn dates(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl FromIterator<PrecipitationReading> for PrecipitationByDate {
    fn from_iter<I: IntoIterator<Item = PrecipitationReading>>(iter: I) -> Self {
        let mut by_date: BTreeMap<String, Vec<Option<f64>>> = BTreeMap::new();
        for reading in iter {
            by_date.entry(reading.date).or_default().push(reading.prcp);
        }
        Self(by_date)
    }
}
