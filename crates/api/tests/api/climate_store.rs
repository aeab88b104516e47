use crate::helpers::{
    create_store, create_store_with_ddl, hawaii_stations, late_august_measurements,
    spawn_lazy_store_app, spawn_store_app, year_of_measurements, KANEOHE, MEASUREMENT_DDL,
    STATION_DDL, WAIKIKI,
};
use axum::http::StatusCode;
use climate_api::{one_year_before, ClimateAccess, ClimateData, DateRange, Error};

#[tokio::test]
async fn stations_return_every_row_with_six_fields() {
    let stations = hawaii_stations();
    let store = create_store(&[], &stations).await;
    let test_app = spawn_store_app(&store).await;

    let body = test_app.get_json("/api/v1.0/stations").await;
    let rows = body.as_array().unwrap();

    assert_eq!(rows.len(), stations.len());
    for (row, expected) in rows.iter().zip(&stations) {
        let object = row.as_object().unwrap();
        assert_eq!(object.len(), 6);
        assert_eq!(row["id"], expected.id);
        assert_eq!(row["station"], expected.station.as_str());
        assert_eq!(row["name"], expected.name.as_str());
        assert_eq!(row["latitude"], expected.latitude);
        assert_eq!(row["longitude"], expected.longitude);
        assert_eq!(row["elevation"], expected.elevation);
    }
}

#[tokio::test]
async fn precipitation_for_late_august_has_four_dates() {
    let store = create_store(&late_august_measurements(), &hawaii_stations()).await;
    let test_app = spawn_store_app(&store).await;

    let body = test_app.get_json("/api/v1.0/precipitation").await;
    let by_date = body.as_object().unwrap();

    assert_eq!(
        by_date.keys().collect::<Vec<_>>(),
        vec!["2017-08-20", "2017-08-21", "2017-08-22", "2017-08-23"]
    );
    for values in by_date.values() {
        assert!(!values.as_array().unwrap().is_empty());
    }
    assert_eq!(body["2017-08-22"].as_array().unwrap().len(), 1);
    assert!(body["2017-08-21"]
        .as_array()
        .unwrap()
        .iter()
        .any(|v| v.is_null()));
}

#[tokio::test]
async fn precipitation_stays_inside_last_year_window() {
    let store = create_store(&year_of_measurements(), &hawaii_stations()).await;
    let test_app = spawn_store_app(&store).await;

    let body = test_app.get_json("/api/v1.0/precipitation").await;
    let by_date = body.as_object().unwrap();

    let most_recent = "2017-08-23";
    let cutoff = one_year_before(most_recent).unwrap();
    assert_eq!(cutoff, "2016-08-23");

    assert_eq!(by_date.len(), 9);
    for date in by_date.keys() {
        assert!(
            date.as_str() >= cutoff.as_str() && date.as_str() <= most_recent,
            "{date} outside window"
        );
    }
    assert!(!by_date.contains_key("2016-08-22"));
    assert_eq!(body["2016-08-23"].as_array().unwrap().len(), 2);
    assert_eq!(body["2017-08-03"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn tobs_returns_greatest_station_code_in_window() {
    let store = create_store(&year_of_measurements(), &hawaii_stations()).await;
    let test_app = spawn_store_app(&store).await;

    let body = test_app.get_json("/api/v1.0/tobs").await;
    let rows = body.as_array().unwrap();

    // WAIKIKI has the greatest code; its 2016-08-22 row is outside the window
    assert_eq!(rows.len(), 9);
    assert_eq!(rows.first().unwrap()["date"], "2016-08-23");
    assert_eq!(rows.first().unwrap()["tobs"], 81.0);
    assert_eq!(rows[1]["date"], "2017-08-01");
    assert_eq!(rows[1]["tobs"], 75.0);
    assert_eq!(rows.last().unwrap()["date"], "2017-08-23");
    for row in rows {
        assert_eq!(row.as_object().unwrap().len(), 2);
    }
}

#[tokio::test]
async fn range_summary_covers_each_day_with_ordered_aggregates() {
    let store = create_store(&year_of_measurements(), &hawaii_stations()).await;
    let test_app = spawn_store_app(&store).await;

    let body = test_app.get_json("/api/v1.0/2017-08-01/2017-08-07").await;
    let rows = body.as_array().unwrap();

    assert_eq!(rows.len(), 7);
    for (i, row) in rows.iter().enumerate() {
        let date = row["date"].as_str().unwrap();
        assert_eq!(date, format!("2017-08-0{}", i + 1));
        assert!(("2017-08-01"..="2017-08-07").contains(&date));

        let tmin = row["TMIN"].as_f64().unwrap();
        let tavg = row["TAVG"].as_f64().unwrap();
        let tmax = row["TMAX"].as_f64().unwrap();
        assert!(tmin <= tavg && tavg <= tmax, "{row}");

        let offset = i as f64;
        assert_eq!(tmin, 70.0 + offset);
        assert_eq!(tavg, 75.0 + offset);
        assert_eq!(tmax, 80.0 + offset);
    }
}

#[tokio::test]
async fn open_ended_range_runs_to_latest_date() {
    let store = create_store(&year_of_measurements(), &hawaii_stations()).await;
    let test_app = spawn_store_app(&store).await;

    let body = test_app.get_json("/api/v1.0/2017-08-07").await;
    let dates: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["date"].as_str().unwrap())
        .collect();

    assert_eq!(dates, vec!["2017-08-07", "2017-08-23"]);
}

#[tokio::test]
async fn range_after_all_data_is_empty() {
    let store = create_store(&year_of_measurements(), &hawaii_stations()).await;
    let test_app = spawn_store_app(&store).await;

    let (status, body) = test_app.get("/api/v1.0/9999-01-01").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"[]");
}

#[tokio::test]
async fn empty_measurement_table_yields_empty_structures() {
    let store = create_store(&[], &hawaii_stations()).await;
    let test_app = spawn_store_app(&store).await;

    let (status, body) = test_app.get("/api/v1.0/tobs").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"[]");

    let (status, body) = test_app.get("/api/v1.0/precipitation").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"{}");

    let (status, body) = test_app.get("/api/v1.0/2017-01-01/2017-12-31").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"[]");
}

#[tokio::test]
async fn repeated_requests_are_byte_identical() {
    let store = create_store(&year_of_measurements(), &hawaii_stations()).await;
    let test_app = spawn_store_app(&store).await;

    for uri in [
        "/api/v1.0/precipitation",
        "/api/v1.0/stations",
        "/api/v1.0/tobs",
        "/api/v1.0/2017-08-01",
        "/api/v1.0/2017-08-01/2017-08-07",
    ] {
        let (_, first) = test_app.get(uri).await;
        let (_, second) = test_app.get(uri).await;
        assert_eq!(first, second, "{uri}");
    }
}

#[tokio::test]
async fn store_queries_filter_by_station_and_cutoff() {
    let store = create_store(&year_of_measurements(), &hawaii_stations()).await;
    let climate_db = ClimateAccess::connect(&store.path, 1).await.unwrap();

    assert_eq!(
        climate_db.most_recent_date().await.unwrap().as_deref(),
        Some("2017-08-23")
    );
    assert_eq!(
        climate_db
            .most_active_station_since("2017-08-02")
            .await
            .unwrap()
            .as_deref(),
        Some(WAIKIKI)
    );

    let kaneohe = climate_db
        .station_temperatures_since(KANEOHE, "2017-08-07")
        .await
        .unwrap();
    assert_eq!(kaneohe.len(), 2);
    assert!(kaneohe.iter().all(|o| o.date.as_str() >= "2017-08-07"));

    let summary = climate_db
        .daily_temperature_summary(&DateRange::between("2017-08-03", "2017-08-03"))
        .await
        .unwrap();
    assert_eq!(summary.len(), 1);
    assert_eq!(summary[0].tmin, 72.0);
    assert_eq!(summary[0].tavg, 77.0);
    assert_eq!(summary[0].tmax, 82.0);
}

#[tokio::test]
async fn connect_rejects_missing_column() {
    let store = create_store_with_ddl(&[
        "CREATE TABLE measurement (id INTEGER PRIMARY KEY, station TEXT, date TEXT, prcp FLOAT)",
        STATION_DDL,
    ])
    .await;

    let err = ClimateAccess::connect(&store.path, 1).await.err().unwrap();
    assert!(matches!(err, Error::Schema(ref msg) if msg.contains("tobs")), "{err}");
}

#[tokio::test]
async fn connect_rejects_missing_table() {
    let store = create_store_with_ddl(&[MEASUREMENT_DDL]).await;

    let err = ClimateAccess::connect(&store.path, 1).await.err().unwrap();
    assert!(matches!(err, Error::Schema(ref msg) if msg.contains("`station` not found")), "{err}");
}

#[tokio::test]
async fn connect_never_creates_a_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.sqlite");

    let result = ClimateAccess::connect(path.to_str().unwrap(), 1).await;
    assert!(result.is_err());
    assert!(!path.exists());
}

#[tokio::test]
async fn store_is_opened_read_only() {
    let store = create_store(&late_august_measurements(), &[]).await;
    let climate_db = ClimateAccess::connect(&store.path, 1).await.unwrap();

    let result = sqlx::query("DELETE FROM measurement")
        .execute(climate_db.pool())
        .await;
    assert!(result.is_err());
    assert_eq!(
        climate_db.most_recent_date().await.unwrap().as_deref(),
        Some("2017-08-23")
    );
}

#[tokio::test]
async fn missing_database_file_is_service_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.sqlite");
    let test_app = spawn_lazy_store_app(path.to_str().unwrap()).await;

    for uri in ["/api/v1.0/stations", "/api/v1.0/tobs", "/api/v1.0/2017-08-01"] {
        let (status, body) = test_app.get(uri).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE, "{uri}");
        assert_eq!(
            String::from_utf8(body).unwrap(),
            "Climate data store is unavailable"
        );
    }
    assert!(!path.exists());
}

#[tokio::test]
async fn deleted_database_file_is_service_unavailable() {
    let store = create_store(&late_august_measurements(), &hawaii_stations()).await;
    let test_app = spawn_lazy_store_app(&store.path).await;

    std::fs::remove_file(&store.path).unwrap();

    let (status, _) = test_app.get("/api/v1.0/tobs").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    let (status, _) = test_app.get("/api/v1.0/precipitation").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}
