use super::extract::{build_features, build_matrix, to_row};
use super::layout::{FEATURE_COUNT, FEATURE_LAYOUT};
use crate::logic::dataset::{load_corpus, write_corpus};
use crate::logic::generator::{generate, GeneratorConfig};
use crate::logic::risk::{score, AttributeRecord, RiskTables};
use tempfile::tempdir;

fn worst_case() -> AttributeRecord {
    AttributeRecord {
        weather: "Stormy".into(),
        road_condition: "Damaged".into(),
        lighting: "Dark".into(),
        road_type: "National Highway".into(),
        vehicle_type: "Truck".into(),
        location_detail: "Curve".into(),
        speed_limit: 110,
        driver_age: 19,
        alcohol: "Yes".into(),
        license_status: "None".into(),
        num_vehicles: 5,
        time_of_day: "2:00".into(),
        ..Default::default()
    }
}

#[test]
fn test_worst_case_vector() {
    let vector = build_features(&worst_case());
    assert_eq!(
        vector.as_slice(),
        &[0.22, 0.12, 0.12, 0.10, 0.06, 0.06, 0.14, 0.06, 2.0, 110.0, 19.0, 5.0]
    );
}

#[test]
fn test_request_defaults_vector() {
    let vector = build_features(&AttributeRecord::default());
    assert_eq!(
        vector.as_slice(),
        &[0.0, 0.0, 0.0, 0.02, 0.02, 0.0, 0.0, 0.0, 12.0, 50.0, 35.0, 1.0]
    );
}

#[test]
fn test_unknown_categories_are_zero() {
    let record = AttributeRecord {
        weather: "Sandstorm".into(),
        road_condition: "Icy".into(),
        lighting: "Twilight".into(),
        road_type: "Dirt Track".into(),
        vehicle_type: "Tractor".into(),
        location_detail: "Roundabout".into(),
        alcohol: "yes".into(),
        license_status: "none".into(),
        ..Default::default()
    };
    let vector = build_features(&record);
    assert_eq!(vector.len(), FEATURE_COUNT);
    assert!(vector.as_slice()[..8].iter().all(|v| *v == 0.0));
}

#[test]
fn test_builder_agrees_with_scorer_tables() {
    // The categorical part of the vector is exactly what the scorer sums
    let tables = RiskTables::standard();
    let record = worst_case();
    let vector = build_features(&record);
    let categorical: f64 = vector.as_slice()[..8].iter().sum();
    let expected = tables.weather.lookup(&record.weather)
        + tables.road_condition.lookup(&record.road_condition)
        + tables.lighting.lookup(&record.lighting)
        + tables.road_type.lookup(&record.road_type)
        + tables.vehicle.lookup(&record.vehicle_type)
        + tables.location.lookup(&record.location_detail)
        + tables.alcohol(&record.alcohol)
        + tables.license.lookup(&record.license_status);
    assert!((categorical - expected).abs() < 1e-12);
    assert!(score(&record) > categorical);
}

#[test]
fn test_deterministic() {
    let record = worst_case();
    assert_eq!(build_features(&record), build_features(&record));
}

#[test]
fn test_corpus_path_matches_request_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("corpus.csv");
    let corpus = generate(&GeneratorConfig::new(300, 42)).unwrap();
    write_corpus(&path, &corpus).unwrap();

    let training_matrix = load_corpus(&path).unwrap().features();

    for (i, entry) in corpus.entries.iter().enumerate() {
        // Serving path: the record as a JSON request body
        let body = serde_json::to_string(&entry.record).unwrap();
        let request: AttributeRecord = serde_json::from_str(&body).unwrap();
        let serving_row = to_row(&build_features(&request));

        assert_eq!(training_matrix.row(i), serving_row.row(0), "row {} diverged", i);
    }
}

#[test]
fn test_matrix_rows_in_layout_order() {
    let records = vec![AttributeRecord::default(), worst_case()];
    let matrix = build_matrix(&records);
    assert_eq!(matrix.dim(), (2, FEATURE_COUNT));

    let hour = FEATURE_LAYOUT.iter().position(|n| *n == "hour").unwrap();
    assert_eq!(matrix[[0, hour]], 12.0);
    assert_eq!(matrix[[1, hour]], 2.0);
}

#[test]
fn test_empty_matrix() {
    let matrix = build_matrix(&Vec::<AttributeRecord>::new());
    assert_eq!(matrix.dim(), (0, FEATURE_COUNT));
}
