use predicates::prelude::*;

mod common;
use common::*;

#[test]
fn json_parse_single_coordinate() {
    parse_with_format("json", "59.3346 S, 18.0632 W")
        .assert_success()
        .stdout("{\"latitude\":-59.3346,\"longitude\":-18.0632}\n");
}

#[test]
fn json_includes_formats_when_requested() {
    let output = CoordTest::new()
        .args(["--format=json", "--show-formats", "591234 18.5"])
        .stdout();

    let value: serde_json::Value = serde_json::from_str(output.trim()).unwrap();
    assert_eq!(value["latitudeFormat"], "dms");
    assert_eq!(value["longitudeFormat"], "plain");
    assert_eq!(value["longitude"], 18.5);
    assert!(value.get("input").is_none());
}

#[test]
fn json_lines_for_file_input() {
    let (_dir, path) = coords_file(&["59 18", "5920.076N 01803.792E", "-33.8688 151.2093"]);

    let output = CoordTest::new()
        .args(["--format=JSON", &file_arg(&path)])
        .stdout();

    let rows: Vec<serde_json::Value> = output
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["input"], "59 18");
    assert_eq!(rows[2]["input"], "-33.8688 151.2093");
    assert_eq!(rows[2]["latitude"], -33.8688);

    let lat = rows[1]["latitude"].as_f64().unwrap();
    assert!((lat - 59.3346).abs() < 1e-9);
}

#[test]
fn json_ignores_header_options() {
    parse_with_format("json", "1 2")
        .arg("--no-headers")
        .assert_success()
        .stdout(predicate::str::starts_with("{\"latitude\":1.0"));
}

#[test]
fn json_invalid_coordinate_writes_nothing() {
    parse_with_format("json", "59 18 7")
        .assert_failure()
        .stdout("")
        .stderr(predicate::str::contains(
            "Uneven count of latitude/longitude numbers",
        ));
}
