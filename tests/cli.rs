use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

#[test]
fn simulate_prints_json_response() {
    let output = Command::cargo_bin("simulate")
        .expect("simulate bin")
        .args([
            "--radius", "10", "--density", "2000", "--speed", "20000", "--angle", "45", "--json",
        ])
        .output()
        .expect("run simulate");
    assert!(output.status.success());

    let body: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json body");
    let crater = body["crater_diameter_meters"].as_f64().unwrap();
    let kt = body["energy_equivalent_kt_tnt"].as_f64().unwrap();
    assert!((crater - 237.2).abs() < 0.1, "crater = {crater}");
    assert!((kt - 283.17).abs() < 0.01, "kt = {kt}");
}

#[test]
fn simulate_preset_prints_summary_and_sidecar() {
    let dir = tempfile::tempdir().expect("tempdir");
    let sidecar = dir.path().join("chelyabinsk.json");

    Command::cargo_bin("simulate")
        .expect("simulate bin")
        .args(["--preset", "chelyabinsk", "--output", sidecar.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Impact: Chelyabinsk ==="))
        .stdout(predicate::str::contains("crater rim"));

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(sidecar).unwrap()).unwrap();
    assert_eq!(value["name"], "Chelyabinsk");
}

#[test]
fn simulate_rejects_negative_radius() {
    Command::cargo_bin("simulate")
        .expect("simulate bin")
        .args(["--radius=-5", "--density", "2000", "--speed", "20000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("radius_m"));
}

#[test]
fn simulate_unknown_preset_fails() {
    Command::cargo_bin("simulate")
        .expect("simulate bin")
        .args(["--preset", "Vesta"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Preset 'Vesta' not found"));
}

#[test]
fn sweep_then_plot_renders_png() {
    let dir = tempfile::tempdir().expect("tempdir");
    let csv_path = dir.path().join("sweep.csv");
    let png_path = dir.path().join("sweep.png");

    Command::cargo_bin("impact_sweep")
        .expect("impact_sweep bin")
        .args([
            "--axis",
            "speed",
            "--start",
            "11000",
            "--end",
            "30000",
            "--steps",
            "5",
            "--output",
            csv_path.to_str().unwrap(),
        ])
        .assert()
        .success();

    let text = fs::read_to_string(&csv_path).expect("sweep csv");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 6);
    assert!(lines[0].starts_with("speed_m_s,mass_kg,"));
    assert!(lines[1].starts_with("11000,"));
    assert!(lines[5].starts_with("30000,"));

    Command::cargo_bin("impact_plot")
        .expect("impact_plot bin")
        .args([
            "--input",
            csv_path.to_str().unwrap(),
            "--output",
            png_path.to_str().unwrap(),
            "--metric",
            "shockwave",
            "--log-y",
            "--width",
            "400",
            "--height",
            "300",
        ])
        .assert()
        .success();

    let metadata = fs::metadata(png_path).expect("png metadata");
    assert!(metadata.len() > 0, "PNG output should not be empty");
}

#[test]
fn neo_browse_simulates_saved_page() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = dir.path().join("neos.csv");

    Command::cargo_bin("neo_browse")
        .expect("neo_browse bin")
        .args([
            "--input",
            "tests/fixtures/neo_browse.json",
            "--date",
            "2025-01-01",
            "--simulate",
            "--output",
            out.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("3542519"))
        .stdout(predicate::str::contains("[PHA]"));

    let text = fs::read_to_string(out).expect("results csv");
    // Header plus the two objects with usable velocities.
    assert_eq!(text.lines().count(), 3);
    assert!(text.starts_with("name,radius_m,"));
}

#[test]
fn neo_browse_simulates_single_object() {
    Command::cargo_bin("neo_browse")
        .expect("neo_browse bin")
        .args([
            "--input",
            "tests/fixtures/neo_browse.json",
            "--date",
            "2025-01-01",
            "--id",
            "3542519",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Impact: (2010 PK9) ==="));

    Command::cargo_bin("neo_browse")
        .expect("neo_browse bin")
        .args(["--input", "tests/fixtures/neo_browse.json", "--id", "1234567"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("1234567 is not in the catalog"));
}
