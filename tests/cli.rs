//! End-to-end tests for the `qutils` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, rel: &str, body: &str) {
    let p = root.join(rel);
    fs::create_dir_all(p.parent().unwrap()).unwrap();
    fs::write(p, body).unwrap();
}

fn qutils() -> Command {
    Command::cargo_bin("qutils").unwrap()
}

#[test]
fn aggregate_prints_rows_and_average() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "a.log", "x: 1.0\ny: 2.0\n");
    write(dir.path(), "b.log", "nothing useful here\n");
    write(dir.path(), "c.log", "x: 3.0\ny: 4.0\n");

    qutils()
        .arg("aggregate")
        .arg("--logs")
        .arg(dir.path())
        .args(["--field", "x=x: ([0-9.]+)", "--field", "y=y: ([0-9.]+)"])
        .assert()
        .success()
        .stdout("a\t1.0\t2.0\nc\t3.0\t4.0\navg\t2.0\t3.0\n");
}

#[test]
fn aggregate_with_nothing_parsed_fails() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "a.log", "no fields\n");

    qutils()
        .arg("aggregate")
        .arg("--logs")
        .arg(dir.path())
        .args(["--field", "x=x: ([0-9.]+)"])
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("no log file produced a record"));
}

#[test]
fn aggregate_extension_filter_and_stats() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "run/a.log", "depth: 8\n");
    write(dir.path(), "run/a.txt", "depth: 100\n");

    qutils()
        .arg("aggregate")
        .arg("--logs")
        .arg(dir.path())
        .args(["--field", "depth=depth: (\\d+)", "--ext", "log", "--stats"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("a\t8.0\navg\t8.0\nparse_one\t"))
        .stdout(predicate::str::contains("\nrun\t"));
}

#[test]
fn aggregate_under_profile() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "a.log", "x: 1.5\n");

    qutils()
        .arg("aggregate")
        .arg("--logs")
        .arg(dir.path())
        .args(["--field", "x=x: ([0-9.]+)", "--monitor-mem", "0.05"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("a\t1.5\navg\t1.5\naggregate:consumed time:\t"));
}

#[test]
fn failed_profiled_run_prints_nothing() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "a.log", "no fields\n");

    qutils()
        .arg("aggregate")
        .arg("--logs")
        .arg(dir.path())
        .args(["--field", "x=x: ([0-9.]+)", "--monitor-mem", "0.05"])
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("no log file produced a record"));
}

#[test]
fn timings_reads_statistics_tables() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "r1.out", "route\t1.0\nmap\t3.0\n");
    write(dir.path(), "r2.out", "map\t5.0\nroute\t2.0\n");
    write(dir.path(), "r3.out", "No statistics found!\n");

    qutils()
        .arg("timings")
        .arg("--logs")
        .arg(dir.path())
        .args(["--name", "map", "--name", "route"])
        .assert()
        .success()
        .stdout("r1\t3.0\t1.0\nr2\t5.0\t2.0\navg\t4.0\t1.5\n");
}

const QOBJ: &str = r#"{
  "config": {"n_qubits": 2},
  "experiments": [
    {"instructions": [
      {"name": "h", "qubits": [0]},
      {"name": "cx", "qubits": [0, 1]},
      {"name": "measure", "qubits": [1], "memory": [0]}
    ]}
  ]
}"#;

#[test]
fn ops_without_measure() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "job.json", QOBJ);

    qutils()
        .arg("ops")
        .arg("--qobj")
        .arg(dir.path().join("job.json"))
        .arg("--without-measure")
        .assert()
        .success()
        .stdout("# experiment 0\nh:0\ncx:0,1\n");
}

#[test]
fn qubits_reads_config() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "job.json", QOBJ);

    qutils()
        .arg("qubits")
        .arg("--qobj")
        .arg(dir.path().join("job.json"))
        .assert()
        .success()
        .stdout("2\n");
}

#[test]
fn graph_rejects_bad_edge() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "cmap.json", "[[0, 1], [1, 2, 3]]");

    qutils()
        .arg("graph")
        .arg("--coupling")
        .arg(dir.path().join("cmap.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("length 2"));
}

#[test]
fn graph_prints_adjacency() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "cmap.json", "[[0, 1], [1, 0], [1, 2]]");

    qutils()
        .arg("graph")
        .arg("--coupling")
        .arg(dir.path().join("cmap.json"))
        .assert()
        .success()
        .stdout("0\t1\n1\t0,2\n");
}

#[test]
fn pretty_prints_tree() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "props.json", r#"{"qubit": {"t1": 50.5}, "name": "dev"}"#);

    qutils()
        .arg("pretty")
        .arg("--json")
        .arg(dir.path().join("props.json"))
        .assert()
        .success()
        .stdout("qubit\n\tt1\n\t\t50.5\nname\n\tdev\n");
}
