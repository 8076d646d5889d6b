//! End-to-end runs of the `homog` binary on text axis files.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn homog(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_homog"))
        .args(args)
        .output()
        .expect("run homog")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("write fixture");
    path
}

fn arg(path: &Path) -> &str {
    path.to_str().expect("utf-8 path")
}

#[test]
fn timecheck_reports_and_corrects() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(
        dir.path(),
        "tas.txt",
        "# calendar: standard\n# frequency: day\n2005-01-01\n2005-01-02\n2005-01-02\n2005-01-04\n",
    );
    let report = dir.path().join("report.json");
    let corrected = dir.path().join("corrected.txt");

    let output = homog(&[
        "timecheck",
        arg(&input),
        "--output",
        arg(&report),
        "--corrected",
        arg(&corrected),
    ]);
    assert!(output.status.success(), "{output:?}");
    let text = stdout(&output);
    assert!(text.contains("tas: duplicated_timesteps = 2005-01-02T00:00:00"), "{text}");
    assert!(text.contains("tas: missing_timesteps = 2005-01-03T00:00:00"), "{text}");

    let json = std::fs::read_to_string(&report).unwrap();
    assert!(json.contains("\"retained\""));
    let axis = std::fs::read_to_string(&corrected).unwrap();
    assert_eq!(axis.lines().filter(|l| !l.starts_with('#')).count(), 3);
}

#[test]
fn limit_monthly_360_day_to_seasons() {
    let dir = tempfile::tempdir().unwrap();
    let months: String = (1..=12).map(|m| format!("2005-{m:02}-16\n")).collect();
    let input = write(dir.path(), "pr.txt", &format!("# calendar: 360_day\n{months}"));

    let output = homog(&[
        "limit",
        arg(&input),
        "--frequency",
        "mon",
        "--start-months",
        "3,6,9,12",
        "--end-months",
        "2,5,8,11",
    ]);
    assert!(output.status.success(), "{output:?}");
    assert_eq!(stdout(&output).trim(), "2005-03-16T00:00:00 2005-11-16T00:00:00");
}

#[test]
fn within_and_select() {
    let dir = tempfile::tempdir().unwrap();
    let days: String = (1..=31).map(|d| format!("2005-01-{d:02}\n")).collect();
    let input = write(dir.path(), "axis.txt", &format!("# frequency: day\n{days}"));

    let output = homog(&["within", arg(&input), "--start", "2005-01", "--end", "2005-01"]);
    assert!(output.status.success(), "{output:?}");
    assert_eq!(stdout(&output).trim(), "true");

    let output = homog(&["within", arg(&input), "--start", "2004-12-31", "--end", "2005-01"]);
    assert_eq!(stdout(&output).trim(), "false");

    let output = homog(&["select", arg(&input), "--start", "2005-01-30", "--end", "2005-02"]);
    assert!(output.status.success(), "{output:?}");
    assert_eq!(stdout(&output), "29\n30\n");
}

#[test]
fn intersect_reports_common_range() {
    let dir = tempfile::tempdir().unwrap();
    let a = write(dir.path(), "a.txt", "2000-01-01\n2010-01-01\n");
    let b = write(dir.path(), "b.txt", "2005-01-01\n2020-01-01\n");
    let c = write(dir.path(), "c.txt", "2015-01-01\n");

    let output = homog(&["intersect", arg(&a), arg(&b)]);
    assert!(output.status.success(), "{output:?}");
    assert_eq!(stdout(&output).trim(), "2005-01-01T00:00:00 2010-01-01T00:00:00");

    let output = homog(&["intersect", arg(&a), arg(&c)]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).starts_with("Error: "));
}

#[test]
fn config_file_and_unknown_frequency() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(dir.path(), "axis.txt", "2005-01-01\n2005-01-08\n");
    let config = write(dir.path(), "homog.toml", "[io]\nfrequency = \"day\"\n");

    // Weekly spacing matches no known frequency.
    let output = homog(&["timecheck", arg(&input)]);
    assert!(!output.status.success());

    let output = homog(&["--config", arg(&config), "timecheck", arg(&input), "--checks", "missings"]);
    assert!(output.status.success(), "{output:?}");
    assert!(stdout(&output).starts_with("axis: missing_timesteps = 2005-01-02T00:00:00,"));
}

#[test]
fn input_format_reads_and_writes_axis_files() {
    let dir = tempfile::tempdir().unwrap();
    let days: String = (1..=5).map(|d| format!("{d:02}.01.2005\n")).collect();
    let input = write(dir.path(), "tas.txt", &format!("# frequency: day\n{days}"));
    let selected = dir.path().join("selected.txt");

    let output = homog(&[
        "select",
        arg(&input),
        "--input-format",
        "%d.%m.%Y",
        "--start",
        "2005-01-02",
        "--end",
        "2005-01-03",
        "--output",
        arg(&selected),
    ]);
    assert!(output.status.success(), "{output:?}");
    let axis = std::fs::read_to_string(&selected).unwrap();
    assert!(axis.ends_with("02.01.2005\n03.01.2005\n"), "{axis}");

    // Without the template the lines do not parse.
    let output = homog(&["within", arg(&input), "--start", "2005", "--end", "2005"]);
    assert!(!output.status.success());

    let config = write(dir.path(), "homog.toml", "[io]\nformat = \"%d.%m.%Y\"\n");
    let output = homog(&[
        "--config",
        arg(&config),
        "within",
        arg(&input),
        "--start",
        "2005-01-01",
        "--end",
        "2005-01-05",
    ]);
    assert!(output.status.success(), "{output:?}");
    assert_eq!(stdout(&output).trim(), "true");
}
