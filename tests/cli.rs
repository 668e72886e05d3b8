use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn pixgrid_cmd(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("pixgrid").expect("binary exists");
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .env("HOME", config_home.path());
    cmd
}

#[test]
fn help_prints_usage() {
    let temp = TempDir::new().unwrap();
    pixgrid_cmd(&temp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Indexed-color pixel grid editor driven by command scripts",
        ));
}

#[test]
fn stdin_script_prints_grid_and_outline() {
    let temp = TempDir::new().unwrap();
    pixgrid_cmd(&temp)
        .args(["--width", "4", "--height", "2"])
        .write_stdin("tap 1 0\ntap 2 1\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(".1..\n..1.\n"))
        .stdout(predicate::str::contains("outline: M1 0H2V1H1ZM2 1H3V2H2Z"));
}

#[test]
fn script_file_with_mode_flag() {
    let temp = TempDir::new().unwrap();
    let script = temp.path().join("box.txt");
    std::fs::write(&script, "# outline box\ndrag 0 0 2 2\n").unwrap();

    pixgrid_cmd(&temp)
        .args(["--width", "3", "--height", "3", "--mode", "rectangle-outline", "--no-outline"])
        .arg(&script)
        .assert()
        .success()
        .stdout(predicate::eq("111\n1.1\n111\n"));
}

#[test]
fn config_file_sets_canvas_size() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("custom.toml");
    std::fs::write(&config, "[canvas]\nwidth = 2\nheight = 1\n").unwrap();

    pixgrid_cmd(&temp)
        .arg("--config")
        .arg(&config)
        .arg("--no-outline")
        .write_stdin("invert\n")
        .assert()
        .success()
        .stdout(predicate::eq("11\n"));
}

#[test]
fn unknown_command_reports_line() {
    let temp = TempDir::new().unwrap();
    pixgrid_cmd(&temp)
        .write_stdin("tap 0 0\npaint 1 1\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 2: unknown command 'paint'"));
}

#[test]
fn invalid_mode_flag_is_rejected() {
    let temp = TempDir::new().unwrap();
    pixgrid_cmd(&temp)
        .args(["--mode", "lasso"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown input mode 'lasso'"));
}

#[test]
fn snapshot_writes_png() {
    let temp = TempDir::new().unwrap();
    let png = temp.path().join("out.png");
    pixgrid_cmd(&temp)
        .args(["--width", "3", "--height", "3", "--snapshot"])
        .arg(&png)
        .write_stdin("mode line\ndrag 0 0 2 2\n")
        .assert()
        .success();

    let bytes = std::fs::read(&png).unwrap();
    assert_eq!(&bytes[1..4], b"PNG");
}

#[test]
fn undo_in_script_restores_blank_grid() {
    let temp = TempDir::new().unwrap();
    pixgrid_cmd(&temp)
        .args(["--width", "2", "--height", "2", "--no-outline"])
        .write_stdin("tap 0 0\ntap 1 1\nundo\n")
        .assert()
        .success()
        .stdout(predicate::eq("..\n..\n"));
}

#[test]
fn dump_config_schema_outputs_json() {
    Command::cargo_bin("dump_config_schema")
        .expect("binary exists")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"canvas\""));
}
