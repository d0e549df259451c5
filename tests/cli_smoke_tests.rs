mod common;

use assert_cmd::Command;
use predicates::{prelude::PredicateBooleanExt, str::contains};

const BIN_NAME: &str = "fintrack_cli";

fn script_command(home: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin(BIN_NAME).expect("binary exists");
    cmd.env("FINTRACK_HOME", home).env("NO_COLOR", "1");
    cmd
}

#[test]
fn cli_help_command_prints_overview() {
    let home = common::temp_dir();
    script_command(&home)
        .write_stdin("help\nexit\n")
        .assert()
        .success()
        .stdout(contains("Available commands"));
}

#[test]
fn cli_version_command_prints_version_info() {
    let home = common::temp_dir();
    script_command(&home)
        .write_stdin("version\nexit\n")
        .assert()
        .success()
        .stdout(contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn cli_records_transactions_and_prints_summary() {
    let home = common::temp_dir();
    let script = "seed\n\
                  add income 3000 Work 2024-01-05 \"January salary\"\n\
                  add expense 1200 Housing 2024-01-10 Rent\n\
                  summary\n\
                  exit\n";
    script_command(&home)
        .write_stdin(script)
        .assert()
        .success()
        .stdout(contains("\"balance\": \"1800\"").and(contains("savings rate: 60%")));

    assert!(home.join("ledger.json").exists());
    script_command(&home)
        .write_stdin("list 1\nexit\n")
        .assert()
        .success()
        .stdout(contains("Housing"));
}

#[test]
fn cli_reports_invalid_submissions_and_keeps_running() {
    let home = common::temp_dir();
    script_command(&home)
        .write_stdin("seed\nadd expense 0 Food 2024-01-01 nothing\nbogus\nlist\nexit\n")
        .assert()
        .success()
        .stdout(
            contains("amount must be greater than zero")
                .and(contains("unknown command"))
                .and(contains("no transactions recorded")),
        );
}
