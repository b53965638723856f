use assert_cmd::Command;
use predicates::{prelude::PredicateBooleanExt, str::contains};
use tempfile::TempDir;

const BIN_NAME: &str = "finance_core_cli";

fn script_command(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin(BIN_NAME).expect("binary exists");
    cmd.env("FINANCE_CORE_CLI_SCRIPT", "1");
    cmd.env("FINANCE_CORE_HOME", home.path());
    cmd
}

#[test]
fn help_lists_every_top_level_command() {
    let home = TempDir::new().unwrap();
    script_command(&home)
        .write_stdin("help\nexit\n")
        .assert()
        .success()
        .stdout(contains("account").and(contains("dashboard")).and(contains("assistant")));
}

#[test]
fn version_prints_package_version() {
    let home = TempDir::new().unwrap();
    script_command(&home)
        .write_stdin("version\nexit\n")
        .assert()
        .success()
        .stdout(contains("Finance Core version"));
}

#[test]
fn fresh_home_is_seeded_with_starter_accounts() {
    let home = TempDir::new().unwrap();
    script_command(&home)
        .write_stdin("account list\nexit\n")
        .assert()
        .success()
        .stdout(contains("Main Bank").and(contains("Cash Wallet")));
}

#[test]
fn recording_an_expense_updates_the_listed_balance() {
    let home = TempDir::new().unwrap();
    script_command(&home)
        .write_stdin("txn add expense 50 \"main bank\" cat_food\naccount list\nexit\n")
        .assert()
        .success()
        .stdout(contains("Recorded expense").and(contains("2450.00")));
}

#[test]
fn balances_persist_across_shell_runs() {
    let home = TempDir::new().unwrap();
    script_command(&home)
        .write_stdin("txn add income 100 \"cash wallet\"\nexit\n")
        .assert()
        .success();
    script_command(&home)
        .write_stdin("account list\nexit\n")
        .assert()
        .success()
        .stdout(contains("250.00"));
}

#[test]
fn oversell_is_rejected_before_touching_the_books() {
    let home = TempDir::new().unwrap();
    script_command(&home)
        .write_stdin("txn add sell NVDA 5 100 \"main bank\"\naccount list\nexit\n")
        .assert()
        .success()
        .stdout(contains("no holding for symbol NVDA").and(contains("2500.00")));
}

#[test]
fn unknown_command_suggests_a_close_match() {
    let home = TempDir::new().unwrap();
    script_command(&home)
        .write_stdin("dashbord\nexit\n")
        .assert()
        .success()
        .stdout(contains("did you mean `dashboard`"));
}

#[test]
fn clearing_history_keeps_balances() {
    let home = TempDir::new().unwrap();
    script_command(&home)
        .write_stdin("txn add expense 50 \"main bank\"\ntxn clear\ntxn list\naccount list\nexit\n")
        .assert()
        .success()
        .stdout(
            contains("Cleared 1 transaction(s)")
                .and(contains("No transactions yet"))
                .and(contains("2450.00")),
        );
}
