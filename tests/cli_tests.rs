//! End-to-end runs of the `hedgepool` binary.

use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use assert_cmd::Command;
use hedgepool::infrastructure::config::DATABASE_ENV;
use predicates::prelude::*;
use rust_decimal::Decimal;
use serde_json::Value;
use tempfile::TempDir;

/// Isolated workspace: a config file pointing at a database in a temp dir.
struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let db = dir.path().join("pool.db");
        let config = format!("database = {:?}\n\n[logging]\nlevel = \"warn\"\n", db.display().to_string());
        fs::write(dir.path().join("config.toml"), config).expect("write config");
        Self { dir }
    }

    fn config(&self) -> PathBuf {
        self.dir.path().join("config.toml")
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("hedgepool").expect("binary built");
        cmd.env_remove(DATABASE_ENV)
            .env_remove("RUST_LOG")
            .arg("--config")
            .arg(self.config())
            .arg("--color")
            .arg("never");
        cmd
    }

    /// Run with `--json` and parse stdout.
    fn json(&self, args: &[&str]) -> Value {
        let output = self.cmd().arg("--json").args(args).output().expect("run hedgepool");
        assert!(
            output.status.success(),
            "hedgepool {args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        serde_json::from_slice(&output.stdout).expect("stdout is one JSON document")
    }
}

fn decimal(value: &Value) -> Decimal {
    match value {
        Value::String(s) => Decimal::from_str(s).expect("decimal string"),
        other => Decimal::from_str(&other.to_string()).expect("decimal number"),
    }
}

#[test]
fn fee_reports_tier_for_three_investors() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["fee", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1.00%"))
        .stdout(predicate::str::contains("2-5 participants"));

    let json = ws.json(&["fee", "600"]);
    assert_eq!(decimal(&json["rate"]), Decimal::from_str("0.19").unwrap());
}

#[test]
fn verbose_run_prints_version_header() {
    let ws = Workspace::new();
    let header = format!("hedgepool {}", env!("CARGO_PKG_VERSION"));
    ws.cmd()
        .args(["-v", "fee", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains(header.clone()));
    ws.cmd()
        .args(["fee", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains(header).not());
}

#[test]
fn hedge_quotes_even_anchor() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["hedge", "--odds", "2.10", "--stake", "100", "--target", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2.100"))
        .stdout(predicate::str::contains("100.00"));

    let json = ws.json(&["hedge", "--odds", "2.10", "--stake", "100", "--target", "10"]);
    assert_eq!(json["suggestion"]["feasible"], "true");
    assert_eq!(decimal(&json["suggestion"]["quote"]["stake"]), Decimal::ONE_HUNDRED);
}

#[test]
fn infeasible_hedge_warns_without_failing() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["hedge", "--odds", "1.05", "--stake", "100", "--target", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No hedge meets the target"));
}

#[test]
fn invalid_odds_exit_nonzero() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["anchor", "--odds", "1", "--stake", "100"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("odds"));
}

#[test]
fn oversized_stake_is_rejected_cleanly() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["hedge", "--odds", "10", "--stake", "10000000000000000000000000000"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("exceeds the maximum"))
        .stderr(predicate::str::contains("panicked").not());
}

#[test]
fn day_with_pending_hedge_stays_open_then_freezes() {
    let ws = Workspace::new();
    ws.json(&["participant", "add", "alice", "--principal", "1000"]);
    let anchor = ws.json(&[
        "wager", "add", "--kind", "anchor", "--odds", "2.0", "--stake", "100", "--date", "2026-07-01",
        "--group", "g7",
    ]);
    let anchor_id = anchor["wager"]["id"].as_str().unwrap().to_string();
    let hedge = ws.json(&[
        "wager", "add", "--kind", "hedge", "--odds", "2.2", "--stake", "90", "--date", "2026-07-01",
        "--group", "g7",
    ]);
    let hedge_id = hedge["wager"]["id"].as_str().unwrap().to_string();
    ws.json(&["wager", "resolve", &anchor_id, "won"]);

    ws.cmd()
        .args(["close", "2026-07-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("still pending"));

    ws.json(&["wager", "resolve", &hedge_id, "lost"]);
    let closed = ws.json(&["close", "2026-07-01"]);
    assert_eq!(closed["settled"], true);
    assert_eq!(decimal(&closed["record"]["gross_profit"]), Decimal::from(10));

    ws.cmd()
        .args(["wager", "add", "--kind", "anchor", "--odds", "1.9", "--stake", "5", "--date", "2026-07-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already closed"));
}

#[test]
fn book_to_history_flow() {
    let ws = Workspace::new();

    let alice = ws.json(&["participant", "add", "alice", "--principal", "1000"]);
    assert_eq!(decimal(&alice["participant"]["principal"]), Decimal::from(1000));

    let anchor = ws.json(&[
        "wager", "add", "--kind", "anchor", "--odds", "2.0", "--stake", "100", "--date", "2026-06-01",
        "--group", "g1",
    ]);
    let anchor_id = anchor["wager"]["id"].as_str().unwrap().to_string();
    let hedge = ws.json(&[
        "wager", "add", "--kind", "hedge", "--odds", "2.2", "--stake", "90", "--date", "2026-06-01",
        "--group", "g1",
    ]);
    let hedge_id = hedge["wager"]["id"].as_str().unwrap().to_string();

    let pairs = ws.json(&["wager", "pair"]);
    assert_eq!(pairs["pairs"].as_array().unwrap().len(), 1);

    ws.json(&["wager", "resolve", &anchor_id, "won"]);
    ws.json(&["wager", "resolve", &hedge_id, "lost"]);

    let closed = ws.json(&["close", "2026-06-01", "--notes", "derby"]);
    assert_eq!(closed["settled"], true);
    assert_eq!(decimal(&closed["record"]["gross_profit"]), Decimal::from(10));
    assert_eq!(decimal(&closed["record"]["turnover"]), Decimal::from(190));

    let again = ws.json(&["close", "2026-06-01"]);
    assert_eq!(again["settled"], false);

    let history = ws.json(&["history", "--from", "2026-06-01", "--to", "2026-06-30"]);
    assert_eq!(history["records"].as_array().unwrap().len(), 1);
    assert_eq!(history["records"][0]["notes"], "derby");

    let ledger = ws.json(&["participant", "ledger", "alice"]);
    let kinds: Vec<_> = ledger["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["kind"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(kinds, vec!["DEPOSIT", "PROFIT_PAYOUT"]);
}

#[test]
fn resolving_twice_fails() {
    let ws = Workspace::new();
    let wager = ws.json(&["wager", "add", "--kind", "anchor", "--odds", "1.8", "--stake", "10"]);
    let id = wager["wager"]["id"].as_str().unwrap().to_string();
    ws.json(&["wager", "resolve", &id, "lost"]);

    ws.cmd()
        .args(["wager", "resolve", &id, "won"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already resolved"));
}

#[test]
fn hedge_without_anchor_is_rejected() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["wager", "add", "--kind", "hedge", "--odds", "2", "--stake", "10"])
        .assert()
        .failure();
}

#[test]
fn withdrawal_beyond_principal_fails() {
    let ws = Workspace::new();
    ws.json(&["participant", "add", "bob", "--principal", "50"]);
    ws.cmd()
        .args(["participant", "withdraw", "bob", "80"])
        .assert()
        .failure();
    let list = ws.json(&["participant", "list"]);
    assert_eq!(decimal(&list["participants"][0]["principal"]), Decimal::from(50));
}

#[test]
fn config_init_then_show() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");
    let mut cmd = Command::cargo_bin("hedgepool").unwrap();
    cmd.arg("--config").arg(&path).args(["config", "init"]).assert().success();
    assert!(path.exists());

    let mut cmd = Command::cargo_bin("hedgepool").unwrap();
    cmd.arg("--config")
        .arg(&path)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    let mut cmd = Command::cargo_bin("hedgepool").unwrap();
    cmd.arg("--config")
        .arg(&path)
        .args(["--json", "config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"void_policy\":\"exclude\""));
}
