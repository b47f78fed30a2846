//! End-to-end tests for the `carteira` binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const EXPENSES: &str = r#"[
    {"id": 1, "amount": "100.00", "expense_date": "2024-01-05", "category_id": 1, "description": "Mercado"},
    {"id": 2, "amount": 700, "expense_date": "2024-01-01T08:00:00Z", "category_id": 2},
    {"id": 3, "amount": "50.00", "expense_date": "2024-01-20", "category_id": 1},
    {"id": 4, "amount": "30,00", "expense_date": "2024-02-01", "category_id": 1},
    {"id": 5, "amount": "12.00", "expense_date": "not a date", "category_id": 1}
]"#;

const CATEGORIES: &str = r#"[
    {"id": 1, "name": "Alimentação"},
    {"id": 2, "name": "Renda"},
    {"id": 3, "name": "Lazer"}
]"#;

fn carteira(data_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("carteira").unwrap();
    cmd.env("CARTEIRA_DATA_DIR", data_dir);
    cmd.env_remove("CARTEIRA_LOG");
    cmd
}

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn statement_groups_by_category_and_month() {
    let dir = TempDir::new().unwrap();
    let expenses = write(&dir, "transacoes.json", EXPENSES);
    let categories = write(&dir, "categories.json", CATEGORIES);

    carteira(dir.path())
        .arg("statement")
        .arg("--transactions")
        .arg(&expenses)
        .arg("--categories")
        .arg(&categories)
        .assert()
        .success()
        .stdout(predicate::str::contains("ALIMENTAÇÃO"))
        .stdout(predicate::str::contains("Janeiro"))
        .stdout(predicate::str::contains("150,00\u{a0}MTn"))
        .stdout(predicate::str::contains("Lazer").not());
}

#[test]
fn statement_csv_has_one_row_per_month() {
    let dir = TempDir::new().unwrap();
    let expenses = write(&dir, "transacoes.json", EXPENSES);
    let categories = write(&dir, "categories.json", CATEGORIES);

    carteira(dir.path())
        .args(["statement", "--format", "csv", "--transactions"])
        .arg(&expenses)
        .arg("--categories")
        .arg(&categories)
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "category,year,month,transactions,total\n",
        ))
        .stdout(predicate::str::contains("Alimentação,2024,2,1,30.00"))
        .stdout(predicate::str::contains("Alimentação,2024,1,2,150.00"))
        .stdout(predicate::str::contains("Renda,2024,1,1,700.00"));
}

#[test]
fn strict_data_rejects_dropped_records() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("config.json"), r#"{"strict_data": true}"#).unwrap();
    let expenses = write(&dir, "transacoes.json", EXPENSES);
    let categories = write(&dir, "categories.json", CATEGORIES);

    carteira(dir.path())
        .arg("statement")
        .arg("--transactions")
        .arg(&expenses)
        .arg("--categories")
        .arg(&categories)
        .assert()
        .failure()
        .stderr(predicate::str::contains("1 record(s) failed validation"));
}

#[test]
fn json_export_lists_dropped_records() {
    let dir = TempDir::new().unwrap();
    let categories = write(&dir, "categories.json", CATEGORIES);

    let output = carteira(dir.path())
        .args(["statement", "--format", "json", "--transactions", "-", "--categories"])
        .arg(&categories)
        .write_stdin(EXPENSES)
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["report"], "statement");
    assert_eq!(value["issues"].as_array().unwrap().len(), 1);
    assert_eq!(value["issues"][0]["index"], 4);
    assert_eq!(value["issues"][0]["source"], "-");
    assert_eq!(value["issues"][0]["id"], "5");
}

#[test]
fn top_ranks_by_total() {
    let dir = TempDir::new().unwrap();
    let totals = write(
        &dir,
        "expenses-by-category.json",
        r#"[{"category_name": "Food", "total_amount": "300.00"},
            {"category_name": "Rent", "total_amount": 700}]"#,
    );

    carteira(dir.path())
        .args(["top", "--format", "csv", "--totals"])
        .arg(&totals)
        .assert()
        .success()
        .stdout(predicate::str::contains("1,Rent,700.00,70.00"))
        .stdout(predicate::str::contains("2,Food,300.00,30.00"));
}

#[test]
fn budgets_table_shows_tier() {
    let dir = TempDir::new().unwrap();
    let budgets = write(
        &dir,
        "budgets.json",
        r#"[{"id": 1, "category_id": 2, "amount": "1000.00", "spent": "950.00", "category_name": "Renda"}]"#,
    );

    carteira(dir.path())
        .arg("budgets")
        .arg("--budgets")
        .arg(&budgets)
        .assert()
        .success()
        .stdout(predicate::str::contains("95%"))
        .stdout(predicate::str::contains("critical"))
        .stdout(predicate::str::contains("resta 50,00\u{a0}MTn"));
}

#[test]
fn goals_use_reference_day() {
    let dir = TempDir::new().unwrap();
    let goals = write(
        &dir,
        "goals.json",
        r#"[{"id": 1, "title": "Carro", "target_amount": 5000, "current_amount": 5000, "target_date": "2024-06-11"}]"#,
    );

    let output = carteira(dir.path())
        .args(["goals", "--today", "2024-06-01", "--format", "json", "--goals"])
        .arg(&goals)
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["data"][0]["progress"]["percent"], 100);
    assert_eq!(value["data"][0]["progress"]["remaining_days"], 10);
}

#[test]
fn summary_from_payload() {
    let dir = TempDir::new().unwrap();
    let summary = write(
        &dir,
        "monthly-summary.json",
        r#"{"total_entries": "25000.00", "total_expenses": null}"#,
    );

    carteira(dir.path())
        .arg("summary")
        .arg("--summary")
        .arg(&summary)
        .assert()
        .success()
        .stdout(predicate::str::contains("25\u{a0}000,00\u{a0}MTn"));
}

#[test]
fn session_lifecycle() {
    let dir = TempDir::new().unwrap();
    let response = write(
        &dir,
        "login.json",
        r#"{"message": "ok", "user": {"id": 42, "name": "Ana"}}"#,
    );

    carteira(dir.path())
        .args(["session", "route"])
        .assert()
        .success()
        .stdout("Auth_login\n");

    carteira(dir.path())
        .args(["session", "login", "--response"])
        .arg(&response)
        .assert()
        .success();

    carteira(dir.path())
        .args(["session", "route"])
        .assert()
        .success()
        .stdout("Home\n");

    carteira(dir.path())
        .args(["session", "rename", "Ana Maria"])
        .assert()
        .success();

    carteira(dir.path())
        .args(["session", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ana Maria"))
        .stdout(predicate::str::contains("42"));

    carteira(dir.path())
        .args(["session", "logout"])
        .assert()
        .success();

    carteira(dir.path())
        .args(["session", "route"])
        .assert()
        .success()
        .stdout("Auth_login\n");
}

#[test]
fn corrupt_session_cache_recovers() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("session.json"), r#"{"userId": 5, "#).unwrap();

    carteira(dir.path())
        .args(["session", "route"])
        .assert()
        .success()
        .stdout("Auth_login\n");

    carteira(dir.path())
        .args(["session", "logout"])
        .assert()
        .success();

    let cache = fs::read_to_string(dir.path().join("session.json")).unwrap();
    let cache: serde_json::Value = serde_json::from_str(&cache).unwrap();
    assert_eq!(cache, serde_json::json!({}));
}

#[test]
fn missing_payload_fails() {
    let dir = TempDir::new().unwrap();

    carteira(dir.path())
        .args(["entries", "--transactions"])
        .arg(dir.path().join("nope.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}
