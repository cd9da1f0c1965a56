use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper function to create a temporary directory for CLI tests
fn create_cli_test_environment() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Helper function to create a Command with --no-color flag for testing
fn tally_cmd(db_path: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("tally").expect("Failed to find tally binary");
    cmd.arg("--no-color")
        .arg("--database-file")
        .arg(db_path.to_str().unwrap());
    cmd
}

#[test]
fn test_cli_help() {
    Command::cargo_bin("tally")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("task"))
        .stdout(predicate::str::contains("entry"))
        .stdout(predicate::str::contains("invoice"));
}

#[test]
fn test_cli_default_lists_open_tasks() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    tally_cmd(&db_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("No tasks found."));
}

#[test]
fn test_cli_log_and_list_entries() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    tally_cmd(&db_path)
        .args(["entry", "add", "2024-03-04", "Client A", "Build API", "2.5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged 2.5h with ID: 1"));

    tally_cmd(&db_path)
        .args(["entry", "add", "2024-03-05", "Client A", "Build API", "1"])
        .assert()
        .success();

    tally_cmd(&db_path)
        .args(["entry", "list", "--from", "2024-03-04", "--to", "2024-03-10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Mon 2024-03-04 Client A | Build API (2.5h)"))
        .stdout(predicate::str::contains("**Total: 3.5h**"));
}

#[test]
fn test_cli_invalid_date_fails() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    tally_cmd(&db_path)
        .args(["entry", "add", "2024-13-01", "Client A", "Build API", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to log time"))
        .stderr(predicate::str::contains("Invalid input for field 'date'"));
}

#[test]
fn test_cli_task_budget_and_show() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    tally_cmd(&db_path)
        .args(["task", "update", "Client A", "Build API", "--budget", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated task Client A|Build API"))
        .stdout(predicate::str::contains("Budget: 10h"));

    tally_cmd(&db_path)
        .args(["entry", "add", "2024-03-04", "Client A", "Build API", "9"])
        .assert()
        .success();

    tally_cmd(&db_path)
        .args(["task", "show", "Client A", "Build API"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Client A | Build API"))
        .stdout(predicate::str::contains("- Remaining: 1h"))
        .stdout(predicate::str::contains("At risk"));

    tally_cmd(&db_path)
        .args(["task", "list", "--budget", "budget-left"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Client A | Build API"));

    tally_cmd(&db_path)
        .args(["task", "hours", "Client A", "Build API"])
        .assert()
        .success()
        .stdout(predicate::str::contains("9h logged on Client A | Build API"));
}

#[test]
fn test_cli_rename_conflict_fails() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    for description in ["Build API", "Write docs"] {
        tally_cmd(&db_path)
            .args(["task", "update", "Client A", description, "--budget", "4"])
            .assert()
            .success();
    }

    tally_cmd(&db_path)
        .args([
            "task",
            "update",
            "Client A",
            "Build API",
            "--rename",
            "Write docs",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    tally_cmd(&db_path)
        .args(["task", "show", "Client A", "Build API"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Budget: 4h"));
}

#[test]
fn test_cli_checklist_items() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    tally_cmd(&db_path)
        .args(["task", "update", "Client A", "Build API", "--budget", "4"])
        .assert()
        .success();

    for text in ["Draft schema", "Write handlers"] {
        tally_cmd(&db_path)
            .args(["item", "add", "Client A", "Build API", text, "--hours", "1"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Added item"))
            .stdout(predicate::str::contains(text));
    }

    tally_cmd(&db_path)
        .args(["item", "toggle", "Client A", "Build API", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Checked item 0: Draft schema"))
        .stdout(predicate::str::contains("Checklist: 50% complete"));

    tally_cmd(&db_path)
        .args(["item", "split", "Client A", "Build API"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- [x] Draft schema (2h)"))
        .stdout(predicate::str::contains("- [ ] Write handlers (2h)"));

    tally_cmd(&db_path)
        .args(["item", "remove", "Client A", "Build API", "5"])
        .assert()
        .failure();
}

#[test]
fn test_cli_json_output() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    tally_cmd(&db_path)
        .args(["entry", "add", "2024-03-04", "Client A", "Build API", "2.5"])
        .assert()
        .success();

    let output = tally_cmd(&db_path)
        .args([
            "--json", "entry", "list", "--from", "2024-03-04", "--to", "2024-03-10",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let entries: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let entries = entries.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["date"], "2024-03-04");
    assert_eq!(entries[0]["project"], "Client A");
    assert_eq!(entries[0]["hours"], 2.5);
}

#[test]
fn test_cli_projects_and_holidays() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    tally_cmd(&db_path)
        .args(["project", "create", "Client A", "--color", "#ff0000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created project with ID: 1"));

    tally_cmd(&db_path)
        .args(["project", "update", "1", "--deactivate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Status: inactive"));

    tally_cmd(&db_path)
        .args(["project", "list", "--active-only"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No projects found."));

    tally_cmd(&db_path)
        .args(["holiday", "add", "2024-12-25"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Success: Added holiday 2024-12-25"));

    tally_cmd(&db_path)
        .args(["holiday", "list", "--from", "2024-01-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wed 2024-12-25"));
}

#[test]
fn test_cli_invoice() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    tally_cmd(&db_path)
        .args(["entry", "add", "2024-03-04", "Client A", "Build API", "3"])
        .assert()
        .success();

    tally_cmd(&db_path)
        .args([
            "--rate",
            "100",
            "--issuer-name",
            "Jo Doe",
            "invoice",
            "2024-03",
            "INV-7",
            "--customer",
            "Acme Corp",
            "--issue-date",
            "2024-04-01",
            "--adjustment",
            "Discount=-50",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Invoice INV-7"))
        .stdout(predicate::str::contains("Billed to: Acme Corp"))
        .stdout(predicate::str::contains("Issued by: Jo Doe"))
        .stdout(predicate::str::contains("Subtotal: $300.00"))
        .stdout(predicate::str::contains("Amount due: $250.00"));

    tally_cmd(&db_path)
        .args(["invoice", "2024-03", "2024-01", "--customer", "Acme Corp"])
        .assert()
        .failure();
}
