//! Smoke tests driving the pantryctl binary in memory mode

use assert_cmd::Command;
use predicates::prelude::*;

fn pantryctl() -> Command {
    let mut cmd = Command::cargo_bin("pantryctl").unwrap();
    cmd.env_remove("RUST_LOG").arg("--memory");
    cmd
}

// === Help ===

#[test]
fn test_help_lists_connection_settings() {
    let mut cmd = Command::cargo_bin("pantryctl").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--memory"))
        .stdout(predicate::str::contains("--container-name"))
        .stdout(predicate::str::contains("POSTGRES_PORT"));
}

// === Session Tests ===

#[test]
fn test_exit_is_graceful() {
    pantryctl()
        .write_stdin("exit\n")
        .assert()
        .code(0)
        .stdout(predicate::str::contains(
            "Welcome to the food stocks terminal application!",
        ))
        .stdout(predicate::str::contains(
            "Available commands: add, view, sort, update, delete, lookup, exit",
        ));
}

#[test]
fn test_end_of_input_is_graceful() {
    pantryctl().write_stdin("view\n").assert().code(0);
}

#[test]
fn test_add_then_view() {
    pantryctl()
        .write_stdin("add\nMilk\n\n5\n2024\nview\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Item added successfully!"))
        .stdout(predicate::str::is_match(
            r"1 - Milk: Expires May 2024 \(Last Updated: \d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}\)",
        )
        .unwrap());
}

#[test]
fn test_update_then_view() {
    pantryctl()
        .write_stdin("add\nCheese\n15\n6\n2024\nupdate\n1\n20\n7\n2024\nview\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Item updated successfully!"))
        .stdout(predicate::str::contains("1 - Cheese: Expires 20 Jul 2024"));
}

#[test]
fn test_delete_missing_item() {
    pantryctl()
        .write_stdin("add\nMilk\n\n5\n2024\ndelete\n99\nsort\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Item ID '99' not found."))
        .stdout(predicate::str::contains("1 - Milk: Expires May 2024"));
}

#[test]
fn test_commands_are_case_insensitive() {
    pantryctl()
        .write_stdin("ADD\nBread\n3\n4\n2025\nLookup\nbREAD\nEXIT\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Matching Items:"))
        .stdout(predicate::str::contains("1 - Bread: Expires 3 Apr 2025"));
}

#[test]
fn test_unknown_command() {
    pantryctl()
        .write_stdin("fly\nview\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Unknown command. Please try again."))
        .stdout(predicate::str::contains("No items in stock."));
}

// === Startup Failures ===

fn pantryctl_with_database() -> Command {
    let mut cmd = Command::cargo_bin("pantryctl").unwrap();
    cmd.env_remove("RUST_LOG")
        .env_remove("DATABASE_URL")
        .env_remove("DB_URL");
    cmd
}

#[test]
fn test_missing_runtime_fails_without_stopping() {
    pantryctl_with_database()
        .args(["--runtime", "pantryctl-no-such-runtime"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to start the database."))
        .stderr(predicate::str::contains("Make sure the container runtime is running"))
        .stdout(predicate::str::contains("Stopping the database...").not());
}

#[cfg(unix)]
#[test]
fn test_unreachable_database_stops_container_once() {
    pantryctl_with_database()
        .args([
            "--runtime",
            "true",
            "--database-url",
            "postgres://u:p@127.0.0.1:1/x",
            "--ready-timeout",
            "1",
        ])
        .write_stdin("view\nexit\n")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to connect to the database."))
        .stdout(predicate::str::contains("Database started successfully."))
        .stdout(predicate::str::contains("Stopping the database...").count(1))
        .stdout(predicate::str::contains("Welcome").not());
}
