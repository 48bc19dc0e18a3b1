// tests/cli.rs
//! todo CLI tests.

use assert_cmd::Command;
use assert_fs::TempDir;
use assert_fs::assert::PathAssert;
use assert_fs::fixture::{FileWriteStr, PathChild};
use predicates::prelude::*;
use predicates::str::contains;

type TestResult = Result<(), Box<dyn std::error::Error>>;

/// A working directory and a separate home directory.
struct Sandbox {
    cwd: TempDir,
    home: TempDir,
}

impl Sandbox {
    fn new() -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self {
            cwd: TempDir::new()?,
            home: TempDir::new()?,
        })
    }

    fn todo(&self, args: &[&str]) -> Result<Command, Box<dyn std::error::Error>> {
        let mut cmd = Command::cargo_bin("todo")?;
        cmd.current_dir(&self.cwd)
            .env("HOME", self.home.path())
            .env("USERPROFILE", self.home.path())
            .env("NO_COLOR", "1")
            .env_remove("TODO_LOG")
            .args(args);
        Ok(cmd)
    }

    fn stdout(&self, args: &[&str]) -> Result<String, Box<dyn std::error::Error>> {
        let out = self.todo(args)?.assert().success().get_output().stdout.clone();
        Ok(String::from_utf8(out)?)
    }

    fn local(&self) -> Result<String, Box<dyn std::error::Error>> {
        Ok(std::fs::read_to_string(self.cwd.child(".todo").path())?)
    }

    fn global(&self) -> Result<String, Box<dyn std::error::Error>> {
        Ok(std::fs::read_to_string(self.home.child(".todo").path())?)
    }
}

#[test]
fn full_lifecycle_in_an_empty_directory() -> TestResult {
    let sb = Sandbox::new()?;

    assert_eq!(sb.stdout(&["init"])?, "Created ./.todo\n\n");
    sb.cwd.child(".todo").assert(predicates::path::exists());
    assert_eq!(sb.local()?, "");

    assert_eq!(sb.stdout(&["add", "buy", "milk"])?, "Added!\n\n");
    assert_eq!(sb.stdout(&[])?, "[ 0] buy milk\n\n");

    assert_eq!(sb.stdout(&["complete", "0"])?, "Completed!\n\n");
    assert_eq!(sb.stdout(&[])?, "[ 0][Complete] buy milk\n\n");
    assert_eq!(sb.local()?, "O:buy milk\n");

    assert_eq!(
        sb.stdout(&["sweep"])?,
        "Removed 1 completed todos from the list!\n\n"
    );
    assert_eq!(sb.stdout(&[])?, "No todos added yet!\n\n");
    Ok(())
}

#[test]
fn local_and_global_lists_are_separate() -> TestResult {
    let sb = Sandbox::new()?;

    sb.todo(&["add", "a"])?.assert().success();
    sb.todo(&["global", "add", "b"])?.assert().success();

    assert_eq!(sb.local()?, "X:a\n");
    assert_eq!(sb.global()?, "X:b\n");
    assert_eq!(sb.stdout(&[])?, "[ 0] a\n\n");
    assert_eq!(sb.stdout(&["global"])?, "[ 0] b\n\n");
    Ok(())
}

#[test]
fn complete_on_empty_store_reports_no_such_item() -> TestResult {
    let sb = Sandbox::new()?;
    sb.todo(&["init"])?.assert().success();

    sb.todo(&["complete", "0"])?
        .assert()
        .success()
        .stdout(contains("No such item!"));
    assert_eq!(sb.local()?, "");
    Ok(())
}

#[test]
fn delete_keeps_order_of_remaining_items() -> TestResult {
    let sb = Sandbox::new()?;
    for item in ["first", "second", "third"] {
        sb.todo(&["add", item])?.assert().success();
    }

    assert_eq!(sb.stdout(&["delete", "1"])?, "Deleted!\n\n");
    assert_eq!(sb.local()?, "X:first\nX:third\n");
    assert_eq!(sb.stdout(&[])?, "[ 0] first\n[ 1] third\n\n");
    Ok(())
}

#[test]
fn purge_removes_everything_and_counts() -> TestResult {
    let sb = Sandbox::new()?;
    sb.cwd.child(".todo").write_str("X:a\nO:b\nX:c\n")?;

    assert_eq!(
        sb.stdout(&["purge"])?,
        "Removed 3 todos from the list!\n\n"
    );
    assert_eq!(sb.local()?, "");
    Ok(())
}

#[test]
fn commands_chain_and_share_scope() -> TestResult {
    let sb = Sandbox::new()?;

    let out = sb.stdout(&["global", "init", "add", "read", "book"])?;
    assert!(out.starts_with("Created "), "got: {out}");
    assert!(out.contains("Added!"), "got: {out}");
    assert_eq!(sb.global()?, "X:read book\n");
    sb.cwd.child(".todo").assert(predicates::path::missing());

    sb.todo(&["global", "complete", "0", "sweep"])?
        .assert()
        .success()
        .stdout(contains("Completed!").and(contains("Removed 1 completed todos")));
    assert_eq!(sb.global()?, "");
    Ok(())
}

#[test]
fn shorthand_and_case_are_accepted() -> TestResult {
    let sb = Sandbox::new()?;
    sb.todo(&["I"])?.assert().success();
    sb.todo(&["A", "Call", "mom"])?.assert().success();
    sb.todo(&["c", "0"])?.assert().success();
    assert_eq!(sb.local()?, "O:Call mom\n");
    Ok(())
}

#[test]
fn unknown_command_prints_usage_and_drops_the_rest() -> TestResult {
    let sb = Sandbox::new()?;

    sb.todo(&["frobnicate", "init"])?
        .assert()
        .success()
        .stdout(contains("todo usage").and(contains("Created").not()));
    sb.cwd.child(".todo").assert(predicates::path::missing());
    Ok(())
}

#[test]
fn help_and_version_stop_the_chain() -> TestResult {
    let sb = Sandbox::new()?;

    sb.todo(&["help", "init"])?
        .assert()
        .success()
        .stdout(contains("COMMAND          DESCRIPTION"));
    sb.cwd.child(".todo").assert(predicates::path::missing());

    assert_eq!(
        sb.stdout(&["version", "init"])?,
        format!("todo {}\n\n", env!("CARGO_PKG_VERSION"))
    );
    sb.cwd.child(".todo").assert(predicates::path::missing());
    Ok(())
}

#[test]
fn missing_arguments_explain_and_show_usage() -> TestResult {
    let sb = Sandbox::new()?;

    sb.todo(&["complete"])?
        .assert()
        .success()
        .stdout(
            contains("You need to pass in a todo ID to complete!").and(contains("todo usage")),
        );
    sb.todo(&["delete"])?
        .assert()
        .success()
        .stdout(contains("You need to pass in a todo ID to delete!"));
    sb.todo(&["add"])?
        .assert()
        .success()
        .stdout(contains("No todo to add!"));
    Ok(())
}

#[test]
fn listing_a_missing_store_shows_usage_by_default() -> TestResult {
    let sb = Sandbox::new()?;

    sb.todo(&[])?
        .assert()
        .success()
        .stdout(contains("todo usage").and(contains("No todos added yet!")));
    Ok(())
}

#[test]
fn missing_store_notice_can_be_configured() -> TestResult {
    let sb = Sandbox::new()?;
    sb.home
        .child(".todo.toml")
        .write_str("missing_store = \"notice\"\n")?;

    sb.todo(&[])?.assert().success().stdout(
        contains("Could not open ./.todo. Run 'todo init' to create it.")
            .and(contains("todo usage").not()),
    );
    Ok(())
}

#[test]
fn non_numeric_index_is_zero_unless_strict() -> TestResult {
    let sb = Sandbox::new()?;
    sb.cwd.child(".todo").write_str("X:a\nX:b\n")?;

    sb.todo(&["complete", "first"])?.assert().success();
    assert_eq!(sb.local()?, "O:a\nX:b\n");

    sb.home
        .child(".todo.toml")
        .write_str("strict_index = true\n")?;
    sb.todo(&["delete", "second", "sweep"])?
        .assert()
        .success()
        .stdout(contains("Invalid todo ID 'second'").and(contains("Removed").not()));
    assert_eq!(sb.local()?, "O:a\nX:b\n");
    Ok(())
}

#[test]
fn exit_status_is_zero_unless_enabled() -> TestResult {
    let sb = Sandbox::new()?;
    sb.todo(&["init"])?.assert().success();

    sb.todo(&["delete", "4"])?.assert().success();

    sb.home.child(".todo.toml").write_str("exit_codes = true\n")?;
    sb.todo(&["delete", "4"])?
        .assert()
        .failure()
        .code(1)
        .stdout(contains("No such item!"));
    sb.todo(&["add", "fine"])?.assert().success();
    Ok(())
}

#[cfg(unix)]
#[test]
fn global_without_home_is_reported() -> TestResult {
    let sb = Sandbox::new()?;

    sb.todo(&["global", "add", "x"])?
        .env_remove("HOME")
        .assert()
        .success()
        .stdout(contains("no home directory"));
    sb.cwd.child(".todo").assert(predicates::path::missing());
    Ok(())
}

#[test]
fn diagnostics_stay_off_stdout() -> TestResult {
    let sb = Sandbox::new()?;

    let out = sb
        .todo(&["-v", "3", "init"])?
        .assert()
        .success()
        .get_output()
        .clone();
    assert_eq!(String::from_utf8(out.stdout)?, "Created ./.todo\n\n");
    assert!(String::from_utf8(out.stderr)?.contains("init"));
    Ok(())
}

#[test]
fn broken_config_is_ignored() -> TestResult {
    let sb = Sandbox::new()?;
    sb.home.child(".todo.toml").write_str("color = yes\n")?;

    sb.todo(&["add", "x"])?
        .assert()
        .success()
        .code(0)
        .stdout(contains("Added!"))
        .stderr(contains("ignoring config"));
    assert_eq!(sb.local()?, "X:x\n");
    Ok(())
}

#[test]
fn verbosity_takes_a_level_value() -> TestResult {
    let sb = Sandbox::new()?;

    sb.todo(&["--verbose", "2", "init"])?
        .assert()
        .success()
        .stdout(contains("Created ./.todo"))
        .stderr(contains("dispatch"));

    sb.todo(&["-v", "1", "add", "x"])?
        .assert()
        .success()
        .stdout(contains("Added!"))
        .stderr(contains("dispatch").not());
    assert_eq!(sb.local()?, "X:x\n");
    Ok(())
}
