use std::fs;

use assert_cmd::Command;
use assert_fs::{prelude::*, TempDir};
use predicates::str::contains;
use serde_json::Value;

const FAST_CONFIG: &str =
    r#"{ "submit_delay_ms": 0, "success_clear_delay_ms": 0, "ui_color_enabled": false }"#;

fn home() -> TempDir {
    let temp = TempDir::new().expect("create temp dir");
    temp.child("config.json")
        .write_str(FAST_CONFIG)
        .expect("write config");
    temp
}

fn shell(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("onboard_cli").expect("binary exists");
    cmd.env("ONBOARD_CLI_SCRIPT", "1")
        .env("ONBOARD_HOME", home.path())
        .env("RUST_LOG", "off");
    cmd
}

fn stored(home: &TempDir) -> Value {
    let raw = fs::read_to_string(home.path().join("local_storage.json")).expect("storage file");
    serde_json::from_str(&raw).expect("storage json")
}

#[test]
fn register_then_employee_profile_is_saved() {
    let home = home();
    let script = r#"
mode register
set email user@example.com
set password abcdefgh
set confirm-password abcdefgh
submit
select employee
next
set city Lisbon
add-skill Rust
work 1 company Acme
work 1 position Engineer
submit
storage
exit
"#;

    shell(&home)
        .write_stdin(script)
        .assert()
        .success()
        .stdout(contains("Registration successful!"))
        .stdout(contains("Employee profile created successfully!"))
        .stdout(contains("employeeData = "));

    let items = stored(&home);
    assert_eq!(items["userType"], "\"employee\"");
    let employee: Value =
        serde_json::from_str(items["employeeData"].as_str().expect("string value"))
            .expect("employee json");
    assert_eq!(employee["city"], "Lisbon");
    assert_eq!(employee["skills"][0], "Rust");
    assert_eq!(employee["workHistory"][0]["company"], "Acme");
}

#[test]
fn company_with_blank_industry_is_not_saved() {
    let home = home();
    let script = r#"
set email owner@acme.com
set password abcdefgh
submit
select company
next
set company-name Acme
set email hr@acme.com
set password abcdefgh
set confirm-password abcdefgh
set industry ""
set company-size "11-50 employees"
set city Porto
submit
show
"#;

    shell(&home)
        .write_stdin(script)
        .assert()
        .success()
        .stdout(contains("Login successful!"))
        .stdout(contains("Please select an industry"))
        .stdout(contains("Acme"));

    let items = stored(&home);
    assert_eq!(items["userType"], "\"company\"");
    assert!(items.get("companyData").is_none());
}

#[test]
fn errors_do_not_stop_the_script() {
    let home = home();
    let script = "submit\nfrobnicate\nback\nset email user@example.com\nshow\n";

    shell(&home)
        .write_stdin(script)
        .assert()
        .success()
        .stdout(contains("Email is required"))
        .stdout(contains("user@example.com"));

    assert!(!home.path().join("local_storage.json").exists());
}
