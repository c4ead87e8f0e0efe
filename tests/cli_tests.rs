use std::io::Write;
use std::process::Command;

fn verbrouter() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_verbrouter"));
    cmd.env_remove("VERBROUTER_METHOD_OVERRIDE_FIELD")
        .env_remove("RUST_LOG")
        .env("VERBROUTER_LOG_LEVEL", "error");
    cmd
}

#[test]
fn test_cli_routes_table() {
    let output = verbrouter().arg("routes").output().expect("run cli");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("demo.item_show"));
    assert!(stdout.contains("^ping$"));
}

#[test]
fn test_cli_dispatch_with_config_file() {
    let mut config = tempfile::NamedTempFile::new().unwrap();
    writeln!(config, "method_override_field: _verb\nlog:\n  log_level: error").unwrap();

    let output = verbrouter()
        .arg("--config")
        .arg(config.path())
        .args(["dispatch", "-m", "POST", "-p", "/items/9/", "-f", "_verb=delete"])
        .output()
        .expect("run cli");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("200 OK"));
    assert!(stdout.contains("demo.item_delete"));
}

#[test]
fn test_cli_rejects_invalid_method() {
    let output = verbrouter()
        .args(["dispatch", "-m", "NOT A VERB", "-p", "/ping"])
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid HTTP method"));
}
