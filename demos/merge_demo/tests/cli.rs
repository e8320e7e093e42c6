//! End-to-end tests running the compiled `merge_demo` binary.

use anyhow::{Result, anyhow, ensure};
use assert_cmd::Command;
use rstest::rstest;
use serde_json::{Value, json};

/// Runs the binary with `args`, returning stdout parsed as JSON.
fn run_json(args: &[&str]) -> Result<Value> {
    #[expect(
        deprecated,
        reason = "cargo_bin is the standard assert_cmd API for workspace binaries"
    )]
    let mut cmd = Command::cargo_bin("merge_demo")?;
    cmd.env("RUST_LOG", "off").args(args);
    let output = cmd.output()?;
    ensure!(
        output.status.success(),
        "merge_demo failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    Ok(serde_json::from_slice(&output.stdout)?)
}

#[rstest]
fn default_run_prints_the_merged_person() -> Result<()> {
    let merged = run_json(&[])?;
    let expected = json!({
        "name": "Bob",
        "age": 30,
        "is_alive": true,
        "extra": "Extra Data",
        "address": {
            "hobbies": ["Swimming"],
            "active": true,
            "friends": {"Tom": "Neighbor"}
        }
    });
    ensure!(merged == expected, "unexpected output {merged}");
    Ok(())
}

#[rstest]
fn flags_form_a_third_operand() -> Result<()> {
    let merged = run_json(&[
        "--age",
        "31",
        "--hobby",
        "Chess",
        "--hobby",
        "Rowing",
        "--friend",
        "Ann=Sister",
        "--extra",
        "{\"source\": \"cli\"}",
    ])?;
    ensure!(merged.pointer("/name") == Some(&json!("Bob")), "name: {merged}");
    ensure!(merged.pointer("/age") == Some(&json!(31)), "age: {merged}");
    ensure!(
        merged.pointer("/address/hobbies") == Some(&json!(["Chess", "Rowing"])),
        "hobbies: {merged}"
    );
    ensure!(
        merged.pointer("/address/friends") == Some(&json!({"Ann": "Sister", "Tom": "Neighbor"})),
        "friends: {merged}"
    );
    ensure!(
        merged.pointer("/extra") == Some(&json!({"source": "cli"})),
        "extra: {merged}"
    );
    Ok(())
}

#[rstest]
fn skipping_the_overlay_keeps_the_base() -> Result<()> {
    let merged = run_json(&["--no-overlay", "--name", "Cy"])?;
    ensure!(merged.pointer("/name") == Some(&json!("Cy")), "name: {merged}");
    ensure!(merged.get("extra").is_none(), "null extra is omitted: {merged}");
    let address = merged
        .get("address")
        .ok_or_else(|| anyhow!("address missing: {merged}"))?;
    ensure!(
        address == &json!({"hobbies": [], "active": true, "friends": {}}),
        "address: {address}"
    );
    Ok(())
}

#[rstest]
fn toml_output_is_parseable() -> Result<()> {
    #[expect(
        deprecated,
        reason = "cargo_bin is the standard assert_cmd API for workspace binaries"
    )]
    let mut cmd = Command::cargo_bin("merge_demo")?;
    let output = cmd.env("RUST_LOG", "off").args(["--format", "toml"]).output()?;
    ensure!(output.status.success(), "merge_demo failed");
    let text = String::from_utf8(output.stdout)?;
    ensure!(text.contains("name = \"Bob\""), "unexpected TOML:\n{text}");
    ensure!(text.contains("[address.friends]"), "unexpected TOML:\n{text}");
    Ok(())
}

#[rstest]
fn malformed_friend_is_rejected() -> Result<()> {
    #[expect(
        deprecated,
        reason = "cargo_bin is the standard assert_cmd API for workspace binaries"
    )]
    let mut cmd = Command::cargo_bin("merge_demo")?;
    let output = cmd.args(["--friend", "nobody"]).output()?;
    ensure!(!output.status.success(), "malformed friend should fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    ensure!(stderr.contains("NAME=RELATION"), "unexpected stderr: {stderr}");
    Ok(())
}
