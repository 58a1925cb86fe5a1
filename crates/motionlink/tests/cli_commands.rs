#![cfg(feature = "cli")]

use std::process::{Command, Output};

fn motionlink(args: &[&str]) -> Output {
    motionlink_logging(args, "error")
}

fn motionlink_logging(args: &[&str], level: &str) -> Output {
    Command::new(env!("CARGO_BIN_EXE_motionlink"))
        .arg("--log-level")
        .arg(level)
        .arg("--format")
        .arg("json")
        .args(args)
        .env_remove("MOTIONLINK_FORMAT")
        .env_remove("MOTIONLINK_LOG")
        .output()
        .expect("motionlink should run")
}

fn stdout_json(output: &Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(stdout.trim()).expect("stdout should be json")
}

#[test]
fn encode_appends_block_checksum() {
    let output = motionlink(&["encode", "01 02 03"]);
    assert_eq!(output.status.code(), Some(0));

    let json = stdout_json(&output);
    assert_eq!(json["packet"], "01020328");
    assert_eq!(json["blocks"], 1);
    assert_eq!(json["unprotected"], 0);
}

#[test]
fn encode_framed_prefixes_length() {
    let output = motionlink(&["encode", "--framed", "1b"]);
    assert_eq!(output.status.code(), Some(0));

    let json = stdout_json(&output);
    let packet = json["packet"].as_str().expect("packet should be a string");
    assert_eq!(packet, "021b00f0");
    assert_eq!(json["blocks"], 1);
    assert_eq!(json["unprotected"], 0);
}

#[test]
fn encode_framed_counts_padding_as_covered() {
    let output = motionlink(&["encode", "--framed", "0b00008040"]);
    assert_eq!(output.status.code(), Some(0));

    let json = stdout_json(&output);
    assert_eq!(json["packet"], "060b000080402089");
    assert_eq!(json["blocks"], 2);
    assert_eq!(json["unprotected"], 0);
}

#[test]
fn encode_and_verify_log_at_debug() {
    let output = motionlink_logging(&["encode", "--framed", "1b"], "debug");
    assert_eq!(output.status.code(), Some(0));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("encoded packet"), "stderr: {stderr}");

    let output = motionlink_logging(&["verify", "021b00f0"], "debug");
    assert_eq!(output.status.code(), Some(0));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("verified packet"), "stderr: {stderr}");

    let quiet = motionlink(&["encode", "1b"]);
    assert!(!String::from_utf8_lossy(&quiet.stderr).contains("encoded packet"));
}

#[test]
fn verify_accepts_encoded_packet() {
    let output = motionlink(&["verify", "01020328"]);
    assert_eq!(output.status.code(), Some(0));

    let json = stdout_json(&output);
    assert_eq!(json["valid"], true);
    assert_eq!(json["payload"], "010203");
}

#[test]
fn verify_rejects_corrupt_packet() {
    let output = motionlink(&["verify", "01020329"]);
    assert_eq!(output.status.code(), Some(60));

    let json = stdout_json(&output);
    assert_eq!(json["valid"], false);
    assert!(json["error"].as_str().is_some());
}

#[test]
fn bad_hex_is_usage_error() {
    let output = motionlink(&["verify", "0102x"]);
    assert_eq!(output.status.code(), Some(64));
    assert!(String::from_utf8_lossy(&output.stderr).contains("error:"));
}

#[test]
fn lookup_by_name_and_value() {
    let output = motionlink(&["lookup", "command", "HOME"]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout_json(&output)["code"], 0x1b);

    let output = motionlink(&["lookup", "rcommand", "0x40"]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout_json(&output)["name"], "UUID");
}

#[test]
fn lookup_unknown_name_is_data_invalid() {
    let output = motionlink(&["lookup", "command", "TELEPORT"]);
    assert_eq!(output.status.code(), Some(60));
}

#[test]
fn opcodes_lists_every_table() {
    let output = motionlink(&["opcodes"]);
    assert_eq!(output.status.code(), Some(0));

    let json = stdout_json(&output);
    let entries = json.as_array().expect("opcodes should be an array");
    for table in ["single", "command", "reply", "parsed"] {
        assert!(entries.iter().any(|e| e["table"] == table), "missing {table}");
    }
}

#[test]
fn control_decodes_and_encodes() {
    let output = motionlink(&["control", "0x96"]);
    assert_eq!(output.status.code(), Some(0));
    let json = stdout_json(&output);
    assert_eq!(json["name"], "ACK2");
    assert_eq!(json["seq"], 2);

    let output = motionlink(&["control", "--family", "STALL", "--seq", "3"]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout_json(&output)["code"], 0xbb);
}

#[test]
fn control_singleton_rejects_sequence() {
    let output = motionlink(&["control", "--family", "DEBUG", "--seq", "1"]);
    assert_eq!(output.status.code(), Some(64));
}

#[test]
fn uuid_generates_version_4_text() {
    let output = motionlink(&["uuid"]);
    assert_eq!(output.status.code(), Some(0));

    let json = stdout_json(&output);
    let id = json["id"].as_str().expect("id should be a string");
    assert_eq!(id.len(), 36);
    assert_eq!(id.as_bytes()[14], b'4');
    assert!(matches!(id.as_bytes()[19], b'8' | b'9' | b'a' | b'b'));
}

#[test]
fn uuid_seed_is_reserialized_unchanged() {
    let output = motionlink(&["uuid", "--seed", "000102030405060708090a0b0c0d0e0f"]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        stdout_json(&output)["id"],
        "00010203-0405-0607-0809-0a0b0c0d0e0f"
    );

    let output = motionlink(&["uuid", "--seed", "0001"]);
    assert_eq!(output.status.code(), Some(64));
}
