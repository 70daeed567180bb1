//! Integration tests for the purify CLI
//!
//! These tests invoke the actual purify-cli binary and verify:
//! - Exit codes (0 = all accepted, 1 = some value fell back, 2 = usage error)
//! - stdout/stderr output
//! - JSON output format
//! - The conformance fixtures end-to-end

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

// ── Helpers ───────────────────────────────────────────────

fn purify_bin() -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_BIN_EXE_purify-cli"));
    if !path.exists() {
        path = PathBuf::from("target/debug/purify-cli");
    }
    path
}

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join(format!("../../tests/fixtures/conformance/{}", name))
}

fn run_purify(args: &[&str]) -> Output {
    Command::new(purify_bin())
        .args(args)
        .env("NO_COLOR", "1")
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .output()
        .expect("failed to execute purify-cli")
}

fn run_purify_with_stdin(args: &[&str], input: &str) -> Output {
    let mut child = Command::new(purify_bin())
        .args(args)
        .env("NO_COLOR", "1")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn purify-cli");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(input.as_bytes())
        .expect("write stdin");
    child.wait_with_output().expect("wait for purify-cli")
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn load_cases(name: &str) -> Vec<serde_json::Value> {
    let text = std::fs::read_to_string(fixture(name)).expect("read fixture");
    serde_json::from_str(&text).expect("fixture should be a JSON array")
}

// ── Version ───────────────────────────────────────────────

#[test]
fn test_version_command() {
    let output = run_purify(&["version"]);
    assert!(output.status.success(), "version should exit 0");
    let stdout = stdout_of(&output);
    assert!(stdout.contains("purify"), "should contain 'purify'");
    assert!(
        stdout.contains(env!("CARGO_PKG_VERSION")),
        "should contain version"
    );
}

#[test]
fn test_version_flag() {
    let output = run_purify(&["--version"]);
    assert!(output.status.success(), "--version should exit 0");
    assert!(stdout_of(&output).contains(env!("CARGO_PKG_VERSION")));
}

// ── Check ─────────────────────────────────────────────────

#[test]
fn test_check_accepts_and_canonicalizes() {
    let output = run_purify(&["check", "domain-to-ace", "CÆNTERSURF.net"]);
    assert!(output.status.success(), "accepted value should exit 0");
    assert_eq!(stdout_of(&output).trim(), "xn--cntersurf-g3a.net");
}

#[test]
fn test_check_rejected_exits_1() {
    let output = run_purify(&["check", "email-to-ace", "foo@bar.xn--no"]);
    assert_eq!(output.status.code(), Some(1), "rejected value should exit 1");
    assert!(stdout_of(&output).is_empty(), "no default means no stdout");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("rejected"), "should mention rejection");
}

#[test]
fn test_check_prints_default() {
    let output = run_purify(&["check", "email-to-ace", "a@b@c.net", "--default", "DEFAULT"]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout_of(&output).trim(), "DEFAULT");
}

#[test]
fn test_check_mixed_values() {
    let output = run_purify(&[
        "check",
        "email-to-unicode",
        "andreas@xn--cntersurf-g3a.net",
        "nope",
        "--default",
        "n/a",
    ]);
    assert_eq!(output.status.code(), Some(1));
    let stdout = stdout_of(&output);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines, vec!["andreas@cæntersurf.net", "n/a"]);
}

#[test]
fn test_check_camel_case_aliases() {
    for alias in ["email", "emailAddress"] {
        let output = run_purify(&["check", alias, "Andreas@CENTERSURF.net"]);
        assert!(output.status.success(), "alias {} should resolve", alias);
        assert_eq!(stdout_of(&output).trim(), "Andreas@centersurf.net");
    }
    for alias in ["domainIdn", "domainNameIdn"] {
        let output = run_purify(&["check", alias, "xn--cntersurf-g3a.net"]);
        assert!(output.status.success(), "alias {} should resolve", alias);
        assert_eq!(stdout_of(&output).trim(), "cæntersurf.net");
    }
    let output = run_purify(&["check", "positiveIntegerOrZero", "0"]);
    assert!(output.status.success());
}

#[test]
fn test_check_unknown_purifier_exits_2() {
    let output = run_purify(&["check", "no-such-purifier", "x"]);
    assert_eq!(output.status.code(), Some(2), "usage error should exit 2");
}

#[test]
fn test_check_json_output() {
    let output = run_purify(&[
        "check",
        "--json",
        "domain-to-ace",
        "bücher.de",
        "centersurf",
    ]);
    assert_eq!(output.status.code(), Some(1));
    let json: serde_json::Value =
        serde_json::from_str(&stdout_of(&output)).expect("should be valid JSON");
    assert_eq!(json["purifier"], "domain-to-ace");
    assert_eq!(json["accepted"], 1);
    assert_eq!(json["rejected"], 1);
    assert_eq!(json["results"][0]["value"], "xn--bcher-kva.de");
    assert_eq!(json["results"][1]["accepted"], false);
    assert!(json["results"][1]["value"].is_null());
}

#[test]
fn test_check_raw_json_values() {
    let output = run_purify(&["check", "--json", "--raw-json", "integer", "123.9", "true"]);
    assert_eq!(output.status.code(), Some(1));
    let json: serde_json::Value =
        serde_json::from_str(&stdout_of(&output)).expect("should be valid JSON");
    assert_eq!(json["results"][0]["value"], 123);
    assert_eq!(json["results"][1]["accepted"], false);
}

#[test]
fn test_check_raw_json_invalid_exits_2() {
    let output = run_purify(&["check", "--raw-json", "integer", "{not json"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_check_integer_in_range_bounds() {
    let output = run_purify(&[
        "check",
        "integer-in-range",
        "--min",
        "32",
        "--max",
        "100",
        "64",
        "101",
        "--default",
        "none",
    ]);
    assert_eq!(output.status.code(), Some(1));
    let stdout = stdout_of(&output);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines, vec!["64", "none"]);
}

#[test]
fn test_check_quiet() {
    let output = run_purify(&["--quiet", "check", "domain-to-ace", "centersurf.net"]);
    assert!(output.status.success());
    assert!(stdout_of(&output).is_empty(), "quiet mode should produce no stdout");
}

#[test]
fn test_check_reads_stdin() {
    let output = run_purify_with_stdin(
        &["check", "--stdin", "domain-to-ace"],
        "CENTERSURF.net\ncæntersurf.net\n",
    );
    assert!(output.status.success());
    let stdout = stdout_of(&output);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines, vec!["centersurf.net", "xn--cntersurf-g3a.net"]);
}

// ── Grammar ───────────────────────────────────────────────

#[test]
fn test_grammar_matches() {
    let output = run_purify(&["grammar", "email-ascii-strict", "andreas@centersurf.net"]);
    assert!(output.status.success());
    assert!(stdout_of(&output).contains("andreas@centersurf.net"));
}

#[test]
fn test_grammar_unmatched_exits_1() {
    let output = run_purify(&["grammar", "domain-ascii-strict", "centersurf.quuxbar"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_grammar_json_output() {
    let output = run_purify(&[
        "grammar",
        "--json",
        "domain-unicode-relaxed",
        "cæntersurf.quuxbar",
        "centersurf",
    ]);
    assert_eq!(output.status.code(), Some(1));
    let json: serde_json::Value =
        serde_json::from_str(&stdout_of(&output)).expect("should be valid JSON");
    assert_eq!(json["grammar"], "domain-unicode-relaxed");
    assert_eq!(json["matched"], 1);
    assert_eq!(json["results"][1]["matches"], false);
}

#[test]
fn test_grammar_unknown_exits_2() {
    let output = run_purify(&["grammar", "no-such-grammar", "x"]);
    assert_eq!(output.status.code(), Some(2));
}

// ── List ──────────────────────────────────────────────────

#[test]
fn test_list_names_every_purifier() {
    let output = run_purify(&["list"]);
    assert!(output.status.success());
    let stdout = stdout_of(&output);
    assert!(stdout.contains("email-to-ace"));
    assert!(stdout.contains("emailAddress"));
    assert!(stdout.contains("non-empty-alpha-numeric-with-dot"));
    assert!(stdout.contains("http-url-relaxed-with-localhost"));
}

#[test]
fn test_list_json() {
    let output = run_purify(&["list", "--json"]);
    assert!(output.status.success());
    let json: serde_json::Value =
        serde_json::from_str(&stdout_of(&output)).expect("should be valid JSON");
    let purifiers = json["purifiers"].as_array().expect("purifiers array");
    assert_eq!(purifiers.len(), 36);
    assert_eq!(json["grammars"].as_array().map(Vec::len), Some(13));
    let email = purifiers
        .iter()
        .find(|p| p["name"] == "email-to-ace")
        .expect("email-to-ace listed");
    assert_eq!(email["aliases"], serde_json::json!(["email", "emailAddress"]));
}

// ── Conformance fixtures ──────────────────────────────────

#[test]
fn test_accepted_conformance_fixtures() {
    for case in load_cases("accepted.json") {
        let purifier = case["purifier"].as_str().expect("purifier");
        let input = case["input"].as_str().expect("input");
        let expected = case["expected"].as_str().expect("expected");
        let output = run_purify(&["check", purifier, input]);
        assert!(
            output.status.success(),
            "{} should accept {:?}",
            purifier,
            input
        );
        assert_eq!(stdout_of(&output).trim_end(), expected, "{} {:?}", purifier, input);
    }
}

#[test]
fn test_rejected_conformance_fixtures() {
    for case in load_cases("rejected.json") {
        let purifier = case["purifier"].as_str().expect("purifier");
        let input = case["input"].as_str().expect("input");
        let output = run_purify(&["check", purifier, input, "--default", "DEFAULT"]);
        assert_eq!(
            output.status.code(),
            Some(1),
            "{} should reject {:?}",
            purifier,
            input
        );
        assert_eq!(stdout_of(&output).trim_end(), "DEFAULT");
    }
}

// ── Determinism: CLI output ───────────────────────────────

#[test]
fn test_cli_check_determinism_20_iterations() {
    let args = ["check", "--json", "email-to-ace", "Andreas@cæntersurf.net"];
    let first = stdout_of(&run_purify(&args));

    for i in 0..20 {
        let stdout = stdout_of(&run_purify(&args));
        assert_eq!(first, stdout, "check --json determinism failure at iteration {}", i);
    }
}
