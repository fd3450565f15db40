// domain-availability/tests/cli_integration.rs

use assert_cmd::Command;
use httpmock::prelude::*;
use predicates::prelude::*;
use std::fs;
use tempfile::NamedTempFile;

/// Helper to create a test domains file
fn create_test_domains_file(domains: &[&str]) -> NamedTempFile {
    let file = NamedTempFile::new().expect("Failed to create temp file");
    let content = domains.join("\n");
    fs::write(file.path(), content).expect("Failed to write to temp file");
    file
}

fn cli() -> Command {
    let mut cmd = Command::cargo_bin("domain-availability").unwrap();
    // Keep host configuration out of the test environment
    cmd.env_remove("DA_JSON")
        .env_remove("DA_PRETTY")
        .env_remove("DA_ENDPOINT")
        .env_remove("DA_TIMEOUT")
        .env_remove("DA_CONCURRENCY")
        .env("HOME", "/nonexistent");
    cmd
}

#[test]
fn test_help_shows_flags() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--json"))
        .stdout(predicate::str::contains("--pretty"))
        .stdout(predicate::str::contains("--concurrency"))
        .stdout(predicate::str::contains("--file"));
}

#[test]
fn test_missing_api_key_fails() {
    cli()
        .env_remove("DOMAIN_API_KEY")
        .arg("example.com")
        .assert()
        .failure()
        .stderr(predicate::str::contains("DOMAIN_API_KEY"));
}

#[test]
fn test_no_domains_fails() {
    cli()
        .env("DOMAIN_API_KEY", "test-key")
        .assert()
        .failure()
        .stderr(predicate::str::contains("specify domain names"));
}

#[test]
fn test_available_domain_plain_output() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/v1");
        then.status(200).json_body(serde_json::json!({
            "DomainInfo": { "domainAvailability": "AVAILABLE" }
        }));
    });

    cli()
        .env("DOMAIN_API_KEY", "test-key")
        .args(["example.com", "--endpoint", &server.url("/api/v1")])
        .assert()
        .success()
        .stdout(predicate::str::contains("example.com AVAILABLE"));
}

#[test]
fn test_json_output_is_wire_payload() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/v1");
        then.status(200).json_body(serde_json::json!({
            "DomainInfo": { "domainAvailability": "UNAVAILABLE" }
        }));
    });

    let output = cli()
        .env("DOMAIN_API_KEY", "test-key")
        .args(["example.com", "--json", "--endpoint", &server.url("/api/v1")])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    // Always an array, even for a single domain
    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(
        json,
        serde_json::json!([{"domain": "example.com", "available": false}])
    );
}

#[test]
fn test_failed_check_emits_generic_error_payload() {
    // Nothing listens here, so the check fails at the network level
    let output = cli()
        .env("DOMAIN_API_KEY", "test-key")
        .args([
            "example.com",
            "--json",
            "--endpoint",
            "http://127.0.0.1:1/api/v1",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(
        json,
        serde_json::json!([{"error": "Impossible de vérifier la disponibilité du domaine."}])
    );
}

#[test]
fn test_json_output_mixes_results_and_errors_in_one_array() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET)
            .path("/api/v1")
            .query_param("domainName", "ok.com");
        then.status(200).json_body(serde_json::json!({
            "DomainInfo": { "domainAvailability": "AVAILABLE" }
        }));
    });
    server.mock(|when, then| {
        when.method(GET)
            .path("/api/v1")
            .query_param("domainName", "bad.com");
        then.status(200).body("<html>not json</html>");
    });

    let output = cli()
        .env("DOMAIN_API_KEY", "test-key")
        .args([
            "ok.com",
            "bad.com",
            "--json",
            "--endpoint",
            &server.url("/api/v1"),
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(
        json,
        serde_json::json!([
            {"domain": "ok.com", "available": true},
            {"error": "Impossible de vérifier la disponibilité du domaine."}
        ])
    );
}

#[test]
fn test_domains_from_file_are_checked() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/v1");
        then.status(200).json_body(serde_json::json!({
            "DomainInfo": { "domainAvailability": "AVAILABLE" }
        }));
    });

    let file = create_test_domains_file(&["first.com", "# skipped", "second.com"]);

    cli()
        .env("DOMAIN_API_KEY", "test-key")
        .args([
            "--file",
            &file.path().to_string_lossy(),
            "--endpoint",
            &server.url("/api/v1"),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("first.com"))
        .stdout(predicate::str::contains("second.com"))
        .stdout(predicate::str::contains("Summary:"));
}

#[test]
fn test_invalid_timeout_rejected() {
    cli()
        .env("DOMAIN_API_KEY", "test-key")
        .args(["example.com", "--timeout", "soon"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid timeout"));
}
