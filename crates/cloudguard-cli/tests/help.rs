use assert_cmd::Command;

/// Helper to get a Command for the cloudguard binary.
#[allow(deprecated)]
fn cloudguard_cmd() -> Command {
    Command::cargo_bin("cloudguard").unwrap()
}

#[test]
fn help_works() {
    cloudguard_cmd().arg("--help").assert().success();
}

#[test]
fn rules_lists_the_registry() {
    cloudguard_cmd()
        .arg("rules")
        .assert()
        .success()
        .stdout(predicates::str::contains("s3.bucket_encryption"));
}
