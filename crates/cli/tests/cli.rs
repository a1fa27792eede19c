use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn list_names_every_story() {
    Command::cargo_bin("comanda")
        .unwrap()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("restaurant_onboarding"))
        .stdout(predicate::str::contains("public_routes"))
        .stdout(predicate::str::contains("keycloak_login"));
}

#[test]
fn unknown_story_fails_without_touching_the_network() {
    Command::cargo_bin("comanda")
        .unwrap()
        .args(["run", "no_such_story"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn help_documents_loop_mode() {
    Command::cargo_bin("comanda")
        .unwrap()
        .args(["run", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--loop"))
        .stdout(predicate::str::contains("--iterations"));
}
