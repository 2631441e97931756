use assert_cmd::Command;
use predicates::prelude::*;

fn folio_cli() -> Command {
    let mut cmd = Command::cargo_bin("folio_cli").unwrap();
    cmd.env_remove("FOLIO_PASSWORD").env_remove("RUST_LOG");
    cmd
}

#[test]
fn version_prints_name_and_version() {
    folio_cli()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(concat!(
            "folio_cli ",
            env!("CARGO_PKG_VERSION")
        )));
}

#[test]
fn hash_password_prints_a_bcrypt_hash() {
    folio_cli()
        .args(["hash-password", "--password", "long enough secret"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("$2b$10$"));
}

#[test]
fn hash_password_reads_the_environment() {
    folio_cli()
        .arg("hash-password")
        .env("FOLIO_PASSWORD", "from the environment")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("$2"));
}

#[test]
fn short_password_is_refused() {
    folio_cli()
        .args(["hash-password", "--password", "short"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("at least 8 characters"));
}

#[test]
fn create_admin_validates_before_connecting() {
    folio_cli()
        .args([
            "create-admin",
            "--email",
            "not-an-email",
            "--password",
            "long enough secret",
            "--database-url",
            "postgres://127.0.0.1:1/folio",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("email"));
}
