use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

#[test]
fn test_missing_fid_is_rejected_and_processing_continues() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "fid,action,item,now").unwrap();
    writeln!(file, ",feed,,1000").unwrap();
    writeln!(file, "7,feed,,2000").unwrap();

    let mut cmd = Command::new(cargo_bin!("petframe"));
    cmd.arg(file.path());

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Rejected request: Missing user ID"))
        .stdout(predicate::str::contains("7,4,5,1,0,"));
}

#[test]
fn test_malformed_rows_are_skipped() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "fid,action,item,now").unwrap();
    writeln!(file, "1,play,,1000").unwrap();
    writeln!(file, "1,play,,not_a_time").unwrap();
    writeln!(file, "1,play,,3000").unwrap();

    let mut cmd = Command::new(cargo_bin!("petframe"));
    cmd.arg(file.path());

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Error reading request"))
        .stdout(predicate::str::contains("1,5,7,4,0,"));
}

#[test]
fn test_unknown_actions_and_items_are_noops() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "fid,action,item,now").unwrap();
    writeln!(file, "1,play,,1000").unwrap();
    writeln!(file, "1,dance,,2000").unwrap();
    writeln!(file, "1,buy,rocket,3000").unwrap();
    writeln!(file, "1,buy,,4000").unwrap();

    let mut cmd = Command::new(cargo_bin!("petframe"));
    cmd.arg(file.path());

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Rejected request").not())
        .stdout(predicate::str::contains("1,5,6,2,0,"));
}

#[test]
fn test_reject_policy_from_config() {
    let mut config = NamedTempFile::new().unwrap();
    writeln!(config, "[economy]").unwrap();
    writeln!(config, "unknown_policy = \"reject\"").unwrap();

    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "fid,action,item,now").unwrap();
    writeln!(file, "1,dance,,1000").unwrap();

    let mut cmd = Command::new(cargo_bin!("petframe"));
    cmd.arg(file.path()).arg("--config").arg(config.path());

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Rejected request: Unknown action: dance"));
}

#[test]
fn test_invalid_config_fails() {
    let mut config = NamedTempFile::new().unwrap();
    writeln!(config, "[economy]").unwrap();
    writeln!(config, "initial_hunger = 99").unwrap();

    let mut cmd = Command::new(cargo_bin!("petframe"));
    cmd.arg("tests/fixtures/requests.csv")
        .arg("--config")
        .arg(config.path());

    cmd.assert().failure();
}
