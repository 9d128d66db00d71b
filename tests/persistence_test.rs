#![cfg(feature = "storage-rocksdb")]

use assert_cmd::cargo_bin;
use std::io::Write;
use std::process::Command;
use tempfile::tempdir;

#[test]
fn test_rocksdb_persistence_recovery() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("test_db");

    // 1. First run: a new pet plays once
    let mut csv1 = tempfile::NamedTempFile::new().unwrap();
    writeln!(csv1, "fid,action,item,now").unwrap();
    writeln!(csv1, "1,play,,1000").unwrap();

    let output1 = Command::new(cargo_bin!("petframe"))
        .arg(csv1.path())
        .arg("--db-path")
        .arg(&db_path)
        .output()
        .expect("Failed to execute command");
    assert!(output1.status.success());
    let stdout1 = String::from_utf8_lossy(&output1.stdout);
    assert!(stdout1.contains("1,5,6,2,0,"));
    let variant1 = stdout1.lines().nth(1).unwrap().rsplit(',').next().unwrap().to_string();

    // 2. Second run against the same database keeps coins and variant
    let mut csv2 = tempfile::NamedTempFile::new().unwrap();
    writeln!(csv2, "fid,action,item,now").unwrap();
    writeln!(csv2, "1,play,,2000").unwrap();

    let output2 = Command::new(cargo_bin!("petframe"))
        .arg(csv2.path())
        .arg("--db-path")
        .arg(&db_path)
        .output()
        .expect("Failed to execute command");
    assert!(output2.status.success());
    let stdout2 = String::from_utf8_lossy(&output2.stdout);

    assert!(stdout2.contains(&format!("1,5,7,4,0,{variant1}")));
}
