use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn test_cli_end_to_end() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin!());
    cmd.arg("tests/fixtures/installments.csv")
        .arg("--fee-total")
        .arg("900");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "release_date,competences,status,installment_amount,client_net,fee_charged,effective_rate,balance_after",
        ))
        .stdout(predicate::str::contains(
            "2024-02-26,01/2024,pending,1000.00,600.00,400.00,0.4000,500.00",
        ))
        .stdout(predicate::str::contains(
            "2024-03-25,02/2024,pending,1000.00,650.00,350.00,0.3500,150.00",
        ))
        .stdout(predicate::str::contains(
            "2024-04-24,03/2024,pending,1000.00,850.00,150.00,0.1500,0.00",
        ));

    Ok(())
}

#[test]
fn test_cli_json_output() -> Result<(), Box<dyn std::error::Error>> {
    let output = Command::new(cargo_bin!("feeledger"))
        .arg("tests/fixtures/installments.csv")
        .arg("--fee-percent")
        .arg("30")
        .arg("--format")
        .arg("json")
        .output()?;
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(value["ok"], true);
    assert_eq!(value["rows"].as_array().map(Vec::len), Some(3));
    assert_eq!(value["totals"]["total_fee_owed"], "900.00");
    assert_eq!(value["totals"]["total_fee_collected"], "900.00");
    assert_eq!(value["totals"]["remaining_balance"], "0.00");
    assert_eq!(value["totals"]["total_gross"], "3300.00");
    assert!(value.get("warning").is_none());

    Ok(())
}

#[test]
fn test_cli_requires_fee_basis() {
    Command::new(cargo_bin!("feeledger"))
        .arg("tests/fixtures/installments.csv")
        .assert()
        .failure();
}

#[test]
fn test_cli_rejects_both_fee_bases() {
    Command::new(cargo_bin!("feeledger"))
        .arg("tests/fixtures/installments.csv")
        .arg("--fee-total")
        .arg("900")
        .arg("--fee-percent")
        .arg("30")
        .assert()
        .failure();
}

#[test]
fn test_cli_already_paid() {
    Command::new(cargo_bin!("feeledger"))
        .arg("tests/fixtures/installments.csv")
        .arg("--fee-total")
        .arg("900")
        .arg("--already-paid")
        .arg("800")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "2024-02-26,01/2024,pending,1000.00,900.00,100.00,0.1000,0.00",
        ))
        .stdout(predicate::str::contains(
            "2024-03-25,02/2024,pending,1000.00,1000.00,0.00,0.0000,0.00",
        ));
}
