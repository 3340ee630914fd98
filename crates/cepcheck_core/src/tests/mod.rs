
use std::time::Duration;

use fixtures::{CountingLookup, FaultyLookup, loopback_with, record};

use crate::{
    transport::nop::LookupNop,
    validation::{
        batch::BatchValidator, error::ValidationError, init_validator, init_validator_with_lookup,
    },
};

#[tokio::test]
async fn integration_batch_mixed_input() {
    let loopback = loopback_with(&[record(
        "30672-220",
        "Rua Juramento",
        "Saudade",
        "Belo Horizonte",
        "MG",
    )]);
    let validator = BatchValidator::new(loopback);

    let report = validator.run("30672-220, 00000000\n123").await.unwrap();

    assert_eq!(report.len(), 3);
    assert_valid!(report, 0, "30672-220");
    assert_invalid!(report, 1, "00000000");
    assert_invalid!(report, 2, "123");
    assert_partition!(report);
}

#[tokio::test]
async fn integration_batch_preserves_input_order() {
    let loopback = loopback_with(&[
        record("01001-000", "Praça da Sé", "Sé", "São Paulo", "SP"),
        record("30672-220", "Rua Juramento", "Saudade", "Belo Horizonte", "MG"),
    ])
    .with_delay(Duration::from_millis(5));
    let validator = BatchValidator::new(loopback);

    let report = validator.run("30672-220;99999999;01001-000").await.unwrap();

    let inputs: Vec<_> = report.outcomes().iter().map(|o| o.input.as_str()).collect();
    assert_eq!(inputs, vec!["30672-220", "99999999", "01001-000"]);
    assert_valid!(report, 0, "30672-220");
    assert_invalid!(report, 1, "99999999");
    assert_valid!(report, 2, "01001-000");
}

#[tokio::test]
async fn integration_batch_all_not_found() {
    let validator = init_validator_with_lookup(LookupNop);

    let report = validator.run("01001-000, 30672-220").await.unwrap();

    assert_eq!(report.len(), 2);
    assert_eq!(report.valid_count(), 0);
    assert_eq!(report.invalid_count(), 2);
    assert_partition!(report);
}

#[tokio::test]
async fn integration_malformed_token_skips_lookup() {
    let lookup = CountingLookup::new(LookupNop);
    let validator = BatchValidator::new(lookup.clone());

    // only the single 8-digit token may reach the transport
    let report = validator.run("123; 0100100; 010010001, abc, 01001-000").await.unwrap();

    assert_eq!(report.len(), 5);
    assert_eq!(report.invalid_count(), 5);
    assert_eq!(lookup.calls(), 1);
}

#[tokio::test]
async fn integration_transport_failure_isolated_per_token() {
    let loopback = loopback_with(&[
        record("01001-000", "Praça da Sé", "Sé", "São Paulo", "SP"),
        record("30672-220", "Rua Juramento", "Saudade", "Belo Horizonte", "MG"),
    ]);
    let validator = BatchValidator::new(FaultyLookup::new(loopback, &["30672220"]));

    let report = validator.run("01001-000\n30672-220").await.unwrap();

    assert_valid!(report, 0, "01001-000");
    assert_invalid!(report, 1, "30672-220");
    assert_partition!(report);
}

#[tokio::test]
async fn integration_batch_idempotent_against_stable_table() {
    let loopback = loopback_with(&[record("01001-000", "Praça da Sé", "Sé", "São Paulo", "SP")]);
    let validator = BatchValidator::new(loopback);

    let first = validator.run("01001-000, 123, 00000000").await.unwrap();
    let second = validator.run("01001-000, 123, 00000000").await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn integration_batch_empty_input() {
    let validator = init_validator_with_lookup(LookupNop);

    let report = validator.run("  \n ; , ").await.unwrap();

    assert!(report.is_empty());
    assert_eq!(report.valid_count(), 0);
    assert_eq!(report.invalid_count(), 0);
}

#[tokio::test]
async fn integration_default_http_stack_short_circuits_offline() {
    // malformed tokens never reach the transport, so the production stack
    // classifies them without any network access
    let validator = init_validator();

    let report = validator.run("123; abc").await.unwrap();
    assert_eq!(report.len(), 2);
    assert_eq!(report.invalid_count(), 2);
    assert_partition!(report);

    assert!(validator.run("").await.unwrap().is_empty());
}

#[tokio::test]
async fn integration_batch_rejects_overlapping_runs() {
    let loopback = loopback_with(&[record("01001-000", "Praça da Sé", "Sé", "São Paulo", "SP")])
        .with_delay(Duration::from_millis(100));
    let validator = BatchValidator::new(loopback);

    let background = {
        let validator = validator.clone();
        tokio::spawn(async move { validator.run("01001-000").await })
    };
    tokio::time::sleep(Duration::from_millis(20)).await;

    assert_eq!(
        validator.run("01001-000").await.unwrap_err(),
        ValidationError::BatchAlreadyRunning
    );

    let report = background.await.unwrap().unwrap();
    assert_eq!(report.valid_count(), 1);

    // guard returned to idle, a new run goes through
    assert!(validator.run("01001-000").await.is_ok());
}

#[tokio::test]
async fn integration_batch_with_concurrency_cap() {
    let loopback = loopback_with(&[
        record("01001-000", "Praça da Sé", "Sé", "São Paulo", "SP"),
        record("30672-220", "Rua Juramento", "Saudade", "Belo Horizonte", "MG"),
    ])
    .with_delay(Duration::from_millis(1));
    let validator = BatchValidator::new(loopback).with_concurrency_limit(2);

    let report = validator.run("01001-000, 99999999, 30672-220, 123").await.unwrap();

    assert_eq!(report.len(), 4);
    assert_valid!(report, 0, "01001-000");
    assert_invalid!(report, 1, "99999999");
    assert_valid!(report, 2, "30672-220");
    assert_invalid!(report, 3, "123");
    assert_partition!(report);
}
