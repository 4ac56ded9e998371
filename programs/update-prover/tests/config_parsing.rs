use ethereum_types::consensus::{merkle::GindexTable, spec::Spec};
use ethereum_update_prover::config::UpdateProverConfig;
use ethereum_update_prover_cli::config::{parse_config, ProverSection};
use serde_json::json;
use tracing::Level;

/// Build a minimal valid configuration so that we can tweak it in each test.
fn base_config_json() -> serde_json::Value {
    json!({
        "beacon_api_url": "http://localhost:5052",
        "log_level": "debug"
    })
}

#[test]
fn test_minimal_config() {
    let config = parse_config(&base_config_json().to_string()).unwrap();

    assert_eq!(config.beacon_api_url, "http://localhost:5052");
    assert_eq!(config.log_level(), Level::DEBUG);
    assert_eq!(config.prover, ProverSection::default());
    assert!(config.prover.spec.is_none());
}

#[test]
fn test_unknown_log_level_falls_back_to_info() {
    let mut json = base_config_json();
    json["log_level"] = json!("loud");

    let config = parse_config(&json.to_string()).unwrap();
    assert_eq!(config.log_level(), Level::INFO);
}

#[test]
fn test_prover_section_with_spec() {
    let mut json = base_config_json();
    json["prover"] = json!({
        "spec": Spec::mainnet(),
        "gindices": GindexTable::ELECTRA,
        "finality_delay_epochs": 3
    });

    let config = parse_config(&json.to_string()).unwrap();
    let spec = config.prover.spec.clone().unwrap();
    assert_eq!(spec, Spec::mainnet());

    let prover_config = config.prover.into_config(spec);
    assert_eq!(
        prover_config,
        UpdateProverConfig {
            gindices: GindexTable::ELECTRA,
            finality_delay_epochs: 3,
            ..UpdateProverConfig::new(Spec::mainnet())
        }
    );
}

#[test]
fn test_missing_beacon_api_url() {
    let json = json!({ "log_level": "info" });

    let err = parse_config(&json.to_string()).unwrap_err();
    assert!(err.to_string().contains("beacon_api_url"));
}

#[test]
fn test_error_names_the_bad_field_path() {
    let mut json = base_config_json();
    json["prover"] = json!({ "finality_delay_epochs": "two" });

    let err = parse_config(&json.to_string()).unwrap_err();
    assert!(err
        .to_string()
        .starts_with("config error at prover.finality_delay_epochs"));
}
