//! This module defines [`UpdateProverConfig`].

use ethereum_types::consensus::{domain::DomainType, merkle::GindexTable, spec::Spec};
use serde::{Deserialize, Serialize};

/// Default number of epochs between a target epoch and the header that finalizes it
pub const DEFAULT_FINALITY_DELAY_EPOCHS: u64 = 2;

/// The chain parameters the prover works with
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct UpdateProverConfig {
    /// The chain spec
    pub spec: Spec,
    /// Generalized indices of the proved fields
    #[serde(default)]
    pub gindices: GindexTable,
    /// Number of epochs after a target epoch at which its finalization is looked up
    #[serde(default = "default_finality_delay_epochs")]
    pub finality_delay_epochs: u64,
    /// The domain type of sync committee signatures
    #[serde(default = "default_sync_committee_domain_type")]
    pub sync_committee_domain_type: DomainType,
}

impl UpdateProverConfig {
    /// Creates a config for `spec` with every other parameter at its default.
    #[must_use]
    pub const fn new(spec: Spec) -> Self {
        Self {
            spec,
            gindices: GindexTable::ALTAIR,
            finality_delay_epochs: DEFAULT_FINALITY_DELAY_EPOCHS,
            sync_committee_domain_type: DomainType::SYNC_COMMITTEE,
        }
    }
}

const fn default_finality_delay_epochs() -> u64 {
    DEFAULT_FINALITY_DELAY_EPOCHS
}

const fn default_sync_committee_domain_type() -> DomainType {
    DomainType::SYNC_COMMITTEE
}

#[cfg(test)]
mod test {
    use ethereum_types::consensus::{domain::DomainType, merkle::GindexTable, spec::Spec};

    use super::UpdateProverConfig;

    #[test]
    fn test_defaults_are_filled_in() {
        let json = serde_json::json!({ "spec": Spec::mainnet() });

        let config: UpdateProverConfig = serde_json::from_value(json).unwrap();
        assert_eq!(config, UpdateProverConfig::new(Spec::mainnet()));
    }

    #[test]
    fn test_overrides() {
        let json = serde_json::json!({
            "spec": Spec::mainnet(),
            "gindices": GindexTable::ELECTRA,
            "finality_delay_epochs": 3,
            "sync_committee_domain_type": "0x07000001",
        });

        let config: UpdateProverConfig = serde_json::from_value(json).unwrap();
        assert_eq!(config.gindices, GindexTable::ELECTRA);
        assert_eq!(config.finality_delay_epochs, 3);
        assert_ne!(config.sync_committee_domain_type, DomainType::SYNC_COMMITTEE);
    }
}
