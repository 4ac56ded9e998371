//! Defines the configuration file of the update prover.

use std::str::FromStr;

use ethereum_types::consensus::{domain::DomainType, merkle::GindexTable, spec::Spec};
use ethereum_update_prover::config::{UpdateProverConfig, DEFAULT_FINALITY_DELAY_EPOCHS};
use tracing::Level;

/// The top level configuration of the update prover.
#[derive(Clone, Debug, serde::Deserialize, serde::Serialize)]
#[allow(clippy::module_name_repetitions)]
pub struct ProgramConfig {
    /// The beacon node to query.
    pub beacon_api_url: String,
    /// The log level.
    #[serde(default)]
    pub log_level: String,
    /// Prover parameters. Defaults apply when absent.
    #[serde(default)]
    pub prover: ProverSection,
}

/// The prover parameters of the configuration file.
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct ProverSection {
    /// The chain spec. Fetched from the beacon node when absent.
    #[serde(default)]
    pub spec: Option<Spec>,
    /// Generalized indices of the proved fields.
    #[serde(default)]
    pub gindices: GindexTable,
    /// Number of epochs after a target epoch at which its finalization is looked up.
    #[serde(default = "default_finality_delay_epochs")]
    pub finality_delay_epochs: u64,
    /// The domain type of sync committee signatures.
    #[serde(default = "default_sync_committee_domain_type")]
    pub sync_committee_domain_type: DomainType,
}

impl Default for ProverSection {
    fn default() -> Self {
        Self {
            spec: None,
            gindices: GindexTable::default(),
            finality_delay_epochs: DEFAULT_FINALITY_DELAY_EPOCHS,
            sync_committee_domain_type: DomainType::SYNC_COMMITTEE,
        }
    }
}

impl ProverSection {
    /// Builds the prover config around `spec`.
    #[must_use]
    pub fn into_config(self, spec: Spec) -> UpdateProverConfig {
        UpdateProverConfig {
            spec,
            gindices: self.gindices,
            finality_delay_epochs: self.finality_delay_epochs,
            sync_committee_domain_type: self.sync_committee_domain_type,
        }
    }
}

impl ProgramConfig {
    /// Returns the configured log level.
    #[must_use]
    pub fn log_level(&self) -> Level {
        Level::from_str(&self.log_level).unwrap_or(Level::INFO)
    }
}

const fn default_finality_delay_epochs() -> u64 {
    DEFAULT_FINALITY_DELAY_EPOCHS
}

const fn default_sync_committee_domain_type() -> DomainType {
    DomainType::SYNC_COMMITTEE
}

/// Parses the configuration file contents, reporting the JSON path of any bad field.
///
/// # Errors
/// Returns an [`anyhow::Error`] with the path and the original serde error message.
pub fn parse_config(json: &str) -> anyhow::Result<ProgramConfig> {
    let mut deserializer = serde_json::Deserializer::from_str(json);
    serde_path_to_error::deserialize(&mut deserializer)
        .map_err(|e| anyhow::anyhow!("config error at {}: {}", e.path(), e))
}
