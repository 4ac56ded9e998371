//! This module defines the response types for the Beacon API.

use alloy_primitives::B256;
use serde::{Deserialize, Serialize};

/// The response structure returned by the Beacon API.
#[derive(Debug, Serialize, Deserialize)]
pub struct Response<Data, Extra = EmptyExtra> {
    /// The main data of the response.
    pub data: Data,
    /// Extra data of the response.
    #[serde(flatten)]
    pub extra: Extra,
}

/// The default empty extra data for `Response`.
#[derive(Debug, Serialize, Deserialize)]
pub struct EmptyExtra {}

/// The version of the Ethereum consensus.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[allow(missing_docs)]
pub enum EthConsensusVersion {
    Phase0,
    Altair,
    Bellatrix,
    Capella,
    Deneb,
    Electra,
}

/// The version response structure returned by the Beacon API.
#[derive(Debug, Serialize, Deserialize)]
pub struct Version {
    /// The version of the Ethereum consensus.
    pub version: EthConsensusVersion,
}

/// The data returned by the block root endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct BeaconBlockRoot {
    /// The block root.
    pub root: B256,
}

#[cfg(test)]
mod test {
    use super::{BeaconBlockRoot, EthConsensusVersion, Response, Version};

    #[test]
    fn test_deserialize_versioned_response() {
        let json = serde_json::json!({
            "version": "electra",
            "execution_optimistic": false,
            "data": {
                "root": "0x0000000000000000000000000000000000000000000000000000000000000001"
            }
        });

        let response: Response<BeaconBlockRoot, Version> = serde_json::from_value(json).unwrap();
        assert_eq!(response.extra.version, EthConsensusVersion::Electra);
        assert_eq!(response.data.root.0[31], 1);
    }
}
