//! This module defines types related to the genesis endpoint of the Beacon API.

use alloy_primitives::B256;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};

use super::fork::Version;

/// Genesis provides information about the genesis of a chain.
#[serde_as]
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug, Default)]
pub struct Genesis {
    /// The genesis time (in unix seconds)
    #[serde_as(as = "DisplayFromStr")]
    pub genesis_time: u64,
    /// The genesis validators root, mixed into every signing domain
    pub genesis_validators_root: B256,
    /// The genesis fork version
    pub genesis_fork_version: Version,
}

#[cfg(test)]
mod test {
    use super::Genesis;

    #[test]
    fn test_deserialize_genesis() {
        let json = serde_json::json!({
            "genesis_time": "1606824023",
            "genesis_validators_root": "0x4b363db94e286120d76eb905340fdd4e54bfe9f06bf33ff6cf5ad27f511bfe95",
            "genesis_fork_version": "0x00000000"
        });

        let genesis: Genesis = serde_json::from_value(json).unwrap();
        assert_eq!(genesis.genesis_time, 1_606_824_023);
        assert_eq!(genesis.genesis_validators_root.0[0], 0x4b);
    }
}
