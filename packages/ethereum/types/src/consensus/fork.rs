//! This module defines types related to forks and fork versions.

use alloy_primitives::FixedBytes;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};

/// A 4-byte fork version
pub type Version = FixedBytes<4>;

/// A fork scheduled at an epoch
#[serde_as]
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Debug, Default)]
pub struct Fork {
    /// The fork version
    pub version: Version,
    /// The first epoch of the fork
    #[serde_as(as = "DisplayFromStr")]
    pub epoch: u64,
}

/// The fork schedule of a chain
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Debug, Default)]
pub struct ForkParameters {
    /// The genesis fork version
    pub genesis_fork_version: Version,
    /// The genesis slot
    pub genesis_slot: u64,
    /// The altair fork
    pub altair: Fork,
    /// The bellatrix fork
    pub bellatrix: Fork,
    /// The capella fork
    pub capella: Fork,
    /// The deneb fork
    pub deneb: Fork,
    /// The electra fork
    pub electra: Fork,
}

impl ForkParameters {
    /// Returns the fork version active at `epoch`.
    ///
    /// [See in consensus-spec](https://github.com/ethereum/consensus-specs/blob/dev/specs/electra/fork.md#modified-compute_fork_version)
    #[must_use]
    pub const fn compute_fork_version(&self, epoch: u64) -> Version {
        match epoch {
            _ if epoch >= self.electra.epoch => self.electra.version,
            _ if epoch >= self.deneb.epoch => self.deneb.version,
            _ if epoch >= self.capella.epoch => self.capella.version,
            _ if epoch >= self.bellatrix.epoch => self.bellatrix.version,
            _ if epoch >= self.altair.epoch => self.altair.version,
            _ => self.genesis_fork_version,
        }
    }
}

#[cfg(test)]
mod test {
    use rstest::rstest;

    use super::{Fork, ForkParameters, Version};

    const FORKS: ForkParameters = ForkParameters {
        genesis_fork_version: Version::new([0, 0, 0, 0]),
        genesis_slot: 0,
        altair: Fork {
            version: Version::new([1, 0, 0, 0]),
            epoch: 10,
        },
        bellatrix: Fork {
            version: Version::new([2, 0, 0, 0]),
            epoch: 20,
        },
        capella: Fork {
            version: Version::new([3, 0, 0, 0]),
            epoch: 30,
        },
        deneb: Fork {
            version: Version::new([4, 0, 0, 0]),
            epoch: 40,
        },
        electra: Fork {
            version: Version::new([5, 0, 0, 0]),
            epoch: 50,
        },
    };

    #[rstest]
    #[case(0, 0)]
    #[case(9, 0)]
    #[case(10, 1)]
    #[case(29, 2)]
    #[case(40, 4)]
    #[case(u64::MAX, 5)]
    fn test_compute_fork_version(#[case] epoch: u64, #[case] expected_major: u8) {
        assert_eq!(
            FORKS.compute_fork_version(epoch),
            Version::new([expected_major, 0, 0, 0])
        );
    }
}
