#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![doc = include_str!("../README.md")]
#![deny(clippy::nursery, clippy::pedantic, missing_docs)]

/// Ensure that a condition is true, otherwise return an error.
macro_rules! ensure {
    ($cond:expr, $err:expr) => {
        if !$cond {
            return Err($err);
        }
    };
}

pub mod beacon;
pub mod config;
pub mod error;
pub mod gindex;
pub mod merkle;
pub mod proof;
pub mod prover;
pub mod update;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
