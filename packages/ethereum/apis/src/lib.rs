//! Clients for the Ethereum consensus layer APIs.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![deny(clippy::nursery, clippy::pedantic, missing_docs)]

pub mod beacon_api;
