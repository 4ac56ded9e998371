//! This module contains types assosicated with the beacon api and Ethereum consensus.

pub mod beacon_block;
pub mod bls;
pub mod committee_update;
pub mod domain;
pub mod fork;
pub mod genesis;
pub mod header;
pub mod merkle;
pub mod slot;
pub mod spec;
pub mod state_proof;
pub mod sync_committee;
