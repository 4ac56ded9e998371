//! A command line tool that derives sync committee updates from a beacon node.

#![deny(clippy::nursery, clippy::pedantic, missing_docs)]

pub mod cli;
pub mod config;
pub mod observability;
pub mod runner;
