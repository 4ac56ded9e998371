//! The Beacon API client, including the light client committee update and state proof
//! endpoints.

pub mod client;
pub mod error;
pub mod response;
