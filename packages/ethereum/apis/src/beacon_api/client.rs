//! This module implements the `BeaconApiClient` to interact with the Ethereum Beacon API.

use alloy_primitives::B256;
use ethereum_types::consensus::{
    beacon_block::BeaconBlock, committee_update::CommitteeUpdate, genesis::Genesis,
    header::BeaconBlockHeaderResponse, spec::Spec, state_proof::StateProof,
};
use reqwest::{Client, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use super::{
    error::{ApiErrorBody, BeaconApiClientError},
    response::{BeaconBlockRoot, Response, Version},
};

const SPEC_PATH: &str = "/eth/v1/config/spec";
const GENESIS_PATH: &str = "/eth/v1/beacon/genesis";
const BEACON_HEADERS_PATH: &str = "/eth/v1/beacon/headers";
const BEACON_BLOCKS_V1_PATH: &str = "/eth/v1/beacon/blocks";
const BEACON_BLOCKS_V2_PATH: &str = "/eth/v2/beacon/blocks";
const LIGHT_CLIENT_COMMITTEE_UPDATES_PATH: &str = "/eth/v1/lightclient/committee_updates";
const LIGHT_CLIENT_PROOF_PATH: &str = "/eth/v1/lightclient/proof";

/// The api client for interacting with the Beacon API
#[allow(clippy::module_name_repetitions)]
#[derive(Clone, Debug)]
pub struct BeaconApiClient {
    client: Client,
    base_url: String,
}

impl BeaconApiClient {
    /// Create new `BeaconApiClient`
    #[must_use]
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetches the Beacon spec
    /// # Errors
    /// Returns an error if the request fails or the response is not successful deserialized
    pub async fn spec(&self) -> Result<Response<Spec>, BeaconApiClientError> {
        self.get_json(SPEC_PATH).await
    }

    /// Retrieve details of the chain's genesis which can be used to identify chain.
    /// # Errors
    /// Returns an error if the request fails or the response is not successful deserialized
    pub async fn genesis(&self) -> Result<Response<Genesis>, BeaconApiClientError> {
        self.get_json(GENESIS_PATH).await
    }

    /// Fetches the Beacon block header for a given block id (slot, `0x` root or tag)
    /// # Errors
    /// Returns an error if the request fails or the response is not successful deserialized
    pub async fn header(
        &self,
        block_id: &str,
    ) -> Result<BeaconBlockHeaderResponse, BeaconApiClientError> {
        let resp: Response<BeaconBlockHeaderResponse> = self
            .get_json(&format!("{BEACON_HEADERS_PATH}/{block_id}"))
            .await?;
        Ok(resp.data)
    }

    /// Fetches the Beacon block for a given block id
    /// # Errors
    /// Returns an error if the request fails or the response is not successful deserialized
    pub async fn beacon_block(&self, block_id: &str) -> Result<BeaconBlock, BeaconApiClientError> {
        let resp: Response<BeaconBlock, Version> = self
            .get_json(&format!("{BEACON_BLOCKS_V2_PATH}/{block_id}"))
            .await?;
        Ok(resp.data)
    }

    /// Fetches the Beacon block root for a given block id
    /// # Errors
    /// Returns an error if the request fails or the response is not successful deserialized
    pub async fn beacon_block_root(&self, block_id: &str) -> Result<B256, BeaconApiClientError> {
        let resp: Response<BeaconBlockRoot> = self
            .get_json(&format!("{BEACON_BLOCKS_V1_PATH}/{block_id}/root"))
            .await?;

        Ok(resp.data.root)
    }

    /// Fetches the sync committee updates of the periods `from..=to`, in period order
    /// # Errors
    /// Returns an error if the request fails or the response is not successful deserialized
    pub async fn committee_updates(
        &self,
        from: u64,
        to: u64,
    ) -> Result<Vec<CommitteeUpdate>, BeaconApiClientError> {
        let resp: Response<Vec<CommitteeUpdate>> = self
            .get_json_with_query(
                LIGHT_CLIENT_COMMITTEE_UPDATES_PATH,
                &[("from", from), ("to", to)],
            )
            .await?;
        Ok(resp.data)
    }

    /// Fetches a partial proof of the beacon state at `state_id` covering every path in `paths`.
    ///
    /// Each path is a sequence of field names, e.g. `["finalized_checkpoint", "root"]`.
    /// # Errors
    /// Returns an error if the request fails or the response is not successful deserialized
    pub async fn state_proof(
        &self,
        state_id: &str,
        paths: &[&[&str]],
    ) -> Result<StateProof, BeaconApiClientError> {
        let query = paths
            .iter()
            .map(|path| serde_json::to_string(path).map(|path| ("paths", path)))
            .collect::<Result<Vec<_>, _>>()?;

        let resp: Response<StateProof> = self
            .get_json_with_query(&format!("{LIGHT_CLIENT_PROOF_PATH}/{state_id}"), &query)
            .await?;
        Ok(resp.data)
    }

    // Helper functions
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, BeaconApiClientError> {
        self.get_json_with_query::<T, (&str, &str)>(path, &[]).await
    }

    #[tracing::instrument(skip_all)]
    async fn get_json_with_query<T: DeserializeOwned, Q: Serialize + Sync>(
        &self,
        path: &str,
        query: &[Q],
    ) -> Result<T, BeaconApiClientError> {
        let url = format!("{}{}", self.base_url, path);

        debug!(%url, "get_json");

        let res = self.client.get(url).query(query).send().await?;

        match res.status() {
            StatusCode::OK => {
                let bytes = res.bytes().await?;

                debug!(response = %String::from_utf8_lossy(&bytes), "get_json");

                Ok(serde_json::from_slice(&bytes).map_err(BeaconApiClientError::Json)?)
            }
            StatusCode::NOT_FOUND => Err(BeaconApiClientError::NotFound(
                res.json::<ApiErrorBody>().await?,
            )),
            StatusCode::INTERNAL_SERVER_ERROR => Err(BeaconApiClientError::Internal(
                res.json::<ApiErrorBody>().await?,
            )),
            code => Err(BeaconApiClientError::Other {
                code,
                text: res.text().await?,
            }),
        }
    }
}

#[cfg(test)]
mod test {
    use super::BeaconApiClient;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = BeaconApiClient::new("http://localhost:9596/".to_string());
        assert_eq!(client.base_url, "http://localhost:9596");
    }
}
