//! HTTP client for the Patreon proxy.

use url::Url;

use crate::{
    error::{sync::SyncError, AppError},
    patreon::{EntitlementFetcher, ListEntitlementsResponse},
};

/// Client for the Patreon proxy's entitlement listing.
///
/// The auth token is sent as a bearer token and is never logged.
#[derive(Debug, Clone)]
pub struct PatreonProxyClient {
    http: reqwest::Client,
    root_url: Url,
    auth_token: String,
}

impl PatreonProxyClient {
    /// Creates a new client.
    ///
    /// # Arguments
    /// - `http` - Shared HTTP client, configured with the per-request timeout
    /// - `root_url` - Root URL of the Patreon proxy
    /// - `auth_token` - Bearer token for the proxy
    pub fn new(http: reqwest::Client, root_url: Url, auth_token: String) -> Self {
        Self {
            http,
            root_url,
            auth_token,
        }
    }

    fn build_url(&self, legacy_only: bool) -> Result<Url, AppError> {
        let mut url = self.root_url.join("/all")?;
        url.query_pairs_mut()
            .append_pair("legacyOnly", &legacy_only.to_string());

        Ok(url)
    }
}

#[async_trait::async_trait]
impl EntitlementFetcher for PatreonProxyClient {
    async fn list_entitlements(
        &self,
        legacy_only: bool,
    ) -> Result<ListEntitlementsResponse, AppError> {
        let url = self.build_url(legacy_only)?;

        let response = self
            .http
            .get(url)
            .bearer_auth(&self.auth_token)
            .send()
            .await?;

        let status = response.status();
        if status.as_u16() > 299 {
            return Err(SyncError::UnexpectedStatus(status.as_u16()).into());
        }

        Ok(response.json::<ListEntitlementsResponse>().await?)
    }
}
