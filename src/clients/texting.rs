//! Outbound SMS provider client.
//!
//! The provider receives one engagement payload per text: who to reach and
//! which organization the text is about.

use crate::{config::TextingConfig, Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Payload forwarded to the provider. Field names follow the provider's API.
#[derive(Debug, Clone, Serialize)]
pub struct EngagementPayload {
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    #[serde(rename = "mobilePhone")]
    pub mobile_phone: String,
    pub tags: Vec<String>,
    #[serde(rename = "engagementType")]
    pub engagement_type: String,
    #[serde(rename = "engagementInfo")]
    pub engagement_info: EngagementInfo,
}

#[derive(Debug, Clone, Serialize)]
pub struct EngagementInfo {
    #[serde(rename = "Org_Name")]
    pub org_name: String,
    #[serde(rename = "Org_Address1")]
    pub org_address_1: String,
    #[serde(rename = "Org_Address2")]
    pub org_address_2: String,
    #[serde(rename = "City")]
    pub city: String,
    #[serde(rename = "State")]
    pub state: String,
    #[serde(rename = "Zip")]
    pub zip: String,
    #[serde(rename = "Org_Phone")]
    pub org_phone: String,
}

#[derive(Debug, Deserialize)]
struct ProviderResponse {
    status: String,
}

pub struct TextingProviderClient {
    http: reqwest::Client,
    url: String,
    auth_code: String,
}

impl TextingProviderClient {
    pub fn new(config: &TextingConfig, url: String, auth_code: String) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| Error::Internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            url,
            auth_code,
        })
    }

    /// Send one engagement to the provider. The provider signals failures in
    /// the response body, not only via HTTP status.
    pub async fn send_engagement(&self, payload: &EngagementPayload) -> Result<()> {
        let response = self
            .http
            .post(&self.url)
            .header("authCode", &self.auth_code)
            .json(payload)
            .send()
            .await
            .map_err(|e| Error::ExternalService(format!("texting provider unreachable: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::ExternalService(format!(
                "texting provider returned {status}"
            )));
        }

        let body: ProviderResponse = response
            .json()
            .await
            .map_err(|e| Error::ExternalService(format!("texting provider response: {e}")))?;

        if body.status != "success" {
            return Err(Error::ExternalService(format!(
                "texting provider reported status {:?}",
                body.status
            )));
        }

        Ok(())
    }
}
