use rusoto_cloudwatch::CloudWatchClient;
use rusoto_core::credential::{DefaultCredentialsProvider, StaticProvider};
use rusoto_core::{HttpClient, Region};
use std::str::FromStr;

use crate::error::MetricsPluginError;

#[derive(Debug, Default)]
pub struct SessionOptions {
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    pub region: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}

impl SessionOptions {
    /// Names rusoto does not know yet still get the regular CloudWatch endpoint.
    fn region(&self) -> Region {
        match non_empty(&self.region) {
            Some(name) => Region::from_str(name).unwrap_or_else(|_| Region::Custom {
                name: name.to_string(),
                endpoint: format!("https://monitoring.{}.amazonaws.com", name),
            }),
            None => Region::default(),
        }
    }

    /// Static keys are used only when both halves are given; otherwise the
    /// default provider chain (env, profile, instance role) applies.
    pub fn build_client(&self) -> Result<CloudWatchClient, MetricsPluginError> {
        let region = self.region();
        let dispatcher =
            HttpClient::new().map_err(|error| MetricsPluginError::HttpClient(error.to_string()))?;
        match (
            non_empty(&self.access_key_id),
            non_empty(&self.secret_access_key),
        ) {
            (Some(access_key_id), Some(secret_access_key)) => {
                let provider = StaticProvider::new_minimal(
                    access_key_id.to_string(),
                    secret_access_key.to_string(),
                );
                Ok(CloudWatchClient::new_with(dispatcher, provider, region))
            }
            _ => {
                let provider = DefaultCredentialsProvider::new()
                    .map_err(|error| MetricsPluginError::Credentials(error.to_string()))?;
                Ok(CloudWatchClient::new_with(dispatcher, provider, region))
            }
        }
    }
}
