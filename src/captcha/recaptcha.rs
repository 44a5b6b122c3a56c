//! Google reCAPTCHA siteverify client.

use std::net::IpAddr;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::captcha::{HumanVerifier, VerifyError};
use crate::config::CaptchaConfig;

/// Body returned by the siteverify endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteVerifyResponse {
    pub success: bool,
    #[serde(default, rename = "error-codes")]
    pub error_codes: Vec<String>,
    #[serde(default)]
    pub hostname: Option<String>,
}

/// Verifier backed by the reCAPTCHA HTTP API.
#[derive(Clone)]
pub struct RecaptchaVerifier {
    client: reqwest::Client,
    verify_url: String,
    secret: String,
}

impl RecaptchaVerifier {
    pub fn new(config: &CaptchaConfig) -> Result<Self, VerifyError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            verify_url: config.verify_url.clone(),
            secret: config.secret.clone(),
        })
    }
}

#[async_trait]
impl HumanVerifier for RecaptchaVerifier {
    async fn verify(&self, token: &str, remote_ip: Option<IpAddr>) -> Result<bool, VerifyError> {
        let mut params = vec![("secret", self.secret.clone()), ("response", token.to_string())];
        if let Some(ip) = remote_ip {
            params.push(("remoteip", ip.to_string()));
        }

        let response: SiteVerifyResponse = self
            .client
            .post(&self.verify_url)
            .query(&params)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if !response.success {
            tracing::warn!(
                error_codes = ?response.error_codes,
                hostname = ?response.hostname,
                "Verification token rejected"
            );
        }

        Ok(response.success)
    }
}
