//! Coin metadata URI resolution and Pinata pinning
//!
//! A caller-supplied URI that already looks like a content-addressed or
//! web URL passes through untouched. Anything else requires a pinning
//! credential: a metadata document is assembled and pinned, and the
//! returned content identifier becomes the coin URI.

use crate::zora::config::{ZoraConfig, PINATA_JWT_ENV};
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::{json, Value};
use url::Url;

pub const PINATA_API_BASE: &str = "https://api.pinata.cloud";

/// JSON pinning service.
#[async_trait]
pub trait MetadataPinner: Send + Sync {
    /// Pin a JSON document, returning its content identifier.
    async fn pin_json(&self, document: &Value) -> Result<String>;
}

/// Pinata-backed pinner authenticated with a JWT.
pub struct PinataClient {
    http: Client,
    base_url: Url,
    jwt: SecretString,
}

impl PinataClient {
    pub fn new(jwt: SecretString) -> Self {
        Self::with_base_url(jwt, Url::parse(PINATA_API_BASE).expect("static Pinata API URL"))
    }

    pub fn with_base_url(jwt: SecretString, base_url: Url) -> Self {
        Self {
            http: Client::new(),
            base_url,
            jwt,
        }
    }

    /// Build from configuration if a JWT is present.
    pub fn from_config(config: &ZoraConfig) -> Option<Self> {
        config
            .pinata_jwt
            .as_ref()
            .map(|jwt| Self::new(SecretString::from(jwt.expose_secret().to_string())))
    }
}

#[derive(Deserialize)]
struct PinResponse {
    #[serde(rename = "IpfsHash")]
    ipfs_hash: String,
}

#[async_trait]
impl MetadataPinner for PinataClient {
    async fn pin_json(&self, document: &Value) -> Result<String> {
        let url = self
            .base_url
            .join("pinning/pinJSONToIPFS")
            .map_err(|e| Error::Metadata(format!("invalid pin endpoint: {}", e)))?;

        let response = self
            .http
            .post(url)
            .bearer_auth(self.jwt.expose_secret())
            .json(&json!({ "pinataContent": document }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Metadata(format!(
                "pin request failed with status {}: {}",
                status, body
            )));
        }

        let parsed: PinResponse = response
            .json()
            .await
            .map_err(|e| Error::Metadata(format!("malformed pin response: {}", e)))?;
        Ok(parsed.ipfs_hash)
    }
}

/// Whether a caller-supplied URI can be used verbatim.
pub fn has_uri_scheme(uri: &str) -> bool {
    uri.starts_with("ipfs://") || uri.starts_with("http://") || uri.starts_with("https://")
}

fn default_description(name: &str) -> String {
    format!("{} is a coin created through the Zora agent plugin.", name)
}

/// Resolve the metadata URI for a coin creation.
///
/// Passthrough for content-addressed and web URLs; otherwise assembles
/// the metadata document and pins it, failing hard when no pinning
/// credential is configured.
pub async fn resolve_metadata_uri(
    name: &str,
    description: Option<&str>,
    supplied_uri: Option<&str>,
    default_image_cid: Option<&str>,
    pinner: Option<&dyn MetadataPinner>,
) -> Result<String> {
    if let Some(uri) = supplied_uri {
        if has_uri_scheme(uri) {
            return Ok(uri.to_string());
        }
    }

    let pinner = pinner.ok_or_else(|| {
        Error::Metadata(format!(
            "no metadata URI supplied and {} is not configured",
            PINATA_JWT_ENV
        ))
    })?;

    let mut document = json!({
        "name": name,
        "description": description
            .map(str::to_string)
            .unwrap_or_else(|| default_description(name)),
    });
    if let Some(cid) = default_image_cid {
        document["image"] = json!(format!("ipfs://{}", cid.trim_start_matches("ipfs://")));
    }

    let cid = pinner.pin_json(&document).await?;
    tracing::debug!(cid = %cid, "pinned coin metadata");
    Ok(format!("ipfs://{}", cid))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    struct CountingPinner {
        calls: AtomicUsize,
        last_document: Mutex<Option<Value>>,
    }

    #[async_trait]
    impl MetadataPinner for CountingPinner {
        async fn pin_json(&self, document: &Value) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_document.lock().unwrap() = Some(document.clone());
            Ok("QmMockCid".to_string())
        }
    }

    #[tokio::test]
    async fn supplied_urls_pass_through_without_pinning() {
        let pinner = CountingPinner::default();
        for uri in [
            "ipfs://QmExisting",
            "http://example.com/meta.json",
            "https://example.com/meta.json",
        ] {
            let resolved =
                resolve_metadata_uri("Coin", None, Some(uri), None, Some(&pinner)).await.unwrap();
            assert_eq!(resolved, uri);
        }
        assert_eq!(pinner.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn missing_uri_without_credential_fails_fast() {
        let err = resolve_metadata_uri("Coin", None, None, None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Metadata(_)));
        assert!(err.to_string().contains(PINATA_JWT_ENV));
    }

    #[tokio::test]
    async fn missing_uri_pins_exactly_once() {
        let pinner = CountingPinner::default();
        let resolved = resolve_metadata_uri(
            "Moon Coin",
            Some("to the moon"),
            None,
            Some("QmDefaultImage"),
            Some(&pinner),
        )
        .await
        .unwrap();

        assert_eq!(resolved, "ipfs://QmMockCid");
        assert_eq!(pinner.calls.load(Ordering::SeqCst), 1);

        let document = pinner.last_document.lock().unwrap().clone().unwrap();
        assert_eq!(document["name"], "Moon Coin");
        assert_eq!(document["description"], "to the moon");
        assert_eq!(document["image"], "ipfs://QmDefaultImage");
    }

    #[tokio::test]
    async fn default_description_is_templated_from_name() {
        let pinner = CountingPinner::default();
        resolve_metadata_uri("Moon Coin", None, None, None, Some(&pinner))
            .await
            .unwrap();

        let document = pinner.last_document.lock().unwrap().clone().unwrap();
        let description = document["description"].as_str().unwrap();
        assert!(description.contains("Moon Coin"));
        assert!(document.get("image").is_none());
    }

    #[tokio::test]
    async fn non_url_supplied_value_takes_the_pin_path() {
        let pinner = CountingPinner::default();
        let resolved =
            resolve_metadata_uri("Coin", None, Some("just some text"), None, Some(&pinner))
                .await
                .unwrap();
        assert_eq!(resolved, "ipfs://QmMockCid");
        assert_eq!(pinner.calls.load(Ordering::SeqCst), 1);
    }
}
