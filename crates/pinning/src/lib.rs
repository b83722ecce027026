//! Pinning-service client for content-addressed media storage.
//!
//! Files are pinned before the mutation that references them: the CID
//! minted here goes into `addRequest` / `submitProposal` call data. Local
//! validation (presence, size, MIME prefix) runs before any network touch,
//! and every upload mints a fresh CID; there is no retry and no
//! idempotency key.

use core::time::Duration;
use std::env;

use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

const PIN_ENDPOINT: &str = "https://api.pinata.cloud/pinning/pinFileToIPFS";

/// Upload request timeout.
pub const UPLOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// Size ceiling for pinned images, in bytes (10 MiB).
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

/// Public gateways serving pinned content, in preference order. Reads go
/// to the first entry; there is no automatic failover.
pub const GATEWAYS: &[&str] = &[
    "gateway.pinata.cloud",
    "ipfs.infura.io",
    "cloudflare-ipfs.com",
    "dweb.link",
];

/// Read URL for `cid` on the preferred gateway.
#[must_use]
pub fn gateway_url(cid: &str) -> String {
    format!("https://{}/ipfs/{cid}", GATEWAYS[0])
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PinningError {
    #[error("pinning credentials are not configured")]
    CredentialsMissing,
    #[error("file payload is empty")]
    EmptyPayload,
    #[error("file is {size} bytes, the limit is {limit}")]
    PayloadTooLarge { size: usize, limit: usize },
    #[error("unsupported content type `{found}`, expected `{expected}*`")]
    UnsupportedType {
        found: String,
        expected: &'static str,
    },
    #[error("network error while pinning: {0}")]
    Network(#[from] reqwest::Error),
    #[error("pinning service rejected the upload ({status}): {message}")]
    Service { status: StatusCode, message: String },
    #[error("pinning service response is missing the content hash")]
    InvalidResponse,
}

/// Static API credentials, sent as headers on every upload.
#[derive(Clone, Debug)]
pub struct Credentials {
    pub api_key: String,
    pub secret_key: String,
}

impl Credentials {
    /// Reads `PINATA_API_KEY` / `PINATA_SECRET_KEY`; a missing or empty
    /// variable is a [`PinningError::CredentialsMissing`].
    pub fn from_env() -> Result<Self, PinningError> {
        let read = |name| env::var(name).ok().filter(|value: &String| !value.is_empty());

        match (read("PINATA_API_KEY"), read("PINATA_SECRET_KEY")) {
            (Some(api_key), Some(secret_key)) => Ok(Self {
                api_key,
                secret_key,
            }),
            _ => Err(PinningError::CredentialsMissing),
        }
    }
}

/// A file staged for pinning.
#[derive(Clone, Debug)]
pub struct PinFile {
    pub file_name: String,
    /// MIME type, e.g. `image/png`.
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// What an upload path accepts; checked locally before any HTTP call.
#[derive(Clone, Copy, Debug)]
pub struct UploadConstraint {
    pub max_bytes: usize,
    /// Required MIME-type prefix, `None` to accept anything.
    pub mime_prefix: Option<&'static str>,
}

impl UploadConstraint {
    /// Disaster and proposal photos: images up to [`MAX_IMAGE_BYTES`].
    pub const DISASTER_IMAGE: Self = Self {
        max_bytes: MAX_IMAGE_BYTES,
        mime_prefix: Some("image/"),
    };

    pub fn check(&self, file: &PinFile) -> Result<(), PinningError> {
        if file.bytes.is_empty() {
            return Err(PinningError::EmptyPayload);
        }

        if file.bytes.len() > self.max_bytes {
            return Err(PinningError::PayloadTooLarge {
                size: file.bytes.len(),
                limit: self.max_bytes,
            });
        }

        if let Some(expected) = self.mime_prefix {
            if !file.content_type.starts_with(expected) {
                return Err(PinningError::UnsupportedType {
                    found: file.content_type.clone(),
                    expected,
                });
            }
        }

        Ok(())
    }
}

/// A freshly minted content id.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PinnedCid {
    pub cid: String,
}

impl PinnedCid {
    #[must_use]
    pub fn gateway_url(&self) -> String {
        gateway_url(&self.cid)
    }
}

#[derive(Debug, Deserialize)]
struct PinResponse {
    #[serde(rename = "IpfsHash")]
    ipfs_hash: Option<String>,
}

/// Uploader over the pinning service's multipart endpoint.
#[derive(Clone, Debug)]
pub struct PinningClient {
    http: Client,
    credentials: Credentials,
}

impl PinningClient {
    pub fn new(credentials: Credentials) -> Result<Self, PinningError> {
        if credentials.api_key.is_empty() || credentials.secret_key.is_empty() {
            return Err(PinningError::CredentialsMissing);
        }

        let http = Client::builder().timeout(UPLOAD_TIMEOUT).build()?;

        Ok(Self { http, credentials })
    }

    pub fn from_env() -> Result<Self, PinningError> {
        Self::new(Credentials::from_env()?)
    }

    /// Pins an image under the [`UploadConstraint::DISASTER_IMAGE`] rules.
    pub async fn pin_file(&self, file: PinFile) -> Result<PinnedCid, PinningError> {
        self.pin_file_with(file, UploadConstraint::DISASTER_IMAGE)
            .await
    }

    /// Pins `file` after checking it against `constraint`; an invalid file
    /// fails here without touching the network.
    pub async fn pin_file_with(
        &self,
        file: PinFile,
        constraint: UploadConstraint,
    ) -> Result<PinnedCid, PinningError> {
        constraint.check(&file)?;

        let size = file.bytes.len();
        let part = Part::bytes(file.bytes)
            .file_name(file.file_name)
            .mime_str(&file.content_type)?;
        let form = Form::new().part("file", part);

        debug!(size, "uploading file to the pinning service");

        let response = self
            .http
            .post(PIN_ENDPOINT)
            .header("pinata_api_key", &self.credentials.api_key)
            .header("pinata_secret_api_key", &self.credentials.secret_key)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(PinningError::Service { status, message });
        }

        let body: PinResponse = response
            .json()
            .await
            .map_err(|_| PinningError::InvalidResponse)?;

        let cid = body
            .ipfs_hash
            .filter(|hash| !hash.is_empty())
            .ok_or(PinningError::InvalidResponse)?;

        info!(%cid, "file pinned");

        Ok(PinnedCid { cid })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png(bytes: Vec<u8>) -> PinFile {
        PinFile {
            file_name: "photo.png".to_owned(),
            content_type: "image/png".to_owned(),
            bytes,
        }
    }

    fn test_credentials() -> Credentials {
        Credentials {
            api_key: "key".to_owned(),
            secret_key: "secret".to_owned(),
        }
    }

    #[test]
    fn test_empty_payload_is_refused() {
        let err = UploadConstraint::DISASTER_IMAGE
            .check(&png(vec![]))
            .unwrap_err();
        assert!(matches!(err, PinningError::EmptyPayload));
    }

    #[test]
    fn test_oversized_payload_is_refused_with_both_sizes() {
        let size = MAX_IMAGE_BYTES + 1;
        let err = UploadConstraint::DISASTER_IMAGE
            .check(&png(vec![0; size]))
            .unwrap_err();

        assert!(
            matches!(
                err,
                PinningError::PayloadTooLarge { size: s, limit } if s == size && limit == MAX_IMAGE_BYTES
            ),
            "got: {err}"
        );
    }

    #[test]
    fn test_non_image_type_is_refused() {
        let file = PinFile {
            file_name: "proof.pdf".to_owned(),
            content_type: "application/pdf".to_owned(),
            bytes: vec![1, 2, 3],
        };

        let err = UploadConstraint::DISASTER_IMAGE.check(&file).unwrap_err();
        assert!(
            matches!(
                &err,
                PinningError::UnsupportedType { found, expected: "image/" } if found == "application/pdf"
            ),
            "got: {err}"
        );
    }

    #[test]
    fn test_unconstrained_mime_accepts_anything() {
        let constraint = UploadConstraint {
            max_bytes: MAX_IMAGE_BYTES,
            mime_prefix: None,
        };
        let file = PinFile {
            file_name: "proof.pdf".to_owned(),
            content_type: "application/pdf".to_owned(),
            bytes: vec![1, 2, 3],
        };

        assert!(constraint.check(&file).is_ok());
    }

    #[tokio::test]
    async fn test_invalid_file_never_reaches_the_network() {
        // 12 MiB: over the limit, so the upload must fail locally even
        // though no service is reachable.
        let client = PinningClient::new(test_credentials()).unwrap();
        let err = client
            .pin_file(png(vec![0; 12 * 1024 * 1024]))
            .await
            .unwrap_err();

        assert!(matches!(err, PinningError::PayloadTooLarge { .. }), "got: {err}");
    }

    #[test]
    fn test_empty_credentials_are_refused() {
        let err = PinningClient::new(Credentials {
            api_key: String::new(),
            secret_key: "secret".to_owned(),
        })
        .unwrap_err();

        assert!(matches!(err, PinningError::CredentialsMissing));
    }

    #[test]
    fn test_response_hash_field_parses() {
        let body: PinResponse = serde_json::from_str(r#"{"IpfsHash":"QmHash"}"#).unwrap();
        assert_eq!(body.ipfs_hash.as_deref(), Some("QmHash"));

        let body: PinResponse = serde_json::from_str("{}").unwrap();
        assert!(body.ipfs_hash.is_none(), "a missing hash must not be a parse error");
    }

    #[test]
    fn test_gateway_url_uses_the_preferred_gateway() {
        let pinned = PinnedCid {
            cid: "QmHash".to_owned(),
        };
        assert_eq!(
            pinned.gateway_url(),
            "https://gateway.pinata.cloud/ipfs/QmHash"
        );
    }
}
