use crate::shared::Result;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::{DateTime, Utc};
use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::pkcs1v15::SigningKey;
use rsa::pkcs8::DecodePrivateKey;
use rsa::signature::{SignatureEncoding, Signer};
use rsa::RsaPrivateKey;
use sha2::{Digest, Sha256};

/// Authentication protocol version sent in `X-Ops-Sign`
pub const SIGN_VERSION: &str = "1.3";

/// Server API version requested on every call
pub const SERVER_API_VERSION: &str = "1";

/// Chef client version advertised in `X-Chef-Version`
const CHEF_VERSION: &str = "18.0.0";

/// Width of each `X-Ops-Authorization-N` header chunk
const AUTHORIZATION_CHUNK: usize = 60;

/// Signs Chef Infra Server requests (authentication protocol 1.3)
pub struct RequestSigner {
    client_name: String,
    signing_key: SigningKey<Sha256>,
}

impl RequestSigner {
    /// Loads a PKCS#1 (`BEGIN RSA PRIVATE KEY`) or PKCS#8 (`BEGIN PRIVATE KEY`) PEM key
    pub fn from_pem(client_name: impl Into<String>, pem: &str) -> Result<Self> {
        let key = RsaPrivateKey::from_pkcs1_pem(pem)
            .or_else(|_| RsaPrivateKey::from_pkcs8_pem(pem))
            .map_err(|e| anyhow::anyhow!("not a PKCS#1 or PKCS#8 RSA private key: {}", e))?;

        Ok(Self {
            client_name: client_name.into(),
            signing_key: SigningKey::<Sha256>::new(key),
        })
    }

    pub fn client_name(&self) -> &str {
        &self.client_name
    }

    /// Authentication headers for one request, timestamped now
    pub fn sign(&self, method: &str, path: &str, body: &[u8]) -> Vec<(String, String)> {
        self.sign_at(method, path, body, Utc::now())
    }

    pub fn sign_at(
        &self,
        method: &str,
        path: &str,
        body: &[u8],
        timestamp: DateTime<Utc>,
    ) -> Vec<(String, String)> {
        let timestamp = timestamp.format("%Y-%m-%dT%H:%M:%SZ").to_string();
        let content_hash = Self::content_hash(body);
        let canonical = self.canonical_request(method, path, &content_hash, &timestamp);
        let signature = BASE64.encode(self.signing_key.sign(canonical.as_bytes()).to_bytes());

        let mut headers = vec![
            ("Accept".to_string(), "application/json".to_string()),
            ("X-Chef-Version".to_string(), CHEF_VERSION.to_string()),
            (
                "X-Ops-Sign".to_string(),
                format!("algorithm=sha256;version={}", SIGN_VERSION),
            ),
            ("X-Ops-Userid".to_string(), self.client_name.clone()),
            ("X-Ops-Timestamp".to_string(), timestamp),
            ("X-Ops-Content-Hash".to_string(), content_hash),
            (
                "X-Ops-Server-API-Version".to_string(),
                SERVER_API_VERSION.to_string(),
            ),
        ];
        headers.extend(Self::authorization_headers(&signature));
        headers
    }

    /// base64(SHA-256(body))
    pub fn content_hash(body: &[u8]) -> String {
        BASE64.encode(Sha256::digest(body))
    }

    /// Path as signed: no query string, no repeated or trailing slashes
    pub fn canonical_path(path: &str) -> String {
        let path = path.split('?').next().unwrap_or_default();
        let mut canonical = String::with_capacity(path.len());
        for c in path.chars() {
            if c == '/' && canonical.ends_with('/') {
                continue;
            }
            canonical.push(c);
        }
        if canonical.len() > 1 && canonical.ends_with('/') {
            canonical.pop();
        }
        canonical
    }

    fn canonical_request(
        &self,
        method: &str,
        path: &str,
        content_hash: &str,
        timestamp: &str,
    ) -> String {
        [
            format!("Method:{}", method.to_uppercase()),
            format!("Path:{}", Self::canonical_path(path)),
            format!("X-Ops-Content-Hash:{}", content_hash),
            format!("X-Ops-Sign:version={}", SIGN_VERSION),
            format!("X-Ops-Timestamp:{}", timestamp),
            format!("X-Ops-UserId:{}", self.client_name),
            format!("X-Ops-Server-API-Version:{}", SERVER_API_VERSION),
        ]
        .join("\n")
    }

    fn authorization_headers(signature: &str) -> Vec<(String, String)> {
        signature
            .as_bytes()
            .chunks(AUTHORIZATION_CHUNK)
            .enumerate()
            .map(|(index, chunk)| {
                (
                    format!("X-Ops-Authorization-{}", index + 1),
                    String::from_utf8_lossy(chunk).into_owned(),
                )
            })
            .collect()
    }
}
