use dohgate_domain::DomainError;
use serde::Deserialize;
use std::net::IpAddr;
use std::time::Duration;
use tracing::debug;

/// Either `{"ip": "…"}` or the nested `{"data": {"ip": "…"}}` layout.
#[derive(Debug, Deserialize)]
struct IpBody {
    #[serde(default)]
    ip: Option<String>,

    #[serde(default)]
    data: Option<Box<IpBody>>,
}

impl IpBody {
    fn address(&self) -> Option<&str> {
        self.ip
            .as_deref()
            .or_else(|| self.data.as_ref().and_then(|d| d.address()))
    }
}

/// Asks an HTTP "what is my IP" service for the operator's public address.
pub struct PublicIpDiscovery {
    client: reqwest::Client,
    url: String,
}

impl PublicIpDiscovery {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::IoError(format!("Failed to build HTTPS client: {}", e)))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub async fn discover(&self) -> Result<IpAddr, DomainError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| DomainError::Bootstrap(format!("Public IP lookup failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DomainError::Bootstrap(format!(
                "Public IP service {} returned HTTP {}",
                self.url,
                status.as_u16()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| DomainError::Bootstrap(format!("Public IP lookup failed: {}", e)))?;

        let ip = parse_public_ip(&body).ok_or_else(|| {
            DomainError::Bootstrap(format!("No IP address in response from {}", self.url))
        })?;

        debug!(url = %self.url, ip = %ip, "Public IP discovered");
        Ok(ip)
    }
}

/// Accepts a JSON body with an `ip` field (top-level or under `data`) or a
/// bare address in plain text.
pub fn parse_public_ip(body: &str) -> Option<IpAddr> {
    let body = body.trim();

    if let Ok(parsed) = serde_json::from_str::<IpBody>(body) {
        return parsed.address().and_then(|ip| ip.trim().parse().ok());
    }

    body.parse().ok()
}
