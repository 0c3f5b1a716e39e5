//! Target URL validation
//!
//! Every probe target must be an absolute `https` URL whose host does not
//! point at the local machine. Validation runs once per engine call, before
//! any network I/O; retries reuse the validated [`Target`].

use crate::core::network::types::ProbeError;
use url::{Host, Url};

/// Host fragments rejected to keep probes off the local machine
const FORBIDDEN_HOST_FRAGMENTS: [&str; 2] = ["localhost", "127.0.0.1"];

/// A validated probe target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    url: Url,
}

impl Target {
    /// Validate a raw URL string
    ///
    /// # Errors
    /// * `ProbeError::InvalidUrl` - malformed or relative URL, or no host
    /// * `ProbeError::InsecureScheme` - scheme other than `https`
    /// * `ProbeError::ForbiddenHost` - host contains `localhost` or `127.0.0.1`
    pub fn parse(raw: &str) -> Result<Self, ProbeError> {
        let url = Url::parse(raw.trim())
            .map_err(|e| ProbeError::InvalidUrl(format!("{} ({})", raw, e)))?;

        if url.scheme() != "https" {
            return Err(ProbeError::InsecureScheme(url.scheme().to_string()));
        }

        let host = url
            .host_str()
            .filter(|h| !h.is_empty())
            .ok_or_else(|| ProbeError::InvalidUrl(format!("{} (missing host)", raw)))?;

        if is_forbidden_host(host) {
            return Err(ProbeError::ForbiddenHost(host.to_string()));
        }

        // IPv6 hosts are normalised to hex groups, so an embedded IPv4
        // address is compared in its dotted form
        if let Some(Host::Ipv6(addr)) = url.host() {
            if let Some(v4) = addr.to_ipv4() {
                if is_forbidden_host(&v4.to_string()) {
                    return Err(ProbeError::ForbiddenHost(host.to_string()));
                }
            }
        }

        Ok(Self { url })
    }

    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }

    pub fn host(&self) -> &str {
        self.url.host_str().unwrap_or_default()
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

fn is_forbidden_host(host: &str) -> bool {
    FORBIDDEN_HOST_FRAGMENTS
        .iter()
        .any(|fragment| host.contains(fragment))
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.url.as_str())
    }
}

impl std::str::FromStr for Target {
    type Err = ProbeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
