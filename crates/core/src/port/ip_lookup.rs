// IP Geolocation Lookup Port
// Sibling collaborator: the discovery/script core never calls it

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use thiserror::Error;

/// Flat field mapping returned by the geolocation service
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpDetails {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default, rename = "regionName")]
    pub region_name: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub isp: Option<String>,
    #[serde(default)]
    pub org: Option<String>,
    #[serde(default, rename = "as")]
    pub asn: Option<String>,
}

impl IpDetails {
    pub const STATUS_SUCCESS: &'static str = "success";
    pub const STATUS_FAIL: &'static str = "fail";

    /// A `fail` payload carrying `message`
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            status: Self::STATUS_FAIL.to_string(),
            message: Some(message.into()),
            ..Default::default()
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == Self::STATUS_SUCCESS
    }
}

#[derive(Error, Debug)]
pub enum LookupError {
    #[error("Request failed: {0}")]
    Request(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// IP Lookup trait
///
/// Never fails: transport problems come back as `IpDetails::failure`.
#[async_trait]
pub trait IpLookup: Send + Sync {
    async fn lookup(&self, ip: IpAddr) -> IpDetails;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;

    /// Returns the same payload for every address
    pub struct StaticIpLookup {
        details: IpDetails,
    }

    impl StaticIpLookup {
        pub fn new(details: IpDetails) -> Self {
            Self { details }
        }
    }

    #[async_trait]
    impl IpLookup for StaticIpLookup {
        async fn lookup(&self, ip: IpAddr) -> IpDetails {
            IpDetails {
                query: Some(ip.to_string()),
                ..self.details.clone()
            }
        }
    }
}
