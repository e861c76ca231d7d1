// ip-api.com geolocation adapter
// reason: reqwest async client with a request timeout
use async_trait::async_trait;
use std::net::IpAddr;
use std::time::Duration;
use tracing::{info, warn};

use workbench_core::port::{IpDetails, IpLookup, LookupError};

pub const DEFAULT_LOOKUP_URL: &str = "http://ip-api.com/json";

const LOOKUP_FIELDS: &str = "status,message,query,country,regionName,city,isp,org,as";
const LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

pub struct IpApiLookup {
    client: reqwest::Client,
    base_url: String,
}

impl IpApiLookup {
    pub fn new(base_url: impl Into<String>) -> Result<Self, LookupError> {
        let client = reqwest::Client::builder()
            .timeout(LOOKUP_TIMEOUT)
            .build()
            .map_err(|e| LookupError::Request(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn request_url(&self, ip: IpAddr) -> String {
        format!(
            "{}/{}?fields={}",
            self.base_url.trim_end_matches('/'),
            ip,
            LOOKUP_FIELDS
        )
    }

    async fn fetch(&self, ip: IpAddr) -> Result<IpDetails, LookupError> {
        let response = self
            .client
            .get(self.request_url(ip))
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| LookupError::Request(e.to_string()))?;

        response
            .json::<IpDetails>()
            .await
            .map_err(|e| LookupError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl IpLookup for IpApiLookup {
    async fn lookup(&self, ip: IpAddr) -> IpDetails {
        match self.fetch(ip).await {
            Ok(details) => {
                info!(ip = %ip, status = %details.status, "IP lookup finished");
                details
            }
            Err(e) => {
                warn!(ip = %ip, error = %e, "IP lookup failed");
                IpDetails::failure(e.to_string())
            }
        }
    }
}
