//! Default gateway resolution from the platform routing table
//!
//! - Windows: `route print 0.0.0.0`, the line whose first token is
//!   `0.0.0.0` carries the gateway as its third token
//! - POSIX: `ip route`, the line starting with `default` carries the
//!   gateway right after `via`

use crate::domain::PlatformFamily;
use crate::port::CommandRunner;
use std::sync::Arc;
use tracing::{debug, info, warn};

const WINDOWS_DEFAULT_ROUTE: &str = "0.0.0.0";
const POSIX_DEFAULT_ROUTE: &str = "default";
const POSIX_VIA: &str = "via";

pub struct GatewayResolver {
    runner: Arc<dyn CommandRunner>,
    platform: PlatformFamily,
}

impl GatewayResolver {
    pub fn new(runner: Arc<dyn CommandRunner>, platform: PlatformFamily) -> Self {
        Self { runner, platform }
    }

    /// Default gateway address, or an empty string if it cannot be determined
    pub async fn resolve(&self) -> String {
        let argv = self.platform.route_table_command();

        let output = match self.runner.run(&argv).await {
            Ok(output) => output,
            Err(e) => {
                warn!(command = ?argv, error = %e, "Routing table command failed");
                return String::new();
            }
        };

        match parse_gateway(self.platform, &output.combined()) {
            Some(gateway) => {
                info!(gateway = %gateway, platform = %self.platform, "Default gateway resolved");
                gateway
            }
            None => {
                debug!(platform = %self.platform, "No default route found");
                String::new()
            }
        }
    }
}

/// Extract the gateway from routing-table text (first match wins)
pub fn parse_gateway(platform: PlatformFamily, text: &str) -> Option<String> {
    text.lines().find_map(|line| {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        match platform {
            PlatformFamily::Windows => match tokens.as_slice() {
                [WINDOWS_DEFAULT_ROUTE, _, gateway, ..] => Some(gateway.to_string()),
                _ => None,
            },
            PlatformFamily::Posix => {
                if tokens.first() != Some(&POSIX_DEFAULT_ROUTE) {
                    return None;
                }
                let via = tokens.iter().position(|t| *t == POSIX_VIA)?;
                tokens.get(via + 1).map(|t| t.to_string())
            }
        }
    })
}
