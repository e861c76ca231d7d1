// Device Domain Model (neighbor-table entries)

use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

/// Hardware address recorded when a neighbor line carries none.
pub const UNKNOWN_HARDWARE_ADDRESS: &str = "(unknown)";

/// Note attached to the device whose address equals the default gateway.
pub const DEFAULT_GATEWAY_NOTE: &str = "Default Gateway";

/// One neighbor-table entry. Identity is `address`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceRecord {
    pub address: Ipv4Addr,
    pub hardware_address: String,
    pub note: String,
}

impl DeviceRecord {
    pub fn new(address: Ipv4Addr, hardware_address: impl Into<String>) -> Self {
        Self {
            address,
            hardware_address: hardware_address.into(),
            note: String::new(),
        }
    }
}

/// Result of one network scan as delivered to the observer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanReport {
    /// Default gateway, empty when it could not be determined
    pub gateway: String,
    pub devices: Vec<DeviceRecord>,
}

impl ScanReport {
    /// Build a report, tagging the device that is the default gateway.
    pub fn new(gateway: String, mut devices: Vec<DeviceRecord>) -> Self {
        if !gateway.is_empty() {
            for device in devices.iter_mut() {
                if device.address.to_string() == gateway {
                    device.note = DEFAULT_GATEWAY_NOTE.to_string();
                }
            }
        }
        Self { gateway, devices }
    }

    pub fn has_gateway(&self) -> bool {
        !self.gateway.is_empty()
    }
}
