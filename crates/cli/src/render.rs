// Terminal rendering for scan reports, transcript lines and lookups

use anyhow::Result;
use colored::Colorize;
use tabled::{Table, Tabled};

use workbench_core::application::orchestrator::constants::{
    ERROR_PREFIX, EXIT_CODE_PREFIX, RUN_START_PREFIX, STDERR_PREFIX,
};
use workbench_core::domain::{DeviceRecord, ScanReport};
use workbench_core::port::IpDetails;

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "IP Address")]
    address: String,
    #[tabled(rename = "MAC Address")]
    hardware_address: String,
    #[tabled(rename = "Info")]
    note: String,
}

impl From<&DeviceRecord> for DeviceRow {
    fn from(device: &DeviceRecord) -> Self {
        Self {
            address: device.address.to_string(),
            hardware_address: device.hardware_address.clone(),
            note: device.note.clone(),
        }
    }
}

pub fn scan_report(report: &ScanReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    let gateway = if report.has_gateway() {
        report.gateway.as_str()
    } else {
        "not found"
    };
    println!("{} {}", "Gateway:".bold(), gateway);
    println!();

    let rows: Vec<DeviceRow> = if report.devices.is_empty() {
        vec![DeviceRow {
            address: "-".to_string(),
            hardware_address: "-".to_string(),
            note: "No ARP devices found".to_string(),
        }]
    } else {
        report.devices.iter().map(DeviceRow::from).collect()
    };
    println!("{}", Table::new(rows));
    Ok(())
}

pub fn scan_failed(reason: &str) {
    eprintln!("{} {}", "Scan Error:".red().bold(), reason);
}

pub fn log_line(line: &str) {
    if line.starts_with(RUN_START_PREFIX) {
        println!("{}", line.cyan().bold());
    } else if line.starts_with(ERROR_PREFIX) {
        println!("{}", line.red());
    } else if line.starts_with(STDERR_PREFIX) {
        println!("{}", line.yellow());
    } else if let Some(code) = line.strip_prefix(EXIT_CODE_PREFIX) {
        let styled = if code == "0" { line.green() } else { line.red() };
        println!("{}", styled);
        println!();
    } else {
        println!("{}", line);
    }
}

pub fn ip_details(details: &IpDetails) {
    if !details.is_success() {
        println!(
            "{} {}",
            "Lookup failed:".red().bold(),
            details.message.as_deref().unwrap_or("unknown error")
        );
        return;
    }

    let field = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());
    println!("  {} {}", "IP:".bold(), field(&details.query));
    println!("  {} {}", "Country:".bold(), field(&details.country));
    println!(
        "  {} {}, {}",
        "Region/City:".bold(),
        field(&details.region_name),
        field(&details.city)
    );
    println!("  {} {}", "ISP:".bold(), field(&details.isp));
    println!("  {} {}", "Organization:".bold(), field(&details.org));
    println!("  {} {}", "ASN:".bold(), field(&details.asn));
}
