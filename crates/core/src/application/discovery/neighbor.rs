//! Neighbor devices from the OS ARP cache (`arp -a`)
//!
//! Each line is searched for a dotted quad and a six-octet hardware address.
//! Both Windows (`192.168.1.1   aa-bb-cc-dd-ee-ff   dynamic`) and POSIX
//! (`? (192.168.1.1) at aa:bb:cc:dd:ee:ff [ether] on eth0`) layouts are
//! handled by the same scan.

use crate::domain::{DeviceRecord, PlatformFamily, UNKNOWN_HARDWARE_ADDRESS};
use crate::port::CommandRunner;
use std::collections::HashSet;
use std::net::Ipv4Addr;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// `xx:xx:xx:xx:xx:xx` or `xx-xx-xx-xx-xx-xx`
const HARDWARE_ADDRESS_LEN: usize = 17;

pub struct NeighborTableReader {
    runner: Arc<dyn CommandRunner>,
    platform: PlatformFamily,
}

impl NeighborTableReader {
    pub fn new(runner: Arc<dyn CommandRunner>, platform: PlatformFamily) -> Self {
        Self { runner, platform }
    }

    /// Devices in first-seen order, one per address. Empty on any failure.
    pub async fn read(&self) -> Vec<DeviceRecord> {
        let argv = self.platform.neighbor_table_command();

        match self.runner.run(&argv).await {
            Ok(output) => {
                let devices = parse_neighbor_table(&output.combined());
                info!(count = devices.len(), "Neighbor table read");
                devices
            }
            Err(e) => {
                warn!(command = ?argv, error = %e, "Neighbor table command failed");
                Vec::new()
            }
        }
    }
}

/// Parse neighbor-table text into deduplicated records
pub fn parse_neighbor_table(text: &str) -> Vec<DeviceRecord> {
    let mut seen: HashSet<Ipv4Addr> = HashSet::new();
    let mut devices = Vec::new();

    for line in text.lines() {
        let Some(candidate) = find_dotted_quad(line) else {
            continue;
        };

        // The quad search accepts any digit runs; 999.1.1.1 ends here
        let Ok(address) = candidate.parse::<Ipv4Addr>() else {
            debug!(candidate = %candidate, "Skipping line with invalid IPv4 address");
            continue;
        };

        if !seen.insert(address) {
            continue;
        }

        let hardware_address = find_hardware_address(line).unwrap_or(UNKNOWN_HARDWARE_ADDRESS);
        devices.push(DeviceRecord::new(address, hardware_address));
    }

    devices
}

/// Leftmost `digits.digits.digits.digits` substring of `line`
fn find_dotted_quad(line: &str) -> Option<&str> {
    let bytes = line.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        if !is_quad_byte(bytes[i]) {
            i += 1;
            continue;
        }

        let run_start = i;
        while i < bytes.len() && is_quad_byte(bytes[i]) {
            i += 1;
        }

        if let Some(quad) = first_quad_in_run(&line[run_start..i]) {
            return Some(quad);
        }
    }

    None
}

fn is_quad_byte(b: u8) -> bool {
    b.is_ascii_digit() || b == b'.'
}

/// First four consecutive non-empty dot-separated groups in a `[0-9.]+` run
fn first_quad_in_run(run: &str) -> Option<&str> {
    let mut groups: Vec<(usize, usize)> = Vec::new();
    let mut start = 0;
    for (idx, b) in run.bytes().enumerate() {
        if b == b'.' {
            groups.push((start, idx));
            start = idx + 1;
        }
    }
    groups.push((start, run.len()));

    groups
        .windows(4)
        .find(|w| w.iter().all(|(s, e)| e > s))
        .map(|w| &run[w[0].0..w[3].1])
}

/// Leftmost six-octet hex hardware address delimited by `:` or `-`
fn find_hardware_address(line: &str) -> Option<&str> {
    let bytes = line.as_bytes();
    if bytes.len() < HARDWARE_ADDRESS_LEN {
        return None;
    }

    (0..=bytes.len() - HARDWARE_ADDRESS_LEN)
        .find(|&start| is_hardware_address(&bytes[start..start + HARDWARE_ADDRESS_LEN]))
        .map(|start| &line[start..start + HARDWARE_ADDRESS_LEN])
}

fn is_hardware_address(window: &[u8]) -> bool {
    window.iter().enumerate().all(|(idx, b)| {
        if idx % 3 == 2 {
            *b == b':' || *b == b'-'
        } else {
            b.is_ascii_hexdigit()
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::command_runner::mocks::ScriptedCommandRunner;
    use crate::port::CommandOutput;

    const POSIX_ARP: &str = "\
? (192.168.1.1) at a0:b1:c2:d3:e4:f5 [ether] on wlan0
? (192.168.1.17) at <incomplete> on wlan0
router.lan (192.168.1.1) at a0:b1:c2:d3:e4:f5 [ether] on wlan0
? (192.168.1.30) at 11:22:33:44:55:66 [ether] on wlan0
";

    const WINDOWS_ARP: &str = "\
Interface: 192.168.1.23 --- 0xb
  Internet Address      Physical Address      Type
  192.168.1.1           a0-b1-c2-d3-e4-f5     dynamic
  192.168.1.255         ff-ff-ff-ff-ff-ff     static
  224.0.0.22            01-00-5e-00-00-16     static
";

    fn addresses(devices: &[DeviceRecord]) -> Vec<String> {
        devices.iter().map(|d| d.address.to_string()).collect()
    }

    #[test]
    fn test_parse_posix_dedups_in_first_seen_order() {
        let devices = parse_neighbor_table(POSIX_ARP);

        assert_eq!(
            addresses(&devices),
            vec!["192.168.1.1", "192.168.1.17", "192.168.1.30"]
        );
        assert_eq!(devices[0].hardware_address, "a0:b1:c2:d3:e4:f5");
        assert_eq!(devices[1].hardware_address, UNKNOWN_HARDWARE_ADDRESS);
        assert!(devices.iter().all(|d| d.note.is_empty()));
    }

    #[test]
    fn test_parse_windows_layout() {
        let devices = parse_neighbor_table(WINDOWS_ARP);

        assert_eq!(
            addresses(&devices),
            vec!["192.168.1.23", "192.168.1.1", "192.168.1.255", "224.0.0.22"]
        );
        // Interface header carries no hardware address
        assert_eq!(devices[0].hardware_address, UNKNOWN_HARDWARE_ADDRESS);
        assert_eq!(devices[1].hardware_address, "a0-b1-c2-d3-e4-f5");
    }

    #[test]
    fn test_duplicate_keeps_first_record() {
        let text = "\
? (10.0.0.5) at <incomplete> on eth0
? (10.0.0.5) at 00:11:22:33:44:55 [ether] on eth0
";
        let devices = parse_neighbor_table(text);

        assert_eq!(devices.len(), 1);
        assert_eq!(devices[0].hardware_address, UNKNOWN_HARDWARE_ADDRESS);
    }

    #[test]
    fn test_k_distinct_addresses_out_of_n_lines() {
        let lines = ["10.0.0.1", "10.0.0.2", "10.0.0.1", "10.0.0.3", "10.0.0.2", "10.0.0.1"];
        let text = lines.join("\n");

        let devices = parse_neighbor_table(&text);

        assert_eq!(addresses(&devices), vec!["10.0.0.1", "10.0.0.2", "10.0.0.3"]);
    }

    #[test]
    fn test_lookalike_address_is_skipped() {
        let text = "? (999.168.1.1) at 00:11:22:33:44:55\n? (192.168.1.300) at <incomplete>\n";
        assert!(parse_neighbor_table(text).is_empty());
    }

    #[test]
    fn test_lines_without_address_are_ignored() {
        let text = "No ARP Entries Found.\n\n  Internet Address      Physical Address\n";
        assert!(parse_neighbor_table(text).is_empty());
    }

    #[test]
    fn test_find_dotted_quad_leftmost() {
        assert_eq!(find_dotted_quad("x (10.1.2.3) y"), Some("10.1.2.3"));
        assert_eq!(find_dotted_quad("1.2.3.4.5"), Some("1.2.3.4"));
        assert_eq!(find_dotted_quad("v1.2 then 1..2.3.4.5"), Some("2.3.4.5"));
        assert_eq!(find_dotted_quad("only 1.2.3 here"), None);
    }

    #[test]
    fn test_find_hardware_address_variants() {
        assert_eq!(
            find_hardware_address("at AA:BB:CC:DD:EE:FF on"),
            Some("AA:BB:CC:DD:EE:FF")
        );
        assert_eq!(
            find_hardware_address("mixed aa-bb:cc-dd:ee-ff"),
            Some("aa-bb:cc-dd:ee-ff")
        );
        // BSD-style short octets are not recognized
        assert_eq!(find_hardware_address("at 0:1b:63:84:45:e6 on en0"), None);
        assert_eq!(find_hardware_address("short"), None);
    }

    #[tokio::test]
    async fn test_read_scans_stdout_and_stderr() {
        let runner = ScriptedCommandRunner::new().with_output(
            "arp",
            CommandOutput::new(
                0,
                "? (10.0.0.1) at 00:11:22:33:44:55 [ether] on eth0",
                "? (10.0.0.9) at <incomplete> on eth0",
            ),
        );
        let reader = NeighborTableReader::new(Arc::new(runner.clone()), PlatformFamily::Posix);

        let devices = reader.read().await;

        assert_eq!(addresses(&devices), vec!["10.0.0.1", "10.0.0.9"]);
        assert_eq!(runner.calls(), vec![vec!["arp".to_string(), "-a".to_string()]]);
    }

    #[tokio::test]
    async fn test_read_missing_arp_is_empty() {
        let reader = NeighborTableReader::new(
            Arc::new(ScriptedCommandRunner::new()),
            PlatformFamily::Windows,
        );

        assert!(reader.read().await.is_empty());
    }
}
