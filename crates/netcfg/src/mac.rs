//! Interface MAC address discovery via sysfs.

use std::fs;
use std::path::Path;

/// Sysfs root for network device attributes.
const SYS_CLASS_NET: &str = "/sys/class/net";

/// Read the live MAC address of an interface.
///
/// Returns `None` for a missing interface, an unreadable attribute, or a
/// value that is not six colon-separated hex octets. Lookup failure is
/// indistinguishable from "no address available" on purpose.
pub fn interface_mac(name: &str) -> Option<String> {
    mac_from_sysfs(Path::new(SYS_CLASS_NET), name)
}

fn mac_from_sysfs(root: &Path, name: &str) -> Option<String> {
    let content = match fs::read_to_string(root.join(name).join("address")) {
        Ok(content) => content,
        Err(err) => {
            tracing::debug!(interface = name, error = %err, "no MAC address in sysfs");
            return None;
        }
    };

    let mac = content.trim();
    if valid_mac(mac) {
        Some(mac.to_string())
    } else {
        tracing::debug!(interface = name, value = mac, "malformed sysfs MAC address");
        None
    }
}

/// Check for six colon-separated two-digit hex octets, either case.
pub fn valid_mac(s: &str) -> bool {
    let mut octets = 0;
    for part in s.split(':') {
        if part.len() != 2 || !part.bytes().all(|b| b.is_ascii_hexdigit()) {
            return false;
        }
        octets += 1;
    }
    octets == 6
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_mac() {
        assert!(valid_mac("aa:bb:cc:dd:ee:ff"));
        assert!(valid_mac("AA:BB:CC:DD:EE:FF"));
        assert!(valid_mac("00:11:22:aA:Bb:cC"));
    }

    #[test]
    fn test_invalid_mac() {
        assert!(!valid_mac(""));
        assert!(!valid_mac("no address"));
        assert!(!valid_mac("aa:bb:cc:dd:ee"));
        assert!(!valid_mac("aa:bb:cc:dd:ee:ff:00"));
        assert!(!valid_mac("aa:bb:cc:dd:ee:f"));
        assert!(!valid_mac("aa:bb:cc:dd:ee:fff"));
        assert!(!valid_mac("gg:bb:cc:dd:ee:ff"));
        assert!(!valid_mac("aa-bb-cc-dd-ee-ff"));
    }

    #[test]
    fn test_missing_interface_is_none() {
        let root = Path::new("/nonexistent/sys/class/net");
        assert_eq!(mac_from_sysfs(root, "eth0"), None);
    }
}
