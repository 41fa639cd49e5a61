//! The per-interface configuration record and merge rules.

use serde::Serialize;

use crate::error::{Error, Result};

/// Everything needed to render one interface's fragments.
///
/// Built fresh per run from the MAC resolver, any existing fragments, and
/// caller overrides. PVID and egress VLAN keep their raw text; the literal
/// `none` (any case) means "explicitly absent" and is collapsed by the
/// `effective_*` accessors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InterfaceConfig {
    pub interface: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mac_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_alias: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bridge: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pvid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub egress_vlan: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub vlans: Vec<String>,
}

impl InterfaceConfig {
    pub fn new(interface: impl Into<String>) -> Self {
        Self {
            interface: interface.into(),
            ..Default::default()
        }
    }

    /// Generation requires an interface name.
    pub fn validate(&self) -> Result<()> {
        if self.interface.is_empty() {
            return Err(Error::MissingInterface);
        }
        Ok(())
    }

    /// PVID with the `none` placeholder collapsed to absent.
    pub fn effective_pvid(&self) -> Option<&str> {
        effective(self.pvid.as_deref())
    }

    /// Egress untagged VLAN with the `none` placeholder collapsed to absent.
    pub fn effective_egress(&self) -> Option<&str> {
        effective(self.egress_vlan.as_deref())
    }

    /// Record a VLAN ID, keeping first-seen order and skipping duplicates.
    pub fn add_vlan(&mut self, id: impl Into<String>) {
        let id = id.into();
        if !self.vlans.contains(&id) {
            self.vlans.push(id);
        }
    }

    /// Apply user overrides. A `None` field keeps the current value; a
    /// `Some` replaces it outright, including the whole VLAN set.
    pub fn apply(mut self, overrides: Overrides) -> Self {
        if let Some(mac) = overrides.mac {
            self.mac_address = Some(mac);
        }
        if let Some(alias) = overrides.alias {
            self.link_alias = Some(alias);
        }
        if let Some(bridge) = overrides.bridge {
            self.bridge = Some(bridge);
        }
        if let Some(pvid) = overrides.pvid {
            self.pvid = Some(pvid);
        }
        if let Some(egress) = overrides.egress {
            self.egress_vlan = Some(egress);
        }
        if let Some(vlans) = overrides.vlans {
            self.vlans = vlans;
        }
        self
    }
}

fn effective(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.eq_ignore_ascii_case("none"))
}

/// User-supplied field replacements, one optional slot per field.
///
/// In interactive mode an empty answer maps to `None` (keep), a non-empty
/// answer to `Some` (replace). Flag mode never goes through overrides: the
/// record is built straight from the flags.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub mac: Option<String>,
    pub alias: Option<String>,
    pub bridge: Option<String>,
    pub pvid: Option<String>,
    pub egress: Option<String>,
    pub vlans: Option<Vec<String>>,
}

/// Split a comma-separated VLAN list, dropping blanks and duplicates.
pub fn parse_vlan_list(input: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for part in input.split(',') {
        let part = part.trim();
        if !part.is_empty() && !out.iter().any(|v| v == part) {
            out.push(part.to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_requires_interface() {
        assert!(InterfaceConfig::default().validate().is_err());
        assert!(InterfaceConfig::new("eth0").validate().is_ok());
    }

    #[test]
    fn test_effective_pvid_none_literal() {
        let mut config = InterfaceConfig::new("eth0");
        config.pvid = Some("none".to_string());
        assert_eq!(config.effective_pvid(), None);
        config.pvid = Some("NONE".to_string());
        assert_eq!(config.effective_pvid(), None);
        config.pvid = Some("5".to_string());
        assert_eq!(config.effective_pvid(), Some("5"));
        config.pvid = None;
        assert_eq!(config.effective_pvid(), None);
    }

    #[test]
    fn test_add_vlan_dedup() {
        let mut config = InterfaceConfig::new("eth0");
        config.add_vlan("10");
        config.add_vlan("20");
        config.add_vlan("10");
        assert_eq!(config.vlans, ["10", "20"]);
    }

    #[test]
    fn test_empty_overrides_keep_everything() {
        let mut config = InterfaceConfig::new("eth0");
        config.mac_address = Some("aa:bb:cc:dd:ee:ff".to_string());
        config.bridge = Some("br0".to_string());
        config.vlans = vec!["10".to_string(), "20".to_string()];

        let merged = config.clone().apply(Overrides::default());
        assert_eq!(merged, config);
    }

    #[test]
    fn test_override_replaces_outright() {
        let mut config = InterfaceConfig::new("eth0");
        config.bridge = Some("br0".to_string());
        config.vlans = vec!["10".to_string(), "20".to_string()];

        let merged = config.apply(Overrides {
            bridge: Some("br1".to_string()),
            vlans: Some(parse_vlan_list("11,12")),
            ..Default::default()
        });
        assert_eq!(merged.bridge.as_deref(), Some("br1"));
        assert_eq!(merged.vlans, ["11", "12"]);
    }

    #[test]
    fn test_parse_vlan_list() {
        assert_eq!(parse_vlan_list("10,20,30"), ["10", "20", "30"]);
        assert_eq!(parse_vlan_list(" 10 , 20 "), ["10", "20"]);
        assert_eq!(parse_vlan_list("10,,10,20"), ["10", "20"]);
        assert!(parse_vlan_list("").is_empty());
    }
}
