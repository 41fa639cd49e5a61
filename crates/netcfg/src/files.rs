//! Discovery of pre-existing fragments and the confirmed write path.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::InterfaceConfig;
use crate::error::Result;
use crate::ini::Document;
use crate::mac;

/// Default systemd-networkd fragment directory.
pub const DEFAULT_NETWORK_DIR: &str = "/etc/systemd/network";

/// Sections searched for scoped VLAN/PVID/EgressUntagged keys.
const VLAN_SECTIONS: [&str; 3] = ["VLAN", "BridgeVLAN", "Bridge"];

/// Conventional `.link` fragment path for an interface.
pub fn link_path(dir: &Path, interface: &str) -> PathBuf {
    dir.join(format!("00-{interface}.link"))
}

/// Conventional `.network` fragment path for an interface.
pub fn network_path(dir: &Path, interface: &str) -> PathBuf {
    dir.join(format!("20-{interface}.network"))
}

/// What happened to one fragment during loading.
///
/// Loading never fails the run: a missing or malformed file just leaves its
/// fields absent. The outcome is kept so the caller can tell "nothing
/// there" apart from "there, but unusable".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// The file does not exist.
    Absent,
    /// The file was parsed and its fields applied.
    Loaded,
    /// The file exists but could not be read or parsed.
    Invalid(String),
}

/// Loader result: the seeded record plus per-fragment outcomes.
#[derive(Debug)]
pub struct ExistingConfig {
    pub config: InterfaceConfig,
    pub link_file: FileOutcome,
    pub network_file: FileOutcome,
}

/// Seed a record for an interface from host state and existing fragments.
///
/// The live MAC address is resolved first; an existing `.link` fragment
/// overrides it. Fields with nothing behind them stay absent.
pub fn load_existing(interface: &str, dir: &Path) -> ExistingConfig {
    let mut config = InterfaceConfig::new(interface);
    config.mac_address = mac::interface_mac(interface);

    let path = link_path(dir, interface);
    let (link_doc, link_file) = read_document(&path);
    if let Some(doc) = &link_doc {
        apply_link_document(&mut config, doc);
        tracing::debug!(path = %path.display(), "loaded existing link fragment");
    }

    let path = network_path(dir, interface);
    let (network_doc, network_file) = read_document(&path);
    if let Some(doc) = &network_doc {
        apply_network_document(&mut config, doc);
        tracing::debug!(path = %path.display(), "loaded existing network fragment");
    }

    ExistingConfig {
        config,
        link_file,
        network_file,
    }
}

/// Write both fragments, creating the directory if needed.
///
/// Takes the already-rendered contents so what lands on disk is exactly
/// what the caller printed. Returns the two paths written.
pub fn write_fragments(
    dir: &Path,
    config: &InterfaceConfig,
    link_content: &str,
    network_content: &str,
) -> Result<(PathBuf, PathBuf)> {
    fs::create_dir_all(dir)?;

    let link = link_path(dir, &config.interface);
    fs::write(&link, link_content)?;

    let network = network_path(dir, &config.interface);
    fs::write(&network, network_content)?;

    Ok((link, network))
}

fn read_document(path: &Path) -> (Option<Document>, FileOutcome) {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return (None, FileOutcome::Absent);
        }
        Err(err) => return (None, FileOutcome::Invalid(err.to_string())),
    };

    match Document::parse(&content) {
        Ok(doc) => (Some(doc), FileOutcome::Loaded),
        Err(err) => (None, FileOutcome::Invalid(err.to_string())),
    }
}

fn apply_link_document(config: &mut InterfaceConfig, doc: &Document) {
    if let Some(section) = doc.section("Match")
        && let Some(mac) = section.get("MACAddress")
    {
        config.mac_address = Some(mac.to_string());
    }
    if let Some(section) = doc.section("Link")
        && let Some(alias) = section.get("Alias")
    {
        config.link_alias = Some(alias.to_string());
    }
}

fn apply_network_document(config: &mut InterfaceConfig, doc: &Document) {
    if let Some(section) = doc.section("Network")
        && let Some(bridge) = section.get("Bridge")
    {
        config.bridge = Some(bridge.to_string());
    }

    for name in VLAN_SECTIONS {
        for section in doc.sections_named(name) {
            for value in section.values_ignore_case("VLAN") {
                if is_vlan_id(value) {
                    config.add_vlan(value);
                }
            }
        }
    }

    config.pvid = scoped_or_any(doc, "PVID");
    config.egress_vlan = scoped_or_any(doc, "EgressUntagged");
}

/// Look a key up in the VLAN-bearing sections first, then anywhere in the
/// document. A scoped hit always wins over the document-wide fallback.
fn scoped_or_any(doc: &Document, key: &str) -> Option<String> {
    for name in VLAN_SECTIONS {
        for section in doc.sections_named(name) {
            if let Some(value) = section.values_ignore_case(key).find(|v| is_vlan_id(v)) {
                return Some(value.to_string());
            }
        }
    }

    doc.sections()
        .iter()
        .flat_map(|section| section.values_ignore_case(key))
        .find(|v| is_vlan_id(v))
        .map(str::to_string)
}

fn is_vlan_id(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn network_config(content: &str) -> InterfaceConfig {
        let doc = Document::parse(content).unwrap();
        let mut config = InterfaceConfig::new("eth0");
        apply_network_document(&mut config, &doc);
        config
    }

    #[test]
    fn test_fragment_paths() {
        let dir = Path::new("/etc/systemd/network");
        assert_eq!(
            link_path(dir, "eth0"),
            PathBuf::from("/etc/systemd/network/00-eth0.link")
        );
        assert_eq!(
            network_path(dir, "eth0"),
            PathBuf::from("/etc/systemd/network/20-eth0.network")
        );
    }

    #[test]
    fn test_link_document_overrides_mac_and_alias() {
        let doc = Document::parse(
            "[Match]\nName=eth0\nMACAddress=aa:bb:cc:dd:ee:ff\n\n[Link]\nAlias=uplink\n",
        )
        .unwrap();
        let mut config = InterfaceConfig::new("eth0");
        config.mac_address = Some("11:22:33:44:55:66".to_string());
        apply_link_document(&mut config, &doc);
        assert_eq!(config.mac_address.as_deref(), Some("aa:bb:cc:dd:ee:ff"));
        assert_eq!(config.link_alias.as_deref(), Some("uplink"));
    }

    #[test]
    fn test_vlans_merge_across_sections() {
        let config = network_config(
            "[BridgeVLAN]\nVLAN=10\nVLAN=20\n\n[Bridge]\nVLAN=20\nVLAN=30\n",
        );
        assert_eq!(config.vlans, ["10", "20", "30"]);
    }

    #[test]
    fn test_pvid_from_vlan_section() {
        let config = network_config("[VLAN]\nPVID=5\n");
        assert_eq!(config.pvid.as_deref(), Some("5"));
    }

    #[test]
    fn test_bridge_from_network_section() {
        let config = network_config("[Network]\nBridge=br0\n");
        assert_eq!(config.bridge.as_deref(), Some("br0"));
    }

    #[test]
    fn test_scoped_pvid_wins_over_fallback() {
        let config = network_config("[Network]\nPVID=9\n\n[BridgeVLAN]\nPVID=7\n");
        assert_eq!(config.pvid.as_deref(), Some("7"));
    }

    #[test]
    fn test_pvid_fallback_outside_scoped_sections() {
        let config = network_config("[Network]\nPVID=9\nEgressUntagged=4\n");
        assert_eq!(config.pvid.as_deref(), Some("9"));
        assert_eq!(config.egress_vlan.as_deref(), Some("4"));
    }

    #[test]
    fn test_non_numeric_vlan_values_ignored() {
        let config = network_config("[BridgeVLAN]\nVLAN=10\nVLAN=abc\nPVID=none\n");
        assert_eq!(config.vlans, ["10"]);
        assert_eq!(config.pvid, None);
    }

    #[test]
    fn test_case_insensitive_vlan_keys() {
        let config = network_config("[BridgeVLAN]\nvlan=10\npvid=10\n");
        assert_eq!(config.vlans, ["10"]);
        assert_eq!(config.pvid.as_deref(), Some("10"));
    }

    #[test]
    fn test_missing_file_is_absent() {
        let (doc, outcome) = read_document(Path::new("/nonexistent/00-eth0.link"));
        assert!(doc.is_none());
        assert_eq!(outcome, FileOutcome::Absent);
    }
}
