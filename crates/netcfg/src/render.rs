//! Fragment text and advisory command generation.

use std::fmt::Write;

use crate::config::InterfaceConfig;

/// Commands to make systemd-networkd pick up freshly written fragments.
pub const SYSTEMD_APPLY_COMMANDS: [&str; 2] = [
    "sudo systemctl daemon-reload",
    "sudo systemctl restart systemd-networkd",
];

/// Render the `.link` fragment.
///
/// The `[Match]` and `[Link]` headers are always emitted, even when only
/// `Name=` has a value.
pub fn link_file(config: &InterfaceConfig) -> String {
    let mut out = String::new();
    writeln!(out, "[Match]").unwrap();
    writeln!(out, "Name={}", config.interface).unwrap();
    if let Some(mac) = &config.mac_address {
        writeln!(out, "MACAddress={mac}").unwrap();
    }
    writeln!(out).unwrap();
    writeln!(out, "[Link]").unwrap();
    if let Some(alias) = &config.link_alias {
        writeln!(out, "Alias={alias}").unwrap();
    }
    out
}

/// Render the `.network` fragment.
///
/// VLANs appear in merge order, unsorted. A PVID or egress VLAN equal to
/// the literal `none` is omitted.
pub fn network_file(config: &InterfaceConfig) -> String {
    let mut out = String::new();
    writeln!(out, "[Match]").unwrap();
    writeln!(out, "Name={}", config.interface).unwrap();
    writeln!(out).unwrap();
    writeln!(out, "[Network]").unwrap();
    if let Some(bridge) = &config.bridge {
        writeln!(out, "Bridge={bridge}").unwrap();
    }
    writeln!(out).unwrap();
    writeln!(out, "[BridgeVLAN]").unwrap();
    for vlan in &config.vlans {
        writeln!(out, "VLAN={vlan}").unwrap();
    }
    if let Some(pvid) = config.effective_pvid() {
        writeln!(out, "PVID={pvid}").unwrap();
    }
    if let Some(egress) = config.effective_egress() {
        writeln!(out, "EgressUntagged={egress}").unwrap();
    }
    out
}

/// Advisory `bridge vlan` equivalents of the `.network` fragment.
///
/// Tagged VLANs come first (skipping the PVID), then the PVID as
/// `pvid untagged`, then the egress VLAN when it differs from the PVID.
/// These are printed for the operator, never executed.
pub fn bridge_vlan_commands(config: &InterfaceConfig) -> Vec<String> {
    let mut commands = Vec::new();
    let iface = &config.interface;
    let pvid = config.effective_pvid();

    for vlan in &config.vlans {
        if pvid != Some(vlan.as_str()) {
            commands.push(format!("bridge vlan add vid {vlan} dev {iface}"));
        }
    }

    if let Some(pvid) = pvid {
        commands.push(format!("bridge vlan add vid {pvid} dev {iface} pvid untagged"));
    }

    if let Some(egress) = config.effective_egress()
        && pvid != Some(egress)
    {
        commands.push(format!("bridge vlan add vid {egress} dev {iface}"));
    }

    commands
}
