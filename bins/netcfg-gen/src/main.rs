//! netcfg-gen - systemd-networkd fragment generator.
//!
//! Builds `.link`/`.network` fragments for a single interface from
//! interactive prompts or command-line flags, prints them together with the
//! equivalent `bridge vlan` commands, and writes the files only after an
//! explicit confirmation.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::Parser;
use netcfg::config::parse_vlan_list;
use netcfg::files::{self, FileOutcome};
use netcfg::render;
use netcfg::{InterfaceConfig, Overrides};

#[derive(Parser)]
#[command(name = "netcfg-gen", version)]
#[command(about = "Generate systemd-networkd .link/.network fragments and bridge vlan commands")]
struct Cli {
    /// Prompt for every field, seeded from existing configuration.
    #[arg(long)]
    interactive: bool,

    /// Interface name.
    #[arg(long)]
    interface: Option<String>,

    /// MAC address for the [Match] section.
    #[arg(long)]
    mac: Option<String>,

    /// Interface alias for the [Link] section.
    #[arg(long)]
    alias: Option<String>,

    /// Bridge to join.
    #[arg(long)]
    bridge: Option<String>,

    /// Port VLAN ID (untagged), or "none".
    #[arg(long)]
    pvid: Option<String>,

    /// Egress untagged VLAN ID, or "none".
    #[arg(long)]
    egress: Option<String>,

    /// Comma-separated VLAN IDs.
    #[arg(long)]
    vlans: Option<String>,

    /// Fragment directory to read from and write to.
    #[arg(long, default_value = files::DEFAULT_NETWORK_DIR)]
    output_dir: PathBuf,

    /// Print the merged configuration as JSON before the fragments.
    #[arg(short = 'j', long)]
    json: bool,
}

impl Cli {
    /// True when any value-bearing flag was supplied.
    fn has_value_flags(&self) -> bool {
        self.interface.is_some()
            || self.mac.is_some()
            || self.alias.is_some()
            || self.bridge.is_some()
            || self.pvid.is_some()
            || self.egress.is_some()
            || self.vlans.is_some()
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();

    let config = if cli.interactive || !cli.has_value_flags() {
        match interactive_config(&cli)? {
            Some(config) => config,
            None => return Ok(()),
        }
    } else {
        config_from_flags(&cli)
    };

    if let Err(err) = config.validate() {
        eprintln!("Error: {err}");
        return Ok(());
    }

    println!();
    println!("Generated configuration:");
    println!("{}", "=".repeat(50));

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&config)?);
        println!();
    }

    let link_content = render::link_file(&config);
    let network_content = render::network_file(&config);

    println!("Link file content:");
    println!("{link_content}");
    println!("Network file content:");
    println!("{network_content}");

    print_bridge_commands(&render::bridge_vlan_commands(&config));
    print_systemd_hints();

    let answer = prompt(&format!(
        "\nWrite these files to {}? (y/N): ",
        cli.output_dir.display()
    ))?;
    if answer.eq_ignore_ascii_case("y") {
        match files::write_fragments(&cli.output_dir, &config, &link_content, &network_content) {
            Ok((link_path, network_path)) => {
                println!();
                println!("Files written successfully:");
                println!("  {}", link_path.display());
                println!("  {}", network_path.display());
            }
            Err(err) => eprintln!("Error writing files: {err}"),
        }
    } else {
        println!("Files not written.");
    }

    Ok(())
}

/// Interactive branch: prompt for the interface, seed from host state and
/// existing fragments, then offer every field for replacement. Returns
/// `None` when no interface name was given.
fn interactive_config(cli: &Cli) -> anyhow::Result<Option<InterfaceConfig>> {
    println!("Interactive mode:");
    println!("{}", "=".repeat(50));

    let interface = prompt("Interface name: ")?;
    if interface.is_empty() {
        eprintln!("Error: {}", netcfg::Error::MissingInterface);
        return Ok(None);
    }

    let existing = files::load_existing(&interface, &cli.output_dir);
    report_fragment(&files::link_path(&cli.output_dir, &interface), &existing.link_file);
    report_fragment(
        &files::network_path(&cli.output_dir, &interface),
        &existing.network_file,
    );
    let current = existing.config;

    println!();
    println!("Current configuration values (press Enter to keep current or use new value):");
    println!("Interface: {}", current.interface);

    let overrides = Overrides {
        mac: prompt_field("MAC address", current.mac_address.as_deref())?,
        alias: prompt_field("Alias", current.link_alias.as_deref())?,
        bridge: prompt_field("Bridge", current.bridge.as_deref())?,
        pvid: prompt_field("PVID", current.pvid.as_deref())?,
        egress: prompt_field("Egress Untagged", current.egress_vlan.as_deref())?,
        vlans: prompt_vlans(&current.vlans)?,
    };

    Ok(Some(current.apply(overrides)))
}

/// Flag branch: the record comes straight from the flags, with no host
/// lookup and no fragment loading.
fn config_from_flags(cli: &Cli) -> InterfaceConfig {
    InterfaceConfig {
        interface: cli.interface.clone().unwrap_or_default(),
        mac_address: cli.mac.clone(),
        link_alias: cli.alias.clone(),
        bridge: cli.bridge.clone(),
        pvid: cli.pvid.clone(),
        egress_vlan: cli.egress.clone(),
        vlans: cli
            .vlans
            .as_deref()
            .map(parse_vlan_list)
            .unwrap_or_default(),
    }
}

fn report_fragment(path: &Path, outcome: &FileOutcome) {
    match outcome {
        FileOutcome::Loaded | FileOutcome::Absent => {}
        FileOutcome::Invalid(reason) => {
            eprintln!("Warning: ignoring {}: {}", path.display(), reason);
        }
    }
}

/// Show the current value and read a replacement; Enter keeps the current.
fn prompt_field(label: &str, current: Option<&str>) -> anyhow::Result<Option<String>> {
    let answer = prompt(&format!("{} [{}]: ", label, current.unwrap_or("none")))?;
    Ok((!answer.is_empty()).then_some(answer))
}

fn prompt_vlans(current: &[String]) -> anyhow::Result<Option<Vec<String>>> {
    let shown = if current.is_empty() {
        "none".to_string()
    } else {
        current.join(",")
    };
    let answer = prompt(&format!("VLAN IDs (comma-separated) [{shown}]: "))?;
    Ok((!answer.is_empty()).then(|| parse_vlan_list(&answer)))
}

fn prompt(label: &str) -> anyhow::Result<String> {
    print!("{label}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn print_bridge_commands(commands: &[String]) {
    if commands.is_empty() {
        println!("\nNo iproute2 commands needed (no VLAN configuration)");
        return;
    }

    println!(
        "\niproute2 commands to apply the VLAN configuration (WARNING: not tested, may not be complete):"
    );
    println!("{}", "-".repeat(50));
    for command in commands {
        println!("{command}");
    }
    println!("{}", "-".repeat(50));
    println!("Run these commands with 'sudo' to apply immediately");
}

fn print_systemd_hints() {
    println!("\nTo apply systemd network configuration:");
    println!("{}", "-".repeat(40));
    for command in render::SYSTEMD_APPLY_COMMANDS {
        println!("{command}");
    }
    println!("{}", "-".repeat(40));
}
