//! systemd-networkd fragment generation for a single interface.
//!
//! This crate builds `.link` and `.network` configuration fragments (plus
//! advisory `bridge vlan` commands) for one network interface. A run
//! assembles an [`InterfaceConfig`] from three sources, in increasing
//! precedence: the interface's live MAC address from sysfs, any fragments
//! already present in the configuration directory, and caller-supplied
//! overrides. The merged record is then rendered back to fragment text.
//!
//! # Example
//!
//! ```ignore
//! use netcfg::files;
//! use netcfg::render;
//! use netcfg::{InterfaceConfig, Overrides};
//!
//! let existing = files::load_existing("eth0", files::DEFAULT_NETWORK_DIR.as_ref());
//! let config = existing.config.apply(Overrides {
//!     bridge: Some("br0".to_string()),
//!     ..Default::default()
//! });
//!
//! println!("{}", render::link_file(&config));
//! println!("{}", render::network_file(&config));
//! for cmd in render::bridge_vlan_commands(&config) {
//!     println!("{cmd}");
//! }
//! ```
//!
//! Nothing here talks to the kernel: sysfs is the only host state read, and
//! writes happen only through [`files::write_fragments`].

pub mod config;
pub mod error;
pub mod files;
pub mod ini;
pub mod mac;
pub mod render;

pub use config::{InterfaceConfig, Overrides};
pub use error::{Error, Result};
