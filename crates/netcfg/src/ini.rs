//! INI-style document parsing for networkd fragments.
//!
//! systemd-networkd fragments are bracketed section headers followed by
//! `Key=Value` lines. Section names repeat (networkd allows several
//! `[BridgeVLAN]` blocks in one file), so a document is an ordered list of
//! sections rather than a map, and entry order within a section is kept.

use winnow::combinator::delimited;
use winnow::error::{ContextError, ErrMode};
use winnow::prelude::*;
use winnow::token::{rest, take_till};

use crate::error::{Error, Result};

/// Result type for winnow parsers.
type PResult<T> = core::result::Result<T, ErrMode<ContextError>>;

/// A parsed fragment: sections in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    sections: Vec<Section>,
}

/// One `[Name]` block and its `Key=Value` entries, in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub name: String,
    pub entries: Vec<(String, String)>,
}

impl Document {
    /// Parse a complete fragment.
    ///
    /// Blank lines and `#`/`;` comments are skipped. Any other line must be
    /// a section header or a `Key=Value` entry inside a section; everything
    /// else makes the document malformed.
    pub fn parse(input: &str) -> Result<Self> {
        let mut sections: Vec<Section> = Vec::new();

        for (index, raw) in input.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            if line.starts_with('[') {
                let name = section_header
                    .parse(line)
                    .map_err(|e| Error::Parse(format!("line {}: {}", index + 1, e)))?;
                sections.push(Section {
                    name,
                    entries: Vec::new(),
                });
            } else {
                let (key, value) = key_value
                    .parse(line)
                    .map_err(|e| Error::Parse(format!("line {}: {}", index + 1, e)))?;
                match sections.last_mut() {
                    Some(section) => section.entries.push((key, value)),
                    None => {
                        return Err(Error::Parse(format!(
                            "line {}: entry before any section header",
                            index + 1
                        )));
                    }
                }
            }
        }

        Ok(Self { sections })
    }

    /// All sections, in file order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// First section with the given name.
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    /// All sections with the given name, in file order.
    pub fn sections_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Section> {
        self.sections.iter().filter(move |s| s.name == name)
    }
}

impl Section {
    /// First value for an exact-case key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// All values for a case-insensitive key, in entry order.
    pub fn values_ignore_case<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> {
        self.entries
            .iter()
            .filter(move |(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}

fn section_header(input: &mut &str) -> PResult<String> {
    delimited('[', take_till(1.., ']'), ']')
        .map(|name: &str| name.trim().to_string())
        .parse_next(input)
}

fn key_value(input: &mut &str) -> PResult<(String, String)> {
    let key = take_till(1.., '=').parse_next(input)?;
    let _ = '='.parse_next(input)?;
    let value = rest.parse_next(input)?;
    Ok((key.trim().to_string(), value.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic() {
        let doc = Document::parse("[Match]\nName=eth0\nMACAddress=aa:bb:cc:dd:ee:ff\n").unwrap();
        assert_eq!(doc.sections().len(), 1);
        let section = doc.section("Match").unwrap();
        assert_eq!(section.get("Name"), Some("eth0"));
        assert_eq!(section.get("MACAddress"), Some("aa:bb:cc:dd:ee:ff"));
    }

    #[test]
    fn test_parse_repeated_sections() {
        let doc = Document::parse("[BridgeVLAN]\nVLAN=10\n\n[BridgeVLAN]\nVLAN=20\n").unwrap();
        let vlans: Vec<&str> = doc
            .sections_named("BridgeVLAN")
            .flat_map(|s| s.values_ignore_case("VLAN"))
            .collect();
        assert_eq!(vlans, ["10", "20"]);
    }

    #[test]
    fn test_parse_comments_and_blanks() {
        let doc = Document::parse("# header comment\n\n[Link]\n; note\nAlias=uplink\n").unwrap();
        assert_eq!(doc.section("Link").unwrap().get("Alias"), Some("uplink"));
    }

    #[test]
    fn test_parse_empty_value() {
        let doc = Document::parse("[Network]\nBridge=\n").unwrap();
        assert_eq!(doc.section("Network").unwrap().get("Bridge"), Some(""));
    }

    #[test]
    fn test_parse_whitespace_around_key() {
        let doc = Document::parse("[VLAN]\nPVID = 5\n").unwrap();
        let section = doc.section("VLAN").unwrap();
        assert_eq!(section.values_ignore_case("pvid").next(), Some("5"));
    }

    #[test]
    fn test_entry_before_section_is_malformed() {
        assert!(Document::parse("Name=eth0\n[Match]\n").is_err());
    }

    #[test]
    fn test_garbage_line_is_malformed() {
        assert!(Document::parse("[Match]\nnot an entry\n").is_err());
        assert!(Document::parse("[Match\nName=eth0\n").is_err());
    }

    #[test]
    fn test_case_insensitive_keys() {
        let doc = Document::parse("[BridgeVLAN]\nvlan=10\nVLAN=20\n").unwrap();
        let values: Vec<&str> = doc
            .section("BridgeVLAN")
            .unwrap()
            .values_ignore_case("VLAN")
            .collect();
        assert_eq!(values, ["10", "20"]);
    }
}
