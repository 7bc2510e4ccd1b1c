//! Proxy-routed domain list.
//!
//! ```text
//! # routed through the proxy subnet
//! blocked.example
//! video.test
//! ```
//!
//! One suffix per line, whitespace trimmed; blank lines and `#` comments are
//! skipped.

use dohgate_domain::{DomainError, DomainSet};
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::info;

pub fn load_domain_file(path: &Path) -> Result<DomainSet, DomainError> {
    let file = std::fs::File::open(path).map_err(|e| {
        DomainError::IoError(format!("Failed to open domain file {}: {}", path.display(), e))
    })?;

    let mut entries = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = line.map_err(|e| {
            DomainError::IoError(format!("Failed to read domain file {}: {}", path.display(), e))
        })?;
        if let Some(entry) = entry(&line) {
            entries.push(entry.to_string());
        }
    }

    let domains = DomainSet::from_suffixes(entries);
    info!(path = %path.display(), domains = domains.len(), "Domain list loaded");
    Ok(domains)
}

pub fn parse_domain_list(content: &str) -> DomainSet {
    DomainSet::from_suffixes(content.lines().filter_map(entry))
}

fn entry(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        None
    } else {
        Some(trimmed)
    }
}
