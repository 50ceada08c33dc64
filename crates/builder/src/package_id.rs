//! Deterministic package identifiers

use irrpkg_types::{OptionValues, Requirement, Settings};
use sha2::{Digest, Sha256};

/// Compute the package id for a configuration
///
/// The id is the hex SHA-256 of a canonical text made of the settings,
/// the resolved options and the requirement references, one `key=value`
/// per line in fixed section order.
#[must_use]
pub fn compute_package_id(
    settings: &Settings,
    options: &OptionValues,
    requirements: &[Requirement],
) -> String {
    let mut canonical = String::from("[settings]\n");
    for line in settings.canonical_lines() {
        canonical.push_str(&line);
        canonical.push('\n');
    }
    canonical.push_str("[options]\n");
    for line in options.canonical_lines() {
        canonical.push_str(&line);
        canonical.push('\n');
    }
    canonical.push_str("[requires]\n");
    let mut references: Vec<String> = requirements
        .iter()
        .map(|r| r.reference.to_string())
        .collect();
    references.sort();
    for reference in references {
        canonical.push_str(&reference);
        canonical.push('\n');
    }

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    format!("{:x}", hasher.finalize())
}
