//! Package build options
//!
//! A recipe exposes two boolean options, `shared` and `fPIC`. Position
//! independent code has no meaning on Windows, so `fPIC` is not part of the
//! option set there at all.

use crate::settings::Os;
use irrpkg_errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

/// Name of a build option
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum OptionName {
    #[serde(rename = "shared")]
    Shared,
    #[serde(rename = "fPIC")]
    Fpic,
}

impl OptionName {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Shared => "shared",
            Self::Fpic => "fPIC",
        }
    }
}

impl fmt::Display for OptionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OptionName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "shared" => Ok(Self::Shared),
            "fPIC" => Ok(Self::Fpic),
            _ => Err(s.to_string()),
        }
    }
}

/// Options that exist for a given target OS
#[must_use]
pub fn available_options(os: Os) -> BTreeSet<OptionName> {
    let mut options = BTreeSet::from([OptionName::Shared, OptionName::Fpic]);
    if os == Os::Windows {
        options.remove(&OptionName::Fpic);
    }
    options
}

/// Default option values declared by a recipe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionDefaults {
    #[serde(default)]
    pub shared: bool,
    #[serde(default = "default_fpic", rename = "fPIC")]
    pub fpic: bool,
}

impl OptionDefaults {
    fn value(self, name: OptionName) -> bool {
        match name {
            OptionName::Shared => self.shared,
            OptionName::Fpic => self.fpic,
        }
    }
}

impl Default for OptionDefaults {
    fn default() -> Self {
        Self {
            shared: false,
            fpic: true,
        }
    }
}

fn default_fpic() -> bool {
    true
}

/// Option values after defaults and user overrides have been applied
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionValues(BTreeMap<OptionName, bool>);

impl OptionValues {
    /// Resolve option values for `os`
    ///
    /// Starts from `defaults` restricted to [`available_options`] and applies
    /// each `(name, value)` override in order.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownOption` when an override names an option
    /// that does not exist for `os` and `ConfigError::InvalidOptionValue` when
    /// the value is not a boolean.
    pub fn resolve<S: AsRef<str>>(
        os: Os,
        defaults: OptionDefaults,
        overrides: &[(S, S)],
    ) -> Result<Self, ConfigError> {
        let available = available_options(os);
        let mut values: BTreeMap<OptionName, bool> = available
            .iter()
            .map(|name| (*name, defaults.value(*name)))
            .collect();

        for (name, value) in overrides {
            let (name, value) = (name.as_ref(), value.as_ref());
            let option = name
                .parse::<OptionName>()
                .ok()
                .filter(|option| available.contains(option))
                .ok_or_else(|| ConfigError::UnknownOption {
                    option: name.to_string(),
                    os: os.to_string(),
                })?;
            values.insert(option, parse_bool(name, value)?);
        }

        Ok(Self(values))
    }

    #[must_use]
    pub fn get(&self, name: OptionName) -> Option<bool> {
        self.0.get(&name).copied()
    }

    #[must_use]
    pub fn contains(&self, name: OptionName) -> bool {
        self.0.contains_key(&name)
    }

    #[must_use]
    pub fn shared(&self) -> bool {
        self.get(OptionName::Shared).unwrap_or(false)
    }

    /// `None` when `fPIC` is not an option for the target
    #[must_use]
    pub fn fpic(&self) -> Option<bool> {
        self.get(OptionName::Fpic)
    }

    pub fn iter(&self) -> impl Iterator<Item = (OptionName, bool)> + '_ {
        self.0.iter().map(|(name, value)| (*name, *value))
    }

    /// Stable `name=Value` lines used when hashing a package id
    #[must_use]
    pub fn canonical_lines(&self) -> Vec<String> {
        self.iter()
            .map(|(name, value)| format!("{name}={}", if value { "True" } else { "False" }))
            .collect()
    }
}

fn parse_bool(option: &str, value: &str) -> Result<bool, ConfigError> {
    match value {
        "True" | "true" | "1" | "ON" | "on" => Ok(true),
        "False" | "false" | "0" | "OFF" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidOptionValue {
            option: option.to_string(),
            value: value.to_string(),
        }),
    }
}
