//! Account addresses.
//!
//! Validity is purely structural: `0x` followed by 40 hex digits. No
//! EIP-55 checksum verification is performed; providers commonly return
//! lowercase addresses and those are kept verbatim.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_PREFIX_LEN, DEFAULT_SUFFIX_LEN, WalletConfig};
use crate::error::WalletError;

static ADDRESS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^0x[a-fA-F0-9]{40}$").expect("address pattern is valid"));

/// Check whether a string is a structurally valid account address.
pub fn is_valid_address(address: &str) -> bool {
    ADDRESS_RE.is_match(address)
}

/// Shorten an address for display (`0x1234...5678`).
///
/// Strings no longer than `prefix_len + suffix_len` characters are
/// returned unchanged.
pub fn format_address(address: &str, prefix_len: usize, suffix_len: usize) -> String {
    let len = address.chars().count();
    if len <= prefix_len + suffix_len {
        return address.to_string();
    }

    let head: String = address.chars().take(prefix_len).collect();
    let tail: String = address.chars().skip(len - suffix_len).collect();
    format!("{}...{}", head, tail)
}

/// A structurally validated account address, stored as the provider sent it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

impl Address {
    pub fn parse(raw: &str) -> Result<Self, WalletError> {
        let trimmed = raw.trim();
        if is_valid_address(trimmed) {
            Ok(Self(trimmed.to_string()))
        } else {
            Err(WalletError::InvalidAddress(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Display form using the default 6/4 slice.
    pub fn short(&self) -> String {
        format_address(&self.0, DEFAULT_PREFIX_LEN, DEFAULT_SUFFIX_LEN)
    }

    /// Display form using the slice from `config`.
    pub fn short_with(&self, config: &WalletConfig) -> String {
        format_address(&self.0, config.prefix_len, config.suffix_len)
    }

    /// EIP-55 mixed-case rendering, for display only.
    pub fn checksummed(&self) -> String {
        alloy_primitives::Address::from_str(&self.0)
            .map(|a| a.to_checksum(None))
            .unwrap_or_else(|_| self.0.clone())
    }

    /// Case-insensitive comparison, since providers may change casing.
    pub fn same_account(&self, other: &Address) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Address {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Address {
    type Error = WalletError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.0
    }
}
