//! Chain id parsing and naming.

use serde_json::Value;

use crate::error::WalletError;

/// Parse a chain id from its `0x` hex string form (e.g. `"0xaa36a7"`).
pub fn parse_chain_id(raw: &str) -> Result<u64, WalletError> {
    let trimmed = raw.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .ok_or_else(|| WalletError::InvalidChainId(raw.to_string()))?;
    u64::from_str_radix(digits, 16).map_err(|_| WalletError::InvalidChainId(raw.to_string()))
}

/// Extract a chain id from a provider response.
///
/// EIP-1193 mandates a hex string, but some injected providers answer
/// with a plain number; both are accepted.
pub fn chain_id_from_value(value: &Value) -> Result<u64, WalletError> {
    match value {
        Value::String(s) => parse_chain_id(s),
        Value::Number(n) => n
            .as_u64()
            .ok_or_else(|| WalletError::InvalidChainId(n.to_string())),
        other => Err(WalletError::MalformedResponse(format!(
            "expected chain id, got {}",
            other
        ))),
    }
}

/// Render a chain id in the `0x` hex form used by providers and storage.
pub fn format_chain_id(chain_id: u64) -> String {
    format!("0x{:x}", chain_id)
}

/// Convert chain ID to network name
pub fn chain_name(chain_id: u64) -> &'static str {
    match chain_id {
        1 => "Ethereum",
        11155111 => "Sepolia",
        17000 => "Holesky",
        42161 => "Arbitrum",
        10 => "Optimism",
        8453 => "Base",
        137 => "Polygon",
        56 => "BNB Chain",
        43114 => "Avalanche",
        324 => "zkSync Era",
        59144 => "Linea",
        534352 => "Scroll",
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_chain_id() {
        assert_eq!(parse_chain_id("0x1"), Ok(1));
        assert_eq!(parse_chain_id("0xaa36a7"), Ok(11155111));
        assert_eq!(parse_chain_id("0X89"), Ok(137));
        assert!(parse_chain_id("1").is_err());
        assert!(parse_chain_id("0xzz").is_err());
        assert!(parse_chain_id("").is_err());
    }

    #[test]
    fn test_chain_id_from_value() {
        assert_eq!(chain_id_from_value(&json!("0x2105")), Ok(8453));
        assert_eq!(chain_id_from_value(&json!(10)), Ok(10));
        assert!(matches!(
            chain_id_from_value(&json!(null)),
            Err(WalletError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_format_chain_id() {
        assert_eq!(format_chain_id(1), "0x1");
        assert_eq!(format_chain_id(11155111), "0xaa36a7");
    }

    #[test]
    fn test_chain_name() {
        assert_eq!(chain_name(1), "Ethereum");
        assert_eq!(chain_name(137), "Polygon");
        assert_eq!(chain_name(999_999), "Unknown");
    }
}
