//! Payload served by `GET /data`.
//!
//! The server builds it from a series snapshot plus the market-open flag; the
//! client decodes it with the same type.
use serde::{Deserialize, Serialize};

/// Full bounded price series with market status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketData {
    /// `"HH:MM"` labels in the server's reference time zone, oldest first.
    pub timestamps: Vec<String>,
    /// Prices index-aligned with `timestamps`.
    pub prices: Vec<i64>,
    /// Whether the simulated market is open right now.
    pub market_open: bool,
    /// Last committed price.
    pub current_price: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_field_names() {
        let data = MarketData {
            timestamps: vec!["17:00".into()],
            prices: vec![5000],
            market_open: true,
            current_price: 5000,
        };
        let value = serde_json::to_value(&data).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "timestamps": ["17:00"],
                "prices": [5000],
                "market_open": true,
                "current_price": 5000
            })
        );
    }
}
