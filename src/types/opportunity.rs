//! Opportunity types supplied by the detection feed

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyType {
    Arbitrage,
    Liquidation,
    Sandwich,
}

impl StrategyType {
    pub const ALL: [StrategyType; 3] = [
        StrategyType::Arbitrage,
        StrategyType::Liquidation,
        StrategyType::Sandwich,
    ];
}

impl fmt::Display for StrategyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StrategyType::Arbitrage => "arbitrage",
            StrategyType::Liquidation => "liquidation",
            StrategyType::Sandwich => "sandwich",
        };
        f.write_str(name)
    }
}

/// Raw opportunity as delivered by the detection feed. Required fields are
/// optional here so malformed records reach the validator instead of failing
/// deserialization.
#[derive(Debug, Clone, Default, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Opportunity {
    pub strategy_type: Option<StrategyType>,
    pub buy_price: Option<Decimal>,
    pub sell_price: Option<Decimal>,
    pub volume: Option<Decimal>,
    pub primary_venue: Option<String>,
    pub secondary_venue: Option<String>,
    pub token_pair_id: Option<String>,
    pub detection_timestamp: Option<DateTime<Utc>>,
}

impl Opportunity {
    pub fn new(
        strategy_type: StrategyType,
        buy_price: Decimal,
        sell_price: Decimal,
        volume: Decimal,
        primary_venue: impl Into<String>,
    ) -> Self {
        Self {
            strategy_type: Some(strategy_type),
            buy_price: Some(buy_price),
            sell_price: Some(sell_price),
            volume: Some(volume),
            primary_venue: Some(primary_venue.into()),
            ..Default::default()
        }
    }

    pub fn with_secondary_venue(mut self, venue: impl Into<String>) -> Self {
        self.secondary_venue = Some(venue.into());
        self
    }

    pub fn with_token_pair(mut self, token_pair_id: impl Into<String>) -> Self {
        self.token_pair_id = Some(token_pair_id.into());
        self
    }

    pub fn with_detection_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.detection_timestamp = Some(timestamp);
        self
    }
}

/// Borrowed view over an opportunity that passed validation. Cost modules,
/// risk modules and the simulator only accept this type.
#[derive(Debug, Clone, Copy)]
pub struct ValidOpportunity<'a> {
    pub strategy: StrategyType,
    pub buy_price: Decimal,
    pub sell_price: Decimal,
    pub volume: Decimal,
    pub primary_venue: &'a str,
    /// Falls back to the primary venue for single-venue strategies.
    pub secondary_venue: &'a str,
    pub token_pair_id: Option<&'a str>,
    pub detection_timestamp: Option<DateTime<Utc>>,
}

impl ValidOpportunity<'_> {
    pub fn price_spread(&self) -> Decimal {
        self.sell_price - self.buy_price
    }

    /// Venues traded, one entry per leg.
    pub fn legs(&self) -> [&str; 2] {
        match self.strategy {
            // front-run and back-run both settle on the victim's venue
            StrategyType::Sandwich => [self.primary_venue, self.primary_venue],
            StrategyType::Arbitrage | StrategyType::Liquidation => {
                [self.primary_venue, self.secondary_venue]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn empty_json_deserializes_to_empty_opportunity() {
        let opp: Opportunity = serde_json::from_str("{}").unwrap();
        assert_eq!(opp, Opportunity::default());
    }

    #[test]
    fn camel_case_fields_deserialize() {
        let opp: Opportunity = serde_json::from_str(
            r#"{"strategyType":"sandwich","buyPrice":"100","sellPrice":"101.5","volume":"250","primaryVenue":"uniswap"}"#,
        )
        .unwrap();
        assert_eq!(opp.strategy_type, Some(StrategyType::Sandwich));
        assert_eq!(opp.sell_price, Some(dec!(101.5)));
        assert_eq!(opp.primary_venue.as_deref(), Some("uniswap"));
    }

    #[test]
    fn sandwich_legs_stay_on_primary_venue() {
        let view = ValidOpportunity {
            strategy: StrategyType::Sandwich,
            buy_price: dec!(1),
            sell_price: dec!(2),
            volume: dec!(10),
            primary_venue: "uniswap",
            secondary_venue: "sushiswap",
            token_pair_id: None,
            detection_timestamp: None,
        };
        assert_eq!(view.legs(), ["uniswap", "uniswap"]);
    }
}
