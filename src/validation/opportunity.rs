//! Opportunity validation: required fields and economic sanity

use rust_decimal::Decimal;
use crate::{
    config::MAX_VOLUME,
    errors::{EngineError, EngineResult},
    types::{Opportunity, ValidOpportunity},
};

/// Checks required fields and economic sanity, returning the view every
/// downstream stage works from. Profit is `(sell - buy) * volume` for all
/// strategies, so every strategy needs `buy_price < sell_price`.
pub fn validate_opportunity(opp: &Opportunity) -> EngineResult<ValidOpportunity<'_>> {
    let primary_venue = opp
        .primary_venue
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty());

    let mut missing = Vec::new();
    if opp.strategy_type.is_none() {
        missing.push("strategy_type");
    }
    if opp.buy_price.is_none() {
        missing.push("buy_price");
    }
    if opp.sell_price.is_none() {
        missing.push("sell_price");
    }
    if opp.volume.is_none() {
        missing.push("volume");
    }
    if primary_venue.is_none() {
        missing.push("primary_venue");
    }

    let (Some(strategy), Some(buy_price), Some(sell_price), Some(volume), Some(primary_venue)) = (
        opp.strategy_type,
        opp.buy_price,
        opp.sell_price,
        opp.volume,
        primary_venue,
    ) else {
        return Err(EngineError::MissingField { fields: missing });
    };

    if buy_price.is_zero() {
        return Err(EngineError::numeric(
            "base profit percentage",
            "buy price is zero",
        ));
    }
    if buy_price < Decimal::ZERO || sell_price <= Decimal::ZERO {
        return Err(EngineError::EconomicInvariant {
            reason: format!("prices must be positive (buy {buy_price}, sell {sell_price})"),
        });
    }
    if volume < Decimal::ZERO {
        return Err(EngineError::EconomicInvariant {
            reason: format!("volume must not be negative ({volume})"),
        });
    }
    if volume > MAX_VOLUME {
        return Err(EngineError::EconomicInvariant {
            reason: format!("volume {volume} exceeds the supported maximum of {MAX_VOLUME}"),
        });
    }
    if buy_price >= sell_price {
        return Err(EngineError::EconomicInvariant {
            reason: format!(
                "{strategy} requires buy price {buy_price} below sell price {sell_price}"
            ),
        });
    }

    let secondary_venue = opp
        .secondary_venue
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(primary_venue);

    Ok(ValidOpportunity {
        strategy,
        buy_price,
        sell_price,
        volume,
        primary_venue,
        secondary_venue,
        token_pair_id: opp.token_pair_id.as_deref(),
        detection_timestamp: opp.detection_timestamp,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StrategyType;
    use rust_decimal_macros::dec;

    fn arbitrage(buy: Decimal, sell: Decimal) -> Opportunity {
        Opportunity::new(StrategyType::Arbitrage, buy, sell, dec!(1000), "uniswap")
    }

    #[test]
    fn empty_opportunity_reports_every_missing_field() {
        let err = validate_opportunity(&Opportunity::default()).unwrap_err();
        assert_eq!(
            err,
            EngineError::MissingField {
                fields: vec!["strategy_type", "buy_price", "sell_price", "volume", "primary_venue"],
            }
        );
    }

    #[test]
    fn blank_primary_venue_counts_as_missing() {
        let mut opp = arbitrage(dec!(100), dec!(110));
        opp.primary_venue = Some("  ".to_string());
        assert_eq!(
            validate_opportunity(&opp).unwrap_err(),
            EngineError::MissingField { fields: vec!["primary_venue"] }
        );
    }

    #[test]
    fn inverted_prices_violate_economic_invariant() {
        for (buy, sell) in [(dec!(105), dec!(100)), (dec!(100), dec!(100))] {
            assert!(matches!(
                validate_opportunity(&arbitrage(buy, sell)),
                Err(EngineError::EconomicInvariant { .. })
            ));
        }
    }

    #[test]
    fn zero_buy_price_is_numeric_degeneracy() {
        assert!(matches!(
            validate_opportunity(&arbitrage(dec!(0), dec!(1))),
            Err(EngineError::NumericDegeneracy { .. })
        ));
    }

    #[test]
    fn negative_volume_is_rejected() {
        let mut opp = arbitrage(dec!(100), dec!(110));
        opp.volume = Some(dec!(-1));
        assert!(matches!(
            validate_opportunity(&opp),
            Err(EngineError::EconomicInvariant { .. })
        ));
    }

    #[test]
    fn volume_is_capped_at_supported_maximum() {
        let mut opp = arbitrage(dec!(100), dec!(110));
        opp.volume = Some(MAX_VOLUME);
        assert!(validate_opportunity(&opp).is_ok());

        opp.volume = Some(MAX_VOLUME + dec!(1));
        assert!(matches!(
            validate_opportunity(&opp),
            Err(EngineError::EconomicInvariant { .. })
        ));
    }

    #[test]
    fn secondary_venue_defaults_to_primary() {
        let opp = arbitrage(dec!(100), dec!(110));
        let valid = validate_opportunity(&opp).unwrap();
        assert_eq!(valid.secondary_venue, "uniswap");

        let opp = opp.with_secondary_venue("sushiswap");
        assert_eq!(validate_opportunity(&opp).unwrap().secondary_venue, "sushiswap");
    }
}
