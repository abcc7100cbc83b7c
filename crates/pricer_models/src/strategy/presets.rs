//! Structured product presets.

use std::fmt;
use std::str::FromStr;

use pricer_core::types::PricingError;

use super::leg::{Leg, Strategy};

/// Distance between adjacent strikes of a preset.
pub const STRIKE_SPACING: f64 = 10.0;

/// Common multi-leg vanilla structures built around a centre strike.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StructuredProduct {
    /// Long call and long put at K
    Straddle,
    /// Long put at K-10 and long call at K+10
    Strangle,
    /// Long call at K, short call at K+10
    BullCall,
    /// Long put at K, short put at K-10
    BearPut,
    /// Long put K-20, short put K-10, short call K+10, long call K+20
    IronCondor,
}

impl StructuredProduct {
    /// All presets.
    pub const ALL: [StructuredProduct; 5] = [
        StructuredProduct::Straddle,
        StructuredProduct::Strangle,
        StructuredProduct::BullCall,
        StructuredProduct::BearPut,
        StructuredProduct::IronCondor,
    ];

    /// Token used on the command line.
    pub fn name(self) -> &'static str {
        match self {
            StructuredProduct::Straddle => "straddle",
            StructuredProduct::Strangle => "strangle",
            StructuredProduct::BullCall => "bull_call",
            StructuredProduct::BearPut => "bear_put",
            StructuredProduct::IronCondor => "iron_condor",
        }
    }

    /// Quantity-one legs of the preset around `strike`.
    pub fn legs(self, strike: f64) -> Vec<Leg> {
        let w = STRIKE_SPACING;
        match self {
            StructuredProduct::Straddle => vec![Leg::call(strike), Leg::put(strike)],
            StructuredProduct::Strangle => vec![Leg::put(strike - w), Leg::call(strike + w)],
            StructuredProduct::BullCall => vec![Leg::call(strike), Leg::call(strike + w).short()],
            StructuredProduct::BearPut => vec![Leg::put(strike), Leg::put(strike - w).short()],
            StructuredProduct::IronCondor => vec![
                Leg::put(strike - 2.0 * w),
                Leg::put(strike - w).short(),
                Leg::call(strike + w).short(),
                Leg::call(strike + 2.0 * w),
            ],
        }
    }

    /// The preset as a strategy.
    pub fn strategy(self, strike: f64) -> Strategy {
        Strategy::new(self.legs(strike))
    }
}

impl FromStr for StructuredProduct {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised = s.trim().replace('-', "_").to_ascii_lowercase();
        StructuredProduct::ALL
            .into_iter()
            .find(|p| p.name() == normalised || p.name().replace('_', "") == normalised)
            .ok_or_else(|| PricingError::InvalidInput(format!("unknown structured product '{}'", s)))
    }
}

impl fmt::Display for StructuredProduct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricer_core::types::{OptionType, Position};

    fn shape(legs: &[Leg]) -> Vec<(OptionType, Position, f64)> {
        legs.iter().map(|l| (l.option_type, l.position, l.strike)).collect()
    }

    #[test]
    fn test_straddle() {
        let legs = StructuredProduct::Straddle.legs(100.0);
        assert_eq!(
            shape(&legs),
            vec![(OptionType::Call, Position::Long, 100.0), (OptionType::Put, Position::Long, 100.0)]
        );
    }

    #[test]
    fn test_strangle() {
        let legs = StructuredProduct::Strangle.legs(100.0);
        assert_eq!(
            shape(&legs),
            vec![(OptionType::Put, Position::Long, 90.0), (OptionType::Call, Position::Long, 110.0)]
        );
    }

    #[test]
    fn test_spreads() {
        assert_eq!(
            shape(&StructuredProduct::BullCall.legs(100.0)),
            vec![(OptionType::Call, Position::Long, 100.0), (OptionType::Call, Position::Short, 110.0)]
        );
        assert_eq!(
            shape(&StructuredProduct::BearPut.legs(100.0)),
            vec![(OptionType::Put, Position::Long, 100.0), (OptionType::Put, Position::Short, 90.0)]
        );
    }

    #[test]
    fn test_iron_condor() {
        let legs = StructuredProduct::IronCondor.legs(50.0);
        assert_eq!(
            shape(&legs),
            vec![
                (OptionType::Put, Position::Long, 30.0),
                (OptionType::Put, Position::Short, 40.0),
                (OptionType::Call, Position::Short, 60.0),
                (OptionType::Call, Position::Long, 70.0),
            ]
        );
    }

    #[test]
    fn test_presets_are_unit_vanilla() {
        for preset in StructuredProduct::ALL {
            for leg in preset.legs(100.0) {
                assert_eq!(leg.quantity, 1.0);
                assert!(!leg.barrier_type.is_barrier());
            }
        }
    }

    #[test]
    fn test_parse() {
        for preset in StructuredProduct::ALL {
            assert_eq!(preset.name().parse::<StructuredProduct>().unwrap(), preset);
        }
        assert_eq!("Iron-Condor".parse::<StructuredProduct>().unwrap(), StructuredProduct::IronCondor);
        assert_eq!("bullcall".parse::<StructuredProduct>().unwrap(), StructuredProduct::BullCall);
        assert!("butterfly".parse::<StructuredProduct>().is_err());
    }
}
