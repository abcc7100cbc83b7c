//! Property-based tests for boundary token normalisation.

use pricer_core::types::{BarrierType, OptionType, Position, PricingError, TokenKind};
use proptest::prelude::*;

/// Tokens that are not any recognised spelling.
fn junk_token() -> impl Strategy<Value = String> {
    "[a-z]{6,12}".prop_filter("must not be a known token", |s| {
        !matches!(
            s.as_str(),
            "downin" | "downout" | "upandout" | "upandin" | "downandin" | "downandout"
        )
    })
}

/// Random ASCII case of a token.
fn random_case(token: &'static str) -> impl Strategy<Value = String> {
    proptest::collection::vec(any::<bool>(), token.len()).prop_map(move |upper| {
        token
            .chars()
            .zip(upper)
            .map(|(c, u)| if u { c.to_ascii_uppercase() } else { c })
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn test_option_type_case_insensitive(token in random_case("call")) {
        prop_assert_eq!(OptionType::from_token(&token), OptionType::Call);
        prop_assert_eq!(token.parse::<OptionType>(), Ok(OptionType::Call));
    }

    #[test]
    fn test_unknown_option_type_falls_through_to_put(token in junk_token()) {
        prop_assert_eq!(OptionType::from_token(&token), OptionType::Put);
        let strict = token.parse::<OptionType>();
        prop_assert_eq!(
            strict,
            Err(PricingError::UnknownToken { kind: TokenKind::OptionType, token: token.clone() })
        );
    }

    #[test]
    fn test_unknown_position_is_long(token in junk_token()) {
        prop_assert_eq!(Position::from_token(&token), Position::Long);
        prop_assert!(token.parse::<Position>().is_err());
    }

    #[test]
    fn test_short_case_insensitive(token in random_case("short")) {
        prop_assert_eq!(Position::from_token(&token), Position::Short);
    }

    #[test]
    fn test_unknown_barrier_is_none(token in junk_token()) {
        prop_assert_eq!(BarrierType::from_token(&token), BarrierType::None);
        prop_assert!(token.parse::<BarrierType>().is_err());
    }

    #[test]
    fn test_barrier_case_insensitive(token in random_case("downin")) {
        prop_assert_eq!(token.parse::<BarrierType>(), Ok(BarrierType::DownIn));
    }

    #[test]
    fn test_activity_is_complementary(spot in 1.0f64..200.0, level in 1.0f64..200.0) {
        prop_assert_ne!(
            BarrierType::UpOut.is_active(spot, level),
            BarrierType::UpIn.is_active(spot, level)
        );
        prop_assert_ne!(
            BarrierType::DownOut.is_active(spot, level),
            BarrierType::DownIn.is_active(spot, level)
        );
        prop_assert!(BarrierType::None.is_active(spot, level));
    }
}
