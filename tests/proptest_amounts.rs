//! Property-Based Tests — Operator Input and Read Models
//!
//! Uses `proptest` to check that amount parsing, scaling and certificate
//! filtering hold across random inputs.

use alloy::primitives::U256;
use proptest::prelude::*;

use metadefender_console::domain::CertificateInfo;
use metadefender_console::domain::amount::{
    format_tokens, parse_number, parse_token_amount, parse_whole_days, whole_tokens,
};
use metadefender_console::domain::position::valid_certificates;

fn ten_pow(exp: u32) -> U256 {
    U256::from(10u64).pow(U256::from(exp))
}

// ── Amount Scaling ──────────────────────────────────────────

proptest! {
    /// Whole token amounts scale by exactly 10^18 and format back unchanged.
    #[test]
    fn whole_amounts_scale_and_format(n in 0u64..1_000_000_000_000) {
        let units = parse_token_amount("amount", &n.to_string()).unwrap();
        prop_assert_eq!(units, whole_tokens(n));
        prop_assert_eq!(format_tokens(units), n.to_string());
    }

    /// Fractional digits land in the right base-unit positions.
    #[test]
    fn fractional_amounts_scale_exactly(
        whole in 0u64..1_000_000,
        frac in 1u64..1_000_000,
        digits in 6u32..=9,
    ) {
        let raw = format!("{}.{:0width$}", whole, frac, width = digits as usize);
        let units = parse_token_amount("amount", &raw).unwrap();
        let expected = whole_tokens(whole) + U256::from(frac) * ten_pow(18 - digits);
        prop_assert_eq!(units, expected);
    }

    /// Surrounding whitespace never changes the parsed value.
    #[test]
    fn whitespace_is_ignored(n in 0u64..1_000_000, pad in "[ \t]{0,4}") {
        let padded = format!("{}{}{}", pad, n, pad);
        prop_assert_eq!(
            parse_number("amount", &padded).unwrap(),
            parse_number("amount", &n.to_string()).unwrap()
        );
    }
}

// ── Rejections ──────────────────────────────────────────────

proptest! {
    /// Negative numbers are rejected.
    #[test]
    fn negative_numbers_rejected(n in 1u64..1_000_000) {
        let raw = format!("-{}", n);
        prop_assert!(parse_number("amount", &raw).is_err());
    }

    /// Letters are never numbers.
    #[test]
    fn words_rejected(word in "[g-zG-Z]{1,12}") {
        prop_assert!(parse_number("coverage", &word).is_err());
        prop_assert!(parse_token_amount("coverage", &word).is_err());
    }

    /// Durations must be whole days.
    #[test]
    fn half_days_rejected(days in 0u64..10_000) {
        let half_day = format!("{}.5", days);
        prop_assert!(parse_whole_days("duration", &half_day).is_err());
        prop_assert_eq!(
            parse_whole_days("duration", &days.to_string()).unwrap(),
            U256::from(days)
        );
    }
}

// ── Certificate Filtering ───────────────────────────────────

proptest! {
    /// Filtering keeps exactly the valid certificates, in ledger order.
    #[test]
    fn valid_certificates_keep_order(flags in prop::collection::vec(any::<bool>(), 0..32)) {
        let certificates: Vec<CertificateInfo> = flags
            .iter()
            .enumerate()
            .map(|(i, &is_valid)| CertificateInfo {
                id: U256::from(i),
                liquidity: U256::ZERO,
                entered_epoch: U256::ZERO,
                exited_epoch: U256::ZERO,
                reward_debt: U256::ZERO,
                is_valid,
            })
            .collect();

        let kept = valid_certificates(&certificates);
        let expected: Vec<U256> = flags
            .iter()
            .enumerate()
            .filter(|(_, valid)| **valid)
            .map(|(i, _)| U256::from(i))
            .collect();
        prop_assert_eq!(kept, expected);
    }
}
