#![allow(dead_code)]

use legends::model::{Calendar, TimeUnit, TimeUnitChain, Timestamp};
use proptest::prelude::*;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// Chains of 1 to 6 units with small positive numbers and occasional
/// instance names and overrides.
pub fn arb_chain() -> impl Strategy<Value = TimeUnitChain> {
    prop::collection::vec((1u32..=60, prop::bool::ANY), 1..=6).prop_map(|specs| {
        let mut chain: Option<TimeUnitChain> = None;
        for (level, (number, named)) in specs.into_iter().enumerate() {
            let mut unit = TimeUnit::new(format!("Unit{level}"), number);
            if named {
                unit = unit
                    .with_names([format!("First{level}"), format!("Second{level}")])
                    .with_custom_length(format!("First{level}"), number.max(2) - 1);
            }
            chain = Some(match chain {
                None => TimeUnitChain::new(unit),
                Some(mut existing) => {
                    existing.add_child(unit);
                    existing
                }
            });
        }
        chain.expect("at least one unit")
    })
}

/// Calendars over arbitrary chains with a small leap rule (freq 0 included).
pub fn arb_calendar() -> impl Strategy<Value = Calendar> {
    (arb_chain(), 0u32..=8, 0u32..=3)
        .prop_map(|(chain, freq, amount)| Calendar::new(chain, freq, amount))
}

/// Timestamps that stay within the earthlike calendar's shape.
pub fn arb_earthlike_timestamp() -> impl Strategy<Value = Timestamp> {
    (1i64..=28, 1i64..=12, -500i64..=500).prop_map(|(day, month, year)| Timestamp::new(day, month, year))
}
