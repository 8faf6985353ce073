//! Deterministic backfill of listing attributes the search API does not expose.
//!
//! The shopping endpoint carries no delivery-fee, discount or option-price
//! data. The simulator draws these from a fixed probability model using a
//! seeded RNG, so the same seed over the same listing order always yields the
//! same values. Every field it writes is flagged as simulated.

use rand::prelude::*;
use rand::rngs::StdRng;

use crate::config::{MAX_DISCOUNT_RATE, PAID_DELIVERY_FEE, PAID_DELIVERY_PROBABILITY};
use crate::models::{Backfilled, FeeFlag, PriceBand, ShoppingItem};

/// What to do when a listing already carries authentic data for a field the
/// model would otherwise synthesize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SimulationPolicy {
    /// Apply the model to every listing unconditionally.
    #[default]
    Always,
    /// Use the observed `[low_price, high_price]` as the option band when the
    /// listing has a valid high price. Random draws are still consumed for
    /// every listing so the other simulated fields match `Always`.
    PreferObserved,
}

/// Seeded attribute simulator.
#[derive(Debug, Clone, Copy)]
pub struct Simulator {
    seed: u64,
    policy: SimulationPolicy,
}

impl Simulator {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            policy: SimulationPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: SimulationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn policy(&self) -> SimulationPolicy {
        self.policy
    }

    /// Backfill delivery fee, discount rate, original price and option band.
    ///
    /// Draws happen in two passes over the listings (all delivery flags, then
    /// all discount rates), so the output depends only on the seed and the
    /// order of `items`. Observed fields are never touched.
    pub fn augment(&self, mut items: Vec<ShoppingItem>) -> Vec<ShoppingItem> {
        let mut rng = StdRng::seed_from_u64(self.seed);

        let flags: Vec<FeeFlag> = items.iter().map(|_| draw_fee_flag(&mut rng)).collect();
        let discounts: Vec<u32> = items
            .iter()
            .map(|_| rng.gen_range(0..MAX_DISCOUNT_RATE))
            .collect();

        for ((item, flag), discount) in items.iter_mut().zip(flags).zip(discounts) {
            let amount = match flag {
                FeeFlag::Paid => PAID_DELIVERY_FEE,
                FeeFlag::Free => 0,
            };
            item.delivery_fee_flag = Some(Backfilled::simulated(flag));
            item.delivery_fee_amount = Some(Backfilled::simulated(amount));
            item.discount_rate = Some(Backfilled::simulated(discount));
            item.original_price = item
                .low_price
                .map(|low| Backfilled::simulated(original_price(low, discount)));
            let observed_high = item.high_price;
            item.option_price_band = item.low_price.map(|low| match (self.policy, observed_high) {
                (SimulationPolicy::PreferObserved, Some(high)) if high > 0 && high >= low => {
                    Backfilled::observed(PriceBand { low, high })
                }
                _ => Backfilled::simulated(option_band(low)),
            });
        }

        items
    }
}

/// Convenience wrapper: augment with the default policy.
pub fn augment(items: Vec<ShoppingItem>, seed: u64) -> Vec<ShoppingItem> {
    Simulator::new(seed).augment(items)
}

fn draw_fee_flag(rng: &mut StdRng) -> FeeFlag {
    if rng.gen::<f64>() < PAID_DELIVERY_PROBABILITY {
        FeeFlag::Paid
    } else {
        FeeFlag::Free
    }
}

/// List price before discount: `round(low / (1 - rate/100))`, saturating at
/// `i64::MAX`.
pub fn original_price(low_price: i64, discount_rate: u32) -> i64 {
    let keep = 1.0 - f64::from(discount_rate) / 100.0;
    // float -> int casts saturate
    (low_price as f64 / keep).round() as i64
}

/// Option-price band `[0.9 x low, 1.5 x low]`, truncated to whole units and
/// saturating at `i64::MAX`.
pub fn option_band(low_price: i64) -> PriceBand {
    let scale = |num: i128, den: i128| {
        let scaled = i128::from(low_price) * num / den;
        i64::try_from(scaled).unwrap_or(if scaled < 0 { i64::MIN } else { i64::MAX })
    };
    PriceBand {
        low: scale(9, 10),
        high: scale(3, 2),
    }
}
