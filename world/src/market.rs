//! Carbon market price and its bounded history.

use serde::{Deserialize, Serialize};

use crate::rules::MarketRules;

/// Current carbon price and the most recent prices, oldest first.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Market {
    /// Credits paid per unit of carbon.
    pub carbon_price: f64,
    /// Recent prices, oldest first.
    pub price_history: Vec<f64>,
}

impl Market {
    pub(crate) fn opening(rules: &MarketRules) -> Self {
        let mut market = Self {
            carbon_price: rules.starting_price,
            price_history: rules.starting_history.clone(),
        };
        market.normalise(rules);
        market
    }

    /// Moves the price by `delta`, clamps it and records it in the history.
    pub(crate) fn drift(&mut self, delta: f64, rules: &MarketRules) -> f64 {
        let moved = self.carbon_price + delta;
        self.carbon_price = clamp_price(moved, rules);
        self.price_history.push(self.carbon_price);
        self.evict_oldest(rules.history_len);
        self.carbon_price
    }

    pub(crate) fn normalise(&mut self, rules: &MarketRules) {
        self.carbon_price = clamp_price(self.carbon_price, rules);
        for price in &mut self.price_history {
            *price = clamp_price(*price, rules);
        }
        self.evict_oldest(rules.history_len);
    }

    fn evict_oldest(&mut self, limit: usize) {
        if self.price_history.len() > limit {
            let excess = self.price_history.len() - limit;
            let _ = self.price_history.drain(..excess);
        }
    }
}

fn clamp_price(price: f64, rules: &MarketRules) -> f64 {
    if price.is_nan() {
        return rules.min_price;
    }
    price.clamp(rules.min_price, rules.max_price)
}
