//! Motivational quotes attached to tasks at creation time.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::models::Priority;

const FALLBACK_QUOTE: &str = "Keep going!";

const LOW: &[&str] = &[
    "Take it easy, but get it done!",
    "Small steps lead to success.",
];

const MEDIUM: &[&str] = &[
    "Work with focus and the result will follow!",
    "Consistency is the key.",
];

const HIGH: &[&str] = &[
    "Make this a priority, you can do it!",
    "Don't put it off, chase the dream now!",
];

/// The pool a quote for `priority` is drawn from
pub fn quote_pool(priority: Priority) -> &'static [&'static str] {
    match priority {
        Priority::Low => LOW,
        Priority::Medium => MEDIUM,
        Priority::High => HIGH,
    }
}

/// Picks the quote for a newly created task.
///
/// Implementations must be `Send` because the registry they live in is
/// shared with the reminder scanner thread.
pub trait QuoteSource: Send {
    fn pick(&mut self, priority: Priority) -> String;
}

/// Uniform choice from the priority's pool
pub struct RandomQuotes<R = StdRng> {
    rng: R,
}

impl RandomQuotes<StdRng> {
    pub fn from_entropy() -> Self {
        Self { rng: StdRng::from_entropy() }
    }

    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomQuotes<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl Default for RandomQuotes<StdRng> {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl<R: Rng + Send> QuoteSource for RandomQuotes<R> {
    fn pick(&mut self, priority: Priority) -> String {
        quote_pool(priority)
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(FALLBACK_QUOTE)
            .to_string()
    }
}

/// Always returns the same text
#[derive(Debug, Clone)]
pub struct FixedQuote(pub String);

impl QuoteSource for FixedQuote {
    fn pick(&mut self, _priority: Priority) -> String {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_quote_comes_from_the_priority_pool() {
        let mut quotes = RandomQuotes::seeded(7);
        for priority in Priority::ALL {
            for _ in 0..20 {
                let quote = quotes.pick(priority);
                assert!(quote_pool(priority).contains(&quote.as_str()));
            }
        }
    }

    #[test]
    fn caller_supplied_rng_matches_seeded() {
        let mut a = RandomQuotes::with_rng(StdRng::seed_from_u64(9));
        let mut b = RandomQuotes::seeded(9);
        for priority in Priority::ALL {
            assert_eq!(a.pick(priority), b.pick(priority));
        }
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = RandomQuotes::seeded(42);
        let mut b = RandomQuotes::seeded(42);
        let left: Vec<_> = (0..10).map(|_| a.pick(Priority::High)).collect();
        let right: Vec<_> = (0..10).map(|_| b.pick(Priority::High)).collect();
        assert_eq!(left, right);
    }
}
