//! Cash drawer denomination tally.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shinedesk_shared::config::CashConfig;

use super::error::CashError;

/// The face values a drawer count accepts, largest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DenominationSet {
    values: Vec<u32>,
}

impl DenominationSet {
    /// Builds a set from face values in any order; duplicates are merged.
    ///
    /// # Errors
    ///
    /// Returns `EmptyDenominationSet` for an empty list and
    /// `InvalidDenomination` if a face value is zero.
    pub fn new(values: impl IntoIterator<Item = u32>) -> Result<Self, CashError> {
        let mut values: Vec<u32> = values.into_iter().collect();
        if values.is_empty() {
            return Err(CashError::EmptyDenominationSet);
        }
        if values.contains(&0) {
            return Err(CashError::InvalidDenomination);
        }
        values.sort_unstable_by(|a, b| b.cmp(a));
        values.dedup();
        Ok(Self { values })
    }

    /// Builds the set configured for the branch.
    pub fn from_config(config: &CashConfig) -> Result<Self, CashError> {
        Self::new(config.denominations.iter().copied())
    }

    /// Face values, largest first.
    #[must_use]
    pub fn values(&self) -> &[u32] {
        &self.values
    }

    /// Returns true if the face value is accepted.
    #[must_use]
    pub fn contains(&self, denomination: u32) -> bool {
        self.position(denomination).is_some()
    }

    fn position(&self, denomination: u32) -> Option<usize> {
        self.values.iter().position(|&value| value == denomination)
    }
}

impl Default for DenominationSet {
    fn default() -> Self {
        let mut values = CashConfig::default().denominations;
        values.sort_unstable_by(|a, b| b.cmp(a));
        values.dedup();
        Self { values }
    }
}

impl<'de> Deserialize<'de> for DenominationSet {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let values = Vec::<u32>::deserialize(deserializer)?;
        Self::new(values).map_err(serde::de::Error::custom)
    }
}

/// One line of a drawer count, for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TallyLine {
    /// Face value.
    pub denomination: u32,
    /// Number of notes or coins.
    pub count: u64,
    /// `denomination * count`.
    pub subtotal: Decimal,
}

/// A physical count of the cash drawer.
///
/// Every face value of the set starts at zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DenominationCount {
    set: DenominationSet,
    counts: Vec<u64>,
}

impl DenominationCount {
    /// Creates an all-zero count over `set`.
    #[must_use]
    pub fn new(set: DenominationSet) -> Self {
        let counts = vec![0; set.values.len()];
        Self { set, counts }
    }

    /// Builds a count from `(denomination, count)` pairs.
    ///
    /// # Errors
    ///
    /// Fails on the first negative count or unknown face value.
    pub fn from_counts(
        set: DenominationSet,
        counts: impl IntoIterator<Item = (u32, i64)>,
    ) -> Result<Self, CashError> {
        let mut tally = Self::new(set);
        for (denomination, count) in counts {
            tally.set(denomination, count)?;
        }
        Ok(tally)
    }

    /// Sets the count of one face value.
    ///
    /// A rejected count leaves the tally unchanged.
    pub fn set(&mut self, denomination: u32, count: i64) -> Result<(), CashError> {
        let index = self
            .set
            .position(denomination)
            .ok_or(CashError::UnknownDenomination(denomination))?;
        let count = u64::try_from(count).map_err(|_| CashError::NegativeCount {
            denomination,
            count,
        })?;
        self.counts[index] = count;
        Ok(())
    }

    /// Count of one face value; zero when not set or unknown.
    #[must_use]
    pub fn count(&self, denomination: u32) -> u64 {
        self.set
            .position(denomination)
            .map_or(0, |index| self.counts[index])
    }

    /// The denomination set being counted.
    #[must_use]
    pub fn denominations(&self) -> &DenominationSet {
        &self.set
    }

    /// Σ denomination × count.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.lines().iter().map(|line| line.subtotal).sum()
    }

    /// One line per face value, largest first.
    #[must_use]
    pub fn lines(&self) -> Vec<TallyLine> {
        self.set
            .values
            .iter()
            .zip(&self.counts)
            .map(|(&denomination, &count)| TallyLine {
                denomination,
                count,
                subtotal: Decimal::from(denomination) * Decimal::from(count),
            })
            .collect()
    }
}
