use core::fmt;
use serde::{Deserialize, Serialize};

/// Card rank 1..=13. Higher wins within a suit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Rank(u8);

impl Rank {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 13;

    pub const fn new(value: u8) -> Option<Self> {
        if value >= Self::MIN && value <= Self::MAX {
            Some(Self(value))
        } else {
            None
        }
    }

    pub const fn value(self) -> u8 {
        self.0
    }

    pub fn all() -> impl Iterator<Item = Rank> {
        (Self::MIN..=Self::MAX).map(Rank)
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::Rank;

    #[test]
    fn rejects_out_of_range_values() {
        assert_eq!(Rank::new(0), None);
        assert_eq!(Rank::new(14), None);
        assert_eq!(Rank::new(13).map(Rank::value), Some(13));
    }

    #[test]
    fn displays_zero_padded() {
        assert_eq!(Rank::new(7).unwrap().to_string(), "07");
        assert_eq!(Rank::new(13).unwrap().to_string(), "13");
    }

    #[test]
    fn all_yields_thirteen_ascending() {
        let ranks: Vec<_> = Rank::all().collect();
        assert_eq!(ranks.len(), 13);
        assert!(ranks.windows(2).all(|w| w[0] < w[1]));
    }
}
