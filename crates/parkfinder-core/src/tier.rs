//! Availability tiers used to color facility markers.

use serde::{Deserialize, Serialize};

/// Ratio of free to total spaces at or above which a facility is green.
pub const GREEN_THRESHOLD: f64 = 0.5;
/// Ratio at or above which a facility is orange (below this it is red).
pub const ORANGE_THRESHOLD: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// The top-ranked facility of a result set.
    Best,
    Green,
    Orange,
    Red,
}

/// Marker asset for a tier: path, pixel size, and the anchor point that sits
/// on the coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconSpec {
    pub url: &'static str,
    pub size: (u32, u32),
    pub anchor: (u32, u32),
}

impl Tier {
    #[must_use]
    pub fn color(self) -> &'static str {
        match self {
            Tier::Best => "blue",
            Tier::Green => "green",
            Tier::Orange => "orange",
            Tier::Red => "red",
        }
    }

    #[must_use]
    pub fn icon(self) -> IconSpec {
        match self {
            Tier::Best => IconSpec {
                url: "/static/markers/marker-icon-blue.png",
                size: (30, 50),
                anchor: (15, 50),
            },
            Tier::Green => IconSpec {
                url: "/static/markers/marker-icon-green.png",
                size: (25, 41),
                anchor: (12, 41),
            },
            Tier::Orange => IconSpec {
                url: "/static/markers/marker-icon-orange.png",
                size: (25, 41),
                anchor: (12, 41),
            },
            Tier::Red => IconSpec {
                url: "/static/markers/marker-icon-red.png",
                size: (25, 41),
                anchor: (12, 41),
            },
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tier::Best => write!(f, "best"),
            Tier::Green => write!(f, "green"),
            Tier::Orange => write!(f, "orange"),
            Tier::Red => write!(f, "red"),
        }
    }
}

/// Classifies a facility by its free/total ratio.
///
/// A facility with zero capacity has nothing to offer and is classified
/// [`Tier::Red`]. Never returns [`Tier::Best`]; see [`display_tier`].
#[must_use]
pub fn classify(free_spaces: u32, capacity: u32) -> Tier {
    if capacity == 0 {
        return Tier::Red;
    }
    let ratio = f64::from(free_spaces) / f64::from(capacity);
    if ratio >= GREEN_THRESHOLD {
        Tier::Green
    } else if ratio >= ORANGE_THRESHOLD {
        Tier::Orange
    } else {
        Tier::Red
    }
}

/// Tier shown for the facility at `rank` in an already ordered result set.
///
/// Rank 0 is always [`Tier::Best`], whatever its ratio.
#[must_use]
pub fn display_tier(rank: usize, free_spaces: u32, capacity: u32) -> Tier {
    if rank == 0 {
        Tier::Best
    } else {
        classify(free_spaces, capacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_free_is_green() {
        assert_eq!(classify(50, 100), Tier::Green);
        assert_eq!(classify(100, 100), Tier::Green);
    }

    #[test]
    fn between_thresholds_is_orange() {
        assert_eq!(classify(20, 100), Tier::Orange);
        assert_eq!(classify(49, 100), Tier::Orange);
    }

    #[test]
    fn below_orange_threshold_is_red() {
        assert_eq!(classify(19, 100), Tier::Red);
        assert_eq!(classify(0, 100), Tier::Red);
    }

    #[test]
    fn zero_capacity_is_red() {
        assert_eq!(classify(0, 0), Tier::Red);
        assert_eq!(classify(5, 0), Tier::Red);
    }

    #[test]
    fn overfull_free_count_is_still_green() {
        assert_eq!(classify(30, 20), Tier::Green);
    }

    #[test]
    fn ratio_boundaries_hold_across_capacities() {
        for capacity in [5_u32, 10, 20, 37, 250, 1000] {
            for free in 0..=capacity {
                let ratio = f64::from(free) / f64::from(capacity);
                let expected = if ratio >= 0.5 {
                    Tier::Green
                } else if ratio >= 0.2 {
                    Tier::Orange
                } else {
                    Tier::Red
                };
                for rank in 1..4 {
                    assert_eq!(
                        display_tier(rank, free, capacity),
                        expected,
                        "free={free} capacity={capacity} rank={rank}"
                    );
                }
            }
        }
    }

    #[test]
    fn rank_zero_is_always_best() {
        assert_eq!(display_tier(0, 0, 100), Tier::Best);
        assert_eq!(display_tier(0, 100, 100), Tier::Best);
        assert_eq!(display_tier(0, 0, 0), Tier::Best);
    }

    #[test]
    fn scenario_best_then_red() {
        let tiers: Vec<Tier> = [(10, 20), (1, 10)]
            .iter()
            .enumerate()
            .map(|(rank, &(free, capacity))| display_tier(rank, free, capacity))
            .collect();
        assert_eq!(tiers, vec![Tier::Best, Tier::Red]);
    }

    #[test]
    fn best_icon_is_larger() {
        assert_eq!(Tier::Best.icon().size, (30, 50));
        assert_eq!(Tier::Red.icon().size, (25, 41));
        assert_eq!(Tier::Best.color(), "blue");
    }
}
