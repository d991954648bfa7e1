use std::cmp::Ordering;
use std::fmt;

use serde::{Serialize, Serializer};

pub mod collaborative;
pub mod content;
pub mod context;
pub mod hybrid;

pub const DEFAULT_CONTENT_TOP_N: usize = 5;
pub const DEFAULT_COLLABORATIVE_TOP_N: usize = 5;
pub const DEFAULT_HYBRID_TOP_N: usize = 10;

/// Placeholder entries standing in for "no result".
///
/// They travel through merge, dedup and truncation like any restaurant entry, so callers
/// must inspect the list content to detect a lookup miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sentinel {
    RestaurantNotFound,
    NoRatingsForUser,
}

impl Sentinel {
    pub fn message(&self) -> &'static str {
        match self {
            Sentinel::RestaurantNotFound => "Restaurant not found",
            Sentinel::NoRatingsForUser => "No ratings found for this user",
        }
    }
}

impl fmt::Display for Sentinel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Recommendation {
    Restaurant { name: String, city: String },
    Sentinel(Sentinel),
}

impl Recommendation {
    pub fn restaurant(name: impl Into<String>, city: impl Into<String>) -> Self {
        Recommendation::Restaurant {
            name: name.into(),
            city: city.into(),
        }
    }

    pub fn is_sentinel(&self) -> bool {
        matches!(self, Recommendation::Sentinel(_))
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recommendation::Restaurant { name, city } => write!(f, "{} ({})", name, city),
            Recommendation::Sentinel(sentinel) => fmt::Display::fmt(sentinel, f),
        }
    }
}

// Restaurants serialize as `{"name", "city"}` objects, sentinels as their bare message.
impl Serialize for Recommendation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct NameAndCity<'a> {
            name: &'a str,
            city: &'a str,
        }

        match self {
            Recommendation::Restaurant { name, city } => NameAndCity { name, city }.serialize(serializer),
            Recommendation::Sentinel(sentinel) => serializer.serialize_str(sentinel.message()),
        }
    }
}

/// A restaurant row with its similarity to the queried restaurant.
#[derive(PartialEq, Debug)]
pub struct RestaurantScore {
    pub row: usize,
    pub score: f64,
}

impl RestaurantScore {
    pub fn new(row: usize, score: f64) -> Self {
        RestaurantScore { row, score }
    }
}

impl Eq for RestaurantScore {}

impl Ord for RestaurantScore {
    fn cmp(&self, other: &Self) -> Ordering {
        // reverse order by score, so that sorting yields the most similar first
        match self.score.partial_cmp(&other.score) {
            Some(Ordering::Less) => Ordering::Greater,
            Some(Ordering::Greater) => Ordering::Less,
            _ => Ordering::Equal,
        }
    }
}

impl PartialOrd for RestaurantScore {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
