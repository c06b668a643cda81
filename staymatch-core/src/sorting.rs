use crate::models::Listing;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Secondary ordering applied within each promotion tier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    #[default]
    Relevance,
    PriceAsc,
    PriceDesc,
    Newest,
    RatingDesc,
    RatingAsc,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Relevance => "relevance",
            SortKey::PriceAsc => "priceAsc",
            SortKey::PriceDesc => "priceDesc",
            SortKey::Newest => "newest",
            SortKey::RatingDesc => "ratingDesc",
            SortKey::RatingAsc => "ratingAsc",
        }
    }

    /// Parse a sort key; unrecognized keys fall back to relevance
    pub fn parse(s: &str) -> Self {
        match s {
            "priceAsc" => SortKey::PriceAsc,
            "priceDesc" => SortKey::PriceDesc,
            "newest" => SortKey::Newest,
            "ratingDesc" => SortKey::RatingDesc,
            "ratingAsc" => SortKey::RatingAsc,
            _ => SortKey::Relevance,
        }
    }
}

impl FromStr for SortKey {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(SortKey::parse(s))
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort listings in place: promoted first, then by the sort key.
/// The sort is stable, so ties keep their input order.
pub fn sort_listings(listings: &mut [Listing], sort_key: SortKey) {
    listings.sort_by(|a, b| {
        // Promotion is the primary key regardless of sort key
        match b.is_promoted.cmp(&a.is_promoted) {
            Ordering::Equal => compare_by_key(a, b, sort_key),
            other => other,
        }
    });
}

/// Return a ranked copy of the listings
pub fn rank(listings: &[Listing], sort_key: SortKey) -> Vec<Listing> {
    let mut ranked = listings.to_vec();
    sort_listings(&mut ranked, sort_key);
    ranked
}

fn compare_by_key(a: &Listing, b: &Listing, sort_key: SortKey) -> Ordering {
    match sort_key {
        SortKey::PriceAsc => {
            let a_price = a.min_price.unwrap_or(f64::INFINITY);
            let b_price = b.min_price.unwrap_or(f64::INFINITY);
            a_price.total_cmp(&b_price)
        }
        SortKey::PriceDesc => {
            let a_price = a.min_price.unwrap_or(0.0);
            let b_price = b.min_price.unwrap_or(0.0);
            b_price.total_cmp(&a_price)
        }
        SortKey::Newest => {
            let a_date = a.published_date.unwrap_or(DateTime::<Utc>::UNIX_EPOCH);
            let b_date = b.published_date.unwrap_or(DateTime::<Utc>::UNIX_EPOCH);
            b_date.cmp(&a_date)
        }
        SortKey::RatingDesc => {
            let a_rating = a.avg_rating.unwrap_or(0.0);
            let b_rating = b.avg_rating.unwrap_or(0.0);
            b_rating.total_cmp(&a_rating)
        }
        SortKey::RatingAsc => {
            let a_rating = a.avg_rating.unwrap_or(0.0);
            let b_rating = b.avg_rating.unwrap_or(0.0);
            a_rating.total_cmp(&b_rating)
        }
        SortKey::Relevance => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn listing(value: serde_json::Value) -> Listing {
        let mut value = value;
        let id = value["id"].clone();
        value["title"] = id;
        serde_json::from_value(value).unwrap()
    }

    fn ids(listings: &[Listing]) -> Vec<&str> {
        listings.iter().map(|l| l.id.as_str()).collect()
    }

    #[test]
    fn test_promotion_beats_price() {
        let listings = vec![
            listing(json!({"id": "cheap", "is_promoted": false, "min_price": 10.0})),
            listing(json!({"id": "promoted", "is_promoted": true, "min_price": 50.0})),
        ];

        assert_eq!(ids(&rank(&listings, SortKey::PriceAsc)), vec!["promoted", "cheap"]);
    }

    #[test]
    fn test_price_ascending_missing_last() {
        let listings = vec![
            listing(json!({"id": "none"})),
            listing(json!({"id": "high", "min_price": 90.0})),
            listing(json!({"id": "low", "min_price": 15.0})),
        ];

        assert_eq!(ids(&rank(&listings, SortKey::PriceAsc)), vec!["low", "high", "none"]);
    }

    #[test]
    fn test_price_descending_missing_last() {
        let listings = vec![
            listing(json!({"id": "none"})),
            listing(json!({"id": "low", "min_price": 15.0})),
            listing(json!({"id": "high", "min_price": 90.0})),
        ];

        assert_eq!(ids(&rank(&listings, SortKey::PriceDesc)), vec!["high", "low", "none"]);
    }

    #[test]
    fn test_newest_first_missing_last() {
        let listings = vec![
            listing(json!({"id": "undated"})),
            listing(json!({"id": "old", "published_date": "2023-01-10T08:00:00Z"})),
            listing(json!({"id": "new", "published_date": "2024-03-02T08:00:00Z"})),
        ];

        assert_eq!(ids(&rank(&listings, SortKey::Newest)), vec!["new", "old", "undated"]);
    }

    #[test]
    fn test_rating_orders() {
        let listings = vec![
            listing(json!({"id": "mid", "avg_rating": 3.5})),
            listing(json!({"id": "unrated"})),
            listing(json!({"id": "top", "avg_rating": 4.9})),
        ];

        assert_eq!(
            ids(&rank(&listings, SortKey::RatingDesc)),
            vec!["top", "mid", "unrated"]
        );
        assert_eq!(
            ids(&rank(&listings, SortKey::RatingAsc)),
            vec!["unrated", "mid", "top"]
        );
    }

    #[test]
    fn test_relevance_keeps_input_order_within_tier() {
        let listings = vec![
            listing(json!({"id": "a", "min_price": 30.0})),
            listing(json!({"id": "b", "is_promoted": true})),
            listing(json!({"id": "c", "min_price": 10.0})),
            listing(json!({"id": "d", "is_promoted": true, "min_price": 5.0})),
        ];

        let first = rank(&listings, SortKey::Relevance);
        let second = rank(&listings, SortKey::Relevance);

        assert_eq!(ids(&first), vec!["b", "d", "a", "c"]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_ties_are_stable() {
        let listings = vec![
            listing(json!({"id": "first", "min_price": 20.0})),
            listing(json!({"id": "second", "min_price": 20.0})),
            listing(json!({"id": "third", "min_price": 20.0})),
        ];

        assert_eq!(
            ids(&rank(&listings, SortKey::PriceAsc)),
            vec!["first", "second", "third"]
        );
    }

    #[test]
    fn test_sort_key_parsing() {
        assert_eq!("priceAsc".parse::<SortKey>().unwrap(), SortKey::PriceAsc);
        assert_eq!(SortKey::parse("ratingAsc"), SortKey::RatingAsc);
        assert_eq!(SortKey::parse("cheapest"), SortKey::Relevance);
        assert_eq!(SortKey::Newest.to_string(), "newest");

        let key: SortKey = serde_json::from_value(json!("priceDesc")).unwrap();
        assert_eq!(key, SortKey::PriceDesc);
    }
}
