//! Food catalog items
//!
//! The matching core consumes items, it does not own them: the engine
//! only ever needs `id` and `category`. The display attributes exist so
//! the boundary can enrich match listings for clients.

use crate::ids::ItemId;
use crate::session::Category;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A catalog entry: a recipe, a delivery dish, or a venue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodItem {
    pub id: ItemId,
    pub name: String,
    pub description: String,
    pub category: Category,
    pub image: String,
    pub rating: String,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cook_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
}

impl FoodItem {
    /// Tag-filter predicate used when selecting a session's candidate set.
    ///
    /// An empty filter set matches everything; otherwise any filter that
    /// is a case-insensitive substring of any tag matches.
    pub fn matches_filters(&self, filters: &BTreeSet<String>) -> bool {
        if filters.is_empty() {
            return true;
        }
        filters.iter().any(|filter| {
            let filter = filter.to_lowercase();
            self.tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(&filter))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(tags: &[&str]) -> FoodItem {
        FoodItem {
            id: ItemId::from("pasta-1"),
            name: "Creamy Tuscan Pasta".to_string(),
            description: "Creamy pasta with sun-dried tomatoes".to_string(),
            category: Category::Cooking,
            image: "https://example.com/pasta.jpg".to_string(),
            rating: "4.8".to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            cook_time: Some("25 min".to_string()),
            delivery_time: None,
            distance: None,
            price: None,
        }
    }

    #[test]
    fn test_empty_filters_match_everything() {
        assert!(item(&["Italian"]).matches_filters(&BTreeSet::new()));
    }

    #[test]
    fn test_filter_case_insensitive_substring() {
        let filters: BTreeSet<String> = ["ital".to_string()].into();
        assert!(item(&["Italian", "Vegetarian"]).matches_filters(&filters));
    }

    #[test]
    fn test_filter_no_match() {
        let filters: BTreeSet<String> = ["thai".to_string()].into();
        assert!(!item(&["Italian"]).matches_filters(&filters));
    }

    #[test]
    fn test_optional_fields_skipped_in_json() {
        let json = serde_json::to_string(&item(&["Italian"])).unwrap();
        assert!(json.contains("cook_time"));
        assert!(!json.contains("delivery_time"));
    }
}
