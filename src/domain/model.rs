use serde::{Deserialize, Serialize};

/// Placeholder stored when a product carries no ingredient statement.
pub const INGREDIENTS_PLACEHOLDER: &str = "Not available";

/// One product as returned inside the `foods` array of a search page.
///
/// Every field is optional; anything else the API sends is ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawFood {
    pub description: Option<String>,
    pub brand_owner: Option<String>,
    pub ingredients: Option<String>,
}

/// Body of a single search response. A missing `foods` array is treated the
/// same as an empty one.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub foods: Option<Vec<RawFood>>,
    pub total_hits: Option<u64>,
}

impl SearchResponse {
    pub fn into_foods(self) -> Vec<RawFood> {
        self.foods.unwrap_or_default()
    }
}

/// The three fields kept for each product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodRecord {
    pub food_name: String,
    pub brand: String,
    pub ingredients: String,
}

impl From<RawFood> for FoodRecord {
    fn from(raw: RawFood) -> Self {
        let ingredients = match raw.ingredients.as_deref() {
            None | Some("") => INGREDIENTS_PLACEHOLDER.to_string(),
            Some(value) => value.trim().to_string(),
        };

        Self {
            food_name: trimmed_or_empty(raw.description),
            brand: trimmed_or_empty(raw.brand_owner),
            ingredients,
        }
    }
}

fn trimmed_or_empty(value: Option<String>) -> String {
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}

/// Search parameters for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParams {
    pub query: String,
    pub data_type: String,
    pub page_size: usize,
    pub max_pages: usize,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            query: "*".to_string(),
            data_type: "Branded".to_string(),
            page_size: 25,
            max_pages: 2000,
        }
    }
}

/// Result of the single upload attempt of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    Uploaded { key: String, count: usize },
    Failed { reason: String },
}

impl UploadOutcome {
    pub fn is_uploaded(&self) -> bool {
        matches!(self, UploadOutcome::Uploaded { .. })
    }
}

/// What a run produced, for the caller to print.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub records_fetched: usize,
    /// `None` when nothing was fetched and the upload was skipped.
    pub upload: Option<UploadOutcome>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(description: Option<&str>, brand: Option<&str>, ingredients: Option<&str>) -> RawFood {
        RawFood {
            description: description.map(str::to_string),
            brand_owner: brand.map(str::to_string),
            ingredients: ingredients.map(str::to_string),
        }
    }

    #[test]
    fn test_projection_with_missing_fields() {
        let record = FoodRecord::from(raw(Some("Chips"), None, None));
        assert_eq!(
            record,
            FoodRecord {
                food_name: "Chips".to_string(),
                brand: String::new(),
                ingredients: "Not available".to_string(),
            }
        );
    }

    #[test]
    fn test_projection_trims_values() {
        let record = FoodRecord::from(raw(
            Some("  Oat Milk "),
            Some("\tAcme Foods\n"),
            Some(" WATER, OATS. "),
        ));
        assert_eq!(record.food_name, "Oat Milk");
        assert_eq!(record.brand, "Acme Foods");
        assert_eq!(record.ingredients, "WATER, OATS.");
    }

    #[test]
    fn test_empty_ingredients_use_placeholder() {
        let record = FoodRecord::from(raw(Some("Salt"), Some("Brand"), Some("")));
        assert_eq!(record.ingredients, INGREDIENTS_PLACEHOLDER);

        // whitespace is a present value and trims down to nothing
        let record = FoodRecord::from(raw(Some("Salt"), Some("Brand"), Some("   ")));
        assert_eq!(record.ingredients, "");
    }

    #[test]
    fn test_deserialize_null_and_unknown_fields() {
        let page: SearchResponse = serde_json::from_value(serde_json::json!({
            "totalHits": 2,
            "foods": [
                {"fdcId": 1, "description": "Chips", "brandOwner": null},
                {"fdcId": 2, "dataType": "Branded"}
            ]
        }))
        .unwrap();

        assert_eq!(page.total_hits, Some(2));
        let foods = page.into_foods();
        assert_eq!(foods.len(), 2);
        assert_eq!(foods[0].description.as_deref(), Some("Chips"));
        assert_eq!(foods[0].brand_owner, None);
        assert_eq!(foods[1], RawFood::default());
    }

    #[test]
    fn test_missing_foods_is_empty() {
        let page: SearchResponse = serde_json::from_str("{}").unwrap();
        assert!(page.into_foods().is_empty());
    }

    #[test]
    fn test_record_serializes_with_camel_case_names() {
        let record = FoodRecord::from(raw(Some("Chips"), Some("Acme"), None));
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "foodName": "Chips",
                "brand": "Acme",
                "ingredients": "Not available"
            })
        );
    }
}
