use serde::{Deserialize, Serialize};

/// One observed survey data point, as exported from the per-country brand
/// tables.
///
/// Field names follow the backend export (`brandName`), so a JSON dump of
/// the tables deserializes directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandRecord {
    /// Country code, e.g. `"SE"`.
    pub country: String,
    /// Raw brand label exactly as the source table spells it.
    #[serde(default)]
    pub brand_name: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub score: Option<f64>,
}

impl BrandRecord {
    #[must_use]
    pub fn new(
        country: impl Into<String>,
        brand_name: impl Into<String>,
        year: Option<i32>,
        score: Option<f64>,
    ) -> Self {
        Self {
            country: country.into(),
            brand_name: Some(brand_name.into()),
            year,
            score,
        }
    }

    /// Returns the raw brand label, or `None` when it is null or blank.
    #[must_use]
    pub fn brand_name(&self) -> Option<&str> {
        self.brand_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
    }

    /// Returns `true` if the record carries a score.
    #[must_use]
    pub fn has_score(&self) -> bool {
        self.score.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_backend_export_shape() {
        let json = r#"{"country":"SE","brandName":"IKEA","year":2024,"score":80.5}"#;
        let record: BrandRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.country, "SE");
        assert_eq!(record.brand_name(), Some("IKEA"));
        assert_eq!(record.year, Some(2024));
        assert_eq!(record.score, Some(80.5));
    }

    #[test]
    fn deserializes_nulls_and_missing_fields() {
        let json = r#"{"country":"NO","brandName":null,"score":null}"#;
        let record: BrandRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.brand_name(), None);
        assert_eq!(record.year, None);
        assert!(!record.has_score());
    }

    #[test]
    fn blank_brand_name_is_treated_as_absent() {
        let record = BrandRecord::new("DK", "   ", Some(2023), Some(1.0));
        assert_eq!(record.brand_name(), None);
    }

    #[test]
    fn serializes_with_camel_case_names() {
        let record = BrandRecord::new("FI", "Lego", Some(2022), None);
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["brandName"], "Lego");
        assert!(value["score"].is_null());
    }
}
