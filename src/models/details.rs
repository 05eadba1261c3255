// src/models/details.rs

use std::collections::BTreeMap;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::models::policy::PolicyType;

/// Flat type-specific fields submitted alongside the fixed policy columns.
/// Keys follow the legacy form grammar (`vehicle-0-vin`, `dwelling_limit`, ...)
/// and values are carried into the document verbatim.
pub type FormFields = BTreeMap<String, Value>;

pub const TOTAL_CUSTOMER_COST: &str = "total_customer_cost";

/// One vehicle on an auto policy. Fields missing from the submission are
/// stored as JSON null, mirroring what an empty form slot produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    #[serde(default)]
    pub year: Value,
    #[serde(default)]
    pub make: Value,
    #[serde(default)]
    pub model: Value,
    #[serde(default)]
    pub vin: Value,
    #[serde(default)]
    pub coverages: Vec<Coverage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coverage {
    #[serde(default)]
    pub name: Value,
    #[serde(default)]
    pub limit: Value,
    #[serde(default)]
    pub premium: Value,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoverageLine {
    #[serde(default)]
    pub limit: Value,
    #[serde(default)]
    pub premium: Value,
}

/// The six named homeowner coverage categories.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HomeCoverages {
    #[serde(default)]
    pub dwelling: CoverageLine,
    #[serde(default)]
    pub other_structures: CoverageLine,
    #[serde(default)]
    pub personal_property: CoverageLine,
    #[serde(default)]
    pub loss_of_use: CoverageLine,
    #[serde(default)]
    pub personal_liability: CoverageLine,
    #[serde(default)]
    pub medical_payments: CoverageLine,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HomeDetails {
    #[serde(default)]
    pub property_address: Value,
    #[serde(default)]
    pub year_built: Value,
    #[serde(default)]
    pub square_footage: Value,
    #[serde(default)]
    pub coverages: HomeCoverages,
    #[serde(default)]
    pub deductible: Value,
    #[serde(default)]
    pub wind_deductible: Value,
}

/// Typed view of the per-type details document. The persisted form is always
/// a JSON object so unknown or future policy types stay readable.
#[derive(Debug, Clone, PartialEq)]
pub enum PolicyDetails {
    Auto { vehicles: Vec<Vehicle> },
    Home(Box<HomeDetails>),
    Other(Map<String, Value>),
}

impl PolicyDetails {
    /// Tolerant decode of a stored document. Missing or malformed sections
    /// degrade to empty values; this never fails.
    pub fn from_document(policy_type: PolicyType, document: &Value) -> Self {
        match policy_type {
            PolicyType::Auto => {
                let vehicles = document
                    .get("vehicles")
                    .and_then(|v| serde_json::from_value(v.clone()).ok())
                    .unwrap_or_default();
                PolicyDetails::Auto { vehicles }
            }
            PolicyType::Home => match serde_json::from_value::<HomeDetails>(document.clone()) {
                Ok(home) => PolicyDetails::Home(Box::new(home)),
                Err(_) => PolicyDetails::Other(object_or_empty(document)),
            },
            PolicyType::Life | PolicyType::Health => {
                PolicyDetails::Other(object_or_empty(document))
            }
        }
    }

    pub fn to_document(&self) -> Value {
        match self {
            PolicyDetails::Auto { vehicles } => json!({ "vehicles": vehicles }),
            PolicyDetails::Home(home) => json!(home),
            PolicyDetails::Other(map) => Value::Object(map.clone()),
        }
    }

    /// Short human-readable summary for list/detail views.
    pub fn summary(&self) -> String {
        match self {
            PolicyDetails::Auto { vehicles } if vehicles.len() == 1 => "1 vehicle".to_string(),
            PolicyDetails::Auto { vehicles } => format!("{} vehicles", vehicles.len()),
            PolicyDetails::Home(home) => match home.property_address.as_str() {
                Some(addr) if !addr.is_empty() => addr.to_string(),
                _ => "homeowner property".to_string(),
            },
            PolicyDetails::Other(_) => String::new(),
        }
    }
}

/// Encode the type-specific submission fields into a details document.
/// Returns `None` for types without a type-specific shape (life, health).
pub fn encode_details(policy_type: PolicyType, fields: &FormFields) -> Option<Value> {
    match policy_type {
        PolicyType::Auto => Some(encode_auto_details(fields)),
        PolicyType::Home => Some(encode_home_details(fields)),
        PolicyType::Life | PolicyType::Health => None,
    }
}

/// Scan sequential vehicle slots starting at index 0, advancing while the
/// VIN field for that index is present. The first gap terminates the scan;
/// slots past it are ignored. Coverage slots per vehicle scan the same way
/// on their name field.
pub fn encode_auto_details(fields: &FormFields) -> Value {
    let mut vehicles = Vec::new();
    let mut i = 0;
    while fields.contains_key(&format!("vehicle-{i}-vin")) {
        let mut coverages = Vec::new();
        let mut j = 0;
        while fields.contains_key(&format!("vehicle-{i}-coverage-{j}-name")) {
            coverages.push(Coverage {
                name: field_value(fields, &format!("vehicle-{i}-coverage-{j}-name")),
                limit: field_value(fields, &format!("vehicle-{i}-coverage-{j}-limit")),
                premium: field_value(fields, &format!("vehicle-{i}-coverage-{j}-premium")),
            });
            j += 1;
        }
        vehicles.push(Vehicle {
            year: field_value(fields, &format!("vehicle-{i}-year")),
            make: field_value(fields, &format!("vehicle-{i}-make")),
            model: field_value(fields, &format!("vehicle-{i}-model")),
            vin: field_value(fields, &format!("vehicle-{i}-vin")),
            coverages,
        });
        i += 1;
    }
    PolicyDetails::Auto { vehicles }.to_document()
}

/// Homeowner submissions use a fixed set of named fields; anything else in
/// the submission is ignored.
pub fn encode_home_details(fields: &FormFields) -> Value {
    let line = |name: &str| CoverageLine {
        limit: field_value(fields, &format!("{name}_limit")),
        premium: field_value(fields, &format!("{name}_premium")),
    };
    let home = HomeDetails {
        property_address: field_value(fields, "property_address"),
        year_built: field_value(fields, "year_built"),
        square_footage: field_value(fields, "square_footage"),
        coverages: HomeCoverages {
            dwelling: line("dwelling"),
            other_structures: line("other_structures"),
            personal_property: line("personal_property"),
            loss_of_use: line("loss_of_use"),
            personal_liability: line("personal_liability"),
            medical_payments: line("medical_payments"),
        },
        deductible: field_value(fields, "deductible"),
        wind_deductible: field_value(fields, "wind_deductible"),
    };
    PolicyDetails::Home(Box::new(home)).to_document()
}

/// Merge the encoded update into an existing document, overwriting top-level
/// keys and leaving everything else in place. A malformed existing document
/// is coerced to an empty object first; the document is always an object
/// afterwards.
pub fn merge_into(details: &mut Value, update: Value) {
    if !details.is_object() {
        *details = Value::Object(Map::new());
    }
    let Value::Object(update) = update else {
        return;
    };
    if let Value::Object(target) = details {
        for (key, value) in update {
            target.insert(key, value);
        }
    }
}

/// Read `total_customer_cost` out of a details document. A non-object
/// document, an absent key, the null marker, an empty string, or a value
/// that does not parse as a decimal all yield `None`; this never fails.
pub fn total_customer_cost(details: &Value) -> Option<Decimal> {
    let raw = details.as_object()?.get(TOTAL_CUSTOMER_COST)?;
    parse_cost(raw)
}

/// Write `total_customer_cost` into a details document. `None` clears the
/// field by storing an explicit null marker (distinct from an absent key);
/// a value that parses as a decimal is stored as its canonical string so the
/// round-trip stays exact; anything else silently stores the null marker.
pub fn set_total_customer_cost(details: &mut Value, input: Option<&Value>) {
    if !details.is_object() {
        *details = Value::Object(Map::new());
    }
    let stored = match input.and_then(parse_cost) {
        Some(amount) => Value::String(amount.to_string()),
        None => Value::Null,
    };
    if let Value::Object(map) = details {
        map.insert(TOTAL_CUSTOMER_COST.to_string(), stored);
    }
}

fn parse_cost(raw: &Value) -> Option<Decimal> {
    match raw {
        Value::String(s) if !s.trim().is_empty() => Decimal::from_str(s.trim()).ok(),
        Value::Number(n) => Decimal::from_str(&n.to_string()).ok(),
        _ => None,
    }
}

fn field_value(fields: &FormFields, name: &str) -> Value {
    fields.get(name).cloned().unwrap_or(Value::Null)
}

fn object_or_empty(document: &Value) -> Map<String, Value> {
    document.as_object().cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> FormFields {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
            .collect()
    }

    #[test]
    fn auto_scan_stops_at_first_vehicle_gap() {
        let input = fields(&[
            ("vehicle-0-vin", "VIN0"),
            ("vehicle-0-year", "2020"),
            ("vehicle-1-vin", "VIN1"),
            // slot 2 is absent, slot 3 must not be picked up
            ("vehicle-3-vin", "VIN3"),
        ]);
        let doc = encode_auto_details(&input);
        let vehicles = doc["vehicles"].as_array().unwrap();
        assert_eq!(vehicles.len(), 2);
        assert_eq!(vehicles[0]["vin"], "VIN0");
        assert_eq!(vehicles[1]["vin"], "VIN1");
    }

    #[test]
    fn auto_coverages_scan_independently_and_stop_at_gap() {
        let input = fields(&[
            ("vehicle-0-vin", "VIN0"),
            ("vehicle-0-coverage-0-name", "liability"),
            ("vehicle-0-coverage-0-limit", "100000"),
            ("vehicle-0-coverage-0-premium", "300.00"),
            ("vehicle-0-coverage-1-name", "collision"),
            // coverage slot 2 absent, slot 3 ignored
            ("vehicle-0-coverage-3-name", "comprehensive"),
        ]);
        let doc = encode_auto_details(&input);
        let coverages = doc["vehicles"][0]["coverages"].as_array().unwrap();
        assert_eq!(coverages.len(), 2);
        assert_eq!(coverages[0]["name"], "liability");
        assert_eq!(coverages[1]["name"], "collision");
        // absent sub-fields encode as null, not as errors
        assert_eq!(coverages[1]["limit"], Value::Null);
        assert_eq!(coverages[1]["premium"], Value::Null);
    }

    #[test]
    fn auto_absent_vehicle_fields_encode_as_null() {
        let input = fields(&[("vehicle-0-vin", "VIN0")]);
        let doc = encode_auto_details(&input);
        let vehicle = &doc["vehicles"][0];
        assert_eq!(vehicle["vin"], "VIN0");
        assert_eq!(vehicle["year"], Value::Null);
        assert_eq!(vehicle["make"], Value::Null);
        assert_eq!(vehicle["model"], Value::Null);
    }

    #[test]
    fn home_reads_fixed_fields_and_ignores_the_rest() {
        let input = fields(&[
            ("property_address", "123 Main St"),
            ("year_built", "1990"),
            ("square_footage", "1800"),
            ("dwelling_limit", "250000"),
            ("dwelling_premium", "500.00"),
            ("deductible", "1000"),
            ("wind_deductible", "2000"),
            ("vehicle-0-vin", "should-be-ignored"),
            ("unrelated", "also-ignored"),
        ]);
        let doc = encode_home_details(&input);
        assert_eq!(doc["property_address"], "123 Main St");
        assert_eq!(doc["coverages"]["dwelling"]["limit"], "250000");
        assert_eq!(doc["coverages"]["dwelling"]["premium"], "500.00");
        // categories not in the submission come back as nulls
        assert_eq!(doc["coverages"]["loss_of_use"]["limit"], Value::Null);
        assert_eq!(doc["wind_deductible"], "2000");
        assert!(doc.get("unrelated").is_none());
        assert!(doc.get("vehicle-0-vin").is_none());
    }

    #[test]
    fn edit_merge_preserves_out_of_band_keys() {
        let mut details = json!({
            "property_address": "123 Main St",
            "total_customer_cost": "500.00",
        });
        let update = encode_home_details(&fields(&[("property_address", "456 New Ave")]));
        merge_into(&mut details, update);
        assert_eq!(details["property_address"], "456 New Ave");
        assert_eq!(details["total_customer_cost"], "500.00");
        assert_eq!(
            total_customer_cost(&details),
            Some(Decimal::from_str("500.00").unwrap())
        );
    }

    #[test]
    fn merge_coerces_malformed_document_to_object() {
        let mut details = json!("not an object");
        merge_into(&mut details, json!({ "vehicles": [] }));
        assert!(details.is_object());
        assert_eq!(details["vehicles"], json!([]));

        let mut null_details = Value::Null;
        merge_into(&mut null_details, json!({}));
        assert_eq!(null_details, json!({}));
    }

    #[test]
    fn customer_cost_round_trips_exactly() {
        let mut details = json!({});
        let input = json!("110.00");
        set_total_customer_cost(&mut details, Some(&input));
        assert_eq!(details[TOTAL_CUSTOMER_COST], "110.00");
        assert_eq!(
            total_customer_cost(&details),
            Some(Decimal::from_str("110.00").unwrap())
        );
    }

    #[test]
    fn customer_cost_accepts_numbers_and_stores_canonical_strings() {
        let mut details = json!({});
        set_total_customer_cost(&mut details, Some(&json!(660.5)));
        // stored as a string, never as a native float
        assert!(details[TOTAL_CUSTOMER_COST].is_string());
        assert_eq!(
            total_customer_cost(&details),
            Some(Decimal::from_str("660.5").unwrap())
        );
    }

    #[test]
    fn clearing_customer_cost_is_distinct_from_never_set() {
        let never_set = json!({});
        assert_eq!(total_customer_cost(&never_set), None);
        assert!(never_set.get(TOTAL_CUSTOMER_COST).is_none());

        let mut details = json!({});
        set_total_customer_cost(&mut details, Some(&json!("110.00")));
        set_total_customer_cost(&mut details, None);
        // reads back as "no value", but the null marker is present
        assert_eq!(total_customer_cost(&details), None);
        assert_eq!(details[TOTAL_CUSTOMER_COST], Value::Null);
    }

    #[test]
    fn invalid_customer_cost_degrades_to_no_value() {
        let mut details = json!({});
        set_total_customer_cost(&mut details, Some(&json!("abc")));
        assert_eq!(details[TOTAL_CUSTOMER_COST], Value::Null);
        assert_eq!(total_customer_cost(&details), None);

        // garbage already in the document reads as "no value" too
        let stored = json!({ "total_customer_cost": "not-a-number" });
        assert_eq!(total_customer_cost(&stored), None);
        let empty = json!({ "total_customer_cost": "" });
        assert_eq!(total_customer_cost(&empty), None);
    }

    #[test]
    fn customer_cost_tolerates_non_object_documents() {
        assert_eq!(total_customer_cost(&Value::Null), None);
        assert_eq!(total_customer_cost(&json!([1, 2])), None);

        let mut details = json!([1, 2]);
        set_total_customer_cost(&mut details, Some(&json!("42.00")));
        assert!(details.is_object());
        assert_eq!(
            total_customer_cost(&details),
            Some(Decimal::from_str("42.00").unwrap())
        );
    }

    #[test]
    fn decode_is_tolerant_of_missing_and_malformed_sections() {
        let auto = PolicyDetails::from_document(PolicyType::Auto, &json!({}));
        assert_eq!(auto, PolicyDetails::Auto { vehicles: vec![] });

        let auto_bad = PolicyDetails::from_document(PolicyType::Auto, &json!({ "vehicles": 7 }));
        assert_eq!(auto_bad, PolicyDetails::Auto { vehicles: vec![] });

        let home = PolicyDetails::from_document(
            PolicyType::Home,
            &json!({ "property_address": "123 Main St", "extra": true }),
        );
        match home {
            PolicyDetails::Home(h) => assert_eq!(h.property_address, "123 Main St"),
            other => panic!("expected home details, got {other:?}"),
        }

        let life = PolicyDetails::from_document(PolicyType::Life, &json!({ "rider": "term" }));
        match life {
            PolicyDetails::Other(map) => assert_eq!(map["rider"], "term"),
            other => panic!("expected raw mapping, got {other:?}"),
        }
    }

    #[test]
    fn encode_round_trips_through_the_typed_union() {
        let input = fields(&[
            ("vehicle-0-year", "2019"),
            ("vehicle-0-make", "Toyota"),
            ("vehicle-0-model", "Camry"),
            ("vehicle-0-vin", "4T1BF1FK5KU000001"),
            ("vehicle-0-coverage-0-name", "liability"),
            ("vehicle-0-coverage-0-limit", "100000"),
            ("vehicle-0-coverage-0-premium", "410.00"),
        ]);
        let doc = encode_auto_details(&input);
        let decoded = PolicyDetails::from_document(PolicyType::Auto, &doc);
        match &decoded {
            PolicyDetails::Auto { vehicles } => {
                assert_eq!(vehicles.len(), 1);
                assert_eq!(vehicles[0].make, "Toyota");
                assert_eq!(vehicles[0].coverages[0].premium, "410.00");
            }
            other => panic!("expected auto details, got {other:?}"),
        }
        assert_eq!(decoded.to_document(), doc);
        assert_eq!(decoded.summary(), "1 vehicle");
    }
}
