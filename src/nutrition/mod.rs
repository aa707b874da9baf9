pub mod loader;

use std::collections::HashMap;

use serde::ser::Serializer;
use serde::Serialize;

/// A single nutrient cell. `NotAvailable` is the "present in the table but
/// blank" sentinel and serializes as the string `"N/A"`, which is distinct
/// from the `null` a lookup miss produces.
#[derive(Debug, Clone, PartialEq)]
pub enum Nutrient {
    Value(f64),
    NotAvailable,
}

impl Serialize for Nutrient {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Nutrient::Value(v) => serializer.serialize_f64(*v),
            Nutrient::NotAvailable => serializer.serialize_str("N/A"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NutritionRecord {
    pub food_name: String,
    pub energy_kcal: Nutrient,
    pub protein_g: Nutrient,
    pub fat_g: Nutrient,
    pub carb_g: Nutrient,
}

/// In-memory nutrition facts, keyed by normalized food name. Built once at
/// startup and shared read-only across all requests.
pub struct NutritionTable {
    records: HashMap<String, NutritionRecord>,
}

impl NutritionTable {
    pub fn empty() -> Self {
        Self {
            records: HashMap::new(),
        }
    }

    pub fn from_records(records: impl IntoIterator<Item = NutritionRecord>) -> Self {
        let mut table = Self::empty();
        for record in records {
            table.insert(record);
        }
        table
    }

    /// Keys on the record's normalized food name; a duplicate name replaces
    /// the earlier row.
    pub fn insert(&mut self, mut record: NutritionRecord) {
        record.food_name = normalize(&record.food_name);
        self.records.insert(record.food_name.clone(), record);
    }

    /// Case- and whitespace-insensitive lookup by predicted label.
    pub fn lookup(&self, label: &str) -> Option<&NutritionRecord> {
        self.records.get(&normalize(label))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Join key between classifier labels and table rows.
pub fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}
