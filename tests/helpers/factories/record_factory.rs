use crate::engine::types::{FieldValue, Record};
use chrono::{Duration, NaiveDate};
use rand::Rng;
use std::collections::HashMap;

pub const STATES: [&str; 6] = [
    "California",
    "Texas",
    "New York",
    "Florida",
    "Illinois",
    "Arizona",
];
pub const CATEGORIES: [&str; 6] = [
    "Electronics",
    "Apparel",
    "Home",
    "Beauty",
    "Sports",
    "Grocery",
];

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub struct RecordFactory {
    id: String,
    params: HashMap<String, FieldValue>,
}

impl RecordFactory {
    pub fn new() -> Self {
        let mut params = HashMap::new();
        params.insert("state".into(), FieldValue::from("Texas"));
        params.insert("category".into(), FieldValue::from("Home"));
        params.insert("totalSales".into(), FieldValue::Number(1000.0));
        params.insert("orders".into(), FieldValue::Number(10.0));
        params.insert("lastOrderDate".into(), FieldValue::Date(date(2024, 3, 1)));
        Self {
            id: "1".into(),
            params,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with(mut self, field: &str, value: impl Into<FieldValue>) -> Self {
        self.params.insert(field.to_string(), value.into());
        self
    }

    pub fn without(mut self, field: &str) -> Self {
        self.params.remove(field);
        self
    }

    pub fn create(self) -> Record {
        let mut record = Record::new(self.id);
        for (k, v) in self.params {
            record = record.with(&k, v);
        }
        record
    }

    /// Random rows in the shape of the sales report, dated within 120 days
    /// before `anchor`.
    pub fn create_list(self, count: usize, anchor: NaiveDate) -> Vec<Record> {
        let mut rng = rand::thread_rng();
        (0..count)
            .map(|i| {
                let total: f64 = rng.gen_range(10_000..130_000) as f64;
                let orders: f64 = rng.gen_range(30..930) as f64;
                let back: i64 = rng.gen_range(0..120);
                Record::new((i + 1).to_string())
                    .with("state", STATES[i % STATES.len()])
                    .with("category", CATEGORIES[i % CATEGORIES.len()])
                    .with("totalSales", total)
                    .with("orders", orders)
                    .with("lastOrderDate", anchor - Duration::days(back))
            })
            .collect()
    }

    /// Deterministic eight-row fixture.
    pub fn sales_fixture() -> Vec<Record> {
        let rows: [(&str, &str, f64, f64, NaiveDate); 8] = [
            ("Texas", "Home", 1200.0, 12.0, date(2024, 3, 1)),
            ("California", "Apparel", 800.0, 8.0, date(2024, 3, 10)),
            ("Texas", "Apparel", 450.0, 5.0, date(2024, 2, 20)),
            ("Florida", "Home", 3000.0, 30.0, date(2024, 1, 5)),
            ("California", "Home", 150.0, 2.0, date(2024, 3, 15)),
            ("Texas", "Home", 600.0, 6.0, date(2024, 3, 14)),
            ("Florida", "Beauty", 75.0, 1.0, date(2023, 12, 31)),
            ("California", "Apparel", 2200.0, 22.0, date(2024, 3, 16)),
        ];
        rows.iter()
            .enumerate()
            .map(|(i, (state, category, total, orders, day))| {
                Record::new((i + 1).to_string())
                    .with("state", *state)
                    .with("category", *category)
                    .with("totalSales", *total)
                    .with("orders", *orders)
                    .with("lastOrderDate", *day)
            })
            .collect()
    }
}
