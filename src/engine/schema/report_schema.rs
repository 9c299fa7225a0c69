use std::collections::HashSet;

use super::errors::SchemaError;
use super::types::{FieldDef, FieldKind};

/// Ordered field definitions of a report's record type.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSchema {
    fields: Vec<FieldDef>,
    date_index: usize,
}

impl ReportSchema {
    pub fn new(fields: Vec<FieldDef>) -> Result<Self, SchemaError> {
        if fields.is_empty() {
            return Err(SchemaError::EmptySchema);
        }

        let mut seen = HashSet::with_capacity(fields.len());
        for f in &fields {
            if !seen.insert(f.name.as_str()) {
                return Err(SchemaError::DuplicateField(f.name.clone()));
            }
        }

        let dates: Vec<usize> = fields
            .iter()
            .enumerate()
            .filter(|(_, f)| f.kind == FieldKind::Date)
            .map(|(i, _)| i)
            .collect();
        if dates.len() != 1 {
            return Err(SchemaError::DateFieldCount(dates.len()));
        }

        Ok(Self {
            date_index: dates[0],
            fields,
        })
    }

    /// Columns of the sales report page.
    pub fn sales_demo() -> Self {
        Self {
            fields: vec![
                FieldDef::dimension("state", "State"),
                FieldDef::dimension("category", "Category"),
                FieldDef::measure("totalSales", "Total Sales"),
                FieldDef::measure("orders", "Orders"),
                FieldDef::date("lastOrderDate", "Last Order Date"),
            ],
            date_index: 4,
        }
    }

    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn kind_of(&self, name: &str) -> Option<FieldKind> {
        self.field(name).map(|f| f.kind)
    }

    /// Display label, falling back to the raw name for unknown fields
    pub fn label<'a>(&'a self, name: &'a str) -> &'a str {
        self.field(name).map(|f| f.label.as_str()).unwrap_or(name)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    pub fn date_field(&self) -> &FieldDef {
        &self.fields[self.date_index]
    }

    pub fn measures(&self) -> impl Iterator<Item = &FieldDef> {
        self.fields.iter().filter(|f| f.kind == FieldKind::Measure)
    }

    pub fn groupable(&self) -> impl Iterator<Item = &FieldDef> {
        self.fields.iter().filter(|f| f.kind.is_groupable())
    }
}
