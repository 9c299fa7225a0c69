use serde::{Deserialize, Serialize};

/// Role a field plays in a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Categorical/text attribute, filtered by membership and groupable
    Dimension,
    /// Numeric attribute, filtered by range and aggregatable
    Measure,
    /// The single date attribute used for temporal filtering
    Date,
}

impl FieldKind {
    pub fn is_groupable(&self) -> bool {
        matches!(self, FieldKind::Dimension | FieldKind::Date)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind,
        }
    }

    pub fn dimension(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldKind::Dimension)
    }

    pub fn measure(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldKind::Measure)
    }

    pub fn date(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldKind::Date)
    }
}
