use serde::{Deserialize, Serialize};

/// Ordered, duplicate-free list of fields to group by. Position defines
/// grouping precedence and label order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct GroupSpec {
    fields: Vec<String>,
}

impl GroupSpec {
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut spec = Self::default();
        for f in fields {
            spec.push(f);
        }
        spec
    }

    /// Appends a field; returns false if it was already present.
    pub fn push(&mut self, field: impl Into<String>) -> bool {
        let field = field.into();
        if self.contains(&field) {
            return false;
        }
        self.fields.push(field);
        true
    }

    pub fn remove(&mut self, field: &str) -> bool {
        let before = self.fields.len();
        self.fields.retain(|f| f != field);
        self.fields.len() != before
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.iter().any(|f| f == field)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.fields.iter()
    }

    pub fn retain(&mut self, keep: impl FnMut(&String) -> bool) {
        self.fields.retain(keep);
    }
}

impl From<Vec<String>> for GroupSpec {
    fn from(fields: Vec<String>) -> Self {
        Self::new(fields)
    }
}

impl From<GroupSpec> for Vec<String> {
    fn from(spec: GroupSpec) -> Self {
        spec.fields
    }
}
