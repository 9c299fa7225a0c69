use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum SchemaError {
    /// Schema has no fields at all
    EmptySchema,

    /// Two fields share a name
    DuplicateField(String),

    /// Report schemas need exactly one date field for temporal filtering
    DateFieldCount(usize),
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaError::EmptySchema => write!(f, "Schema cannot be empty"),
            SchemaError::DuplicateField(name) => {
                write!(f, "Field '{}' is defined more than once", name)
            }
            SchemaError::DateFieldCount(n) => {
                write!(f, "Schema must have exactly one date field, found {}", n)
            }
        }
    }
}

impl std::error::Error for SchemaError {}
