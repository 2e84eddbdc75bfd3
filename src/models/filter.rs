//! Property filters and ordering for model lookups.

use std::fmt;

use serde_json::Value as JsonValue;

/// Property name every list orders by unless told otherwise.
pub const DEFAULT_ORDER_PROPERTY: &str = "name";

/// Conjunction of property equality conditions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: Vec<(String, JsonValue)>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lookup by unique name.
    pub fn name(name: impl Into<String>) -> Self {
        Self::new().eq("name", name.into())
    }

    /// Lookup by node identifier.
    pub fn node_id(node_id: impl Into<String>) -> Self {
        Self::new().eq("node_id", node_id.into())
    }

    /// Adds `property = value`.
    pub fn eq(mut self, property: &str, value: impl Into<JsonValue>) -> Self {
        self.conditions.push((property.to_string(), value.into()));
        self
    }

    pub fn conditions(&self) -> &[(String, JsonValue)] {
        &self.conditions
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.conditions.is_empty() {
            return f.write_str("(any)");
        }
        let parts: Vec<String> = self
            .conditions
            .iter()
            .map(|(property, value)| format!("{} = {}", property, value))
            .collect();
        f.write_str(&parts.join(", "))
    }
}

/// Sort key parsed from `name` (ascending) or `-name` (descending).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub property: String,
    pub descending: bool,
}

impl OrderBy {
    /// Parses a sort key such as `-name`. A key without a property falls
    /// back to [`OrderBy::default`].
    pub fn parse(key: &str) -> Self {
        let key = key.trim();
        let (property, descending) = match key.strip_prefix('-') {
            Some(rest) => (rest, true),
            None => (key, false),
        };
        if property.is_empty() {
            return Self::default();
        }
        Self {
            property: property.to_string(),
            descending,
        }
    }
}

impl Default for OrderBy {
    /// `-name`.
    fn default() -> Self {
        Self {
            property: DEFAULT_ORDER_PROPERTY.to_string(),
            descending: true,
        }
    }
}
