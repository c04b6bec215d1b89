use crate::error::AdvisorError;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawProductQuery")]
pub struct ProductQuery {
    name: String,
    #[serde(default)]
    description: String,
}

#[derive(Deserialize)]
struct RawProductQuery {
    name: String,
    #[serde(default)]
    description: String,
}

impl TryFrom<RawProductQuery> for ProductQuery {
    type Error = AdvisorError;

    fn try_from(raw: RawProductQuery) -> Result<Self, Self::Error> {
        ProductQuery::new(raw.name, raw.description)
    }
}

impl ProductQuery {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Result<Self, AdvisorError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(AdvisorError::InputInvalid(
                "Please enter a product name to proceed.".to_string(),
            ));
        }

        Ok(Self {
            name,
            description: description.into().trim().to_string(),
        })
    }

    pub fn named(name: impl Into<String>) -> Result<Self, AdvisorError> {
        Self::new(name, String::new())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn has_description(&self) -> bool {
        !self.description.is_empty()
    }
}

/// Six-digit HS (Harmonized System) subheading.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CategoryCode(String);

impl CategoryCode {
    pub const LENGTH: usize = 6;
    /// Toothbrush subheading, used when nothing else is configured.
    pub const FALLBACK: &'static str = "960321";

    pub fn fallback() -> Self {
        Self(Self::FALLBACK.to_string())
    }

    pub fn parse(raw: &str) -> Option<Self> {
        if raw.len() == Self::LENGTH && raw.bytes().all(|b| b.is_ascii_digit()) {
            Some(Self(raw.to_string()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CategoryCode {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        CategoryCode::parse(&value)
            .ok_or_else(|| format!("'{}' is not a 6-digit category code", value))
    }
}

impl From<CategoryCode> for String {
    fn from(code: CategoryCode) -> Self {
        code.0
    }
}

impl fmt::Display for CategoryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
