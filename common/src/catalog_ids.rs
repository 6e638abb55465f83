//! Identifier types for catalog entities.

use std::{fmt::Display, num::ParseIntError, str::FromStr};

use serde::{Deserialize, Serialize};

macro_rules! numeric_catalog_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                $name(value)
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse::<u64>().map($name)
            }
        }
    };
}

numeric_catalog_id!(
    /// Top level collection.
    CollectionId
);
numeric_catalog_id!(
    /// Sub-collection, owned by exactly one collection.
    SubCollectionId
);
numeric_catalog_id!(
    /// Survey, owned by exactly one sub-collection.
    SurveyId
);

/// Identifier of a row in the search results.
///
/// The search index hands these out as opaque strings.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowId(pub String);

impl From<&str> for RowId {
    fn from(value: &str) -> Self {
        RowId(value.to_string())
    }
}

impl Display for RowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An `{id, name}` pair as offered in a facet option list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedOption<I> {
    pub id: I,
    pub name: String,
}

impl<I> NamedOption<I> {
    pub fn new(id: I, name: impl Into<String>) -> Self {
        Self { id, name: name.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_parse_trimmed_decimal_strings() {
        assert_eq!(" 42 ".parse::<CollectionId>(), Ok(CollectionId(42)));
        assert!("4a".parse::<SurveyId>().is_err());
        assert!("".parse::<SubCollectionId>().is_err());
    }

    #[test]
    fn named_option_reads_backend_json() {
        let option: NamedOption<SurveyId> = serde_json::from_str(r#"{"id": 7, "name": "ESS 2008"}"#).unwrap();
        assert_eq!(option, NamedOption::new(SurveyId(7), "ESS 2008"));
    }
}
