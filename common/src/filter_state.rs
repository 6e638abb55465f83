//! Filter selection state and facet identifiers.

use std::{collections::BTreeSet, fmt::Display};

use serde::{Deserialize, Serialize};

use crate::catalog_ids::{CollectionId, RowId, SubCollectionId, SurveyId};

/// Where the free-text query is matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchLocation {
    Questions,
    Categories,
    VariableName,
    InternalLabel,
}

impl SearchLocation {
    pub const ALL: [SearchLocation; 4] = [
        SearchLocation::Questions,
        SearchLocation::Categories,
        SearchLocation::VariableName,
        SearchLocation::InternalLabel,
    ];

    /// Name used on the wire and in URLs.
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchLocation::Questions => "questions",
            SearchLocation::Categories => "categories",
            SearchLocation::VariableName => "variable_name",
            SearchLocation::InternalLabel => "internal_label",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|location| location.as_str() == s.trim())
    }

    pub fn label(&self) -> &'static str {
        match self {
            SearchLocation::Questions => "Questions",
            SearchLocation::Categories => "Categories",
            SearchLocation::VariableName => "Variable name",
            SearchLocation::InternalLabel => "Variable label",
        }
    }
}

/// One filter dimension a user can toggle values in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Facet {
    SearchLocation,
    Collections,
    SubCollections,
    Surveys,
    Years,
}

impl Facet {
    pub const ALL: [Facet; 5] = [
        Facet::SearchLocation,
        Facet::Collections,
        Facet::SubCollections,
        Facet::Surveys,
        Facet::Years,
    ];

    /// Repeated query-string key carrying this facet's members.
    pub fn url_key(&self) -> &'static str {
        match self {
            Facet::SearchLocation => "search_location",
            Facet::Collections => "collections",
            Facet::SubCollections => "sub_collections",
            Facet::Surveys => "survey",
            Facet::Years => "years",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Facet::SearchLocation => "Search in",
            Facet::Collections => "Collections",
            Facet::SubCollections => "Sub-collections",
            Facet::Surveys => "Surveys",
            Facet::Years => "Years",
        }
    }

    /// Collections, sub-collections and surveys narrow the data the children are resolved from.
    pub fn is_scope(&self) -> bool {
        matches!(self, Facet::Collections | Facet::SubCollections | Facet::Surveys)
    }

    /// Changing anything but the years invalidates the checked result rows.
    pub fn clears_row_selection(&self) -> bool {
        !matches!(self, Facet::Years)
    }
}

/// A typed member of one facet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FacetValue {
    SearchLocation(SearchLocation),
    Collection(CollectionId),
    SubCollection(SubCollectionId),
    Survey(SurveyId),
    Year(i32),
}

impl FacetValue {
    /// Parses a raw control value for `facet`. Returns `None` for values the facet cannot hold.
    pub fn parse(facet: Facet, raw: &str) -> Option<Self> {
        match facet {
            Facet::SearchLocation => SearchLocation::parse(raw).map(FacetValue::SearchLocation),
            Facet::Collections => raw.parse().ok().map(FacetValue::Collection),
            Facet::SubCollections => raw.parse().ok().map(FacetValue::SubCollection),
            Facet::Surveys => raw.parse().ok().map(FacetValue::Survey),
            Facet::Years => raw.trim().parse().ok().map(FacetValue::Year),
        }
    }

    pub fn facet(&self) -> Facet {
        match self {
            FacetValue::SearchLocation(_) => Facet::SearchLocation,
            FacetValue::Collection(_) => Facet::Collections,
            FacetValue::SubCollection(_) => Facet::SubCollections,
            FacetValue::Survey(_) => Facet::Surveys,
            FacetValue::Year(_) => Facet::Years,
        }
    }
}

impl Display for FacetValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FacetValue::SearchLocation(location) => write!(f, "{}", location.as_str()),
            FacetValue::Collection(id) => write!(f, "{id}"),
            FacetValue::SubCollection(id) => write!(f, "{id}"),
            FacetValue::Survey(id) => write!(f, "{id}"),
            FacetValue::Year(year) => write!(f, "{year}"),
        }
    }
}

/// The parent selections child facets are resolved against. Empty sets mean "everything".
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterScope {
    pub collections: BTreeSet<CollectionId>,
    pub sub_collections: BTreeSet<SubCollectionId>,
    pub surveys: BTreeSet<SurveyId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterState {
    pub query: String,
    pub search_location: BTreeSet<SearchLocation>,
    pub collections: BTreeSet<CollectionId>,
    pub sub_collections: BTreeSet<SubCollectionId>,
    pub surveys: BTreeSet<SurveyId>,
    pub years: BTreeSet<i32>,
    pub selected_rows: BTreeSet<RowId>,
}

impl FilterState {
    pub fn contains(&self, value: &FacetValue) -> bool {
        match value {
            FacetValue::SearchLocation(location) => self.search_location.contains(location),
            FacetValue::Collection(id) => self.collections.contains(id),
            FacetValue::SubCollection(id) => self.sub_collections.contains(id),
            FacetValue::Survey(id) => self.surveys.contains(id),
            FacetValue::Year(year) => self.years.contains(year),
        }
    }

    /// Adds `value` if absent, removes it if present. Returns whether it is now selected.
    pub fn toggle(&mut self, value: &FacetValue) -> bool {
        fn flip<T: Ord + Copy>(set: &mut BTreeSet<T>, item: T) -> bool {
            if set.remove(&item) {
                false
            } else {
                set.insert(item);
                true
            }
        }
        match *value {
            FacetValue::SearchLocation(location) => flip(&mut self.search_location, location),
            FacetValue::Collection(id) => flip(&mut self.collections, id),
            FacetValue::SubCollection(id) => flip(&mut self.sub_collections, id),
            FacetValue::Survey(id) => flip(&mut self.surveys, id),
            FacetValue::Year(year) => flip(&mut self.years, year),
        }
    }

    pub fn count(&self, facet: Facet) -> usize {
        match facet {
            Facet::SearchLocation => self.search_location.len(),
            Facet::Collections => self.collections.len(),
            Facet::SubCollections => self.sub_collections.len(),
            Facet::Surveys => self.surveys.len(),
            Facet::Years => self.years.len(),
        }
    }

    /// Every selected facet member, grouped by facet in [`Facet::ALL`] order.
    pub fn selected_values(&self) -> Vec<FacetValue> {
        let mut values = Vec::new();
        values.extend(self.search_location.iter().copied().map(FacetValue::SearchLocation));
        values.extend(self.collections.iter().copied().map(FacetValue::Collection));
        values.extend(self.sub_collections.iter().copied().map(FacetValue::SubCollection));
        values.extend(self.surveys.iter().copied().map(FacetValue::Survey));
        values.extend(self.years.iter().copied().map(FacetValue::Year));
        values
    }

    pub fn scope(&self) -> FilterScope {
        FilterScope {
            collections: self.collections.clone(),
            sub_collections: self.sub_collections.clone(),
            surveys: self.surveys.clone(),
        }
    }

    /// Drops the query, every facet selection and the checked rows.
    pub fn clear(&mut self) {
        *self = FilterState::default();
    }

    /// True when both states filter the same way, ignoring checked rows.
    pub fn same_filters(&self, other: &FilterState) -> bool {
        self.query == other.query
            && self.search_location == other.search_location
            && self.collections == other.collections
            && self.sub_collections == other.sub_collections
            && self.surveys == other.surveys
            && self.years == other.years
    }
}
