//! Listing queries: keyword filter, sort order and paging window.

use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

use crate::recipe::Recipe;

/// Which recipes a listing covers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RecipeFilter {
    /// Every stored recipe.
    #[default]
    All,
    /// Recipes whose name or description contains the keyword, ignoring case.
    Keyword(String),
}

impl RecipeFilter {
    /// Builds a filter from an optional keyword; empty keywords select everything.
    #[must_use]
    pub fn from_keyword(keyword: Option<&str>) -> Self {
        match keyword {
            Some(k) if !k.is_empty() => Self::Keyword(k.to_owned()),
            _ => Self::All,
        }
    }
}

/// Sort direction for listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// Interprets the signed sort indicator from the listing route.
    ///
    /// `-1` means descending; anything else (including unparseable input) is ascending.
    #[must_use]
    pub fn from_indicator(raw: &str) -> Self {
        if raw.trim().parse::<i64>() == Ok(-1) {
            Self::Descending
        } else {
            Self::Ascending
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ascending => write!(f, "asc"),
            Self::Descending => write!(f, "desc"),
        }
    }
}

/// A recipe field a listing can be ordered by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortField {
    Id,
    Author,
    Name,
    Description,
    Ingredients,
    /// A field recipes don't have. Every record compares equal, leaving natural order.
    Unknown(String),
}

impl SortField {
    /// Maps a field name from the route onto a known field.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "id" | "_id" => Self::Id,
            "author" => Self::Author,
            "name" => Self::Name,
            "description" => Self::Description,
            "ingredients" => Self::Ingredients,
            other => Self::Unknown(other.to_owned()),
        }
    }

    /// Compares two recipes on this field, ascending.
    #[must_use]
    pub fn compare(&self, a: &Recipe, b: &Recipe) -> Ordering {
        match self {
            Self::Id => a.id.cmp(&b.id),
            Self::Author => a.author.cmp(&b.author),
            Self::Name => a.name.cmp(&b.name),
            Self::Description => a.description.cmp(&b.description),
            Self::Ingredients => a.ingredients.cmp(&b.ingredients),
            Self::Unknown(_) => Ordering::Equal,
        }
    }
}

/// Field plus direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortSpec {
    #[must_use]
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Compares two recipes honouring the direction.
    #[must_use]
    pub fn compare(&self, a: &Recipe, b: &Recipe) -> Ordering {
        let ord = self.field.compare(a, b);
        match self.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    }
}

/// A full listing request as handed to the store.
///
/// `skip` and `limit` are passed through untouched; the store decides what
/// negative or zero values mean.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecipeQuery {
    pub filter: RecipeFilter,
    pub sort: Option<SortSpec>,
    pub skip: i64,
    pub limit: i64,
}

impl RecipeQuery {
    /// An unsorted, unpaged query over `filter`.
    #[must_use]
    pub fn new(filter: RecipeFilter) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn sorted(mut self, sort: SortSpec) -> Self {
        self.sort = Some(sort);
        self
    }

    #[must_use]
    pub fn paged(mut self, skip: i64, limit: i64) -> Self {
        self.skip = skip;
        self.limit = limit;
        self
    }
}

/// Response body shared by both listing operations.
///
/// `count` is the size of the filtered set, independent of the page.
#[derive(Debug, Clone, Serialize)]
pub struct RecipeList {
    pub count: u64,
    pub items: Vec<Recipe>,
}
