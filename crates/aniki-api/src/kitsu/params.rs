//! Kitsu request parameter types.

use std::fmt;
use std::num::NonZeroU64;
use std::str::FromStr;

use super::encoder::{EncodeQuery, EncodedQuery, FilterKey, QueryEncoder};
use super::enums::{AgeRating, Category, Season, Streamer};

/// Error returned when a range filter string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind} range {value:?}: expected {expected}")]
pub struct ParseRangeError {
    kind: &'static str,
    value: String,
    expected: &'static str,
}

/// Splits `"a..b"` / `"a.."` / `"a"` into its bounds.
fn split_range(s: &str) -> (&str, Option<&str>) {
    s.split_once("..")
        .map_or((s, None), |(start, end)| (start, Some(end)))
}

/// `filter[year]` value: a single year or a range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YearRange {
    /// Exactly this year (`2023`).
    Exact(u16),
    /// This year and later (`2020..`).
    From(u16),
    /// Inclusive range (`2018..2023`).
    Between(u16, u16),
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(year) => write!(f, "{year}"),
            Self::From(start) => write!(f, "{start}.."),
            Self::Between(start, end) => write!(f, "{start}..{end}"),
        }
    }
}

impl FromStr for YearRange {
    type Err = ParseRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseRangeError {
            kind: "year",
            value: String::from(s),
            expected: "YYYY, YYYY.. or YYYY..YYYY",
        };
        let (start, end) = split_range(s.trim());
        let start: u16 = start.parse().map_err(|_| err())?;
        match end {
            None => Ok(Self::Exact(start)),
            Some("") => Ok(Self::From(start)),
            Some(end) => Ok(Self::Between(start, end.parse().map_err(|_| err())?)),
        }
    }
}

/// `filter[averageRating]` value, in percent. Bounds may be fractional (`7.5..9`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RatingRange {
    /// This rating and above (`80..`).
    AtLeast(f64),
    /// Inclusive range (`70..90`).
    Between(f64, f64),
}

impl fmt::Display for RatingRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AtLeast(min) => write!(f, "{min}.."),
            Self::Between(min, max) => write!(f, "{min}..{max}"),
        }
    }
}

impl FromStr for RatingRange {
    type Err = ParseRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseRangeError {
            kind: "average rating",
            value: String::from(s),
            expected: "N.. or N..M",
        };
        let bound = |raw: &str| {
            raw.parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(err)
        };
        match split_range(s.trim()) {
            (min, Some("")) => Ok(Self::AtLeast(bound(min)?)),
            (min, Some(max)) => Ok(Self::Between(bound(min)?, bound(max)?)),
            (_, None) => Err(err()),
        }
    }
}

/// Identifier passed to lookup operations.
///
/// Accepts numbers and strings so that callers holding an id from user
/// input or a response body (`"id": "40052"`) can pass it directly;
/// validation happens before any request is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceId {
    /// Numeric id.
    Number(u64),
    /// Textual id, expected to hold decimal digits.
    Text(String),
}

impl ResourceId {
    /// Validates the id for the given operation label.
    ///
    /// # Errors
    ///
    /// Returns a diagnostic when the id is zero or empty, or not a number.
    pub fn validate(&self, operation: &str) -> Result<NonZeroU64, String> {
        let empty = || format!("`id` in {operation} is empty");
        match self {
            Self::Number(n) => NonZeroU64::new(*n).ok_or_else(empty),
            Self::Text(s) => {
                let s = s.trim();
                if s.is_empty() {
                    return Err(empty());
                }
                let n: u64 = s
                    .parse()
                    .map_err(|_| format!("`id` in {operation} is not a number"))?;
                NonZeroU64::new(n).ok_or_else(empty)
            }
        }
    }
}

impl From<u64> for ResourceId {
    fn from(id: u64) -> Self {
        Self::Number(id)
    }
}

impl From<NonZeroU64> for ResourceId {
    fn from(id: NonZeroU64) -> Self {
        Self::Number(id.get())
    }
}

impl From<&str> for ResourceId {
    fn from(id: &str) -> Self {
        Self::Text(String::from(id))
    }
}

impl From<String> for ResourceId {
    fn from(id: String) -> Self {
        Self::Text(id)
    }
}

/// Parameters for anime `find` and `list`.
///
/// `find` requires `query`; `list` sends it only when present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnimeParams {
    /// Free-text search (`filter[text]`).
    pub query: Option<String>,
    /// Pagination offset (default: 0).
    pub offset: Option<u32>,
    /// Page size (default: 10).
    pub per_page: Option<u32>,
    /// Average rating range.
    pub average_rating: Option<RatingRange>,
    /// Broadcast season.
    pub season: Option<Season>,
    /// Age ratings (empty = not filtered).
    pub age_ratings: Vec<AgeRating>,
    /// Release year or range.
    pub year: Option<YearRange>,
    /// Streaming platforms (empty = not filtered).
    pub streamers: Vec<Streamer>,
    /// Categories (empty = not filtered).
    pub categories: Vec<Category>,
}

impl AnimeParams {
    /// Creates parameters for a text search.
    #[must_use]
    pub fn search(query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
            ..Self::default()
        }
    }

    /// Sets the pagination offset.
    #[must_use]
    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Sets the page size.
    #[must_use]
    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    /// Sets the average rating range.
    #[must_use]
    pub fn average_rating(mut self, range: RatingRange) -> Self {
        self.average_rating = Some(range);
        self
    }

    /// Sets the season.
    #[must_use]
    pub fn season(mut self, season: Season) -> Self {
        self.season = Some(season);
        self
    }

    /// Sets the year or year range.
    #[must_use]
    pub fn year(mut self, year: YearRange) -> Self {
        self.year = Some(year);
        self
    }

    /// Adds one age rating.
    #[must_use]
    pub fn age_rating(mut self, rating: AgeRating) -> Self {
        self.age_ratings.push(rating);
        self
    }

    /// Adds one streaming platform.
    #[must_use]
    pub fn streamer(mut self, streamer: Streamer) -> Self {
        self.streamers.push(streamer);
        self
    }

    /// Adds one category.
    #[must_use]
    pub fn category(mut self, category: Category) -> Self {
        self.categories.push(category);
        self
    }

    /// Adds several categories, keeping their order.
    #[must_use]
    pub fn categories(mut self, categories: impl IntoIterator<Item = Category>) -> Self {
        self.categories.extend(categories);
        self
    }
}

impl EncodeQuery for AnimeParams {
    fn search_text(&self) -> Option<&str> {
        self.query.as_deref()
    }

    fn encode(&self) -> EncodedQuery {
        QueryEncoder::new()
            .text(self.search_text())
            .page(self.offset, self.per_page)
            .field(FilterKey::AverageRating, self.average_rating)
            .field(FilterKey::Season, self.season)
            .list(
                FilterKey::AgeRating,
                self.age_ratings.iter().map(|r| r.as_str()),
            )
            .field(FilterKey::Year, self.year)
            .list(
                FilterKey::Streamers,
                self.streamers.iter().map(|s| s.as_str()),
            )
            .list(
                FilterKey::Categories,
                self.categories.iter().map(|c| c.as_str()),
            )
            .finish()
    }
}

/// Parameters for manga `find` and `list`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MangaParams {
    /// Free-text search (`filter[text]`).
    pub query: Option<String>,
    /// Pagination offset (default: 0).
    pub offset: Option<u32>,
    /// Page size (default: 10).
    pub per_page: Option<u32>,
    /// Average rating range.
    pub average_rating: Option<RatingRange>,
    /// Season.
    pub season: Option<Season>,
    /// Publication year or range.
    pub year: Option<YearRange>,
    /// Categories (empty = not filtered).
    pub categories: Vec<Category>,
}

impl MangaParams {
    /// Creates parameters for a text search.
    #[must_use]
    pub fn search(query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
            ..Self::default()
        }
    }

    /// Sets the pagination offset.
    #[must_use]
    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Sets the page size.
    #[must_use]
    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    /// Sets the average rating range.
    #[must_use]
    pub fn average_rating(mut self, range: RatingRange) -> Self {
        self.average_rating = Some(range);
        self
    }

    /// Sets the season.
    #[must_use]
    pub fn season(mut self, season: Season) -> Self {
        self.season = Some(season);
        self
    }

    /// Sets the year or year range.
    #[must_use]
    pub fn year(mut self, year: YearRange) -> Self {
        self.year = Some(year);
        self
    }

    /// Adds one category.
    #[must_use]
    pub fn category(mut self, category: Category) -> Self {
        self.categories.push(category);
        self
    }

    /// Adds several categories, keeping their order.
    #[must_use]
    pub fn categories(mut self, categories: impl IntoIterator<Item = Category>) -> Self {
        self.categories.extend(categories);
        self
    }
}

impl EncodeQuery for MangaParams {
    fn search_text(&self) -> Option<&str> {
        self.query.as_deref()
    }

    fn encode(&self) -> EncodedQuery {
        QueryEncoder::new()
            .text(self.search_text())
            .page(self.offset, self.per_page)
            .field(FilterKey::AverageRating, self.average_rating)
            .field(FilterKey::Season, self.season)
            .field(FilterKey::Year, self.year)
            .list(
                FilterKey::Categories,
                self.categories.iter().map(|c| c.as_str()),
            )
            .finish()
    }
}
