//! JSON:API query string encoding.
//!
//! Maps sparse parameter records to `filter[...]` / `page[...]` pairs.
//! Only present fields are emitted; pagination always is, with defaults.

use std::fmt;

use url::form_urlencoded;

/// Default `page[offset]`.
pub const DEFAULT_OFFSET: u32 = 0;

/// Default `page[limit]`.
pub const DEFAULT_LIMIT: u32 = 10;

/// Logical filter name and its fixed external key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKey {
    /// Free-text search.
    Text,
    /// Pagination offset.
    Offset,
    /// Pagination page size.
    Limit,
    /// Average rating range.
    AverageRating,
    /// Season.
    Season,
    /// Age rating set.
    AgeRating,
    /// Year or year range.
    Year,
    /// Streaming platform set.
    Streamers,
    /// Category set.
    Categories,
}

impl FilterKey {
    /// Every key, in encoding order.
    pub const ALL: [Self; 9] = [
        Self::Text,
        Self::Offset,
        Self::Limit,
        Self::AverageRating,
        Self::Season,
        Self::AgeRating,
        Self::Year,
        Self::Streamers,
        Self::Categories,
    ];

    /// Returns the query string key expected by the API.
    #[must_use]
    pub const fn as_key(self) -> &'static str {
        match self {
            Self::Text => "filter[text]",
            Self::Offset => "page[offset]",
            Self::Limit => "page[limit]",
            Self::AverageRating => "filter[averageRating]",
            Self::Season => "filter[season]",
            Self::AgeRating => "filter[ageRating]",
            Self::Year => "filter[year]",
            Self::Streamers => "filter[streamers]",
            Self::Categories => "filter[categories]",
        }
    }

    /// Looks up the logical name for an external key.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_key() == key)
    }
}

/// Parameter records that can be encoded into a query.
pub trait EncodeQuery {
    /// The free-text search value, if any.
    fn search_text(&self) -> Option<&str>;

    /// Encodes every present field.
    fn encode(&self) -> EncodedQuery;
}

/// Ordered list of encoded query pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodedQuery {
    pairs: Vec<(FilterKey, String)>,
}

impl EncodedQuery {
    /// Returns the value for a key.
    #[must_use]
    pub fn get(&self, key: FilterKey) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Whether the key is present.
    #[must_use]
    pub fn contains(&self, key: FilterKey) -> bool {
        self.get(key).is_some()
    }

    /// Present keys in encoding order.
    pub fn keys(&self) -> impl Iterator<Item = FilterKey> + '_ {
        self.pairs.iter().map(|(k, _)| *k)
    }

    /// Pairs with external keys, suitable for `RequestBuilder::query`.
    #[must_use]
    pub fn as_pairs(&self) -> Vec<(&'static str, &str)> {
        self.pairs
            .iter()
            .map(|(k, v)| (k.as_key(), v.as_str()))
            .collect()
    }

    /// Whether no pair is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Renders the percent-encoded query string (without a leading `?`).
    #[must_use]
    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.as_pairs())
            .finish()
    }

    /// Decodes a query string, keeping recognized keys in their given order.
    #[must_use]
    pub fn from_query_string(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let pairs = form_urlencoded::parse(query.as_bytes())
            .filter_map(|(k, v)| FilterKey::from_key(&k).map(|key| (key, v.into_owned())))
            .collect();
        Self { pairs }
    }
}

impl fmt::Display for EncodedQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

/// Builder that collects present fields into an [`EncodedQuery`].
#[derive(Debug, Default)]
#[must_use]
pub struct QueryEncoder {
    pairs: Vec<(FilterKey, String)>,
}

impl QueryEncoder {
    /// Creates an empty encoder.
    pub const fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Adds `filter[text]` when non-empty.
    pub fn text(mut self, text: Option<&str>) -> Self {
        if let Some(text) = text.filter(|t| !t.is_empty()) {
            self.pairs.push((FilterKey::Text, String::from(text)));
        }
        self
    }

    /// Adds `page[offset]` and `page[limit]`, substituting defaults.
    pub fn page(mut self, offset: Option<u32>, limit: Option<u32>) -> Self {
        self.pairs.push((
            FilterKey::Offset,
            offset.unwrap_or(DEFAULT_OFFSET).to_string(),
        ));
        self.pairs.push((
            FilterKey::Limit,
            limit.unwrap_or(DEFAULT_LIMIT).to_string(),
        ));
        self
    }

    /// Adds a single-valued field when present.
    pub fn field<V: fmt::Display>(mut self, key: FilterKey, value: Option<V>) -> Self {
        if let Some(value) = value {
            self.pairs.push((key, value.to_string()));
        }
        self
    }

    /// Adds a multi-valued field as one comma-joined value, when non-empty.
    pub fn list<'a>(mut self, key: FilterKey, values: impl IntoIterator<Item = &'a str>) -> Self {
        let joined = values.into_iter().collect::<Vec<_>>().join(",");
        if !joined.is_empty() {
            self.pairs.push((key, joined));
        }
        self
    }

    /// Finishes encoding.
    pub fn finish(self) -> EncodedQuery {
        EncodedQuery { pairs: self.pairs }
    }
}
