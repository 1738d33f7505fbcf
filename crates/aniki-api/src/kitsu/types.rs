//! Kitsu API response types.
//!
//! Structural pass-through of JSON:API documents. Every attribute is
//! optional and an explicit `null` decodes as empty. Members without a typed
//! field land in `extra`, so re-serializing loses nothing.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::enums::{AgeRating, AnimeSubtype, MangaSubtype, ReleaseStatus, Token};

/// Decodes `null` as `T::default()`.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// --- Envelope ---

/// Top-level JSON:API document: `{ "data": ... }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document<T> {
    /// Primary data: one resource or a list of resources.
    pub data: T,
    /// Document metadata (e.g. total `count` on collections).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<DocumentMeta>,
    /// Pagination links on collections.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<PageLinks>,
    /// Other top-level members (`included`, `jsonapi`, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Document-level `meta` member.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentMeta {
    /// Total number of matching records.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    /// Other meta members.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Document-level pagination links.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageLinks {
    /// First page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first: Option<String>,
    /// Previous page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<String>,
    /// Next page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    /// Last page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last: Option<String>,
}

/// A JSON:API resource object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "A: Deserialize<'de> + Default"))]
pub struct Resource<A> {
    /// Resource id (numeric string, e.g. `"40052"`).
    pub id: String,
    /// Resource type (`anime`, `manga`, `episodes`, `chapters`).
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
    /// Self link.
    #[serde(default, deserialize_with = "null_as_default")]
    pub links: ResourceLinks,
    /// Resource attributes.
    #[serde(default, deserialize_with = "null_as_default")]
    pub attributes: A,
    /// Relationship links keyed by name (`genres`, `episodes`, ...).
    #[serde(default, deserialize_with = "null_as_default")]
    pub relationships: BTreeMap<String, Relationship>,
    /// Other resource members (`meta`, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `links` member of a resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceLinks {
    /// Canonical URL of the resource.
    #[serde(rename = "self", skip_serializing_if = "Option::is_none")]
    pub self_link: Option<String>,
}

/// A relationship entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Relationship {
    /// Relationship links.
    #[serde(deserialize_with = "null_as_default")]
    pub links: RelationshipLinks,
    /// Resource linkage, when included (object, array or null).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// Other relationship members.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `links` member of a relationship.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelationshipLinks {
    /// Relationship URL.
    #[serde(rename = "self", skip_serializing_if = "Option::is_none")]
    pub self_link: Option<String>,
    /// Related resource URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related: Option<String>,
}

/// Document holding a list of resources.
pub type Collection<A> = Document<Vec<Resource<A>>>;

/// Document holding one resource.
pub type Single<A> = Document<Resource<A>>;

/// Result of anime `find` and `list`.
pub type AnimeCollection = Collection<AnimeAttributes>;
/// Result of anime `find_by_id`.
pub type AnimeSingle = Single<AnimeAttributes>;
/// Result of anime `episode`.
pub type Episode = Single<EpisodeAttributes>;
/// Result of manga `find` and `list`.
pub type MangaCollection = Collection<MangaAttributes>;
/// Result of manga `find_by_id`.
pub type MangaSingle = Single<MangaAttributes>;
/// Result of manga `chapters`.
pub type Chapter = Single<ChapterAttributes>;

// --- Shared attribute pieces ---

/// Localized titles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Titles {
    /// English.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub en: Option<String>,
    /// Romanized Japanese (e.g. "Oshi no Ko").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub en_jp: Option<String>,
    /// American English.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub en_us: Option<String>,
    /// Japanese (e.g. "推しの子").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ja_jp: Option<String>,
    /// Korean.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ko_kr: Option<String>,
    /// Russian.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ru_ru: Option<String>,
    /// Any other locale.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Pixel size of one image variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dimension {
    /// Width in pixels.
    pub width: Option<u32>,
    /// Height in pixels.
    pub height: Option<u32>,
}

/// Image metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageMeta {
    /// Dimensions keyed by variant (`tiny`, `small`, ...).
    #[serde(deserialize_with = "null_as_default")]
    pub dimensions: BTreeMap<String, Dimension>,
    /// Other metadata (`blurhash`, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Poster, cover or thumbnail image in several sizes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Image {
    /// Tiny variant URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tiny: Option<String>,
    /// Small variant URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub small: Option<String>,
    /// Medium variant URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medium: Option<String>,
    /// Large variant URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub large: Option<String>,
    /// Original upload URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original: Option<String>,
    /// Size metadata.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<ImageMeta>,
    /// Other variants.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Attributes shared by anime and manga.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MediaAttributes {
    /// Creation timestamp (ISO 8601).
    pub created_at: Option<String>,
    /// Last update timestamp (ISO 8601).
    pub updated_at: Option<String>,
    /// URL slug (e.g. `oshi-no-ko`).
    pub slug: Option<String>,
    /// Synopsis.
    pub synopsis: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Cover image top offset.
    pub cover_image_top_offset: Option<i64>,
    /// Localized titles.
    #[serde(deserialize_with = "null_as_default")]
    pub titles: Titles,
    /// Canonical title.
    pub canonical_title: Option<String>,
    /// Abbreviated titles.
    #[serde(deserialize_with = "null_as_default")]
    pub abbreviated_titles: Vec<String>,
    /// Average rating, a stringified percentage (e.g. `"84.12"`).
    pub average_rating: Option<String>,
    /// Rating counts keyed by rating step (`"2"` ..= `"20"`).
    #[serde(deserialize_with = "null_as_default")]
    pub rating_frequencies: BTreeMap<String, Value>,
    /// Users tracking this entry.
    pub user_count: Option<u64>,
    /// Users who favorited this entry.
    pub favorites_count: Option<u64>,
    /// Start date (`YYYY-MM-DD`).
    pub start_date: Option<String>,
    /// End date (`YYYY-MM-DD`).
    pub end_date: Option<String>,
    /// Next release timestamp.
    pub next_release: Option<String>,
    /// Popularity rank.
    pub popularity_rank: Option<u64>,
    /// Rating rank.
    pub rating_rank: Option<u64>,
    /// Age rating.
    pub age_rating: Option<Token<AgeRating>>,
    /// Age rating guidance text.
    pub age_rating_guide: Option<String>,
    /// Release status.
    pub status: Option<Token<ReleaseStatus>>,
    /// "To be announced" note.
    pub tba: Option<String>,
    /// Poster image.
    pub poster_image: Option<Image>,
    /// Cover image.
    pub cover_image: Option<Image>,
}

// --- Anime ---

/// Attributes of an `anime` resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnimeAttributes {
    /// Fields shared with manga.
    #[serde(flatten)]
    pub media: MediaAttributes,
    /// Format.
    pub subtype: Option<Token<AnimeSubtype>>,
    /// Number of episodes.
    pub episode_count: Option<u32>,
    /// Approximate episode length in minutes.
    pub episode_length: Option<u32>,
    /// Total runtime in minutes.
    pub total_length: Option<u64>,
    /// YouTube trailer id.
    pub youtube_video_id: Option<String>,
    /// Legacy format field.
    pub show_type: Option<String>,
    /// Adult content flag.
    pub nsfw: Option<bool>,
    /// Attributes without a typed field.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Attributes of an `episodes` resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EpisodeAttributes {
    /// Creation timestamp (ISO 8601).
    pub created_at: Option<String>,
    /// Last update timestamp (ISO 8601).
    pub updated_at: Option<String>,
    /// Synopsis.
    pub synopsis: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Localized titles.
    #[serde(deserialize_with = "null_as_default")]
    pub titles: Titles,
    /// Canonical title.
    pub canonical_title: Option<String>,
    /// Season the episode belongs to.
    pub season_number: Option<u32>,
    /// Absolute episode number.
    pub number: Option<u32>,
    /// Episode number within its season.
    pub relative_number: Option<u32>,
    /// Air date (`YYYY-MM-DD`).
    pub airdate: Option<String>,
    /// Length in minutes.
    pub length: Option<u32>,
    /// Thumbnail image.
    pub thumbnail: Option<Image>,
    /// Attributes without a typed field.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// --- Manga ---

/// Attributes of a `manga` resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MangaAttributes {
    /// Fields shared with anime.
    #[serde(flatten)]
    pub media: MediaAttributes,
    /// Format.
    pub subtype: Option<Token<MangaSubtype>>,
    /// Number of chapters.
    pub chapter_count: Option<u32>,
    /// Number of volumes.
    pub volume_count: Option<u32>,
    /// Serializing magazine.
    pub serialization: Option<String>,
    /// Attributes without a typed field.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Attributes of a `chapters` resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChapterAttributes {
    /// Creation timestamp (ISO 8601).
    pub created_at: Option<String>,
    /// Last update timestamp (ISO 8601).
    pub updated_at: Option<String>,
    /// Localized titles.
    #[serde(deserialize_with = "null_as_default")]
    pub titles: Titles,
    /// Canonical title.
    pub canonical_title: Option<String>,
    /// Volume the chapter belongs to.
    pub volume_number: Option<u32>,
    /// Chapter number.
    pub number: Option<u32>,
    /// Synopsis.
    pub synopsis: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Publication date (`YYYY-MM-DD`).
    pub published: Option<String>,
    /// Page count.
    pub length: Option<u32>,
    /// Thumbnail image.
    pub thumbnail: Option<Image>,
    /// Attributes without a typed field.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use super::*;

    #[test]
    fn test_parse_anime_collection_fixture() {
        // Arrange
        let json = include_str!("../../../../fixtures/kitsu/anime_search_oshi_no_ko.json");

        // Act
        let doc: AnimeCollection = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(doc.data.len(), 2);
        let first = &doc.data[0];
        assert_eq!(first.id, "40052");
        assert_eq!(first.kind, "anime");
        assert_eq!(first.attributes.media.slug.as_deref(), Some("oshi-no-ko"));
        assert_eq!(first.attributes.media.titles.ja_jp.as_deref(), Some("推しの子"));
        assert_eq!(
            first.attributes.media.age_rating,
            Some(Token::Known(AgeRating::Pg))
        );
        assert_eq!(
            first.attributes.subtype.as_ref().and_then(Token::known),
            Some(AnimeSubtype::Tv)
        );
        assert_eq!(first.attributes.episode_count, Some(11));
        assert!(first.relationships.contains_key("episodes"));
        assert_eq!(doc.meta.unwrap().count, Some(2));
    }

    #[test]
    fn test_parse_anime_single_fixture() {
        // Arrange
        let json = include_str!("../../../../fixtures/kitsu/anime_40052.json");

        // Act
        let doc: AnimeSingle = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(doc.data.id, "40052");
        assert_eq!(
            doc.data.attributes.media.status,
            Some(Token::Known(ReleaseStatus::Finished))
        );
        let poster = doc.data.attributes.media.poster_image.unwrap();
        assert!(poster.original.is_some());
        assert_eq!(
            poster.meta.unwrap().dimensions["tiny"],
            Dimension {
                width: Some(110),
                height: Some(156),
            }
        );
    }

    #[test]
    fn test_parse_episode_fixture() {
        // Arrange
        let json = include_str!("../../../../fixtures/kitsu/episode_1190285.json");

        // Act
        let doc: Episode = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(doc.data.kind, "episodes");
        assert_eq!(doc.data.attributes.number, Some(1));
        assert_eq!(doc.data.attributes.length, Some(82));
    }

    #[test]
    fn test_parse_manga_fixtures() {
        // Arrange
        let collection = include_str!("../../../../fixtures/kitsu/manga_search_berserk.json");
        let single = include_str!("../../../../fixtures/kitsu/manga_14.json");

        // Act
        let collection: MangaCollection = serde_json::from_str(collection).unwrap();
        let single: MangaSingle = serde_json::from_str(single).unwrap();

        // Assert
        assert_eq!(
            collection.data[0].attributes.subtype,
            Some(Token::Known(MangaSubtype::Manga))
        );
        assert_eq!(single.data.id, "14");
        assert_eq!(single.data.attributes.volume_count, Some(41));
    }

    #[test]
    fn test_parse_chapter_fixture() {
        // Arrange
        let json = include_str!("../../../../fixtures/kitsu/chapter_1.json");

        // Act
        let doc: Chapter = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(doc.data.kind, "chapters");
        assert_eq!(doc.data.attributes.volume_number, Some(1));
    }

    #[test]
    fn test_minimal_resource_decodes() {
        // Arrange
        let json = r#"{"data":[{"id":"40052"}]}"#;

        // Act
        let doc: AnimeCollection = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(doc.data[0].id, "40052");
        assert_eq!(doc.data[0].attributes, AnimeAttributes::default());
        assert!(doc.meta.is_none());
    }

    #[test]
    fn test_null_attributes_decode_as_none() {
        // Arrange
        let json = r#"{"data":{"id":"1","type":"anime","attributes":{"averageRating":null,"ageRatingGuide":null,"tba":null,"subtype":"movie"}}}"#;

        // Act
        let doc: AnimeSingle = serde_json::from_str(json).unwrap();

        // Assert
        assert!(doc.data.attributes.media.average_rating.is_none());
        assert_eq!(
            doc.data.attributes.subtype,
            Some(Token::Known(AnimeSubtype::Movie))
        );
    }

    #[test]
    fn test_null_collections_decode_as_empty() {
        // Arrange
        let json = r#"{"data":{"id":"1","links":null,"relationships":null,"attributes":{"titles":null,"abbreviatedTitles":null,"ratingFrequencies":null,"posterImage":{"tiny":null,"meta":{"dimensions":null}}}}}"#;

        // Act
        let doc: AnimeSingle = serde_json::from_str(json).unwrap();

        // Assert
        let media = &doc.data.attributes.media;
        assert_eq!(media.titles, Titles::default());
        assert!(media.abbreviated_titles.is_empty());
        assert!(media.rating_frequencies.is_empty());
        assert!(doc.data.relationships.is_empty());
        let meta = media.poster_image.as_ref().unwrap().meta.as_ref().unwrap();
        assert!(meta.dimensions.is_empty());
    }

    #[test]
    fn test_null_attributes_object_decodes_as_default() {
        // Arrange
        let json = r#"{"data":{"id":"1","type":"chapters","attributes":null}}"#;

        // Act
        let doc: Chapter = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(doc.data.attributes, ChapterAttributes::default());
    }

    #[test]
    fn test_unrecognized_tokens_are_kept() {
        // Arrange
        let json = r#"{"data":[{"id":"1","attributes":{"subtype":"TV Special","status":"hiatus","ageRating":"PG13"}}]}"#;

        // Act
        let doc: AnimeCollection = serde_json::from_str(json).unwrap();

        // Assert
        let attrs = &doc.data[0].attributes;
        assert_eq!(attrs.subtype, Some(Token::Other(String::from("TV Special"))));
        assert_eq!(attrs.media.status, Some(Token::Other(String::from("hiatus"))));
        assert_eq!(attrs.media.age_rating.as_ref().and_then(Token::known), None);
        assert_eq!(
            attrs.media.age_rating.as_ref().map(ToString::to_string),
            Some(String::from("PG13"))
        );
    }

    #[test]
    fn test_unmodelled_members_survive_reserialization() {
        // Arrange
        let json = r#"{
            "data": [{
                "id": "40052",
                "type": "anime",
                "meta": {"rank": 1},
                "attributes": {
                    "canonicalTitle": "Oshi no Ko",
                    "coverImageBlurhash": "LKO2",
                    "titles": {"en_jp": "Oshi no Ko", "zh_cn": "我推的孩子"},
                    "posterImage": {"tiny": "t.jpg", "meta": {"blurhash": "UQ"}}
                }
            }],
            "included": [{"id": "1", "type": "genres"}],
            "meta": {"count": 1, "took": 12}
        }"#;

        // Act
        let doc: AnimeCollection = serde_json::from_str(json).unwrap();
        let value = serde_json::to_value(&doc).unwrap();

        // Assert
        assert_eq!(value["included"][0]["type"], "genres");
        assert_eq!(value["meta"]["took"], 12);
        let resource = &value["data"][0];
        assert_eq!(resource["meta"]["rank"], 1);
        assert_eq!(resource["attributes"]["coverImageBlurhash"], "LKO2");
        assert_eq!(resource["attributes"]["canonicalTitle"], "Oshi no Ko");
        assert_eq!(resource["attributes"]["titles"]["zh_cn"], "我推的孩子");
        assert_eq!(resource["attributes"]["posterImage"]["meta"]["blurhash"], "UQ");
        assert_eq!(doc.data[0].attributes.media.titles.en_jp.as_deref(), Some("Oshi no Ko"));
        assert!(!doc.data[0].attributes.extra.contains_key("canonicalTitle"));
    }
}
