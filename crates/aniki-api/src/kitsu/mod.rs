//! Kitsu.app JSON:API client.
//!
//! ```no_run
//! use aniki_api::kitsu::{AnimeApi, AnimeParams, KitsuClient};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let client = KitsuClient::builder().build()?;
//! if let Some(found) = client.anime().find(&AnimeParams::search("Oshi no Ko"), None).await {
//!     for anime in &found.data {
//!         println!("{} {:?}", anime.id, anime.attributes.media.canonical_title);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

mod anime;
pub mod api;
pub mod client;
pub mod encoder;
pub mod enums;
pub mod error;
mod manga;
pub mod params;
pub mod resource;
pub mod types;

pub use api::{AnimeApi, LocalAnimeApi, LocalMangaApi, MangaApi};
pub use client::{KitsuClient, KitsuClientBuilder};
pub use encoder::{EncodeQuery, EncodedQuery, FilterKey};
pub use enums::{
    AgeRating, AnimeSubtype, Category, MangaSubtype, ReleaseStatus, Season, Streamer, Token,
    UnknownToken,
};
pub use error::{FailureHandler, KitsuApiError, KitsuErrorDocument, KitsuFailure};
pub use params::{AnimeParams, MangaParams, ParseRangeError, RatingRange, ResourceId, YearRange};
pub use resource::{AnimeKitsu, MangaKitsu, ResourceQuery};
