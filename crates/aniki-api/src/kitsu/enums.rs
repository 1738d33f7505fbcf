//! Token sets shared by request filters and response attributes.
//!
//! Every enum here maps 1:1 to a literal string the Kitsu API sends or
//! accepts. Filters for both anime and manga reuse the same types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Error returned when a string is not a known token for an enum.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} token: {value:?}")]
pub struct UnknownToken {
    /// Name of the target enum.
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

impl UnknownToken {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: String::from(value),
        }
    }
}

/// Declares a wire-token enum with `as_str`, `Display`, `FromStr` and serde.
macro_rules! wire_tokens {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $token:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[allow(missing_docs)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Returns the token as sent to and received from the API.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $( Self::$variant => $token ),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownToken;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str().eq_ignore_ascii_case(s))
                    .ok_or_else(|| UnknownToken::new(stringify!($name), s))
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                raw.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

wire_tokens! {
    /// Broadcast season.
    Season {
        Winter => "winter",
        Spring => "spring",
        Summer => "summer",
        Fall => "fall",
    }
}

wire_tokens! {
    /// Age rating.
    AgeRating {
        /// General Audiences.
        G => "G",
        /// Parental Guidance Suggested.
        Pg => "PG",
        /// Restricted.
        R => "R",
        /// Restricted, 18 and older.
        R18 => "R18",
    }
}

wire_tokens! {
    /// Streaming platform.
    Streamer {
        Crunchyroll => "Crunchyroll",
        Hulu => "Hulu",
        Funimation => "Funimation",
        ConTv => "CONtv",
        Netflix => "Netflix",
        Hidive => "HIDIVE",
        TubiTv => "TubiTV",
        Amazon => "Amazon",
        YouTube => "YouTube",
        AnimeLab => "AnimeLab",
        Vrv => "VRV",
    }
}

wire_tokens! {
    /// Category slug accepted by `filter[categories]`.
    Category {
        Comedy => "comedy",
        AntiWar => "anti_war",
        ComingOfAge => "coming_of_age",
        Epidemic => "epidemic",
        PostApocalypse => "post_apocalypse",
        War => "war",
        FeudalWarfare => "feudal_warfare",
        Navy => "navy",
        Family => "family",
        Friendship => "friendship",
        GenderBender => "gender_bender",
        LawAndOrder => "law_and_order",
        Shinsengumi => "shinsengumi",
        AirForce => "air_force",
        Police => "police",
        Conspiracy => "conspiracy",
        Cooking => "cooking",
        Crime => "crime",
        Assassin => "assassin",
        BountyHunter => "bounty_hunter",
        Mafia => "mafia",
        Pirate => "pirate",
        Thievery => "thievery",
        Disaster => "disaster",
        Countryside => "countryside",
        Desert => "desert",
        Earth => "earth",
        FantasyWorld => "fantasy_world",
        Josei => "josei",
        Shoujo => "shoujo",
        Shounen => "shounen",
        Kids => "kids",
        Seinen => "seinen",
        AlternativePresent => "alternative_present",
        Space => "space",
        Summer => "summer",
        Shipboard => "shipboard",
        OtherPlanet => "other_planet",
        Mars => "mars",
        Isekai => "isekai",
        Island => "island",
        ParallelUniverse => "parallel_universe",
        FloatingIsland => "floating_island",
        Past => "past",
        AlternativePast => "alternative_past",
        BakumatsuMeijiPeriod => "bakumatsu_meiji_period",
        HeianPeriod => "heian_period",
        SengokuPeriod => "sengoku_period",
        ThreeKingdoms => "three_kingdoms",
        TokugawaPeriod => "tokugawa_period",
        VictorianPeriod => "victorian_period",
        WorldWarIi => "world_war_ii",
        Future => "future",
        Romance => "romance",
        Fantasy => "fantasy",
        Action => "action",
        Drama => "drama",
        Harem => "harem",
        Mecha => "mecha",
        Ecchi => "ecchi",
        Supernatural => "supernatural",
        SuperPower => "super_power",
        Mystery => "mystery",
        MagicalGirl => "magical_girl",
        Horror => "horror",
        Henshin => "henshin",
        Parasite => "parasite",
        ScienceFiction => "science_fiction",
        Thriller => "thriller",
        Vampire => "vampire",
        VirtualReality => "virtual_reality",
        Zombie => "zombie",
        Detective => "detective",
        Blackmail => "blackmail",
        Anthropomorphism => "anthropomorphism",
        AnimeInfluenced => "anime_influenced",
        Angst => "angst",
        Ghost => "ghost",
        SliceOfLife => "slice_of_life",
        Adventure => "adventure",
        SchoolLife => "school_life",
    }
}

wire_tokens! {
    /// Anime format (`subtype` attribute).
    AnimeSubtype {
        Ona => "ONA",
        Ova => "OVA",
        Tv => "TV",
        Movie => "movie",
        Music => "music",
        Special => "special",
    }
}

wire_tokens! {
    /// Manga format (`subtype` attribute).
    MangaSubtype {
        Manga => "manga",
        Manhwa => "manhwa",
        Manhua => "manhua",
        Novel => "novel",
        Oneshot => "oneshot",
        Doujin => "doujin",
        Oel => "oel",
    }
}

wire_tokens! {
    /// Publication or airing status.
    ReleaseStatus {
        Current => "current",
        Finished => "finished",
        Tba => "tba",
        Unreleased => "unreleased",
        Upcoming => "upcoming",
    }
}

/// A token read from a response body.
///
/// Unrecognized strings are kept as [`Token::Other`] so that a value the API
/// introduces later does not fail the whole document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Token<T> {
    /// A token this crate knows.
    Known(T),
    /// Any other string, verbatim.
    Other(String),
}

impl<T: Copy> Token<T> {
    /// Returns the typed value, if the token is known.
    #[must_use]
    pub const fn known(&self) -> Option<T> {
        match self {
            Self::Known(value) => Some(*value),
            Self::Other(_) => None,
        }
    }
}

impl<T: fmt::Display> fmt::Display for Token<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(value) => value.fmt(f),
            Self::Other(raw) => f.write_str(raw),
        }
    }
}

impl<T: Serialize> Serialize for Token<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Known(value) => value.serialize(serializer),
            Self::Other(raw) => serializer.serialize_str(raw),
        }
    }
}

impl<'de, T: FromStr> Deserialize<'de> for Token<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(raw.parse().map_or(Self::Other(raw), Self::Known))
    }
}
