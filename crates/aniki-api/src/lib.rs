//! API client library for aniki.
//!
//! Provides typed query clients for the Kitsu.app JSON:API service.

/// Kitsu.app API client.
pub mod kitsu;
