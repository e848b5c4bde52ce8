//! Entities for the screens that ship with in-memory data only.
//!
//! General listings, payments, feeds, pairs, feed requests and
//! promotion banners have no backend endpoint; their records live in a
//! mock collection, are mutated directly by the UI, and are discarded
//! on exit. Ids are zero-padded strings in the fixture data, so they
//! stay strings here.

use serde::{Deserialize, Serialize};

/// A general marketplace listing, distinct from the featured listings
/// served by `/featured-listing`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub listing_type: String,
    pub owner: String,
    pub status: String,
    pub is_featured: bool,
}

/// A promotion banner shown on the marketplace landing page
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromotionBanner {
    pub id: String,
    pub title: String,
    pub link: String,
    pub description: String,
    /// URL or base64 data URL
    pub image_url: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentTransaction {
    pub id: String,
    pub name: String,
    pub email: String,
    pub method: String,
    pub price: String,
    pub date: String,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedRequest {
    pub id: String,
    pub user_name: String,
    pub email: String,
    pub subject: String,
    pub received: String,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pair {
    pub id: String,
    /// URL or base64 data URL
    pub image: Option<String>,
    pub pairs_name: String,
    pub owner: String,
    pub date: String,
    #[serde(rename = "type")]
    pub pair_type: String,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feed {
    pub id: String,
    pub name: String,
    pub email: String,
    pub date: String,
    #[serde(rename = "type")]
    pub feed_type: String,
    pub status: String,
}
