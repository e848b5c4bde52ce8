//! Pawdeck Client - typed HTTP access to the Pawdeck marketplace API
//!
//! Wraps every endpoint the admin console consumes: the role-filtered
//! `/user` collection, paged `/featured-listing` and its pricing plans,
//! and the `/auth` login flow. The bearer token obtained at login is
//! persisted locally and attached to every authenticated request.

pub mod auth;
pub mod client;
pub mod error;
pub mod params;

pub use auth::{AuthManager, SessionInfo};
pub use client::{ApiClient, AuthUser, LoginData};
pub use error::{ApiError, ApiResult};
pub use params::{ListingFilters, PricingFilters, UserListParams};
