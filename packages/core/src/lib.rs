//! Pawdeck Core - shared domain types for the Pawdeck admin console
//!
//! Response envelopes, managed entity records, role and status
//! classification, and the field-level validators that run before any
//! request leaves the client.

pub mod envelope;
pub mod listing;
pub mod mock_entities;
pub mod pricing;
pub mod role;
pub mod status;
pub mod user;
pub mod validate;

pub use envelope::{Envelope, PagedEnvelope};
pub use listing::{FeaturedListing, ListingOwner, UpdateListingPayload};
pub use mock_entities::{Feed, FeedRequest, Listing, Pair, PaymentTransaction, PromotionBanner};
pub use pricing::{CreatePricingPayload, PricingPlan, UpdatePricingPayload};
pub use role::Role;
pub use status::StatusTone;
pub use user::{CreateUserPayload, UpdateUserPayload, UserRecord};
pub use validate::ValidationError;
