use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A featured-listing pricing plan from `GET /featured-listing/pricing`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingPlan {
    pub id: i64,
    pub status: String,
    pub period_time: String,
    pub monthly_payment: String,
    pub discount: String,
    pub total_payment: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for `POST /featured-listing/pricing`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePricingPayload {
    pub period_time: String,
    pub monthly_payment: f64,
    pub discount: f64,
    pub total_payment: f64,
}

/// Payload for `PUT /featured-listing/pricing/:id`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePricingPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_payment: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_payment: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}
