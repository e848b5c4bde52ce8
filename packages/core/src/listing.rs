use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Owner reference embedded in a featured listing. One-directional:
/// listings point at users, never the reverse.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingOwner {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub role: String,
}

impl ListingOwner {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A featured pet listing from `GET /featured-listing`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeaturedListing {
    pub id: i64,
    pub status: String,
    pub image: String,
    /// Arrives as a string on the wire; parsed only for filtering
    pub price: String,
    pub pet_name: String,
    #[serde(rename = "type")]
    pub pet_type: String,
    pub description: Option<String>,
    pub user_id: i64,
    pub featured_pricing_id: Option<i64>,
    pub is_comments: bool,
    pub is_chat: bool,
    pub is_featured_listing: bool,
    pub user: ListingOwner,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FeaturedListing {
    /// Numeric price for range filtering; unparseable prices never match
    /// a price filter but are otherwise displayed verbatim.
    pub fn price_value(&self) -> Option<f64> {
        self.price.trim().parse().ok()
    }
}

/// Payload for `PUT /featured-listing/:id`. Only set fields are sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateListingPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pet_name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub pet_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    /// Replacement image as a base64 data URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_listing(price: &str) -> FeaturedListing {
        serde_json::from_value(serde_json::json!({
            "id": 1,
            "status": "Active",
            "image": "https://cdn.example.com/parrot.jpg",
            "price": price,
            "petName": "Parrot",
            "type": "Bird",
            "description": null,
            "userId": 4,
            "featuredPricingId": null,
            "isComments": true,
            "isChat": false,
            "isFeaturedListing": true,
            "user": {
                "id": 4,
                "firstName": "Alan",
                "lastName": "Cain",
                "email": "alan@example.com",
                "phoneNumber": "+1555000004",
                "role": "Vendor"
            },
            "createdAt": "2025-02-14T10:00:00Z",
            "updatedAt": "2025-02-14T10:00:00Z"
        }))
        .unwrap()
    }

    #[test]
    fn price_parses_when_numeric() {
        assert_eq!(sample_listing("150").price_value(), Some(150.0));
        assert_eq!(sample_listing(" 19.99 ").price_value(), Some(19.99));
    }

    #[test]
    fn unparseable_price_yields_none() {
        assert_eq!(sample_listing("call us").price_value(), None);
    }

    #[test]
    fn update_payload_renames_type_field() {
        let payload = UpdateListingPayload {
            pet_type: Some("Bird".to_string()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_string(&payload).unwrap(),
            r#"{"type":"Bird"}"#
        );
    }
}
