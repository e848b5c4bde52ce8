use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use pawdeck_core::{
    CreatePricingPayload, CreateUserPayload, Envelope, FeaturedListing, PagedEnvelope,
    PricingPlan, UpdateListingPayload, UpdatePricingPayload, UpdateUserPayload, UserRecord,
};

use crate::error::{ApiError, ApiResult};
use crate::params::{ListingFilters, PricingFilters, UserListParams};

/// Request body for `POST /auth/login`
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub identifier: String,
    pub password: String,
}

/// Identity returned alongside the token at login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
    pub role: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginData {
    pub token: String,
    pub user: AuthUser,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub data: LoginData,
}

/// HTTP client for the Pawdeck marketplace API
#[derive(Clone)]
pub struct ApiClient {
    http_client: Client,
    base_url: String,
    access_token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> ApiResult<Self> {
        Self::with_timeout(base_url, Duration::from_secs(30))
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> ApiResult<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            access_token: None,
        })
    }

    /// Set the bearer token attached to subsequent requests
    pub fn set_access_token(&mut self, token: impl Into<String>) {
        self.access_token = Some(token.into());
    }

    pub fn clear_access_token(&mut self) {
        self.access_token = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn with_auth(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.access_token {
            Some(token) => builder.header("Authorization", format!("Bearer {}", token)),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> ApiResult<T> {
        let response = self
            .with_auth(builder)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::parse(response).await
    }

    async fn parse<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        let status = response.status();
        match status {
            s if s.is_success() => response
                .json::<T>()
                .await
                .map_err(|e| ApiError::InvalidResponse(e.to_string())),
            StatusCode::UNAUTHORIZED => {
                Err(ApiError::Authentication("Invalid or expired token".to_string()))
            }
            StatusCode::NOT_FOUND => {
                Err(ApiError::NotFound(Self::server_message(response).await))
            }
            s => Err(ApiError::Api {
                status: s.as_u16(),
                message: Self::server_message(response).await,
            }),
        }
    }

    /// Prefer the envelope's `message` field; fall back to the raw body.
    async fn server_message(response: Response) -> String {
        let status = response.status();
        let body = response.text().await.unwrap_or_else(|_| status.to_string());
        match serde_json::from_str::<Value>(&body) {
            Ok(value) => value
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or(body),
            Err(_) => body,
        }
    }

    // --- auth ---

    /// Authenticate and return the issued token with the user identity.
    /// Persisting the session is the [`crate::AuthManager`]'s job.
    pub async fn login(&self, identifier: &str, password: &str) -> ApiResult<LoginData> {
        let request = LoginRequest {
            identifier: identifier.to_string(),
            password: password.to_string(),
        };
        let response: LoginResponse = self
            .send(self.http_client.post(self.url("/auth/login")).json(&request))
            .await?;
        debug!(user = %response.data.user.email, "Logged in");
        Ok(response.data)
    }

    pub async fn reset_password(&self, email: &str) -> ApiResult<()> {
        let body = serde_json::json!({ "email": email });
        let _: Value = self
            .send(
                self.http_client
                    .post(self.url("/auth/reset-password"))
                    .json(&body),
            )
            .await?;
        Ok(())
    }

    // --- /user collection ---

    pub async fn list_users(&self, params: &UserListParams) -> ApiResult<Envelope<Vec<UserRecord>>> {
        self.send(self.http_client.get(self.url("/user")).query(params))
            .await
    }

    pub async fn get_user(&self, id: i64) -> ApiResult<Envelope<UserRecord>> {
        self.send(self.http_client.get(self.url(&format!("/user/{}", id))))
            .await
    }

    pub async fn create_user(&self, payload: &CreateUserPayload) -> ApiResult<Envelope<UserRecord>> {
        self.send(self.http_client.post(self.url("/user")).json(payload))
            .await
    }

    pub async fn update_user(
        &self,
        id: i64,
        payload: &UpdateUserPayload,
    ) -> ApiResult<Envelope<UserRecord>> {
        self.send(
            self.http_client
                .put(self.url(&format!("/user/{}", id)))
                .json(payload),
        )
        .await
    }

    pub async fn delete_user(&self, id: i64) -> ApiResult<()> {
        let response = self
            .with_auth(self.http_client.delete(self.url(&format!("/user/{}", id))))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::expect_success(response).await
    }

    // --- /featured-listing collection ---

    pub async fn list_featured_listings(
        &self,
        filters: &ListingFilters,
    ) -> ApiResult<PagedEnvelope<Vec<FeaturedListing>>> {
        self.send(
            self.http_client
                .get(self.url("/featured-listing"))
                .query(filters),
        )
        .await
    }

    pub async fn get_featured_listing(&self, id: i64) -> ApiResult<Envelope<FeaturedListing>> {
        self.send(
            self.http_client
                .get(self.url(&format!("/featured-listing/{}", id))),
        )
        .await
    }

    pub async fn update_featured_listing(
        &self,
        id: i64,
        payload: &UpdateListingPayload,
    ) -> ApiResult<Envelope<FeaturedListing>> {
        self.send(
            self.http_client
                .put(self.url(&format!("/featured-listing/{}", id)))
                .json(payload),
        )
        .await
    }

    pub async fn delete_featured_listing(&self, id: i64) -> ApiResult<()> {
        let response = self
            .with_auth(
                self.http_client
                    .delete(self.url(&format!("/featured-listing/{}", id))),
            )
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::expect_success(response).await
    }

    // --- /featured-listing/pricing collection ---

    pub async fn list_pricing_plans(
        &self,
        filters: &PricingFilters,
    ) -> ApiResult<PagedEnvelope<Vec<PricingPlan>>> {
        self.send(
            self.http_client
                .get(self.url("/featured-listing/pricing"))
                .query(filters),
        )
        .await
    }

    pub async fn get_pricing_plan(&self, id: i64) -> ApiResult<Envelope<PricingPlan>> {
        self.send(
            self.http_client
                .get(self.url(&format!("/featured-listing/pricing/{}", id))),
        )
        .await
    }

    pub async fn create_pricing_plan(
        &self,
        payload: &CreatePricingPayload,
    ) -> ApiResult<Envelope<PricingPlan>> {
        self.send(
            self.http_client
                .post(self.url("/featured-listing/pricing"))
                .json(payload),
        )
        .await
    }

    pub async fn update_pricing_plan(
        &self,
        id: i64,
        payload: &UpdatePricingPayload,
    ) -> ApiResult<Envelope<PricingPlan>> {
        self.send(
            self.http_client
                .put(self.url(&format!("/featured-listing/pricing/{}", id)))
                .json(payload),
        )
        .await
    }

    pub async fn delete_pricing_plan(&self, id: i64) -> ApiResult<()> {
        let response = self
            .with_auth(
                self.http_client
                    .delete(self.url(&format!("/featured-listing/pricing/{}", id))),
            )
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::expect_success(response).await
    }

    async fn expect_success(response: Response) -> ApiResult<()> {
        let status = response.status();
        match status {
            s if s.is_success() => Ok(()),
            StatusCode::UNAUTHORIZED => {
                Err(ApiError::Authentication("Invalid or expired token".to_string()))
            }
            StatusCode::NOT_FOUND => {
                Err(ApiError::NotFound(Self::server_message(response).await))
            }
            s => Err(ApiError::Api {
                status: s.as_u16(),
                message: Self::server_message(response).await,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pawdeck_core::Role;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn user_json(id: i64, first: &str, role: &str) -> Value {
        serde_json::json!({
            "id": id,
            "firstName": first,
            "lastName": "Brooks",
            "email": format!("user{}@example.com", id),
            "phoneNumber": "+1555000001",
            "role": role,
            "status": "Active",
            "createdAt": "2025-02-14T10:00:00Z",
            "updatedAt": "2025-02-14T10:00:00Z"
        })
    }

    fn envelope(data: Value) -> Value {
        serde_json::json!({
            "statusCode": 200,
            "success": true,
            "message": "OK",
            "data": data
        })
    }

    #[tokio::test]
    async fn list_users_sends_role_and_search_params() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/user"))
            .and(query_param("role", "Breeder"))
            .and(query_param("search", "rosie"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(envelope(serde_json::json!([user_json(2, "Rosie", "Breeder")]))),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri()).unwrap();
        let params = UserListParams::for_role(Role::Breeder).with_search("rosie");
        let result = client.list_users(&params).await.unwrap();

        assert_eq!(result.data.len(), 1);
        assert_eq!(result.data[0].first_name, "Rosie");
    }

    #[tokio::test]
    async fn authenticated_requests_carry_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/user/7"))
            .and(header("Authorization", "Bearer sekrit"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(envelope(user_json(7, "Alan", "User"))),
            )
            .expect(1)
            .mount(&server)
            .await;

        let mut client = ApiClient::new(server.uri()).unwrap();
        client.set_access_token("sekrit");
        let result = client.get_user(7).await.unwrap();
        assert_eq!(result.data.id, 7);
    }

    #[tokio::test]
    async fn update_sends_only_set_fields() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/user/7"))
            .and(body_json(serde_json::json!({ "status": "Suspended" })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(envelope(user_json(7, "Alan", "User"))),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri()).unwrap();
        let payload = UpdateUserPayload {
            status: Some("Suspended".to_string()),
            ..Default::default()
        };
        client.update_user(7, &payload).await.unwrap();
    }

    #[tokio::test]
    async fn delete_of_missing_record_maps_to_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/user/999"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "statusCode": 404,
                "success": false,
                "message": "User not found",
                "data": null
            })))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri()).unwrap();
        let err = client.delete_user(999).await.unwrap_err();
        match err {
            ApiError::NotFound(message) => assert_eq!(message, "User not found"),
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn unauthorized_maps_to_authentication_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/user"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri()).unwrap();
        let err = client.list_users(&UserListParams::default()).await.unwrap_err();
        assert!(matches!(err, ApiError::Authentication(_)));
    }

    #[tokio::test]
    async fn server_error_surfaces_envelope_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/featured-listing"))
            .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
                "statusCode": 500,
                "success": false,
                "message": "Database unavailable",
                "data": null
            })))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri()).unwrap();
        let err = client
            .list_featured_listings(&ListingFilters::baseline())
            .await
            .unwrap_err();
        match err {
            ApiError::Api { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "Database unavailable");
            }
            other => panic!("Expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn listing_filters_reach_the_wire_as_camel_case() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/featured-listing"))
            .and(query_param("page", "1"))
            .and(query_param("minPrice", "10.5"))
            .and(query_param("maxPrice", "100.5"))
            .and(query_param("lang", "ur"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "statusCode": 200,
                "success": true,
                "message": "OK",
                "page": 1,
                "total": 0,
                "lastPage": 1,
                "data": []
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri()).unwrap();
        let filters = ListingFilters {
            min_price: Some(10.5),
            max_price: Some(100.5),
            ..ListingFilters::baseline()
        };
        let result = client.list_featured_listings(&filters).await.unwrap();
        assert!(result.data.is_empty());
        assert_eq!(result.page, 1);
    }

    #[tokio::test]
    async fn login_returns_token_and_identity() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .and(body_json(serde_json::json!({
                "identifier": "admin@pawdeck.io",
                "password": "hunter2hunter2"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": {
                    "token": "jwt-token",
                    "user": { "id": "1", "email": "admin@pawdeck.io", "role": "Admin" }
                }
            })))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri()).unwrap();
        let data = client.login("admin@pawdeck.io", "hunter2hunter2").await.unwrap();
        assert_eq!(data.token, "jwt-token");
        assert_eq!(data.user.role, "Admin");
    }
}
