//! Commerce backend API client implementation.
//!
//! Uses `reqwest` for HTTP and caches catalog reads using `moka`
//! (5-minute TTL). Cart, order and profile calls always hit the
//! backend.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use reqwest::header::AUTHORIZATION;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use arta_stone_core::{OrderId, ProjectId, StoneId};

use crate::config::CommerceConfig;

use super::types::{
    AddItemRequest, AuthResponse, CheckoutRequest, CheckoutResponse, LoginRequest, ProfileUpdate,
    QuoteRequest, RegisterRequest, RemoteCart, RemoteCartItem, RemoteOrder, RemoteProject,
    RemoteQuote, RemoteStone, RemoteUser, RemoveItemRequest, UpdateItemRequest,
};
use super::{CommerceError, extract_api_error};

/// Cache TTL for catalog reads.
const CACHE_TTL: Duration = Duration::from_secs(300); // 5 minutes

/// Cached catalog values.
#[derive(Clone)]
enum CacheValue {
    Stone(Box<RemoteStone>),
    Stones(Vec<RemoteStone>),
    Project(Box<RemoteProject>),
    Projects(Vec<RemoteProject>),
}

// =============================================================================
// CommerceClient
// =============================================================================

/// Client for the commerce backend REST API.
///
/// Provides typed access to the catalog, account cart, checkout,
/// orders and quote endpoints. Catalog reads are cached for 5 minutes.
#[derive(Clone)]
pub struct CommerceClient {
    inner: Arc<CommerceClientInner>,
}

struct CommerceClientInner {
    client: reqwest::Client,
    base_url: String,
    cache: Cache<String, CacheValue>,
}

impl CommerceClient {
    /// Create a new commerce API client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: &CommerceConfig) -> Result<Self, CommerceError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(CACHE_TTL)
            .build();

        Ok(Self {
            inner: Arc::new(CommerceClientInner {
                client,
                base_url: config.base_url.clone(),
                cache,
            }),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.inner.base_url)
    }

    fn request(
        &self,
        method: reqwest::Method,
        path: &str,
        token: Option<&str>,
    ) -> reqwest::RequestBuilder {
        let mut builder = self.inner.client.request(method, self.url(path));
        if let Some(token) = token {
            builder = builder.header(AUTHORIZATION, format!("Token {token}"));
        }
        builder
    }

    /// Send a request and return the body text of a successful response.
    ///
    /// Non-2xx responses are turned into [`CommerceError::Api`] with the
    /// message extracted from the error body.
    async fn execute(&self, builder: reqwest::RequestBuilder) -> Result<String, CommerceError> {
        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(extract_api_error(status, &text));
        }

        Ok(text)
    }

    /// Parse a response body that is expected to be JSON.
    fn parse_json<T: DeserializeOwned>(text: &str) -> Result<T, CommerceError> {
        serde_json::from_str(text).map_err(|source| CommerceError::InvalidJson {
            source,
            snippet: text.chars().take(200).collect(),
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
    ) -> Result<T, CommerceError> {
        let text = self
            .execute(self.request(reqwest::Method::GET, path, token))
            .await?;
        Self::parse_json(&text)
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
        body: &B,
    ) -> Result<T, CommerceError> {
        let text = self
            .execute(self.request(reqwest::Method::POST, path, token).json(body))
            .await?;
        Self::parse_json(&text)
    }

    /// POST where the response body (if any) is ignored.
    async fn post_unit<B: Serialize + ?Sized>(
        &self,
        path: &str,
        token: Option<&str>,
        body: Option<&B>,
    ) -> Result<(), CommerceError> {
        let mut builder = self.request(reqwest::Method::POST, path, token);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        self.execute(builder).await?;
        Ok(())
    }

    /// Map a 404 API error onto [`CommerceError::NotFound`].
    fn map_not_found(error: CommerceError, what: impl std::fmt::Display) -> CommerceError {
        match error {
            CommerceError::Api { status: 404, .. } => {
                CommerceError::NotFound(format!("{what} not found"))
            }
            other => other,
        }
    }

    // =========================================================================
    // Catalog Methods
    // =========================================================================

    /// Get the full stone catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_stones(&self) -> Result<Vec<RemoteStone>, CommerceError> {
        let cache_key = "stones".to_string();

        if let Some(CacheValue::Stones(stones)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for stones");
            return Ok(stones);
        }

        let stones: Vec<RemoteStone> = self.get_json("/stones/", None).await?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Stones(stones.clone()))
            .await;

        Ok(stones)
    }

    /// Get a stone by its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the stone is not found or the API request fails.
    #[instrument(skip(self), fields(stone_id = %id))]
    pub async fn get_stone(&self, id: StoneId) -> Result<RemoteStone, CommerceError> {
        let cache_key = format!("stone:{id}");

        if let Some(CacheValue::Stone(stone)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for stone");
            return Ok(*stone);
        }

        let stone: RemoteStone = self
            .get_json(&format!("/stones/{id}/"), None)
            .await
            .map_err(|e| Self::map_not_found(e, format!("Stone {id}")))?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Stone(Box::new(stone.clone())))
            .await;

        Ok(stone)
    }

    /// Get the featured stones.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn featured_stones(&self) -> Result<Vec<RemoteStone>, CommerceError> {
        let cache_key = "stones:featured".to_string();

        if let Some(CacheValue::Stones(stones)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for featured stones");
            return Ok(stones);
        }

        let stones: Vec<RemoteStone> = self.get_json("/stones/featured/", None).await?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Stones(stones.clone()))
            .await;

        Ok(stones)
    }

    /// Search the catalog. Not cached - query space is unbounded.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn search_stones(&self, query: &str) -> Result<Vec<RemoteStone>, CommerceError> {
        let path = format!("/stones/?search={}", urlencoding::encode(query));
        self.get_json(&path, None).await
    }

    /// Get the reference projects gallery.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_projects(&self) -> Result<Vec<RemoteProject>, CommerceError> {
        let cache_key = "projects".to_string();

        if let Some(CacheValue::Projects(projects)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for projects");
            return Ok(projects);
        }

        let projects: Vec<RemoteProject> = self.get_json("/projects/", None).await?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Projects(projects.clone()))
            .await;

        Ok(projects)
    }

    /// Get a project by its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the project is not found or the API request fails.
    #[instrument(skip(self), fields(project_id = %id))]
    pub async fn get_project(&self, id: ProjectId) -> Result<RemoteProject, CommerceError> {
        let cache_key = format!("project:{id}");

        if let Some(CacheValue::Project(project)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for project");
            return Ok(*project);
        }

        let project: RemoteProject = self
            .get_json(&format!("/projects/{id}/"), None)
            .await
            .map_err(|e| Self::map_not_found(e, format!("Project {id}")))?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Project(Box::new(project.clone())))
            .await;

        Ok(project)
    }

    /// Get the featured projects.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn featured_projects(&self) -> Result<Vec<RemoteProject>, CommerceError> {
        self.get_json("/projects/featured/", None).await
    }

    // =========================================================================
    // Auth & Profile Methods
    // =========================================================================

    /// Log in with email and password.
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials are rejected or the request fails.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, CommerceError> {
        let request = LoginRequest {
            username: email.to_owned(),
            password: password.to_owned(),
        };
        self.post_json("/auth/login/", None, &request).await
    }

    /// Register a new customer account.
    ///
    /// # Errors
    ///
    /// Returns an error if registration is rejected or the request fails.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, CommerceError> {
        self.post_json("/register/", None, request).await
    }

    /// Fetch the authenticated customer's profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip_all)]
    pub async fn get_profile(&self, token: &str) -> Result<RemoteUser, CommerceError> {
        self.get_json("/users/profile/", Some(token)).await
    }

    /// Update the authenticated customer's profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip_all)]
    pub async fn update_profile(
        &self,
        token: &str,
        update: &ProfileUpdate,
    ) -> Result<RemoteUser, CommerceError> {
        let text = self
            .execute(
                self.request(reqwest::Method::PATCH, "/users/profile/", Some(token))
                    .json(update),
            )
            .await?;
        Self::parse_json(&text)
    }

    // =========================================================================
    // Cart Methods (not cached - mutable state)
    // =========================================================================

    /// Fetch the account cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip_all)]
    pub async fn get_cart(&self, token: &str) -> Result<RemoteCart, CommerceError> {
        self.get_json("/cart/", Some(token)).await
    }

    /// Add a line to the account cart. The caller is expected to
    /// refetch the cart afterwards - the backend response only echoes
    /// the touched line.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, request), fields(stone_id = %request.stone_id))]
    pub async fn add_cart_item(
        &self,
        token: &str,
        request: &AddItemRequest,
    ) -> Result<RemoteCartItem, CommerceError> {
        self.post_json("/cart/add_item/", Some(token), request).await
    }

    /// Update a cart line's quantity.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, request), fields(item_id = %request.item_id))]
    pub async fn update_cart_item(
        &self,
        token: &str,
        request: &UpdateItemRequest,
    ) -> Result<(), CommerceError> {
        self.post_unit("/cart/update_item/", Some(token), Some(request))
            .await
    }

    /// Remove a line from the account cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, request), fields(item_id = %request.item_id))]
    pub async fn remove_cart_item(
        &self,
        token: &str,
        request: &RemoveItemRequest,
    ) -> Result<(), CommerceError> {
        self.post_unit("/cart/remove_item/", Some(token), Some(request))
            .await
    }

    /// Remove every line from the account cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip_all)]
    pub async fn clear_cart(&self, token: &str) -> Result<(), CommerceError> {
        self.post_unit::<()>("/cart/clear/", Some(token), None).await
    }

    /// Create an order from the account cart and initiate payment.
    ///
    /// # Errors
    ///
    /// Returns an error if checkout is rejected or the request fails.
    #[instrument(skip(self, request), fields(payment_type = %request.payment_type))]
    pub async fn checkout(
        &self,
        token: &str,
        request: &CheckoutRequest,
    ) -> Result<CheckoutResponse, CommerceError> {
        self.post_json("/cart/checkout/", Some(token), request).await
    }

    // =========================================================================
    // Order Methods
    // =========================================================================

    /// List the authenticated customer's orders.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip_all)]
    pub async fn list_orders(&self, token: &str) -> Result<Vec<RemoteOrder>, CommerceError> {
        self.get_json("/orders/", Some(token)).await
    }

    /// Fetch one of the authenticated customer's orders.
    ///
    /// # Errors
    ///
    /// Returns an error if the order is not found or the request fails.
    #[instrument(skip(self, token), fields(order_id = %id))]
    pub async fn get_order(&self, token: &str, id: OrderId) -> Result<RemoteOrder, CommerceError> {
        self.get_json(&format!("/orders/{id}/"), Some(token))
            .await
            .map_err(|e| Self::map_not_found(e, format!("Order {id}")))
    }

    // =========================================================================
    // Quote Methods
    // =========================================================================

    /// Submit a quote request. Works anonymously; a token associates the
    /// quote with the customer's account.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, token, request), fields(email = %request.email))]
    pub async fn submit_quote(
        &self,
        token: Option<&str>,
        request: &QuoteRequest,
    ) -> Result<RemoteQuote, CommerceError> {
        self.post_json("/quotes/submit_quote/", token, request).await
    }

    /// List the authenticated customer's quote requests.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip_all)]
    pub async fn list_quotes(&self, token: &str) -> Result<Vec<RemoteQuote>, CommerceError> {
        self.get_json("/users/quotes/", Some(token)).await
    }

    // =========================================================================
    // Cache Management
    // =========================================================================

    /// Invalidate all cached catalog data.
    pub async fn invalidate_catalog(&self) {
        self.inner.cache.invalidate_all();
        self.inner.cache.run_pending_tasks().await;
    }
}
