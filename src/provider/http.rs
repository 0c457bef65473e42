//! HTTP implementation of the catalog provider contracts.
//!
//! Talks to the PickAIHub REST API (`/api/tools`, `/api/favorites`, ...)
//! with JSON bodies. Favorites endpoints are scoped by the bearer token;
//! the `identity` argument of [`FavoritesStore`] is the token's subject and
//! is not sent on the wire.

use std::time::Duration;

use reqwest::header;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use url::Url;

use crate::config::Config;
use crate::error::{HubError, Result};
use crate::types::{CategoryCount, SortMode, Tool};

use super::error::ApiError;
use super::{FavoritesStore, ListProvider, ToolPage, ToolQuery, sanitize_search};

/// Error body shape returned by the catalog API.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Deserialize)]
struct CountBody {
    count: u64,
}

/// Catalog API client.
#[derive(Debug, Clone)]
pub struct HttpProvider {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl HttpProvider {
    pub fn new(config: &Config) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| HubError::Config(format!("invalid base URL '{}': {e}", config.base_url)))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout))
            .build()?;

        Ok(Self {
            client,
            base_url,
            token: config.auth.as_ref().map(|a| a.token.clone()),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| HubError::Config(format!("invalid endpoint '{path}': {e}")))
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.client.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Require a token before touching the favorites endpoints.
    fn require_auth(&self) -> Result<()> {
        if self.token.is_none() {
            return Err(HubError::Unauthenticated);
        }
        Ok(())
    }
}

/// Turn a non-success response into an [`ApiError`]-backed failure.
async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let retry_after = response
        .headers()
        .get(header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse().ok());

    let body = response.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<ErrorBody>(&body) {
        Ok(parsed) => format!("catalog API error ({}): {}", status.as_u16(), parsed.error),
        Err(_) if !body.is_empty() => {
            format!("catalog API error ({}): {}", status.as_u16(), body)
        }
        Err(_) => format!("catalog API error ({})", status.as_u16()),
    };

    let mut error = ApiError::with_status(message, status);
    if let Some(seconds) = retry_after {
        error = error.with_retry_after(seconds);
    }
    Err(error.into())
}

impl ListProvider for HttpProvider {
    async fn list_tools(&self, query: &ToolQuery) -> Result<ToolPage> {
        let mut url = self.endpoint("api/tools")?;
        {
            let mut pairs = url.query_pairs_mut();
            if let Some(search) = &query.search
                && !search.is_empty()
            {
                pairs.append_pair("q", &sanitize_search(search));
            }
            if let Some(category) = &query.category
                && category != crate::categories::CATEGORY_ALL
            {
                pairs.append_pair("category", category);
            }
            if query.sort != SortMode::default() {
                pairs.append_pair("sort", &query.sort.to_string());
            }
            pairs.append_pair("page", &query.page.to_string());
            pairs.append_pair("limit", &query.page_size.to_string());
        }

        let response = self.request(Method::GET, url).send().await?;
        let page = ensure_success(response).await?.json::<ToolPage>().await?;
        Ok(page)
    }

    async fn get_tool(&self, id: &str) -> Result<Option<Tool>> {
        // UUIDs resolve by id; anything else falls back to a
        // case-insensitive name lookup, mirroring the catalog's behavior.
        let by_id = uuid::Uuid::parse_str(id).is_ok();
        let mut url = self.endpoint("api/tools/lookup")?;
        url.query_pairs_mut()
            .append_pair(if by_id { "id" } else { "name" }, id);

        let response = self.request(Method::GET, url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let tool = ensure_success(response).await?.json::<Tool>().await?;
        Ok(Some(tool))
    }

    async fn featured_tools(&self, limit: u32) -> Result<Vec<Tool>> {
        let mut url = self.endpoint("api/tools/featured")?;
        url.query_pairs_mut().append_pair("limit", &limit.to_string());

        let response = self.request(Method::GET, url).send().await?;
        let tools = ensure_success(response).await?.json::<Vec<Tool>>().await?;
        Ok(tools)
    }

    async fn related_tools(&self, category: &str, exclude_id: &str, limit: u32) -> Result<Vec<Tool>> {
        let mut url = self.endpoint("api/tools/related")?;
        url.query_pairs_mut()
            .append_pair("category", category)
            .append_pair("exclude", exclude_id)
            .append_pair("limit", &limit.to_string());

        let response = self.request(Method::GET, url).send().await?;
        let tools = ensure_success(response).await?.json::<Vec<Tool>>().await?;
        Ok(tools)
    }

    async fn category_counts(&self) -> Result<Vec<CategoryCount>> {
        let url = self.endpoint("api/categories/counts")?;
        let response = self.request(Method::GET, url).send().await?;
        let counts = ensure_success(response)
            .await?
            .json::<Vec<CategoryCount>>()
            .await?;
        Ok(counts)
    }

    async fn total_tool_count(&self) -> Result<u64> {
        let url = self.endpoint("api/tools/count")?;
        let response = self.request(Method::GET, url).send().await?;
        let body = ensure_success(response).await?.json::<CountBody>().await?;
        Ok(body.count)
    }
}

impl FavoritesStore for HttpProvider {
    async fn favorite_ids(&self, _identity: &str) -> Result<Vec<String>> {
        self.require_auth()?;
        let url = self.endpoint("api/favorites")?;
        let response = self.request(Method::GET, url).send().await?;
        let ids = ensure_success(response).await?.json::<Vec<String>>().await?;
        Ok(ids)
    }

    async fn add_favorite(&self, _identity: &str, tool_id: &str) -> Result<()> {
        self.require_auth()?;
        let url = self.endpoint("api/favorites")?;
        let response = self
            .request(Method::POST, url)
            .json(&serde_json::json!({ "tool_id": tool_id }))
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }

    async fn remove_favorite(&self, _identity: &str, tool_id: &str) -> Result<()> {
        self.require_auth()?;
        let mut url = self.endpoint("api/favorites")?;
        url.query_pairs_mut().append_pair("tool_id", tool_id);
        let response = self.request(Method::DELETE, url).send().await?;
        ensure_success(response).await?;
        Ok(())
    }
}
