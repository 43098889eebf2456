use crate::config::AppConfig;
use crate::domain::model::{FoodRecord, SearchParams, SearchResponse};
use crate::utils::error::{EtlError, Result};
use reqwest::Client;
use std::time::Duration;

/// Pages through the FoodData Central search endpoint, one request at a time.
#[derive(Debug, Clone)]
pub struct FoodFetcher {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl FoodFetcher {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self::with_client(client, config))
    }

    pub fn with_client(client: Client, config: &AppConfig) -> Self {
        Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
        }
    }

    /// Requests a single page, most recently published first.
    ///
    /// Transport failures, non-2xx answers and undecodable bodies are all
    /// errors. Error messages never carry the request URL, which holds the
    /// API key.
    pub async fn fetch_page(&self, params: &SearchParams, page_number: usize) -> Result<SearchResponse> {
        let query = [
            ("query", params.query.clone()),
            ("dataType", params.data_type.clone()),
            ("pageSize", params.page_size.to_string()),
            ("pageNumber", page_number.to_string()),
            ("sortBy", "publishedDate".to_string()),
            ("sortOrder", "desc".to_string()),
            ("api_key", self.api_key.clone()),
        ];

        tracing::debug!("GET {} page={}", self.endpoint, page_number);
        let response = self
            .client
            .get(&self.endpoint)
            .query(&query)
            .send()
            .await
            .map_err(|e| EtlError::ApiError(e.without_url()))?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);
        if !status.is_success() {
            return Err(EtlError::UnexpectedStatus {
                page: page_number,
                status: status.as_u16(),
            });
        }

        response
            .json::<SearchResponse>()
            .await
            .map_err(|e| EtlError::ApiError(e.without_url()))
    }

    /// Collects every page until one comes back empty, `max_pages` have been
    /// read, or a request fails. A failure ends pagination but keeps what the
    /// earlier pages produced.
    pub async fn fetch_all(&self, params: &SearchParams) -> Vec<FoodRecord> {
        let mut records = Vec::new();

        for page_number in 1..=params.max_pages {
            tracing::info!("Fetching page {}...", page_number);

            let page = match self.fetch_page(params, page_number).await {
                Ok(page) => page,
                Err(e) => {
                    tracing::error!("Request error: {}", e);
                    tracing::debug!("Suggestion: {}", e.recovery_suggestion());
                    return records;
                }
            };

            if let Some(total_hits) = page.total_hits {
                tracing::debug!("Page {} of a search with {} hits", page_number, total_hits);
            }

            let foods = page.into_foods();
            if foods.is_empty() {
                tracing::debug!("Page {} has no foods, end of data", page_number);
                return records;
            }

            tracing::debug!("Page {} returned {} foods", page_number, foods.len());
            records.extend(foods.into_iter().map(FoodRecord::from));
        }

        tracing::info!("Stopped at the max_pages cap of {}", params.max_pages);
        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    const SEARCH_PATH: &str = "/fdc/v1/foods/search";

    fn fetcher_for(server: &MockServer) -> FoodFetcher {
        let config = AppConfig::default()
            .with_api_key("test-key")
            .with_endpoint(server.url(SEARCH_PATH));
        FoodFetcher::new(&config).unwrap()
    }

    fn params(page_size: usize, max_pages: usize) -> SearchParams {
        SearchParams {
            page_size,
            max_pages,
            ..SearchParams::default()
        }
    }

    #[tokio::test]
    async fn test_fetch_page_sends_search_parameters() {
        let server = MockServer::start_async().await;
        let api_mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path(SEARCH_PATH)
                    .query_param("query", "*")
                    .query_param("dataType", "Branded")
                    .query_param("pageSize", "25")
                    .query_param("pageNumber", "4")
                    .query_param("sortBy", "publishedDate")
                    .query_param("sortOrder", "desc")
                    .query_param("api_key", "test-key");
                then.status(200).json_body(json!({
                    "totalHits": 1,
                    "foods": [{"description": "Chips"}]
                }));
            })
            .await;

        let page = fetcher_for(&server)
            .fetch_page(&params(25, 10), 4)
            .await
            .unwrap();

        api_mock.assert_async().await;
        assert_eq!(page.into_foods().len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_page_rejects_error_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path(SEARCH_PATH);
                then.status(403).body("API_KEY_INVALID");
            })
            .await;

        let err = fetcher_for(&server)
            .fetch_page(&params(25, 10), 1)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            EtlError::UnexpectedStatus {
                page: 1,
                status: 403
            }
        ));
    }

    #[tokio::test]
    async fn test_fetch_page_rejects_malformed_body() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path(SEARCH_PATH);
                then.status(200).body("<html>maintenance</html>");
            })
            .await;

        let err = fetcher_for(&server)
            .fetch_page(&params(25, 10), 1)
            .await
            .unwrap_err();

        assert!(matches!(err, EtlError::ApiError(_)));
        assert!(!err.to_string().contains("test-key"));
    }

    #[tokio::test]
    async fn test_fetch_all_stops_on_missing_foods() {
        let server = MockServer::start_async().await;
        let page_one = server
            .mock_async(|when, then| {
                when.method(GET).path(SEARCH_PATH).query_param("pageNumber", "1");
                then.status(200).json_body(json!({
                    "foods": [
                        {"description": "A", "brandOwner": "X", "ingredients": "SALT"},
                        {"description": "B"}
                    ]
                }));
            })
            .await;
        let page_two = server
            .mock_async(|when, then| {
                when.method(GET).path(SEARCH_PATH).query_param("pageNumber", "2");
                then.status(200).json_body(json!({"totalHits": 2}));
            })
            .await;

        let records = fetcher_for(&server).fetch_all(&params(2, 10)).await;

        page_one.assert_hits_async(1).await;
        page_two.assert_hits_async(1).await;
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].food_name, "A");
        assert_eq!(records[0].ingredients, "SALT");
        assert_eq!(records[1].food_name, "B");
        assert_eq!(records[1].brand, "");
        assert_eq!(records[1].ingredients, "Not available");
    }

    #[tokio::test]
    async fn test_fetch_all_connection_refused_returns_empty() {
        // nothing listens on port 1
        let config = AppConfig::default()
            .with_api_key("test-key")
            .with_endpoint("http://127.0.0.1:1/fdc/v1/foods/search");
        let fetcher = FoodFetcher::new(&config).unwrap();

        let records = fetcher.fetch_all(&params(25, 5)).await;
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_all_unbounded_cap_stops_on_empty_page() {
        let server = MockServer::start_async().await;
        let api_mock = server
            .mock_async(|when, then| {
                when.method(GET).path(SEARCH_PATH);
                then.status(200).json_body(json!({"totalHits": 0, "foods": []}));
            })
            .await;

        let records = fetcher_for(&server)
            .fetch_all(&params(25, usize::MAX))
            .await;

        api_mock.assert_hits_async(1).await;
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_all_mistyped_field_ends_pagination() {
        let server = MockServer::start_async().await;
        let page_one = server
            .mock_async(|when, then| {
                when.method(GET).path(SEARCH_PATH).query_param("pageNumber", "1");
                then.status(200).json_body(json!({"foods": [{"description": "Kept"}]}));
            })
            .await;
        let page_two = server
            .mock_async(|when, then| {
                when.method(GET).path(SEARCH_PATH).query_param("pageNumber", "2");
                then.status(200)
                    .json_body(json!({"foods": [{"description": "Bad", "ingredients": 123}]}));
            })
            .await;
        let page_three = server
            .mock_async(|when, then| {
                when.method(GET).path(SEARCH_PATH).query_param("pageNumber", "3");
                then.status(200).json_body(json!({"foods": [{"description": "Never"}]}));
            })
            .await;

        let records = fetcher_for(&server).fetch_all(&params(1, 10)).await;

        page_one.assert_hits_async(1).await;
        page_two.assert_hits_async(1).await;
        page_three.assert_hits_async(0).await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].food_name, "Kept");
    }
}
