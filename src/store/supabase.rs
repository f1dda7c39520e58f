use crate::config::RemoteConfig;
use crate::models::{Category, Recipe, RecipeFormData};
use crate::store::{RecipeStore, StoreError, StoreResult};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

/// Recipe table served by Supabase's PostgREST endpoint
#[derive(Debug, Clone)]
pub struct SupabaseStore {
    client: Client,
    endpoint: String,
}

/// Error body PostgREST sends with 4xx/5xx responses
#[derive(Debug, Deserialize)]
struct PostgrestError {
    message: Option<String>,
    details: Option<String>,
}

impl SupabaseStore {
    pub fn new(config: &RemoteConfig) -> StoreResult<Self> {
        let base = config.url.trim_end_matches('/');
        if base.is_empty() {
            return Err(StoreError::Config("supabase url is empty".to_string()));
        }

        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(&config.api_key)
            .map_err(|_| StoreError::Config("api key is not a valid header value".to_string()))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|_| StoreError::Config("api key is not a valid header value".to_string()))?;
        headers.insert("apikey", key);
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: format!("{}/rest/v1/{}", base, config.table),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn request(&self, method: Method) -> RequestBuilder {
        self.client.request(method, &self.endpoint)
    }

    /// Mutations ask PostgREST to echo the affected rows back
    fn returning(&self, method: Method) -> RequestBuilder {
        self.request(method).header("Prefer", "return=representation")
    }
}

/// Decodes a row array, turning non-success statuses into `StoreError::Status`
async fn read_rows(response: Response) -> StoreResult<Vec<Recipe>> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(status_error(status.as_u16(), &body));
    }

    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| StoreError::Decode(e.to_string()))
}

fn status_error(status: u16, body: &str) -> StoreError {
    let message = match serde_json::from_str::<PostgrestError>(body) {
        Ok(PostgrestError {
            message: Some(message),
            details,
        }) => match details {
            Some(details) if !details.is_empty() => format!("{}: {}", message, details),
            _ => message,
        },
        _ if !body.trim().is_empty() => body.trim().to_string(),
        _ => "Remote request failed".to_string(),
    };
    StoreError::Status { status, message }
}

/// Single-row operations return an array of zero or one rows
fn single_row(rows: Vec<Recipe>, id: &str) -> StoreResult<Recipe> {
    rows.into_iter()
        .next()
        .ok_or_else(|| StoreError::NotFound(id.to_string()))
}

fn id_filter(id: &str) -> String {
    format!("eq.{}", id)
}

#[async_trait]
impl RecipeStore for SupabaseStore {
    #[instrument(skip(self))]
    async fn list(&self, category: Option<Category>) -> StoreResult<Vec<Recipe>> {
        let mut query = vec![
            ("select", "*".to_string()),
            ("order", "created_at.desc".to_string()),
        ];
        if let Some(category) = category {
            query.push(("category", format!("eq.{}", category.as_str())));
        }

        let response = self.request(Method::GET).query(&query).send().await?;
        let rows = read_rows(response).await?;
        debug!(count = rows.len(), "listed recipes");
        Ok(rows)
    }

    #[instrument(skip(self, data), fields(title = %data.title))]
    async fn insert(&self, data: &RecipeFormData) -> StoreResult<Recipe> {
        let response = self
            .returning(Method::POST)
            .json(&[data])
            .send()
            .await?;
        let rows = read_rows(response).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| StoreError::Decode("insert returned no rows".to_string()))
    }

    #[instrument(skip(self, data))]
    async fn update(&self, id: &str, data: &RecipeFormData) -> StoreResult<Recipe> {
        let response = self
            .returning(Method::PATCH)
            .query(&[("id", id_filter(id))])
            .json(data)
            .send()
            .await?;
        single_row(read_rows(response).await?, id)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> StoreResult<()> {
        let response = self
            .returning(Method::DELETE)
            .query(&[("id", id_filter(id))])
            .send()
            .await?;
        single_row(read_rows(response).await?, id).map(|_| ())
    }

    #[instrument(skip(self))]
    async fn get(&self, id: &str) -> StoreResult<Recipe> {
        let response = self
            .request(Method::GET)
            .query(&[("select", "*".to_string()), ("id", id_filter(id))])
            .send()
            .await?;
        single_row(read_rows(response).await?, id)
    }

    fn describe(&self) -> String {
        self.endpoint.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(url: &str) -> RemoteConfig {
        RemoteConfig {
            url: url.to_string(),
            api_key: "anon".to_string(),
            table: "recipes".to_string(),
            timeout_secs: 5,
        }
    }

    #[test]
    fn endpoint_targets_the_rest_table() {
        let store = SupabaseStore::new(&config("https://demo.supabase.co/")).unwrap();
        assert_eq!(store.endpoint(), "https://demo.supabase.co/rest/v1/recipes");
    }

    #[test]
    fn empty_url_is_a_config_error() {
        assert!(matches!(
            SupabaseStore::new(&config("")),
            Err(StoreError::Config(_))
        ));
    }

    #[test]
    fn postgrest_error_body_becomes_the_message() {
        let err = status_error(
            400,
            r#"{"code":"22P02","message":"invalid input syntax for type uuid","details":null}"#,
        );
        assert_eq!(
            err.to_string(),
            "invalid input syntax for type uuid (HTTP 400)"
        );

        let err = status_error(502, "");
        assert_eq!(err.to_string(), "Remote request failed (HTTP 502)");
    }

    #[test]
    fn empty_result_for_single_row_is_not_found() {
        assert!(matches!(
            single_row(Vec::new(), "abc"),
            Err(StoreError::NotFound(id)) if id == "abc"
        ));
    }
}
