// src/client.rs

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use url::Url;

use crate::{
    exam::gateway::PersistenceBoundary,
    models::{
        attempt::{AttemptResult, PersistedAttempt},
        question::Question,
    },
    storage::StoreError,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Body of a 400 response.
#[derive(Debug, Deserialize)]
struct ValidationBody {
    message: String,
    field: Option<String>,
}

/// Typed client for the exam REST API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
}

impl ApiClient {
    /// `base_url` is the server root, e.g. `http://127.0.0.1:3000`.
    pub fn new(base_url: &str) -> Result<Self, StoreError> {
        let mut base_url = Url::parse(base_url).map_err(|e| {
            StoreError::validation(format!("invalid base url: {}", e), Some("baseUrl"))
        })?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        Ok(Self { http, base_url })
    }

    fn endpoint(&self, path: &str) -> Result<Url, StoreError> {
        self.base_url
            .join(path)
            .map_err(|e| StoreError::Unavailable(format!("invalid endpoint {}: {}", path, e)))
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, StoreError> {
        let response = self
            .http
            .get(self.endpoint(path)?)
            .send()
            .await
            .map_err(unavailable)?;

        if !response.status().is_success() {
            return Err(StoreError::Unavailable(format!(
                "GET {} returned {}",
                path,
                response.status()
            )));
        }

        response.json::<T>().await.map_err(unavailable)
    }
}

fn unavailable(err: reqwest::Error) -> StoreError {
    StoreError::Unavailable(err.to_string())
}

#[async_trait]
impl PersistenceBoundary for ApiClient {
    async fn list_questions(&self) -> Result<Vec<Question>, StoreError> {
        self.get_json("api/questions").await
    }

    async fn list_attempts(&self) -> Result<Vec<PersistedAttempt>, StoreError> {
        self.get_json("api/attempts").await
    }

    async fn create_attempt(
        &self,
        attempt: &AttemptResult,
    ) -> Result<PersistedAttempt, StoreError> {
        let response = self
            .http
            .post(self.endpoint("api/attempts")?)
            .json(attempt)
            .send()
            .await
            .map_err(unavailable)?;

        match response.status() {
            StatusCode::CREATED | StatusCode::OK => {
                response.json::<PersistedAttempt>().await.map_err(unavailable)
            }
            StatusCode::BAD_REQUEST => {
                let body = response
                    .json::<ValidationBody>()
                    .await
                    .map_err(unavailable)?;
                Err(StoreError::Validation {
                    message: body.message,
                    field: body.field,
                })
            }
            status => Err(StoreError::Unavailable(format!(
                "POST api/attempts returned {}",
                status
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_joins_paths_under_base() {
        let client = ApiClient::new("http://localhost:3000/exam").unwrap();
        assert_eq!(
            client.endpoint("api/questions").unwrap().as_str(),
            "http://localhost:3000/exam/api/questions"
        );

        let client = ApiClient::new("http://localhost:3000").unwrap();
        assert_eq!(
            client.endpoint("api/attempts").unwrap().as_str(),
            "http://localhost:3000/api/attempts"
        );
    }

    #[test]
    fn test_rejects_garbage_url() {
        assert!(matches!(
            ApiClient::new("not a url"),
            Err(StoreError::Validation { .. })
        ));
    }
}
