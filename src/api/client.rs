use std::time::Duration;

use once_cell::sync::Lazy;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use super::error::ApiError;
use crate::auth;

static HTTP: Lazy<reqwest::blocking::Client> =
    Lazy::new(reqwest::blocking::Client::new);

/// Thin wrapper over the blocking reqwest client: base-URL handling, bearer
/// auth, and response classification.
pub struct HttpClient {
    base_url: String,
    token: Option<String>,
    timeout: Duration,
}

impl HttpClient {
    pub fn new(base_url: &str, token: Option<String>, timeout_secs: u64) -> Self {
        let base_url = base_url.strip_suffix('/').unwrap_or(base_url).to_string();

        if let Some(ref token) = token {
            log::debug!("using auth token {}", auth::mask_token(token));
        } else {
            log::debug!("no auth token configured; requests go out unauthenticated");
        }

        HttpClient {
            base_url,
            token,
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    fn get(&self, path_and_query: &str) -> reqwest::blocking::RequestBuilder {
        let url = format!("{}{}", self.base_url, path_and_query);
        log::info!("GET {url}");

        self.decorate(HTTP.get(&url))
    }

    fn post(&self, path: &str) -> reqwest::blocking::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        log::info!("POST {url}");

        self.decorate(HTTP.post(&url))
    }

    fn decorate(
        &self,
        req: reqwest::blocking::RequestBuilder,
    ) -> reqwest::blocking::RequestBuilder {
        let req = req
            .timeout(self.timeout)
            .header(reqwest::header::CONTENT_TYPE, "application/json");

        match self.token {
            Some(ref token) => req.header(
                reqwest::header::AUTHORIZATION,
                auth::bearer_value(token),
            ),
            None => req,
        }
    }

    pub fn get_json<T>(&self, path_and_query: &str) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        dispatch(self.get(path_and_query))
    }

    pub fn post_json<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        dispatch(self.post(path).json(body))
    }
}

fn dispatch<T>(req: reqwest::blocking::RequestBuilder) -> Result<T, ApiError>
where
    T: DeserializeOwned,
{
    let response = req.send()?;
    let status = response.status().as_u16();
    let body = response.text()?;

    let data = classify_response(status, &body)?;
    Ok(serde_json::from_value(data)?)
}

/// Classifies a backend response by status code.
///
/// 500 fails with a fixed server-error message, the body discarded. A status
/// strictly between 400 and 500 fails with the body's `detail` field when
/// present, otherwise with the whole body. Everything else parses as
/// success, including exactly 400: the strict bounds let it through, and
/// regression tests pin that boundary.
pub fn classify_response(status: u16, body: &str) -> Result<Value, ApiError> {
    if status == 500 {
        return Err(ApiError::Server);
    }

    let data: Value = serde_json::from_str(body)?;

    if status > 400 && status < 500 {
        if let Some(detail) = data.get("detail") {
            return Err(ApiError::Client(detail_message(detail)));
        }
        return Err(ApiError::Client(data.to_string()));
    }

    Ok(data)
}

/// A string `detail` is used verbatim; structured detail (FastAPI validation
/// errors are arrays) is reported as compact JSON.
fn detail_message(detail: &Value) -> String {
    match detail.as_str() {
        Some(s) => s.to_string(),
        None => detail.to_string(),
    }
}
