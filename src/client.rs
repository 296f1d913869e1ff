// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The HTTP transport shared by every data source.

use std::time::Duration;

use log::debug;
use log::warn;
use reqwest::Client;
use reqwest::Method;
use reqwest::RequestBuilder;
use reqwest::Url;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde::de::IgnoredAny;

use crate::error::ApiError;
use crate::error::ApiResult;

const LOG_TARGET: &str = "lessonbook::api";

/// The response of an endpoint that returns nothing useful. Decodes from an
/// empty body or from any JSON value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Empty;

impl<'de> Deserialize<'de> for Empty {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        IgnoredAny::deserialize(deserializer)?;
        Ok(Empty)
    }
}

/// A handle on the lesson server. Cloning is cheap: clones share the
/// connection pool.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> ApiResult<Self> {
        let mut base = base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url =
            Url::parse(&base).map_err(|e| ApiError::InvalidUrl(format!("{base_url}: {e}")))?;
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(Self {
            http,
            base_url,
            token: None,
        })
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve an endpoint path against the base URL. Paths are relative to
    /// the base, so a base with a path prefix keeps it.
    pub fn url(&self, path: &str) -> ApiResult<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::InvalidUrl(format!("{path}: {e}")))
    }

    fn request(&self, method: Method, path: &str) -> ApiResult<RequestBuilder> {
        let url = self.url(path)?;
        debug!(target: LOG_TARGET, "{method} {url}");
        let builder = self.http.request(method, url);
        Ok(match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        })
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.send(self.request(Method::GET, path)?).await
    }

    pub async fn get_query<Q, T>(&self, path: &str, query: &Q) -> ApiResult<T>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.request(Method::GET, path)?.query(query))
            .await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.request(Method::POST, path)?.json(body)).await
    }

    /// POST with no body, for link endpoints like attaching a tag.
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.send(self.request(Method::POST, path)?).await
    }

    pub async fn post_form<B, T>(&self, path: &str, form: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.request(Method::POST, path)?.form(form)).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.request(Method::PUT, path)?.json(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.send(self.request(Method::DELETE, path)?).await
    }

    /// Send the request once and decode the response.
    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> ApiResult<T> {
        let response = builder.send().await.map_err(|e| {
            let err = transport_error(e);
            warn!(target: LOG_TARGET, "{err}");
            err
        })?;
        let status = response.status();
        let url = response.url().clone();
        let body = response.text().await.map_err(transport_error)?;
        if !status.is_success() {
            let err = ApiError::Status {
                code: status.as_u16(),
                body,
            };
            warn!(target: LOG_TARGET, "{url}: {err}");
            return Err(err);
        }
        debug!(target: LOG_TARGET, "{url}: {status}, {} bytes", body.len());
        decode(&body).inspect_err(|err| warn!(target: LOG_TARGET, "{url}: {err}"))
    }
}

fn transport_error(e: reqwest::Error) -> ApiError {
    if e.is_builder() {
        ApiError::InvalidUrl(e.to_string())
    } else if e.is_decode() {
        ApiError::Decode(e.to_string())
    } else {
        ApiError::Transport(e.to_string())
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> ApiResult<T> {
    let body = if body.trim().is_empty() { "null" } else { body };
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use lessonbook_core::types::lesson::Lesson;
    use lessonbook_core::types::tag::Tag;

    use super::*;
    use crate::error::Fallible;
    use crate::helper::FakeServer;

    #[test]
    fn test_url_keeps_base_path() -> Fallible<()> {
        let client = ApiClient::new("http://localhost:9000/api/v1", None)?;
        assert_eq!(
            client.url("/lessons/3")?.as_str(),
            "http://localhost:9000/api/v1/lessons/3"
        );
        assert_eq!(
            client.url("words")?.as_str(),
            "http://localhost:9000/api/v1/words"
        );
        Ok(())
    }

    #[test]
    fn test_invalid_base_url() {
        let err = ApiClient::new("not a url", None).unwrap_err();
        assert!(matches!(err, ApiError::InvalidUrl(_)));
    }

    #[test]
    fn test_decode_empty_body() {
        assert_eq!(decode::<Empty>("").unwrap(), Empty);
        assert_eq!(decode::<Empty>("{\"ok\": true}").unwrap(), Empty);
        assert!(matches!(decode::<Tag>(""), Err(ApiError::Decode(_))));
    }

    #[tokio::test]
    async fn test_bearer_header_is_sent() -> Fallible<()> {
        let server = FakeServer::start().await?;
        let anonymous = server.anonymous_client()?;
        let err = anonymous.get::<Vec<Lesson>>("lessons").await.unwrap_err();
        assert!(err.is_unauthorized());
        let lessons: Vec<Lesson> = server.client()?.get("lessons").await?;
        assert_eq!(lessons.len(), server.lesson_count());
        Ok(())
    }

    #[tokio::test]
    async fn test_status_error_keeps_body() -> Fallible<()> {
        let server = FakeServer::start().await?;
        let err = server
            .client()?
            .get::<Lesson>("lessons/999")
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ApiError::Status {
                code: 404,
                body: "lesson 999 not found".to_string()
            }
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() -> Fallible<()> {
        let server = FakeServer::start().await?;
        let err = server.client()?.get::<Lesson>("broken").await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
        Ok(())
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() -> Fallible<()> {
        let port = portpicker::pick_unused_port().unwrap();
        let client = ApiClient::new(&format!("http://127.0.0.1:{port}"), None)?;
        let err = client.get::<Empty>("lessons").await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
        Ok(())
    }
}
