//! Thin wrapper around `reqwest` that knows the TestUZ endpoints.
//!
//! Every call takes the admin token explicitly, so one client can be cloned
//! into background tasks regardless of who is logged in.

use std::time::Duration;

use futures_util::future::try_join3;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::{
    AttemptSubmission, LoginRequest, NotificationSetting, Question, QuestionPayload, TestAttempt,
    TokenResponse,
};

/// Everything the admin dashboard shows, fetched in one go.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardData {
    pub questions: Vec<Question>,
    pub notification: NotificationSetting,
    pub attempts: Vec<TestAttempt>,
}

/// Shape of error bodies produced by the server.
#[derive(Debug, Deserialize)]
struct ErrorPayload {
    detail: Option<String>,
    error: Option<String>,
}

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.api_url.clone(), config.request_timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Exchange admin credentials for an API token.
    pub async fn login(&self, username: &str, password: &str) -> Result<String> {
        let body = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let response: TokenResponse = self
            .send_json(Method::POST, "/auth/login/", Some(&body), None)
            .await?;
        Ok(response.token)
    }

    /// Questions in the bank. With an admin token the options carry their
    /// correctness flags.
    pub async fn list_questions(&self, token: Option<&str>) -> Result<Vec<Question>> {
        self.send_json::<(), _>(Method::GET, "/questions/", None, token).await
    }

    pub async fn create_question(
        &self,
        token: &str,
        payload: &QuestionPayload,
    ) -> Result<Question> {
        self.send_json(Method::POST, "/questions/", Some(payload), Some(token)).await
    }

    pub async fn update_question(
        &self,
        token: &str,
        id: u64,
        payload: &QuestionPayload,
    ) -> Result<Question> {
        let path = format!("/questions/{}/", id);
        self.send_json(Method::PUT, &path, Some(payload), Some(token)).await
    }

    pub async fn delete_question(&self, token: &str, id: u64) -> Result<()> {
        let path = format!("/questions/{}/", id);
        self.send::<()>(Method::DELETE, &path, None, Some(token)).await?;
        Ok(())
    }

    pub async fn get_notification(&self, token: &str) -> Result<NotificationSetting> {
        self.send_json::<(), _>(Method::GET, "/notification/", None, Some(token)).await
    }

    pub async fn update_notification(
        &self,
        token: &str,
        setting: &NotificationSetting,
    ) -> Result<NotificationSetting> {
        self.send_json(Method::PUT, "/notification/", Some(setting), Some(token)).await
    }

    /// Most recent attempts, newest first. The server caps the list at 25.
    pub async fn list_attempts(&self, token: &str) -> Result<Vec<TestAttempt>> {
        self.send_json::<(), _>(Method::GET, "/attempts/", None, Some(token)).await
    }

    /// Submit a student's answers. The server scores them and returns the
    /// stored attempt.
    pub async fn submit_attempt(&self, submission: &AttemptSubmission) -> Result<TestAttempt> {
        self.send_json(Method::POST, "/attempts/", Some(submission), None).await
    }

    /// Fetch questions, notification settings and attempts concurrently.
    /// Fails as soon as any of the three requests fails.
    pub async fn load_dashboard(&self, token: &str) -> Result<DashboardData> {
        let (questions, notification, attempts) = try_join3(
            self.list_questions(Some(token)),
            self.get_notification(token),
            self.list_attempts(token),
        )
        .await?;

        Ok(DashboardData {
            questions,
            notification,
            attempts,
        })
    }

    async fn send_json<B, T>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        token: Option<&str>,
    ) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(method, path, body, token).await?;
        decode(response).await
    }

    async fn send<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        token: Option<&str>,
    ) -> Result<Response>
    where
        B: Serialize + ?Sized,
    {
        debug!(%method, path, authenticated = token.is_some(), "api request");
        let request = self.build(method.clone(), path, body, token);
        let response = request.send().await.map_err(|err| {
            warn!(%method, path, error = %err, "api request failed to complete");
            Error::from(err)
        })?;

        let status = response.status();
        if status.is_success() {
            debug!(%method, path, status = status.as_u16(), "api response");
            return Ok(response);
        }

        let err = error_from_response(response).await;
        warn!(%method, path, status = status.as_u16(), error = %err, "api request rejected");
        Err(err)
    }

    fn build<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        token: Option<&str>,
    ) -> RequestBuilder
    where
        B: Serialize + ?Sized,
    {
        let mut request = self
            .client
            .request(method, format!("{}{}", self.base_url, path))
            .header(CONTENT_TYPE, "application/json");

        if let Some(token) = token {
            request = request.header(AUTHORIZATION, format!("Token {}", token));
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        request
    }
}

/// Decode a successful response. `204 No Content` decodes as JSON `null`
/// when the target accepts it (`()`, `Option<_>`), otherwise as `{}`.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    if response.status() == StatusCode::NO_CONTENT {
        return empty_body();
    }
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

fn empty_body<T: DeserializeOwned>() -> Result<T> {
    let value = serde_json::from_value(Value::Null)
        .or_else(|_| serde_json::from_value(Value::Object(Map::new())))?;
    Ok(value)
}

/// Turn a rejected response into an [`Error::Api`], preferring the server's
/// `detail`, then `error`, then a generic message carrying the status.
async fn error_from_response(response: Response) -> Error {
    let status = response.status().as_u16();
    let fallback = format!("Server xatosi ({})", status);

    let message = match response.json::<ErrorPayload>().await {
        Ok(payload) => payload.detail.or(payload.error).unwrap_or(fallback),
        Err(_) => fallback,
    };

    Error::Api { status, message }
}
