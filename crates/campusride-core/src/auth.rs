//! Auth client adapter.
//!
//! Talks to the account service and folds every outcome (2xx, rejected
//! request, broken transport) into an [`AuthResult`]. Nothing outside this
//! module ever sees a `reqwest` error.
//!
//! Requests are sent once. There is no retry and no backoff; a transient
//! failure surfaces immediately as a `Failure`.

use std::time::Duration;

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::Config;

/// Message shown when the service gives no usable explanation.
pub const INTERNAL_SERVER_ERROR: &str = "Internal server error";

pub const LOGIN_PATH: &str = "/api/login";
pub const SIGNUP_PATH: &str = "/api/signup";

/// Outcome of an authentication attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthResult {
    /// The service accepted the request. The payload is not interpreted.
    Success { payload: Value },
    /// The attempt failed; `user_message` is shown as-is.
    Failure { user_message: String },
    /// The user backed out of a third-party sign-in.
    Cancelled,
}

impl AuthResult {
    pub fn failure(user_message: impl Into<String>) -> Self {
        AuthResult::Failure {
            user_message: user_message.into(),
        }
    }

    pub fn internal_error() -> Self {
        Self::failure(INTERNAL_SERVER_ERROR)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, AuthResult::Success { .. })
    }
}

/// Body of `POST /api/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum LoginCredentials {
    #[serde(rename_all = "camelCase")]
    EmailOrUsername {
        email_or_username: String,
        password: String,
    },
    Email {
        email: String,
        password: String,
    },
    Phone {
        phone: String,
    },
}

/// Body of `POST /api/signup`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignupProfile {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AuthRequest {
    Login(LoginCredentials),
    Signup(SignupProfile),
}

impl AuthRequest {
    pub fn path(&self) -> &'static str {
        match self {
            AuthRequest::Login(_) => LOGIN_PATH,
            AuthRequest::Signup(_) => SIGNUP_PATH,
        }
    }
}

/// Maps a non-2xx response body to a failure.
///
/// A JSON object with a non-empty string `message` wins; anything else falls
/// back to [`INTERNAL_SERVER_ERROR`].
pub fn failure_from_body(body: &str) -> AuthResult {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_owned)
        })
        .filter(|message| !message.is_empty());

    match message {
        Some(message) => AuthResult::failure(message),
        None => AuthResult::internal_error(),
    }
}

/// Parses a 2xx body into the opaque success payload.
fn success_from_body(body: &str) -> AuthResult {
    let payload = serde_json::from_str(body).unwrap_or(Value::Null);
    AuthResult::Success { payload }
}

/// HTTP client for the account service.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct AuthClient {
    http: reqwest::Client,
    base_url: String,
}

impl AuthClient {
    /// Builds a client for `base_url` with an optional request timeout.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("Failed to build HTTP client")?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Builds a client from the resolved configuration.
    ///
    /// # Errors
    /// Returns an error if the base URL is invalid or the client cannot be built.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.api_base_url()?, config.request_timeout())
    }

    pub async fn login(&self, credentials: &LoginCredentials) -> AuthResult {
        self.post(LOGIN_PATH, credentials).await
    }

    pub async fn signup(&self, profile: &SignupProfile) -> AuthResult {
        self.post(SIGNUP_PATH, profile).await
    }

    pub async fn submit(&self, request: &AuthRequest) -> AuthResult {
        match request {
            AuthRequest::Login(credentials) => self.login(credentials).await,
            AuthRequest::Signup(profile) => self.signup(profile).await,
        }
    }

    async fn post<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> AuthResult {
        let url = format!("{}{path}", self.base_url);

        let response = match self.http.post(&url).json(body).send().await {
            Ok(response) => response,
            Err(err) => {
                warn!(%url, error = %err, "auth request failed before a response arrived");
                return AuthResult::internal_error();
            }
        };

        let status = response.status();
        let text = match response.text().await {
            Ok(text) => text,
            Err(err) => {
                warn!(%url, %status, error = %err, "failed to read auth response body");
                return AuthResult::internal_error();
            }
        };

        if status.is_success() {
            debug!(%url, %status, "auth request accepted");
            success_from_body(&text)
        } else {
            let result = failure_from_body(&text);
            warn!(%url, %status, "auth request rejected");
            result
        }
    }
}

/// User-Agent for requests to the account service.
pub const USER_AGENT: &str = concat!("campusride/", env!("CARGO_PKG_VERSION"));

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn login_body() -> LoginCredentials {
        LoginCredentials::EmailOrUsername {
            email_or_username: "alex".to_string(),
            password: "secret1".to_string(),
        }
    }

    #[test]
    fn test_failure_from_body_uses_message() {
        assert_eq!(
            failure_from_body(r#"{"message":"Invalid credentials"}"#),
            AuthResult::failure("Invalid credentials")
        );
    }

    #[test]
    fn test_failure_from_body_falls_back() {
        for body in ["", "not json", "{}", r#"{"message":""}"#, r#"{"message":42}"#, "[]"] {
            assert_eq!(failure_from_body(body), AuthResult::internal_error(), "{body:?}");
        }
    }

    #[test]
    fn test_success_payload_is_opaque() {
        assert_eq!(
            success_from_body(r#"{"token":"abc"}"#),
            AuthResult::Success {
                payload: json!({"token": "abc"})
            }
        );
        assert_eq!(
            success_from_body(""),
            AuthResult::Success {
                payload: Value::Null
            }
        );
        assert_eq!(
            success_from_body("welcome"),
            AuthResult::Success {
                payload: Value::Null
            }
        );
    }

    #[tokio::test]
    async fn test_login_success_passes_payload_through() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/login"))
            .and(body_json(json!({"emailOrUsername": "alex", "password": "secret1"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"user": {"id": 7}})))
            .expect(1)
            .mount(&server)
            .await;

        let client = AuthClient::new(server.uri(), None).unwrap();
        let result = client.login(&login_body()).await;

        assert_eq!(
            result,
            AuthResult::Success {
                payload: json!({"user": {"id": 7}})
            }
        );
    }

    #[tokio::test]
    async fn test_login_rejection_surfaces_server_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/login"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({"message": "Invalid credentials"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = AuthClient::new(server.uri(), None).unwrap();
        assert_eq!(
            client.login(&login_body()).await,
            AuthResult::failure("Invalid credentials")
        );
    }

    #[tokio::test]
    async fn test_signup_rejection_without_message_uses_fallback() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/signup"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let client = AuthClient::new(format!("{}/", server.uri()), None).unwrap();
        let profile = SignupProfile {
            username: "alex".to_string(),
            email: "a@b.com".to_string(),
            password: "secret1".to_string(),
        };
        assert_eq!(client.signup(&profile).await, AuthResult::internal_error());
    }

    #[tokio::test]
    async fn test_unreachable_server_is_internal_error() {
        // Bind then drop to get a port with nothing listening.
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let client = AuthClient::new(format!("http://127.0.0.1:{port}"), None).unwrap();
        assert_eq!(
            client.login(&login_body()).await,
            AuthResult::internal_error()
        );
    }

    #[tokio::test]
    async fn test_timeout_is_internal_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/login"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
            .mount(&server)
            .await;

        let client = AuthClient::new(server.uri(), Some(Duration::from_millis(50))).unwrap();
        assert_eq!(
            client.login(&login_body()).await,
            AuthResult::internal_error()
        );
    }

    #[tokio::test]
    async fn test_submit_routes_by_request_kind() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/signup"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"created": true})))
            .expect(1)
            .mount(&server)
            .await;

        let client = AuthClient::new(server.uri(), None).unwrap();
        let request = AuthRequest::Signup(SignupProfile {
            username: "alex".to_string(),
            email: "a@b.com".to_string(),
            password: "secret1".to_string(),
        });
        assert_eq!(request.path(), SIGNUP_PATH);
        assert!(client.submit(&request).await.is_success());
    }
}
