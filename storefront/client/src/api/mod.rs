//! # Backend transport
//!
//! Every storefront call is a plain REST request against the Medica backend.
//!
//! ## Session
//! - The caller's session cookie is forwarded verbatim in the `Cookie` header
//! - The session itself lives on a separate auth service (`/get-session`)
//!
//! ## Envelope
//! - `{ success, message, data }`
//! - Missing `success` counts as a failure
//! - Non-JSON bodies are transport failures, shown as "Something went wrong"
//!
//! Nothing here retries or sets its own timeout.
use reqwest::{Client, Method, RequestBuilder, header::COOKIE};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::{debug, warn};

pub mod endpoints;

use crate::{
    config::Config,
    error::{Error, Result},
    models::Session,
};

#[derive(Deserialize)]
struct Envelope {
    success: Option<bool>,
    message: Option<String>,
    #[serde(default)]
    data: Value,
}

/// A successful envelope, `data` decoded into `T` when present.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply<T> {
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> Reply<T> {
    pub fn into_data(self) -> Result<T> {
        self.data.ok_or(Error::MissingData)
    }

    pub fn message_or(&self, fallback: &str) -> String {
        self.message
            .as_deref()
            .filter(|m| !m.is_empty())
            .unwrap_or(fallback)
            .to_string()
    }
}

pub fn decode_envelope<T: DeserializeOwned>(body: &str) -> Result<Reply<T>> {
    let envelope: Envelope = serde_json::from_str(body)?;

    if envelope.success != Some(true) {
        return Err(Error::backend(envelope.message));
    }

    let data = match envelope.data {
        Value::Null => None,
        value => Some(serde_json::from_value(value)?),
    };

    Ok(Reply {
        message: envelope.message,
        data,
    })
}

#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    backend_url: String,
    auth_url: String,
    cookie: Option<String>,
}

impl ApiClient {
    pub fn new(config: &Config) -> Self {
        Self {
            http: Client::new(),
            backend_url: config.backend_url.clone(),
            auth_url: config.auth_url.clone(),
            cookie: config.cookie.clone(),
        }
    }

    /// Same connection pool, different caller.
    pub fn for_cookie(&self, cookie: Option<String>) -> Self {
        Self {
            cookie,
            ..self.clone()
        }
    }

    pub fn cookie(&self) -> Option<&str> {
        self.cookie.as_deref()
    }

    fn request(&self, method: Method, base: &str, path: &str) -> RequestBuilder {
        let url = format!("{base}{path}");
        debug!("{method} {url}");

        let builder = self.http.request(method, url);

        match &self.cookie {
            Some(cookie) => builder.header(COOKIE, cookie),
            None => builder,
        }
    }

    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<Reply<T>> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        #[cfg(feature = "verbose")]
        debug!("Backend replied {status}: {body}");

        decode_envelope(&body).inspect_err(|e| match e {
            Error::Backend { message } => debug!("Backend refused ({status}): {message}"),
            other => warn!("Backend call failed ({status}): {other:?}"),
        })
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<Reply<T>> {
        self.execute(self.request(Method::GET, &self.backend_url, path))
            .await
    }

    pub async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<Reply<T>>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.execute(self.request(Method::GET, &self.backend_url, path).query(query))
            .await
    }

    pub async fn send_json<T, B>(&self, method: Method, path: &str, body: &B) -> Result<Reply<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.execute(self.request(method, &self.backend_url, path).json(body))
            .await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<Reply<T>> {
        self.execute(self.request(Method::DELETE, &self.backend_url, path))
            .await
    }

    /// The auth service answers with the bare session object, or `null`.
    pub async fn get_session(&self) -> Result<Option<Session>> {
        let response = self
            .request(Method::GET, &self.auth_url, endpoints::auth::SESSION)
            .send()
            .await?;
        let body = response.text().await?;

        let session: Option<Session> = serde_json::from_str(&body)?;
        if session.is_none() {
            debug!("Session is missing");
        }

        Ok(session)
    }
}
