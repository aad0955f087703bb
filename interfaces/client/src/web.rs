//! Web utils
use awc::{ClientRequest, SendClientRequest};
use bytes::Bytes;
use serde::{de::DeserializeOwned, Serialize};
use std::{fmt, time::Duration};
use url::form_urlencoded;

use crate::{Error, Result};

/// Upper bound for response bodies; discovery results can be large.
const PAYLOAD_LIMIT: usize = 8 * 1024 * 1024;

#[derive(Clone, Debug)]
pub enum WebAuth {
    Bearer(String),
}

/// Convenient wrapper for the [`awc::Client`](
/// https://docs.rs/awc/3/awc/struct.Client.html) with builder.
pub struct WebClient {
    pub(crate) awc: awc::Client,
}

pub struct WebRequest<T> {
    inner_request: T,
    url: String,
}

impl WebClient {
    pub fn builder() -> WebClientBuilder {
        WebClientBuilder::default()
    }

    pub fn get(&self, url: &str) -> WebRequest<ClientRequest> {
        log::debug!("doing get on {}", url);
        WebRequest {
            inner_request: self.awc.get(url),
            url: url.to_string(),
        }
    }

    pub fn post(&self, url: &str) -> WebRequest<ClientRequest> {
        log::debug!("doing post on {}", url);
        WebRequest {
            inner_request: self.awc.post(url),
            url: url.to_string(),
        }
    }
}

impl Default for WebClient {
    fn default() -> Self {
        WebClient {
            awc: awc::Client::default(),
        }
    }
}

impl WebRequest<ClientRequest> {
    /// Per-request bearer token, on top of the client wide authorization.
    pub fn bearer_auth<T: fmt::Display>(self, token: T) -> Self {
        WebRequest {
            inner_request: self.inner_request.bearer_auth(token),
            url: self.url,
        }
    }

    pub fn send_json<T: Serialize>(self, value: &T) -> WebRequest<SendClientRequest> {
        WebRequest {
            inner_request: self.inner_request.send_json(value),
            url: self.url,
        }
    }

    pub fn send(self) -> WebRequest<SendClientRequest> {
        WebRequest {
            inner_request: self.inner_request.send(),
            url: self.url,
        }
    }
}

impl WebRequest<SendClientRequest> {
    pub async fn json<T: DeserializeOwned>(self) -> Result<T> {
        let url = self.url;
        let mut response = self
            .inner_request
            .await
            .map_err(|e| Error::from((e, url.clone())))?;

        let code = response.status();
        if !code.is_success() {
            let body = response.body().await.unwrap_or_default();
            return Err(Error::HttpStatusCode {
                code,
                url,
                msg: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        response
            .json()
            .limit(PAYLOAD_LIMIT)
            .await
            .map_err(Error::from)
    }

    pub async fn body(self) -> Result<Bytes> {
        let url = self.url;
        let mut response = self
            .inner_request
            .await
            .map_err(|e| Error::from((e, url.clone())))?;

        let code = response.status();
        let body = response.body().limit(PAYLOAD_LIMIT).await?;
        if !code.is_success() {
            return Err(Error::HttpStatusCode {
                code,
                url,
                msg: String::from_utf8_lossy(&body).into_owned(),
            });
        }
        Ok(body)
    }

    pub async fn text(self) -> Result<String> {
        let body = self.body().await?;
        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}

#[derive(Clone, Debug, Default)]
pub struct WebClientBuilder {
    pub(crate) auth: Option<WebAuth>,
    pub(crate) timeout: Option<Duration>,
}

impl WebClientBuilder {
    pub fn auth(mut self, auth: WebAuth) -> Self {
        self.auth = Some(auth);
        self
    }

    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> WebClient {
        let mut builder = awc::Client::builder();

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(auth) = &self.auth {
            builder = match auth {
                WebAuth::Bearer(token) => builder.bearer_auth(token),
            }
        }

        WebClient {
            awc: builder.finish(),
        }
    }
}

/// Builder for the query part of the URLs.
pub struct QueryParamsBuilder<'a> {
    serializer: form_urlencoded::Serializer<'a, String>,
}

impl<'a> QueryParamsBuilder<'a> {
    pub fn new() -> Self {
        let serializer = form_urlencoded::Serializer::new("".into());
        QueryParamsBuilder { serializer }
    }

    pub fn put<N: AsRef<str>, V: ToString>(mut self, name: N, value: V) -> Self {
        self.serializer
            .append_pair(name.as_ref(), value.to_string().as_str());
        self
    }

    pub fn build(mut self) -> String {
        self.serializer.finish()
    }
}

impl<'a> Default for QueryParamsBuilder<'a> {
    fn default() -> Self {
        QueryParamsBuilder::new()
    }
}

/// Appends `query` to `url`, keeping any query the url already has.
pub(crate) fn with_query(url: &str, query: &str) -> String {
    if query.is_empty() {
        url.to_string()
    } else if url.contains('?') {
        format!("{}&{}", url, query)
    } else {
        format!("{}?{}", url, query)
    }
}
