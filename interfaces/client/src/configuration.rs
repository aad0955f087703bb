use std::time::Duration;
use url::Url;

use crate::Result;

pub const DEFAULT_MARKET_URL: &str = "https://market.big-iot.org";

/// Marketplace connection settings.
#[derive(Clone, Debug)]
pub struct MarketConfiguration {
    market_url: Url,
    cors_proxy: Option<String>,
    timeout: Option<Duration>,
}

impl MarketConfiguration {
    /// Settings for the marketplace at `market_url`.
    pub fn new(market_url: &str) -> Result<MarketConfiguration> {
        Ok(MarketConfiguration {
            market_url: Url::parse(market_url)?,
            cors_proxy: None,
            timeout: None,
        })
    }

    /// Every request URL gets prefixed as `<proxy>/<url>`.
    pub fn cors_proxy<T: Into<String>>(mut self, proxy: T) -> Self {
        self.cors_proxy = Some(proxy.into().trim_end_matches('/').to_string());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn market_url(&self) -> &Url {
        &self.market_url
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Token issuing endpoint for the given client credentials.
    pub fn access_token_url(&self, client_id: &str, client_secret: &str) -> String {
        let mut url = self.market_url.clone();
        url.set_path("/accessToken");
        url.query_pairs_mut()
            .clear()
            .append_pair("clientId", client_id)
            .append_pair("clientSecret", client_secret);
        self.normalize_url(url.as_str())
    }

    pub fn graphql_url(&self) -> String {
        let mut url = self.market_url.clone();
        url.set_path("/graphql");
        url.set_query(None);
        self.normalize_url(url.as_str())
    }

    pub fn normalize_url(&self, url: &str) -> String {
        match &self.cors_proxy {
            Some(proxy) => format!("{}/{}", proxy, url),
            None => url.to_string(),
        }
    }
}

impl Default for MarketConfiguration {
    fn default() -> Self {
        MarketConfiguration {
            market_url: Url::parse(DEFAULT_MARKET_URL).expect("default market url is valid"),
            cors_proxy: None,
            timeout: None,
        }
    }
}
