//! Command line / environment options for marketplace clients
use std::time::Duration;
use structopt::StructOpt;

use crate::configuration::MarketConfiguration;
use crate::market::Credentials;
use crate::Result;

#[derive(StructOpt, Clone, Debug)]
pub struct MarketOpts {
    /// Marketplace base URL
    #[structopt(long, env = "BIGIOT_MARKET_URL", default_value = "https://market.big-iot.org")]
    pub market_url: String,
    /// Prefix every request with this CORS proxy URL
    #[structopt(long, env = "BIGIOT_CORS_PROXY")]
    pub cors_proxy: Option<String>,
    /// Request timeout in seconds
    #[structopt(long, env = "BIGIOT_TIMEOUT")]
    pub timeout: Option<u64>,
}

impl MarketOpts {
    pub fn configuration(&self) -> Result<MarketConfiguration> {
        let mut configuration = MarketConfiguration::new(&self.market_url)?;
        if let Some(proxy) = &self.cors_proxy {
            configuration = configuration.cors_proxy(proxy.clone());
        }
        if let Some(secs) = self.timeout {
            configuration = configuration.timeout(Duration::from_secs(secs));
        }
        Ok(configuration)
    }
}

#[derive(StructOpt, Clone, Debug)]
pub struct ConsumerOpts {
    /// Consumer id issued by the marketplace
    #[structopt(long = "consumer-id", env = "BIGIOT_CONSUMER_ID", hide_env_values = true)]
    pub id: String,
    /// Consumer secret issued by the marketplace
    #[structopt(
        long = "consumer-secret",
        env = "BIGIOT_CONSUMER_SECRET",
        hide_env_values = true
    )]
    pub secret: String,
}

impl ConsumerOpts {
    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.id.clone(), self.secret.clone())
    }
}

#[derive(StructOpt, Clone, Debug)]
pub struct ProviderOpts {
    /// Provider id issued by the marketplace
    #[structopt(long = "provider-id", env = "BIGIOT_PROVIDER_ID", hide_env_values = true)]
    pub id: String,
    /// Provider secret; also the key access tokens are verified with
    #[structopt(
        long = "provider-secret",
        env = "BIGIOT_PROVIDER_SECRET",
        hide_env_values = true
    )]
    pub secret: Option<String>,
}

impl ProviderOpts {
    pub fn credentials(&self) -> Credentials {
        Credentials {
            id: self.id.clone(),
            secret: self.secret.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(StructOpt)]
    struct Args {
        #[structopt(flatten)]
        market: MarketOpts,
        #[structopt(flatten)]
        consumer: ConsumerOpts,
    }

    #[test]
    fn parses_market_and_consumer_flags() {
        let args = Args::from_iter(vec![
            "test",
            "--market-url",
            "http://localhost:8080",
            "--cors-proxy",
            "http://proxy.local",
            "--consumer-id",
            "Org-Consumer",
            "--consumer-secret",
            "s3cr3t",
        ]);

        let configuration = args.market.configuration().unwrap();
        assert_eq!(
            configuration.graphql_url(),
            "http://proxy.local/http://localhost:8080/graphql"
        );
        let credentials = args.consumer.credentials();
        assert_eq!(credentials.id, "Org-Consumer");
        assert_eq!(credentials.secret.as_deref(), Some("s3cr3t"));
    }
}
