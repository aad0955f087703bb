//! Consumer part of the marketplace API
use serde::{de::DeserializeOwned, Serialize};
use serde_json::json;

use bigiot_model::{OfferingQuery, OfferingRecord, Subscription};

use super::{queries, Credentials, MarketClient};
use crate::configuration::MarketConfiguration;
use crate::web::{with_query, QueryParamsBuilder};
use crate::{error::status_reason, Error, Result};

const ROLE: &str = "consumer";

#[derive(Serialize)]
struct AddOfferingQuery<'a> {
    id: &'a str,
    #[serde(flatten)]
    query: &'a OfferingQuery,
}

#[derive(serde::Deserialize)]
struct QueryHandle {
    id: String,
}

/// Discovers, subscribes to and accesses offerings.
pub struct Consumer {
    market: MarketClient,
}

impl Consumer {
    pub fn new(configuration: MarketConfiguration, credentials: Credentials) -> Self {
        Consumer {
            market: MarketClient::new(configuration, credentials),
        }
    }

    pub fn id(&self) -> &str {
        &self.market.credentials().id
    }

    pub fn market(&self) -> &MarketClient {
        &self.market
    }

    pub fn is_authenticated(&self) -> bool {
        self.market.is_authenticated()
    }

    pub async fn authenticate(&mut self) -> Result<()> {
        self.market.authenticate().await
    }

    /// Registers `query` as a standing offering query and returns the offerings
    /// currently matching it.
    pub async fn discover(&self, query: &OfferingQuery) -> Result<Vec<OfferingRecord>> {
        let input = AddOfferingQuery {
            id: self.id(),
            query,
        };
        let handle: QueryHandle = self
            .market
            .execute(
                &queries::ADD_OFFERING_QUERY,
                json!({ "newOfferingQuery": serde_json::to_value(&input)? }),
                not_authenticated("discovering offerings"),
            )
            .await?;
        log::debug!("offering query {} registered", handle.id);

        let offerings: Vec<OfferingRecord> = self
            .market
            .execute(
                &queries::MATCHING_OFFERINGS,
                json!({ "queryId": handle.id }),
                not_authenticated("discovering offerings"),
            )
            .await?;
        log::info!("{} offering(s) matching {}", offerings.len(), query.rdf_uri);
        Ok(offerings)
    }

    /// Exchanges an offering id for an access token and the offering's endpoint.
    pub async fn subscribe(&self, offering_id: &str) -> Result<Subscription> {
        let subscription: Subscription = self
            .market
            .execute(
                &queries::SUBSCRIBE_CONSUMER_TO_OFFERING,
                json!({
                    "subscription": {
                        "id": self.id(),
                        "offeringId": offering_id,
                    }
                }),
                not_authenticated("subscribing to an offering"),
            )
            .await?;
        log::info!("subscribed to {} ({})", offering_id, subscription.id);
        Ok(subscription)
    }

    /// Calls the subscribed offering's own endpoint, not the marketplace.
    ///
    /// `params` become the query string; the response body is decoded as JSON
    /// into `T` (use `serde_json::Value` when the shape is not known).
    pub async fn access<T, I, K, V>(&self, subscription: &Subscription, params: I) -> Result<T>
    where
        T: DeserializeOwned,
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: ToString,
    {
        let endpoint = subscription
            .endpoint()
            .ok_or_else(|| Error::MissingEndpoint {
                offering_id: subscription.offering.id.clone(),
            })?;

        let query = params
            .into_iter()
            .fold(QueryParamsBuilder::new(), |builder, (k, v)| builder.put(k, v))
            .build();
        let url = self
            .market
            .configuration()
            .normalize_url(&with_query(&endpoint.uri, &query));

        self.market
            .web()
            .get(&url)
            .bearer_auth(&subscription.access_token)
            .send()
            .json()
            .await
            .map_err(|e| match e {
                Error::HttpStatusCode { code, url, .. } => Error::ProviderAccessError {
                    code,
                    reason: status_reason(code),
                    url,
                },
                e => e,
            })
    }

    /// Looks an offering up by id.
    pub async fn get(&self, offering_id: &str) -> Result<Option<OfferingRecord>> {
        self.market
            .offering(offering_id, not_authenticated("looking up an offering"))
            .await
    }
}

fn not_authenticated(action: &'static str) -> Error {
    Error::NotAuthenticated { role: ROLE, action }
}
