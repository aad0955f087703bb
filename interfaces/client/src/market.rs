//! Marketplace session shared by the Consumer and the Provider side
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use bigiot_model::OfferingRecord;

use crate::configuration::MarketConfiguration;
use crate::graphql::{GraphQlClient, Operation};
use crate::web::WebClient;
use crate::{error::status_reason, Error, Result};

mod consumer;
pub use consumer::Consumer;
mod provider;
pub use provider::Provider;
pub mod queries;

/// Client id and secret issued by the marketplace.
#[derive(Clone)]
pub struct Credentials {
    pub id: String,
    pub secret: Option<String>,
}

impl Credentials {
    pub fn new<I: Into<String>, S: Into<String>>(id: I, secret: S) -> Self {
        Credentials {
            id: id.into(),
            secret: Some(secret.into()),
        }
    }

    pub fn without_secret<I: Into<String>>(id: I) -> Self {
        Credentials {
            id: id.into(),
            secret: None,
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("id", &self.id)
            .field("secret", &self.secret.as_ref().map(|_| "***"))
            .finish()
    }
}

/// Transport towards the marketplace: credential exchange plus bearer
/// authenticated GraphQL once [`authenticate`](#method.authenticate) succeeded.
pub struct MarketClient {
    configuration: MarketConfiguration,
    credentials: Credentials,
    web: WebClient,
    session: Option<GraphQlClient>,
}

impl MarketClient {
    pub fn new(configuration: MarketConfiguration, credentials: Credentials) -> Self {
        let web = WebClient::builder()
            .timeout(configuration.request_timeout())
            .build();
        MarketClient {
            configuration,
            credentials,
            web,
            session: None,
        }
    }

    pub fn configuration(&self) -> &MarketConfiguration {
        &self.configuration
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// Exchanges the client credentials for a bearer token and opens a
    /// GraphQL session with it. A rejected exchange leaves no session behind.
    pub async fn authenticate(&mut self) -> Result<()> {
        self.session = None;

        let url = self.configuration.access_token_url(
            &self.credentials.id,
            self.credentials.secret.as_deref().unwrap_or_default(),
        );
        let token = self
            .web
            .get(&url)
            .send()
            .text()
            .await
            .map_err(|e| match e {
                Error::HttpStatusCode { code, .. } => Error::AuthenticationError {
                    code,
                    reason: status_reason(code),
                },
                e => e,
            })?;

        self.session = Some(GraphQlClient::new(
            self.configuration.graphql_url(),
            token.trim().to_string(),
            self.configuration.request_timeout(),
        ));
        log::info!("authenticated {} on {}", self.credentials.id, self.configuration.market_url());
        Ok(())
    }

    /// Runs a GraphQL operation, failing fast when there is no session.
    pub(crate) async fn execute<T: DeserializeOwned>(
        &self,
        operation: &Operation,
        variables: Value,
        precondition: Error,
    ) -> Result<T> {
        match &self.session {
            Some(session) => session.execute(operation, variables).await,
            None => Err(precondition),
        }
    }

    /// Point lookup; `None` if the marketplace does not know `offering_id`.
    pub(crate) async fn offering(
        &self,
        offering_id: &str,
        precondition: Error,
    ) -> Result<Option<OfferingRecord>> {
        self.execute(
            &queries::OFFERING,
            json!({ "offeringId": offering_id }),
            precondition,
        )
        .await
    }

    pub(crate) fn web(&self) -> &WebClient {
        &self.web
    }
}
