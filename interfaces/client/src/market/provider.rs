//! Provider part of the marketplace API
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use serde_json::json;

use bigiot_model::{Activation, Offering, OfferingRecord};

use super::{queries, Credentials, MarketClient};
use crate::configuration::MarketConfiguration;
use crate::token::{self, TokenClaims};
use crate::{Error, Result};

const ROLE: &str = "provider";

/// Activation window used when the caller does not pick an expiration time.
pub const DEFAULT_ACTIVATION_MINUTES: i64 = 10;

#[derive(Deserialize)]
struct DeletedOffering {
    id: String,
}

/// Registers, activates and deletes offerings, and validates the access
/// tokens Consumers present to the offering endpoints.
pub struct Provider {
    market: MarketClient,
}

impl Provider {
    pub fn new(configuration: MarketConfiguration, credentials: Credentials) -> Self {
        Provider {
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

    /// Publishes `offering`, active until `expiration_time` (default: ten
    /// minutes from now). Returns a copy of `offering` carrying the id the
    /// marketplace assigned.
    pub async fn register(
        &self,
        offering: &Offering,
        expiration_time: Option<DateTime<Utc>>,
    ) -> Result<Offering> {
        let mut input = serde_json::to_value(offering)?;
        input["id"] = json!(self.id());
        input["activation"] = serde_json::to_value(Activation::until(expiration(expiration_time)))?;

        let record: OfferingRecord = self
            .market
            .execute(
                &queries::ADD_OFFERING,
                json!({ "newOffering": input }),
                not_authenticated("registering an offering"),
            )
            .await?;
        log::info!("offering {} registered as {}", offering.name, record.id);
        Ok(offering.with_id(record.id))
    }

    /// Removes a registered offering from the marketplace, returning its id.
    pub async fn delete(&self, offering: &Offering) -> Result<String> {
        self.ensure_authenticated("deleting an offering")?;
        let offering_id = registered_id(offering, "deleting it")?;

        let deleted: DeletedOffering = self
            .market
            .execute(
                &queries::DELETE_OFFERING,
                json!({ "offering": { "id": offering_id } }),
                not_authenticated("deleting an offering"),
            )
            .await?;
        log::info!("offering {} deleted", deleted.id);
        Ok(deleted.id)
    }

    /// Sets the activation window of a registered offering.
    pub async fn activate(
        &self,
        offering: &Offering,
        expiration_time: Option<DateTime<Utc>>,
    ) -> Result<OfferingRecord> {
        self.ensure_authenticated("activating an offering")?;
        let offering_id = registered_id(offering, "activating it")?;
        let activation = Activation::until(expiration(expiration_time));

        let record: OfferingRecord = self
            .market
            .execute(
                &queries::ACTIVATE_OFFERING,
                json!({
                    "offering": {
                        "id": offering_id,
                        "expirationTime": activation.expiration_time,
                    }
                }),
                not_authenticated("activating an offering"),
            )
            .await?;
        log::info!("offering {} active until {:?}", record.id, activation.expires_at());
        Ok(record)
    }

    /// Looks an offering up by id.
    pub async fn get(&self, offering_id: &str) -> Result<Option<OfferingRecord>> {
        self.market
            .offering(offering_id, not_authenticated("looking up an offering"))
            .await
    }

    /// Verifies a token presented by a Consumer against this provider's
    /// secret and returns its claims.
    pub fn validate_token(&self, token: &str) -> Result<TokenClaims> {
        let secret = self.market.credentials().secret.as_deref();
        token::validate_token(secret, token).map_err(|e| {
            log::debug!("rejected access token: {}", e);
            Error::from(e)
        })
    }

    fn ensure_authenticated(&self, action: &'static str) -> Result<()> {
        if self.market.is_authenticated() {
            Ok(())
        } else {
            Err(not_authenticated(action))
        }
    }
}

fn expiration(expiration_time: Option<DateTime<Utc>>) -> DateTime<Utc> {
    expiration_time.unwrap_or_else(|| Utc::now() + Duration::minutes(DEFAULT_ACTIVATION_MINUTES))
}

fn registered_id<'a>(offering: &'a Offering, action: &'static str) -> Result<&'a str> {
    offering
        .id
        .as_deref()
        .ok_or(Error::NotRegistered { action })
}

fn not_authenticated(action: &'static str) -> Error {
    Error::NotAuthenticated { role: ROLE, action }
}
