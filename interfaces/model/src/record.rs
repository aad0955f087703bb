use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::null_as_default;
use crate::offering::{Endpoint, Price, SpatialExtent};

/// Offering as known by the marketplace.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OfferingRecord {
    #[serde(rename = "id")]
    pub id: String,
    #[serde(rename = "name", default)]
    pub name: Option<String>,
    #[serde(rename = "provider", default)]
    pub provider: Option<ProviderInfo>,
    #[serde(rename = "activation", default)]
    pub activation: Option<Activation>,
    #[serde(rename = "rdfAnnotation", default)]
    pub rdf_annotation: Option<RdfAnnotation>,
    #[serde(rename = "inputs", default, deserialize_with = "null_as_default")]
    pub inputs: Vec<DataFieldRecord>,
    #[serde(rename = "outputs", default, deserialize_with = "null_as_default")]
    pub outputs: Vec<DataFieldRecord>,
    #[serde(rename = "endpoints", default, deserialize_with = "null_as_default")]
    pub endpoints: Vec<Endpoint>,
    #[serde(rename = "spatialExtent", default)]
    pub spatial_extent: Option<SpatialExtent>,
    #[serde(rename = "license", default)]
    pub license: Option<String>,
    #[serde(rename = "price", default)]
    pub price: Option<Price>,
}

impl OfferingRecord {
    /// Endpoint the Consumer talks to when accessing this offering.
    pub fn endpoint(&self) -> Option<&Endpoint> {
        self.endpoints.first()
    }

    pub fn rdf_uri(&self) -> Option<&str> {
        self.rdf_annotation.as_ref().map(|a| a.uri.as_str())
    }

    pub fn city(&self) -> Option<&str> {
        self.spatial_extent.as_ref().map(|e| e.city.as_str())
    }

    pub fn provider_id(&self) -> Option<&str> {
        self.provider.as_ref().map(|p| p.id.as_str())
    }

    pub fn organization_id(&self) -> Option<&str> {
        self.provider
            .as_ref()
            .and_then(|p| p.organization.as_ref())
            .map(|o| o.id.as_str())
    }

    pub fn is_active(&self) -> bool {
        self.activation.as_ref().map_or(false, |a| a.status)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProviderInfo {
    #[serde(rename = "id")]
    pub id: String,
    #[serde(rename = "name", default)]
    pub name: Option<String>,
    #[serde(rename = "organization", default)]
    pub organization: Option<Organization>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    #[serde(rename = "id")]
    pub id: String,
    #[serde(rename = "name", default)]
    pub name: Option<String>,
}

/// Activation window of an offering. `expiration_time` is in milliseconds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Activation {
    #[serde(rename = "status")]
    pub status: bool,
    #[serde(rename = "expirationTime")]
    pub expiration_time: i64,
}

impl Activation {
    pub fn until(expiration: DateTime<Utc>) -> Activation {
        Activation {
            status: true,
            expiration_time: expiration.timestamp_millis(),
        }
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.expiration_time).single()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RdfAnnotation {
    #[serde(rename = "uri")]
    pub uri: String,
    #[serde(rename = "label", default)]
    pub label: Option<String>,
    #[serde(rename = "proposed", default)]
    pub proposed: Option<bool>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DataFieldRecord {
    #[serde(rename = "name")]
    pub name: String,
    #[serde(rename = "rdfAnnotation")]
    pub rdf_annotation: RdfAnnotation,
}
