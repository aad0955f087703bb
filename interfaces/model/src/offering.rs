use serde::{Deserialize, Serialize};

pub const DEFAULT_LICENSE: &str = "OPEN_DATA_LICENSE";
pub const DEFAULT_CURRENCY: &str = "EUR";
pub const DEFAULT_AMOUNT: f64 = 0.001;

/// Offering descriptor as published by a Provider.
///
/// `id` stays empty until the marketplace registers the offering.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Offering {
    #[serde(rename = "id", skip_serializing_if = "Option::is_none", default)]
    pub id: Option<String>,
    #[serde(rename = "name")]
    pub name: String,
    #[serde(rename = "rdfUri")]
    pub rdf_uri: String,
    #[serde(rename = "inputData", default)]
    pub input_data: Vec<DataField>,
    #[serde(rename = "outputData", default)]
    pub output_data: Vec<DataField>,
    #[serde(rename = "endpoints", default)]
    pub endpoints: Endpoint,
    #[serde(rename = "extent", default)]
    pub extent: SpatialExtent,
    #[serde(rename = "license", default = "default_license")]
    pub license: String,
    #[serde(rename = "price", default)]
    pub price: Price,
}

impl Offering {
    pub fn new<N: Into<String>, U: Into<String>>(name: N, rdf_uri: U) -> Offering {
        Offering {
            id: None,
            name: name.into(),
            rdf_uri: rdf_uri.into(),
            input_data: vec![],
            output_data: vec![],
            endpoints: Endpoint::default(),
            extent: SpatialExtent::default(),
            license: default_license(),
            price: Price::default(),
        }
    }

    pub fn with_input(mut self, field: DataField) -> Self {
        self.input_data.push(field);
        self
    }

    pub fn with_output(mut self, field: DataField) -> Self {
        self.output_data.push(field);
        self
    }

    pub fn with_endpoint(mut self, endpoint: Endpoint) -> Self {
        self.endpoints = endpoint;
        self
    }

    pub fn with_extent(mut self, extent: SpatialExtent) -> Self {
        self.extent = extent;
        self
    }

    pub fn with_license<T: Into<String>>(mut self, license: T) -> Self {
        self.license = license.into();
        self
    }

    pub fn with_price(mut self, price: Price) -> Self {
        self.price = price;
        self
    }

    /// Copy of this offering stamped with a marketplace id.
    pub fn with_id<T: Into<String>>(&self, id: T) -> Self {
        Offering {
            id: Some(id.into()),
            ..self.clone()
        }
    }

    pub fn is_registered(&self) -> bool {
        self.id.is_some()
    }
}

fn default_license() -> String {
    DEFAULT_LICENSE.to_string()
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DataField {
    #[serde(rename = "name")]
    pub name: String,
    #[serde(rename = "rdfUri")]
    pub rdf_uri: String,
}

impl DataField {
    pub fn new<N: Into<String>, U: Into<String>>(name: N, rdf_uri: U) -> DataField {
        DataField {
            name: name.into(),
            rdf_uri: rdf_uri.into(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EndpointType {
    HttpGet,
    HttpPost,
    Websocket,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccessInterfaceType {
    BigiotLib,
    BigiotProxy,
    External,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Endpoint {
    #[serde(rename = "uri", default)]
    pub uri: String,
    #[serde(rename = "endpointType")]
    pub endpoint_type: EndpointType,
    #[serde(rename = "accessInterfaceType")]
    pub access_interface_type: AccessInterfaceType,
}

impl Endpoint {
    pub fn new<T: Into<String>>(uri: T) -> Endpoint {
        Endpoint {
            uri: uri.into(),
            ..Endpoint::default()
        }
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Endpoint {
            uri: String::new(),
            endpoint_type: EndpointType::HttpGet,
            access_interface_type: AccessInterfaceType::BigiotLib,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(rename = "lat")]
    pub lat: f64,
    #[serde(rename = "lng")]
    pub lng: f64,
}

/// Rectangle spanned by two opposite corners.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    #[serde(rename = "l1")]
    pub l1: Location,
    #[serde(rename = "l2")]
    pub l2: Location,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SpatialExtent {
    #[serde(rename = "city", default)]
    pub city: String,
    #[serde(rename = "boundary", skip_serializing_if = "Option::is_none", default)]
    pub boundary: Option<BoundingBox>,
}

impl SpatialExtent {
    pub fn city<T: Into<String>>(city: T) -> SpatialExtent {
        SpatialExtent {
            city: city.into(),
            boundary: None,
        }
    }

    pub fn with_boundary(mut self, boundary: BoundingBox) -> Self {
        self.boundary = Some(boundary);
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PricingModel {
    Free,
    PerAccess,
    PerMonth,
    PerByte,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Money {
    #[serde(rename = "amount")]
    pub amount: f64,
    #[serde(rename = "currency")]
    pub currency: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Price {
    #[serde(rename = "pricingModel")]
    pub pricing_model: PricingModel,
    #[serde(rename = "money", skip_serializing_if = "Option::is_none", default)]
    pub money: Option<Money>,
}

impl Price {
    pub fn free() -> Price {
        Price {
            pricing_model: PricingModel::Free,
            money: None,
        }
    }

    pub fn per_access<T: Into<String>>(amount: f64, currency: T) -> Price {
        Price {
            pricing_model: PricingModel::PerAccess,
            money: Some(Money {
                amount,
                currency: currency.into(),
            }),
        }
    }
}

/// 0.001 EUR per access.
impl Default for Price {
    fn default() -> Self {
        Price::per_access(DEFAULT_AMOUNT, DEFAULT_CURRENCY)
    }
}
