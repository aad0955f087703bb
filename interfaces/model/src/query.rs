use serde::{Deserialize, Serialize};

use crate::offering::{DataField, Offering, Price, SpatialExtent};

/// Discovery query: describes the offerings a Consumer is looking for.
///
/// Constraints left as `None` are not sent to the marketplace, so it does not
/// filter on them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OfferingQuery {
    #[serde(rename = "name")]
    pub name: String,
    #[serde(rename = "rdfUri")]
    pub rdf_uri: String,
    #[serde(rename = "inputData", default)]
    pub input_data: Vec<DataField>,
    #[serde(rename = "outputData", default)]
    pub output_data: Vec<DataField>,
    #[serde(rename = "extent", skip_serializing_if = "Option::is_none", default)]
    pub extent: Option<SpatialExtent>,
    #[serde(rename = "license", skip_serializing_if = "Option::is_none", default)]
    pub license: Option<String>,
    #[serde(rename = "price", skip_serializing_if = "Option::is_none", default)]
    pub price: Option<Price>,
}

impl OfferingQuery {
    /// Query without license, extent or price constraints.
    pub fn new<N: Into<String>, U: Into<String>>(name: N, rdf_uri: U) -> OfferingQuery {
        OfferingQuery {
            name: name.into(),
            rdf_uri: rdf_uri.into(),
            input_data: vec![],
            output_data: vec![],
            extent: None,
            license: None,
            price: None,
        }
    }

    /// Query for the category of `rdf_uri`, named after it.
    pub fn category<T: Into<String>>(rdf_uri: T) -> OfferingQuery {
        let rdf_uri = rdf_uri.into();
        OfferingQuery::new(rdf_uri.clone(), rdf_uri)
    }

    pub fn input(mut self, field: DataField) -> Self {
        self.input_data.push(field);
        self
    }

    pub fn output(mut self, field: DataField) -> Self {
        self.output_data.push(field);
        self
    }

    pub fn extent(mut self, extent: SpatialExtent) -> Self {
        self.extent = Some(extent);
        self
    }

    pub fn license<T: Into<String>>(mut self, license: T) -> Self {
        self.license = Some(license.into());
        self
    }

    pub fn price(mut self, price: Price) -> Self {
        self.price = Some(price);
        self
    }

    pub fn any_extent(mut self) -> Self {
        self.extent = None;
        self
    }

    pub fn any_license(mut self) -> Self {
        self.license = None;
        self
    }

    pub fn any_price(mut self) -> Self {
        self.price = None;
        self
    }
}

/// Query matching offerings exactly like the given one, endpoint and id aside.
impl From<&Offering> for OfferingQuery {
    fn from(offering: &Offering) -> Self {
        OfferingQuery {
            name: offering.name.clone(),
            rdf_uri: offering.rdf_uri.clone(),
            input_data: offering.input_data.clone(),
            output_data: offering.output_data.clone(),
            extent: Some(offering.extent.clone()),
            license: Some(offering.license.clone()),
            price: Some(offering.price.clone()),
        }
    }
}
