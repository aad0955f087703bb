use serde::{Deserialize, Serialize};

use crate::offering::Endpoint;
use crate::record::OfferingRecord;

/// Consumer's authorized binding to one offering.
///
/// `access_token` is not refreshed; once expired a new subscription is needed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    #[serde(rename = "id")]
    pub id: String,
    #[serde(rename = "accessToken")]
    pub access_token: String,
    #[serde(rename = "offering")]
    pub offering: OfferingRecord,
}

impl Subscription {
    pub fn endpoint(&self) -> Option<&Endpoint> {
        self.offering.endpoint()
    }
}
