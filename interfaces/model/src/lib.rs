//! Data model of the BIG IoT marketplace API
pub mod offering;
pub use self::offering::{
    AccessInterfaceType, BoundingBox, DataField, Endpoint, EndpointType, Location, Money, Offering,
    Price, PricingModel, SpatialExtent,
};
pub mod query;
pub use self::query::OfferingQuery;
pub mod record;
pub use self::record::{
    Activation, DataFieldRecord, OfferingRecord, Organization, ProviderInfo, RdfAnnotation,
};
pub mod subscription;
pub use self::subscription::Subscription;

pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + serde::Deserialize<'de>,
{
    use serde::Deserialize;
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
