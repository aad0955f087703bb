//! GraphQL documents of the marketplace API
use crate::graphql::Operation;

macro_rules! offering_fields {
    () => {
        r#"
        id
        name
        provider { id name organization { id name } }
        activation { status expirationTime }
        rdfAnnotation { uri label proposed }
        inputs { name rdfAnnotation { uri label proposed } }
        outputs { name rdfAnnotation { uri label proposed } }
        endpoints { uri endpointType accessInterfaceType }
        spatialExtent { city boundary { l1 { lat lng } l2 { lat lng } } }
        license
        price { pricingModel money { amount currency } }
        "#
    };
}

pub const SUBSCRIBE_CONSUMER_TO_OFFERING: Operation = Operation {
    name: "subscribeConsumerToOffering",
    field: "subscribeConsumerToOffering",
    document: concat!(
        "mutation subscribeConsumerToOffering($subscription: SubscribeConsumerToOffering!) {",
        " subscribeConsumerToOffering(input: $subscription) { id accessToken offering {",
        offering_fields!(),
        "} } }"
    ),
};

pub const ADD_OFFERING_QUERY: Operation = Operation {
    name: "addOfferingQuery",
    field: "addOfferingQuery",
    document: concat!(
        "mutation addOfferingQuery($newOfferingQuery: AddOfferingQuery!) {",
        " addOfferingQuery(input: $newOfferingQuery) { id name } }"
    ),
};

pub const MATCHING_OFFERINGS: Operation = Operation {
    name: "matchingOfferings",
    field: "matchingOfferings",
    document: concat!(
        "query matchingOfferings($queryId: String!) {",
        " matchingOfferings(queryId: $queryId) {",
        offering_fields!(),
        "} }"
    ),
};

pub const OFFERING: Operation = Operation {
    name: "offering",
    field: "offering",
    document: concat!(
        "query offering($offeringId: String!) {",
        " offering(id: $offeringId) {",
        offering_fields!(),
        "} }"
    ),
};

pub const ADD_OFFERING: Operation = Operation {
    name: "addOffering",
    field: "addOffering",
    document: concat!(
        "mutation addOffering($newOffering: AddOffering!) {",
        " addOffering(input: $newOffering) {",
        offering_fields!(),
        "} }"
    ),
};

pub const DELETE_OFFERING: Operation = Operation {
    name: "deleteOffering",
    field: "deleteOffering",
    document: concat!(
        "mutation deleteOffering($offering: DeleteOffering!) {",
        " deleteOffering(input: $offering) { id } }"
    ),
};

pub const ACTIVATE_OFFERING: Operation = Operation {
    name: "activateOffering",
    field: "activateOffering",
    document: concat!(
        "mutation activateOffering($offering: ActivateOffering!) {",
        " activateOffering(input: $offering) {",
        offering_fields!(),
        "} }"
    ),
};
