use chrono::{Duration, Utc};
use std::env;
use structopt::StructOpt;

use bigiot_client::{
    cli::{ConsumerOpts, MarketOpts, ProviderOpts},
    model::{DataField, Endpoint, Offering, OfferingQuery, SpatialExtent},
    Consumer, Provider, Result,
};

#[derive(StructOpt)]
#[structopt(name = "market-interaction", about = "BIG IoT marketplace walk-through")]
struct Options {
    #[structopt(flatten)]
    market: MarketOpts,
    #[structopt(flatten)]
    consumer: ConsumerOpts,
    #[structopt(flatten)]
    provider: ProviderOpts,
    /// Endpoint the example offering is published with
    #[structopt(long, default_value = "http://localhost:9123/parking")]
    endpoint: String,
    #[structopt(long, default_value = "debug")]
    log_level: String,
}

//////////////
// PROVIDER //
//////////////
async fn provider_interact(provider: &Provider, endpoint: &str) -> Result<Offering> {
    let offering = Offering::new("Parking spaces", "urn:big-iot:ParkingSpaceCategory")
        .with_input(DataField::new("latitude", "http://schema.org/latitude"))
        .with_input(DataField::new("longitude", "http://schema.org/longitude"))
        .with_output(DataField::new("vacant", "http://schema.org/vacant"))
        .with_endpoint(Endpoint::new(endpoint))
        .with_extent(SpatialExtent::city("Cologne"));

    let offering = provider
        .register(&offering, Some(Utc::now() + Duration::minutes(30)))
        .await?;
    println!("  <=PROVIDER | registered: {:?}", offering.id);

    let record = provider.get(offering.id.as_deref().unwrap_or_default()).await?;
    println!("  <=PROVIDER | marketplace view:\n\t {:#?}", record);
    Ok(offering)
}

//\\\\\\\\\\//
// CONSUMER //
//\\\\\\\\\\//
async fn consumer_interact(consumer: &Consumer, provider: &Provider) -> Result<()> {
    let query = OfferingQuery::category("urn:big-iot:ParkingSpaceCategory");
    let offerings = consumer.discover(&query).await?;
    println!("CONSUMER=>  | {} offering(s) found", offerings.len());

    for offering in offerings {
        let subscription = consumer.subscribe(&offering.id).await?;
        println!("CONSUMER=>  | subscribed to {}", offering.id);

        match provider.validate_token(&subscription.access_token) {
            Ok(claims) => println!("  <=PROVIDER | token accepted: {:?}", claims.claims),
            Err(e) => println!("  <=PROVIDER | token rejected: {}", e),
        }

        let data: serde_json::Value = consumer
            .access(
                &subscription,
                vec![("latitude", 50.9375), ("longitude", 6.9603), ("radius", 1000.0)],
            )
            .await?;
        println!("CONSUMER=>  | data: {:#?}", data);
    }
    Ok(())
}

#[actix_rt::main]
async fn main() -> Result<()> {
    let options = Options::from_args();
    println!("\nrun this example with RUST_LOG=debug to see marketplace calls\n");
    env::set_var(
        "RUST_LOG",
        env::var("RUST_LOG").unwrap_or(options.log_level),
    );
    env_logger::init();

    let configuration = options.market.configuration()?;
    let mut provider = Provider::new(configuration.clone(), options.provider.credentials());
    let mut consumer = Consumer::new(configuration, options.consumer.credentials());
    futures::try_join!(provider.authenticate(), consumer.authenticate())?;

    let offering = provider_interact(&provider, &options.endpoint).await?;
    consumer_interact(&consumer, &provider).await?;

    println!("  <=PROVIDER | deleting...");
    let deleted = provider.delete(&offering).await?;
    println!("  <=PROVIDER | deleted: {}", deleted);
    Ok(())
}
