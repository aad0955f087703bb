//! Async bindings for the BIG IoT marketplace API (GraphQL)
//!
//! A [`Consumer`] discovers offerings, subscribes to them and accesses the
//! provider endpoints; a [`Provider`] registers offerings and validates the
//! tokens Consumers present. Both have to [`authenticate`](Consumer::authenticate)
//! before talking to the marketplace.
pub mod configuration;
pub mod graphql;
pub mod market;
pub mod token;
pub mod web;

pub mod error;
pub use error::Error;

pub use bigiot_model as model;
pub use configuration::MarketConfiguration;
pub use market::{Consumer, Credentials, MarketClient, Provider};
pub use token::{TokenClaims, TokenError};

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(feature = "cli")]
pub mod cli;
