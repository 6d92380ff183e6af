//! country_facts
//!
//! A small Rust library for loading a country dataset (REST Countries v2 format)
//! and computing descriptive statistics over it. Pairs with the `cfacts` CLI.
//!
//! ### Features
//! - Load countries from an HTTP endpoint or a local JSON file
//! - GINI ranking and lowest GINI, by country and by regional bloc
//! - Timezone spread per region, most used currency, top languages
//! - Combined population with neighbours, population density extremes,
//!   largest subregion by area
//! - A ten-line text report, or the same results as JSON
//!
//! ### Example
//! ```no_run
//! use country_facts::{CountryFacts, Source, report::Report};
//!
//! let countries = Source::default().load()?;
//! let facts = CountryFacts::new(countries);
//! println!("{:?}", facts.gini_rank("South Africa")?);
//! print!("{}", Report::build(&facts, "South Africa")?);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod report;
pub mod stats;
pub mod storage;

pub use api::{Client, Source};
pub use error::{FactsError, LoadError};
pub use models::{Country, Region};
pub use stats::{CountryFacts, Extreme};
