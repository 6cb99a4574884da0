//! Catalog-view selection for orchestration-platform assets.
//!
//! A selection query such as `kind:"dbt" and group:"core" or key:"raw.*"` is
//! split into OR-clauses ([`lexer`]), parsed into conditions ([`parser`]) and
//! evaluated against the metadata extracted from each asset ([`evaluator`]).

pub mod ast;
pub mod catalog;
pub mod config;
pub mod console;
pub mod evaluator;
pub mod lexer;
pub mod metadata;
pub mod model;
pub mod parser;
pub mod pattern;
pub mod token;

pub use catalog::{AssetFilter, HealthFilter, ViewFilter, ViewSelection};
pub use evaluator::{evaluate, AssetPredicate};
pub use metadata::AssetMetadata;
pub use model::CatalogSnapshot;
pub use parser::parse_query;
