pub mod aggregate_pipeline;
pub mod catalog_pipeline;

pub use aggregate_pipeline::AggregatePipeline;
pub use catalog_pipeline::{CatalogInput, CatalogPipeline};
