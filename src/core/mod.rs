pub mod aggregator;
pub mod catalog;
pub mod category;
pub mod etl;
pub mod extractor;

pub use crate::domain::model::{CatalogRow, CategoryMapping, DomainRecord, HeaderSet};
pub use crate::domain::ports::{CategoryStore, MailSource, Pipeline, Storage};
pub use crate::utils::error::Result;
