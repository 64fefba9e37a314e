//! Inventory of the online services a mailbox is registered with.
//!
//! Two stages: `aggregate` scans verification / welcome mail and counts
//! messages per registrable sender domain, `catalog` turns that table into a
//! categorized service list.

pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use adapters::{categories::YamlCategoryStore, gmail::GmailClient, storage::LocalStorage};
pub use app::pipelines::{AggregatePipeline, CatalogPipeline};
pub use config::AuditConfig;
pub use core::etl::EtlEngine;
pub use utils::error::{AuditError, Result};
