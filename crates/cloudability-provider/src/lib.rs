//! Cloudability provider
//!
//! Declarative definitions for linked vendor accounts:
//!
//! - **`cloudability_linked_account`** resource: link, read, unlink and import
//! - **`cloudability_account`** data source: trigger verification and poll
//!   until the vendor reports a terminal state
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │              cloudability CLI                  │
//! └──────────────────────┬────────────────────────┘
//!                        │
//! ┌──────────────────────▼────────────────────────┐
//! │           cloudability-provider                │
//! │  ┌──────────────────┐  ┌───────────────────┐  │
//! │  │ linked_account   │  │ account           │  │
//! │  │ (Resource)       │  │ (DataSource)      │  │
//! │  └────────┬─────────┘  └─────────┬─────────┘  │
//! │           │          ┌───────────▼─────────┐  │
//! │           │          │ cloudability-poll   │  │
//! │           │          └───────────┬─────────┘  │
//! └───────────┼──────────────────────┼────────────┘
//!             │                      │
//! ┌───────────▼──────────────────────▼────────────┐
//! │        cloudability-client (VendorsApi)        │
//! └───────────────────────────────────────────────┘
//! ```

pub mod account;
pub mod data;
pub mod error;
pub mod flatten;
pub mod linked_account;
pub mod provider;
pub mod resource;
pub mod schema;

#[cfg(test)]
mod test_support;

// Re-exports
pub use account::{AccountDataSource, VerificationError, classify, verify_account};
pub use data::ResourceData;
pub use error::{ProviderError, Result};
pub use linked_account::{LinkedAccountResource, parse_import_id};
pub use provider::Provider;
pub use resource::{DataSource, Resource};
pub use schema::{Attribute, AttributeType, Schema};
