//! Cloudability vendors API client
//!
//! Thin async client for the parts of the Cloudability v3 API that manage
//! linked vendor accounts: list, read, link, verify and unlink.
//!
//! # Example
//!
//! ```ignore
//! use cloudability_client::{Client, ClientConfig, VendorsApi};
//!
//! let client = Client::new(ClientConfig::new("api-key"))?;
//! let account = client.vendors().verify_account("aws", "123456789012").await?;
//! println!("{}", account.verification.state);
//! ```

pub mod client;
pub mod error;
pub mod model;
pub mod vendors;

pub use client::{Client, ClientConfig, DEFAULT_BASE_URL};
pub use error::{ClientError, Result};
pub use model::{Account, Authorization, NewLinkedAccountParams, Verification, VerificationState};
pub use vendors::{Vendors, VendorsApi};
