//! Azure Storage account shared access signatures
//!
//! This crate builds [account SAS][1] tokens for Azure Storage:
//!
//! - validate the raw fields of a SAS with [`AccountSasBuilder`]
//! - construct the string to sign and sign it with the account key
//! - render the token as a query string or append it to a request uri
//!
//! # Example
//!
//! ```rust,no_run
//! use sassy_azure_storage::{AccountSasBuilder, Config};
//!
//! fn main() -> sassy_core::Result<()> {
//!     // Read AZURE_STORAGE_ACCOUNT and AZURE_STORAGE_KEY from env.
//!     let config = Config::default().from_env();
//!
//!     let sas = AccountSasBuilder::from_config(&config, "b", "sco", "rl", "2030-01-01")?
//!         .with_signed_protocols("https")
//!         .build()?;
//!
//!     let mut req = http::Request::get("https://myaccount.blob.core.windows.net/mycontainer")
//!         .body(())
//!         .expect("request must be valid")
//!         .into_parts()
//!         .0;
//!     sas.apply(&mut req)?;
//!
//!     println!("signed uri: {}", req.uri);
//!     Ok(())
//! }
//! ```
//!
//! [1]: https://learn.microsoft.com/en-us/rest/api/storageservices/create-account-sas

mod constants;

mod config;
pub use config::Config;
mod connection_string;

mod key;
pub use key::AccountKey;

mod version;
pub use version::{SignedVersion, VersionRequirement};

mod permissions;
pub use permissions::{Permission, PermissionSpec, SignedPermissions, PERMISSIONS};

mod services;
pub use services::{Service, SignedServices};

mod resource_types;
pub use resource_types::{ResourceType, SignedResourceTypes};

mod protocols;
pub use protocols::{Protocol, SignedProtocols};

mod ip;
pub use ip::SignedIp;

mod query;
pub use query::Query;

mod account_sas;
pub use account_sas::{AccountSas, AccountSasBuilder, VersionMode};
