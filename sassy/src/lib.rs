//! Build and sign storage account shared access signatures.
//!
//! Core types are re-exported at the crate root, each storage service lives
//! in its own module behind a feature flag.
//!
//! ```
//! # #[cfg(feature = "azure")]
//! # fn main() -> sassy::Result<()> {
//! use sassy::azure::AccountSasBuilder;
//!
//! let sas = AccountSasBuilder::new(
//!     "myaccount",
//!     "a2V5",
//!     "2020-10-02",
//!     "b",
//!     "sco",
//!     "rl",
//!     "2021-01-01",
//! )
//! .build()?;
//!
//! assert!(sas.token().contains("&sig="));
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "azure"))]
//! # fn main() {}
//! ```
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub use sassy_core::*;

#[cfg(feature = "azure")]
pub mod azure {
    //! Azure Storage account SAS.
    pub use sassy_azure_storage::*;
}
