use std::collections::HashMap;
use std::env;
use std::fmt::{Debug, Formatter};

use sassy_core::utils::Redact;
use sassy_core::Result;

use crate::connection_string;
use crate::constants::*;

/// Config carries the account details used to build an account SAS.
#[derive(Clone, Default)]
#[cfg_attr(test, derive(PartialEq))]
pub struct Config {
    /// `account_name` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AZBLOB_ACCOUNT_NAME`]
    /// - env value: [`AZURE_STORAGE_ACCOUNT`]
    pub account_name: Option<String>,
    /// `account_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AZBLOB_ACCOUNT_KEY`]
    /// - env value: [`AZURE_STORAGE_KEY`]
    pub account_key: Option<String>,
    /// Signed version to use, `version` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AZURE_STORAGE_SAS_VERSION`]
    pub version: Option<String>,
    /// `api-version` sent along with tokens, `api_version` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AZURE_STORAGE_API_VERSION`]
    pub api_version: Option<String>,
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("account_name", &Redact::from(&self.account_name))
            .field("account_key", &Redact::from(&self.account_key))
            .field("version", &self.version)
            .field("api_version", &self.api_version)
            .finish()
    }
}

impl Config {
    /// Load config from env.
    ///
    /// Fields that are already set are kept.
    pub fn from_env(self) -> Self {
        self.from_envs(&env::vars().collect())
    }

    fn from_envs(mut self, envs: &HashMap<String, String>) -> Self {
        let lookup = |keys: &[&str]| keys.iter().find_map(|k| envs.get(*k).cloned());

        if self.account_name.is_none() {
            self.account_name = lookup(&[AZBLOB_ACCOUNT_NAME, AZURE_STORAGE_ACCOUNT]);
        }
        if self.account_key.is_none() {
            self.account_key = lookup(&[AZBLOB_ACCOUNT_KEY, AZURE_STORAGE_KEY]);
        }
        if self.version.is_none() {
            self.version = lookup(&[AZURE_STORAGE_SAS_VERSION]);
        }
        if self.api_version.is_none() {
            self.api_version = lookup(&[AZURE_STORAGE_API_VERSION]);
        }

        self
    }

    /// Parses an [Azure connection string][1] into a configuration object.
    ///
    /// Only the account name and key are taken, endpoints don't matter for
    /// building a SAS.
    ///
    /// An example of a connection string looks like:
    ///
    /// ```txt
    /// AccountName=mystorageaccount;
    /// AccountKey=Eby8vdM02xNOcqFlqUwJPLlmEtlCDXJ1OUzFT50uSRZ6IFsuFq2UVErCz4I6tq/K1SZFPTOtr/KBHBeksoGMGw==;
    /// BlobEndpoint=https://mystorageaccount.blob.core.windows.net
    /// ```
    ///
    /// [1]: https://learn.microsoft.com/en-us/azure/storage/common/storage-configure-connection-string
    pub fn try_from_connection_string(conn_str: &str) -> Result<Self> {
        connection_string::parse(conn_str)
    }
}
