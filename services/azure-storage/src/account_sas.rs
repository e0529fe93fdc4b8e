use std::fmt::{Debug, Formatter};

use http::request::Parts;
use http::uri::PathAndQuery;
use http::Uri;
use log::{debug, warn};
use sassy_core::time::{format_rfc3339, parse_iso8601, DateTime};
use sassy_core::utils::Redact;
use sassy_core::{Error, ErrorKind, Result};
use zeroize::Zeroizing;

use crate::constants::*;
use crate::ip::SignedIp;
use crate::permissions::SignedPermissions;
use crate::protocols::SignedProtocols;
use crate::query::Query;
use crate::resource_types::SignedResourceTypes;
use crate::services::SignedServices;
use crate::version::SignedVersion;
use crate::{AccountKey, Config};

/// How an unknown signed version is handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VersionMode {
    /// Reject unknown versions with [`ErrorKind::InvalidVersion`].
    #[default]
    Strict,
    /// Fall back to [`SignedVersion::LATEST`].
    Lenient,
}

/// Optional fields, applied in the order they were set.
#[derive(Debug, Clone)]
enum SasOption {
    ApiVersion(String),
    SignedStart(String),
    SignedIp(String),
    SignedProtocols(String),
}

/// Builder for an [`AccountSas`].
///
/// Takes raw user input for every field, validation happens in
/// [`AccountSasBuilder::build`].
///
/// ```
/// use sassy_azure_storage::AccountSasBuilder;
///
/// # fn main() -> sassy_core::Result<()> {
/// let sas = AccountSasBuilder::new(
///     "myaccount",
///     "a2V5",
///     "2020-10-02",
///     "b",
///     "sco",
///     "rl",
///     "2021-01-01",
/// )
/// .with_signed_protocols("https")
/// .build()?;
///
/// assert!(sas.token().starts_with("sv=2020-10-02&ss=b&srt=sco&sp=rl&"));
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct AccountSasBuilder {
    account_name: String,
    account_key: Zeroizing<String>,
    version: String,
    services: String,
    resource_types: String,
    permissions: String,
    expiry: String,
    version_mode: VersionMode,
    options: Vec<SasOption>,
}

impl Debug for AccountSasBuilder {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountSasBuilder")
            .field("account_name", &self.account_name)
            .field("account_key", &Redact::from(self.account_key.as_str()))
            .field("version", &self.version)
            .field("services", &self.services)
            .field("resource_types", &self.resource_types)
            .field("permissions", &self.permissions)
            .field("expiry", &self.expiry)
            .field("version_mode", &self.version_mode)
            .field("options", &self.options)
            .finish()
    }
}

impl AccountSasBuilder {
    /// Create a builder from the required fields.
    ///
    /// - `account_key` is the base64 encoded storage account key.
    /// - `version` is the signed version, `2020-10-02` for example.
    /// - `services` takes characters from `bqtf`.
    /// - `resource_types` takes characters from `sco`.
    /// - `permissions` takes characters from `racwdxyltmeop`.
    /// - `expiry` is an ISO 8601 date or datetime.
    pub fn new(
        account_name: impl Into<String>,
        account_key: impl Into<String>,
        version: impl Into<String>,
        services: impl Into<String>,
        resource_types: impl Into<String>,
        permissions: impl Into<String>,
        expiry: impl Into<String>,
    ) -> Self {
        Self {
            account_name: account_name.into(),
            account_key: Zeroizing::new(account_key.into()),
            version: version.into(),
            services: services.into(),
            resource_types: resource_types.into(),
            permissions: permissions.into(),
            expiry: expiry.into(),
            version_mode: VersionMode::default(),
            options: Vec::new(),
        }
    }

    /// Create a builder with account details taken from `config`.
    ///
    /// The signed version falls back to [`SignedVersion::LATEST`] and the
    /// api-version is set when configured.
    pub fn from_config(
        config: &Config,
        services: impl Into<String>,
        resource_types: impl Into<String>,
        permissions: impl Into<String>,
        expiry: impl Into<String>,
    ) -> Result<Self> {
        let Some(account_name) = &config.account_name else {
            return Err(Error::config_invalid("account_name is required"));
        };
        let Some(account_key) = &config.account_key else {
            return Err(Error::config_invalid("account_key is required"));
        };
        let version = config
            .version
            .clone()
            .unwrap_or_else(|| SignedVersion::LATEST.to_string());

        let mut builder = Self::new(
            account_name.clone(),
            account_key.clone(),
            version,
            services,
            resource_types,
            permissions,
            expiry,
        );
        if let Some(api_version) = &config.api_version {
            builder = builder.with_api_version(api_version.clone());
        }

        Ok(builder)
    }

    /// Set how an unknown signed version is handled, strict by default.
    pub fn with_version_mode(mut self, mode: VersionMode) -> Self {
        self.version_mode = mode;
        self
    }

    /// Set the `api-version` sent along with the token.
    ///
    /// It's not part of the signature.
    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.options.push(SasOption::ApiVersion(api_version.into()));
        self
    }

    /// Set the time the SAS becomes valid, an ISO 8601 date or datetime.
    pub fn with_signed_start(mut self, start: impl Into<String>) -> Self {
        self.options.push(SasOption::SignedStart(start.into()));
        self
    }

    /// Restrict the SAS to an IPv4 address or `start-end` range.
    pub fn with_signed_ip(mut self, ip: impl Into<String>) -> Self {
        self.options.push(SasOption::SignedIp(ip.into()));
        self
    }

    /// Restrict the SAS to `https` or `https,http`.
    pub fn with_signed_protocols(mut self, protocols: impl Into<String>) -> Self {
        self.options.push(SasOption::SignedProtocols(protocols.into()));
        self
    }

    /// Validate every field and build the [`AccountSas`].
    ///
    /// Fails on the first invalid field, in this order: account key, signed
    /// version, expiry, then options in the order they were set.
    pub fn build(self) -> Result<AccountSas> {
        let account_key = AccountKey::from_base64(&self.account_key)?;

        let signed_version = match (SignedVersion::parse(&self.version), self.version_mode) {
            ((v, true), _) => v,
            ((_, false), VersionMode::Strict) => {
                return Err(Error::invalid_version(format!(
                    "error parsing signed version {:?}",
                    self.version
                )));
            }
            ((v, false), VersionMode::Lenient) => {
                warn!(
                    "signed version {:?} is unknown, falling back to {}",
                    self.version, v
                );
                v
            }
        };
        debug!("signed version resolved to {}", signed_version);

        let signed_expiry = parse_signed_time(SIGNED_EXPIRY, &self.expiry)?;

        let mut sas = AccountSas {
            account_name: self.account_name,
            account_key,
            api_version: None,
            signed_version,
            signed_services: SignedServices::parse(&self.services),
            signed_resource_types: SignedResourceTypes::parse(&self.resource_types),
            signed_permissions: SignedPermissions::parse(signed_version, &self.permissions),
            signed_start: None,
            signed_expiry,
            signed_ip: None,
            signed_protocols: SignedProtocols::default(),
        };

        for option in self.options {
            match option {
                SasOption::ApiVersion(v) => sas.api_version = Some(v),
                SasOption::SignedStart(v) => {
                    sas.signed_start = Some(parse_signed_time(SIGNED_START, &v)?)
                }
                SasOption::SignedIp(v) => sas.signed_ip = Some(v.parse()?),
                SasOption::SignedProtocols(v) => sas.signed_protocols = SignedProtocols::parse(&v),
            }
        }

        Ok(sas)
    }
}

/// Parse `st` or `se`, keeping empty input apart from a bad format.
fn parse_signed_time(param: &str, value: &str) -> Result<DateTime> {
    parse_iso8601(value).map_err(|err| match (err.kind(), param) {
        (ErrorKind::EmptyInput, _) => {
            Error::empty_input(format!("{param} must not be empty")).with_source(err)
        }
        (_, SIGNED_START) => Error::invalid_start_format(
            "invalid date format provided for signed start, must be ISO 8601 formatted date string",
        )
        .with_source(err),
        _ => Error::invalid_expiry_format(
            "invalid date format provided for signed expiry, must be ISO 8601 formatted date string",
        )
        .with_source(err),
    })
}

/// A validated account shared access signature.
///
/// - [Create an account SAS](https://learn.microsoft.com/en-us/rest/api/storageservices/create-account-sas)
#[derive(Clone)]
pub struct AccountSas {
    account_name: String,
    account_key: AccountKey,
    api_version: Option<String>,
    signed_version: SignedVersion,
    signed_services: SignedServices,
    signed_resource_types: SignedResourceTypes,
    signed_permissions: SignedPermissions,
    signed_start: Option<DateTime>,
    signed_expiry: DateTime,
    signed_ip: Option<SignedIp>,
    signed_protocols: SignedProtocols,
}

impl Debug for AccountSas {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountSas")
            .field("account_name", &self.account_name)
            .field("account_key", &self.account_key)
            .field("api_version", &self.api_version)
            .field("signed_version", &self.signed_version)
            .field("signed_services", &self.signed_services.to_string())
            .field("signed_resource_types", &self.signed_resource_types.to_string())
            .field("signed_permissions", &self.signed_permissions.to_string())
            .field("signed_start", &self.signed_start)
            .field("signed_expiry", &self.signed_expiry)
            .field("signed_ip", &self.signed_ip)
            .field("signed_protocols", &self.signed_protocols.to_string())
            .finish()
    }
}

impl AccountSas {
    /// Storage account name.
    pub fn account_name(&self) -> &str {
        &self.account_name
    }

    /// The `api-version` sent along with the token, if any.
    pub fn api_version(&self) -> Option<&str> {
        self.api_version.as_deref()
    }

    /// Signed version (`sv`).
    pub fn signed_version(&self) -> SignedVersion {
        self.signed_version
    }

    /// Signed services (`ss`).
    pub fn signed_services(&self) -> &SignedServices {
        &self.signed_services
    }

    /// Signed resource types (`srt`).
    pub fn signed_resource_types(&self) -> &SignedResourceTypes {
        &self.signed_resource_types
    }

    /// Signed permissions (`sp`).
    pub fn signed_permissions(&self) -> &SignedPermissions {
        &self.signed_permissions
    }

    /// Signed start (`st`).
    pub fn signed_start(&self) -> Option<DateTime> {
        self.signed_start
    }

    /// Signed expiry (`se`).
    pub fn signed_expiry(&self) -> DateTime {
        self.signed_expiry
    }

    /// Signed IP (`sip`).
    pub fn signed_ip(&self) -> Option<SignedIp> {
        self.signed_ip
    }

    /// Signed protocols (`spr`).
    pub fn signed_protocols(&self) -> &SignedProtocols {
        &self.signed_protocols
    }

    /// Construct the string to sign.
    ///
    /// ## Format
    ///
    /// ```text
    /// accountname + "\n" +
    /// signedpermissions + "\n" +
    /// signedservice + "\n" +
    /// signedresourcetype + "\n" +
    /// signedstart + "\n" +
    /// signedexpiry + "\n" +
    /// signedIP + "\n" +
    /// signedProtocol + "\n" +
    /// signedversion + "\n"
    /// ```
    ///
    /// Absent optional fields are empty. Values are not URL encoded.
    ///
    /// ## Reference
    ///
    /// - [Construct the signature string](https://learn.microsoft.com/en-us/rest/api/storageservices/create-account-sas#construct-the-signature-string)
    pub fn string_to_sign(&self) -> String {
        let s = format!(
            "{}\n{}\n{}\n{}\n{}\n{}\n{}\n{}\n{}\n",
            self.account_name,
            self.signed_permissions,
            self.signed_services,
            self.signed_resource_types,
            self.signed_start.map(format_rfc3339).unwrap_or_default(),
            format_rfc3339(self.signed_expiry),
            self.signed_ip.map(|v| v.to_string()).unwrap_or_default(),
            self.signed_protocols,
            self.signed_version,
        );

        debug!("string to sign: {:?}", &s);

        s
    }

    /// Base64 encoded HMAC-SHA256 signature (`sig`) of the string to sign.
    pub fn signature(&self) -> String {
        self.account_key.sign(&self.string_to_sign())
    }

    /// All token parameters in wire order, unencoded.
    pub fn query(&self) -> Query {
        let mut query = Query::new();

        if let Some(v) = &self.api_version {
            query.push(API_VERSION, v.as_str());
        }
        query.push(SIGNED_VERSION, self.signed_version.as_str());
        query.push_if(
            !self.signed_services.is_empty(),
            SIGNED_SERVICES,
            &self.signed_services,
        );
        query.push_if(
            !self.signed_resource_types.is_empty(),
            SIGNED_RESOURCE_TYPES,
            &self.signed_resource_types,
        );
        query.push_if(
            self.signed_permissions.has_values(),
            SIGNED_PERMISSIONS,
            &self.signed_permissions,
        );
        if let Some(v) = self.signed_start {
            query.push(SIGNED_START, format_rfc3339(v));
        }
        query.push(SIGNED_EXPIRY, format_rfc3339(self.signed_expiry));
        if let Some(v) = self.signed_ip {
            query.push(SIGNED_IP, v.to_string());
        }
        query.push_if(
            self.signed_protocols.has_values(),
            SIGNED_PROTOCOL,
            &self.signed_protocols,
        );
        query.push(SIGNATURE, self.signature());

        query
    }

    /// The encoded SAS token, ready to be used as a query string.
    pub fn token(&self) -> String {
        self.query().encode()
    }

    /// Append the SAS token to the query of a request uri.
    ///
    /// Existing query parameters are kept, nothing is sent.
    pub fn apply(&self, req: &mut Parts) -> Result<()> {
        let token = self.token();

        let mut parts = req.uri.clone().into_parts();
        let path_and_query = match &parts.path_and_query {
            Some(pq) => match pq.query() {
                Some(query) if !query.is_empty() => format!("{}?{}&{}", pq.path(), query, token),
                _ => format!("{}?{}", pq.path(), token),
            },
            None => format!("/?{token}"),
        };
        parts.path_and_query = Some(PathAndQuery::try_from(path_and_query)?);
        req.uri = Uri::from_parts(parts)?;

        Ok(())
    }
}
