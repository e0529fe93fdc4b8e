// Query parameters of an account SAS.
pub const API_VERSION: &str = "api-version";
pub const SIGNED_VERSION: &str = "sv";
pub const SIGNED_SERVICES: &str = "ss";
pub const SIGNED_RESOURCE_TYPES: &str = "srt";
pub const SIGNED_PERMISSIONS: &str = "sp";
pub const SIGNED_START: &str = "st";
pub const SIGNED_EXPIRY: &str = "se";
pub const SIGNED_IP: &str = "sip";
pub const SIGNED_PROTOCOL: &str = "spr";
pub const SIGNATURE: &str = "sig";

// Env values used to configure account SAS generation.
pub const AZBLOB_ACCOUNT_NAME: &str = "AZBLOB_ACCOUNT_NAME";
pub const AZBLOB_ACCOUNT_KEY: &str = "AZBLOB_ACCOUNT_KEY";
pub const AZURE_STORAGE_ACCOUNT: &str = "AZURE_STORAGE_ACCOUNT";
pub const AZURE_STORAGE_KEY: &str = "AZURE_STORAGE_KEY";
pub const AZURE_STORAGE_SAS_VERSION: &str = "AZURE_STORAGE_SAS_VERSION";
pub const AZURE_STORAGE_API_VERSION: &str = "AZURE_STORAGE_API_VERSION";
