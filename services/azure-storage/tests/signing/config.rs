use pretty_assertions::assert_eq;
use sassy_azure_storage::{AccountSasBuilder, Config, SignedVersion};
use sassy_core::ErrorKind;

const ACCOUNT_KEY: &str = "a2V5LWZvci10ZXN0aW5n";

#[test]
fn test_sign_with_config_from_env() {
    temp_env::with_vars(
        vec![
            ("AZURE_STORAGE_ACCOUNT", Some("envaccount")),
            ("AZURE_STORAGE_KEY", Some(ACCOUNT_KEY)),
            ("AZURE_STORAGE_SAS_VERSION", Some("2019-12-12")),
            ("AZURE_STORAGE_API_VERSION", Some("2019-12-12")),
            ("AZBLOB_ACCOUNT_NAME", None),
            ("AZBLOB_ACCOUNT_KEY", None),
        ],
        || {
            let config = Config::default().from_env();
            let sas = AccountSasBuilder::from_config(&config, "b", "sco", "rxt", "2030-01-01")
                .expect("config must be complete")
                .build()
                .expect("sas must build");

            assert_eq!(sas.account_name(), "envaccount");
            assert_eq!(sas.signed_version(), SignedVersion::V2019_12_12);
            assert_eq!(sas.api_version(), Some("2019-12-12"));
            assert!(sas.token().starts_with("api-version=2019-12-12&sv=2019-12-12&"));
        },
    );
}

#[test]
fn test_azblob_env_takes_precedence() {
    temp_env::with_vars(
        vec![
            ("AZBLOB_ACCOUNT_NAME", Some("azblob")),
            ("AZBLOB_ACCOUNT_KEY", Some(ACCOUNT_KEY)),
            ("AZURE_STORAGE_ACCOUNT", Some("storage")),
            ("AZURE_STORAGE_KEY", Some("c3RvcmFnZQ==")),
            ("AZURE_STORAGE_SAS_VERSION", None),
        ],
        || {
            let config = Config::default().from_env();

            assert_eq!(config.account_name.as_deref(), Some("azblob"));
            assert_eq!(config.account_key.as_deref(), Some(ACCOUNT_KEY));
            assert_eq!(config.version, None);
        },
    );
}

#[test]
fn test_missing_account_from_env() {
    temp_env::with_vars_unset(
        vec![
            "AZBLOB_ACCOUNT_NAME",
            "AZBLOB_ACCOUNT_KEY",
            "AZURE_STORAGE_ACCOUNT",
            "AZURE_STORAGE_KEY",
        ],
        || {
            let config = Config::default().from_env();
            let err = AccountSasBuilder::from_config(&config, "b", "o", "r", "2030-01-01")
                .expect_err("account details are missing");

            assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
            assert!(!err.is_input_error());
        },
    );
}

#[test]
fn test_sign_with_connection_string() {
    let config = Config::try_from_connection_string(
        "DefaultEndpointsProtocol=https;AccountName=connaccount;AccountKey=a2V5LWZvci10ZXN0aW5n;EndpointSuffix=core.windows.net",
    )
    .expect("connection string must be valid");

    let sas = AccountSasBuilder::from_config(&config, "q", "o", "ap", "2030-01-01")
        .expect("config must be complete")
        .build()
        .expect("sas must build");

    assert_eq!(sas.account_name(), "connaccount");
    assert_eq!(sas.signed_version(), SignedVersion::LATEST);
    assert_eq!(
        sas.string_to_sign(),
        "connaccount\nap\nq\no\n\n2030-01-01T00:00:00Z\n\n\n2020-10-02\n"
    );
}
