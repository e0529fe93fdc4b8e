use std::net::Ipv4Addr;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{TimeZone, Utc};
use hmac::{Hmac, Mac};
use log::debug;
use pretty_assertions::assert_eq;
use sassy_azure_storage::{
    AccountSasBuilder, Permission, Protocol, SignedIp, SignedPermissions, SignedVersion,
    VersionMode,
};
use sassy_core::ErrorKind;
use sha2::Sha256;
use test_case::test_case;

const ACCOUNT_NAME: &str = "myaccount";
const ACCOUNT_KEY: &str =
    "Eby8vdM02xNOcqFlqUwJPLlmEtlCDXJ1OUzFT50uSRZ6IFsuFq2UVErCz4I6tq/K1SZFPTOtr/KBHBeksoGMGw==";

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Sign `string_to_sign` without going through the crate.
fn expected_signature(string_to_sign: &str) -> String {
    let key = STANDARD.decode(ACCOUNT_KEY).expect("key must be base64");
    let mut mac = Hmac::<Sha256>::new_from_slice(&key).expect("hmac accepts any key size");
    mac.update(string_to_sign.as_bytes());
    STANDARD.encode(mac.finalize().into_bytes())
}

#[test]
fn test_sign_full_account_sas() {
    init_logger();

    let sas = AccountSasBuilder::new(
        ACCOUNT_NAME,
        ACCOUNT_KEY,
        "2020-10-02",
        "bf",
        "sco",
        "rwdlacp",
        "2021-05-01T08:00:00+02:00",
    )
    .with_api_version("2020-10-02")
    .with_signed_start("2021-04-30")
    .with_signed_ip("168.1.5.60-168.1.5.70")
    .with_signed_protocols("https")
    .build()
    .expect("sas must build");

    let string_to_sign = "myaccount\nracwdlp\nbf\nsco\n2021-04-30T00:00:00Z\n2021-05-01T06:00:00Z\n168.1.5.60-168.1.5.70\nhttps\n2020-10-02\n";
    assert_eq!(sas.string_to_sign(), string_to_sign);

    let signature = expected_signature(string_to_sign);
    assert_eq!(sas.signature(), signature);

    let query = sas.query();
    let pairs: Vec<(&str, &str)> = query.pairs().iter().map(|(k, v)| (*k, v.as_str())).collect();
    assert_eq!(
        pairs,
        vec![
            ("api-version", "2020-10-02"),
            ("sv", "2020-10-02"),
            ("ss", "bf"),
            ("srt", "sco"),
            ("sp", "racwdlp"),
            ("st", "2021-04-30T00:00:00Z"),
            ("se", "2021-05-01T06:00:00Z"),
            ("sip", "168.1.5.60-168.1.5.70"),
            ("spr", "https"),
            ("sig", signature.as_str()),
        ]
    );

    let token = sas.token();
    debug!("generated token: {token}");
    assert!(token.starts_with(
        "api-version=2020-10-02&sv=2020-10-02&ss=bf&srt=sco&sp=racwdlp&st=2021-04-30T00%3A00%3A00Z&se=2021-05-01T06%3A00%3A00Z&sip=168.1.5.60-168.1.5.70&spr=https&sig="
    ));

    let encoded_sig: String = form_urlencoded::byte_serialize(signature.as_bytes()).collect();
    assert!(token.ends_with(&format!("&sig={encoded_sig}")));
}

#[test]
fn test_sign_is_deterministic() {
    let build = || {
        AccountSasBuilder::new(
            ACCOUNT_NAME,
            ACCOUNT_KEY,
            "2020-08-04",
            "bqtf",
            "sco",
            "rl",
            "2030-01-01",
        )
        .with_signed_protocols("https,http")
        .build()
        .expect("sas must build")
    };

    let first = build();
    let second = build();
    assert_eq!(first.token(), second.token());

    // Rendering twice must not change anything.
    assert_eq!(first.token(), first.token());
    assert_eq!(first.query().to_string(), first.token());
}

#[test]
fn test_permission_order_does_not_matter() {
    let build = |permissions: &str| {
        AccountSasBuilder::new(
            ACCOUNT_NAME,
            ACCOUNT_KEY,
            "2020-10-02",
            "b",
            "o",
            permissions,
            "2030-01-01",
        )
        .build()
        .expect("sas must build")
    };

    let wrc = build("wrc");
    let rcw = build("rcw");
    assert_eq!(wrc.signed_permissions().to_string(), "rcw");
    assert_eq!(wrc.string_to_sign(), rcw.string_to_sign());
    assert_eq!(wrc.signature(), rcw.signature());

    // Case and repeats are ignored.
    assert_eq!(build("WWrRc").token(), rcw.token());
}

#[test_case("2015-04-05", "racwdl" ; "before any gated flag")]
#[test_case("2019-12-12", "racwdxlt" ; "version deletion and tags")]
#[test_case("2020-02-10", "racwdxyltmeop" ; "every flag")]
#[test_case("2020-10-02", "racwdxyltmeop" ; "latest")]
fn test_permissions_gated_by_version(version: &str, expected: &str) {
    let sas = AccountSasBuilder::new(
        ACCOUNT_NAME,
        ACCOUNT_KEY,
        version,
        "b",
        "o",
        "racwdxyltmeop",
        "2030-01-01",
    )
    .build()
    .expect("sas must build");

    assert_eq!(sas.signed_permissions().to_string(), expected);
    assert_eq!(sas.query().get("sp"), Some(expected));

    let string_to_sign = sas.string_to_sign();
    let lines: Vec<&str> = string_to_sign.split('\n').collect();
    assert_eq!(lines[1], expected);
    assert_eq!(lines[8], version);
}

#[test]
fn test_permissions_filtered_by_version() {
    let permissions = SignedPermissions::parse(SignedVersion::V2015_04_05, "rx");

    assert!(permissions.has_values());
    assert!(permissions.contains(Permission::Read));
    assert!(!permissions.contains(Permission::DeleteVersion));
    assert_eq!(permissions.iter().collect::<Vec<_>>(), vec![Permission::Read]);
}

#[test_case("10.0.0.1", Some(SignedIp::Single(Ipv4Addr::new(10, 0, 0, 1))) ; "single address")]
#[test_case("10.0.0.1-10.0.0.255", Some(SignedIp::Range { start: Ipv4Addr::new(10, 0, 0, 1), end: Ipv4Addr::new(10, 0, 0, 255) }) ; "ascending range")]
#[test_case("10.0.0.255-10.0.0.1", None ; "descending range")]
#[test_case("fe80::1", None ; "ipv6")]
#[test_case("10.0.0", None ; "partial address")]
fn test_signed_ip(input: &str, expected: Option<SignedIp>) {
    let result = AccountSasBuilder::new(
        ACCOUNT_NAME,
        ACCOUNT_KEY,
        "2020-10-02",
        "b",
        "o",
        "r",
        "2030-01-01",
    )
    .with_signed_ip(input)
    .build();

    match expected {
        Some(ip) => {
            let sas = result.expect("sas must build");
            assert_eq!(sas.signed_ip(), Some(ip));
            assert_eq!(sas.query().get("sip"), Some(input));
        }
        None => {
            let err = result.expect_err("signed ip must be rejected");
            assert_eq!(err.kind(), ErrorKind::InvalidIpv4Format);
            assert!(err.is_input_error());
        }
    }
}

#[test_case("2021-06-01", "2021-06-01T00:00:00Z" ; "date")]
#[test_case("2021-06-01+02:00", "2021-05-31T22:00:00Z" ; "date with offset")]
#[test_case("2021-06-01T12:30", "2021-06-01T12:30:00Z" ; "minutes")]
#[test_case("2021-06-01T12:30-01:30", "2021-06-01T14:00:00Z" ; "minutes with offset")]
#[test_case("2021-06-01T12:30:45", "2021-06-01T12:30:45Z" ; "seconds")]
#[test_case("2021-06-01T12:30:45Z", "2021-06-01T12:30:45Z" ; "seconds utc")]
#[test_case("2021-06-01T12:30:45.999+00:00", "2021-06-01T12:30:45Z" ; "fractional seconds")]
fn test_signed_expiry_is_normalized(expiry: &str, expected: &str) {
    let sas = AccountSasBuilder::new(
        ACCOUNT_NAME,
        ACCOUNT_KEY,
        "2020-10-02",
        "b",
        "o",
        "r",
        expiry,
    )
    .build()
    .expect("sas must build");

    assert_eq!(sas.query().get("se"), Some(expected));
    assert!(sas.string_to_sign().contains(&format!("\n{expected}\n")));
}

#[test]
fn test_signed_start_is_normalized() {
    let sas = AccountSasBuilder::new(
        ACCOUNT_NAME,
        ACCOUNT_KEY,
        "2020-10-02",
        "b",
        "o",
        "r",
        "2030-01-01",
    )
    .with_signed_start("2029-12-31T23:00+05:00")
    .build()
    .expect("sas must build");

    assert_eq!(
        sas.signed_start(),
        Some(Utc.with_ymd_and_hms(2029, 12, 31, 18, 0, 0).unwrap())
    );
    assert_eq!(sas.query().get("st"), Some("2029-12-31T18:00:00Z"));
}

#[test_case("http", "https,http" ; "http only is widened")]
#[test_case("https", "https" ; "https only")]
#[test_case("HTTP, HTTPS", "https,http" ; "mixed case and spaces")]
fn test_signed_protocols(input: &str, expected: &str) {
    let sas = AccountSasBuilder::new(
        ACCOUNT_NAME,
        ACCOUNT_KEY,
        "2020-10-02",
        "b",
        "o",
        "r",
        "2030-01-01",
    )
    .with_signed_protocols(input)
    .build()
    .expect("sas must build");

    assert!(sas.signed_protocols().allows(Protocol::Https));
    assert_eq!(sas.query().get("spr"), Some(expected));
}

#[test]
fn test_unknown_version() {
    init_logger();

    let builder = AccountSasBuilder::new(
        ACCOUNT_NAME,
        ACCOUNT_KEY,
        "2021-02-12",
        "b",
        "o",
        "r",
        "2030-01-01",
    );

    let err = builder.clone().build().expect_err("strict mode must fail");
    assert_eq!(err.kind(), ErrorKind::InvalidVersion);

    let sas = builder
        .with_version_mode(VersionMode::Lenient)
        .build()
        .expect("lenient mode must build");
    assert_eq!(sas.signed_version(), SignedVersion::LATEST);
    assert_eq!(sas.query().get("sv"), Some("2020-10-02"));
}

#[test]
fn test_apply_to_request() {
    let sas = AccountSasBuilder::new(
        ACCOUNT_NAME,
        ACCOUNT_KEY,
        "2020-10-02",
        "b",
        "c",
        "l",
        "2030-01-01",
    )
    .build()
    .expect("sas must build");

    let mut parts = http::Request::get(
        "https://myaccount.blob.core.windows.net/mycontainer?restype=container&comp=list",
    )
    .header("x-ms-version", "2020-10-02")
    .body(())
    .unwrap()
    .into_parts()
    .0;

    sas.apply(&mut parts).expect("apply must succeed");

    assert_eq!(parts.uri.path(), "/mycontainer");
    assert_eq!(
        parts.uri.query(),
        Some(format!("restype=container&comp=list&{}", sas.token()).as_str())
    );
    // Nothing but the uri is touched.
    assert_eq!(parts.headers.len(), 1);
}
