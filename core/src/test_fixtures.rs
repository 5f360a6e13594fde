//! Fixed RSA keys for tests

pub(crate) const SIGNING_KEY_PEM: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/testdata/signing_key.pem"));

pub(crate) const SIGNING_PUBLIC_KEY_PEM: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/testdata/signing_key.pub.pem"));

/// A second, unrelated key pair (PKCS#1 encoded)
pub(crate) const FOREIGN_KEY_PEM: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/testdata/foreign_key.pem"));
