// Copyright 2024 Adobe. All rights reserved.
// This file is licensed to you under the Apache License,
// Version 2.0 (http://www.apache.org/licenses/LICENSE-2.0)
// or the MIT license (http://opensource.org/licenses/MIT),
// at your option.

// Unless required by applicable law or agreed to in writing,
// this software is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR REPRESENTATIONS OF ANY KIND, either express or
// implied. See the LICENSE-MIT and LICENSE-APACHE files for the
// specific language governing permissions and limitations under
// each license.

use ltv_trusted_lists::cert_fingerprint;

use crate::{
    policy::{Level, ValidationModel},
    settings::{Settings, TrustListStrategy},
    Error,
};

const ANCHOR_PEM: &str = "-----BEGIN CERTIFICATE-----\nAAEC\n-----END CERTIFICATE-----\n";

#[test]
fn defaults() {
    let settings = Settings::new();

    assert_eq!(settings.version, 1);
    assert_eq!(settings.validation.max_revocation_depth, 16);
    assert!(settings.validation.extract_poe_from_timestamps);
    assert!(settings.validation.past_signature_validation);
    assert_eq!(
        settings.trust_lists.strategy,
        TrustListStrategy::ExpirationAndSignatureCheck
    );
    assert!(settings.trust_lists.clean_memory);
    assert_eq!(settings.policy.long_term.signature_poe, Some(Level::Warn));
}

#[test]
fn partial_toml_merges_over_defaults() {
    let settings = Settings::from_toml(
        r#"
        [validation]
        past_signature_validation = false

        [trust_lists]
        strategy = "accept_all"
        tl_sources = ["https://tl.example/tl.xml"]

        [policy]
        model = "HYBRID"

        [policy.ca_certificate]
        not_revoked = "INFORM"
        "#,
    )
    .unwrap();

    assert!(!settings.validation.past_signature_validation);
    assert_eq!(settings.validation.max_revocation_depth, 16);
    assert_eq!(settings.trust_lists.strategy, TrustListStrategy::AcceptAll);
    assert_eq!(settings.trust_lists.tl_sources.len(), 1);
    assert_eq!(settings.policy.model, ValidationModel::Hybrid);
    assert_eq!(settings.policy.ca_certificate.not_revoked, Some(Level::Inform));
    assert_eq!(
        settings.policy.signing_certificate.not_revoked,
        Some(Level::Fail)
    );
}

#[test]
fn successive_updates_accumulate() {
    let settings = Settings::new()
        .with_toml("[validation]\nmax_revocation_depth = 3\n")
        .unwrap()
        .with_json(r#"{ "validation": { "extract_poe_from_timestamps": false } }"#)
        .unwrap();

    assert_eq!(settings.validation.max_revocation_depth, 3);
    assert!(!settings.validation.extract_poe_from_timestamps);
}

#[test]
fn unsupported_format() {
    assert!(matches!(
        Settings::from_string("version = 1", "yaml"),
        Err(Error::UnsupportedType)
    ));
}

#[test]
fn malformed_input() {
    assert!(matches!(
        Settings::from_toml("[validation\nmax_revocation_depth ="),
        Err(Error::BadParam(_))
    ));
}

#[test]
fn invalid_update_leaves_settings_unchanged() {
    let mut settings = Settings::from_toml("[validation]\nmax_revocation_depth = 5\n").unwrap();

    let result = settings.update_from_str("[validation]\nmax_revocation_depth = 0\n", "toml");

    assert!(matches!(result, Err(Error::BadParam(_))));
    assert_eq!(settings.validation.max_revocation_depth, 5);
}

#[test]
fn duplicate_trusted_list_sources() {
    let result = Settings::from_json(
        r#"{
            "trust_lists": {
                "lotl_sources": ["https://lotl.example/lotl.xml"],
                "tl_sources": ["https://lotl.example/lotl.xml"]
            }
        }"#,
    );

    assert!(matches!(result, Err(Error::BadParam(_))));
}

#[test]
fn newer_version_rejected() {
    assert!(matches!(
        Settings::from_toml("version = 2"),
        Err(Error::BadParam(_))
    ));
}

#[test]
fn trust_anchor_fingerprints() {
    let settings = Settings::from_toml(&format!(
        "[trust]\ntrust_anchors = \"\"\"\n{ANCHOR_PEM}\"\"\"\n"
    ))
    .unwrap();

    let fingerprints = settings.trust.anchor_fingerprints().unwrap();

    assert_eq!(fingerprints.len(), 1);
    assert!(fingerprints.contains(&cert_fingerprint(&[0, 1, 2])));
    assert!(Settings::new().trust.anchor_fingerprints().unwrap().is_empty());
}

#[test]
fn trust_anchors_must_hold_a_certificate() {
    let result = Settings::from_json(r#"{ "trust": { "trust_anchors": "not a certificate" } }"#);

    assert!(matches!(result, Err(Error::InvalidCertificate(_))));
}
