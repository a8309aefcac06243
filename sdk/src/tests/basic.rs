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

use ltv_status_tracker::{validation_codes, LogKind};

use super::fixtures::{crl, date, leaf, root, simple_signature};
use crate::{
    diagnostic::{
        CertificateRevocation, CryptoParams, DiagnosticData, DigestAlgorithm,
        EncryptionAlgorithm, RevocationReason, SignatureToken, TimestampToken,
    },
    policy::{Level, ValidationPolicy},
    process::{basic, ValidationContext},
    BlockResult, Indication, SubIndication,
};

fn validate_with(diagnostic: &DiagnosticData, policy: &ValidationPolicy) -> BlockResult {
    let ctx = ValidationContext::new(diagnostic, policy);
    let signature = diagnostic.signature("SIG").unwrap();
    basic::validate_signature(&ctx, signature).unwrap()
}

fn validate(diagnostic: &DiagnosticData) -> BlockResult {
    validate_with(diagnostic, &ValidationPolicy::default())
}

#[test]
fn valid_signature_passes() {
    let _ = env_logger::builder().is_test(true).try_init();

    let block = validate(&simple_signature());

    assert!(block.conclusion.is_passed(), "{}", block.conclusion);
    assert_eq!(block.token_id.as_deref(), Some("SIG"));
    for label in [
        validation_codes::SIGNING_CERTIFICATE_KNOWN,
        validation_codes::SIGNATURE_INTACT,
        validation_codes::PROSPECTIVE_CHAIN,
        validation_codes::ACCEPTABLE_REVOCATION_AVAILABLE,
        validation_codes::CERTIFICATE_NOT_REVOKED,
        validation_codes::REVOCATION_FRESH,
        validation_codes::CRYPTOGRAPHIC_CONSTRAINTS,
    ] {
        assert_eq!(block.checks.check_kind(label), Some(LogKind::Success), "{label}");
    }
    assert!(block.find_block("Revocation acceptance").is_some());
}

#[test]
fn unknown_signing_certificate() {
    let diagnostic =
        simple_signature().with_signature(SignatureToken::new("SIG").signed_by("MISSING"));

    let block = validate(&diagnostic);

    assert!(block.conclusion.is(
        Indication::Indeterminate,
        Some(SubIndication::NoSigningCertificateFound)
    ));
    assert_eq!(block.check_labels(), vec![validation_codes::SIGNING_CERTIFICATE_KNOWN]);
}

#[test]
fn broken_signature_fails() {
    let diagnostic = simple_signature().with_signature(
        SignatureToken::new("SIG")
            .signed_by("C")
            .with_signature_intact(false),
    );

    let block = validate(&diagnostic);

    assert!(block
        .conclusion
        .is(Indication::Failed, Some(SubIndication::SigCryptoFailure)));
}

#[test]
fn revoked_signing_certificate() {
    let diagnostic = simple_signature().with_certificate(leaf("C", "ROOT").with_revocation(
        CertificateRevocation::revoked("CRL-C", date(2024, 6, 10), RevocationReason::KeyCompromise),
    ));

    let block = validate(&diagnostic);

    assert!(block
        .conclusion
        .is(Indication::Indeterminate, Some(SubIndication::RevokedNoPoe)));
    assert!(block.checks.has_status("REVOKED_NO_POE"));
}

#[test]
fn revoked_ca_certificate() {
    let diagnostic = DiagnosticData::new(date(2024, 6, 20))
        .with_certificate(root("ROOT"))
        .with_certificate(leaf("I", "ROOT").with_revocation(CertificateRevocation::revoked(
            "CRL-I",
            date(2024, 6, 1),
            RevocationReason::CaCompromise,
        )))
        .with_certificate(leaf("C", "I").with_revocation(CertificateRevocation::good("CRL-C")))
        .with_revocation(crl("CRL-I", "ROOT", date(2024, 6, 15)))
        .with_revocation(crl("CRL-C", "I", date(2024, 6, 15)))
        .with_signature(SignatureToken::new("SIG").signed_by("C"));

    let block = validate(&diagnostic);

    assert!(block
        .conclusion
        .is(Indication::Indeterminate, Some(SubIndication::RevokedCaNoPoe)));
}

#[test]
fn certificate_on_hold() {
    let diagnostic = simple_signature().with_certificate(leaf("C", "ROOT").with_revocation(
        CertificateRevocation::revoked(
            "CRL-C",
            date(2024, 6, 10),
            RevocationReason::CertificateHold,
        ),
    ));

    let block = validate(&diagnostic);

    assert!(block
        .conclusion
        .is(Indication::Indeterminate, Some(SubIndication::TryLater)));
    assert_eq!(
        block.checks.check_kind(validation_codes::CERTIFICATE_NOT_REVOKED),
        Some(LogKind::Success)
    );
    assert_eq!(
        block.checks.check_kind(validation_codes::CERTIFICATE_NOT_ON_HOLD),
        Some(LogKind::Failure)
    );
}

#[test]
fn stale_revocation_data() {
    let mut diagnostic = simple_signature();
    diagnostic.validation_date = date(2024, 8, 1);

    let block = validate(&diagnostic);

    assert!(block
        .conclusion
        .is(Indication::Indeterminate, Some(SubIndication::TryLater)));
    assert_eq!(
        block.checks.check_kind(validation_codes::REVOCATION_FRESH),
        Some(LogKind::Failure)
    );
}

#[test]
fn revoked_at_warn_level_passes_with_warning() {
    let diagnostic = simple_signature().with_certificate(leaf("C", "ROOT").with_revocation(
        CertificateRevocation::revoked("CRL-C", date(2024, 6, 10), RevocationReason::Superseded),
    ));
    let mut policy = ValidationPolicy::default();
    policy.signing_certificate.not_revoked = Some(Level::Warn);

    let block = validate_with(&diagnostic, &policy);

    assert!(block.conclusion.is_passed());
    assert_eq!(block.conclusion.warnings.len(), 1);
}

#[test]
fn weak_algorithm() {
    let diagnostic = simple_signature().with_signature(
        SignatureToken::new("SIG").signed_by("C").with_crypto(CryptoParams::new(
            DigestAlgorithm::Sha1,
            EncryptionAlgorithm::Rsa,
            2048,
        )),
    );

    let block = validate(&diagnostic);

    assert!(block.conclusion.is(
        Indication::Indeterminate,
        Some(SubIndication::CryptoConstraintsFailureNoPoe)
    ));
}

#[test]
fn untrusted_root() {
    let diagnostic = simple_signature().with_certificate(
        crate::diagnostic::CertificateToken::new("ROOT", date(2020, 1, 1), date(2040, 1, 1))
            .self_signed(),
    );

    let block = validate(&diagnostic);

    assert!(block.conclusion.is(
        Indication::Indeterminate,
        Some(SubIndication::NoCertificateChainFound)
    ));
}

#[test]
fn revocation_waived_for_no_check_certificate() {
    let diagnostic = simple_signature().with_certificate(leaf("C", "ROOT").with_ocsp_no_check());

    let block = validate(&diagnostic);

    assert!(block.conclusion.is_passed());
    assert_eq!(
        block.checks.check_kind(validation_codes::REVOCATION_DATA_REQUIRED),
        Some(LogKind::Informational)
    );
    assert!(!block
        .checks
        .has_check(validation_codes::ACCEPTABLE_REVOCATION_AVAILABLE));
}

#[test]
fn timestamp_with_broken_imprint() {
    let diagnostic = DiagnosticData::new(date(2024, 6, 20))
        .with_certificate(root("TSA"))
        .with_timestamp(
            TimestampToken::new("TS", date(2024, 6, 1))
                .signed_by("TSA")
                .covering("SIG")
                .with_message_imprint_intact(false),
        );
    let policy = ValidationPolicy::default();
    let ctx = ValidationContext::new(&diagnostic, &policy);

    let block =
        basic::validate_timestamp(&ctx, diagnostic.timestamp("TS").unwrap()).unwrap();

    assert!(block
        .conclusion
        .is(Indication::Failed, Some(SubIndication::HashFailure)));
}
