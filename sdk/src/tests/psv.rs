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
        CertificateRevocation, CertificateToken, CryptoParams, DiagnosticData, DigestAlgorithm,
        EncryptionAlgorithm, RevocationReason, SignatureToken,
    },
    poe::PoeSource,
    policy::ValidationPolicy,
    process::{basic, psv, ValidationContext},
    Conclusion, Indication, SubIndication,
};

/// Runs basic validation of `SIG`, then past signature validation with a
/// proof of existence of `SIG` at `poe`, if any.
fn past(diagnostic: &DiagnosticData, poe: Option<chrono::DateTime<chrono::Utc>>) -> (Conclusion, psv::PsvResult) {
    let policy = ValidationPolicy::default();
    let mut ctx = ValidationContext::new(diagnostic, &policy);
    if let Some(time) = poe {
        ctx.poe.add("SIG", time, PoeSource::Timestamp("TS".into()));
    }
    let signature = diagnostic.signature("SIG").unwrap();
    let current = basic::validate_signature(&ctx, signature).unwrap().conclusion;
    let result = psv::past_signature_validation(&ctx, signature, &current).unwrap();
    (current, result)
}

fn revoked_on_june_10th() -> DiagnosticData {
    simple_signature().with_certificate(leaf("C", "ROOT").with_revocation(
        CertificateRevocation::revoked("CRL-C", date(2024, 6, 10), RevocationReason::KeyCompromise),
    ))
}

#[test]
fn signed_before_revocation() {
    let (current, result) = past(&revoked_on_june_10th(), Some(date(2024, 6, 1)));

    assert!(current.is(Indication::Indeterminate, Some(SubIndication::RevokedNoPoe)));
    assert!(result.block.conclusion.is_passed(), "{}", result.block.conclusion);
    assert_eq!(result.best_signature_time, Some(date(2024, 6, 1)));
    assert_eq!(result.block.control_time, Some(date(2024, 6, 10)));
}

#[test]
fn signed_after_revocation() {
    let (current, result) = past(&revoked_on_june_10th(), Some(date(2024, 6, 12)));

    assert!(result
        .block
        .conclusion
        .is(current.indication, current.sub_indication));
    assert_eq!(result.best_signature_time, None);
    assert_eq!(
        result.block.checks.check_kind(validation_codes::POE_SIGNATURE_EXISTS),
        Some(LogKind::Warning)
    );
    assert_eq!(
        result.block.checks.check_kind(validation_codes::CURRENT_TIME_INDICATION),
        Some(LogKind::Failure)
    );
}

#[test]
fn weak_algorithm_acceptable_at_poe() {
    let diagnostic = DiagnosticData::new(date(2024, 6, 20))
        .with_certificate(
            CertificateToken::new("ROOT", date(2000, 1, 1), date(2040, 1, 1))
                .trusted()
                .self_signed(),
        )
        .with_certificate(
            CertificateToken::new("C", date(2008, 1, 1), date(2030, 1, 1))
                .signed_by("ROOT")
                .with_revocation(CertificateRevocation::good("CRL-C")),
        )
        .with_revocation(crl("CRL-C", "ROOT", date(2024, 6, 15)))
        .with_signature(SignatureToken::new("SIG").signed_by("C").with_crypto(
            CryptoParams::new(DigestAlgorithm::Sha1, EncryptionAlgorithm::Rsa, 2048),
        ));

    let (current, result) = past(&diagnostic, Some(date(2009, 6, 1)));
    assert!(current.is(
        Indication::Indeterminate,
        Some(SubIndication::CryptoConstraintsFailureNoPoe)
    ));
    assert!(result.block.conclusion.is_passed());
    assert_eq!(
        result
            .block
            .checks
            .check_kind(validation_codes::CRYPTOGRAPHIC_CONSTRAINTS_AT_POE),
        Some(LogKind::Success)
    );

    let (_, result) = past(&diagnostic, Some(date(2010, 6, 1)));
    assert!(result.block.conclusion.is(
        Indication::Indeterminate,
        Some(SubIndication::CryptoConstraintsFailureNoPoe)
    ));
}

#[test]
fn fresh_revocation_at_best_signature_time() {
    let mut diagnostic = DiagnosticData::new(date(2024, 8, 1))
        .with_certificate(root("ROOT"))
        .with_certificate(
            leaf("C", "ROOT")
                .with_revocation(CertificateRevocation::good("CRL-OLD"))
                .with_revocation(CertificateRevocation::good("CRL-NEW")),
        )
        .with_revocation(crl("CRL-OLD", "ROOT", date(2024, 6, 1)))
        .with_revocation(crl("CRL-NEW", "ROOT", date(2024, 6, 15)))
        .with_signature(SignatureToken::new("SIG").signed_by("C"));

    let (current, result) = past(&diagnostic, Some(date(2024, 6, 10)));
    assert!(current.is(Indication::Indeterminate, Some(SubIndication::TryLater)));
    assert!(result.block.conclusion.is_passed());
    assert_eq!(
        result
            .block
            .checks
            .check_kind(validation_codes::REVOCATION_FRESH_AT_BEST_SIGNATURE_TIME),
        Some(LogKind::Success)
    );

    // Without the older CRL nothing was fresh when the signature existed.
    diagnostic = diagnostic.with_certificate(
        leaf("C", "ROOT").with_revocation(CertificateRevocation::good("CRL-NEW")),
    );
    let (current, result) = past(&diagnostic, Some(date(2024, 6, 10)));
    assert!(result
        .block
        .conclusion
        .is(current.indication, current.sub_indication));
}

#[test]
fn unknown_signing_certificate_keeps_verdict() {
    let diagnostic =
        simple_signature().with_signature(SignatureToken::new("SIG").signed_by("MISSING"));

    let (current, result) = past(&diagnostic, Some(date(2024, 6, 1)));

    assert!(current.is(
        Indication::Indeterminate,
        Some(SubIndication::NoSigningCertificateFound)
    ));
    assert!(result
        .block
        .conclusion
        .is(current.indication, current.sub_indication));
    assert_eq!(result.best_signature_time, None);
}

#[test]
fn rejected_revocation_does_not_prove_freshness() {
    // CRL-OLD would be fresh at the best signature time, but its signature
    // is broken.
    let diagnostic = DiagnosticData::new(date(2024, 8, 1))
        .with_certificate(root("ROOT"))
        .with_certificate(
            leaf("C", "ROOT")
                .with_revocation(CertificateRevocation::good("CRL-OLD"))
                .with_revocation(CertificateRevocation::good("CRL-NEW")),
        )
        .with_revocation(crl("CRL-OLD", "ROOT", date(2024, 6, 1)).with_signature_intact(false))
        .with_revocation(crl("CRL-NEW", "ROOT", date(2024, 6, 15)))
        .with_signature(SignatureToken::new("SIG").signed_by("C"));

    let (current, result) = past(&diagnostic, Some(date(2024, 6, 10)));

    assert!(current.is(Indication::Indeterminate, Some(SubIndication::TryLater)));
    assert!(result
        .block
        .conclusion
        .is(current.indication, current.sub_indication));
    assert!(!result
        .block
        .checks
        .has_check(validation_codes::REVOCATION_FRESH_AT_BEST_SIGNATURE_TIME));
}

#[test]
fn rejected_revocation_is_not_crypto_checked() {
    // CRL-WEAK uses SHA-1 and is never selected: its signature is broken.
    let diagnostic = DiagnosticData::new(date(2024, 6, 20))
        .with_certificate(
            CertificateToken::new("ROOT", date(2000, 1, 1), date(2040, 1, 1))
                .trusted()
                .self_signed(),
        )
        .with_certificate(
            CertificateToken::new("C", date(2008, 1, 1), date(2030, 1, 1))
                .signed_by("ROOT")
                .with_revocation(CertificateRevocation::good("CRL-C"))
                .with_revocation(CertificateRevocation::good("CRL-WEAK")),
        )
        .with_revocation(crl("CRL-C", "ROOT", date(2024, 6, 15)))
        .with_revocation(
            crl("CRL-WEAK", "ROOT", date(2024, 6, 1))
                .with_signature_intact(false)
                .with_crypto(CryptoParams::new(
                    DigestAlgorithm::Sha1,
                    EncryptionAlgorithm::Rsa,
                    2048,
                )),
        )
        .with_signature(SignatureToken::new("SIG").signed_by("C").with_crypto(
            CryptoParams::new(DigestAlgorithm::Sha1, EncryptionAlgorithm::Rsa, 2048),
        ));

    let (current, result) = past(&diagnostic, Some(date(2009, 6, 1)));

    assert!(current.is(
        Indication::Indeterminate,
        Some(SubIndication::CryptoConstraintsFailureNoPoe)
    ));
    assert!(result.block.conclusion.is_passed(), "{}", result.block.conclusion);
}
