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

//! Typed validation policy.
//!
//! Every check reads its [`Level`] from the policy. A check whose level is
//! `None` is not executed and leaves no record.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::diagnostic::CertificateToken;

mod cryptographic;
pub use cryptographic::{Acceptability, CryptographicConstraint, DigestRule, EncryptionRule};

/// Severity of a check.
#[cfg_attr(feature = "json_schema", derive(schemars::JsonSchema))]
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Level {
    /// The check is recorded as ignored and not evaluated.
    Ignore,

    /// A failing check is recorded as informational.
    Inform,

    /// A failing check is recorded as a warning.
    Warn,

    /// A failing check sets the conclusion and halts the chain.
    Fail,
}

/// How revocation of a certificate affects the certificates it issued.
#[cfg_attr(feature = "json_schema", derive(schemars::JsonSchema))]
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationModel {
    /// Every certificate must be valid at validation time.
    #[default]
    Shell,

    /// A certificate must be valid when it issued the next one.
    Chain,

    /// Chain for the signing certificate, shell for the CA certificates.
    Hybrid,
}

/// Position of a certificate in its chain.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SubContext {
    /// The certificate that signed the token under validation.
    SigningCert,

    /// Any certificate above the signing certificate.
    CaCert,
}

/// Revocation freshness constraint.
#[cfg_attr(feature = "json_schema", derive(schemars::JsonSchema))]
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct RevocationFreshnessConstraint {
    /// Level of the check.
    pub level: Option<Level>,

    /// Maximum age of revocation data, in seconds. When unset, the
    /// revocation's own `nextUpdate - thisUpdate` window is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_age_seconds: Option<i64>,
}

impl RevocationFreshnessConstraint {
    /// Returns the configured maximum age.
    pub fn max_age(&self) -> Option<Duration> {
        self.max_age_seconds.and_then(Duration::try_seconds)
    }
}

impl Default for RevocationFreshnessConstraint {
    fn default() -> Self {
        Self {
            level: Some(Level::Fail),
            max_age_seconds: None,
        }
    }
}

/// Extension name of `id-pkix-ocsp-nocheck` in a [`RevocationSkipConstraint`].
pub const OCSP_NO_CHECK: &str = "ocsp_no_check";

/// Extension name of `ext-etsi-valassured-ST-certs` in a
/// [`RevocationSkipConstraint`].
pub const VAL_ASSURED_ST_CERTS: &str = "val_assured_st_certs";

/// Certificates for which revocation data is not required.
#[cfg_attr(feature = "json_schema", derive(schemars::JsonSchema))]
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct RevocationSkipConstraint {
    /// Level of the check.
    pub level: Option<Level>,

    /// Extensions that waive revocation checking.
    pub certificate_extensions: Vec<String>,

    /// Certificate policy identifiers that waive revocation checking.
    pub certificate_policies: Vec<String>,
}

impl RevocationSkipConstraint {
    /// Returns `true` if `cert` matches one of the waivers.
    pub fn matches(&self, cert: &CertificateToken) -> bool {
        let extension = self.certificate_extensions.iter().any(|ext| {
            (ext == OCSP_NO_CHECK && cert.ocsp_no_check)
                || (ext == VAL_ASSURED_ST_CERTS && cert.val_assured_short_term)
        });
        let policy = self
            .certificate_policies
            .iter()
            .any(|p| cert.policy_ids.contains(p));
        extension || policy
    }
}

impl Default for RevocationSkipConstraint {
    fn default() -> Self {
        Self {
            level: Some(Level::Inform),
            certificate_extensions: vec![OCSP_NO_CHECK.to_owned(), VAL_ASSURED_ST_CERTS.to_owned()],
            certificate_policies: Vec::new(),
        }
    }
}

/// Constraints on a signature or a time-stamp.
#[cfg_attr(feature = "json_schema", derive(schemars::JsonSchema))]
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct SignatureConstraints {
    /// The signing certificate is identified.
    pub signing_certificate_known: Option<Level>,

    /// The signature value is intact.
    pub signature_intact: Option<Level>,

    /// Time-stamps only: the message imprint is intact.
    pub message_imprint_intact: Option<Level>,
}

impl Default for SignatureConstraints {
    fn default() -> Self {
        Self {
            signing_certificate_known: Some(Level::Fail),
            signature_intact: Some(Level::Fail),
            message_imprint_intact: Some(Level::Fail),
        }
    }
}

/// Constraints on one certificate of a chain.
#[cfg_attr(feature = "json_schema", derive(schemars::JsonSchema))]
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct CertificateConstraints {
    /// A chain up to a trust anchor can be built.
    pub prospective_chain: Option<Level>,

    /// The certificate's signature is intact.
    pub signature_intact: Option<Level>,

    /// The validation time is within the validity range.
    pub validity_range: Option<Level>,

    /// The validity ranges of the chain intersect.
    pub validity_intersection: Option<Level>,

    /// Acceptable revocation data is available.
    pub acceptable_revocation: Option<Level>,

    /// The certificate is not revoked.
    pub not_revoked: Option<Level>,

    /// The certificate is not on hold.
    pub not_on_hold: Option<Level>,

    /// Revocation data is fresh.
    pub revocation_freshness: Option<RevocationFreshnessConstraint>,

    /// Certificates for which revocation data is not required.
    pub revocation_skip: Option<RevocationSkipConstraint>,
}

impl Default for CertificateConstraints {
    fn default() -> Self {
        Self {
            prospective_chain: Some(Level::Fail),
            signature_intact: Some(Level::Fail),
            validity_range: Some(Level::Fail),
            validity_intersection: Some(Level::Fail),
            acceptable_revocation: Some(Level::Fail),
            not_revoked: Some(Level::Fail),
            not_on_hold: Some(Level::Fail),
            revocation_freshness: Some(RevocationFreshnessConstraint::default()),
            revocation_skip: Some(RevocationSkipConstraint::default()),
        }
    }
}

/// Constraints applied when accepting revocation data.
#[cfg_attr(feature = "json_schema", derive(schemars::JsonSchema))]
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct RevocationConstraints {
    pub known: Option<Level>,
    pub issuer_known: Option<Level>,
    pub issuer_chain: Option<Level>,
    pub signature_intact: Option<Level>,
    pub this_update_present: Option<Level>,
    pub ocsp_issuer_valid_at_production: Option<Level>,
    pub ocsp_responder_id_match: Option<Level>,
    pub ocsp_cert_hash_match: Option<Level>,
    pub ocsp_not_self_issued: Option<Level>,
    pub after_certificate_issuance: Option<Level>,
    pub concerns_certificate: Option<Level>,
    pub issuer_revocation_acceptable: Option<Level>,
    pub consistent: Option<Level>,
    pub issued_before_control_time: Option<Level>,
    pub issuer_trusted_or_poe: Option<Level>,
}

impl Default for RevocationConstraints {
    fn default() -> Self {
        let fail = Some(Level::Fail);
        Self {
            known: fail,
            issuer_known: fail,
            issuer_chain: fail,
            signature_intact: fail,
            this_update_present: fail,
            ocsp_issuer_valid_at_production: fail,
            ocsp_responder_id_match: fail,
            ocsp_cert_hash_match: fail,
            ocsp_not_self_issued: fail,
            after_certificate_issuance: fail,
            concerns_certificate: fail,
            issuer_revocation_acceptable: fail,
            consistent: fail,
            issued_before_control_time: fail,
            issuer_trusted_or_poe: fail,
        }
    }
}

/// Constraints of the past validation processes.
#[cfg_attr(feature = "json_schema", derive(schemars::JsonSchema))]
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct LongTermConstraints {
    /// Acceptable revocation data is available before the control time.
    pub acceptable_revocation: Option<Level>,

    /// A certificate and its revocation data are proven to exist before
    /// the control time.
    pub poe_exists: Option<Level>,

    /// The signature is proven to exist before the control time.
    pub signature_poe: Option<Level>,

    /// Past certificate validation is acceptable.
    pub past_certificate_validation: Option<Level>,

    /// The best signature time falls within the signing certificate's
    /// validity range.
    pub best_signature_time: Option<Level>,

    /// Revocation data is fresh at the best signature time.
    pub revocation_fresh_at_best_signature_time: Option<Level>,

    /// Algorithms were acceptable when the material was proven to exist.
    pub cryptographic_at_poe: Option<Level>,
}

impl Default for LongTermConstraints {
    fn default() -> Self {
        let fail = Some(Level::Fail);
        Self {
            acceptable_revocation: fail,
            poe_exists: fail,
            signature_poe: Some(Level::Warn),
            past_certificate_validation: fail,
            best_signature_time: fail,
            revocation_fresh_at_best_signature_time: fail,
            cryptographic_at_poe: fail,
        }
    }
}

/// The validation policy.
#[cfg_attr(feature = "json_schema", derive(schemars::JsonSchema))]
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct ValidationPolicy {
    /// Validation model.
    pub model: ValidationModel,

    /// Signature constraints.
    pub signature: SignatureConstraints,

    /// Time-stamp constraints.
    pub timestamp: SignatureConstraints,

    /// Constraints on signing certificates.
    pub signing_certificate: CertificateConstraints,

    /// Constraints on CA certificates.
    pub ca_certificate: CertificateConstraints,

    /// Revocation acceptance constraints.
    pub revocation: RevocationConstraints,

    /// Past validation constraints.
    pub long_term: LongTermConstraints,

    /// Cryptographic suite constraint.
    pub cryptographic: CryptographicConstraint,
}

impl ValidationPolicy {
    /// Returns the constraints for a certificate in `context`.
    pub fn certificate(&self, context: SubContext) -> &CertificateConstraints {
        match context {
            SubContext::SigningCert => &self.signing_certificate,
            SubContext::CaCert => &self.ca_certificate,
        }
    }

    /// Returns `true` if revocation data is required for `cert`.
    ///
    /// Trust anchors and self-signed certificates never need revocation
    /// data. Other certificates are waived by the skip constraint of their
    /// context.
    pub fn revocation_data_required(&self, cert: &CertificateToken, context: SubContext) -> bool {
        if cert.trusted || cert.is_self_signed() {
            return false;
        }
        !self
            .certificate(context)
            .revocation_skip
            .as_ref()
            .is_some_and(|skip| skip.level.is_some() && skip.matches(cert))
    }
}
