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

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::crypto::CryptoParams;

fn default_true() -> bool {
    true
}

/// Common view over every token that carries its own signature.
pub trait SignedToken {
    /// Identifier of the token.
    fn id(&self) -> &str;

    /// Identifier of the certificate that signed this token, if known.
    fn signing_certificate(&self) -> Option<&str>;

    /// Returns `true` if the token's signature verified.
    fn signature_intact(&self) -> bool;

    /// Cryptographic parameters of the token's signature.
    fn crypto(&self) -> &CryptoParams;
}

macro_rules! impl_signed_token {
    ($ty:ty) => {
        impl SignedToken for $ty {
            fn id(&self) -> &str {
                &self.id
            }

            fn signing_certificate(&self) -> Option<&str> {
                self.signing_certificate.as_deref()
            }

            fn signature_intact(&self) -> bool {
                self.signature_intact
            }

            fn crypto(&self) -> &CryptoParams {
                &self.crypto
            }
        }
    };
}

/// Trust-service data attached to a certificate found on a trusted list.
#[cfg_attr(feature = "json_schema", derive(schemars::JsonSchema))]
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct TrustServiceInfo {
    /// URL of the list of trusted lists that led to the trusted list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lotl_url: Option<String>,

    /// URL of the trusted list.
    pub tl_url: String,

    /// Names of the trust service provider.
    #[serde(default)]
    pub provider_names: Vec<String>,

    /// Names of the trust service.
    #[serde(default)]
    pub service_names: Vec<String>,

    /// Current status URI of the service.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Date from which the issuer keeps revocation data for expired
    /// certificates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expired_certs_revocation_info: Option<DateTime<Utc>>,
}

/// Revocation status of one certificate as reported by one revocation
/// token.
#[cfg_attr(feature = "json_schema", derive(schemars::JsonSchema))]
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[allow(missing_docs)]
pub enum RevocationStatus {
    Good,
    Revoked,
    Unknown,
}

/// CRL reason codes.
#[cfg_attr(feature = "json_schema", derive(schemars::JsonSchema))]
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[allow(missing_docs)]
pub enum RevocationReason {
    Unspecified,
    KeyCompromise,
    CaCompromise,
    AffiliationChanged,
    Superseded,
    CessationOfOperation,
    CertificateHold,
    RemoveFromCrl,
    PrivilegeWithdrawn,
    AaCompromise,
}

/// Status of a certificate inside one revocation token.
#[cfg_attr(feature = "json_schema", derive(schemars::JsonSchema))]
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct CertificateRevocation {
    /// Identifier of the revocation token.
    pub revocation_id: String,

    /// Reported status.
    pub status: RevocationStatus,

    /// Revocation date, when revoked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revocation_date: Option<DateTime<Utc>>,

    /// Revocation reason, when revoked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<RevocationReason>,

    /// OCSP only: the response carries a certificate hash extension.
    #[serde(default)]
    pub cert_hash_present: bool,

    /// OCSP only: the certificate hash extension matches the certificate.
    #[serde(default)]
    pub cert_hash_match: bool,
}

impl CertificateRevocation {
    /// The token reports the certificate as not revoked.
    pub fn good(revocation_id: impl Into<String>) -> Self {
        Self {
            revocation_id: revocation_id.into(),
            status: RevocationStatus::Good,
            revocation_date: None,
            reason: None,
            cert_hash_present: false,
            cert_hash_match: false,
        }
    }

    /// The token reports the certificate as revoked at `date`.
    pub fn revoked(
        revocation_id: impl Into<String>,
        date: DateTime<Utc>,
        reason: RevocationReason,
    ) -> Self {
        Self {
            status: RevocationStatus::Revoked,
            revocation_date: Some(date),
            reason: Some(reason),
            ..Self::good(revocation_id)
        }
    }

    /// The token does not know the certificate.
    pub fn unknown(revocation_id: impl Into<String>) -> Self {
        Self {
            status: RevocationStatus::Unknown,
            ..Self::good(revocation_id)
        }
    }

    /// Records an OCSP certificate hash extension.
    pub fn with_cert_hash(mut self, matches: bool) -> Self {
        self.cert_hash_present = true;
        self.cert_hash_match = matches;
        self
    }

    /// Revoked for any reason other than a certificate hold.
    pub fn is_revoked(&self) -> bool {
        self.status == RevocationStatus::Revoked
            && self.reason != Some(RevocationReason::CertificateHold)
    }

    /// Suspended by a certificate hold.
    pub fn is_on_hold(&self) -> bool {
        self.status == RevocationStatus::Revoked
            && self.reason == Some(RevocationReason::CertificateHold)
    }
}

/// A certificate.
#[cfg_attr(feature = "json_schema", derive(schemars::JsonSchema))]
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct CertificateToken {
    /// Identifier.
    pub id: String,

    /// Base64 encoded SHA-256 hash of the DER encoding.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,

    /// Subject distinguished name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_name: Option<String>,

    /// SHA-1 hash of the subject public key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_key_hash: Option<String>,

    /// Start of the validity period.
    pub not_before: DateTime<Utc>,

    /// End of the validity period.
    pub not_after: DateTime<Utc>,

    /// The certificate is a trust anchor.
    #[serde(default)]
    pub trusted: bool,

    /// The certificate is self-signed.
    #[serde(default)]
    pub self_signed: bool,

    /// Identifier of the issuer certificate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signing_certificate: Option<String>,

    /// The certificate's signature verified against the issuer key.
    #[serde(default = "default_true")]
    pub signature_intact: bool,

    /// Parameters of the certificate's signature.
    #[serde(default)]
    pub crypto: CryptoParams,

    /// Carries the `id-pkix-ocsp-nocheck` extension.
    #[serde(default)]
    pub ocsp_no_check: bool,

    /// Carries the `ext-etsi-valassured-ST-certs` extension.
    #[serde(default)]
    pub val_assured_short_term: bool,

    /// Certificate policy identifiers.
    #[serde(default)]
    pub policy_ids: Vec<String>,

    /// Status of this certificate in every collected revocation token.
    #[serde(default)]
    pub revocations: Vec<CertificateRevocation>,

    /// Trust services that list this certificate.
    #[serde(default)]
    pub trust_services: Vec<TrustServiceInfo>,
}

impl CertificateToken {
    /// Creates an untrusted certificate with an intact signature.
    pub fn new(id: impl Into<String>, not_before: DateTime<Utc>, not_after: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            fingerprint: None,
            subject_name: None,
            subject_key_hash: None,
            not_before,
            not_after,
            trusted: false,
            self_signed: false,
            signing_certificate: None,
            signature_intact: true,
            crypto: CryptoParams::default(),
            ocsp_no_check: false,
            val_assured_short_term: false,
            policy_ids: Vec::new(),
            revocations: Vec::new(),
            trust_services: Vec::new(),
        }
    }

    /// Marks the certificate as a trust anchor.
    pub fn trusted(mut self) -> Self {
        self.trusted = true;
        self
    }

    /// Marks the certificate as self-signed.
    pub fn self_signed(mut self) -> Self {
        self.self_signed = true;
        self
    }

    /// Sets the issuer certificate.
    pub fn signed_by(mut self, issuer_id: impl Into<String>) -> Self {
        self.signing_certificate = Some(issuer_id.into());
        self
    }

    /// Sets the fingerprint.
    pub fn with_fingerprint(mut self, fingerprint: impl Into<String>) -> Self {
        self.fingerprint = Some(fingerprint.into());
        self
    }

    /// Sets the subject name and key hash.
    pub fn with_subject(mut self, name: impl Into<String>, key_hash: impl Into<String>) -> Self {
        self.subject_name = Some(name.into());
        self.subject_key_hash = Some(key_hash.into());
        self
    }

    /// Sets the signature parameters.
    pub fn with_crypto(mut self, crypto: CryptoParams) -> Self {
        self.crypto = crypto;
        self
    }

    /// Sets whether the signature verified.
    pub fn with_signature_intact(mut self, intact: bool) -> Self {
        self.signature_intact = intact;
        self
    }

    /// Adds the `id-pkix-ocsp-nocheck` extension.
    pub fn with_ocsp_no_check(mut self) -> Self {
        self.ocsp_no_check = true;
        self
    }

    /// Adds a certificate policy identifier.
    pub fn with_policy_id(mut self, policy_id: impl Into<String>) -> Self {
        self.policy_ids.push(policy_id.into());
        self
    }

    /// Adds the status reported by one revocation token.
    pub fn with_revocation(mut self, revocation: CertificateRevocation) -> Self {
        self.revocations.push(revocation);
        self
    }

    /// Returns `true` if the certificate signed itself.
    pub fn is_self_signed(&self) -> bool {
        self.self_signed || self.signing_certificate.as_deref() == Some(self.id.as_str())
    }

    /// Returns `true` if `time` is inside the validity period.
    pub fn is_valid_at(&self, time: DateTime<Utc>) -> bool {
        self.not_before <= time && time <= self.not_after
    }

    /// Returns the status this certificate has in a given revocation token.
    pub fn revocation(&self, revocation_id: &str) -> Option<&CertificateRevocation> {
        self.revocations
            .iter()
            .find(|r| r.revocation_id == revocation_id)
    }

    /// Returns the earliest trusted-list `expiredCertsRevocationInfo` date
    /// attached to this certificate.
    pub fn expired_certs_revocation_info(&self) -> Option<DateTime<Utc>> {
        self.trust_services
            .iter()
            .filter_map(|s| s.expired_certs_revocation_info)
            .min()
    }
}

impl_signed_token!(CertificateToken);

/// Kind of revocation data.
#[cfg_attr(feature = "json_schema", derive(schemars::JsonSchema))]
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[allow(missing_docs)]
pub enum RevocationKind {
    Crl,
    Ocsp,
}

/// Identification of an OCSP responder.
#[cfg_attr(feature = "json_schema", derive(schemars::JsonSchema))]
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponderId {
    /// Responder distinguished name.
    ByName(String),

    /// SHA-1 hash of the responder public key.
    ByKey(String),
}

/// A CRL or OCSP response.
#[cfg_attr(feature = "json_schema", derive(schemars::JsonSchema))]
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct RevocationToken {
    /// Identifier.
    pub id: String,

    /// CRL or OCSP.
    pub kind: RevocationKind,

    /// `thisUpdate` for a CRL, `producedAt` for an OCSP response.
    pub production_date: DateTime<Utc>,

    /// `thisUpdate`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub this_update: Option<DateTime<Utc>>,

    /// `nextUpdate`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_update: Option<DateTime<Utc>>,

    /// OCSP `archiveCutOff` extension.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archive_cut_off: Option<DateTime<Utc>>,

    /// CRL `expiredCertsOnCRL` extension.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expired_certs_on_crl: Option<DateTime<Utc>>,

    /// Identifier of the certificate that signed the revocation data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signing_certificate: Option<String>,

    /// The revocation data's signature verified.
    #[serde(default = "default_true")]
    pub signature_intact: bool,

    /// Parameters of the revocation data's signature.
    #[serde(default)]
    pub crypto: CryptoParams,

    /// OCSP responder identification.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responder_id: Option<ResponderId>,
}

impl RevocationToken {
    /// Creates a CRL issued at `this_update`.
    pub fn crl(id: impl Into<String>, this_update: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            kind: RevocationKind::Crl,
            production_date: this_update,
            this_update: Some(this_update),
            next_update: None,
            archive_cut_off: None,
            expired_certs_on_crl: None,
            signing_certificate: None,
            signature_intact: true,
            crypto: CryptoParams::default(),
            responder_id: None,
        }
    }

    /// Creates an OCSP response produced at `produced_at`.
    pub fn ocsp(
        id: impl Into<String>,
        produced_at: DateTime<Utc>,
        this_update: DateTime<Utc>,
    ) -> Self {
        Self {
            kind: RevocationKind::Ocsp,
            production_date: produced_at,
            ..Self::crl(id, this_update)
        }
    }

    /// Sets `nextUpdate`.
    pub fn with_next_update(mut self, next_update: DateTime<Utc>) -> Self {
        self.next_update = Some(next_update);
        self
    }

    /// Removes `thisUpdate`.
    pub fn without_this_update(mut self) -> Self {
        self.this_update = None;
        self
    }

    /// Sets the `archiveCutOff` extension.
    pub fn with_archive_cut_off(mut self, date: DateTime<Utc>) -> Self {
        self.archive_cut_off = Some(date);
        self
    }

    /// Sets the `expiredCertsOnCRL` extension.
    pub fn with_expired_certs_on_crl(mut self, date: DateTime<Utc>) -> Self {
        self.expired_certs_on_crl = Some(date);
        self
    }

    /// Sets the issuer certificate.
    pub fn signed_by(mut self, issuer_id: impl Into<String>) -> Self {
        self.signing_certificate = Some(issuer_id.into());
        self
    }

    /// Sets the OCSP responder identification.
    pub fn with_responder_id(mut self, responder_id: ResponderId) -> Self {
        self.responder_id = Some(responder_id);
        self
    }

    /// Sets the signature parameters.
    pub fn with_crypto(mut self, crypto: CryptoParams) -> Self {
        self.crypto = crypto;
        self
    }

    /// Sets whether the signature verified.
    pub fn with_signature_intact(mut self, intact: bool) -> Self {
        self.signature_intact = intact;
        self
    }

    /// Returns `true` for an OCSP response.
    pub fn is_ocsp(&self) -> bool {
        self.kind == RevocationKind::Ocsp
    }
}

impl_signed_token!(RevocationToken);

/// A time-stamp token.
#[cfg_attr(feature = "json_schema", derive(schemars::JsonSchema))]
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct TimestampToken {
    /// Identifier.
    pub id: String,

    /// `genTime`.
    pub production_time: DateTime<Utc>,

    /// Identifier of the TSA certificate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signing_certificate: Option<String>,

    /// The time-stamp signature verified.
    #[serde(default = "default_true")]
    pub signature_intact: bool,

    /// The message imprint matches the time-stamped data.
    #[serde(default = "default_true")]
    pub message_imprint_intact: bool,

    /// Parameters of the time-stamp signature.
    #[serde(default)]
    pub crypto: CryptoParams,

    /// Identifiers of the time-stamped tokens.
    #[serde(default)]
    pub timestamped_objects: Vec<String>,
}

impl TimestampToken {
    /// Creates an intact time-stamp produced at `production_time`.
    pub fn new(id: impl Into<String>, production_time: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            production_time,
            signing_certificate: None,
            signature_intact: true,
            message_imprint_intact: true,
            crypto: CryptoParams::default(),
            timestamped_objects: Vec::new(),
        }
    }

    /// Sets the TSA certificate.
    pub fn signed_by(mut self, tsa_id: impl Into<String>) -> Self {
        self.signing_certificate = Some(tsa_id.into());
        self
    }

    /// Adds a time-stamped token.
    pub fn covering(mut self, token_id: impl Into<String>) -> Self {
        self.timestamped_objects.push(token_id.into());
        self
    }

    /// Sets whether the message imprint matched.
    pub fn with_message_imprint_intact(mut self, intact: bool) -> Self {
        self.message_imprint_intact = intact;
        self
    }

    /// Sets whether the signature verified.
    pub fn with_signature_intact(mut self, intact: bool) -> Self {
        self.signature_intact = intact;
        self
    }

    /// Sets the signature parameters.
    pub fn with_crypto(mut self, crypto: CryptoParams) -> Self {
        self.crypto = crypto;
        self
    }
}

impl_signed_token!(TimestampToken);

/// A signature.
#[cfg_attr(feature = "json_schema", derive(schemars::JsonSchema))]
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct SignatureToken {
    /// Identifier.
    pub id: String,

    /// Identifier of the signing certificate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signing_certificate: Option<String>,

    /// The signature value verified.
    #[serde(default = "default_true")]
    pub signature_intact: bool,

    /// Signature parameters.
    #[serde(default)]
    pub crypto: CryptoParams,

    /// Signing time claimed by the signer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub claimed_signing_time: Option<DateTime<Utc>>,

    /// Identifiers of the time-stamps over this signature.
    #[serde(default)]
    pub timestamps: Vec<String>,
}

impl SignatureToken {
    /// Creates an intact signature.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            signing_certificate: None,
            signature_intact: true,
            crypto: CryptoParams::default(),
            claimed_signing_time: None,
            timestamps: Vec::new(),
        }
    }

    /// Sets the signing certificate.
    pub fn signed_by(mut self, cert_id: impl Into<String>) -> Self {
        self.signing_certificate = Some(cert_id.into());
        self
    }

    /// Adds a time-stamp over this signature.
    pub fn with_timestamp(mut self, timestamp_id: impl Into<String>) -> Self {
        self.timestamps.push(timestamp_id.into());
        self
    }

    /// Sets the claimed signing time.
    pub fn with_claimed_signing_time(mut self, time: DateTime<Utc>) -> Self {
        self.claimed_signing_time = Some(time);
        self
    }

    /// Sets whether the signature verified.
    pub fn with_signature_intact(mut self, intact: bool) -> Self {
        self.signature_intact = intact;
        self
    }

    /// Sets the signature parameters.
    pub fn with_crypto(mut self, crypto: CryptoParams) -> Self {
        self.crypto = crypto;
        self
    }
}

impl_signed_token!(SignatureToken);
