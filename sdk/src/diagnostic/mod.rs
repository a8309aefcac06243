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

//! Read model of the tokens under validation.
//!
//! The engine never parses certificates, CRLs, OCSP responses or
//! signatures itself. A collaborator decodes them and fills a
//! [`DiagnosticData`], which stays immutable for the duration of a
//! validation run.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use ltv_trusted_lists::TrustedListsCertificateSource;
use serde::{Deserialize, Serialize};

mod crypto;
pub use crypto::{CryptoParams, DigestAlgorithm, EncryptionAlgorithm};

mod token;
pub use token::{
    CertificateRevocation, CertificateToken, ResponderId, RevocationKind, RevocationReason,
    RevocationStatus, RevocationToken, SignatureToken, SignedToken, TimestampToken,
    TrustServiceInfo,
};

/// All tokens collected for a validation run.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct DiagnosticData {
    /// The current time of the run.
    pub validation_date: DateTime<Utc>,

    /// Certificates by identifier.
    #[serde(default)]
    pub certificates: BTreeMap<String, CertificateToken>,

    /// Revocation data by identifier.
    #[serde(default)]
    pub revocations: BTreeMap<String, RevocationToken>,

    /// Time-stamps by identifier.
    #[serde(default)]
    pub timestamps: BTreeMap<String, TimestampToken>,

    /// Signatures by identifier.
    #[serde(default)]
    pub signatures: BTreeMap<String, SignatureToken>,
}

impl DiagnosticData {
    /// Creates an empty read model validated at `validation_date`.
    pub fn new(validation_date: DateTime<Utc>) -> Self {
        Self {
            validation_date,
            certificates: BTreeMap::new(),
            revocations: BTreeMap::new(),
            timestamps: BTreeMap::new(),
            signatures: BTreeMap::new(),
        }
    }

    /// Adds a certificate, replacing any with the same identifier.
    pub fn with_certificate(mut self, certificate: CertificateToken) -> Self {
        self.certificates
            .insert(certificate.id.clone(), certificate);
        self
    }

    /// Adds revocation data, replacing any with the same identifier.
    pub fn with_revocation(mut self, revocation: RevocationToken) -> Self {
        self.revocations.insert(revocation.id.clone(), revocation);
        self
    }

    /// Adds a time-stamp, replacing any with the same identifier.
    pub fn with_timestamp(mut self, timestamp: TimestampToken) -> Self {
        self.timestamps.insert(timestamp.id.clone(), timestamp);
        self
    }

    /// Adds a signature, replacing any with the same identifier.
    pub fn with_signature(mut self, signature: SignatureToken) -> Self {
        self.signatures.insert(signature.id.clone(), signature);
        self
    }

    /// Returns a certificate.
    pub fn certificate(&self, id: &str) -> Option<&CertificateToken> {
        self.certificates.get(id)
    }

    /// Returns revocation data.
    pub fn revocation(&self, id: &str) -> Option<&RevocationToken> {
        self.revocations.get(id)
    }

    /// Returns a time-stamp.
    pub fn timestamp(&self, id: &str) -> Option<&TimestampToken> {
        self.timestamps.get(id)
    }

    /// Returns a signature.
    pub fn signature(&self, id: &str) -> Option<&SignatureToken> {
        self.signatures.get(id)
    }

    /// Returns the identifiers of every token.
    pub fn token_ids(&self) -> impl Iterator<Item = &str> {
        self.certificates
            .keys()
            .chain(self.revocations.keys())
            .chain(self.timestamps.keys())
            .chain(self.signatures.keys())
            .map(String::as_str)
    }

    /// Returns the chain of `cert_id`, leaf first.
    ///
    /// The walk follows issuer references and stops after the first
    /// trusted or self-signed certificate, before an unknown issuer, or
    /// when an issuer repeats.
    pub fn certificate_chain(&self, cert_id: &str) -> Vec<&CertificateToken> {
        let mut chain = Vec::new();
        let mut seen = BTreeSet::new();
        let mut next = Some(cert_id);

        while let Some(id) = next {
            if !seen.insert(id) {
                break;
            }
            let Some(cert) = self.certificate(id) else {
                break;
            };
            chain.push(cert);
            if cert.trusted || cert.is_self_signed() {
                break;
            }
            next = cert.signing_certificate.as_deref();
        }

        chain
    }

    /// Returns the chain of the certificate that signed `token`, leaf
    /// first. Empty when the signing certificate is unknown.
    pub fn signing_chain<T: SignedToken + ?Sized>(&self, token: &T) -> Vec<&CertificateToken> {
        token
            .signing_certificate()
            .map(|id| self.certificate_chain(id))
            .unwrap_or_default()
    }

    /// Returns every known revocation token that reports on `cert`,
    /// together with the certificate's status in it.
    pub fn revocations_for<'a>(
        &'a self,
        cert: &'a CertificateToken,
    ) -> Vec<(&'a RevocationToken, &'a CertificateRevocation)> {
        cert.revocations
            .iter()
            .filter_map(|cr| self.revocation(&cr.revocation_id).map(|r| (r, cr)))
            .collect()
    }

    /// Returns the time-stamps covering `token_id`.
    pub fn timestamps_for(&self, token_id: &str) -> Vec<&TimestampToken> {
        self.timestamps
            .values()
            .filter(|ts| ts.timestamped_objects.iter().any(|o| o == token_id))
            .collect()
    }

    /// Marks every certificate listed in the published trust store as
    /// trusted and attaches its trust-service data.
    ///
    /// Returns the number of certificates that were matched.
    pub fn apply_trusted_lists(&mut self, source: &TrustedListsCertificateSource) -> usize {
        let snapshot = source.snapshot();
        let mut matched = 0;

        for cert in self.certificates.values_mut() {
            let Some(properties) = cert
                .fingerprint
                .as_deref()
                .and_then(|fp| snapshot.get(fp))
            else {
                continue;
            };

            cert.trusted = true;
            cert.trust_services = properties
                .iter()
                .map(|p| {
                    let status = p.current_status();
                    TrustServiceInfo {
                        lotl_url: p.lotl_url.clone(),
                        tl_url: p.tl_url.clone(),
                        provider_names: p.provider_names.clone(),
                        service_names: p.service_names.clone(),
                        status: status.map(|s| s.status.clone()),
                        expired_certs_revocation_info: status
                            .and_then(|s| s.expired_certs_revocation_info),
                    }
                })
                .collect();
            matched += 1;
        }

        matched
    }

    /// Marks the certificates with one of these fingerprints as trusted.
    ///
    /// Returns the number of certificates that were matched.
    pub fn apply_trust_anchors(&mut self, fingerprints: &BTreeSet<String>) -> usize {
        let mut matched = 0;
        for cert in self.certificates.values_mut() {
            if cert
                .fingerprint
                .as_ref()
                .is_some_and(|fp| fingerprints.contains(fp))
            {
                cert.trusted = true;
                matched += 1;
            }
        }
        matched
    }
}
