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

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use ltv_status_tracker::validation_codes;

use crate::{
    diagnostic::{CertificateRevocation, CertificateToken, ResponderId, RevocationToken},
    policy::Level,
    poe::PoeStore,
    process::{ChainItem, SubIndication},
    Result,
};

/// The revocation data referenced by the certificate was collected.
pub struct RevocationKnown<'a> {
    pub(crate) revocation_id: &'a str,
    pub(crate) revocation: Option<&'a RevocationToken>,
    pub(crate) level: Option<Level>,
}

impl ChainItem for RevocationKnown<'_> {
    fn name(&self) -> &'static str {
        validation_codes::REVOCATION_KNOWN
    }

    fn description(&self) -> Cow<'static, str> {
        "Is the revocation data known?".into()
    }

    fn level(&self) -> Option<Level> {
        self.level
    }

    fn process(&self) -> Result<bool> {
        Ok(self.revocation.is_some())
    }

    fn sub_indication(&self) -> Option<SubIndication> {
        Some(SubIndication::TryLater)
    }

    fn error_message(&self) -> Cow<'static, str> {
        format!("revocation data {} is unknown", self.revocation_id).into()
    }
}

/// The certificate that signed the revocation data is identified.
pub struct RevocationIssuerKnown<'a> {
    pub(crate) revocation: &'a RevocationToken,
    pub(crate) issuer: Option<&'a CertificateToken>,
    pub(crate) level: Option<Level>,
}

impl ChainItem for RevocationIssuerKnown<'_> {
    fn name(&self) -> &'static str {
        validation_codes::REVOCATION_ISSUER_KNOWN
    }

    fn description(&self) -> Cow<'static, str> {
        "Is the revocation data issuer identified?".into()
    }

    fn level(&self) -> Option<Level> {
        self.level
    }

    fn process(&self) -> Result<bool> {
        Ok(self.issuer.is_some())
    }

    fn sub_indication(&self) -> Option<SubIndication> {
        Some(SubIndication::NoSigningCertificateFound)
    }

    fn error_message(&self) -> Cow<'static, str> {
        format!("the issuer of revocation data {} is unknown", self.revocation.id).into()
    }
}

/// A chain from the revocation issuer up to a trust anchor can be built.
pub struct RevocationIssuerChain<'a> {
    pub(crate) revocation: &'a RevocationToken,
    pub(crate) chain: &'a [&'a CertificateToken],
    pub(crate) level: Option<Level>,
}

impl ChainItem for RevocationIssuerChain<'_> {
    fn name(&self) -> &'static str {
        validation_codes::REVOCATION_ISSUER_CHAIN
    }

    fn description(&self) -> Cow<'static, str> {
        "Does the revocation issuer chain up to a trust anchor?".into()
    }

    fn level(&self) -> Option<Level> {
        self.level
    }

    fn process(&self) -> Result<bool> {
        Ok(self.chain.last().is_some_and(|cert| cert.trusted))
    }

    fn sub_indication(&self) -> Option<SubIndication> {
        Some(SubIndication::NoCertificateChainFound)
    }

    fn error_message(&self) -> Cow<'static, str> {
        format!(
            "no trust anchor found for the issuer of revocation data {}",
            self.revocation.id
        )
        .into()
    }
}

/// The signature of the revocation data is intact.
pub struct RevocationSignatureIntact<'a> {
    pub(crate) revocation: &'a RevocationToken,
    pub(crate) level: Option<Level>,
}

impl ChainItem for RevocationSignatureIntact<'_> {
    fn name(&self) -> &'static str {
        validation_codes::REVOCATION_SIGNATURE_INTACT
    }

    fn description(&self) -> Cow<'static, str> {
        "Is the revocation data signature intact?".into()
    }

    fn level(&self) -> Option<Level> {
        self.level
    }

    fn process(&self) -> Result<bool> {
        Ok(self.revocation.signature_intact)
    }

    fn sub_indication(&self) -> Option<SubIndication> {
        Some(SubIndication::CertificateChainGeneralFailure)
    }

    fn error_message(&self) -> Cow<'static, str> {
        format!("the signature of revocation data {} is not intact", self.revocation.id).into()
    }
}

/// The revocation data carries `thisUpdate`.
pub struct ThisUpdatePresent<'a> {
    pub(crate) revocation: &'a RevocationToken,
    pub(crate) level: Option<Level>,
}

impl ChainItem for ThisUpdatePresent<'_> {
    fn name(&self) -> &'static str {
        validation_codes::REVOCATION_THIS_UPDATE_PRESENT
    }

    fn description(&self) -> Cow<'static, str> {
        "Is thisUpdate present?".into()
    }

    fn level(&self) -> Option<Level> {
        self.level
    }

    fn process(&self) -> Result<bool> {
        Ok(self.revocation.this_update.is_some())
    }

    fn sub_indication(&self) -> Option<SubIndication> {
        Some(SubIndication::CertificateChainGeneralFailure)
    }

    fn error_message(&self) -> Cow<'static, str> {
        format!("revocation data {} has no thisUpdate", self.revocation.id).into()
    }
}

/// The OCSP responder certificate was valid when the response was
/// produced.
pub struct OcspIssuerValidAtProduction<'a> {
    pub(crate) revocation: &'a RevocationToken,
    pub(crate) issuer: &'a CertificateToken,
    pub(crate) level: Option<Level>,
}

impl ChainItem for OcspIssuerValidAtProduction<'_> {
    fn name(&self) -> &'static str {
        validation_codes::OCSP_ISSUER_VALID_AT_PRODUCTION
    }

    fn description(&self) -> Cow<'static, str> {
        "Was the OCSP responder certificate valid at production time?".into()
    }

    fn level(&self) -> Option<Level> {
        self.level
    }

    fn process(&self) -> Result<bool> {
        Ok(self.issuer.is_valid_at(self.revocation.production_date))
    }

    fn sub_indication(&self) -> Option<SubIndication> {
        Some(SubIndication::CertificateChainGeneralFailure)
    }

    fn error_message(&self) -> Cow<'static, str> {
        format!(
            "responder certificate {} is not valid at {}",
            self.issuer.id, self.revocation.production_date
        )
        .into()
    }
}

/// The OCSP responder identification matches the responder certificate.
pub struct OcspResponderIdMatch<'a> {
    pub(crate) revocation: &'a RevocationToken,
    pub(crate) issuer: &'a CertificateToken,
    pub(crate) level: Option<Level>,
}

impl ChainItem for OcspResponderIdMatch<'_> {
    fn name(&self) -> &'static str {
        validation_codes::OCSP_RESPONDER_ID_MATCH
    }

    fn description(&self) -> Cow<'static, str> {
        "Does the responder id match the OCSP signing certificate?".into()
    }

    fn level(&self) -> Option<Level> {
        self.level
    }

    fn process(&self) -> Result<bool> {
        Ok(match &self.revocation.responder_id {
            Some(ResponderId::ByName(name)) => {
                self.issuer.subject_name.as_ref() == Some(name)
            }
            Some(ResponderId::ByKey(key)) => self.issuer.subject_key_hash.as_ref() == Some(key),
            None => false,
        })
    }

    fn sub_indication(&self) -> Option<SubIndication> {
        Some(SubIndication::CertificateChainGeneralFailure)
    }

    fn error_message(&self) -> Cow<'static, str> {
        format!(
            "the responder id of {} does not match certificate {}",
            self.revocation.id, self.issuer.id
        )
        .into()
    }
}

/// The OCSP certificate hash extension, when present, matches the
/// certificate.
pub struct OcspCertHashMatch<'a> {
    pub(crate) revocation: &'a RevocationToken,
    pub(crate) status: &'a CertificateRevocation,
    pub(crate) level: Option<Level>,
}

impl ChainItem for OcspCertHashMatch<'_> {
    fn name(&self) -> &'static str {
        validation_codes::OCSP_CERT_HASH_MATCH
    }

    fn description(&self) -> Cow<'static, str> {
        "Does the certHash extension match the certificate?".into()
    }

    fn level(&self) -> Option<Level> {
        self.level
    }

    fn process(&self) -> Result<bool> {
        Ok(self.status.cert_hash_match)
    }

    fn sub_indication(&self) -> Option<SubIndication> {
        Some(SubIndication::CertificateChainGeneralFailure)
    }

    fn error_message(&self) -> Cow<'static, str> {
        format!("the certHash of {} does not match", self.revocation.id).into()
    }
}

/// The OCSP response is not signed by the certificate it reports on.
pub struct OcspNotSelfIssued<'a> {
    pub(crate) revocation: &'a RevocationToken,
    pub(crate) cert: &'a CertificateToken,
    pub(crate) level: Option<Level>,
}

impl ChainItem for OcspNotSelfIssued<'_> {
    fn name(&self) -> &'static str {
        validation_codes::OCSP_NOT_SELF_ISSUED
    }

    fn description(&self) -> Cow<'static, str> {
        "Is the OCSP response not self-issued?".into()
    }

    fn level(&self) -> Option<Level> {
        self.level
    }

    fn process(&self) -> Result<bool> {
        Ok(self.revocation.signing_certificate.as_deref() != Some(self.cert.id.as_str()))
    }

    fn sub_indication(&self) -> Option<SubIndication> {
        Some(SubIndication::CertificateChainGeneralFailure)
    }

    fn error_message(&self) -> Cow<'static, str> {
        format!(
            "OCSP response {} is signed by the certificate it concerns",
            self.revocation.id
        )
        .into()
    }
}

/// The revocation data was issued after the certificate.
pub struct RevocationAfterCertificateIssuance<'a> {
    pub(crate) revocation: &'a RevocationToken,
    pub(crate) cert: &'a CertificateToken,
    pub(crate) level: Option<Level>,
}

impl ChainItem for RevocationAfterCertificateIssuance<'_> {
    fn name(&self) -> &'static str {
        validation_codes::REVOCATION_AFTER_CERTIFICATE_ISSUANCE
    }

    fn description(&self) -> Cow<'static, str> {
        "Was the revocation data issued after the certificate?".into()
    }

    fn level(&self) -> Option<Level> {
        self.level
    }

    fn process(&self) -> Result<bool> {
        Ok(self
            .revocation
            .this_update
            .is_some_and(|this_update| self.cert.not_before <= this_update))
    }

    fn sub_indication(&self) -> Option<SubIndication> {
        Some(SubIndication::CertificateChainGeneralFailure)
    }

    fn error_message(&self) -> Cow<'static, str> {
        format!(
            "revocation data {} precedes certificate {}",
            self.revocation.id, self.cert.id
        )
        .into()
    }
}

/// The revocation data reports a known status for the certificate.
pub struct RevocationConcernsCertificate<'a> {
    pub(crate) revocation: &'a RevocationToken,
    pub(crate) status: &'a CertificateRevocation,
    pub(crate) level: Option<Level>,
}

impl ChainItem for RevocationConcernsCertificate<'_> {
    fn name(&self) -> &'static str {
        validation_codes::REVOCATION_CONCERNS_CERTIFICATE
    }

    fn description(&self) -> Cow<'static, str> {
        "Does the revocation data concern the certificate?".into()
    }

    fn level(&self) -> Option<Level> {
        self.level
    }

    fn process(&self) -> Result<bool> {
        Ok(self.status.status != crate::diagnostic::RevocationStatus::Unknown)
    }

    fn sub_indication(&self) -> Option<SubIndication> {
        Some(SubIndication::CertificateChainGeneralFailure)
    }

    fn error_message(&self) -> Cow<'static, str> {
        format!(
            "revocation data {} does not know the certificate",
            self.revocation.id
        )
        .into()
    }
}

/// Acceptable revocation data was found for every certificate of the
/// revocation issuer chain that requires it.
pub struct RevocationIssuerRevocationAcceptable<'a> {
    pub(crate) revocation: &'a RevocationToken,
    pub(crate) acceptable: bool,
    pub(crate) level: Option<Level>,
}

impl ChainItem for RevocationIssuerRevocationAcceptable<'_> {
    fn name(&self) -> &'static str {
        validation_codes::REVOCATION_ISSUER_REVOCATION_ACCEPTABLE
    }

    fn description(&self) -> Cow<'static, str> {
        "Is the revocation status of the revocation issuer chain known?".into()
    }

    fn level(&self) -> Option<Level> {
        self.level
    }

    fn process(&self) -> Result<bool> {
        Ok(self.acceptable)
    }

    fn sub_indication(&self) -> Option<SubIndication> {
        Some(SubIndication::TryLater)
    }

    fn error_message(&self) -> Cow<'static, str> {
        format!(
            "no acceptable revocation data for the issuer chain of {}",
            self.revocation.id
        )
        .into()
    }
}

/// The revocation data is consistent with the certificate's validity
/// range.
///
/// `thisUpdate` must follow the certificate's `notBefore`, and the issuer
/// must still have kept status information for the certificate: its
/// `notAfter` may not precede the retention date, which is `archiveCutOff`,
/// else `expiredCertsOnCRL`, else the revocation signer's trusted-list
/// `expiredCertsRevocationInfo`, capped at `thisUpdate`. A matching
/// certificate hash satisfies the second condition.
pub struct RevocationConsistent<'a> {
    pub(crate) revocation: &'a RevocationToken,
    pub(crate) cert: &'a CertificateToken,
    pub(crate) status: &'a CertificateRevocation,
    pub(crate) issuer_expired_certs_info: Option<DateTime<Utc>>,
    pub(crate) level: Option<Level>,
}

impl RevocationConsistent<'_> {
    fn not_after_revocation(&self) -> Option<DateTime<Utc>> {
        let this_update = self.revocation.this_update?;
        let retention = self
            .revocation
            .archive_cut_off
            .or(self.revocation.expired_certs_on_crl)
            .or(self.issuer_expired_certs_info);
        Some(retention.map_or(this_update, |date| date.min(this_update)))
    }
}

impl ChainItem for RevocationConsistent<'_> {
    fn name(&self) -> &'static str {
        validation_codes::REVOCATION_CONSISTENT
    }

    fn description(&self) -> Cow<'static, str> {
        "Is the revocation data consistent with the certificate?".into()
    }

    fn level(&self) -> Option<Level> {
        self.level
    }

    fn process(&self) -> Result<bool> {
        let Some(this_update) = self.revocation.this_update else {
            return Ok(false);
        };
        if self.cert.not_before >= this_update {
            return Ok(false);
        }
        if self.status.cert_hash_present && self.status.cert_hash_match {
            return Ok(true);
        }
        Ok(self
            .not_after_revocation()
            .is_some_and(|not_after_revocation| self.cert.not_after >= not_after_revocation))
    }

    fn sub_indication(&self) -> Option<SubIndication> {
        Some(SubIndication::TryLater)
    }

    fn error_message(&self) -> Cow<'static, str> {
        format!(
            "revocation data {} is not consistent with certificate {}",
            self.revocation.id, self.cert.id
        )
        .into()
    }

    fn token_id(&self) -> Option<&str> {
        Some(&self.revocation.id)
    }
}

/// The revocation data was issued before the control time.
pub struct RevocationIssuedBeforeControlTime<'a> {
    pub(crate) revocation: &'a RevocationToken,
    pub(crate) control_time: DateTime<Utc>,
    pub(crate) level: Option<Level>,
}

impl ChainItem for RevocationIssuedBeforeControlTime<'_> {
    fn name(&self) -> &'static str {
        validation_codes::REVOCATION_ISSUED_BEFORE_CONTROL_TIME
    }

    fn description(&self) -> Cow<'static, str> {
        "Was the revocation data issued before the control time?".into()
    }

    fn level(&self) -> Option<Level> {
        self.level
    }

    fn process(&self) -> Result<bool> {
        Ok(self
            .revocation
            .this_update
            .is_some_and(|this_update| this_update < self.control_time))
    }

    fn sub_indication(&self) -> Option<SubIndication> {
        Some(SubIndication::NoPoe)
    }

    fn error_message(&self) -> Cow<'static, str> {
        format!(
            "revocation data {} was not issued before {}",
            self.revocation.id, self.control_time
        )
        .into()
    }

    fn token_id(&self) -> Option<&str> {
        Some(&self.revocation.id)
    }
}

/// The revocation issuer is trusted, or the revocation data is proven to
/// exist within the issuer's validity range.
pub struct RevocationIssuerTrustedOrPoe<'a> {
    pub(crate) revocation: &'a RevocationToken,
    pub(crate) issuer: Option<&'a CertificateToken>,
    pub(crate) poe: &'a PoeStore,
    pub(crate) level: Option<Level>,
}

impl ChainItem for RevocationIssuerTrustedOrPoe<'_> {
    fn name(&self) -> &'static str {
        validation_codes::REVOCATION_ISSUER_TRUSTED_OR_POE
    }

    fn description(&self) -> Cow<'static, str> {
        "Is the revocation issuer trusted, or the revocation data proven to exist while the issuer was valid?".into()
    }

    fn level(&self) -> Option<Level> {
        self.level
    }

    fn process(&self) -> Result<bool> {
        Ok(self.issuer.is_some_and(|issuer| {
            issuer.trusted
                || self.poe.exists_poe_in_range(
                    &self.revocation.id,
                    issuer.not_before,
                    issuer.not_after,
                )
        }))
    }

    fn sub_indication(&self) -> Option<SubIndication> {
        Some(SubIndication::RevocationOutOfBoundsNoPoe)
    }

    fn error_message(&self) -> Cow<'static, str> {
        format!(
            "no proof that revocation data {} existed while its issuer was valid",
            self.revocation.id
        )
        .into()
    }

    fn token_id(&self) -> Option<&str> {
        Some(&self.revocation.id)
    }
}
