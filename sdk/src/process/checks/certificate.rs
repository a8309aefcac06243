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
    diagnostic::{CertificateRevocation, CertificateToken},
    policy::Level,
    process::{ChainItem, SubIndication},
    Result,
};

/// A chain from the certificate up to a trust anchor can be built.
pub struct ProspectiveChain<'a> {
    pub(crate) chain: &'a [&'a CertificateToken],
    pub(crate) level: Option<Level>,
}

impl ChainItem for ProspectiveChain<'_> {
    fn name(&self) -> &'static str {
        validation_codes::PROSPECTIVE_CHAIN
    }

    fn description(&self) -> Cow<'static, str> {
        "Can a certificate chain up to a trust anchor be built?".into()
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
        match self.chain.first() {
            Some(cert) => format!("no trust anchor found for {}", cert.id).into(),
            None => "the certificate chain is empty".into(),
        }
    }
}

/// The signature of a certificate is intact.
pub struct CertificateSignatureIntact<'a> {
    pub(crate) cert: &'a CertificateToken,
    pub(crate) level: Option<Level>,
}

impl ChainItem for CertificateSignatureIntact<'_> {
    fn name(&self) -> &'static str {
        validation_codes::CERTIFICATE_SIGNATURE_INTACT
    }

    fn description(&self) -> Cow<'static, str> {
        "Is the certificate signature intact?".into()
    }

    fn level(&self) -> Option<Level> {
        self.level
    }

    fn process(&self) -> Result<bool> {
        Ok(self.cert.signature_intact)
    }

    fn sub_indication(&self) -> Option<SubIndication> {
        Some(SubIndication::CertificateChainGeneralFailure)
    }

    fn error_message(&self) -> Cow<'static, str> {
        format!("the signature of certificate {} is not intact", self.cert.id).into()
    }

    fn token_id(&self) -> Option<&str> {
        Some(&self.cert.id)
    }
}

/// The validation time is within the certificate's validity range.
pub struct CertificateValidityRange<'a> {
    pub(crate) cert: &'a CertificateToken,
    pub(crate) time: DateTime<Utc>,
    pub(crate) level: Option<Level>,
}

impl ChainItem for CertificateValidityRange<'_> {
    fn name(&self) -> &'static str {
        validation_codes::CERTIFICATE_VALIDITY_RANGE
    }

    fn description(&self) -> Cow<'static, str> {
        "Is the certificate valid at validation time?".into()
    }

    fn level(&self) -> Option<Level> {
        self.level
    }

    fn process(&self) -> Result<bool> {
        Ok(self.cert.is_valid_at(self.time))
    }

    fn sub_indication(&self) -> Option<SubIndication> {
        Some(SubIndication::OutOfBoundsNoPoe)
    }

    fn error_message(&self) -> Cow<'static, str> {
        format!(
            "certificate {} is not valid at {} (valid from {} to {})",
            self.cert.id, self.time, self.cert.not_before, self.cert.not_after
        )
        .into()
    }

    fn token_id(&self) -> Option<&str> {
        Some(&self.cert.id)
    }
}

/// The validity ranges of the non-anchor certificates of a chain
/// intersect.
pub struct ValidityIntersection<'a> {
    pub(crate) chain: &'a [&'a CertificateToken],
    pub(crate) level: Option<Level>,
}

impl ChainItem for ValidityIntersection<'_> {
    fn name(&self) -> &'static str {
        validation_codes::CERTIFICATE_VALIDITY_INTERSECTION
    }

    fn description(&self) -> Cow<'static, str> {
        "Do the validity ranges of the certificate chain intersect?".into()
    }

    fn level(&self) -> Option<Level> {
        self.level
    }

    fn process(&self) -> Result<bool> {
        let mut certs = self.chain.iter().filter(|cert| !cert.trusted);
        let Some(first) = certs.next() else {
            return Ok(true);
        };
        let (start, end) = certs.fold((first.not_before, first.not_after), |(s, e), c| {
            (s.max(c.not_before), e.min(c.not_after))
        });
        Ok(start <= end)
    }

    fn sub_indication(&self) -> Option<SubIndication> {
        Some(SubIndication::NoCertificateChainFound)
    }

    fn error_message(&self) -> Cow<'static, str> {
        "the validity ranges of the certificate chain do not intersect".into()
    }
}

/// Acceptable revocation data was selected for a certificate.
pub struct AcceptableRevocationAvailable<'a> {
    pub(crate) cert: &'a CertificateToken,
    pub(crate) selected: usize,
    pub(crate) level: Option<Level>,
    pub(crate) sub_indication: SubIndication,
}

impl ChainItem for AcceptableRevocationAvailable<'_> {
    fn name(&self) -> &'static str {
        validation_codes::ACCEPTABLE_REVOCATION_AVAILABLE
    }

    fn description(&self) -> Cow<'static, str> {
        "Is acceptable revocation data available?".into()
    }

    fn level(&self) -> Option<Level> {
        self.level
    }

    fn process(&self) -> Result<bool> {
        Ok(self.selected > 0)
    }

    fn sub_indication(&self) -> Option<SubIndication> {
        Some(self.sub_indication)
    }

    fn error_message(&self) -> Cow<'static, str> {
        format!("no acceptable revocation data for certificate {}", self.cert.id).into()
    }

    fn token_id(&self) -> Option<&str> {
        Some(&self.cert.id)
    }
}

/// The selected revocation data does not report the certificate as
/// revoked.
pub struct CertificateNotRevoked<'a> {
    pub(crate) cert: &'a CertificateToken,
    pub(crate) status: Option<&'a CertificateRevocation>,
    pub(crate) level: Option<Level>,
    pub(crate) sub_indication: SubIndication,
}

impl ChainItem for CertificateNotRevoked<'_> {
    fn name(&self) -> &'static str {
        validation_codes::CERTIFICATE_NOT_REVOKED
    }

    fn description(&self) -> Cow<'static, str> {
        "Is the certificate not revoked?".into()
    }

    fn level(&self) -> Option<Level> {
        self.level
    }

    fn process(&self) -> Result<bool> {
        Ok(!self.status.is_some_and(CertificateRevocation::is_revoked))
    }

    fn sub_indication(&self) -> Option<SubIndication> {
        Some(self.sub_indication)
    }

    fn error_message(&self) -> Cow<'static, str> {
        match self.status.and_then(|s| s.revocation_date) {
            Some(date) => format!("certificate {} is revoked since {date}", self.cert.id).into(),
            None => format!("certificate {} is revoked", self.cert.id).into(),
        }
    }

    fn token_id(&self) -> Option<&str> {
        Some(&self.cert.id)
    }
}

/// The selected revocation data does not report the certificate as on
/// hold.
pub struct CertificateNotOnHold<'a> {
    pub(crate) cert: &'a CertificateToken,
    pub(crate) status: Option<&'a CertificateRevocation>,
    pub(crate) level: Option<Level>,
}

impl ChainItem for CertificateNotOnHold<'_> {
    fn name(&self) -> &'static str {
        validation_codes::CERTIFICATE_NOT_ON_HOLD
    }

    fn description(&self) -> Cow<'static, str> {
        "Is the certificate not on hold?".into()
    }

    fn level(&self) -> Option<Level> {
        self.level
    }

    fn process(&self) -> Result<bool> {
        Ok(!self.status.is_some_and(CertificateRevocation::is_on_hold))
    }

    fn sub_indication(&self) -> Option<SubIndication> {
        Some(SubIndication::TryLater)
    }

    fn error_message(&self) -> Cow<'static, str> {
        format!("certificate {} is on hold", self.cert.id).into()
    }

    fn token_id(&self) -> Option<&str> {
        Some(&self.cert.id)
    }
}
