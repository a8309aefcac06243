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

use ltv_status_tracker::validation_codes;

use crate::{
    diagnostic::{DiagnosticData, SignedToken, TimestampToken},
    policy::Level,
    process::{ChainItem, Indication, SubIndication},
    Result,
};

/// The certificate that signed a token is identified.
pub struct SigningCertificateKnown<'a> {
    pub(crate) token: &'a dyn SignedToken,
    pub(crate) diagnostic: &'a DiagnosticData,
    pub(crate) level: Option<Level>,
}

impl ChainItem for SigningCertificateKnown<'_> {
    fn name(&self) -> &'static str {
        validation_codes::SIGNING_CERTIFICATE_KNOWN
    }

    fn description(&self) -> Cow<'static, str> {
        "Is the signing certificate identified?".into()
    }

    fn level(&self) -> Option<Level> {
        self.level
    }

    fn process(&self) -> Result<bool> {
        Ok(self
            .token
            .signing_certificate()
            .is_some_and(|id| self.diagnostic.certificate(id).is_some()))
    }

    fn sub_indication(&self) -> Option<SubIndication> {
        Some(SubIndication::NoSigningCertificateFound)
    }

    fn error_message(&self) -> Cow<'static, str> {
        format!("the signing certificate of {} is unknown", self.token.id()).into()
    }
}

/// The signature value of a token is intact.
pub struct SignatureIntact<'a> {
    pub(crate) token: &'a dyn SignedToken,
    pub(crate) level: Option<Level>,
}

impl ChainItem for SignatureIntact<'_> {
    fn name(&self) -> &'static str {
        validation_codes::SIGNATURE_INTACT
    }

    fn description(&self) -> Cow<'static, str> {
        "Is the signature intact?".into()
    }

    fn level(&self) -> Option<Level> {
        self.level
    }

    fn process(&self) -> Result<bool> {
        Ok(self.token.signature_intact())
    }

    fn indication(&self) -> Indication {
        Indication::Failed
    }

    fn sub_indication(&self) -> Option<SubIndication> {
        Some(SubIndication::SigCryptoFailure)
    }

    fn error_message(&self) -> Cow<'static, str> {
        format!("the signature of {} is not intact", self.token.id()).into()
    }
}

/// The message imprint of a time-stamp matches the time-stamped data.
pub struct MessageImprintIntact<'a> {
    pub(crate) timestamp: &'a TimestampToken,
    pub(crate) level: Option<Level>,
}

impl ChainItem for MessageImprintIntact<'_> {
    fn name(&self) -> &'static str {
        validation_codes::MESSAGE_IMPRINT_INTACT
    }

    fn description(&self) -> Cow<'static, str> {
        "Is the message imprint of the time-stamp intact?".into()
    }

    fn level(&self) -> Option<Level> {
        self.level
    }

    fn process(&self) -> Result<bool> {
        Ok(self.timestamp.message_imprint_intact)
    }

    fn indication(&self) -> Indication {
        Indication::Failed
    }

    fn sub_indication(&self) -> Option<SubIndication> {
        Some(SubIndication::HashFailure)
    }

    fn error_message(&self) -> Cow<'static, str> {
        format!("the message imprint of {} does not match", self.timestamp.id).into()
    }
}
