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

use crate::{
    diagnostic::CertificateToken,
    policy::Level,
    process::{ChainItem, Conclusion, Indication, SubIndication},
    Result,
};

/// Passes when a nested block concluded `PASSED`. On failure it sets the
/// verdict it was given, typically the nested block's own.
pub struct ConclusionCheck<'a> {
    pub(crate) name: &'static str,
    pub(crate) description: &'static str,
    pub(crate) conclusion: &'a Conclusion,
    pub(crate) on_failure: (Indication, Option<SubIndication>),
    pub(crate) level: Option<Level>,
    pub(crate) token_id: Option<&'a str>,
}

impl<'a> ConclusionCheck<'a> {
    /// A check that propagates the nested block's verdict.
    pub(crate) fn propagating(
        name: &'static str,
        description: &'static str,
        conclusion: &'a Conclusion,
        level: Option<Level>,
    ) -> Self {
        Self {
            name,
            description,
            conclusion,
            on_failure: (conclusion.indication, conclusion.sub_indication),
            level,
            token_id: None,
        }
    }
}

impl ChainItem for ConclusionCheck<'_> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn description(&self) -> Cow<'static, str> {
        self.description.into()
    }

    fn level(&self) -> Option<Level> {
        self.level
    }

    fn process(&self) -> Result<bool> {
        Ok(self.conclusion.is_passed())
    }

    fn indication(&self) -> Indication {
        self.on_failure.0
    }

    fn sub_indication(&self) -> Option<SubIndication> {
        self.on_failure.1
    }

    fn error_message(&self) -> Cow<'static, str> {
        match &self.conclusion.error {
            Some(error) => error.clone().into(),
            None => format!("the result is {}", self.conclusion).into(),
        }
    }

    fn token_id(&self) -> Option<&str> {
        self.token_id
    }
}

/// The best signature time is not before the signing certificate's
/// `notBefore`.
pub struct BestSignatureTimeNotBeforeIssuance<'a> {
    pub(crate) best_signature_time: DateTime<Utc>,
    pub(crate) cert: &'a CertificateToken,
    pub(crate) level: Option<Level>,
}

impl ChainItem for BestSignatureTimeNotBeforeIssuance<'_> {
    fn name(&self) -> &'static str {
        ltv_status_tracker::validation_codes::BEST_SIGNATURE_TIME_NOT_BEFORE_ISSUANCE
    }

    fn description(&self) -> Cow<'static, str> {
        "Is the best signature time not before the issuance of the signing certificate?".into()
    }

    fn level(&self) -> Option<Level> {
        self.level
    }

    fn process(&self) -> Result<bool> {
        Ok(self.best_signature_time >= self.cert.not_before)
    }

    fn sub_indication(&self) -> Option<SubIndication> {
        Some(SubIndication::NotYetValid)
    }

    fn error_message(&self) -> Cow<'static, str> {
        format!(
            "best signature time {} precedes certificate {} (not before {})",
            self.best_signature_time, self.cert.id, self.cert.not_before
        )
        .into()
    }
}

/// The best signature time is before the signing certificate's
/// `notAfter`.
pub struct BestSignatureTimeBeforeExpiration<'a> {
    pub(crate) best_signature_time: DateTime<Utc>,
    pub(crate) cert: &'a CertificateToken,
    pub(crate) sub_indication: Option<SubIndication>,
    pub(crate) level: Option<Level>,
}

impl ChainItem for BestSignatureTimeBeforeExpiration<'_> {
    fn name(&self) -> &'static str {
        ltv_status_tracker::validation_codes::BEST_SIGNATURE_TIME_BEFORE_EXPIRATION
    }

    fn description(&self) -> Cow<'static, str> {
        "Is the best signature time before the expiration of the signing certificate?".into()
    }

    fn level(&self) -> Option<Level> {
        self.level
    }

    fn process(&self) -> Result<bool> {
        Ok(self.best_signature_time < self.cert.not_after)
    }

    fn sub_indication(&self) -> Option<SubIndication> {
        self.sub_indication
    }

    fn error_message(&self) -> Cow<'static, str> {
        format!(
            "best signature time {} is not before the expiration of certificate {} ({})",
            self.best_signature_time, self.cert.id, self.cert.not_after
        )
        .into()
    }
}
