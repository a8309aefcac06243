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

use std::{borrow::Cow, fmt};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    diagnostic::{DiagnosticData, TimestampToken},
    process::{
        basic,
        pcv::{self, PcvResult},
        psv::{self, PsvResult},
        rac,
        vts::{self, VtsResult},
        BlockResult, Conclusion, RevocationWalk, ValidationContext,
    },
    settings::Settings,
    Error, Result,
};

/// Outcome of the validation of one time-stamp.
#[derive(Debug, Serialize)]
pub struct TimestampReport {
    /// Identifier of the time-stamp.
    pub timestamp_id: String,

    /// Present-time validation.
    pub basic: BlockResult,

    /// Past signature validation, when it ran.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub past_signature: Option<BlockResult>,

    /// Final verdict on the time-stamp.
    pub conclusion: Conclusion,
}

/// Outcome of the validation of one signature.
#[derive(Debug, Serialize)]
pub struct SignatureReport {
    /// Identifier of the signature.
    pub signature_id: String,

    /// Present-time validation.
    pub basic: BlockResult,

    /// Time-stamps considered, latest first.
    pub timestamps: Vec<TimestampReport>,

    /// Past signature validation, when it ran.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub past_signature: Option<BlockResult>,

    /// Final verdict on the signature.
    pub conclusion: Conclusion,

    /// Earliest proven existence of the signature.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_signature_time: Option<DateTime<Utc>>,
}

impl fmt::Display for SignatureReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string_pretty(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

/// Runs the validation processes over a [`DiagnosticData`].
///
/// Trust anchors from the settings are applied to a private copy of the
/// diagnostic data. Every call works on a fresh proof-of-existence store,
/// so calls do not influence each other.
pub struct SignatureValidator<'a> {
    diagnostic: Cow<'a, DiagnosticData>,
    settings: &'a Settings,
}

impl<'a> SignatureValidator<'a> {
    /// Creates a validator.
    ///
    /// Fails if the configured trust anchors cannot be parsed.
    pub fn new(diagnostic: &'a DiagnosticData, settings: &'a Settings) -> Result<Self> {
        let anchors = settings.trust.anchor_fingerprints()?;
        let diagnostic = if anchors.is_empty() {
            Cow::Borrowed(diagnostic)
        } else {
            let mut owned = diagnostic.clone();
            let marked = owned.apply_trust_anchors(&anchors);
            log::debug!("{marked} certificates marked trusted from configured anchors");
            Cow::Owned(owned)
        };
        Ok(Self {
            diagnostic,
            settings,
        })
    }

    /// The diagnostic data the processes run on.
    pub fn diagnostic(&self) -> &DiagnosticData {
        &self.diagnostic
    }

    fn context(&self) -> ValidationContext<'_> {
        ValidationContext::new(&self.diagnostic, &self.settings.policy)
            .with_max_revocation_depth(self.settings.validation.max_revocation_depth)
    }

    /// Validates signature `signature_id` with its time-stamps.
    ///
    /// Time-stamps are validated latest first. Each one that validates
    /// proves the existence of what it covers at its production time,
    /// which past signature validation of the earlier time-stamps and of
    /// the signature can rely on.
    pub fn validate_signature(&self, signature_id: &str) -> Result<SignatureReport> {
        let signature = self
            .diagnostic
            .signature(signature_id)
            .ok_or_else(|| Error::UnknownToken(signature_id.to_owned()))?;
        let mut ctx = self.context();
        let validation = &self.settings.validation;

        let basic = basic::validate_signature(&ctx, signature)?;

        let mut timestamps: Vec<&TimestampToken> = signature
            .timestamps
            .iter()
            .filter_map(|id| self.diagnostic.timestamp(id))
            .chain(self.diagnostic.timestamps_for(signature_id))
            .collect();
        timestamps.sort_by(|a, b| {
            b.production_time
                .cmp(&a.production_time)
                .then_with(|| a.id.cmp(&b.id))
        });
        timestamps.dedup_by(|a, b| a.id == b.id);

        let mut timestamp_reports = Vec::with_capacity(timestamps.len());
        for timestamp in timestamps {
            let report = self.timestamp_report(&ctx, timestamp)?;
            if report.conclusion.is_passed() && validation.extract_poe_from_timestamps {
                ctx.poe.add_timestamp(timestamp);
            }
            timestamp_reports.push(report);
        }

        let (past_signature, conclusion, best_signature_time) =
            if basic.conclusion.is_passed() || !validation.past_signature_validation {
                let best = ctx.poe.lowest_poe(signature_id, ctx.current_time);
                (None, basic.conclusion.clone(), best)
            } else {
                let PsvResult {
                    block,
                    best_signature_time,
                } = psv::past_signature_validation(&ctx, signature, &basic.conclusion)?;
                let conclusion = block.conclusion.clone();
                let best = best_signature_time
                    .or_else(|| ctx.poe.lowest_poe(signature_id, ctx.current_time));
                (Some(block), conclusion, best)
            };

        log::debug!("signature {signature_id}: {conclusion}");

        Ok(SignatureReport {
            signature_id: signature_id.to_owned(),
            basic,
            timestamps: timestamp_reports,
            past_signature,
            conclusion,
            best_signature_time,
        })
    }

    fn timestamp_report(
        &self,
        ctx: &ValidationContext<'_>,
        timestamp: &TimestampToken,
    ) -> Result<TimestampReport> {
        let basic = basic::validate_timestamp(ctx, timestamp)?;
        let (past_signature, conclusion) = if basic.conclusion.is_passed()
            || !self.settings.validation.past_signature_validation
        {
            (None, basic.conclusion.clone())
        } else {
            let psv = psv::past_signature_validation(ctx, timestamp, &basic.conclusion)?;
            let conclusion = psv.block.conclusion.clone();
            (Some(psv.block), conclusion)
        };
        Ok(TimestampReport {
            timestamp_id: timestamp.id.clone(),
            basic,
            past_signature,
            conclusion,
        })
    }

    /// Validates time-stamp `timestamp_id` on its own, including past
    /// signature validation when enabled.
    pub fn validate_timestamp(&self, timestamp_id: &str) -> Result<TimestampReport> {
        let timestamp = self
            .diagnostic
            .timestamp(timestamp_id)
            .ok_or_else(|| Error::UnknownToken(timestamp_id.to_owned()))?;
        self.timestamp_report(&self.context(), timestamp)
    }

    /// Validates certificate `cert_id` and its chain at the current time.
    pub fn validate_certificate(&self, cert_id: &str) -> Result<BlockResult> {
        let cert = self
            .diagnostic
            .certificate(cert_id)
            .ok_or_else(|| Error::UnknownToken(cert_id.to_owned()))?;
        basic::validate_certificate(&self.context(), cert)
    }

    /// Checks whether revocation token `revocation_id` is acceptable
    /// evidence about certificate `cert_id`.
    pub fn validate_revocation(&self, cert_id: &str, revocation_id: &str) -> Result<BlockResult> {
        let cert = self
            .diagnostic
            .certificate(cert_id)
            .ok_or_else(|| Error::UnknownToken(cert_id.to_owned()))?;
        let status = cert
            .revocation(revocation_id)
            .ok_or_else(|| Error::UnknownToken(revocation_id.to_owned()))?;
        let ctx = self.context();
        let mut walk = RevocationWalk::new();
        walk.visit(&cert.id);
        rac::check_revocation_acceptance(&ctx, cert, status, &mut walk)
    }

    /// Runs validation time sliding over the chain of `cert_id`.
    pub fn validation_time_sliding(&self, cert_id: &str) -> Result<VtsResult> {
        self.diagnostic
            .certificate(cert_id)
            .ok_or_else(|| Error::UnknownToken(cert_id.to_owned()))?;
        let certs = self.diagnostic.certificate_chain(cert_id);
        vts::validation_time_sliding(&self.context(), &certs)
    }

    /// Runs past certificate validation over the chain of `cert_id`.
    pub fn past_certificate_validation(&self, cert_id: &str) -> Result<PcvResult> {
        self.diagnostic
            .certificate(cert_id)
            .ok_or_else(|| Error::UnknownToken(cert_id.to_owned()))?;
        let certs = self.diagnostic.certificate_chain(cert_id);
        pcv::past_certificate_validation(&self.context(), &certs)
    }
}
