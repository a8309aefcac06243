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

//! Certificate revocation selector.

use chrono::{DateTime, Utc};
use ltv_status_tracker::validation_codes;

use super::{
    checks::{
        AcceptableRevocationAvailable, ConclusionCheck, RevocationConsistent,
        RevocationIssuedBeforeControlTime, RevocationIssuerTrustedOrPoe,
    },
    rac::check_revocation_acceptance,
    BlockResult, Chain, RevocationWalk, SubIndication, ValidationContext,
};
use crate::{
    diagnostic::{CertificateRevocation, CertificateToken, RevocationToken},
    policy::Level,
    Result,
};

/// Acceptability rule of a revocation selector, applied to each candidate
/// after revocation acceptance and the consistency check.
pub trait RevocationSelectionPolicy {
    /// Title of the selection block.
    fn title(&self) -> &'static str;

    /// Sub-indication of the "acceptable revocation available" gate.
    fn gate_sub_indication(&self) -> SubIndication;

    /// Runs the selector-specific checks on one candidate.
    fn check_candidate(
        &self,
        _ctx: &ValidationContext<'_>,
        _revocation: &RevocationToken,
        _issuer: Option<&CertificateToken>,
        _chain: &mut Chain,
    ) -> Result<()> {
        Ok(())
    }
}

/// Long-term validation selector: any accepted, consistent revocation.
pub struct LongTermSelection;

impl RevocationSelectionPolicy for LongTermSelection {
    fn title(&self) -> &'static str {
        "Revocation selection"
    }

    fn gate_sub_indication(&self) -> SubIndication {
        SubIndication::TryLater
    }
}

/// Validation time sliding selector: the revocation data must have been
/// issued before the control time.
pub struct TimeSlidingSelection {
    /// The current control time.
    pub control_time: DateTime<Utc>,
}

impl RevocationSelectionPolicy for TimeSlidingSelection {
    fn title(&self) -> &'static str {
        "Revocation selection before control time"
    }

    fn gate_sub_indication(&self) -> SubIndication {
        SubIndication::NoPoe
    }

    fn check_candidate(
        &self,
        ctx: &ValidationContext<'_>,
        revocation: &RevocationToken,
        _issuer: Option<&CertificateToken>,
        chain: &mut Chain,
    ) -> Result<()> {
        chain.run(&RevocationIssuedBeforeControlTime {
            revocation,
            control_time: self.control_time,
            level: ctx.policy.revocation.issued_before_control_time,
        })?;
        Ok(())
    }
}

/// Past signature validation selector: the revocation issuer must be
/// trusted, or the revocation data proven to exist while the issuer was
/// valid.
pub struct PastSignatureSelection;

impl RevocationSelectionPolicy for PastSignatureSelection {
    fn title(&self) -> &'static str {
        "Past signature revocation selection"
    }

    fn gate_sub_indication(&self) -> SubIndication {
        SubIndication::RevocationOutOfBoundsNoPoe
    }

    fn check_candidate(
        &self,
        ctx: &ValidationContext<'_>,
        revocation: &RevocationToken,
        issuer: Option<&CertificateToken>,
        chain: &mut Chain,
    ) -> Result<()> {
        chain.run(&RevocationIssuerTrustedOrPoe {
            revocation,
            issuer,
            poe: &ctx.poe,
            level: ctx.policy.revocation.issuer_trusted_or_poe,
        })?;
        Ok(())
    }
}

/// Outcome of a revocation selection.
#[derive(Debug)]
pub struct RevocationSelection<'a> {
    /// Record of the selection, with one nested block per candidate.
    pub block: BlockResult,

    /// Accepted candidates with the certificate's status in each.
    pub accepted: Vec<(&'a RevocationToken, &'a CertificateRevocation)>,

    gate_sub_indication: SubIndication,
}

impl<'a> RevocationSelection<'a> {
    /// Returns the accepted candidate with the latest `thisUpdate`.
    pub fn latest(&self) -> Option<(&'a RevocationToken, &'a CertificateRevocation)> {
        self.accepted
            .iter()
            .copied()
            .max_by_key(|(revocation, _)| (revocation.this_update, revocation.production_date))
    }

    /// Returns the "acceptable revocation available" check for `cert`.
    pub fn gate<'c>(
        &self,
        cert: &'c CertificateToken,
        level: Option<Level>,
    ) -> AcceptableRevocationAvailable<'c> {
        AcceptableRevocationAvailable {
            cert,
            selected: self.accepted.len(),
            level,
            sub_indication: self.gate_sub_indication,
        }
    }
}

/// Selects the acceptable revocation data of `cert`.
///
/// Each candidate goes through revocation acceptance, then the
/// consistency check, then the selector's own rule. The outcome of every
/// candidate is recorded at `WARN` level; callers turn
/// [`RevocationSelection::gate`] into a `FAIL` level check.
pub fn select<'a>(
    ctx: &ValidationContext<'a>,
    cert: &'a CertificateToken,
    selector: &dyn RevocationSelectionPolicy,
    walk: &mut RevocationWalk,
) -> Result<RevocationSelection<'a>> {
    walk.visit(&cert.id);

    let diagnostic = ctx.diagnostic;

    let mut chain = Chain::for_token(selector.title(), &cert.id);
    let mut accepted = Vec::new();

    for status in &cert.revocations {
        let mut candidate = Chain::for_token("Revocation candidate", &status.revocation_id);
        let rac = check_revocation_acceptance(ctx, cert, status, walk)?;
        let rac_conclusion = rac.conclusion.clone();
        candidate.add_sub_block(rac);
        candidate.run(&ConclusionCheck::propagating(
            validation_codes::REVOCATION_ACCEPTABLE,
            "Is the revocation data acceptable?",
            &rac_conclusion,
            Some(Level::Fail),
        ))?;

        let revocation = diagnostic.revocation(&status.revocation_id);
        if let Some(revocation) = revocation {
            let revocation_issuer = revocation
                .signing_certificate
                .as_deref()
                .and_then(|id| diagnostic.certificate(id));
            candidate.run(&RevocationConsistent {
                revocation,
                cert,
                status,
                issuer_expired_certs_info: revocation_issuer
                    .and_then(CertificateToken::expired_certs_revocation_info),
                level: ctx.policy.revocation.consistent,
            })?;
            if !candidate.is_halted() {
                selector.check_candidate(ctx, revocation, revocation_issuer, &mut candidate)?;
            }
        }

        let candidate = candidate.finish();
        let candidate_conclusion = candidate.conclusion.clone();
        chain.add_sub_block(candidate);
        chain.run(&ConclusionCheck {
            name: validation_codes::REVOCATION_ACCEPTABLE,
            description: "Is the revocation data selected?",
            conclusion: &candidate_conclusion,
            on_failure: (
                candidate_conclusion.indication,
                candidate_conclusion.sub_indication,
            ),
            level: Some(Level::Warn),
            token_id: Some(status.revocation_id.as_str()),
        })?;

        if let (true, Some(revocation)) = (candidate_conclusion.is_passed(), revocation) {
            accepted.push((revocation, status));
        }
    }

    log::debug!(
        "{} of {} revocation candidates selected for {}",
        accepted.len(),
        cert.revocations.len(),
        cert.id
    );

    Ok(RevocationSelection {
        block: chain.finish(),
        accepted,
        gate_sub_indication: selector.gate_sub_indication(),
    })
}
