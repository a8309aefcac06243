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

//! Past signature validation.

use chrono::{DateTime, Utc};
use ltv_status_tracker::validation_codes;

use super::{
    checks::{
        BestSignatureTimeBeforeExpiration, BestSignatureTimeNotBeforeIssuance, ConclusionCheck,
        CryptographicCheck, PoeExists,
    },
    crs::{self, LongTermSelection, PastSignatureSelection},
    pcv::past_certificate_validation,
    rfc::RevocationFresh,
    BlockResult, Chain, Conclusion, Indication, RevocationWalk, SubIndication,
    ValidationContext,
};
use crate::{
    diagnostic::{CertificateRevocation, CertificateToken, CryptoParams, RevocationToken, SignedToken},
    policy::{Level, SubContext},
    Result,
};

/// Outcome of past signature validation.
#[derive(Debug)]
pub struct PsvResult {
    /// Record of the process.
    pub block: BlockResult,

    /// Earliest proof of existence of the signature before the control
    /// time.
    pub best_signature_time: Option<DateTime<Utc>>,
}

/// Reconsiders the present-time verdict `current` of a signed token in the
/// light of its proofs of existence.
///
/// Some `INDETERMINATE` verdicts become `PASSED` when the token is proven
/// to exist at a time the problem did not exist yet. Any other verdict is
/// carried over unchanged.
pub fn past_signature_validation(
    ctx: &ValidationContext<'_>,
    token: &dyn SignedToken,
    current: &Conclusion,
) -> Result<PsvResult> {
    let mut chain = Chain::for_token("Past signature validation", token.id());
    let long_term = &ctx.policy.long_term;
    let certs = ctx.diagnostic.signing_chain(token);

    let Some(&signing_cert) = certs.first() else {
        chain.conclude(current.indication, current.sub_indication);
        return Ok(PsvResult {
            block: chain.finish(),
            best_signature_time: None,
        });
    };

    let mut accepted = Vec::new();
    if ctx.revocation_data_required(signing_cert, SubContext::SigningCert) {
        let mut walk = RevocationWalk::new();
        let selection = crs::select(ctx, signing_cert, &PastSignatureSelection, &mut walk)?;
        let gate = selection.gate(signing_cert, long_term.acceptable_revocation);
        chain.add_sub_block(selection.block);
        chain.run(&gate)?;
        accepted = selection.accepted;
    }

    let mut control_time = ctx.current_time;
    if !chain.is_halted() {
        let pcv = past_certificate_validation(ctx, &certs)?;
        control_time = pcv.control_time;
        let conclusion = pcv.block.conclusion.clone();
        chain.add_sub_block(pcv.block);
        chain.run(&ConclusionCheck {
            name: validation_codes::PAST_CERTIFICATE_VALIDATION,
            description: "Is past certificate validation conclusive?",
            conclusion: &conclusion,
            on_failure: (current.indication, current.sub_indication),
            level: long_term.past_certificate_validation,
            token_id: None,
        })?;
    }
    if chain.is_halted() {
        return Ok(PsvResult {
            block: chain.finish(),
            best_signature_time: None,
        });
    }
    chain.set_control_time(control_time);

    chain.run(&PoeExists {
        name: validation_codes::POE_SIGNATURE_EXISTS,
        token_id: token.id(),
        time: control_time,
        poe: &ctx.poe,
        level: long_term.signature_poe,
    })?;
    let best_signature_time = ctx.poe.lowest_poe(token.id(), control_time);

    if let (Some(best), Indication::Indeterminate) = (best_signature_time, current.indication) {
        match current.sub_indication {
            Some(
                SubIndication::RevokedNoPoe
                | SubIndication::RevokedCaNoPoe
                | SubIndication::RevocationOutOfBoundsNoPoe,
            ) => {
                chain.conclude(Indication::Passed, None);
            }
            Some(
                SubIndication::OutOfBoundsNoPoe
                | SubIndication::OutOfBoundsNotRevoked
                | SubIndication::NoCertificateChainFoundNoPoe,
            ) => {
                chain.execute(&[
                    &BestSignatureTimeNotBeforeIssuance {
                        best_signature_time: best,
                        cert: signing_cert,
                        level: long_term.best_signature_time,
                    },
                    &BestSignatureTimeBeforeExpiration {
                        best_signature_time: best,
                        cert: signing_cert,
                        sub_indication: current.sub_indication,
                        level: long_term.best_signature_time,
                    },
                ])?;
                if !chain.is_halted() {
                    chain.conclude(Indication::Passed, None);
                }
            }
            Some(SubIndication::CryptoConstraintsFailureNoPoe) => {
                crypto_at_poe(ctx, token, &certs, &accepted, control_time, &mut chain)?;
                if !chain.is_halted() {
                    chain.conclude(Indication::Passed, None);
                }
            }
            Some(SubIndication::TryLater) => {
                let freshest = accepted
                    .iter()
                    .copied()
                    .filter(|(revocation, _)| revocation.this_update.is_some_and(|t| t <= best))
                    .max_by_key(|(revocation, _)| revocation.this_update);
                if let Some((revocation, _)) = freshest {
                    let max_age = ctx
                        .policy
                        .certificate(SubContext::SigningCert)
                        .revocation_freshness
                        .as_ref()
                        .and_then(|freshness| freshness.max_age());
                    let fresh = chain.run(&RevocationFresh {
                        name: validation_codes::REVOCATION_FRESH_AT_BEST_SIGNATURE_TIME,
                        revocation,
                        reference: best,
                        max_age,
                        level: long_term.revocation_fresh_at_best_signature_time,
                        sub_indication: current.sub_indication,
                    })?;
                    if fresh.passed() {
                        chain.conclude(Indication::Passed, None);
                    }
                }
            }
            _ => (),
        }
    }

    chain.run(&ConclusionCheck::propagating(
        validation_codes::CURRENT_TIME_INDICATION,
        "Is the present-time verdict acceptable?",
        current,
        Some(Level::Fail),
    ))?;

    Ok(PsvResult {
        block: chain.finish(),
        best_signature_time,
    })
}

/// Every signing material whose algorithms are no longer acceptable must
/// have been acceptable when it was first proven to exist.
///
/// Only selected revocation data counts: `signer_revocations` for the
/// signing certificate, a long-term selection for the CA certificates.
fn crypto_at_poe<'a>(
    ctx: &ValidationContext<'a>,
    token: &dyn SignedToken,
    certs: &[&'a CertificateToken],
    signer_revocations: &[(&'a RevocationToken, &'a CertificateRevocation)],
    control_time: DateTime<Utc>,
    chain: &mut Chain,
) -> Result<()> {
    let constraint = &ctx.policy.cryptographic;

    let mut materials: Vec<(&str, &CryptoParams)> = vec![(token.id(), token.crypto())];
    for (index, &cert) in certs.iter().take_while(|cert| !cert.trusted).enumerate() {
        materials.push((cert.id.as_str(), &cert.crypto));
        if index == 0 {
            materials.extend(
                signer_revocations
                    .iter()
                    .map(|&(revocation, _)| (revocation.id.as_str(), &revocation.crypto)),
            );
        } else if ctx.revocation_data_required(cert, SubContext::CaCert) {
            let selection = crs::select(ctx, cert, &LongTermSelection, &mut RevocationWalk::new())?;
            materials.extend(
                selection
                    .accepted
                    .iter()
                    .map(|&(revocation, _)| (revocation.id.as_str(), &revocation.crypto)),
            );
            chain.add_sub_block(selection.block);
        }
    }

    for (token_id, params) in materials {
        if constraint.is_acceptable_at(params, ctx.current_time) {
            continue;
        }
        let time = ctx
            .poe
            .lowest_poe(token_id, control_time)
            .unwrap_or(ctx.current_time);
        chain.run(&CryptographicCheck {
            name: validation_codes::CRYPTOGRAPHIC_CONSTRAINTS_AT_POE,
            token_id,
            params,
            time,
            constraint,
            level: ctx.policy.long_term.cryptographic_at_poe,
            sub_indication: SubIndication::CryptoConstraintsFailureNoPoe,
        })?;
        if chain.is_halted() {
            break;
        }
    }

    Ok(())
}
