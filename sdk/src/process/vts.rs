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

//! Validation time sliding.

use chrono::{DateTime, Utc};
use ltv_status_tracker::validation_codes;

use super::{
    checks::{CryptographicCheck, PoeExists},
    context::sub_context,
    crs::{self, TimeSlidingSelection},
    rfc::RevocationFresh,
    BlockResult, Chain, Indication, RevocationWalk, SubIndication, ValidationContext,
};
use crate::{
    diagnostic::{CertificateRevocation, CertificateToken, RevocationReason},
    policy::{Acceptability, Level, SubContext, ValidationModel},
    Result,
};

/// Outcome of validation time sliding.
#[derive(Debug)]
pub struct VtsResult {
    /// Record of the process.
    pub block: BlockResult,

    /// The control time reached.
    pub control_time: DateTime<Utc>,
}

/// Walks a leaf-first certificate chain from the trust anchor down to the
/// leaf and returns the latest time at which the revocation status of
/// every certificate is known.
///
/// The control time starts at the current time and never increases.
pub fn validation_time_sliding(
    ctx: &ValidationContext<'_>,
    certs: &[&CertificateToken],
) -> Result<VtsResult> {
    let mut chain = match certs.first() {
        Some(leaf) => Chain::for_token("Validation time sliding", &leaf.id),
        None => Chain::new("Validation time sliding"),
    };
    let mut control_time = ctx.current_time;
    let long_term = &ctx.policy.long_term;
    let crypto = &ctx.policy.cryptographic;

    let end = certs
        .iter()
        .position(|cert| cert.trusted)
        .map_or(certs.len(), |anchor| anchor + 1);
    let mut walk = RevocationWalk::new();

    for (index, &cert) in certs[..end].iter().enumerate().rev() {
        if cert.trusted {
            continue;
        }

        let context = sub_context(index);
        if !ctx.revocation_data_required(cert, context) {
            chain.info(
                validation_codes::REVOCATION_DATA_REQUIRED,
                format!("Revocation data is not required for {}", cert.id),
            );
            continue;
        }

        let selector = TimeSlidingSelection { control_time };
        let selection = crs::select(ctx, cert, &selector, &mut walk)?;
        let gate = selection.gate(cert, long_term.acceptable_revocation);
        let latest = selection.latest();
        chain.add_sub_block(selection.block);
        chain.run(&gate)?;
        if chain.is_halted() {
            break;
        }
        let Some((revocation, status)) = latest else {
            chain.conclude(Indication::Indeterminate, Some(SubIndication::NoPoe));
            break;
        };

        chain.execute(&[
            &PoeExists {
                name: validation_codes::POE_CERTIFICATE_EXISTS,
                token_id: &cert.id,
                time: control_time,
                poe: &ctx.poe,
                level: long_term.poe_exists,
            },
            &PoeExists {
                name: validation_codes::POE_REVOCATION_EXISTS,
                token_id: &revocation.id,
                time: control_time,
                poe: &ctx.poe,
                level: long_term.poe_exists,
            },
        ])?;
        if chain.is_halted() {
            break;
        }

        if status.is_revoked() {
            let revocation_date = status
                .revocation_date
                .filter(|_| slides_on_revocation(ctx.policy.model, context, status));
            if let Some(date) = revocation_date {
                control_time = slide(&mut chain, control_time, date, &cert.id, "revocation date");
            }
        } else {
            let max_age = ctx
                .policy
                .certificate(context)
                .revocation_freshness
                .as_ref()
                .and_then(|freshness| freshness.max_age());
            let fresh = chain.run(&RevocationFresh {
                name: validation_codes::REVOCATION_FRESH,
                revocation,
                reference: control_time,
                max_age,
                level: Some(Level::Inform),
                sub_indication: None,
            })?;
            if !fresh.passed() {
                control_time = slide(
                    &mut chain,
                    control_time,
                    revocation.production_date,
                    &revocation.id,
                    "revocation production date",
                );
            }
        }

        let materials = [
            (cert.id.as_str(), &cert.crypto),
            (revocation.id.as_str(), &revocation.crypto),
        ];
        let crypto_evaluated = matches!(
            crypto.level,
            Some(Level::Fail | Level::Warn | Level::Inform)
        );
        for (token_id, params) in materials {
            if let (true, Acceptability::Until(expiration)) =
                (crypto_evaluated, crypto.acceptability(params))
            {
                control_time = slide(
                    &mut chain,
                    control_time,
                    expiration,
                    token_id,
                    "algorithm expiration",
                );
            }
            chain.run(&CryptographicCheck {
                name: validation_codes::CRYPTOGRAPHIC_CONSTRAINTS,
                token_id,
                params,
                time: control_time,
                constraint: crypto,
                level: crypto.level,
                sub_indication: SubIndication::CryptoConstraintsFailureNoPoe,
            })?;
        }
        if chain.is_halted() {
            break;
        }
    }

    chain.set_control_time(control_time);
    Ok(VtsResult {
        block: chain.finish(),
        control_time,
    })
}

/// In the chain model, only a revocation for key compromise or without a
/// stated reason invalidates what the certificate signed before. The hybrid
/// model applies chain rules to the signing certificate only.
fn slides_on_revocation(
    model: ValidationModel,
    context: SubContext,
    status: &CertificateRevocation,
) -> bool {
    let chain_rules = match model {
        ValidationModel::Shell => false,
        ValidationModel::Chain => true,
        ValidationModel::Hybrid => context == SubContext::SigningCert,
    };
    !chain_rules
        || matches!(
            status.reason,
            None | Some(RevocationReason::KeyCompromise) | Some(RevocationReason::Unspecified)
        )
}

fn slide(
    chain: &mut Chain,
    control_time: DateTime<Utc>,
    candidate: DateTime<Utc>,
    token_id: &str,
    cause: &str,
) -> DateTime<Utc> {
    if candidate >= control_time {
        return control_time;
    }
    log::debug!("control time slid from {control_time} to {candidate} ({cause} of {token_id})");
    chain.info(
        validation_codes::CONTROL_TIME_SLID,
        format!("Control time set to the {cause} of {token_id}: {candidate}"),
    );
    candidate
}
