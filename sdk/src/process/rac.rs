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

//! Revocation acceptance checker.

use super::{
    checks::{
        OcspCertHashMatch, OcspIssuerValidAtProduction, OcspNotSelfIssued, OcspResponderIdMatch,
        RevocationAfterCertificateIssuance, RevocationConcernsCertificate, RevocationIssuerChain,
        RevocationIssuerKnown, RevocationIssuerRevocationAcceptable, RevocationKnown,
        RevocationSignatureIntact, ThisUpdatePresent,
    },
    context::sub_context,
    crs::{self, LongTermSelection},
    BlockResult, Chain, Indication, RevocationWalk, SubIndication, ValidationContext,
};
use crate::{
    diagnostic::{CertificateRevocation, CertificateToken},
    Result,
};

/// Decides whether one revocation token is usable evidence for `cert`.
///
/// Once the revocation token itself is accepted, every certificate of its
/// issuer chain that needs revocation data must in turn have acceptable
/// revocation data. `walk` carries the certificates already handled so
/// that cross-certified chains terminate.
pub fn check_revocation_acceptance(
    ctx: &ValidationContext<'_>,
    cert: &CertificateToken,
    status: &CertificateRevocation,
    walk: &mut RevocationWalk,
) -> Result<BlockResult> {
    let constraints = &ctx.policy.revocation;
    let mut chain = Chain::for_token("Revocation acceptance", &status.revocation_id);

    let revocation = ctx.diagnostic.revocation(&status.revocation_id);
    chain.run(&RevocationKnown {
        revocation_id: &status.revocation_id,
        revocation,
        level: constraints.known,
    })?;
    let Some(revocation) = revocation else {
        if !chain.is_halted() {
            chain.conclude(Indication::Indeterminate, Some(SubIndication::TryLater));
        }
        return Ok(chain.finish());
    };

    let issuer = revocation
        .signing_certificate
        .as_deref()
        .and_then(|id| ctx.diagnostic.certificate(id));
    chain.run(&RevocationIssuerKnown {
        revocation,
        issuer,
        level: constraints.issuer_known,
    })?;
    let Some(issuer) = issuer else {
        if !chain.is_halted() {
            chain.conclude(
                Indication::Indeterminate,
                Some(SubIndication::NoSigningCertificateFound),
            );
        }
        return Ok(chain.finish());
    };

    let issuer_chain = ctx.diagnostic.certificate_chain(&issuer.id);
    chain.execute(&[
        &RevocationIssuerChain {
            revocation,
            chain: &issuer_chain,
            level: constraints.issuer_chain,
        },
        &RevocationSignatureIntact {
            revocation,
            level: constraints.signature_intact,
        },
        &ThisUpdatePresent {
            revocation,
            level: constraints.this_update_present,
        },
    ])?;

    if revocation.is_ocsp() {
        chain.run(&OcspIssuerValidAtProduction {
            revocation,
            issuer,
            level: constraints.ocsp_issuer_valid_at_production,
        })?;
        chain.run(&OcspResponderIdMatch {
            revocation,
            issuer,
            level: constraints.ocsp_responder_id_match,
        })?;
        if status.cert_hash_present {
            chain.run(&OcspCertHashMatch {
                revocation,
                status,
                level: constraints.ocsp_cert_hash_match,
            })?;
        }
        chain.run(&OcspNotSelfIssued {
            revocation,
            cert,
            level: constraints.ocsp_not_self_issued,
        })?;
    }

    chain.execute(&[
        &RevocationAfterCertificateIssuance {
            revocation,
            cert,
            level: constraints.after_certificate_issuance,
        },
        &RevocationConcernsCertificate {
            revocation,
            status,
            level: constraints.concerns_certificate,
        },
    ])?;

    if chain.is_halted() || constraints.issuer_revocation_acceptable.is_none() {
        return Ok(chain.finish());
    }

    let acceptable = issuer_chain_revocation_acceptable(ctx, &issuer_chain, walk, &mut chain)?;
    chain.run(&RevocationIssuerRevocationAcceptable {
        revocation,
        acceptable,
        level: constraints.issuer_revocation_acceptable,
    })?;

    Ok(chain.finish())
}

fn issuer_chain_revocation_acceptable(
    ctx: &ValidationContext<'_>,
    issuer_chain: &[&CertificateToken],
    walk: &mut RevocationWalk,
    chain: &mut Chain,
) -> Result<bool> {
    if walk.depth() >= ctx.max_revocation_depth {
        log::debug!(
            "revocation acceptance nested deeper than {}, giving up",
            ctx.max_revocation_depth
        );
        return Ok(false);
    }

    walk.descend();
    let mut acceptable = true;
    for (index, issuer) in issuer_chain.iter().enumerate() {
        if issuer.trusted || issuer.is_self_signed() {
            break;
        }
        if walk.is_visited(&issuer.id)
            || !ctx.revocation_data_required(issuer, sub_context(index))
        {
            continue;
        }

        let selection = crs::select(ctx, issuer, &LongTermSelection, walk)?;
        let found = !selection.accepted.is_empty();
        chain.add_sub_block(selection.block);
        if !found {
            acceptable = false;
            break;
        }
    }
    walk.ascend();

    Ok(acceptable)
}
