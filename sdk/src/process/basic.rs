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

//! Present-time validation: the basic building blocks run at the current
//! time.

use ltv_status_tracker::validation_codes;

use super::{
    checks::{
        CertificateNotOnHold, CertificateNotRevoked, CertificateSignatureIntact,
        CertificateValidityRange, CryptographicCheck, MessageImprintIntact, ProspectiveChain,
        SignatureIntact, SigningCertificateKnown,
    },
    context::sub_context,
    crs::{self, LongTermSelection},
    rfc::RevocationFresh,
    BlockResult, Chain, RevocationWalk, SubIndication, ValidationContext,
};
use crate::{
    diagnostic::{CertificateToken, SignedToken, TimestampToken},
    policy::{SignatureConstraints, SubContext},
    Result,
};

/// Validates a signature at the current time.
pub fn validate_signature(
    ctx: &ValidationContext<'_>,
    signature: &dyn SignedToken,
) -> Result<BlockResult> {
    validate_signed_token(
        ctx,
        "Basic signature validation",
        signature,
        &ctx.policy.signature,
        None,
    )
}

/// Validates a time-stamp at the current time.
pub fn validate_timestamp(
    ctx: &ValidationContext<'_>,
    timestamp: &TimestampToken,
) -> Result<BlockResult> {
    validate_signed_token(
        ctx,
        "Basic time-stamp validation",
        timestamp,
        &ctx.policy.timestamp,
        Some(timestamp),
    )
}

fn validate_signed_token(
    ctx: &ValidationContext<'_>,
    title: &str,
    token: &dyn SignedToken,
    constraints: &SignatureConstraints,
    timestamp: Option<&TimestampToken>,
) -> Result<BlockResult> {
    let mut chain = Chain::for_token(title, token.id());

    chain.run(&SigningCertificateKnown {
        token,
        diagnostic: ctx.diagnostic,
        level: constraints.signing_certificate_known,
    })?;
    chain.run(&SignatureIntact {
        token,
        level: constraints.signature_intact,
    })?;
    if let Some(timestamp) = timestamp {
        chain.run(&MessageImprintIntact {
            timestamp,
            level: constraints.message_imprint_intact,
        })?;
    }

    let certs = ctx.diagnostic.signing_chain(token);
    certificate_checks(ctx, &certs, &mut chain)?;

    chain.run(&CryptographicCheck {
        name: validation_codes::CRYPTOGRAPHIC_CONSTRAINTS,
        token_id: token.id(),
        params: token.crypto(),
        time: ctx.current_time,
        constraint: &ctx.policy.cryptographic,
        level: ctx.policy.cryptographic.level,
        sub_indication: SubIndication::CryptoConstraintsFailureNoPoe,
    })?;
    chain_crypto_checks(ctx, &certs, &mut chain)?;

    Ok(chain.finish())
}

/// Validates a certificate and its chain at the current time.
pub fn validate_certificate(
    ctx: &ValidationContext<'_>,
    cert: &CertificateToken,
) -> Result<BlockResult> {
    let mut chain = Chain::for_token("Basic certificate validation", &cert.id);
    let certs = ctx.diagnostic.certificate_chain(&cert.id);
    certificate_checks(ctx, &certs, &mut chain)?;
    chain_crypto_checks(ctx, &certs, &mut chain)?;
    Ok(chain.finish())
}

/// Runs the X.509 checks of a leaf-first chain into `chain`.
///
/// Trust anchors are not checked. A certificate that needs revocation data
/// goes through the long-term revocation selector, then the status checks
/// on the latest selected revocation.
fn certificate_checks(
    ctx: &ValidationContext<'_>,
    certs: &[&CertificateToken],
    chain: &mut Chain,
) -> Result<()> {
    chain.run(&ProspectiveChain {
        chain: certs,
        level: ctx.policy.certificate(SubContext::SigningCert).prospective_chain,
    })?;

    let mut walk = RevocationWalk::new();
    for (index, &cert) in certs.iter().enumerate() {
        if chain.is_halted() {
            break;
        }
        if cert.trusted {
            continue;
        }

        let context = sub_context(index);
        let constraints = ctx.policy.certificate(context);

        chain.run(&CertificateSignatureIntact {
            cert,
            level: constraints.signature_intact,
        })?;
        chain.run(&CertificateValidityRange {
            cert,
            time: ctx.current_time,
            level: constraints.validity_range,
        })?;
        if chain.is_halted() {
            break;
        }

        if !ctx.revocation_data_required(cert, context) {
            chain.info(
                validation_codes::REVOCATION_DATA_REQUIRED,
                format!("Revocation data is not required for {}", cert.id),
            );
            continue;
        }

        let selection = crs::select(ctx, cert, &LongTermSelection, &mut walk)?;
        let gate = selection.gate(cert, constraints.acceptable_revocation);
        let latest = selection.latest();
        chain.add_sub_block(selection.block);
        chain.run(&gate)?;

        let status = latest.map(|(_, status)| status);
        let revoked_sub_indication = match context {
            SubContext::SigningCert => SubIndication::RevokedNoPoe,
            SubContext::CaCert => SubIndication::RevokedCaNoPoe,
        };
        chain.run(&CertificateNotRevoked {
            cert,
            status,
            level: constraints.not_revoked,
            sub_indication: revoked_sub_indication,
        })?;
        chain.run(&CertificateNotOnHold {
            cert,
            status,
            level: constraints.not_on_hold,
        })?;

        if let (Some(freshness), Some((revocation, _))) =
            (&constraints.revocation_freshness, latest)
        {
            chain.run(&RevocationFresh {
                name: validation_codes::REVOCATION_FRESH,
                revocation,
                reference: ctx.current_time,
                max_age: freshness.max_age(),
                level: freshness.level,
                sub_indication: Some(SubIndication::TryLater),
            })?;
        }
    }

    Ok(())
}

fn chain_crypto_checks(
    ctx: &ValidationContext<'_>,
    certs: &[&CertificateToken],
    chain: &mut Chain,
) -> Result<()> {
    for cert in certs.iter().filter(|cert| !cert.trusted) {
        chain.run(&CryptographicCheck {
            name: validation_codes::CRYPTOGRAPHIC_CONSTRAINTS,
            token_id: &cert.id,
            params: &cert.crypto,
            time: ctx.current_time,
            constraint: &ctx.policy.cryptographic,
            level: ctx.policy.cryptographic.level,
            sub_indication: SubIndication::CryptoConstraintsFailureNoPoe,
        })?;
    }
    Ok(())
}
