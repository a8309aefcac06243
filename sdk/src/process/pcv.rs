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

//! Past certificate validation.

use chrono::{DateTime, Utc};
use ltv_status_tracker::validation_codes;

use super::{
    checks::{CertificateSignatureIntact, ConclusionCheck, ProspectiveChain, ValidityIntersection},
    context::sub_context,
    vts::validation_time_sliding,
    BlockResult, Chain, ValidationContext,
};
use crate::{
    diagnostic::CertificateToken,
    policy::{Level, SubContext},
    Result,
};

/// Outcome of past certificate validation.
#[derive(Debug)]
pub struct PcvResult {
    /// Record of the process.
    pub block: BlockResult,

    /// The control time computed by validation time sliding, or the
    /// current time when the chain was rejected before.
    pub control_time: DateTime<Utc>,
}

/// Re-checks a leaf-first chain without reference to the current time and
/// computes its control time.
pub fn past_certificate_validation(
    ctx: &ValidationContext<'_>,
    certs: &[&CertificateToken],
) -> Result<PcvResult> {
    let mut chain = match certs.first() {
        Some(leaf) => Chain::for_token("Past certificate validation", &leaf.id),
        None => Chain::new("Past certificate validation"),
    };
    let signing = ctx.policy.certificate(SubContext::SigningCert);

    chain.run(&ProspectiveChain {
        chain: certs,
        level: signing.prospective_chain,
    })?;
    for (index, &cert) in certs.iter().enumerate() {
        if cert.trusted {
            break;
        }
        chain.run(&CertificateSignatureIntact {
            cert,
            level: ctx.policy.certificate(sub_context(index)).signature_intact,
        })?;
    }
    chain.run(&ValidityIntersection {
        chain: certs,
        level: signing.validity_intersection,
    })?;

    let mut control_time = ctx.current_time;
    if !chain.is_halted() {
        let vts = validation_time_sliding(ctx, certs)?;
        control_time = vts.control_time;
        let conclusion = vts.block.conclusion.clone();
        chain.add_sub_block(vts.block);
        chain.run(&ConclusionCheck::propagating(
            validation_codes::VALIDATION_TIME_SLIDING,
            "Is validation time sliding conclusive?",
            &conclusion,
            Some(Level::Fail),
        ))?;
    }

    chain.set_control_time(control_time);
    Ok(PcvResult {
        block: chain.finish(),
        control_time,
    })
}
