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

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use crate::{
    diagnostic::{CertificateToken, DiagnosticData},
    poe::PoeStore,
    policy::{SubContext, ValidationPolicy},
};

/// Default bound on nested revocation acceptance.
pub const DEFAULT_MAX_REVOCATION_DEPTH: usize = 16;

/// Immutable inputs of one validation run, plus its proofs of existence.
#[derive(Debug)]
pub struct ValidationContext<'a> {
    /// Tokens under validation.
    pub diagnostic: &'a DiagnosticData,

    /// Policy to apply.
    pub policy: &'a ValidationPolicy,

    /// Proofs of existence gathered so far.
    pub poe: PoeStore,

    /// The current time.
    pub current_time: DateTime<Utc>,

    /// Bound on nested revocation acceptance.
    pub max_revocation_depth: usize,
}

impl<'a> ValidationContext<'a> {
    /// Creates a context at the diagnostic data's validation date, with a
    /// current-time proof of existence for every token.
    pub fn new(diagnostic: &'a DiagnosticData, policy: &'a ValidationPolicy) -> Self {
        Self {
            diagnostic,
            policy,
            poe: PoeStore::for_current_time(diagnostic),
            current_time: diagnostic.validation_date,
            max_revocation_depth: DEFAULT_MAX_REVOCATION_DEPTH,
        }
    }

    /// Sets the bound on nested revocation acceptance.
    pub fn with_max_revocation_depth(mut self, depth: usize) -> Self {
        self.max_revocation_depth = depth;
        self
    }

    /// Returns `true` if revocation data is required for `cert`.
    pub fn revocation_data_required(&self, cert: &CertificateToken, context: SubContext) -> bool {
        self.policy.revocation_data_required(cert, context)
    }
}

/// State threaded through nested revocation acceptance: the certificates
/// already visited and the current depth.
#[derive(Clone, Debug, Default)]
pub struct RevocationWalk {
    visited: BTreeSet<String>,
    depth: usize,
}

impl RevocationWalk {
    /// Starts a walk.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `cert_id` visited. Returns `false` if it already was.
    pub fn visit(&mut self, cert_id: &str) -> bool {
        self.visited.insert(cert_id.to_owned())
    }

    /// Returns `true` if `cert_id` was visited.
    pub fn is_visited(&self, cert_id: &str) -> bool {
        self.visited.contains(cert_id)
    }

    /// Current nesting depth.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub(crate) fn descend(&mut self) {
        self.depth += 1;
    }

    pub(crate) fn ascend(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}

/// Returns the sub-context of the certificate at `index` in a leaf-first
/// chain.
pub fn sub_context(index: usize) -> SubContext {
    if index == 0 {
        SubContext::SigningCert
    } else {
        SubContext::CaCert
    }
}
