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

use std::fmt;

use chrono::{DateTime, Utc};
use ltv_status_tracker::StatusTracker;
use serde::Serialize;

/// Main verdict of a validation block.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Indication {
    /// Every check with a `FAIL` level passed.
    #[default]
    Passed,

    /// Available information is insufficient to conclude.
    Indeterminate,

    /// The validation failed.
    Failed,
}

impl Indication {
    /// Returns the ETSI name of the indication.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Passed => "PASSED",
            Self::Indeterminate => "INDETERMINATE",
            Self::Failed => "FAILED",
        }
    }
}

impl fmt::Display for Indication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

macro_rules! sub_indications {
    ($($(#[$meta:meta])* $variant:ident => $name:literal,)*) => {
        /// Reason attached to an `INDETERMINATE` or `FAILED` indication.
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
        #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
        pub enum SubIndication {
            $($(#[$meta])* $variant,)*
        }

        impl SubIndication {
            /// Returns the ETSI name of the sub-indication.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)*
                }
            }
        }
    };
}

sub_indications! {
    /// The signature value could not be verified.
    SigCryptoFailure => "SIG_CRYPTO_FAILURE",
    /// The hash of the signed data does not match.
    HashFailure => "HASH_FAILURE",
    /// The signing certificate cannot be identified.
    NoSigningCertificateFound => "NO_SIGNING_CERTIFICATE_FOUND",
    /// No chain to a trust anchor can be built.
    NoCertificateChainFound => "NO_CERTIFICATE_CHAIN_FOUND",
    /// No chain to a trust anchor can be built, and no POE is available.
    NoCertificateChainFoundNoPoe => "NO_CERTIFICATE_CHAIN_FOUND_NO_POE",
    /// The chain could not be validated for an unspecified reason.
    CertificateChainGeneralFailure => "CERTIFICATE_CHAIN_GENERAL_FAILURE",
    /// The signing certificate is revoked and no POE shows the signature
    /// existed before the revocation.
    RevokedNoPoe => "REVOKED_NO_POE",
    /// A CA certificate is revoked and no POE shows the signature existed
    /// before the revocation.
    RevokedCaNoPoe => "REVOKED_CA_NO_POE",
    /// Revocation data is not available before the control time.
    RevocationOutOfBoundsNoPoe => "REVOCATION_OUT_OF_BOUNDS_NO_POE",
    /// The signing certificate is expired or not yet valid, and no POE is
    /// available.
    OutOfBoundsNoPoe => "OUT_OF_BOUNDS_NO_POE",
    /// The signing certificate is expired and was not revoked.
    OutOfBoundsNotRevoked => "OUT_OF_BOUNDS_NOT_REVOKED",
    /// An algorithm is no longer acceptable and no POE is available.
    CryptoConstraintsFailureNoPoe => "CRYPTO_CONSTRAINTS_FAILURE_NO_POE",
    /// Proof of existence is missing.
    NoPoe => "NO_POE",
    /// Fresh revocation data may be available later.
    TryLater => "TRY_LATER",
    /// The best signature time precedes the signing certificate.
    NotYetValid => "NOT_YET_VALID",
}

impl fmt::Display for SubIndication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Verdict of a validation block.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct Conclusion {
    /// Main verdict.
    pub indication: Indication,

    /// Reason, for non-passed verdicts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_indication: Option<SubIndication>,

    /// Message of the check that set the verdict.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Messages of checks that did not pass at `WARN` level.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,

    /// Messages of checks that did not pass at `INFORM` level.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub infos: Vec<String>,
}

impl Conclusion {
    /// Returns a `PASSED` conclusion.
    pub fn passed() -> Self {
        Self::default()
    }

    /// Returns a conclusion with the given verdict.
    pub fn new(indication: Indication, sub_indication: Option<SubIndication>) -> Self {
        Self {
            indication,
            sub_indication,
            ..Default::default()
        }
    }

    /// Returns `true` for a `PASSED` conclusion.
    pub fn is_passed(&self) -> bool {
        self.indication == Indication::Passed
    }

    /// Returns `true` if the verdict equals `indication` / `sub_indication`.
    pub fn is(&self, indication: Indication, sub_indication: Option<SubIndication>) -> bool {
        self.indication == indication && self.sub_indication == sub_indication
    }
}

impl fmt::Display for Conclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.sub_indication {
            Some(sub) => write!(f, "{}/{}", self.indication, sub),
            None => write!(f, "{}", self.indication),
        }
    }
}

/// Result of one validation block: its conclusion, the record of every
/// check it evaluated and the blocks it ran.
#[derive(Clone, Debug, Default, Serialize)]
pub struct BlockResult {
    /// Name of the block.
    pub title: String,

    /// Identifier of the token the block validated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_id: Option<String>,

    /// Verdict of the block.
    pub conclusion: Conclusion,

    /// Evaluated checks, in order.
    pub checks: StatusTracker,

    /// Nested blocks.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sub_blocks: Vec<BlockResult>,

    /// Control time computed by the block, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub control_time: Option<DateTime<Utc>>,
}

impl BlockResult {
    /// Returns an empty block.
    pub fn new(title: impl Into<String>, token_id: Option<String>) -> Self {
        Self {
            title: title.into(),
            token_id,
            ..Default::default()
        }
    }

    /// Returns the first nested block with this title, searched depth
    /// first.
    pub fn find_block(&self, title: &str) -> Option<&BlockResult> {
        self.sub_blocks.iter().find_map(|b| {
            if b.title == title {
                Some(b)
            } else {
                b.find_block(title)
            }
        })
    }

    /// Returns the labels of the evaluated checks, in order.
    pub fn check_labels(&self) -> Vec<&str> {
        self.checks
            .logged_items()
            .iter()
            .map(|item| item.label.as_ref())
            .collect()
    }
}
