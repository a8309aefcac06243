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

/// `Error` enumerates errors returned by most ltv functions.
///
/// Validation verdicts are never errors: a check that fails produces an
/// [`Indication`](crate::Indication) in the verdict tree. These errors mean
/// that a validation run could not be carried out at all.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The requested token is not part of the diagnostic data.
    #[error("unknown token: {0}")]
    UnknownToken(String),

    /// A token carries temporal data a check cannot evaluate.
    #[error("invalid temporal data on token {token_id}: {reason}")]
    InvalidTemporalData {
        /// Identifier of the offending token.
        token_id: String,

        /// Human readable reason.
        reason: String,
    },

    /// The settings format is not one of `json` or `toml`.
    #[error("type is unsupported")]
    UnsupportedType,

    /// A parameter or a setting is invalid.
    #[error("bad parameter: {0}")]
    BadParam(String),

    /// A trust anchor could not be decoded.
    #[error("invalid certificate: {0}")]
    InvalidCertificate(String),

    /// Error from the trusted-list synchronization.
    #[error(transparent)]
    TrustedList(#[from] ltv_trusted_lists::Error),
}

/// A specialized `Result` type for ltv operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Self::BadParam(err.to_string())
    }
}
