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

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::Level;
use crate::diagnostic::{CryptoParams, DigestAlgorithm, EncryptionAlgorithm};

/// Whether an algorithm is acceptable, and until when.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Acceptability {
    /// Acceptable at any time.
    Always,

    /// Acceptable at or before the given time.
    Until(DateTime<Utc>),

    /// Not acceptable.
    Never,
}

impl Acceptability {
    /// Returns `true` if the algorithm is acceptable at `time`.
    pub fn is_acceptable_at(&self, time: DateTime<Utc>) -> bool {
        match self {
            Self::Always => true,
            Self::Until(expiration) => time <= *expiration,
            Self::Never => false,
        }
    }

    /// Combines two verdicts: the result is acceptable only when both are.
    pub fn and(self, other: Self) -> Self {
        match (self, other) {
            (Self::Never, _) | (_, Self::Never) => Self::Never,
            (Self::Always, other) | (other, Self::Always) => other,
            (Self::Until(a), Self::Until(b)) => Self::Until(a.min(b)),
        }
    }
}

/// An acceptable digest algorithm.
#[cfg_attr(feature = "json_schema", derive(schemars::JsonSchema))]
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct DigestRule {
    /// The algorithm.
    pub algorithm: DigestAlgorithm,

    /// Last time at which the algorithm is acceptable. `None` means no
    /// expiration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration: Option<DateTime<Utc>>,
}

/// An acceptable signature algorithm for keys of at least `min_key_size`
/// bits.
#[cfg_attr(feature = "json_schema", derive(schemars::JsonSchema))]
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct EncryptionRule {
    /// The algorithm.
    pub algorithm: EncryptionAlgorithm,

    /// Minimal key length in bits.
    pub min_key_size: u32,

    /// Last time at which the algorithm is acceptable with this key size.
    /// `None` means no expiration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration: Option<DateTime<Utc>>,
}

/// Cryptographic suite constraint.
///
/// An algorithm that is not listed is never acceptable. An encryption
/// algorithm is judged by the listed rule with the greatest `min_key_size`
/// not above the key length.
#[cfg_attr(feature = "json_schema", derive(schemars::JsonSchema))]
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct CryptographicConstraint {
    /// Level of the check.
    pub level: Option<Level>,

    /// Acceptable digest algorithms.
    pub digest_algorithms: Vec<DigestRule>,

    /// Acceptable signature algorithms.
    pub encryption_algorithms: Vec<EncryptionRule>,
}

impl CryptographicConstraint {
    /// Returns the acceptability of a digest algorithm.
    pub fn digest_acceptability(&self, algorithm: DigestAlgorithm) -> Acceptability {
        self.digest_algorithms
            .iter()
            .find(|rule| rule.algorithm == algorithm)
            .map_or(Acceptability::Never, |rule| {
                rule.expiration
                    .map_or(Acceptability::Always, Acceptability::Until)
            })
    }

    /// Returns the acceptability of a signature algorithm used with a key
    /// of `key_length` bits.
    pub fn encryption_acceptability(
        &self,
        algorithm: EncryptionAlgorithm,
        key_length: u32,
    ) -> Acceptability {
        self.encryption_algorithms
            .iter()
            .filter(|rule| rule.algorithm == algorithm && rule.min_key_size <= key_length)
            .max_by_key(|rule| rule.min_key_size)
            .map_or(Acceptability::Never, |rule| {
                rule.expiration
                    .map_or(Acceptability::Always, Acceptability::Until)
            })
    }

    /// Returns the combined acceptability of a set of parameters.
    pub fn acceptability(&self, params: &CryptoParams) -> Acceptability {
        self.digest_acceptability(params.digest_algorithm).and(
            self.encryption_acceptability(params.encryption_algorithm, params.key_length),
        )
    }

    /// Returns `true` if `params` are acceptable at `time`.
    pub fn is_acceptable_at(&self, params: &CryptoParams, time: DateTime<Utc>) -> bool {
        self.acceptability(params).is_acceptable_at(time)
    }
}

fn utc_date(year: i32, month: u32, day: u32) -> Option<DateTime<Utc>> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).single()
}

fn digest(algorithm: DigestAlgorithm, expiration: Option<DateTime<Utc>>) -> DigestRule {
    DigestRule {
        algorithm,
        expiration,
    }
}

fn encryption(
    algorithm: EncryptionAlgorithm,
    min_key_size: u32,
    expiration: Option<DateTime<Utc>>,
) -> EncryptionRule {
    EncryptionRule {
        algorithm,
        min_key_size,
        expiration,
    }
}

impl Default for CryptographicConstraint {
    fn default() -> Self {
        use DigestAlgorithm::*;
        use EncryptionAlgorithm::*;

        Self {
            level: Some(Level::Fail),
            digest_algorithms: vec![
                digest(Md5, utc_date(2004, 8, 1)),
                digest(Sha1, utc_date(2009, 12, 31)),
                digest(Sha224, utc_date(2025, 12, 31)),
                digest(Sha256, None),
                digest(Sha384, None),
                digest(Sha512, None),
                digest(Sha3_256, None),
                digest(Sha3_384, None),
                digest(Sha3_512, None),
            ],
            encryption_algorithms: vec![
                encryption(Rsa, 1024, utc_date(2013, 12, 31)),
                encryption(Rsa, 1536, utc_date(2016, 12, 31)),
                encryption(Rsa, 1900, None),
                encryption(RsaSsaPss, 1024, utc_date(2013, 12, 31)),
                encryption(RsaSsaPss, 1536, utc_date(2016, 12, 31)),
                encryption(RsaSsaPss, 1900, None),
                encryption(Dsa, 1024, utc_date(2013, 12, 31)),
                encryption(Dsa, 2048, None),
                encryption(Ecdsa, 160, utc_date(2013, 12, 31)),
                encryption(Ecdsa, 192, utc_date(2016, 12, 31)),
                encryption(Ecdsa, 224, utc_date(2022, 12, 31)),
                encryption(Ecdsa, 256, None),
                encryption(EdDsa, 256, None),
            ],
        }
    }
}
