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

use serde::{Deserialize, Serialize};

/// Digest algorithms a token may be signed with.
#[cfg_attr(feature = "json_schema", derive(schemars::JsonSchema))]
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[allow(missing_docs)]
pub enum DigestAlgorithm {
    Md5,
    Sha1,
    Sha224,
    Sha256,
    Sha384,
    Sha512,
    #[serde(rename = "SHA3_256")]
    Sha3_256,
    #[serde(rename = "SHA3_384")]
    Sha3_384,
    #[serde(rename = "SHA3_512")]
    Sha3_512,
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Md5 => "MD5",
            Self::Sha1 => "SHA1",
            Self::Sha224 => "SHA224",
            Self::Sha256 => "SHA256",
            Self::Sha384 => "SHA384",
            Self::Sha512 => "SHA512",
            Self::Sha3_256 => "SHA3-256",
            Self::Sha3_384 => "SHA3-384",
            Self::Sha3_512 => "SHA3-512",
        };
        f.write_str(name)
    }
}

/// Signature (encryption) algorithms a token may be signed with.
#[cfg_attr(feature = "json_schema", derive(schemars::JsonSchema))]
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[allow(missing_docs)]
pub enum EncryptionAlgorithm {
    Rsa,
    RsaSsaPss,
    Dsa,
    Ecdsa,
    EdDsa,
}

impl fmt::Display for EncryptionAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Rsa => "RSA",
            Self::RsaSsaPss => "RSASSA-PSS",
            Self::Dsa => "DSA",
            Self::Ecdsa => "ECDSA",
            Self::EdDsa => "EdDSA",
        };
        f.write_str(name)
    }
}

/// Cryptographic parameters used when a token was signed.
#[cfg_attr(feature = "json_schema", derive(schemars::JsonSchema))]
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct CryptoParams {
    /// Digest algorithm.
    pub digest_algorithm: DigestAlgorithm,

    /// Signature algorithm.
    pub encryption_algorithm: EncryptionAlgorithm,

    /// Length of the signing key in bits.
    pub key_length: u32,
}

impl CryptoParams {
    /// Creates a new set of parameters.
    pub fn new(
        digest_algorithm: DigestAlgorithm,
        encryption_algorithm: EncryptionAlgorithm,
        key_length: u32,
    ) -> Self {
        Self {
            digest_algorithm,
            encryption_algorithm,
            key_length,
        }
    }
}

impl Default for CryptoParams {
    fn default() -> Self {
        Self::new(DigestAlgorithm::Sha256, EncryptionAlgorithm::Rsa, 2048)
    }
}

impl fmt::Display for CryptoParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} with {} ({} bits)",
            self.digest_algorithm, self.encryption_algorithm, self.key_length
        )
    }
}
