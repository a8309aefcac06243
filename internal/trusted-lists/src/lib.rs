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

#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::unwrap_used)]
#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

pub mod cache;
pub use cache::{CacheKey, CacheRecord, CacheState, SourceKind, TrustedListsCache};

mod error;
pub use error::{Error, Result};

pub(crate) mod internal;

mod job;
pub use job::{LoadedList, LotlSource, TlSource, TlValidationJob, TrustedListLoader};

pub mod model;

mod source;
pub use source::{
    cert_fingerprint, TrustPropertiesMap, TrustedListsCertificateSource, TrustedListsSnapshot,
};

pub mod strategy;
pub use strategy::{
    AcceptAllStrategy, ExpirationAndSignatureCheckStrategy, SynchronizationStrategy,
};

mod summary;
pub use summary::{LotlInfo, TlInfo, TlValidationJobSummary};

mod synchronizer;
pub use synchronizer::{build_trust_properties, TrustedListCertificateSourceSynchronizer};

#[cfg(test)]
pub(crate) mod tests;
