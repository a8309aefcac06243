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

use thiserror::Error;

/// Errors raised while configuring or running trusted-list synchronization.
///
/// Problems with a single source are recorded in the cache and never
/// returned from a job run; only configuration problems are.
#[derive(Debug, Eq, Error, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// The same URL is configured more than once.
    #[error("duplicate trusted list source: {0}")]
    DuplicateSource(String),

    /// A loader was unable to download, parse or validate a source.
    #[error("unable to load trusted list '{url}': {message}")]
    Loader {
        /// URL of the source.
        url: String,

        /// Description of the failure.
        message: String,
    },
}

/// A specialized `Result` type for trusted-list operations.
pub type Result<T> = std::result::Result<T, Error>;
