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
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

pub mod diagnostic;

mod error;
pub use error::{Error, Result};

pub mod poe;

pub mod policy;

pub mod process;
pub use process::{BlockResult, Conclusion, Indication, SubIndication};

pub mod settings;

pub use ltv_status_tracker as status_tracker;
pub use ltv_trusted_lists as trusted_lists;

mod validator;
pub use validator::{SignatureReport, SignatureValidator, TimestampReport};

#[cfg(test)]
pub(crate) mod tests;
