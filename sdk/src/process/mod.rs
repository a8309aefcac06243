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

//! Validation processes.
//!
//! Every process is a [`Chain`] of checks producing a [`BlockResult`]:
//!
//! * [`basic`]: present-time validation of signatures, time-stamps and
//!   certificates,
//! * [`rac`] and [`crs`]: revocation acceptance and selection,
//! * [`rfc`]: revocation freshness,
//! * [`vts`]: validation time sliding,
//! * [`pcv`] and [`psv`]: past certificate and past signature validation.

pub mod basic;

mod chain;
pub use chain::{Chain, ChainItem, CheckOutcome};

pub mod checks;

mod conclusion;
pub use conclusion::{BlockResult, Conclusion, Indication, SubIndication};

mod context;
pub use context::{sub_context, RevocationWalk, ValidationContext, DEFAULT_MAX_REVOCATION_DEPTH};

pub mod crs;
pub mod pcv;
pub mod psv;
pub mod rac;
pub mod rfc;
pub mod vts;
