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

//! Revocation freshness checker.

use std::borrow::Cow;

use chrono::{DateTime, Duration, Utc};

use super::{ChainItem, SubIndication};
use crate::{diagnostic::RevocationToken, policy::Level, Error, Result};

/// Returns `true` if `revocation` is fresh at `reference`.
///
/// Revocation data is fresh when `thisUpdate` is no older than `max_age`
/// before `reference`. Without `max_age` the window is the revocation's own
/// `nextUpdate - thisUpdate`; revocation data without `nextUpdate` is then
/// never fresh.
///
/// # Errors
///
/// Returns [`Error::InvalidTemporalData`] when the window is needed and
/// `nextUpdate` precedes `thisUpdate`.
pub fn is_fresh(
    revocation: &RevocationToken,
    reference: DateTime<Utc>,
    max_age: Option<Duration>,
) -> Result<bool> {
    let Some(this_update) = revocation.this_update else {
        return Ok(false);
    };

    let window = match (max_age, revocation.next_update) {
        (Some(max_age), _) => max_age,
        (None, Some(next_update)) => {
            if next_update < this_update {
                return Err(Error::InvalidTemporalData {
                    token_id: revocation.id.clone(),
                    reason: format!("nextUpdate {next_update} precedes thisUpdate {this_update}"),
                });
            }
            next_update - this_update
        }
        (None, None) => return Ok(false),
    };

    Ok(match reference.checked_sub_signed(window) {
        Some(oldest) => this_update >= oldest,
        None => true,
    })
}

/// Revocation data is fresh at a reference time.
pub struct RevocationFresh<'a> {
    pub(crate) name: &'static str,
    pub(crate) revocation: &'a RevocationToken,
    pub(crate) reference: DateTime<Utc>,
    pub(crate) max_age: Option<Duration>,
    pub(crate) level: Option<Level>,
    pub(crate) sub_indication: Option<SubIndication>,
}

impl ChainItem for RevocationFresh<'_> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn description(&self) -> Cow<'static, str> {
        format!("Is revocation data {} fresh at {}?", self.revocation.id, self.reference).into()
    }

    fn level(&self) -> Option<Level> {
        self.level
    }

    fn process(&self) -> Result<bool> {
        is_fresh(self.revocation, self.reference, self.max_age)
    }

    fn sub_indication(&self) -> Option<SubIndication> {
        self.sub_indication
    }

    fn error_message(&self) -> Cow<'static, str> {
        format!(
            "revocation data {} is not fresh at {}",
            self.revocation.id, self.reference
        )
        .into()
    }

    fn token_id(&self) -> Option<&str> {
        Some(&self.revocation.id)
    }
}
