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

use std::borrow::Cow;

use chrono::{DateTime, Utc};

use crate::{
    diagnostic::CryptoParams,
    policy::{CryptographicConstraint, Level},
    process::{ChainItem, SubIndication},
    Result,
};

/// The algorithms used to sign a token are acceptable at a given time.
pub struct CryptographicCheck<'a> {
    pub(crate) name: &'static str,
    pub(crate) token_id: &'a str,
    pub(crate) params: &'a CryptoParams,
    pub(crate) time: DateTime<Utc>,
    pub(crate) constraint: &'a CryptographicConstraint,
    pub(crate) level: Option<Level>,
    pub(crate) sub_indication: SubIndication,
}

impl ChainItem for CryptographicCheck<'_> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn description(&self) -> Cow<'static, str> {
        format!("Are {} acceptable at {}?", self.params, self.time).into()
    }

    fn level(&self) -> Option<Level> {
        self.level
    }

    fn process(&self) -> Result<bool> {
        Ok(self.constraint.is_acceptable_at(self.params, self.time))
    }

    fn sub_indication(&self) -> Option<SubIndication> {
        Some(self.sub_indication)
    }

    fn error_message(&self) -> Cow<'static, str> {
        format!(
            "{} used by {} is not acceptable at {}",
            self.params, self.token_id, self.time
        )
        .into()
    }

    fn token_id(&self) -> Option<&str> {
        Some(self.token_id)
    }
}
