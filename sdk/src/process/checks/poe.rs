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
    poe::PoeStore,
    policy::Level,
    process::{ChainItem, SubIndication},
    Result,
};

/// A token is proven to exist at or before a given time.
pub struct PoeExists<'a> {
    pub(crate) name: &'static str,
    pub(crate) token_id: &'a str,
    pub(crate) time: DateTime<Utc>,
    pub(crate) poe: &'a PoeStore,
    pub(crate) level: Option<Level>,
}

impl ChainItem for PoeExists<'_> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn description(&self) -> Cow<'static, str> {
        format!("Is {} proven to exist at {}?", self.token_id, self.time).into()
    }

    fn level(&self) -> Option<Level> {
        self.level
    }

    fn process(&self) -> Result<bool> {
        Ok(self.poe.exists_poe(self.token_id, self.time))
    }

    fn sub_indication(&self) -> Option<SubIndication> {
        Some(SubIndication::NoPoe)
    }

    fn error_message(&self) -> Cow<'static, str> {
        format!("no proof that {} existed at {}", self.token_id, self.time).into()
    }

    fn token_id(&self) -> Option<&str> {
        Some(self.token_id)
    }
}
