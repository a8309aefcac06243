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

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    model::{ParsingInfo, ValidationInfo},
    CacheRecord, CacheState,
};

/// Snapshot of the processing state of one trusted-list source.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TlInfo {
    /// Source URL.
    pub url: String,

    /// Time of the last successful load.
    pub last_loading: Option<DateTime<Utc>>,

    /// Parsing result.
    pub parsing: Option<ParsingInfo>,

    /// Signature validation result.
    pub validation: Option<ValidationInfo>,

    /// Cache state when the snapshot was taken.
    pub state: CacheState,

    /// Last failure message.
    pub error: Option<String>,
}

impl TlInfo {
    /// Returns `true` if the last refresh of this source failed.
    pub fn has_error(&self) -> bool {
        self.state == CacheState::Error
    }
}

impl From<&CacheRecord> for TlInfo {
    fn from(record: &CacheRecord) -> Self {
        Self {
            url: record.key.url().to_owned(),
            last_loading: record.last_loading,
            parsing: record.parsing.clone(),
            validation: record.validation.clone(),
            state: record.state,
            error: record.error.clone(),
        }
    }
}

/// Snapshot of a list of trusted lists and the trusted lists it references.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LotlInfo {
    /// State of the list of trusted lists itself.
    pub info: TlInfo,

    /// States of the referenced trusted lists.
    pub tl_infos: Vec<TlInfo>,
}

/// Immutable summary published at the end of each job run.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct TlValidationJobSummary {
    /// Lists of trusted lists, in configuration order.
    pub lotl_infos: Vec<LotlInfo>,

    /// Trusted lists configured on their own, in configuration order.
    pub other_tl_infos: Vec<TlInfo>,
}

impl TlValidationJobSummary {
    /// Returns the number of trusted lists, including those referenced by a
    /// list of trusted lists.
    pub fn number_of_processed_tls(&self) -> usize {
        self.other_tl_infos.len()
            + self
                .lotl_infos
                .iter()
                .map(|lotl| lotl.tl_infos.len())
                .sum::<usize>()
    }

    /// Returns the number of lists of trusted lists.
    pub fn number_of_processed_lotls(&self) -> usize {
        self.lotl_infos.len()
    }

    /// Iterates over every trusted-list snapshot, LOTL-referenced ones first.
    pub fn all_tl_infos(&self) -> impl Iterator<Item = &TlInfo> {
        self.lotl_infos
            .iter()
            .flat_map(|lotl| lotl.tl_infos.iter())
            .chain(self.other_tl_infos.iter())
    }
}
