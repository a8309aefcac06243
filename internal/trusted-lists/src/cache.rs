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

//! Per-source cache of trusted-list processing results.

use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
    sync::{Arc, Mutex, PoisonError, RwLock},
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    model::{ParsingInfo, ValidationInfo},
    LoadedList,
};

/// Identifies one cached source. Sources are keyed by URL.
#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct CacheKey(String);

impl CacheKey {
    /// Returns the key for the given source URL.
    pub fn new<S: Into<String>>(url: S) -> Self {
        Self(url.into())
    }

    /// Returns the source URL.
    pub fn url(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Kind of trusted-list source.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// A list of trusted lists.
    ListOfTrustedLists,

    /// A trusted list, optionally referenced by a list of trusted lists.
    TrustedList {
        /// Key of the referencing list of trusted lists.
        lotl: Option<CacheKey>,
    },
}

/// Synchronization state of a cache record.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CacheState {
    /// The record holds content not yet promoted to the trust store.
    Desynchronized,

    /// The record content is reflected in the trust store.
    Synchronized,

    /// The last refresh failed.
    Error,

    /// The source is no longer configured.
    ToBeDeleted,
}

/// Cached processing result for one source.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct CacheRecord {
    /// Source key.
    pub key: CacheKey,

    /// Source kind.
    pub kind: SourceKind,

    /// Time of the last successful load.
    pub last_loading: Option<DateTime<Utc>>,

    /// Last parsing result.
    pub parsing: Option<ParsingInfo>,

    /// Last signature validation result.
    pub validation: Option<ValidationInfo>,

    /// Current state.
    pub state: CacheState,

    /// Message of the last failure, if the state is [`CacheState::Error`].
    pub error: Option<String>,
}

impl CacheRecord {
    fn new(key: CacheKey, kind: SourceKind) -> Self {
        Self {
            key,
            kind,
            last_loading: None,
            parsing: None,
            validation: None,
            state: CacheState::Desynchronized,
            error: None,
        }
    }

    /// Returns `true` if the trust store does not reflect this record.
    pub fn is_desynchronized(&self) -> bool {
        self.state != CacheState::Synchronized
    }

    fn loaded(&mut self, loaded: LoadedList, now: DateTime<Utc>) {
        let unchanged = self.state == CacheState::Synchronized
            && self.parsing.as_ref() == Some(&loaded.parsing)
            && self.validation.as_ref() == Some(&loaded.validation);

        self.last_loading = Some(now);
        self.error = None;

        if !unchanged {
            self.parsing = Some(loaded.parsing);
            self.validation = Some(loaded.validation);
            self.state = CacheState::Desynchronized;
        }
    }

    fn failed(&mut self, message: String) {
        self.error = Some(message);
        self.state = CacheState::Error;
    }
}

/// Cache of source records.
///
/// The map itself is only locked to add or remove keys; each record has
/// its own lock so that refreshing one source does not block the others.
#[derive(Debug, Default)]
pub struct TrustedListsCache {
    records: RwLock<BTreeMap<CacheKey, Arc<Mutex<CacheRecord>>>>,
}

impl TrustedListsCache {
    /// Returns an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the record for `key`, creating it when the source is first
    /// scheduled.
    pub fn entry(&self, key: &CacheKey, kind: SourceKind) -> Arc<Mutex<CacheRecord>> {
        if let Some(record) = self
            .records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
        {
            return record.clone();
        }

        self.records
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(key.clone())
            .or_insert_with(|| Arc::new(Mutex::new(CacheRecord::new(key.clone(), kind))))
            .clone()
    }

    /// Stores a successful load result for `key`.
    pub fn update_loaded(
        &self,
        key: &CacheKey,
        kind: SourceKind,
        loaded: LoadedList,
        now: DateTime<Utc>,
    ) {
        let record = self.entry(key, kind.clone());
        let mut record = record.lock().unwrap_or_else(PoisonError::into_inner);
        record.kind = kind;
        record.loaded(loaded, now);
    }

    /// Stores a failed load for `key`. Earlier results are kept.
    pub fn update_error(&self, key: &CacheKey, kind: SourceKind, message: String) {
        let record = self.entry(key, kind.clone());
        let mut record = record.lock().unwrap_or_else(PoisonError::into_inner);
        record.kind = kind;
        record.failed(message);
    }

    /// Returns a copy of the record for `key`.
    pub fn get(&self, key: &CacheKey) -> Option<CacheRecord> {
        let record = self
            .records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()?;

        let record = record.lock().unwrap_or_else(PoisonError::into_inner);
        Some(record.clone())
    }

    /// Returns the keys of all records.
    pub fn keys(&self) -> Vec<CacheKey> {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }

    /// Returns `true` if any record is not synchronized.
    pub fn is_desynchronized(&self) -> bool {
        self.for_each_record(|record| record.is_desynchronized())
            .into_iter()
            .any(|desync| desync)
    }

    /// Marks desynchronized records as synchronized. Records in error or
    /// waiting for deletion keep their state.
    pub fn mark_synchronized(&self) {
        self.for_each_record(|record| {
            if record.state == CacheState::Desynchronized {
                record.state = CacheState::Synchronized;
            }
        });
    }

    /// Marks every record whose key is not in `scheduled` for deletion.
    pub fn mark_to_be_deleted(&self, scheduled: &BTreeSet<CacheKey>) {
        self.for_each_record(|record| {
            if !scheduled.contains(&record.key) {
                record.state = CacheState::ToBeDeleted;
            }
        });
    }

    /// Removes every record waiting for deletion and returns how many were
    /// removed.
    pub fn clean(&self) -> usize {
        let mut records = self
            .records
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        let before = records.len();
        records.retain(|_, record| {
            record.lock().unwrap_or_else(PoisonError::into_inner).state
                != CacheState::ToBeDeleted
        });
        before - records.len()
    }

    fn for_each_record<T, F>(&self, mut f: F) -> Vec<T>
    where
        F: FnMut(&mut CacheRecord) -> T,
    {
        let records: Vec<Arc<Mutex<CacheRecord>>> = self
            .records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect();

        records
            .iter()
            .map(|record| f(&mut *record.lock().unwrap_or_else(PoisonError::into_inner)))
            .collect()
    }
}
