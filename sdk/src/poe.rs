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

//! Proofs of existence.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::diagnostic::{DiagnosticData, TimestampToken};

/// Where a proof of existence comes from.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PoeSource {
    /// The token was observed at validation time.
    CurrentTime,

    /// A validated time-stamp covers the token.
    Timestamp(String),
}

/// Proof that a token existed at `time`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Poe {
    /// Time of existence.
    pub time: DateTime<Utc>,

    /// Provenance of the proof.
    pub source: PoeSource,
}

/// Append-only multimap of token identifier to proofs of existence.
///
/// Entries are never removed, so [`exists_poe`](Self::exists_poe) is
/// monotone in time for the lifetime of a store.
#[derive(Clone, Debug, Default, Serialize)]
pub struct PoeStore {
    entries: BTreeMap<String, Vec<Poe>>,
}

impl PoeStore {
    /// Returns an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a store holding a current-time proof for every token of
    /// `diagnostic`.
    pub fn for_current_time(diagnostic: &DiagnosticData) -> Self {
        let mut store = Self::new();
        for id in diagnostic.token_ids() {
            store.add(id, diagnostic.validation_date, PoeSource::CurrentTime);
        }
        store
    }

    /// Records a proof of existence.
    pub fn add(&mut self, token_id: &str, time: DateTime<Utc>, source: PoeSource) {
        let poes = self.entries.entry(token_id.to_owned()).or_default();
        let poe = Poe { time, source };
        if !poes.contains(&poe) {
            poes.push(poe);
        }
    }

    /// Records a proof at `timestamp`'s production time for every token it
    /// covers.
    pub fn add_timestamp(&mut self, timestamp: &TimestampToken) {
        for object in &timestamp.timestamped_objects {
            log::debug!(
                "POE for {object} at {} from time-stamp {}",
                timestamp.production_time,
                timestamp.id
            );
            self.add(
                object,
                timestamp.production_time,
                PoeSource::Timestamp(timestamp.id.clone()),
            );
        }
    }

    /// Returns every proof recorded for `token_id`.
    pub fn poes(&self, token_id: &str) -> &[Poe] {
        self.entries
            .get(token_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Returns `true` if `token_id` is proven to exist at or before `time`.
    pub fn exists_poe(&self, token_id: &str, time: DateTime<Utc>) -> bool {
        self.poes(token_id).iter().any(|p| p.time <= time)
    }

    /// Returns the earliest proof for `token_id` at or before `time`.
    pub fn lowest_poe_entry(&self, token_id: &str, time: DateTime<Utc>) -> Option<&Poe> {
        self.poes(token_id)
            .iter()
            .filter(|p| p.time <= time)
            .min_by_key(|p| p.time)
    }

    /// Returns the earliest proven time for `token_id` at or before `time`.
    pub fn lowest_poe(&self, token_id: &str, time: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.lowest_poe_entry(token_id, time).map(|p| p.time)
    }

    /// Returns `true` if `token_id` is proven to exist at some time in
    /// `[from, to]`.
    pub fn exists_poe_in_range(
        &self,
        token_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> bool {
        self.poes(token_id)
            .iter()
            .any(|p| from <= p.time && p.time <= to)
    }
}
