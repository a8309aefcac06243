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

//! Strategies deciding which sources may feed the trust store.

use chrono::{DateTime, Utc};

use crate::{internal::time::utc_now, LotlInfo, TlInfo};

/// Decides whether the content of a trusted list or list of trusted lists
/// may be promoted into the trust store.
pub trait SynchronizationStrategy: Send + Sync {
    /// Returns `true` if the trusted list may be synchronized.
    fn can_be_synchronized_tl(&self, tl: &TlInfo) -> bool;

    /// Returns `true` if the list of trusted lists may be synchronized.
    fn can_be_synchronized_lotl(&self, lotl: &LotlInfo) -> bool;
}

/// Synchronizes every source, whatever its state.
#[derive(Clone, Copy, Debug, Default)]
pub struct AcceptAllStrategy;

impl SynchronizationStrategy for AcceptAllStrategy {
    fn can_be_synchronized_tl(&self, _tl: &TlInfo) -> bool {
        true
    }

    fn can_be_synchronized_lotl(&self, _lotl: &LotlInfo) -> bool {
        true
    }
}

/// Rejects expired sources and sources whose signature is not valid,
/// unless configured to accept them.
#[derive(Clone, Debug, Default)]
pub struct ExpirationAndSignatureCheckStrategy {
    accept_expired_trusted_list: bool,
    accept_invalid_trusted_list: bool,
    reference_time: Option<DateTime<Utc>>,
}

impl ExpirationAndSignatureCheckStrategy {
    /// Returns a strategy that rejects both expired and invalid sources.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts sources whose next update is in the past.
    pub fn accept_expired_trusted_list(mut self, accept: bool) -> Self {
        self.accept_expired_trusted_list = accept;
        self
    }

    /// Accepts sources whose signature is not valid.
    pub fn accept_invalid_trusted_list(mut self, accept: bool) -> Self {
        self.accept_invalid_trusted_list = accept;
        self
    }

    /// Evaluates expiration against `time` instead of the current time.
    pub fn with_reference_time(mut self, time: DateTime<Utc>) -> Self {
        self.reference_time = Some(time);
        self
    }

    fn accepts(&self, info: &TlInfo) -> bool {
        if !self.accept_expired_trusted_list && self.is_expired(info) {
            return false;
        }

        if !self.accept_invalid_trusted_list && !is_valid(info) {
            return false;
        }

        true
    }

    fn is_expired(&self, info: &TlInfo) -> bool {
        let now = self.reference_time.unwrap_or_else(utc_now);
        info.parsing
            .as_ref()
            .and_then(|parsing| parsing.next_update)
            .is_some_and(|next_update| next_update < now)
    }
}

fn is_valid(info: &TlInfo) -> bool {
    info.validation
        .as_ref()
        .is_some_and(|validation| validation.is_valid())
}

impl SynchronizationStrategy for ExpirationAndSignatureCheckStrategy {
    fn can_be_synchronized_tl(&self, tl: &TlInfo) -> bool {
        self.accepts(tl)
    }

    fn can_be_synchronized_lotl(&self, lotl: &LotlInfo) -> bool {
        self.accepts(&lotl.info)
    }
}
