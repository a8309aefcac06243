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

use serde::Serialize;

use crate::{LogItem, LogKind};

/// A `StatusTracker` collects the [`LogItem`]s produced while a validation
/// chain runs and controls what happens when a check fails.
#[derive(Clone, Debug, Default, Serialize)]
pub struct StatusTracker {
    #[serde(skip)]
    error_behavior: ErrorBehavior,
    logged_items: Vec<LogItem>,
    #[serde(skip)]
    token_ids: Vec<String>,
}

impl StatusTracker {
    /// Returns a [`StatusTracker`] with the specified [`ErrorBehavior`].
    pub fn with_error_behavior(error_behavior: ErrorBehavior) -> Self {
        Self {
            error_behavior,
            logged_items: vec![],
            token_ids: vec![],
        }
    }

    /// Returns the current list of log items.
    pub fn logged_items(&self) -> &[LogItem] {
        &self.logged_items
    }

    /// Returns a list of log items that can be mutated if needed.
    pub fn logged_items_mut(&mut self) -> &mut [LogItem] {
        &mut self.logged_items
    }

    /// Appends the contents of another [`StatusTracker`] to this list of
    /// log items.
    pub fn append(&mut self, other: &StatusTracker) {
        for log_item in other.logged_items() {
            self.add_non_error(log_item.clone());
        }
    }

    /// Adds a non-error [`LogItem`] to this status tracker.
    ///
    /// Primarily intended for use by [`LogItem::success()`],
    /// [`LogItem::warning()`] or [`LogItem::informational()`].
    pub fn add_non_error(&mut self, mut log_item: LogItem) {
        if log_item.token_id.is_none() {
            if let Some(token_id) = self.token_ids.last() {
                log_item.token_id = Some(token_id.to_string().into());
            }
        }
        self.logged_items.push(log_item);
    }

    /// Adds an error-case [`LogItem`] to this status tracker.
    ///
    /// Will return `Err(err)` if configured to stop immediately on errors or
    /// `Ok(())` if configured to continue on errors. _(See [`ErrorBehavior`].)_
    ///
    /// Primarily intended for use by [`LogItem::failure()`].
    pub fn add_error<E>(&mut self, log_item: LogItem, err: E) -> Result<(), E> {
        self.add_non_error(log_item);

        match self.error_behavior {
            ErrorBehavior::StopOnFirstError => Err(err),
            ErrorBehavior::ContinueWhenPossible => Ok(()),
        }
    }

    /// Returns the [`LogItem`]s recorded as failures.
    pub fn filter_errors(&self) -> impl Iterator<Item = &LogItem> {
        self.logged_items()
            .iter()
            .filter(|item| item.kind == LogKind::Failure)
    }

    /// Returns the [`LogItem`]s of the given kind.
    pub fn filter_kind(&self, kind: LogKind) -> impl Iterator<Item = &LogItem> {
        self.logged_items()
            .iter()
            .filter(move |item| item.kind == kind)
    }

    /// Returns `true` if a check with this label was recorded.
    pub fn has_check(&self, label: &str) -> bool {
        self.logged_items().iter().any(|item| item.label == label)
    }

    /// Returns the kind recorded for the first check with this label.
    pub fn check_kind(&self, label: &str) -> Option<LogKind> {
        self.logged_items()
            .iter()
            .find(|item| item.label == label)
            .map(|item| item.kind)
    }

    /// Returns `true` if the log contains a specific sub-indication code.
    pub fn has_status(&self, val: &str) -> bool {
        self.logged_items().iter().any(|vi| {
            if let Some(vs) = &vi.validation_status {
                vs == val
            } else {
                false
            }
        })
    }

    /// Returns `true` if the log contains any failure.
    pub fn has_any_error(&self) -> bool {
        self.filter_errors().next().is_some()
    }

    /// Keeps track of the token currently being validated.
    ///
    /// The current token id is added to any log items that are created
    /// without one.
    pub fn push_token_id<S: Into<String>>(&mut self, token_id: S) {
        self.token_ids.push(token_id.into());
    }

    /// Removes the current token id, if any.
    pub fn pop_token_id(&mut self) -> Option<String> {
        self.token_ids.pop()
    }
}

/// `ErrorBehavior` configures the behavior of [`StatusTracker`] when its
/// [`add_error`] function is called.
///
/// [`add_error`]: StatusTracker::add_error
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ErrorBehavior {
    /// If an error is encountered, stop validation immediately.
    StopOnFirstError,

    /// If an error is encountered, log it and continue validation as much as
    /// possible.
    #[default]
    ContinueWhenPossible,
}
