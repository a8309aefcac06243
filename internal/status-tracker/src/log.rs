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

use serde::Serialize;

use crate::StatusTracker;

/// Detailed information about one evaluated check or other noteworthy
/// condition.
///
/// Use the [`log_item`](crate::log_item) macro to create a `LogItem`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct LogItem {
    /// Outcome of the check.
    pub kind: LogKind,

    /// Name of the check (typically one of the
    /// [`validation_codes`](crate::validation_codes)).
    pub label: Cow<'static, str>,

    /// Human-readable description of what was checked.
    pub description: Cow<'static, str>,

    /// Source file where the item was generated.
    pub file: Cow<'static, str>,

    /// Function where the item was generated.
    pub function: Cow<'static, str>,

    /// Source line number where the item was generated.
    pub line: u32,

    /// Error or warning message, if the check did not pass.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub err_val: Option<Cow<'static, str>>,

    /// Sub-indication code attached to a failed check.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_status: Option<Cow<'static, str>>,

    /// Identifier of the token being validated when the item was logged.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_id: Option<Cow<'static, str>>,
}

impl Default for LogItem {
    fn default() -> Self {
        LogItem {
            kind: LogKind::Success,
            label: Cow::Borrowed(""),
            description: Cow::Borrowed(""),
            file: Cow::Borrowed(""),
            function: Cow::Borrowed(""),
            line: 0,
            err_val: None,
            validation_status: None,
            token_id: None,
        }
    }
}

impl LogItem {
    /// Captures the description from the value as the message of this
    /// `LogItem`.
    ///
    /// This is implemented using the [`Display`](std::fmt::Display) trait
    /// so that check messages are stored verbatim.
    ///
    /// ## Example
    ///
    /// ```
    /// # use std::borrow::Cow;
    /// # use ltv_status_tracker::{log_item, LogItem};
    /// let log = log_item!("test1", "test item 1", "test func").error("sample error message");
    ///
    /// assert_eq!(log.err_val, Some(Cow::Borrowed("sample error message")));
    /// ```
    #[must_use]
    pub fn error<E: std::fmt::Display>(self, err: E) -> Self {
        LogItem {
            err_val: Some(err.to_string().into()),
            ..self
        }
    }

    /// Adds a sub-indication code.
    ///
    /// ## Example
    ///
    /// ```
    /// # use std::borrow::Cow;
    /// # use ltv_status_tracker::{log_item, LogItem};
    /// let log = log_item!("test1", "test item 1", "test func").validation_status("NO_POE");
    ///
    /// assert_eq!(log.validation_status, Some(Cow::Borrowed("NO_POE")));
    /// ```
    #[must_use]
    pub fn validation_status(self, status: &'static str) -> Self {
        LogItem {
            validation_status: Some(status.into()),
            ..self
        }
    }

    /// Sets the identifier of the token this item refers to.
    #[must_use]
    pub fn set_token_id<S: Into<String>>(self, token_id: S) -> Self {
        LogItem {
            token_id: Some(token_id.into().into()),
            ..self
        }
    }

    /// Records a passed check.
    pub fn success(mut self, tracker: &mut StatusTracker) {
        self.kind = LogKind::Success;
        tracker.add_non_error(self);
    }

    /// Records an informational item. A non-empty message is kept in
    /// `err_val`.
    pub fn informational(mut self, tracker: &mut StatusTracker) {
        self.kind = LogKind::Informational;
        tracker.add_non_error(self);
    }

    /// Records a check that did not pass but whose level does not halt
    /// validation.
    pub fn warning<M: std::fmt::Display>(mut self, tracker: &mut StatusTracker, message: M) {
        self.kind = LogKind::Warning;
        self.err_val = Some(message.to_string().into());
        tracker.add_non_error(self);
    }

    /// Records a check that was skipped because its level is `IGNORE`.
    pub fn ignored(mut self, tracker: &mut StatusTracker) {
        self.kind = LogKind::Ignored;
        tracker.add_non_error(self);
    }

    /// Records a failed check.
    ///
    /// Returns `Err(err)` if the tracker is configured to stop on the
    /// first error.
    pub fn failure<E: std::fmt::Display>(
        mut self,
        tracker: &mut StatusTracker,
        err: E,
    ) -> Result<(), E> {
        self.kind = LogKind::Failure;
        self.err_val = Some(err.to_string().into());
        tracker.add_error(self, err)
    }

    /// Records a failed check, regardless of the tracker's
    /// [`ErrorBehavior`](crate::ErrorBehavior).
    pub fn failure_no_throw<E: std::fmt::Display>(mut self, tracker: &mut StatusTracker, err: E) {
        self.kind = LogKind::Failure;
        self.err_val = Some(err.to_string().into());
        tracker.add_non_error(self);
    }
}

/// Outcome recorded for a [`LogItem`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogKind {
    /// The check passed.
    Success,

    /// The check did not pass at `INFORM` level, or the item only carries
    /// information.
    Informational,

    /// The check did not pass at `WARN` level.
    Warning,

    /// The check was not evaluated because its level is `IGNORE`.
    Ignored,

    /// The check did not pass at `FAIL` level.
    Failure,
}

/// Creates a [`LogItem`] struct that is annotated with the source file and line
/// number where the log condition was discovered.
///
/// Takes three parameters, each of which may be a `'static str` or `String`:
///
/// * `label`: name of the check this `LogItem` records
/// * `description`: human-readable question the check answers
/// * `function`: name of the function generating this `LogItem`
///
/// ## Example
///
/// ```
/// # use std::borrow::Cow;
/// # use ltv_status_tracker::{log_item, LogItem, LogKind};
/// let log = log_item!("test1", "test item 1", "test func");
///
/// assert_eq!(
///     log,
///     LogItem {
///         kind: LogKind::Informational,
///         label: Cow::Borrowed("test1"),
///         description: Cow::Borrowed("test item 1"),
///         file: Cow::Borrowed(file!()),
///         function: Cow::Borrowed("test func"),
///         line: log.line,
///         err_val: None,
///         validation_status: None,
///         token_id: None,
///     }
/// );
/// #
/// # assert!(log.line > 2);
/// ```
#[macro_export]
macro_rules! log_item {
    ($label:expr, $description:expr, $function:expr) => {{
        $crate::LogItem {
            kind: $crate::LogKind::Informational,
            label: $label.into(),
            file: file!().into(),
            function: $function.into(),
            line: line!(),
            description: $description.into(),
            err_val: None,
            validation_status: None,
            token_id: None,
        }
    }};
}
