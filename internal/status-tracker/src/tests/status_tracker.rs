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

use std::fmt::{self, Display, Formatter};

use crate::{log_item, ErrorBehavior, LogKind, StatusTracker};

#[derive(Debug, PartialEq)]
struct SampleError {}

impl Display for SampleError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "SampleError")
    }
}

#[test]
fn aggregates_errors() {
    let mut tracker = StatusTracker::default();

    // Add an item without an error.
    log_item!("test1", "test item 1", "test func").success(&mut tracker);

    // Add another item with an error. Should not stop.
    log_item!("test2", "test item 1", "test func")
        .failure(&mut tracker, SampleError {})
        .unwrap();

    assert_eq!(tracker.logged_items().len(), 2);
    assert_eq!(tracker.filter_errors().count(), 1);
    assert!(tracker.has_any_error());
}

#[test]
fn stops_on_first_error() {
    let mut tracker = StatusTracker::with_error_behavior(ErrorBehavior::StopOnFirstError);

    log_item!("test1", "test item 1", "test func").success(&mut tracker);

    let err = log_item!("test2", "test item 2", "test func")
        .failure(&mut tracker, SampleError {})
        .unwrap_err();

    assert_eq!(err, SampleError {});
    assert_eq!(tracker.logged_items().len(), 2);
}

#[test]
fn token_id_stack() {
    let mut tracker = StatusTracker::default();

    tracker.push_token_id("SIG-1");
    log_item!("a", "first", "test func").success(&mut tracker);

    tracker.push_token_id("CERT-1");
    log_item!("b", "second", "test func").success(&mut tracker);
    log_item!("c", "third", "test func")
        .set_token_id("REV-1")
        .success(&mut tracker);

    assert_eq!(tracker.pop_token_id().as_deref(), Some("CERT-1"));
    log_item!("d", "fourth", "test func").success(&mut tracker);
    tracker.pop_token_id();
    log_item!("e", "fifth", "test func").success(&mut tracker);

    let ids: Vec<Option<&str>> = tracker
        .logged_items()
        .iter()
        .map(|i| i.token_id.as_deref())
        .collect();

    assert_eq!(
        ids,
        vec![
            Some("SIG-1"),
            Some("CERT-1"),
            Some("REV-1"),
            Some("SIG-1"),
            None
        ]
    );
}

#[test]
fn status_and_check_lookup() {
    let mut tracker = StatusTracker::default();

    log_item!("certificate.notRevoked", "Is the certificate not revoked?", "test")
        .validation_status("REVOKED_NO_POE")
        .failure_no_throw(&mut tracker, "revoked");
    log_item!("cryptographic.constraints", "Are the constraints met?", "test")
        .warning(&mut tracker, "weak");

    assert!(tracker.has_status("REVOKED_NO_POE"));
    assert!(!tracker.has_status("TRY_LATER"));
    assert!(tracker.has_check("cryptographic.constraints"));
    assert_eq!(
        tracker.check_kind("certificate.notRevoked"),
        Some(LogKind::Failure)
    );
    assert_eq!(tracker.filter_kind(LogKind::Warning).count(), 1);
    assert_eq!(tracker.check_kind("missing"), None);
}

#[test]
fn append() {
    let mut first = StatusTracker::default();
    log_item!("a", "first", "test func").success(&mut first);

    let mut second = StatusTracker::default();
    log_item!("b", "second", "test func").failure_no_throw(&mut second, "bad");

    first.append(&second);
    assert_eq!(first.logged_items().len(), 2);
    assert!(first.has_any_error());
}
