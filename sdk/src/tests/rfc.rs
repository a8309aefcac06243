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

use chrono::Duration;

use super::fixtures::date;
use crate::{diagnostic::RevocationToken, process::rfc::is_fresh, Error};

#[test]
fn fresh_within_own_window() {
    let crl = RevocationToken::crl("CRL", date(2024, 6, 1)).with_next_update(date(2024, 6, 11));

    assert!(is_fresh(&crl, date(2024, 6, 5), None).unwrap());
    assert!(is_fresh(&crl, date(2024, 6, 11), None).unwrap());
    assert!(!is_fresh(&crl, date(2024, 6, 12), None).unwrap());
}

#[test]
fn max_age_overrides_window() {
    let crl = RevocationToken::crl("CRL", date(2024, 6, 1)).with_next_update(date(2024, 6, 11));

    assert!(!is_fresh(&crl, date(2024, 6, 5), Some(Duration::days(1))).unwrap());
    assert!(is_fresh(&crl, date(2024, 6, 30), Some(Duration::days(30))).unwrap());
}

#[test]
fn without_next_update_or_this_update() {
    let no_next = RevocationToken::crl("CRL", date(2024, 6, 1));
    assert!(!is_fresh(&no_next, date(2024, 6, 1), None).unwrap());
    assert!(is_fresh(&no_next, date(2024, 6, 2), Some(Duration::days(2))).unwrap());

    let no_this = RevocationToken::crl("CRL", date(2024, 6, 1))
        .with_next_update(date(2024, 6, 11))
        .without_this_update();
    assert!(!is_fresh(&no_this, date(2024, 6, 2), Some(Duration::days(2))).unwrap());
}

#[test]
fn next_update_before_this_update_is_an_error() {
    let crl = RevocationToken::crl("CRL", date(2024, 6, 11)).with_next_update(date(2024, 6, 1));

    assert!(matches!(
        is_fresh(&crl, date(2024, 6, 12), None),
        Err(Error::InvalidTemporalData { token_id, .. }) if token_id == "CRL"
    ));
    // Not needed when the policy sets the window.
    assert!(is_fresh(&crl, date(2024, 6, 12), Some(Duration::days(2))).unwrap());
}
