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

use super::fixtures::{date, simple_signature};
use crate::{
    diagnostic::TimestampToken,
    poe::{PoeSource, PoeStore},
};

#[test]
fn current_time_poe_for_every_token() {
    let diagnostic = simple_signature();
    let store = PoeStore::for_current_time(&diagnostic);

    for id in ["ROOT", "C", "CRL-C", "SIG"] {
        assert_eq!(store.lowest_poe(id, date(2024, 6, 20)), Some(date(2024, 6, 20)));
        assert!(!store.exists_poe(id, date(2024, 6, 19)));
    }
}

#[test]
fn lowest_poe_bounded_by_time() {
    let mut store = PoeStore::new();
    store.add("SIG", date(2024, 6, 20), PoeSource::CurrentTime);
    store.add("SIG", date(2024, 3, 1), PoeSource::Timestamp("TS-2".into()));
    store.add("SIG", date(2024, 1, 1), PoeSource::Timestamp("TS-1".into()));

    assert_eq!(store.lowest_poe("SIG", date(2024, 12, 31)), Some(date(2024, 1, 1)));
    assert_eq!(store.lowest_poe("SIG", date(2023, 12, 31)), None);
    assert_eq!(
        store.lowest_poe_entry("SIG", date(2024, 6, 1)).unwrap().source,
        PoeSource::Timestamp("TS-1".into())
    );
    assert!(store.poes("OTHER").is_empty());
}

#[test]
fn adding_never_removes() {
    let mut store = PoeStore::new();
    store.add("SIG", date(2024, 1, 1), PoeSource::CurrentTime);
    assert!(store.exists_poe("SIG", date(2024, 1, 1)));

    // Later proofs do not hide the earlier one, duplicates are merged.
    store.add("SIG", date(2024, 6, 1), PoeSource::CurrentTime);
    store.add("SIG", date(2024, 1, 1), PoeSource::CurrentTime);

    assert!(store.exists_poe("SIG", date(2024, 1, 1)));
    assert_eq!(store.poes("SIG").len(), 2);
}

#[test]
fn poe_in_range_is_inclusive() {
    let mut store = PoeStore::new();
    store.add("CRL", date(2024, 3, 1), PoeSource::CurrentTime);

    assert!(store.exists_poe_in_range("CRL", date(2024, 3, 1), date(2024, 3, 1)));
    assert!(store.exists_poe_in_range("CRL", date(2024, 1, 1), date(2024, 12, 31)));
    assert!(!store.exists_poe_in_range("CRL", date(2024, 3, 2), date(2024, 12, 31)));
}

#[test]
fn timestamp_proves_covered_objects() {
    let timestamp = TimestampToken::new("TS", date(2024, 2, 1))
        .covering("SIG")
        .covering("CRL-C");
    let mut store = PoeStore::new();

    store.add_timestamp(&timestamp);

    assert_eq!(store.lowest_poe("SIG", date(2024, 6, 1)), Some(date(2024, 2, 1)));
    assert_eq!(store.lowest_poe("CRL-C", date(2024, 6, 1)), Some(date(2024, 2, 1)));
    assert!(!store.exists_poe("TS", date(2024, 6, 1)));
}
