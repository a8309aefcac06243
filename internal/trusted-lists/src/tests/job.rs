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

use std::sync::Arc;

use super::fixtures::{loaded, parsing, TableLoader};
use crate::{
    cert_fingerprint, model::SignatureIndication, CacheKey, CacheState, Error,
    ExpirationAndSignatureCheckStrategy, LotlSource, TlSource, TlValidationJob,
    TrustedListsCertificateSource,
};

const TL_A: &str = "https://a.example/tl.xml";
const TL_B: &str = "https://b.example/tl.xml";
const LOTL: &str = "https://lotl.example/lotl.xml";

fn tl_sources(urls: &[&str]) -> Vec<TlSource> {
    urls.iter()
        .map(|url| TlSource {
            url: (*url).to_owned(),
        })
        .collect()
}

fn two_lists() -> TableLoader {
    TableLoader::default()
        .with(
            TL_A,
            loaded(parsing("A", &[b"cert-a"]), SignatureIndication::TotalPassed),
        )
        .with(
            TL_B,
            loaded(parsing("B", &[b"cert-b"]), SignatureIndication::TotalPassed),
        )
}

#[test]
fn refresh_populates_trust_store() {
    let _ = env_logger::builder().is_test(true).try_init();

    let source = Arc::new(TrustedListsCertificateSource::new());
    let job =
        TlValidationJob::new(source.clone()).with_tl_sources(tl_sources(&[TL_A, TL_B]));

    let summary = job.refresh(&two_lists()).unwrap();

    assert_eq!(summary.number_of_processed_tls(), 2);
    assert!(source.is_trusted(&cert_fingerprint(b"cert-a")));
    assert!(source.is_trusted(&cert_fingerprint(b"cert-b")));
    assert_eq!(source.summary().unwrap(), summary);
    assert_eq!(job.summary().unwrap(), summary);
}

#[test]
fn trust_store_and_summary_are_published_together() {
    let source = Arc::new(TrustedListsCertificateSource::new());
    let mut job =
        TlValidationJob::new(source.clone()).with_tl_sources(tl_sources(&[TL_A, TL_B]));
    let loader = two_lists();

    let first = job.refresh(&loader).unwrap();
    let before = source.published();

    job.set_sources(vec![], tl_sources(&[TL_A]));
    let second = job.refresh(&loader).unwrap();
    let after = source.published();

    // A reader holding the earlier snapshot keeps a consistent pair.
    assert!(Arc::ptr_eq(before.summary.as_ref().unwrap(), &first));
    assert!(before.properties.contains_key(&cert_fingerprint(b"cert-b")));

    assert!(Arc::ptr_eq(after.summary.as_ref().unwrap(), &second));
    assert_eq!(second.number_of_processed_tls(), 1);
    assert!(!after.properties.contains_key(&cert_fingerprint(b"cert-b")));
}

#[test]
fn refresh_is_idempotent() {
    let source = Arc::new(TrustedListsCertificateSource::new());
    let job =
        TlValidationJob::new(source.clone()).with_tl_sources(tl_sources(&[TL_A, TL_B]));
    let loader = two_lists();

    job.refresh(&loader).unwrap();
    let first = source.snapshot();

    job.refresh(&loader).unwrap();
    let second = source.snapshot();

    assert_eq!(first, second);
    // Nothing changed, so nothing was republished.
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn invalid_list_is_not_synchronized() {
    let source = Arc::new(TrustedListsCertificateSource::new());
    let job = TlValidationJob::new(source.clone())
        .with_tl_sources(tl_sources(&[TL_A, TL_B]))
        .with_strategy(Box::new(
            ExpirationAndSignatureCheckStrategy::new().accept_invalid_trusted_list(false),
        ));

    let loader = TableLoader::default()
        .with(
            TL_A,
            loaded(parsing("A", &[b"cert-a"]), SignatureIndication::TotalFailed),
        )
        .with(
            TL_B,
            loaded(parsing("B", &[b"cert-b"]), SignatureIndication::TotalPassed),
        );

    job.refresh(&loader).unwrap();

    assert!(!source.is_trusted(&cert_fingerprint(b"cert-a")));
    assert!(source.is_trusted(&cert_fingerprint(b"cert-b")));
}

#[test]
fn failing_source_does_not_stop_others() {
    let source = Arc::new(TrustedListsCertificateSource::new());
    let job =
        TlValidationJob::new(source.clone()).with_tl_sources(tl_sources(&[TL_A, TL_B]));

    let loader = TableLoader::default().with(
        TL_B,
        loaded(parsing("B", &[b"cert-b"]), SignatureIndication::TotalPassed),
    );

    let summary = job.refresh(&loader).unwrap();

    let a = &summary.other_tl_infos[0];
    assert!(a.has_error());
    assert!(a.error.as_deref().unwrap_or_default().contains("connection refused"));
    assert!(source.is_trusted(&cert_fingerprint(b"cert-b")));
}

#[test]
fn previous_content_survives_a_failed_reload() {
    let source = Arc::new(TrustedListsCertificateSource::new());
    let job = TlValidationJob::new(source.clone()).with_tl_sources(tl_sources(&[TL_A]));

    job.refresh(&two_lists()).unwrap();
    assert!(source.is_trusted(&cert_fingerprint(b"cert-a")));

    job.refresh(&TableLoader::default()).unwrap();

    assert_eq!(
        job.cache().get(&CacheKey::new(TL_A)).unwrap().state,
        CacheState::Error
    );
    assert!(source.is_trusted(&cert_fingerprint(b"cert-a")));
}

#[test]
fn duplicate_sources_leave_store_untouched() {
    let source = Arc::new(TrustedListsCertificateSource::new());
    let mut job = TlValidationJob::new(source.clone()).with_tl_sources(tl_sources(&[TL_A]));
    job.refresh(&two_lists()).unwrap();
    let before = source.snapshot();

    job.set_sources(
        vec![LotlSource {
            url: TL_A.to_owned(),
        }],
        tl_sources(&[TL_A]),
    );

    assert_eq!(
        job.refresh(&two_lists()).unwrap_err(),
        Error::DuplicateSource(TL_A.to_owned())
    );
    assert!(Arc::ptr_eq(&before, &source.snapshot()));
}

#[test]
fn removed_source_is_dropped() {
    let source = Arc::new(TrustedListsCertificateSource::new());
    let mut job =
        TlValidationJob::new(source.clone()).with_tl_sources(tl_sources(&[TL_A, TL_B]));
    let loader = two_lists();

    job.refresh(&loader).unwrap();
    job.set_sources(vec![], tl_sources(&[TL_A]));
    job.refresh(&loader).unwrap();

    assert!(source.is_trusted(&cert_fingerprint(b"cert-a")));
    assert!(!source.is_trusted(&cert_fingerprint(b"cert-b")));
    assert!(job.cache().get(&CacheKey::new(TL_B)).is_none());
}

#[test]
fn lotl_pointers_are_followed() {
    let source = Arc::new(TrustedListsCertificateSource::new());
    let job = TlValidationJob::new(source.clone()).with_lotl_sources(vec![LotlSource {
        url: LOTL.to_owned(),
    }]);

    let mut lotl = parsing("LOTL", &[]);
    lotl.trust_service_providers.clear();
    lotl.tl_pointers = vec![TL_A.to_owned()];

    let loader = two_lists().with(LOTL, loaded(lotl, SignatureIndication::TotalPassed));
    let summary = job.refresh(&loader).unwrap();

    assert_eq!(summary.number_of_processed_lotls(), 1);
    assert_eq!(summary.lotl_infos[0].tl_infos.len(), 1);

    let properties = source.trust_properties(&cert_fingerprint(b"cert-a"));
    assert_eq!(properties[0].lotl_url.as_deref(), Some(LOTL));
    assert!(!source.is_trusted(&cert_fingerprint(b"cert-b")));
}
