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

//! End-to-end validation runs.

#![allow(clippy::unwrap_used)]

use std::{collections::BTreeMap, sync::Arc};

use chrono::{DateTime, Duration, TimeZone, Utc};
use ltv::{
    diagnostic::{
        CertificateRevocation, CertificateToken, DiagnosticData, RevocationReason,
        RevocationToken, SignatureToken, TimestampToken,
    },
    settings::Settings,
    trusted_lists::{
        cert_fingerprint,
        model::{
            ParsingInfo, SignatureIndication, TrustService, TrustServiceProvider,
            TrustServiceStatus, ValidationInfo,
        },
        Error as TlError, LoadedList, TrustedListLoader, TrustedListsCertificateSource,
    },
    Indication, SignatureValidator, SubIndication,
};

fn date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
}

fn anchor(id: &str) -> CertificateToken {
    CertificateToken::new(id, date(2020, 1, 1), date(2040, 1, 1))
        .trusted()
        .self_signed()
}

/// `SIG` signed by `C` (valid during 2024) under trusted `CA`, covered by
/// a time-stamp from trusted `TSA` produced at `timestamped_at`. The only
/// CRL on `C` is from June 15th and good for a month. Validation happens
/// in 2025, after `C` expired.
fn expired_signer(timestamped_at: DateTime<Utc>) -> DiagnosticData {
    DiagnosticData::new(date(2025, 3, 1))
        .with_certificate(anchor("CA"))
        .with_certificate(anchor("TSA"))
        .with_certificate(
            CertificateToken::new("C", date(2024, 1, 1), date(2024, 12, 31))
                .signed_by("CA")
                .with_revocation(CertificateRevocation::good("CRL-C")),
        )
        .with_revocation(
            RevocationToken::crl("CRL-C", date(2024, 6, 15))
                .with_next_update(date(2024, 7, 15))
                .signed_by("CA"),
        )
        .with_timestamp(
            TimestampToken::new("TS", timestamped_at)
                .signed_by("TSA")
                .covering("SIG"),
        )
        .with_signature(SignatureToken::new("SIG").signed_by("C"))
}

#[test]
fn expired_signer_with_earlier_timestamp_passes() {
    let _ = env_logger::builder().is_test(true).try_init();

    let diagnostic = expired_signer(date(2024, 6, 1));
    let settings = Settings::new();
    let report = SignatureValidator::new(&diagnostic, &settings)
        .unwrap()
        .validate_signature("SIG")
        .unwrap();

    assert!(report.basic.conclusion.is(
        Indication::Indeterminate,
        Some(SubIndication::OutOfBoundsNoPoe)
    ));
    assert!(report.timestamps[0].conclusion.is_passed());
    assert!(report.conclusion.is_passed(), "{}", report);
    assert_eq!(report.best_signature_time, Some(date(2024, 6, 1)));

    // The stale CRL moved the control time back to its issuance.
    let psv = report.past_signature.as_ref().unwrap();
    assert_eq!(psv.control_time, Some(date(2024, 6, 15)));
    assert!(psv.find_block("Validation time sliding").is_some());
}

#[test]
fn timestamp_before_certificate_issuance() {
    let diagnostic = expired_signer(date(2023, 12, 1));
    let settings = Settings::new();
    let report = SignatureValidator::new(&diagnostic, &settings)
        .unwrap()
        .validate_signature("SIG")
        .unwrap();

    assert!(report
        .conclusion
        .is(Indication::Indeterminate, Some(SubIndication::NotYetValid)));
    assert_eq!(report.best_signature_time, Some(date(2023, 12, 1)));
}

#[test]
fn without_timestamp_the_present_verdict_stands() {
    let mut diagnostic = expired_signer(date(2024, 6, 1));
    diagnostic.timestamps.clear();
    let settings = Settings::new();

    let report = SignatureValidator::new(&diagnostic, &settings)
        .unwrap()
        .validate_signature("SIG")
        .unwrap();

    assert!(report.conclusion.is(
        Indication::Indeterminate,
        Some(SubIndication::OutOfBoundsNoPoe)
    ));
    assert_eq!(report.best_signature_time, Some(date(2025, 3, 1)));
}

#[test]
fn control_time_slides_to_revocation() {
    let this_update = date(2024, 6, 15);
    let diagnostic = DiagnosticData::new(this_update + Duration::hours(1))
        .with_certificate(anchor("CA"))
        .with_certificate(
            CertificateToken::new("C", date(2024, 1, 1), date(2024, 12, 31))
                .signed_by("CA")
                .with_revocation(CertificateRevocation::revoked(
                    "CRL-C",
                    date(2024, 6, 1),
                    RevocationReason::KeyCompromise,
                )),
        )
        .with_revocation(
            RevocationToken::crl("CRL-C", this_update)
                .with_next_update(this_update + Duration::days(7))
                .signed_by("CA"),
        );
    let settings = Settings::new();

    let vts = SignatureValidator::new(&diagnostic, &settings)
        .unwrap()
        .validation_time_sliding("C")
        .unwrap();

    assert_eq!(vts.control_time, date(2024, 6, 1));
}

const LOTL: &str = "https://lotl.example/lotl.xml";
const TL: &str = "https://tl.example/tl.xml";

struct StaticLoader(BTreeMap<String, LoadedList>);

impl TrustedListLoader for StaticLoader {
    fn load(&self, url: &str) -> ltv::trusted_lists::Result<LoadedList> {
        self.0.get(url).cloned().ok_or_else(|| TlError::Loader {
            url: url.to_owned(),
            message: "not found".to_owned(),
        })
    }
}

fn list(tl_pointers: Vec<String>, certificates: Vec<Vec<u8>>) -> LoadedList {
    LoadedList {
        parsing: ParsingInfo {
            sequence_number: Some(7),
            territory: Some("EU".to_owned()),
            issue_date: Some(date(2024, 1, 1)),
            next_update: Some(date(2999, 1, 1)),
            trust_service_providers: vec![TrustServiceProvider {
                names: vec!["Example TSP".to_owned()],
                trade_names: vec![],
                services: vec![TrustService {
                    names: vec!["Example CA".to_owned()],
                    certificates,
                    status_history: vec![TrustServiceStatus {
                        service_type: "http://uri.etsi.org/TrstSvc/Svctype/CA/QC".to_owned(),
                        status: "http://uri.etsi.org/TrstSvc/TrustedList/Svcstatus/granted"
                            .to_owned(),
                        start_date: date(2016, 6, 30),
                        end_date: None,
                        additional_service_info: vec![],
                        expired_certs_revocation_info: None,
                    }],
                }],
            }],
            tl_pointers,
        },
        validation: ValidationInfo::new(SignatureIndication::TotalPassed),
    }
}

#[test]
fn trust_from_synchronized_lists() {
    let settings = Settings::from_toml(&format!(
        "[validation]\npast_signature_validation = false\n\n[trust_lists]\nlotl_sources = [\"{LOTL}\"]\n"
    ))
    .unwrap();

    let loader = StaticLoader(BTreeMap::from([
        (LOTL.to_owned(), list(vec![TL.to_owned()], vec![])),
        (TL.to_owned(), list(vec![], vec![b"ca-der".to_vec()])),
    ]));
    let source = Arc::new(TrustedListsCertificateSource::new());
    let job = settings.trust_lists.job(source.clone());
    job.refresh(&loader).unwrap();
    assert!(source.is_trusted(&cert_fingerprint(b"ca-der")));

    // The CA is not an anchor until the lists say so.
    let mut diagnostic = DiagnosticData::new(date(2024, 6, 20))
        .with_certificate(
            CertificateToken::new("CA", date(2020, 1, 1), date(2040, 1, 1))
                .signed_by("UPSTREAM")
                .with_fingerprint(cert_fingerprint(b"ca-der")),
        )
        .with_certificate(
            CertificateToken::new("C", date(2024, 1, 1), date(2024, 12, 31))
                .signed_by("CA")
                .with_revocation(CertificateRevocation::good("CRL-C")),
        )
        .with_revocation(
            RevocationToken::crl("CRL-C", date(2024, 6, 15))
                .with_next_update(date(2024, 7, 15))
                .signed_by("CA"),
        )
        .with_signature(SignatureToken::new("SIG").signed_by("C"));

    let before = SignatureValidator::new(&diagnostic, &settings)
        .unwrap()
        .validate_signature("SIG")
        .unwrap();
    assert!(before.conclusion.is(
        Indication::Indeterminate,
        Some(SubIndication::NoCertificateChainFound)
    ));

    assert_eq!(diagnostic.apply_trusted_lists(&source), 1);
    let after = SignatureValidator::new(&diagnostic, &settings)
        .unwrap()
        .validate_signature("SIG")
        .unwrap();
    assert!(after.conclusion.is_passed(), "{}", after);
    let ca = diagnostic.certificate("CA").unwrap();
    assert_eq!(ca.trust_services[0].tl_url, TL);
    assert_eq!(ca.trust_services[0].lotl_url.as_deref(), Some(LOTL));
}
