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

#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]

mod job;

pub(crate) mod fixtures {
    use std::collections::BTreeMap;

    use chrono::{DateTime, TimeZone, Utc};

    use crate::{
        model::{
            ParsingInfo, SignatureIndication, TrustService, TrustServiceProvider,
            TrustServiceStatus, ValidationInfo,
        },
        CacheState, Error, LoadedList, Result, TlInfo, TrustedListLoader,
    };

    pub(crate) fn date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
    }

    pub(crate) fn parsing(provider: &str, certificates: &[&[u8]]) -> ParsingInfo {
        ParsingInfo {
            sequence_number: Some(1),
            territory: Some("EU".to_owned()),
            issue_date: Some(date(2024, 1, 1)),
            next_update: Some(date(2999, 1, 1)),
            trust_service_providers: vec![TrustServiceProvider {
                names: vec![provider.to_owned()],
                trade_names: vec![],
                services: vec![TrustService {
                    names: vec![format!("{provider} CA")],
                    certificates: certificates.iter().map(|c| c.to_vec()).collect(),
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
            tl_pointers: vec![],
        }
    }

    pub(crate) fn loaded(parsing: ParsingInfo, indication: SignatureIndication) -> LoadedList {
        LoadedList {
            parsing,
            validation: ValidationInfo::new(indication),
        }
    }

    pub(crate) fn tl_info(
        parsing: Option<ParsingInfo>,
        indication: Option<SignatureIndication>,
    ) -> TlInfo {
        TlInfo {
            url: "https://tl.example/tl.xml".to_owned(),
            last_loading: Some(date(2024, 6, 1)),
            parsing,
            validation: indication.map(ValidationInfo::new),
            state: CacheState::Desynchronized,
            error: None,
        }
    }

    /// Loader answering from a fixed table; unknown URLs fail.
    #[derive(Default)]
    pub(crate) struct TableLoader {
        pub(crate) lists: BTreeMap<String, LoadedList>,
    }

    impl TableLoader {
        pub(crate) fn with(mut self, url: &str, list: LoadedList) -> Self {
            self.lists.insert(url.to_owned(), list);
            self
        }
    }

    impl TrustedListLoader for TableLoader {
        fn load(&self, url: &str) -> Result<LoadedList> {
            self.lists.get(url).cloned().ok_or_else(|| Error::Loader {
                url: url.to_owned(),
                message: "connection refused".to_owned(),
            })
        }
    }
}
