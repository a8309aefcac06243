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

use std::{
    collections::BTreeSet,
    sync::Arc,
};

use log::{debug, error, info};
use serde::{Deserialize, Serialize};

use crate::{
    internal::time::utc_now,
    model::{ParsingInfo, ValidationInfo},
    AcceptAllStrategy, CacheKey, Error, LotlInfo, Result, SourceKind, SynchronizationStrategy,
    TlInfo, TlValidationJobSummary, TrustedListCertificateSourceSynchronizer, TrustedListsCache,
    TrustedListsCertificateSource,
};

/// A configured list of trusted lists.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct LotlSource {
    /// URL of the list.
    pub url: String,
}

/// A trusted list configured on its own.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct TlSource {
    /// URL of the list.
    pub url: String,
}

/// Parsed and validated content of one source.
#[derive(Clone, Debug, PartialEq)]
pub struct LoadedList {
    /// Parsing result.
    pub parsing: ParsingInfo,

    /// Signature validation result.
    pub validation: ValidationInfo,
}

/// Downloads, parses and validates a trusted-list source.
///
/// Implemented by the collaborator that understands the trusted-list wire
/// format.
pub trait TrustedListLoader {
    /// Loads the source at `url`.
    fn load(&self, url: &str) -> Result<LoadedList>;
}

/// Refreshes trusted-list sources and keeps a
/// [`TrustedListsCertificateSource`] synchronized with them.
pub struct TlValidationJob {
    lotl_sources: Vec<LotlSource>,
    tl_sources: Vec<TlSource>,
    strategy: Box<dyn SynchronizationStrategy>,
    cache: TrustedListsCache,
    source: Arc<TrustedListsCertificateSource>,
    clean_memory: bool,
    debug: bool,
}

impl TlValidationJob {
    /// Creates a job feeding `source`, with no configured list and the
    /// [`AcceptAllStrategy`].
    pub fn new(source: Arc<TrustedListsCertificateSource>) -> Self {
        Self {
            lotl_sources: vec![],
            tl_sources: vec![],
            strategy: Box::new(AcceptAllStrategy),
            cache: TrustedListsCache::new(),
            source,
            clean_memory: true,
            debug: false,
        }
    }

    /// Sets the lists of trusted lists to process.
    pub fn with_lotl_sources(mut self, sources: Vec<LotlSource>) -> Self {
        self.lotl_sources = sources;
        self
    }

    /// Sets the trusted lists to process.
    pub fn with_tl_sources(mut self, sources: Vec<TlSource>) -> Self {
        self.tl_sources = sources;
        self
    }

    /// Sets the synchronization strategy.
    pub fn with_strategy(mut self, strategy: Box<dyn SynchronizationStrategy>) -> Self {
        self.strategy = strategy;
        self
    }

    /// Removes cache records of sources that are no longer configured.
    pub fn with_clean_memory(mut self, clean_memory: bool) -> Self {
        self.clean_memory = clean_memory;
        self
    }

    /// Logs the summary at debug level after each run.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Returns the source cache.
    pub fn cache(&self) -> &TrustedListsCache {
        &self.cache
    }

    /// Returns the last published summary.
    pub fn summary(&self) -> Option<Arc<TlValidationJobSummary>> {
        self.source.summary()
    }

    /// Updates the configured sources. Records of removed sources are
    /// dropped by the next run.
    pub fn set_sources(&mut self, lotl_sources: Vec<LotlSource>, tl_sources: Vec<TlSource>) {
        self.lotl_sources = lotl_sources;
        self.tl_sources = tl_sources;
    }

    /// Runs one refresh and synchronization pass.
    ///
    /// A failure to load one source is recorded in its cache record and
    /// does not stop the others. An `Err` is only returned for a
    /// configuration problem, in which case nothing is published.
    pub fn refresh(&self, loader: &dyn TrustedListLoader) -> Result<Arc<TlValidationJobSummary>> {
        self.check_duplicates()?;

        info!("TL validation job is starting ...");

        let mut scheduled = BTreeSet::new();

        for lotl in &self.lotl_sources {
            let key = CacheKey::new(lotl.url.as_str());
            scheduled.insert(key.clone());
            self.refresh_source(&key, SourceKind::ListOfTrustedLists, loader);

            for url in self.tl_pointers(&key) {
                let tl_key = CacheKey::new(url);
                scheduled.insert(tl_key.clone());
                self.refresh_source(
                    &tl_key,
                    SourceKind::TrustedList {
                        lotl: Some(key.clone()),
                    },
                    loader,
                );
            }
        }

        for tl in &self.tl_sources {
            let key = CacheKey::new(tl.url.as_str());
            scheduled.insert(key.clone());
            self.refresh_source(&key, SourceKind::TrustedList { lotl: None }, loader);
        }

        self.cache.mark_to_be_deleted(&scheduled);

        let summary = Arc::new(self.build_summary());
        if self.debug {
            debug!("{summary:#?}");
        }

        TrustedListCertificateSourceSynchronizer::new(
            self.strategy.as_ref(),
            &self.cache,
            &self.source,
        )
        .sync(&summary);

        if self.clean_memory {
            let removed = self.cache.clean();
            if removed > 0 {
                info!("{removed} obsolete trusted list record(s) removed");
            }
        }

        info!(
            "TL validation job is finishing: {} LOTL(s), {} TL(s), {} certificate(s)",
            summary.number_of_processed_lotls(),
            summary.number_of_processed_tls(),
            self.source.number_of_certificates()
        );

        Ok(summary)
    }

    fn check_duplicates(&self) -> Result<()> {
        let mut urls = BTreeSet::new();
        let configured = self
            .lotl_sources
            .iter()
            .map(|lotl| &lotl.url)
            .chain(self.tl_sources.iter().map(|tl| &tl.url));

        for url in configured {
            if !urls.insert(url) {
                return Err(Error::DuplicateSource(url.clone()));
            }
        }

        Ok(())
    }

    fn refresh_source(&self, key: &CacheKey, kind: SourceKind, loader: &dyn TrustedListLoader) {
        match loader.load(key.url()) {
            Ok(loaded) => self.cache.update_loaded(key, kind, loaded, utc_now()),
            Err(err) => {
                error!("Unable to process the trusted list '{key}' : {err}");
                self.cache.update_error(key, kind, err.to_string());
            }
        }
    }

    fn tl_pointers(&self, lotl_key: &CacheKey) -> Vec<String> {
        self.cache
            .get(lotl_key)
            .and_then(|record| record.parsing)
            .map(|parsing| parsing.tl_pointers)
            .unwrap_or_default()
    }

    fn build_summary(&self) -> TlValidationJobSummary {
        let records: Vec<_> = self
            .cache
            .keys()
            .iter()
            .filter_map(|key| self.cache.get(key))
            .collect();

        let lotl_infos = self
            .lotl_sources
            .iter()
            .filter_map(|lotl| {
                let key = CacheKey::new(lotl.url.as_str());
                let record = records.iter().find(|record| record.key == key)?;
                let tl_infos = records
                    .iter()
                    .filter(|tl| tl.kind == SourceKind::TrustedList { lotl: Some(key.clone()) })
                    .map(TlInfo::from)
                    .collect();

                Some(LotlInfo {
                    info: TlInfo::from(record),
                    tl_infos,
                })
            })
            .collect();

        let other_tl_infos = self
            .tl_sources
            .iter()
            .filter_map(|tl| {
                let key = CacheKey::new(tl.url.as_str());
                records.iter().find(|record| record.key == key).map(TlInfo::from)
            })
            .collect();

        TlValidationJobSummary {
            lotl_infos,
            other_tl_infos,
        }
    }
}
