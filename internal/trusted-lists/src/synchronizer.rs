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

use log::{debug, info};

use crate::{
    model::{ParsingInfo, TrustProperties},
    source::TrustPropertiesMap,
    CacheState, SynchronizationStrategy, TlInfo, TlValidationJobSummary, TrustedListsCache,
    TrustedListsCertificateSource,
};

/// Promotes accepted trusted-list content into a
/// [`TrustedListsCertificateSource`].
pub struct TrustedListCertificateSourceSynchronizer<'a> {
    strategy: &'a dyn SynchronizationStrategy,
    cache: &'a TrustedListsCache,
    source: &'a TrustedListsCertificateSource,
}

impl<'a> TrustedListCertificateSourceSynchronizer<'a> {
    /// Creates a synchronizer.
    pub fn new(
        strategy: &'a dyn SynchronizationStrategy,
        cache: &'a TrustedListsCache,
        source: &'a TrustedListsCertificateSource,
    ) -> Self {
        Self {
            strategy,
            cache,
            source,
        }
    }

    /// Publishes `summary`, together with a rebuilt trust store if any
    /// cache record is desynchronized or in error.
    ///
    /// Returns `true` if a new association was published.
    pub fn sync(&self, summary: &Arc<TlValidationJobSummary>) -> bool {
        if !self.cache.is_desynchronized() {
            debug!("Trusted lists are synchronized, nothing to do");
            self.source.publish(None, Some(summary.clone()));
            return false;
        }

        let properties = build_trust_properties(summary, self.strategy);
        info!(
            "Synchronizing {} certificate(s) into the trust store",
            properties.len()
        );

        self.source.publish(Some(properties), Some(summary.clone()));
        self.cache.mark_synchronized();
        true
    }
}

/// Builds a fresh certificate to trust properties association from the
/// sources accepted by `strategy`.
pub fn build_trust_properties(
    summary: &TlValidationJobSummary,
    strategy: &dyn SynchronizationStrategy,
) -> TrustPropertiesMap {
    let mut properties = TrustPropertiesMap::new();

    for lotl in &summary.lotl_infos {
        if !strategy.can_be_synchronized_lotl(lotl) {
            debug!("List of trusted lists '{}' is not synchronized", lotl.info.url);
            continue;
        }

        for tl in &lotl.tl_infos {
            add_tl(&mut properties, tl, Some(&lotl.info.url), strategy);
        }
    }

    for tl in &summary.other_tl_infos {
        add_tl(&mut properties, tl, None, strategy);
    }

    for entries in properties.values_mut() {
        entries.sort();
        entries.dedup();
    }

    properties
}

fn add_tl(
    properties: &mut TrustPropertiesMap,
    tl: &TlInfo,
    lotl_url: Option<&str>,
    strategy: &dyn SynchronizationStrategy,
) {
    if tl.state == CacheState::ToBeDeleted {
        return;
    }

    if !strategy.can_be_synchronized_tl(tl) {
        debug!("Trusted list '{}' is not synchronized", tl.url);
        return;
    }

    if let Some(parsing) = &tl.parsing {
        add_certificates(properties, parsing, &tl.url, lotl_url);
    }
}

fn add_certificates(
    properties: &mut TrustPropertiesMap,
    parsing: &ParsingInfo,
    tl_url: &str,
    lotl_url: Option<&str>,
) {
    for provider in &parsing.trust_service_providers {
        for service in &provider.services {
            let trust_properties = TrustProperties {
                lotl_url: lotl_url.map(str::to_owned),
                tl_url: tl_url.to_owned(),
                provider_names: provider.names.clone(),
                service_names: service.names.clone(),
                status_history: service.status_history.clone(),
            };

            for certificate in &service.certificates {
                properties
                    .entry(crate::cert_fingerprint(certificate))
                    .or_default()
                    .push(trust_properties.clone());
            }
        }
    }
}
