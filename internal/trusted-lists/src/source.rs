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
    collections::BTreeMap,
    sync::{Arc, PoisonError, RwLock},
};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use sha2::{Digest, Sha256};

use crate::{model::TrustProperties, TlValidationJobSummary};

/// Certificate fingerprint to trust properties association.
pub type TrustPropertiesMap = BTreeMap<String, Vec<TrustProperties>>;

/// Returns the key used for a certificate in the trust store: the base64
/// encoding of the SHA-256 hash of its DER encoding.
pub fn cert_fingerprint(cert_der: &[u8]) -> String {
    let cert_sha256 = Sha256::digest(cert_der);
    STANDARD.encode(cert_sha256)
}

/// A trust association together with the job summary it was built from.
#[derive(Debug, Default)]
pub struct TrustedListsSnapshot {
    /// Certificate fingerprint to trust properties association.
    pub properties: Arc<TrustPropertiesMap>,

    /// Summary of the job run that published this snapshot.
    pub summary: Option<Arc<TlValidationJobSummary>>,
}

/// Live certificate trust store fed by trusted lists.
///
/// Readers always get a complete association and its matching summary: a
/// synchronization builds the new snapshot on the side and swaps it in.
#[derive(Debug, Default)]
pub struct TrustedListsCertificateSource {
    published: RwLock<Arc<TrustedListsSnapshot>>,
}

impl TrustedListsCertificateSource {
    /// Returns an empty trust store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the currently published snapshot.
    pub fn published(&self) -> Arc<TrustedListsSnapshot> {
        self.published
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the currently published association.
    pub fn snapshot(&self) -> Arc<TrustPropertiesMap> {
        self.published().properties.clone()
    }

    /// Returns the last published job summary.
    pub fn summary(&self) -> Option<Arc<TlValidationJobSummary>> {
        self.published().summary.clone()
    }

    /// Replaces the published snapshot in a single swap.
    ///
    /// `None` keeps the current value of that part.
    pub fn publish(
        &self,
        properties: Option<TrustPropertiesMap>,
        summary: Option<Arc<TlValidationJobSummary>>,
    ) {
        let mut published = self
            .published
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let properties = properties.map_or_else(|| published.properties.clone(), Arc::new);
        let summary = summary.or_else(|| published.summary.clone());
        *published = Arc::new(TrustedListsSnapshot {
            properties,
            summary,
        });
    }

    /// Returns the trust properties of the certificate with this
    /// fingerprint.
    pub fn trust_properties(&self, fingerprint: &str) -> Vec<TrustProperties> {
        self.snapshot()
            .get(fingerprint)
            .cloned()
            .unwrap_or_default()
    }

    /// Returns `true` if the certificate with this fingerprint is listed.
    pub fn is_trusted(&self, fingerprint: &str) -> bool {
        self.snapshot().contains_key(fingerprint)
    }

    /// Returns the number of listed certificates.
    pub fn number_of_certificates(&self) -> usize {
        self.snapshot().len()
    }
}
