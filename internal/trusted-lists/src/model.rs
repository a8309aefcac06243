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

//! Parsed and validated trusted-list content.
//!
//! These types are produced by the external download, parse and validate
//! pipeline (see [`TrustedListLoader`](crate::TrustedListLoader)) and consumed
//! by the synchronizer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One entry of a trust service's status history.
#[derive(Clone, Debug, Deserialize, Eq, Ord, PartialEq, PartialOrd, Serialize)]
pub struct TrustServiceStatus {
    /// Service type identifier (for example a CA/QC URI).
    pub service_type: String,

    /// Service status identifier (for example `granted` or `withdrawn`).
    pub status: String,

    /// Start of the period during which this status applies.
    pub start_date: DateTime<Utc>,

    /// End of the period, if a later status superseded this one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,

    /// Additional service information URIs.
    #[serde(default)]
    pub additional_service_info: Vec<String>,

    /// Date from which the service keeps revocation information about
    /// expired certificates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expired_certs_revocation_info: Option<DateTime<Utc>>,
}

/// A trust service and the certificates that identify it.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct TrustService {
    /// Service names.
    pub names: Vec<String>,

    /// Service digital identities, DER encoded.
    pub certificates: Vec<Vec<u8>>,

    /// Status history, most recent first.
    pub status_history: Vec<TrustServiceStatus>,
}

/// A trust service provider listed on a trusted list.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct TrustServiceProvider {
    /// Provider names.
    pub names: Vec<String>,

    /// Provider trade names.
    #[serde(default)]
    pub trade_names: Vec<String>,

    /// Services operated by the provider.
    pub services: Vec<TrustService>,
}

/// Result of parsing a trusted list or list of trusted lists.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct ParsingInfo {
    /// TSL sequence number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence_number: Option<u32>,

    /// Scheme territory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub territory: Option<String>,

    /// List issue date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue_date: Option<DateTime<Utc>>,

    /// Date of the next scheduled update.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_update: Option<DateTime<Utc>>,

    /// Listed trust service providers.
    #[serde(default)]
    pub trust_service_providers: Vec<TrustServiceProvider>,

    /// URLs of the trusted lists referenced by a list of trusted lists.
    #[serde(default)]
    pub tl_pointers: Vec<String>,
}

/// Indication produced by the validation of a trusted-list signature.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignatureIndication {
    /// The signature is valid.
    TotalPassed,

    /// The signature could not be validated.
    Indeterminate,

    /// The signature is invalid.
    TotalFailed,
}

/// Result of validating the signature of a trusted list.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ValidationInfo {
    /// Signature validation indication.
    pub indication: SignatureIndication,

    /// Claimed signing time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signing_time: Option<DateTime<Utc>>,

    /// Certificate that signed the list, DER encoded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signing_certificate: Option<Vec<u8>>,
}

impl ValidationInfo {
    /// Returns a validation result with the given indication and no further
    /// details.
    pub fn new(indication: SignatureIndication) -> Self {
        Self {
            indication,
            signing_time: None,
            signing_certificate: None,
        }
    }

    /// Returns `true` if the list signature is valid.
    pub fn is_valid(&self) -> bool {
        self.indication == SignatureIndication::TotalPassed
    }
}

/// Trust-service metadata that justifies trusting a certificate.
#[derive(Clone, Debug, Deserialize, Eq, Ord, PartialEq, PartialOrd, Serialize)]
pub struct TrustProperties {
    /// URL of the list of trusted lists the trusted list came from, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lotl_url: Option<String>,

    /// URL of the trusted list.
    pub tl_url: String,

    /// Names of the trust service provider.
    pub provider_names: Vec<String>,

    /// Names of the trust service.
    pub service_names: Vec<String>,

    /// Status history of the trust service.
    pub status_history: Vec<TrustServiceStatus>,
}

impl TrustProperties {
    /// Returns the most recent status entry, if any.
    pub fn current_status(&self) -> Option<&TrustServiceStatus> {
        self.status_history.first()
    }
}
