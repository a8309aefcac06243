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

//! Settings of a validation run.
//!
//! Settings are loaded from TOML or JSON. A partial document is merged over
//! the defaults (or over the settings it updates), so only the values that
//! differ need to be given.
//!
//! ```
//! use ltv::{policy::Level, settings::Settings};
//!
//! let settings = Settings::new()
//!     .with_toml(
//!         r#"
//!         [validation]
//!         max_revocation_depth = 4
//!
//!         [policy.signing_certificate]
//!         not_on_hold = "WARN"
//!         "#,
//!     )
//!     .unwrap();
//!
//! assert_eq!(settings.validation.max_revocation_depth, 4);
//! assert_eq!(settings.policy.signing_certificate.not_on_hold, Some(Level::Warn));
//! ```

use std::{collections::BTreeSet, sync::Arc};

use config::{Config, FileFormat};
use ltv_trusted_lists::{
    cert_fingerprint, AcceptAllStrategy, ExpirationAndSignatureCheckStrategy, LotlSource,
    SynchronizationStrategy, TlSource, TlValidationJob, TrustedListsCertificateSource,
};
use serde_derive::{Deserialize, Serialize};

use crate::{
    policy::ValidationPolicy, process::DEFAULT_MAX_REVOCATION_DEPTH, Error, Result,
};

const VERSION: u32 = 1;

// validates user supplied configurations
pub(crate) trait SettingsValidate {
    // returns error if settings are invalid
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

/// Trust anchors configured in addition to trusted lists.
#[cfg_attr(feature = "json_schema", derive(schemars::JsonSchema), schemars(default))]
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Trust {
    /// Trust anchor certificates as a PEM bundle.
    pub trust_anchors: Option<String>,
}

impl Trust {
    // load PEMs
    fn load_trust_from_data(&self, trust_data: &[u8]) -> Result<Vec<Vec<u8>>> {
        let mut certs = Vec::new();

        // allow for JSON-encoded PEMs with \n
        let trust_data = String::from_utf8_lossy(trust_data)
            .replace("\\n", "\n")
            .into_bytes();
        for pem_result in x509_parser::pem::Pem::iter_from_buffer(&trust_data) {
            let pem = pem_result.map_err(|e| Error::InvalidCertificate(e.to_string()))?;
            certs.push(pem.contents);
        }
        Ok(certs)
    }

    /// Returns the fingerprints of the configured trust anchors.
    pub fn anchor_fingerprints(&self) -> Result<BTreeSet<String>> {
        let Some(anchors) = &self.trust_anchors else {
            return Ok(BTreeSet::new());
        };
        Ok(self
            .load_trust_from_data(anchors.as_bytes())?
            .iter()
            .map(|der| cert_fingerprint(der))
            .collect())
    }
}

impl SettingsValidate for Trust {
    fn validate(&self) -> Result<()> {
        if let Some(anchors) = &self.trust_anchors {
            if self.load_trust_from_data(anchors.as_bytes())?.is_empty() {
                return Err(Error::InvalidCertificate(
                    "trust_anchors contains no certificate".into(),
                ));
            }
        }
        Ok(())
    }
}

/// Settings of the validation processes.
#[cfg_attr(feature = "json_schema", derive(schemars::JsonSchema), schemars(default))]
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct Validation {
    /// Bound on nested revocation acceptance.
    pub max_revocation_depth: usize,

    /// Add a proof of existence for the objects covered by every
    /// time-stamp that validates.
    pub extract_poe_from_timestamps: bool,

    /// Run past signature validation when the present-time verdict is not
    /// `PASSED`.
    pub past_signature_validation: bool,
}

impl Default for Validation {
    fn default() -> Self {
        Self {
            max_revocation_depth: DEFAULT_MAX_REVOCATION_DEPTH,
            extract_poe_from_timestamps: true,
            past_signature_validation: true,
        }
    }
}

impl SettingsValidate for Validation {
    fn validate(&self) -> Result<()> {
        if self.max_revocation_depth == 0 {
            return Err(Error::BadParam(
                "max_revocation_depth must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Synchronization strategy of the trusted-list job.
#[cfg_attr(feature = "json_schema", derive(schemars::JsonSchema))]
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrustListStrategy {
    /// Synchronize every list.
    AcceptAll,

    /// Skip expired lists and lists whose signature did not validate.
    #[default]
    ExpirationAndSignatureCheck,
}

/// Settings of the trusted-list job.
#[cfg_attr(feature = "json_schema", derive(schemars::JsonSchema), schemars(default))]
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct TrustLists {
    /// Synchronization strategy.
    pub strategy: TrustListStrategy,

    /// With [`TrustListStrategy::ExpirationAndSignatureCheck`],
    /// synchronize lists whose next update has passed.
    pub accept_expired_trusted_list: bool,

    /// With [`TrustListStrategy::ExpirationAndSignatureCheck`],
    /// synchronize lists whose signature did not validate.
    pub accept_invalid_trusted_list: bool,

    /// Drop the cache entries of sources removed from the configuration.
    pub clean_memory: bool,

    /// Dump the job summary to the debug log.
    pub debug: bool,

    /// URLs of the lists of trusted lists.
    pub lotl_sources: Vec<String>,

    /// URLs of trusted lists configured on their own.
    pub tl_sources: Vec<String>,
}

impl Default for TrustLists {
    fn default() -> Self {
        Self {
            strategy: TrustListStrategy::default(),
            accept_expired_trusted_list: false,
            accept_invalid_trusted_list: false,
            clean_memory: true,
            debug: false,
            lotl_sources: Vec::new(),
            tl_sources: Vec::new(),
        }
    }
}

impl TrustLists {
    /// Returns the configured synchronization strategy.
    pub fn synchronization_strategy(&self) -> Box<dyn SynchronizationStrategy> {
        match self.strategy {
            TrustListStrategy::AcceptAll => Box::new(AcceptAllStrategy),
            TrustListStrategy::ExpirationAndSignatureCheck => Box::new(
                ExpirationAndSignatureCheckStrategy::new()
                    .accept_expired_trusted_list(self.accept_expired_trusted_list)
                    .accept_invalid_trusted_list(self.accept_invalid_trusted_list),
            ),
        }
    }

    /// Returns a job that feeds `source` with the configured lists.
    pub fn job(&self, source: Arc<TrustedListsCertificateSource>) -> TlValidationJob {
        TlValidationJob::new(source)
            .with_lotl_sources(
                self.lotl_sources
                    .iter()
                    .map(|url| LotlSource { url: url.clone() })
                    .collect(),
            )
            .with_tl_sources(
                self.tl_sources
                    .iter()
                    .map(|url| TlSource { url: url.clone() })
                    .collect(),
            )
            .with_strategy(self.synchronization_strategy())
            .with_clean_memory(self.clean_memory)
            .with_debug(self.debug)
    }
}

impl SettingsValidate for TrustLists {
    fn validate(&self) -> Result<()> {
        let mut seen = BTreeSet::new();
        for url in self.lotl_sources.iter().chain(self.tl_sources.iter()) {
            if !seen.insert(url.as_str()) {
                return Err(Error::BadParam(format!(
                    "trusted list source {url} is configured more than once"
                )));
            }
        }
        Ok(())
    }
}

impl SettingsValidate for ValidationPolicy {
    fn validate(&self) -> Result<()> {
        for rule in &self.cryptographic.encryption_algorithms {
            if rule.min_key_size == 0 {
                return Err(Error::BadParam(format!(
                    "minimum key size of {} must be positive",
                    rule.algorithm
                )));
            }
        }
        for constraints in [&self.signing_certificate, &self.ca_certificate] {
            if let Some(freshness) = &constraints.revocation_freshness {
                if freshness.max_age_seconds.is_some_and(|age| age < 0) {
                    return Err(Error::BadParam(
                        "revocation freshness max_age_seconds must not be negative".into(),
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Settings of the validation engine.
#[cfg_attr(feature = "json_schema", derive(schemars::JsonSchema), schemars(default))]
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Version of the settings format.
    pub version: u32,

    /// Configured trust anchors.
    pub trust: Trust,

    /// Validation processes.
    pub validation: Validation,

    /// Trusted-list job.
    pub trust_lists: TrustLists,

    /// Validation policy.
    pub policy: ValidationPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            version: VERSION,
            trust: Trust::default(),
            validation: Validation::default(),
            trust_lists: TrustLists::default(),
            policy: ValidationPolicy::default(),
        }
    }
}

impl SettingsValidate for Settings {
    fn validate(&self) -> Result<()> {
        if self.version > VERSION {
            return Err(Error::BadParam(format!(
                "settings version {} is not supported",
                self.version
            )));
        }
        self.trust.validate()?;
        self.validation.validate()?;
        self.trust_lists.validate()?;
        self.policy.validate()
    }
}

fn file_format(format: &str) -> Result<FileFormat> {
    match format.to_lowercase().as_str() {
        "json" => Ok(FileFormat::Json),
        "toml" => Ok(FileFormat::Toml),
        _ => Err(Error::UnsupportedType),
    }
}

impl Settings {
    /// Returns the default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads settings from a `json` or `toml` string, merged over the
    /// defaults.
    pub fn from_string(settings_str: &str, format: &str) -> Result<Self> {
        let mut settings = Self::default();
        settings.update_from_str(settings_str, format)?;
        Ok(settings)
    }

    /// Loads settings from a TOML string, merged over the defaults.
    pub fn from_toml(toml: &str) -> Result<Self> {
        Self::from_string(toml, "toml")
    }

    /// Loads settings from a JSON string, merged over the defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_string(json, "json")
    }

    /// Merges a `json` or `toml` string over these settings.
    ///
    /// The settings are left unchanged if the result does not validate.
    pub fn update_from_str(&mut self, settings_str: &str, format: &str) -> Result<()> {
        let file_format = file_format(format)?;

        let current_config = Config::try_from(&*self)
            .map_err(|e| Error::BadParam(format!("could not convert settings: {e}")))?;

        // merge overrides, allows for partial changes
        let merged_config = Config::builder()
            .add_source(current_config)
            .add_source(config::File::from_str(settings_str, file_format))
            .build()
            .map_err(|e| Error::BadParam(format!("could not merge configuration: {e}")))?;

        let updated_settings = merged_config.try_deserialize::<Settings>()?;
        updated_settings.validate()?;

        *self = updated_settings;
        Ok(())
    }

    /// Returns these settings merged with a JSON string.
    pub fn with_json(self, json: &str) -> Result<Self> {
        self.with_string(json, "json")
    }

    /// Returns these settings merged with a TOML string.
    pub fn with_toml(self, toml: &str) -> Result<Self> {
        self.with_string(toml, "toml")
    }

    fn with_string(mut self, settings_str: &str, format: &str) -> Result<Self> {
        self.update_from_str(settings_str, format)?;
        Ok(self)
    }
}
