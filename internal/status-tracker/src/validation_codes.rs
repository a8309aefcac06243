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

//! Names of the checks recorded by the validation engine.
//!
//! Each constant is used as the `label` of the [`LogItem`](crate::LogItem)
//! written when the corresponding check is evaluated.

// -- signature --

/// Is the signing certificate identified?
pub const SIGNING_CERTIFICATE_KNOWN: &str = "signature.signingCertificate.known";

/// Is the signature value cryptographically intact?
pub const SIGNATURE_INTACT: &str = "signature.intact";

/// Does the timestamp message imprint match the timestamped data?
pub const MESSAGE_IMPRINT_INTACT: &str = "timestamp.messageImprint.intact";

// -- certificate --

/// Does the certificate chain end in a trust anchor?
pub const PROSPECTIVE_CHAIN: &str = "certificate.prospectiveChain";

/// Is the certificate signature intact?
pub const CERTIFICATE_SIGNATURE_INTACT: &str = "certificate.signature.intact";

/// Is the certificate within its validity range at the validation time?
pub const CERTIFICATE_VALIDITY_RANGE: &str = "certificate.validityRange";

/// Do the validity ranges of the chain certificates intersect?
pub const CERTIFICATE_VALIDITY_INTERSECTION: &str = "certificate.validityIntersection";

/// Is revocation data required for the certificate?
pub const REVOCATION_DATA_REQUIRED: &str = "certificate.revocation.required";

/// Is the certificate not revoked?
pub const CERTIFICATE_NOT_REVOKED: &str = "certificate.notRevoked";

/// Is the certificate not on hold?
pub const CERTIFICATE_NOT_ON_HOLD: &str = "certificate.notOnHold";

/// Is the revocation data of the certificate fresh?
pub const REVOCATION_FRESH: &str = "certificate.revocation.fresh";

/// Are the cryptographic constraints met?
pub const CRYPTOGRAPHIC_CONSTRAINTS: &str = "cryptographic.constraints";

// -- revocation acceptance --

/// Is the revocation data known?
pub const REVOCATION_KNOWN: &str = "revocation.known";

/// Is the revocation issuer known?
pub const REVOCATION_ISSUER_KNOWN: &str = "revocation.issuer.known";

/// Does the revocation issuer chain end in a trust anchor?
pub const REVOCATION_ISSUER_CHAIN: &str = "revocation.issuer.prospectiveChain";

/// Is the revocation signature intact?
pub const REVOCATION_SIGNATURE_INTACT: &str = "revocation.signature.intact";

/// Is the thisUpdate field present?
pub const REVOCATION_THIS_UPDATE_PRESENT: &str = "revocation.thisUpdate.present";

/// Was the OCSP responder certificate valid when the response was produced?
pub const OCSP_ISSUER_VALID_AT_PRODUCTION: &str = "revocation.ocsp.issuerValidAtProduction";

/// Does the OCSP responder id match the responder certificate?
pub const OCSP_RESPONDER_ID_MATCH: &str = "revocation.ocsp.responderIdMatch";

/// Does the OCSP certHash extension match the certificate, when present?
pub const OCSP_CERT_HASH_MATCH: &str = "revocation.ocsp.certHashMatch";

/// Is the OCSP response not self-issued by the certificate it concerns?
pub const OCSP_NOT_SELF_ISSUED: &str = "revocation.ocsp.notSelfIssued";

/// Was the revocation issued after the certificate?
pub const REVOCATION_AFTER_CERTIFICATE_ISSUANCE: &str = "revocation.afterCertificateIssuance";

/// Does the revocation carry information about the certificate?
pub const REVOCATION_CONCERNS_CERTIFICATE: &str = "revocation.concernsCertificate";

/// Is acceptable revocation data present for the revocation issuer chain?
pub const REVOCATION_ISSUER_REVOCATION_ACCEPTABLE: &str = "revocation.issuer.revocationAcceptable";

/// Is the revocation consistent with the certificate validity range?
pub const REVOCATION_CONSISTENT: &str = "revocation.consistent";

/// Was the revocation issued before the control time?
pub const REVOCATION_ISSUED_BEFORE_CONTROL_TIME: &str = "revocation.issuedBeforeControlTime";

/// Is the revocation issuer trusted, or does a POE exist within its validity?
pub const REVOCATION_ISSUER_TRUSTED_OR_POE: &str = "revocation.issuer.trustedOrPoe";

/// Is the candidate revocation acceptable?
pub const REVOCATION_ACCEPTABLE: &str = "revocation.acceptable";

/// Is acceptable revocation data available?
pub const ACCEPTABLE_REVOCATION_AVAILABLE: &str = "revocation.acceptableAvailable";

// -- proof of existence and past validation --

/// Does a POE exist for the certificate at the control time?
pub const POE_CERTIFICATE_EXISTS: &str = "poe.certificate.exists";

/// Does a POE exist for the revocation at the control time?
pub const POE_REVOCATION_EXISTS: &str = "poe.revocation.exists";

/// Does a POE exist for the signature at the control time?
pub const POE_SIGNATURE_EXISTS: &str = "poe.signature.exists";

/// The control time was moved to an earlier instant.
pub const CONTROL_TIME_SLID: &str = "vts.controlTime.slid";

/// Did validation time sliding conclude successfully?
pub const VALIDATION_TIME_SLIDING: &str = "pcv.validationTimeSliding";

/// Did past certificate validation conclude successfully?
pub const PAST_CERTIFICATE_VALIDATION: &str = "psv.pastCertificateValidation";

/// Is the best signature time not before the certificate issuance?
pub const BEST_SIGNATURE_TIME_NOT_BEFORE_ISSUANCE: &str = "psv.bestSignatureTime.notBeforeIssuance";

/// Is the best signature time before the certificate expiration?
pub const BEST_SIGNATURE_TIME_BEFORE_EXPIRATION: &str = "psv.bestSignatureTime.beforeExpiration";

/// Was the revocation evidence produced after the best signature time?
pub const REVOCATION_AFTER_BEST_SIGNATURE_TIME: &str = "psv.revocationAfterBestSignatureTime";

/// Were the algorithms acceptable when POE for the material existed?
pub const CRYPTOGRAPHIC_CONSTRAINTS_AT_POE: &str = "psv.cryptographic.atPoe";

/// Is the revocation fresh at the best signature time?
pub const REVOCATION_FRESH_AT_BEST_SIGNATURE_TIME: &str = "psv.revocationFreshAtBestSignatureTime";

/// Is the present-time indication acceptable?
pub const CURRENT_TIME_INDICATION: &str = "psv.currentTimeIndication";
