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

//! Concrete checks evaluated by the validation chains.

mod certificate;
pub use certificate::{
    AcceptableRevocationAvailable, CertificateNotOnHold, CertificateNotRevoked,
    CertificateSignatureIntact, CertificateValidityRange, ProspectiveChain, ValidityIntersection,
};

mod crypto;
pub use crypto::CryptographicCheck;

mod past;
pub use past::{
    BestSignatureTimeBeforeExpiration, BestSignatureTimeNotBeforeIssuance, ConclusionCheck,
};

mod poe;
pub use poe::PoeExists;

mod revocation;
pub use revocation::{
    OcspCertHashMatch, OcspIssuerValidAtProduction, OcspNotSelfIssued, OcspResponderIdMatch,
    RevocationAfterCertificateIssuance, RevocationConcernsCertificate, RevocationConsistent,
    RevocationIssuedBeforeControlTime, RevocationIssuerChain, RevocationIssuerKnown,
    RevocationIssuerRevocationAcceptable, RevocationIssuerTrustedOrPoe, RevocationKnown,
    RevocationSignatureIntact, ThisUpdatePresent,
};

mod signature;
pub use signature::{MessageImprintIntact, SignatureIntact, SigningCertificateKnown};
