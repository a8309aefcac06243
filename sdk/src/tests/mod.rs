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

mod basic;
mod poe;
mod psv;
mod rfc;
mod settings;

pub(crate) mod fixtures {
    use chrono::{DateTime, Duration, TimeZone, Utc};

    use crate::diagnostic::{
        CertificateRevocation, CertificateToken, DiagnosticData, RevocationToken, SignatureToken,
    };

    pub(crate) fn date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
    }

    /// Trusted self-signed certificate valid from 2020 to 2040.
    pub(crate) fn root(id: &str) -> CertificateToken {
        CertificateToken::new(id, date(2020, 1, 1), date(2040, 1, 1))
            .trusted()
            .self_signed()
    }

    /// Certificate valid during 2024.
    pub(crate) fn leaf(id: &str, issuer: &str) -> CertificateToken {
        CertificateToken::new(id, date(2024, 1, 1), date(2024, 12, 31)).signed_by(issuer)
    }

    /// CRL valid for thirty days from `this_update`.
    pub(crate) fn crl(id: &str, issuer: &str, this_update: DateTime<Utc>) -> RevocationToken {
        RevocationToken::crl(id, this_update)
            .with_next_update(this_update + Duration::days(30))
            .signed_by(issuer)
    }

    /// `SIG` signed by `C`, issued by trusted `ROOT`. `CRL-C` reports `C`
    /// good on 2024-06-15; validation happens on 2024-06-20.
    pub(crate) fn simple_signature() -> DiagnosticData {
        DiagnosticData::new(date(2024, 6, 20))
            .with_certificate(root("ROOT"))
            .with_certificate(
                leaf("C", "ROOT").with_revocation(CertificateRevocation::good("CRL-C")),
            )
            .with_revocation(crl("CRL-C", "ROOT", date(2024, 6, 15)))
            .with_signature(SignatureToken::new("SIG").signed_by("C"))
    }
}
