//! Random identifier generation.
//!
//! UUIDs come from [`uuid`]. National ID and Iqama numbers are ten digits: a
//! leading digit (`1` for citizens, `2` for residents), eight random digits
//! and a Luhn check digit over the first nine. Passport and phone numbers are
//! format-only test values with no checksum.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CodecError;

/// Largest batch produced by one call.
pub const MAX_UUIDS: usize = 100;

/// Largest batch produced by [`generate_ids`].
pub const MAX_IDS: usize = 100;

/// Length of a national ID or Iqama number.
pub const ID_LEN: usize = 10;

const PASSPORT_COUNTRIES: [&str; 10] = ["US", "UK", "FR", "DE", "IN", "CN", "JP", "BR", "EG", "PK"];
const PASSPORT_CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Generate `count` random version 4 UUIDs. `count` is clamped to
/// `1..=MAX_UUIDS`.
pub fn generate_uuids(count: usize) -> Vec<Uuid> {
    let count = count.clamp(1, MAX_UUIDS);
    (0..count).map(|_| Uuid::new_v4()).collect()
}

/// Kind of personal identity document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IdKind {
    #[serde(rename = "NID")]
    NationalId,
    Iqama,
    Passport,
}

impl IdKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::NationalId => "nid",
            Self::Iqama => "iqama",
            Self::Passport => "passport",
        }
    }

    /// Generate a random identifier of this kind.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        match self {
            Self::NationalId => generate_national_id(rng),
            Self::Iqama => generate_iqama_id(rng),
            Self::Passport => generate_passport_id(rng),
        }
    }

    /// Check the format (and checksum, where one exists) of `id`.
    pub fn validate(&self, id: &str) -> bool {
        match self {
            Self::NationalId => validate_national_id(id),
            Self::Iqama => validate_iqama_id(id),
            Self::Passport => is_passport_id(id),
        }
    }
}

impl fmt::Display for IdKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for IdKind {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nid" | "national" | "national-id" => Ok(Self::NationalId),
            "iqama" => Ok(Self::Iqama),
            "passport" => Ok(Self::Passport),
            _ => Err(CodecError::UnknownIdKind(s.to_string())),
        }
    }
}

/// Generate `count` identifiers of `kind`, clamped to `1..=MAX_IDS`.
pub fn generate_ids<R: Rng + ?Sized>(rng: &mut R, kind: IdKind, count: usize) -> Vec<String> {
    (0..count.clamp(1, MAX_IDS)).map(|_| kind.generate(rng)).collect()
}

/// Luhn check digit for nine leading digits.
///
/// Digits at even positions (0, 2, 4, ...) are doubled, with 9 subtracted
/// from two-digit products.
pub fn luhn_check_digit(digits: &[u8; 9]) -> u8 {
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, &d)| {
            let d = u32::from(d);
            if i % 2 == 0 {
                let doubled = d * 2;
                if doubled > 9 { doubled - 9 } else { doubled }
            } else {
                d
            }
        })
        .sum();
    ((10 - sum % 10) % 10) as u8
}

/// Returns `true` if `id` is ten ASCII digits whose last digit is the Luhn
/// check digit of the first nine.
pub fn validate_luhn(id: &str) -> bool {
    let bytes = id.as_bytes();
    if bytes.len() != ID_LEN || !bytes.iter().all(u8::is_ascii_digit) {
        return false;
    }
    let mut head = [0u8; 9];
    for (slot, b) in head.iter_mut().zip(bytes) {
        *slot = b - b'0';
    }
    luhn_check_digit(&head) == bytes[9] - b'0'
}

/// Random citizen national ID: starts with `1`, Luhn-checked.
pub fn generate_national_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    generate_luhn_id(rng, 1)
}

/// Random resident (Iqama) ID: starts with `2`, Luhn-checked.
pub fn generate_iqama_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    generate_luhn_id(rng, 2)
}

pub fn validate_national_id(id: &str) -> bool {
    id.starts_with('1') && validate_luhn(id)
}

pub fn validate_iqama_id(id: &str) -> bool {
    id.starts_with('2') && validate_luhn(id)
}

fn generate_luhn_id<R: Rng + ?Sized>(rng: &mut R, lead: u8) -> String {
    let mut head = [0u8; 9];
    head[0] = lead;
    for digit in &mut head[1..] {
        *digit = rng.gen_range(0..10);
    }
    let check = luhn_check_digit(&head);
    head.iter()
        .chain(std::iter::once(&check))
        .map(|d| char::from(b'0' + d))
        .collect()
}

/// Random passport number: a two-letter country code followed by seven
/// uppercase alphanumerics.
pub fn generate_passport_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut id = String::from(PASSPORT_COUNTRIES[rng.gen_range(0..PASSPORT_COUNTRIES.len())]);
    for _ in 0..7 {
        id.push(char::from(PASSPORT_CHARS[rng.gen_range(0..PASSPORT_CHARS.len())]));
    }
    id
}

fn is_passport_id(id: &str) -> bool {
    id.len() == 9
        && id.as_bytes()[..2].iter().all(u8::is_ascii_uppercase)
        && id.as_bytes()[2..].iter().all(|b| PASSPORT_CHARS.contains(b))
}

/// Random mobile number: `05` followed by eight digits.
pub fn generate_phone_number<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut phone = String::from("05");
    for _ in 0..8 {
        phone.push(char::from(b'0' + rng.gen_range(0..10u8)));
    }
    phone
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn count_is_clamped() {
        assert_eq!(generate_uuids(0).len(), 1);
        assert_eq!(generate_uuids(5).len(), 5);
        assert_eq!(generate_uuids(1_000).len(), MAX_UUIDS);
    }

    #[test]
    fn uuids_are_v4_and_unique() {
        let ids = generate_uuids(50);
        assert!(ids.iter().all(|id| id.get_version_num() == 4));
        let unique: HashSet<_> = ids.iter().collect();
        assert_eq!(unique.len(), ids.len());
    }

    #[test]
    fn hyphenated_form() {
        let id = generate_uuids(1)[0].to_string();
        assert_eq!(id.len(), 36);
        assert_eq!(id.matches('-').count(), 4);
    }

    #[test]
    fn luhn_known_values() {
        // 1 0 0 0 0 0 0 0 0: doubled positions give 2, sum 2, check 8.
        assert_eq!(luhn_check_digit(&[1, 0, 0, 0, 0, 0, 0, 0, 0]), 8);
        assert_eq!(luhn_check_digit(&[0; 9]), 0);
        // 9 -> 18 -> 9 at every even position: 5 * 9 = 45, odd positions 0.
        assert_eq!(luhn_check_digit(&[9, 0, 9, 0, 9, 0, 9, 0, 9]), 5);

        assert!(validate_luhn("1000000008"));
        assert!(!validate_luhn("1000000007"));
        assert!(!validate_luhn("100000008"));
        assert!(!validate_luhn("10000000a8"));
    }

    #[test]
    fn generated_ids_validate() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let nid = generate_national_id(&mut rng);
            assert_eq!(nid.len(), ID_LEN);
            assert!(validate_national_id(&nid), "{nid}");
            assert!(!validate_iqama_id(&nid));

            let iqama = generate_iqama_id(&mut rng);
            assert!(validate_iqama_id(&iqama), "{iqama}");
            assert!(!validate_national_id(&iqama));
        }
    }

    #[test]
    fn passport_and_phone_formats() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..50 {
            let passport = generate_passport_id(&mut rng);
            assert!(PASSPORT_COUNTRIES.contains(&&passport[..2]), "{passport}");
            assert!(IdKind::Passport.validate(&passport));

            let phone = generate_phone_number(&mut rng);
            assert_eq!(phone.len(), 10);
            assert!(phone.starts_with("05"));
            assert!(phone.bytes().all(|b| b.is_ascii_digit()));
        }
    }

    #[test]
    fn batches_are_clamped_and_valid() {
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(generate_ids(&mut rng, IdKind::Iqama, 0).len(), 1);
        let ids = generate_ids(&mut rng, IdKind::NationalId, 500);
        assert_eq!(ids.len(), MAX_IDS);
        assert!(ids.iter().all(|id| IdKind::NationalId.validate(id)));
    }

    #[test]
    fn id_kind_names() {
        assert_eq!("NID".parse::<IdKind>().unwrap(), IdKind::NationalId);
        assert_eq!("iqama".parse::<IdKind>().unwrap(), IdKind::Iqama);
        assert_eq!("Passport".parse::<IdKind>().unwrap(), IdKind::Passport);
        assert!("visa".parse::<IdKind>().is_err());
        for kind in [IdKind::NationalId, IdKind::Iqama, IdKind::Passport] {
            assert_eq!(kind.to_string().parse::<IdKind>().unwrap(), kind);
        }
    }
}
