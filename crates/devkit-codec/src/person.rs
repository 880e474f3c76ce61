//! Fake person records for test data.
//!
//! Names are drawn from small Arabic tables, each entry paired with its
//! English transliteration, so both renderings of a generated name always
//! agree. Identity numbers come from [`crate::ids`].

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::CodecError;
use crate::ids::{generate_phone_number, IdKind};

/// Largest batch produced by [`generate_people`].
pub const MAX_PEOPLE: usize = 100;

/// Youngest and oldest generated ages, in years.
pub const AGE_RANGE: (i32, i32) = (18, 70);

type NamePair = (&'static str, &'static str);

const FIRST_NAMES_MALE: [NamePair; 10] = [
    ("محمد", "Mohammed"),
    ("أحمد", "Ahmed"),
    ("عبدالله", "Abdullah"),
    ("سعود", "Saud"),
    ("فهد", "Fahad"),
    ("خالد", "Khalid"),
    ("عبدالعزيز", "Abdulaziz"),
    ("سلمان", "Salman"),
    ("عمر", "Omar"),
    ("علي", "Ali"),
];

const FIRST_NAMES_FEMALE: [NamePair; 10] = [
    ("نورة", "Noura"),
    ("سارة", "Sara"),
    ("فاطمة", "Fatima"),
    ("عائشة", "Aisha"),
    ("منيرة", "Munira"),
    ("هيا", "Haya"),
    ("الجوهرة", "Aljohara"),
    ("ريم", "Reem"),
    ("لطيفة", "Latifa"),
    ("مها", "Maha"),
];

const SECOND_NAMES_MALE: [NamePair; 10] = [
    ("عبدالرحمن", "Abdulrahman"),
    ("عبدالعزيز", "Abdulaziz"),
    ("عبدالله", "Abdullah"),
    ("سلطان", "Sultan"),
    ("فيصل", "Faisal"),
    ("ناصر", "Nasser"),
    ("سعد", "Saad"),
    ("بندر", "Bandar"),
    ("تركي", "Turki"),
    ("ماجد", "Majid"),
];

// A woman's second name is her father's first name.
const SECOND_NAMES_FEMALE: [NamePair; 10] = [
    ("محمد", "Mohammed"),
    ("عبدالله", "Abdullah"),
    ("عبدالرحمن", "Abdulrahman"),
    ("سعود", "Saud"),
    ("فهد", "Fahad"),
    ("خالد", "Khalid"),
    ("عبدالعزيز", "Abdulaziz"),
    ("سلمان", "Salman"),
    ("عمر", "Omar"),
    ("علي", "Ali"),
];

const THIRD_NAMES: [NamePair; 10] = [
    ("سعود", "Saud"),
    ("فهد", "Fahad"),
    ("خالد", "Khalid"),
    ("ناصر", "Nasser"),
    ("سعد", "Saad"),
    ("بندر", "Bandar"),
    ("تركي", "Turki"),
    ("ماجد", "Majid"),
    ("فيصل", "Faisal"),
    ("عادل", "Adel"),
];

const FAMILY_NAMES: [NamePair; 10] = [
    ("الشمري", "AlShammari"),
    ("العتيبي", "AlOtaibi"),
    ("القحطاني", "AlQahtani"),
    ("الدوسري", "AlDossari"),
    ("المطيري", "AlMutairi"),
    ("الحربي", "AlHarbi"),
    ("السبيعي", "AlSubaie"),
    ("الغامدي", "AlGhamdi"),
    ("الزهراني", "AlZahrani"),
    ("العنزي", "AlAnazi"),
];

const EMAIL_DOMAINS: [&str; 5] = ["gmail.com", "hotmail.com", "yahoo.com", "outlook.com", "example.com"];

const ADDRESSES: [NamePair; 5] = [
    ("الرياض، حي الملز، شارع الأمير ناصر", "Riyadh, Al Malaz, Prince Nasser St"),
    ("جدة، حي الروضة، شارع فلسطين", "Jeddah, Al Rawdah, Palestine St"),
    ("الدمام، حي الشاطئ، شارع الأمير محمد", "Dammam, Al Shati, Prince Mohammed St"),
    ("مكة المكرمة، حي العزيزية، شارع الملك فهد", "Makkah, Al Aziziyah, King Fahad St"),
    ("المدينة المنورة، حي قباء، شارع أبي ذر الغفاري", "Madinah, Quba, Abu Dhar Al Ghafari St"),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Nationality {
    Saudi,
    #[serde(rename = "Non-Saudi")]
    NonSaudi,
}

impl fmt::Display for Nationality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Saudi => f.write_str("saudi"),
            Self::NonSaudi => f.write_str("non-saudi"),
        }
    }
}

impl FromStr for Nationality {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "saudi" => Ok(Self::Saudi),
            "non-saudi" | "nonsaudi" | "resident" => Ok(Self::NonSaudi),
            _ => Err(CodecError::UnknownNationality(s.to_string())),
        }
    }
}

/// A four-part name: given name, father's, grandfather's and family name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Name {
    pub first_name: String,
    pub second_name: String,
    pub last_name: String,
    pub family_name: String,
    pub full_name: String,
}

impl Name {
    fn from_parts(parts: [&str; 4]) -> Self {
        let [first, second, last, family] = parts;
        Self {
            first_name: first.to_string(),
            second_name: second.to_string(),
            last_name: last.to_string(),
            family_name: family.to_string(),
            full_name: parts.join(" "),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub arabic: String,
    pub english: String,
}

/// A generated person.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub arabic_name: Name,
    pub english_name: Name,
    pub gender: Gender,
    /// `YYYY-MM-DD`.
    pub date_of_birth: String,
    pub phone_number: String,
    pub email: String,
    pub address: Address,
    pub nationality: Nationality,
    pub id_type: IdKind,
    pub id_number: String,
}

/// The document kind a person of `nationality` carries when `requested` is
/// asked for. Citizens always carry a national ID; residents carry an Iqama
/// when asked for one and a passport otherwise.
pub fn resolve_id_kind(nationality: Nationality, requested: IdKind) -> IdKind {
    match (nationality, requested) {
        (Nationality::Saudi, _) => IdKind::NationalId,
        (Nationality::NonSaudi, IdKind::Iqama) => IdKind::Iqama,
        (Nationality::NonSaudi, _) => IdKind::Passport,
    }
}

/// Random date of birth for someone aged between 18 and 70 in
/// `current_year`. Days stop at 28 so every month is valid.
pub fn generate_date_of_birth<R: Rng + ?Sized>(rng: &mut R, current_year: i32) -> String {
    let (min_age, max_age) = AGE_RANGE;
    let year = rng.gen_range(current_year - max_age..current_year - min_age);
    let month: u32 = rng.gen_range(1..=12);
    let day: u32 = rng.gen_range(1..=28);
    format!("{year:04}-{month:02}-{day:02}")
}

/// Email address derived from the first word of `name`, with a two-digit
/// suffix and a common provider domain.
pub fn generate_email<R: Rng + ?Sized>(rng: &mut R, name: &str) -> String {
    let local: String = name
        .split(' ')
        .next()
        .unwrap_or_default()
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '.')
        .collect();
    let suffix = rng.gen_range(0..100);
    let domain = pick(rng, &EMAIL_DOMAINS);
    format!("{local}{suffix}@{domain}")
}

/// Generate one person.
pub fn generate_person<R: Rng + ?Sized>(
    rng: &mut R,
    nationality: Nationality,
    id_kind: IdKind,
    current_year: i32,
) -> Person {
    let gender = if rng.gen_bool(0.5) { Gender::Male } else { Gender::Female };
    let (first_names, second_names) = match gender {
        Gender::Male => (&FIRST_NAMES_MALE, &SECOND_NAMES_MALE),
        Gender::Female => (&FIRST_NAMES_FEMALE, &SECOND_NAMES_FEMALE),
    };
    let parts = [
        pick(rng, first_names),
        pick(rng, second_names),
        pick(rng, &THIRD_NAMES),
        pick(rng, &FAMILY_NAMES),
    ];
    let arabic_name = Name::from_parts(parts.map(|(ar, _)| ar));
    let english_name = Name::from_parts(parts.map(|(_, en)| en));

    let id_type = resolve_id_kind(nationality, id_kind);
    let (arabic, english) = pick(rng, &ADDRESSES);

    Person {
        gender,
        date_of_birth: generate_date_of_birth(rng, current_year),
        phone_number: generate_phone_number(rng),
        email: generate_email(rng, &english_name.full_name),
        address: Address {
            arabic: arabic.to_string(),
            english: english.to_string(),
        },
        nationality,
        id_type,
        id_number: id_type.generate(rng),
        arabic_name,
        english_name,
    }
}

/// Generate `count` people, clamped to `1..=MAX_PEOPLE`.
pub fn generate_people<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    nationality: Nationality,
    id_kind: IdKind,
    current_year: i32,
) -> Vec<Person> {
    let count = count.clamp(1, MAX_PEOPLE);
    (0..count)
        .map(|_| generate_person(rng, nationality, id_kind, current_year))
        .collect()
}

fn pick<R: Rng + ?Sized, T: Copy>(rng: &mut R, items: &[T]) -> T {
    items[rng.gen_range(0..items.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::{validate_iqama_id, validate_national_id};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn citizens_always_get_national_ids() {
        let mut rng = StdRng::seed_from_u64(1);
        for requested in [IdKind::NationalId, IdKind::Iqama, IdKind::Passport] {
            let person = generate_person(&mut rng, Nationality::Saudi, requested, 2026);
            assert_eq!(person.id_type, IdKind::NationalId);
            assert!(validate_national_id(&person.id_number), "{}", person.id_number);
        }
    }

    #[test]
    fn residents_get_iqama_or_passport() {
        let mut rng = StdRng::seed_from_u64(2);
        let iqama = generate_person(&mut rng, Nationality::NonSaudi, IdKind::Iqama, 2026);
        assert_eq!(iqama.id_type, IdKind::Iqama);
        assert!(validate_iqama_id(&iqama.id_number));

        let passport = generate_person(&mut rng, Nationality::NonSaudi, IdKind::Passport, 2026);
        assert_eq!(passport.id_type, IdKind::Passport);
        assert_eq!(passport.id_number.len(), 9);

        assert_eq!(resolve_id_kind(Nationality::NonSaudi, IdKind::NationalId), IdKind::Passport);
    }

    #[test]
    fn names_agree_across_scripts() {
        let mut rng = StdRng::seed_from_u64(3);
        for person in generate_people(&mut rng, 30, Nationality::Saudi, IdKind::NationalId, 2026) {
            let english = &person.english_name;
            assert_eq!(
                english.full_name,
                format!(
                    "{} {} {} {}",
                    english.first_name, english.second_name, english.last_name, english.family_name
                )
            );
            let first = FIRST_NAMES_MALE
                .iter()
                .chain(&FIRST_NAMES_FEMALE)
                .find(|(ar, _)| *ar == person.arabic_name.first_name)
                .map(|(_, en)| *en);
            assert_eq!(first, Some(english.first_name.as_str()));

            let expected_firsts = match person.gender {
                Gender::Male => &FIRST_NAMES_MALE,
                Gender::Female => &FIRST_NAMES_FEMALE,
            };
            assert!(expected_firsts.iter().any(|(_, en)| *en == english.first_name));
        }
    }

    #[test]
    fn date_of_birth_range() {
        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..200 {
            let dob = generate_date_of_birth(&mut rng, 2026);
            let parts: Vec<u32> = dob.split('-').map(|p| p.parse().unwrap()).collect();
            assert_eq!(parts.len(), 3, "{dob}");
            assert!((1956..2008).contains(&parts[0]), "{dob}");
            assert!((1..=12).contains(&parts[1]));
            assert!((1..=28).contains(&parts[2]));
        }
    }

    #[test]
    fn email_uses_first_word() {
        let mut rng = StdRng::seed_from_u64(5);
        let email = generate_email(&mut rng, "Abdul-Aziz Saud Fahad AlHarbi");
        let (local, domain) = email.split_once('@').unwrap();
        assert!(local.starts_with("abdulaziz"), "{email}");
        assert!(local["abdulaziz".len()..].parse::<u32>().unwrap() < 100);
        assert!(EMAIL_DOMAINS.contains(&domain));
    }

    #[test]
    fn people_count_is_clamped() {
        let mut rng = StdRng::seed_from_u64(6);
        assert_eq!(generate_people(&mut rng, 0, Nationality::Saudi, IdKind::NationalId, 2026).len(), 1);
        assert_eq!(
            generate_people(&mut rng, 500, Nationality::Saudi, IdKind::NationalId, 2026).len(),
            MAX_PEOPLE
        );
    }

    #[test]
    fn person_serializes_camel_case() {
        let mut rng = StdRng::seed_from_u64(8);
        let person = generate_person(&mut rng, Nationality::NonSaudi, IdKind::Iqama, 2026);
        let value = serde_json::to_value(&person).unwrap();
        assert_eq!(value["nationality"], "Non-Saudi");
        assert_eq!(value["idType"], "Iqama");
        assert!(value["englishName"]["fullName"].is_string());
        assert!(value["dateOfBirth"].is_string());
    }

    #[test]
    fn nationality_names() {
        assert_eq!("Saudi".parse::<Nationality>().unwrap(), Nationality::Saudi);
        assert_eq!("non-saudi".parse::<Nationality>().unwrap(), Nationality::NonSaudi);
        assert!("martian".parse::<Nationality>().is_err());
    }
}
