//! Encoding utilities: base64 text, digests, base64 image inspection, UUIDs
//! and test identity data.
//!
//! All helpers wrap established libraries; nothing here implements its own
//! cryptography.

pub mod digest;
pub mod error;
pub mod ids;
pub mod image;
pub mod person;
pub mod text;

pub use digest::{digest, digest_bytes, DigestAlgorithm};
pub use error::{CodecError, CodecResult};
pub use ids::{
    generate_ids, generate_iqama_id, generate_national_id, generate_passport_id,
    generate_phone_number, generate_uuids, luhn_check_digit, validate_iqama_id, validate_luhn,
    validate_national_id, IdKind, ID_LEN, MAX_IDS, MAX_UUIDS,
};
pub use image::{
    decode_image, extract_mime_type, format_file_size, normalize_base64, read_dimensions,
    strip_data_url, ImageFormat, ImageInfo,
};
pub use person::{
    generate_date_of_birth, generate_email, generate_people, generate_person, resolve_id_kind,
    Address, Gender, Name, Nationality, Person, MAX_PEOPLE,
};
pub use text::{decode_base64, decode_base64_bytes, encode_base64};
