//! Hex digests of text.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use md5::Md5;
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha512};

use crate::error::CodecError;

/// Supported digest algorithms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigestAlgorithm {
    Md5,
    Sha1,
    Sha256,
    Sha512,
    Blake3,
}

impl DigestAlgorithm {
    /// Every supported algorithm.
    pub const ALL: [DigestAlgorithm; 5] =
        [Self::Md5, Self::Sha1, Self::Sha256, Self::Sha512, Self::Blake3];

    /// Canonical lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Md5 => "md5",
            Self::Sha1 => "sha1",
            Self::Sha256 => "sha256",
            Self::Sha512 => "sha512",
            Self::Blake3 => "blake3",
        }
    }

    /// Digest length in bytes.
    pub fn output_len(&self) -> usize {
        match self {
            Self::Md5 => 16,
            Self::Sha1 => 20,
            Self::Sha256 | Self::Blake3 => 32,
            Self::Sha512 => 64,
        }
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DigestAlgorithm {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "md5" => Ok(Self::Md5),
            "sha1" | "sha-1" => Ok(Self::Sha1),
            "sha256" | "sha-256" => Ok(Self::Sha256),
            "sha512" | "sha-512" => Ok(Self::Sha512),
            "blake3" => Ok(Self::Blake3),
            _ => Err(CodecError::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// Hash the UTF-8 bytes of `text` and return the lowercase hex digest.
pub fn digest(algorithm: DigestAlgorithm, text: &str) -> String {
    digest_bytes(algorithm, text.as_bytes())
}

/// Hash raw bytes and return the lowercase hex digest.
pub fn digest_bytes(algorithm: DigestAlgorithm, data: &[u8]) -> String {
    match algorithm {
        DigestAlgorithm::Md5 => hex::encode(Md5::digest(data)),
        DigestAlgorithm::Sha1 => hex::encode(Sha1::digest(data)),
        DigestAlgorithm::Sha256 => hex::encode(Sha256::digest(data)),
        DigestAlgorithm::Sha512 => hex::encode(Sha512::digest(data)),
        DigestAlgorithm::Blake3 => hex::encode(blake3::hash(data).as_bytes()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn md5_known_vectors() {
        assert_eq!(digest(DigestAlgorithm::Md5, ""), "d41d8cd98f00b204e9800998ecf8427e");
        assert_eq!(digest(DigestAlgorithm::Md5, "abc"), "900150983cd24fb0d6963f7d28e17f72");
    }

    #[test]
    fn sha1_known_vector() {
        assert_eq!(
            digest(DigestAlgorithm::Sha1, "abc"),
            "a9993e364706816aba3e25717850c26c9cd0d89d"
        );
    }

    #[test]
    fn sha256_known_vector() {
        assert_eq!(
            digest(DigestAlgorithm::Sha256, "abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn sha512_known_vector() {
        assert_eq!(
            digest(DigestAlgorithm::Sha512, "abc"),
            "ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a\
             2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f"
        );
    }

    #[test]
    fn blake3_matches_library() {
        let expected = blake3::hash(b"abc").to_hex().to_string();
        assert_eq!(digest(DigestAlgorithm::Blake3, "abc"), expected);
    }

    #[test]
    fn output_lengths() {
        for alg in DigestAlgorithm::ALL {
            assert_eq!(digest(alg, "x").len(), alg.output_len() * 2);
        }
    }

    #[test]
    fn parse_names() {
        assert_eq!("SHA-256".parse::<DigestAlgorithm>().unwrap(), DigestAlgorithm::Sha256);
        assert_eq!("sha512".parse::<DigestAlgorithm>().unwrap(), DigestAlgorithm::Sha512);
        assert_eq!("Blake3".parse::<DigestAlgorithm>().unwrap(), DigestAlgorithm::Blake3);
        assert_eq!("MD5".parse::<DigestAlgorithm>().unwrap(), DigestAlgorithm::Md5);
        assert_eq!("sha-1".parse::<DigestAlgorithm>().unwrap(), DigestAlgorithm::Sha1);
        assert_eq!(
            "crc32".parse::<DigestAlgorithm>(),
            Err(CodecError::UnknownAlgorithm("crc32".into()))
        );
    }

    #[test]
    fn display_round_trips() {
        for alg in DigestAlgorithm::ALL {
            assert_eq!(alg.to_string().parse::<DigestAlgorithm>().unwrap(), alg);
        }
    }
}
