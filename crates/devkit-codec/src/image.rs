//! Base64 image inspection.
//!
//! Accepts either a bare base64 payload or a `data:<mime>;base64,<payload>`
//! URL. The MIME type comes from the data URL when present and is otherwise
//! sniffed from the decoded magic bytes.

use serde::Serialize;

use crate::error::CodecResult;
use crate::text::decode_base64_bytes;

const OCTET_STREAM: &str = "application/octet-stream";
const DATA_URL_MARKER: &str = "base64,";

/// Image formats recognised by signature or MIME type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ImageFormat {
    Jpeg,
    Png,
    Gif,
    WebP,
    Svg,
    Unknown,
}

impl ImageFormat {
    pub fn from_mime(mime: &str) -> Self {
        match mime {
            "image/jpeg" => Self::Jpeg,
            "image/png" => Self::Png,
            "image/gif" => Self::Gif,
            "image/webp" => Self::WebP,
            "image/svg+xml" => Self::Svg,
            _ => Self::Unknown,
        }
    }

    /// Identify a format from leading bytes.
    pub fn sniff(bytes: &[u8]) -> Self {
        if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            Self::Jpeg
        } else if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
            Self::Png
        } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
            Self::Gif
        } else if bytes.len() >= 12 && bytes.starts_with(b"RIFF") && &bytes[8..12] == b"WEBP" {
            Self::WebP
        } else if bytes.starts_with(b"<?xml") || bytes.starts_with(b"<svg") {
            Self::Svg
        } else {
            Self::Unknown
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Gif => "image/gif",
            Self::WebP => "image/webp",
            Self::Svg => "image/svg+xml",
            Self::Unknown => OCTET_STREAM,
        }
    }

    /// Short display label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Jpeg => "JPEG",
            Self::Png => "PNG",
            Self::Gif => "GIF",
            Self::WebP => "WebP",
            Self::Svg => "SVG",
            Self::Unknown => "unknown",
        }
    }
}

/// Summary of a decoded image.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ImageInfo {
    pub mime_type: String,
    pub format: ImageFormat,
    /// Exact decoded payload length.
    pub size_in_bytes: usize,
    /// `(width, height)` when the header could be read.
    pub dimensions: Option<(u32, u32)>,
}

/// Return the payload of a data URL, or the input unchanged.
pub fn strip_data_url(input: &str) -> &str {
    match input.split_once(DATA_URL_MARKER) {
        Some((_, payload)) => payload,
        None => input,
    }
}

/// MIME type declared by a data URL, or sniffed from the decoded payload.
pub fn extract_mime_type(input: &str) -> String {
    if let Some(mime) = declared_mime(input) {
        return mime.to_string();
    }
    match decode_base64_bytes(strip_data_url(input)) {
        Ok(bytes) => ImageFormat::sniff(&bytes).mime_type().to_string(),
        Err(_) => OCTET_STREAM.to_string(),
    }
}

fn declared_mime(input: &str) -> Option<&str> {
    let start = input.find("data:")? + "data:".len();
    let rest = &input[start..];
    let (mime, _) = rest.split_once(";base64,")?;
    if mime.is_empty() || mime.contains(';') {
        return None;
    }
    Some(mime)
}

/// Decode a base64 image and describe it.
pub fn decode_image(input: &str) -> CodecResult<ImageInfo> {
    let bytes = decode_base64_bytes(strip_data_url(input))?;
    let mime_type = match declared_mime(input) {
        Some(mime) => mime.to_string(),
        None => ImageFormat::sniff(&bytes).mime_type().to_string(),
    };
    let format = ImageFormat::from_mime(&mime_type);
    let dimensions = read_dimensions(format, &bytes);

    tracing::debug!(mime = %mime_type, size = bytes.len(), ?dimensions, "decoded image");

    Ok(ImageInfo {
        mime_type,
        format,
        size_in_bytes: bytes.len(),
        dimensions,
    })
}

/// Read `(width, height)` from a PNG, GIF or JPEG header.
pub fn read_dimensions(format: ImageFormat, bytes: &[u8]) -> Option<(u32, u32)> {
    match format {
        ImageFormat::Png => {
            // IHDR is always the first chunk.
            if bytes.len() < 24 || &bytes[12..16] != b"IHDR" {
                return None;
            }
            Some((be_u32(&bytes[16..20]), be_u32(&bytes[20..24])))
        }
        ImageFormat::Gif => {
            if bytes.len() < 10 {
                return None;
            }
            let width = u16::from_le_bytes([bytes[6], bytes[7]]);
            let height = u16::from_le_bytes([bytes[8], bytes[9]]);
            Some((u32::from(width), u32::from(height)))
        }
        ImageFormat::Jpeg => jpeg_dimensions(bytes),
        _ => None,
    }
}

fn jpeg_dimensions(bytes: &[u8]) -> Option<(u32, u32)> {
    let mut i = 2;
    while i + 1 < bytes.len() {
        if bytes[i] != 0xFF {
            return None;
        }
        let marker = bytes[i + 1];
        match marker {
            0xFF => {
                i += 1;
                continue;
            }
            0x01 | 0xD0..=0xD7 => {
                i += 2;
                continue;
            }
            _ => {}
        }
        let len = usize::from(be_u16(bytes.get(i + 2..i + 4)?));
        let is_sof = matches!(marker, 0xC0..=0xCF) && !matches!(marker, 0xC4 | 0xC8 | 0xCC);
        if is_sof {
            let height = be_u16(bytes.get(i + 5..i + 7)?);
            let width = be_u16(bytes.get(i + 7..i + 9)?);
            return Some((u32::from(width), u32::from(height)));
        }
        i += 2 + len;
    }
    None
}

fn be_u16(b: &[u8]) -> u16 {
    u16::from_be_bytes([b[0], b[1]])
}

fn be_u32(b: &[u8]) -> u32 {
    u32::from_be_bytes([b[0], b[1], b[2], b[3]])
}

/// Human-readable size: `N bytes`, `x.y KB` or `x.y MB`.
pub fn format_file_size(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = 1024 * 1024;
    if bytes < KB {
        format!("{bytes} bytes")
    } else if bytes < MB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    }
}

/// Prefix a bare payload with a data URL header; data URLs pass through.
pub fn normalize_base64(input: &str, mime_type: &str) -> String {
    if input.contains("data:") {
        input.to_string()
    } else {
        format!("data:{mime_type};base64,{input}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let mut b = b"\x89PNG\r\n\x1a\n".to_vec();
        b.extend_from_slice(&13u32.to_be_bytes());
        b.extend_from_slice(b"IHDR");
        b.extend_from_slice(&width.to_be_bytes());
        b.extend_from_slice(&height.to_be_bytes());
        b.extend_from_slice(&[8, 6, 0, 0, 0]);
        b
    }

    fn gif_bytes(width: u16, height: u16) -> Vec<u8> {
        let mut b = b"GIF89a".to_vec();
        b.extend_from_slice(&width.to_le_bytes());
        b.extend_from_slice(&height.to_le_bytes());
        b.extend_from_slice(&[0, 0, 0]);
        b
    }

    fn jpeg_bytes(width: u16, height: u16) -> Vec<u8> {
        let mut b = vec![0xFF, 0xD8];
        // APP0 segment with 14 bytes of payload.
        b.extend_from_slice(&[0xFF, 0xE0, 0x00, 0x10]);
        b.extend_from_slice(&[0u8; 14]);
        // SOF0
        b.extend_from_slice(&[0xFF, 0xC0, 0x00, 0x11, 0x08]);
        b.extend_from_slice(&height.to_be_bytes());
        b.extend_from_slice(&width.to_be_bytes());
        b.extend_from_slice(&[0x03, 0x01, 0x22, 0x00]);
        b
    }

    #[test]
    fn png_from_bare_payload() {
        let encoded = STANDARD.encode(png_bytes(640, 480));
        let info = decode_image(&encoded).unwrap();
        assert_eq!(info.mime_type, "image/png");
        assert_eq!(info.format, ImageFormat::Png);
        assert_eq!(info.dimensions, Some((640, 480)));
        assert_eq!(info.size_in_bytes, 29);
    }

    #[test]
    fn gif_from_data_url() {
        let url = format!("data:image/gif;base64,{}", STANDARD.encode(gif_bytes(3, 7)));
        let info = decode_image(&url).unwrap();
        assert_eq!(info.format, ImageFormat::Gif);
        assert_eq!(info.dimensions, Some((3, 7)));
    }

    #[test]
    fn jpeg_dimensions_from_sof() {
        let bytes = jpeg_bytes(1920, 1080);
        assert_eq!(ImageFormat::sniff(&bytes), ImageFormat::Jpeg);
        assert_eq!(read_dimensions(ImageFormat::Jpeg, &bytes), Some((1920, 1080)));
    }

    #[test]
    fn declared_mime_wins_over_sniffing() {
        let url = format!("data:image/webp;base64,{}", STANDARD.encode(png_bytes(1, 1)));
        assert_eq!(extract_mime_type(&url), "image/webp");
        assert_eq!(decode_image(&url).unwrap().dimensions, None);
    }

    #[test]
    fn sniffs_other_signatures() {
        let mut webp = b"RIFF\0\0\0\0WEBPVP8 ".to_vec();
        webp.extend_from_slice(&[0; 4]);
        assert_eq!(ImageFormat::sniff(&webp), ImageFormat::WebP);
        assert_eq!(ImageFormat::sniff(b"<svg xmlns=\"\"/>"), ImageFormat::Svg);
        assert_eq!(ImageFormat::sniff(b"plain"), ImageFormat::Unknown);
    }

    #[test]
    fn unknown_payload_is_octet_stream() {
        let encoded = STANDARD.encode(b"not an image");
        assert_eq!(extract_mime_type(&encoded), "application/octet-stream");
        assert_eq!(extract_mime_type("%%%"), "application/octet-stream");
        assert_eq!(decode_image(&encoded).unwrap().format.label(), "unknown");
    }

    #[test]
    fn invalid_payload_is_an_error() {
        assert!(decode_image("data:image/png;base64,@@@").is_err());
    }

    #[test]
    fn strips_data_url_prefix() {
        assert_eq!(strip_data_url("data:image/png;base64,AAAA"), "AAAA");
        assert_eq!(strip_data_url("AAAA"), "AAAA");
    }

    #[test]
    fn file_sizes() {
        assert_eq!(format_file_size(512), "512 bytes");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(3 * 1024 * 1024), "3.0 MB");
    }

    #[test]
    fn normalize_adds_prefix_once() {
        assert_eq!(normalize_base64("AAAA", "image/png"), "data:image/png;base64,AAAA");
        let url = "data:image/png;base64,AAAA";
        assert_eq!(normalize_base64(url, "image/gif"), url);
    }
}
