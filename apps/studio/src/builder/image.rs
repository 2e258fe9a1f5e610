//! Profile picture upload: raw bytes in, `data:` URL out.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::errors::AppError;

/// Detects the image type from its leading bytes.
pub fn sniff_mime(bytes: &[u8]) -> Option<&'static str> {
    if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
        Some("image/png")
    } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some("image/jpeg")
    } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        Some("image/gif")
    } else if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        Some("image/webp")
    } else {
        None
    }
}

/// Validates the upload and encodes it as `data:<mime>;base64,<payload>`.
///
/// The type always comes from the bytes. A declared content type is only a
/// cross-check: naming a different image type than the one sniffed is an
/// error, while generic declarations (`application/octet-stream`, none) pass.
pub fn to_data_url(
    bytes: &[u8],
    declared: Option<&str>,
    max_bytes: usize,
) -> Result<String, AppError> {
    if bytes.is_empty() {
        return Err(AppError::Validation("Image file is empty".to_string()));
    }
    if bytes.len() > max_bytes {
        return Err(AppError::Validation(format!(
            "Image is {} bytes; the limit is {max_bytes} bytes",
            bytes.len()
        )));
    }

    let declared = declared
        .map(|m| m.trim().to_ascii_lowercase())
        .map(|m| if m == "image/jpg" { "image/jpeg".to_string() } else { m });
    let mime = sniff_mime(bytes).ok_or_else(|| {
        AppError::Validation("Unsupported image type; use PNG, JPEG, GIF or WebP".to_string())
    })?;
    if let Some(d) = declared.as_deref() {
        if d.starts_with("image/") && d != mime {
            return Err(AppError::Validation(format!(
                "File declared as {d} but its contents are {mime}"
            )));
        }
    }

    Ok(format!("data:{mime};base64,{}", STANDARD.encode(bytes)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_HEADER: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

    #[test]
    fn test_png_becomes_data_url() {
        let url = to_data_url(PNG_HEADER, Some("image/png"), 1024).unwrap();
        assert!(url.starts_with("data:image/png;base64,"));
        let payload = url.trim_start_matches("data:image/png;base64,");
        assert_eq!(STANDARD.decode(payload).unwrap(), PNG_HEADER);
    }

    #[test]
    fn test_sniffed_type_wins_over_generic_declaration() {
        let jpeg = [0xFF, 0xD8, 0xFF, 0xE0, 0, 0x10];
        let url = to_data_url(&jpeg, Some("application/octet-stream"), 1024).unwrap();
        assert!(url.starts_with("data:image/jpeg;base64,"));
    }

    #[test]
    fn test_unknown_bytes_rejected() {
        let err = to_data_url(b"%PDF-1.7", Some("application/pdf"), 1024).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_declared_png_must_look_like_png() {
        let err = to_data_url(b"just some text", Some("image/png"), 1024).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let jpeg = [0xFF, 0xD8, 0xFF, 0xE0, 0, 0x10];
        let err = to_data_url(&jpeg, Some("image/png"), 1024).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(to_data_url(&jpeg, Some("image/jpg"), 1024).is_ok());
    }

    #[test]
    fn test_oversize_rejected() {
        let err = to_data_url(PNG_HEADER, Some("image/png"), 4).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_webp_sniffing() {
        let mut webp = b"RIFF\0\0\0\0WEBPVP8 ".to_vec();
        webp.extend_from_slice(&[0; 8]);
        assert_eq!(sniff_mime(&webp), Some("image/webp"));
        assert_eq!(sniff_mime(b"GIF89a...."), Some("image/gif"));
        assert_eq!(sniff_mime(b"hello"), None);
    }
}
