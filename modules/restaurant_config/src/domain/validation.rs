//! Input validation for customer-entered data and uploaded files

use crate::contract::{AssetError, UploadFile};
use once_cell::sync::Lazy;
use regex::Regex;

/// MIME types accepted for image uploads
pub const ALLOWED_IMAGE_TYPES: &[&str] = &[
    "image/jpeg",
    "image/png",
    "image/jpg",
    "image/webp",
    "image/gif",
];

/// Mobile carrier and landline area codes followed by a 7-digit subscriber number
#[allow(clippy::unwrap_used)]
static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(0412|0414|0424|0416|0426|0418|0422|0212|0234|0241|0243|0246|0251|0254|0255|0257|0261|0264|0265|0268|0271|0273|0274|0275|0276|0281)[0-9]{7}$",
    )
    .unwrap()
});

fn digits_only(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Whether `input` is a national phone number, ignoring separators
pub fn is_valid_phone(input: &str) -> bool {
    PHONE_RE.is_match(&digits_only(input))
}

/// Whether `input` is a 6-digit payment reference, ignoring separators
pub fn is_valid_reference(input: &str) -> bool {
    digits_only(input).len() == 6
}

/// Validate an upload before anything is sent to the remote store
///
/// Checks run in order: file present, image MIME type, size limit.
pub fn validate_upload(file: Option<&UploadFile>, max_bytes: u64) -> Result<&UploadFile, AssetError> {
    let file = match file {
        Some(file) if !file.data.is_empty() => file,
        _ => return Err(AssetError::MissingFile),
    };

    if !is_allowed_image_type(&file.content_type) {
        return Err(AssetError::UnsupportedMediaType {
            content_type: file.content_type.clone(),
        });
    }

    if file.size() > max_bytes {
        return Err(AssetError::FileTooLarge {
            size: file.size(),
            max: max_bytes,
        });
    }

    Ok(file)
}

/// Compare on the MIME essence so `IMAGE/PNG` or `image/png; q=1` are accepted
fn is_allowed_image_type(content_type: &str) -> bool {
    match content_type.trim().parse::<mime::Mime>() {
        Ok(m) => {
            let essence = m.essence_str().to_ascii_lowercase();
            ALLOWED_IMAGE_TYPES.contains(&essence.as_str())
        }
        Err(_) => false,
    }
}
