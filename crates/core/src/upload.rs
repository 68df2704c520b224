//! Naming and validation rules for uploaded model pictures.
//!
//! Pictures are stored as `<10 random alphanumerics>.<ext>` in a flat
//! directory. The extension comes from the client-supplied file name and must
//! agree with the format sniffed from the file header.

use image::ImageFormat;
use rand::Rng;

use crate::error::CoreError;

/// Length of the random stem of a stored file name.
pub const FILE_STEM_LENGTH: usize = 10;

/// Accepted image extensions (lowercase, without the leading dot).
pub const ALLOWED_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

/// Extract and lowercase the extension of `file_name`, if it is an allowed image type.
pub fn normalize_extension(file_name: &str) -> Result<String, CoreError> {
    let ext = match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => ext.to_ascii_lowercase(),
        _ => {
            return Err(CoreError::Validation(format!(
                "File name '{file_name}' has no extension"
            )))
        }
    };

    if !ALLOWED_IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        return Err(CoreError::Validation(format!(
            "Unsupported image format '.{ext}'. Supported: {}",
            ALLOWED_IMAGE_EXTENSIONS.join(", ")
        )));
    }
    Ok(ext)
}

/// Random alphanumeric stem for a stored file.
pub fn random_file_stem() -> String {
    rand::rng()
        .sample_iter(&rand::distr::Alphanumeric)
        .take(FILE_STEM_LENGTH)
        .map(char::from)
        .collect()
}

/// Build the on-disk name for a new upload with the given (normalized) extension.
pub fn stored_file_name(ext: &str) -> String {
    format!("{}.{ext}", random_file_stem())
}

/// Check that `data` starts with the header of an image whose format matches `ext`.
///
/// Only the magic bytes are inspected; the image is never decoded.
pub fn sniff_image(data: &[u8], ext: &str) -> Result<ImageFormat, CoreError> {
    let format = image::guess_format(data)
        .map_err(|_| CoreError::Validation("Uploaded file is not a recognised image".into()))?;

    if !format.extensions_str().contains(&ext) {
        return Err(CoreError::Validation(format!(
            "File extension '.{ext}' does not match its {format:?} content"
        )));
    }
    Ok(format)
}
