//! Extension-based content classification.
//!
//! Classification is a pure function of the path's lowercase suffix; no
//! magic-byte sniffing. The rejection messages are user-visible contract
//! strings and must not be reworded.

use nirogya_types::error::AnalysisError;

/// Image extensions the vision model accepts.
pub const IMAGE_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "gif", "bmp", "tiff"];

/// Rejection message for PDFs, shown verbatim in the UI.
pub const PDF_UNSUPPORTED_MESSAGE: &str =
    "PDF analysis not yet supported. Please upload an image (JPG, PNG, GIF, BMP, TIFF).";

/// Rejection message for everything else, shown verbatim in the UI.
pub const UNSUPPORTED_TYPE_MESSAGE: &str = "Unsupported file type for analysis";

/// What an uploaded file classified as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentClass {
    /// A processable image; `extension` tags the data URI sent upstream.
    Image { extension: String },
}

/// Classify a storage path by its extension (case-insensitive).
pub fn classify(path: &str) -> Result<ContentClass, AnalysisError> {
    let lower = path.to_lowercase();
    let Some((_, extension)) = lower.rsplit_once('.') else {
        return Err(AnalysisError::UnsupportedFormat(
            UNSUPPORTED_TYPE_MESSAGE.to_string(),
        ));
    };

    if IMAGE_EXTENSIONS.contains(&extension) {
        Ok(ContentClass::Image {
            extension: extension.to_string(),
        })
    } else if extension == "pdf" {
        Err(AnalysisError::UnsupportedFormat(
            PDF_UNSUPPORTED_MESSAGE.to_string(),
        ))
    } else {
        Err(AnalysisError::UnsupportedFormat(
            UNSUPPORTED_TYPE_MESSAGE.to_string(),
        ))
    }
}
