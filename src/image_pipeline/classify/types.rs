//! Classification result types

/// Outcome of classifying one image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationResult {
    /// Identifier of the source image, usually its file name
    pub image: String,
    /// Whether the image was judged nearly black
    pub nearly_black: bool,
}
