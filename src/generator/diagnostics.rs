//! Non-fatal problems encountered while building a material.

use crate::error::TranslatorError;
use serde::Serialize;

/// Category of a recorded problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DiagnosticKind {
    /// Texture or image index out of range.
    Resolution,
    /// A conversion needed CPU pixels that were not available.
    UnreadablePixelData,
    /// The descriptor asked for something the output cannot express.
    UnsupportedFeature,
    Other,
}

impl DiagnosticKind {
    pub fn of(err: &TranslatorError) -> Self {
        match err {
            TranslatorError::TextureNotFound(_) | TranslatorError::ImageNotFound { .. } => {
                DiagnosticKind::Resolution
            }
            TranslatorError::UnreadablePixelData(_) => DiagnosticKind::UnreadablePixelData,
            TranslatorError::UnsupportedFeature(_) => DiagnosticKind::UnsupportedFeature,
            _ => DiagnosticKind::Other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
}

/// Collects diagnostics for one material and logs each as it arrives.
#[derive(Debug, Default)]
pub(crate) struct Diagnostics {
    material: String,
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub(crate) fn new(material: &str) -> Self {
        Self {
            material: material.to_string(),
            entries: Vec::new(),
        }
    }

    pub(crate) fn record(&mut self, context: &str, err: TranslatorError) {
        let kind = DiagnosticKind::of(&err);
        let message = format!("{}: {}", context, err);

        match kind {
            DiagnosticKind::Resolution | DiagnosticKind::Other => {
                log::error!("Material '{}': {}", self.material, message)
            }
            DiagnosticKind::UnreadablePixelData | DiagnosticKind::UnsupportedFeature => {
                log::warn!("Material '{}': {}", self.material, message)
            }
        }

        self.entries.push(Diagnostic { kind, message });
    }

    pub(crate) fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        assert_eq!(DiagnosticKind::of(&TranslatorError::TextureNotFound(3)), DiagnosticKind::Resolution);
        assert_eq!(
            DiagnosticKind::of(&TranslatorError::ImageNotFound { texture: 0, image: 1 }),
            DiagnosticKind::Resolution
        );
        assert_eq!(
            DiagnosticKind::of(&TranslatorError::UnreadablePixelData("x".into())),
            DiagnosticKind::UnreadablePixelData
        );
        assert_eq!(
            DiagnosticKind::of(&TranslatorError::InvalidPackage("x".into())),
            DiagnosticKind::Other
        );
    }

    #[test]
    fn test_record_prefixes_context() {
        let mut diagnostics = Diagnostics::new("mat");
        diagnostics.record("normal texture", TranslatorError::TextureNotFound(5));

        let entries = diagnostics.into_vec();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].message, "normal texture: Texture #5 not found");
    }
}
