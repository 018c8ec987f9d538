use thiserror::Error;

/// Failures that can surface to the user. A frame without a detected hand is
/// not one of them; see [`crate::gesture::GestureReading`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TreeError {
    #[error("camera permission denied: {0}")]
    PermissionDenied(String),
    #[error("failed to load {asset}: {reason}")]
    AssetLoadFailure { asset: String, reason: String },
    #[error("expected 21 hand landmarks, got {0}")]
    InvalidLandmarks(usize),
}

impl TreeError {
    pub fn asset(asset: impl Into<String>, reason: impl Into<String>) -> Self {
        TreeError::AssetLoadFailure {
            asset: asset.into(),
            reason: reason.into(),
        }
    }

    /// Short text for the on-screen notice.
    pub fn user_notice(&self) -> &'static str {
        match self {
            TreeError::PermissionDenied(_) => "Please check camera permissions.",
            TreeError::AssetLoadFailure { .. } => "Could not load a required asset. Please retry.",
            TreeError::InvalidLandmarks(_) => "Hand tracking returned unexpected data.",
        }
    }
}
