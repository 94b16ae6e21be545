use thiserror::Error;

/// Failure of one title-image generation run.
///
/// Recoverable conditions (an unreadable background file, one failed
/// sub-image) are logged and absorbed; only what would leave the main image
/// missing or wrong ends up here.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("No usable font could be resolved")]
    FontResolution,

    #[error("Encoding error: {0}")]
    Encoding(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to allocate pixmap: {width}x{height}")]
    PixmapAllocation { width: u32, height: u32 },
}

/// Failure reported by an [`ImageStorage`](crate::services::ImageStorage) backend.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Upload rejected: {0}")]
    Rejected(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Invalid quality: {0} (expected 1-100)")]
    InvalidQuality(u8),

    #[error("Invalid font_color {value:?}: {source}")]
    InvalidColor {
        value: String,
        source: title_art::ParseColorError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_error_font_resolution() {
        let error = GenerateError::FontResolution;
        assert_eq!(error.to_string(), "No usable font could be resolved");
    }

    #[test]
    fn test_generate_error_encoding() {
        let error = GenerateError::Encoding("webp encoder refused input".to_string());
        assert_eq!(
            error.to_string(),
            "Encoding error: webp encoder refused input"
        );
    }

    #[test]
    fn test_generate_error_pixmap_allocation() {
        let error = GenerateError::PixmapAllocation {
            width: 0,
            height: 600,
        };
        assert_eq!(error.to_string(), "Failed to allocate pixmap: 0x600");
    }

    #[test]
    fn test_storage_error_rejected() {
        let error = StorageError::Rejected("bucket full".to_string());
        assert_eq!(error.to_string(), "Upload rejected: bucket full");
    }

    #[test]
    fn test_config_error_invalid_dimensions() {
        let error = ConfigError::InvalidDimensions {
            width: 0,
            height: 400,
        };
        assert_eq!(error.to_string(), "Invalid dimensions: 0x400");
    }

    #[test]
    fn test_config_error_invalid_quality() {
        let error = ConfigError::InvalidQuality(0);
        assert_eq!(error.to_string(), "Invalid quality: 0 (expected 1-100)");
    }

    #[test]
    fn test_config_error_invalid_color() {
        let error = ConfigError::InvalidColor {
            value: "#FFFFFF80".to_string(),
            source: title_art::ParseColorError::Alpha,
        };
        assert_eq!(
            error.to_string(),
            "Invalid font_color \"#FFFFFF80\": alpha is not supported, title text is always opaque"
        );
    }

    #[test]
    fn test_storage_io_error_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let error: GenerateError = StorageError::from(io).into();
        assert_eq!(error.to_string(), "Storage error: IO error: read-only");
        assert!(matches!(error, GenerateError::Storage(StorageError::Io(_))));
    }

    #[test]
    fn test_generate_error_from_storage_error() {
        let storage = StorageError::Rejected("nope".to_string());
        let error: GenerateError = storage.into();
        match error {
            GenerateError::Storage(_) => {}
            _ => panic!("Expected Storage variant"),
        }
    }

    #[test]
    fn test_generate_error_from_config_error() {
        let error: GenerateError = ConfigError::InvalidQuality(150).into();
        assert_eq!(
            error.to_string(),
            "Configuration error: Invalid quality: 150 (expected 1-100)"
        );
    }
}
