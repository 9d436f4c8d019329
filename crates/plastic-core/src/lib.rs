// crates/plastic-core/src/lib.rs
pub mod geometry;
pub mod length;
pub mod relation;
pub mod description;
pub mod scene;

pub use geometry::*;
pub use length::*;
pub use relation::*;
pub use description::*;
pub use scene::*;

#[derive(Debug, thiserror::Error)]
pub enum PlasticError {
    #[error("Invalid multiplier: {0} (must be finite and greater than zero)")]
    InvalidMultiplier(f32),

    #[error("Invalid frame: {0}")]
    InvalidFrame(String),

    #[error("Invalid scene: {0}")]
    Scene(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PlasticError>;

/// Checks that a scale multiplier can be applied to design units.
pub fn validate_multiplier(multiplier: f32) -> Result<f32> {
    if multiplier.is_finite() && multiplier > 0.0 {
        Ok(multiplier)
    } else {
        Err(PlasticError::InvalidMultiplier(multiplier))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_multiplier() {
        assert_eq!(validate_multiplier(2.0).unwrap(), 2.0);
        assert!(matches!(validate_multiplier(0.0), Err(PlasticError::InvalidMultiplier(_))));
        assert!(validate_multiplier(-1.0).is_err());
        assert!(validate_multiplier(f32::NAN).is_err());
        assert!(validate_multiplier(f32::INFINITY).is_err());
    }
}
