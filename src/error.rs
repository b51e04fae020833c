//! Error types for solver configuration and construction.

use thiserror::Error;

/// Errors surfaced synchronously by configuration, seeding and frame stepping.
///
/// Coincident particles are not an error: pairs and links whose direction is
/// undefined are skipped and counted in the step statistics instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// Particle radius must be positive and finite.
    #[error("particle radius must be positive and finite")]
    InvalidRadius,
    /// Frame rate must be positive and finite.
    #[error("frame rate must be positive and finite")]
    InvalidFrameRate,
    /// At least one substep per frame is required.
    #[error("substep count must be at least 1")]
    ZeroSubsteps,
    /// Stiffness must be in (0, 1].
    #[error("link stiffness must be in (0, 1]")]
    InvalidStiffness,
    /// Link creation distance must be positive and finite.
    #[error("link creation distance must be positive and finite")]
    InvalidLinkDistance,
    /// Rest length must be non-negative and finite.
    #[error("rest length must be non-negative and finite")]
    InvalidRestLength,
    /// Gravity must be finite.
    #[error("gravity must be finite")]
    InvalidGravity,
    /// Seeding grid spacing must be positive and finite.
    #[error("grid spacing must be positive and finite")]
    InvalidSpacing,
    /// A link must join two distinct particles.
    #[error("link endpoints must be distinct particles (both were {index})")]
    SelfLink { index: usize },
    /// Particle index is out of bounds.
    #[error("particle index {index} out of bounds (count: {count})")]
    ParticleOutOfBounds { index: usize, count: usize },
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn display_includes_indices() {
        let e = SimError::ParticleOutOfBounds { index: 7, count: 3 };
        assert_eq!(e.to_string(), "particle index 7 out of bounds (count: 3)");
        assert_eq!(
            SimError::SelfLink { index: 2 }.to_string(),
            "link endpoints must be distinct particles (both were 2)"
        );
    }
}
