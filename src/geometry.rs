use crate::error::ToolError;
use crate::providers::ScreenGeometry;
use crate::types::{Point, ScreenSize};

/// Check a point against the given screen bounds. Both edges are inclusive.
pub fn validate(point: Point, screen: ScreenSize) -> Result<(), ToolError> {
    if point.x < 0.0 || point.y < 0.0 {
        return Err(ToolError::OutOfBounds(format!(
            "Coordinates cannot be negative. Got: {point}"
        )));
    }

    if point.x > f64::from(screen.width) || point.y > f64::from(screen.height) {
        return Err(ToolError::OutOfBounds(format!(
            "Coordinates {point} exceed screen bounds ({screen})"
        )));
    }

    Ok(())
}

/// Validate against the screen size as it is right now. The size is never
/// cached: displays can be attached or rescaled between calls.
pub fn validate_live(geometry: &dyn ScreenGeometry, point: Point) -> Result<(), ToolError> {
    let screen = geometry.size()?;
    validate(point, screen)
}
