//! Scene parameters: plain values rebuilt for every frame.
//!
//! Angles are in degrees unless the field says otherwise.

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Translation2D {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Translation3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// 2D rotation in degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rotation2D {
    pub angle: f64,
}

/// Per-axis rotation in degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Angle3D {
    pub rot_x: f64,
    pub rot_y: f64,
    pub rot_z: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scale2D {
    pub x: f64,
    pub y: f64,
}

impl Default for Scale2D {
    fn default() -> Self {
        Self { x: 1.0, y: 1.0 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scale3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Default for Scale3D {
    fn default() -> Self {
        Self {
            x: 1.0,
            y: 1.0,
            z: 1.0,
        }
    }
}

/// Drawing buffer size in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClientSize {
    pub width: f64,
    pub height: f64,
}

impl ClientSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn aspect(&self) -> f64 {
        self.width / self.height
    }
}

/// Perspective frustum. `fov` is the vertical field of view in radians.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Perspective {
    pub fov: f64,
    pub aspect: f64,
    pub near: f64,
    pub far: f64,
}

/// Box bounds for an orthographic projection. The caller keeps every pair distinct.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Orthographic {
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub top: f64,
    pub near: f64,
    pub far: f64,
}

/// Spotlight aim offsets in degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LightAngle {
    pub x: f64,
    pub y: f64,
}

/// Spotlight cone in degrees. Inside `inner` the light is full, past `outer` it is off.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpotlightLimits {
    pub inner: f64,
    pub outer: f64,
}

impl Default for SpotlightLimits {
    fn default() -> Self {
        Self {
            inner: 20.0,
            outer: 40.0,
        }
    }
}
