//! Projection matrices: pixel space, orthographic box and perspective frustum.

use std::f64::consts::PI;

use crate::matrix::{Matrix3x3, Matrix4x4};
use crate::params::{Orthographic, Perspective};

/// Pixels to clip space, origin at the top-left corner.
pub fn projection_2d(width: f64, height: f64) -> Matrix3x3 {
    Matrix3x3([
        2.0 / width,
        0.0,
        0.0,
        0.0,
        -2.0 / height,
        0.0,
        -1.0,
        1.0,
        1.0,
    ])
}

/// Pixels to clip space in 3D; depth is scaled by `2 / depth` and not shifted.
pub fn projection_3d(width: f64, height: f64, depth: f64) -> Matrix4x4 {
    Matrix4x4([
        2.0 / width,
        0.0,
        0.0,
        0.0,
        0.0,
        -2.0 / height,
        0.0,
        0.0,
        0.0,
        0.0,
        2.0 / depth,
        0.0,
        -1.0,
        1.0,
        0.0,
        1.0,
    ])
}

/// Maps the box to clip space (z into `[-1, 1]`). Degenerate boxes divide by zero.
pub fn orthographic_3d(bounds: &Orthographic) -> Matrix4x4 {
    let Orthographic {
        left,
        right,
        bottom,
        top,
        near,
        far,
    } = *bounds;
    let left_right = (left + right) / (left - right);
    let bottom_top = (bottom + top) / (bottom - top);
    let near_far = (near + far) / (near - far);

    Matrix4x4([
        2.0 / (right - left),
        0.0,
        0.0,
        0.0,
        0.0,
        2.0 / (top - bottom),
        0.0,
        0.0,
        0.0,
        0.0,
        2.0 / (near - far),
        0.0,
        left_right,
        bottom_top,
        near_far,
        1.0,
    ])
}

/// OpenGL-style perspective with `f = tan(π/2 − fov/2)`.
pub fn perspective(frustum: &Perspective) -> Matrix4x4 {
    let Perspective {
        fov,
        aspect,
        near,
        far,
    } = *frustum;
    let f = (PI * 0.5 - 0.5 * fov).tan();
    let range_inv = 1.0 / (near - far);

    Matrix4x4([
        f / aspect,
        0.0,
        0.0,
        0.0,
        0.0,
        f,
        0.0,
        0.0,
        0.0,
        0.0,
        (near + far) * range_inv,
        -1.0,
        0.0,
        0.0,
        near * far * range_inv * 2.0,
        0.0,
    ])
}
