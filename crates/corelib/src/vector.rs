//! Vector helpers on plain arrays.

use crate::matrix::{Matrix4x4, Vector3, Vector4};

/// Lengths at or below this normalize to the zero vector.
pub const NORMALIZE_EPSILON: f64 = 0.00001;

pub fn cross_vector3(a: Vector3, b: Vector3) -> Vector3 {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

pub fn subtract_vector3(a: Vector3, b: Vector3) -> Vector3 {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

/// Unit vector, or `[0, 0, 0]` for (near) zero-length input.
pub fn normalize_vector3(v: Vector3) -> Vector3 {
    let length = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    if length > NORMALIZE_EPSILON {
        [v[0] / length, v[1] / length, v[2] / length]
    } else {
        [0.0, 0.0, 0.0]
    }
}

/// Row vector times matrix, keeping the homogeneous component.
pub fn transform_vector(m: &Matrix4x4, v: Vector4) -> Vector4 {
    let mut dst = [0.0; 4];
    for (i, out) in dst.iter_mut().enumerate() {
        for (j, vj) in v.iter().enumerate() {
            *out += vj * m[j * 4 + i];
        }
    }
    dst
}

/// Transform a point and divide by the resulting `w`. Only `v[0..3]` is read;
/// the point is taken as `w = 1`. A zero `w` is not guarded.
pub fn transform_point(m: &Matrix4x4, v: Vector4) -> Vector3 {
    let [v0, v1, v2, _] = v;
    let d = v0 * m[3] + v1 * m[7] + v2 * m[11] + m[15];

    [
        (v0 * m[0] + v1 * m[4] + v2 * m[8] + m[12]) / d,
        (v0 * m[1] + v1 * m[5] + v2 * m[9] + m[13]) / d,
        (v0 * m[2] + v1 * m[6] + v2 * m[10] + m[14]) / d,
    ]
}
