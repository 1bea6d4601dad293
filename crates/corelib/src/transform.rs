use std::f64::consts::PI;

use crate::matrix::{Matrix3x3, Matrix4x4, compose_2d, compose_3d};
use crate::params::{
    Angle3D, ClientSize, Perspective, Rotation2D, Scale2D, Scale3D, Translation2D, Translation3D,
};
use crate::projection::{perspective, projection_2d};

/// Unit of the angle handed to [`y_rotation_3d`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AngleUnit {
    Degrees,
    /// Already converted by the caller (camera-angle path).
    Radians,
}

#[inline]
pub fn deg_to_rad(angle: f64) -> f64 {
    (angle * PI) / 180.0
}

#[inline]
pub fn rad_to_deg(radian: f64) -> f64 {
    (radian * 180.0) / PI
}

/// Round the exact binary value of `v` to two decimals, ties away from zero.
///
/// `v * 100.0` alone can land on a `.5` tie the exact value never reaches
/// (`0.995` is really `0.99499...`), so the tie test is done on `200 * |v|`
/// recovered exactly as `p + err` via a fused multiply-add.
fn round_2(v: f64) -> f64 {
    if !v.is_finite() {
        return v;
    }
    let a = v.abs();
    let lower = (a * 100.0).floor();
    let p = a * 200.0;
    let err = a.mul_add(200.0, -p);
    let mid = 2.0 * lower + 1.0;
    // 200 * a >= mid, compared without rounding near the tie.
    let n = if p - mid >= -err { lower + 1.0 } else { lower };
    (n / 100.0).copysign(v)
}

pub fn translation_2d(tx: f64, ty: f64) -> Matrix3x3 {
    Matrix3x3([1.0, 0.0, 0.0, 0.0, 1.0, 0.0, tx, ty, 1.0])
}

/// 2D rotation. Sine and cosine are rounded to two decimals before use, so the
/// result is not exactly orthogonal.
pub fn rotation_2d(angle_rad: f64) -> Matrix3x3 {
    let sin = round_2(angle_rad.sin());
    let cos = round_2(angle_rad.cos());
    Matrix3x3([cos, -sin, 0.0, sin, cos, 0.0, 0.0, 0.0, 1.0])
}

pub fn scale_2d(sx: f64, sy: f64) -> Matrix3x3 {
    Matrix3x3([sx, 0.0, 0.0, 0.0, sy, 0.0, 0.0, 0.0, 1.0])
}

/// Pixel-space transform to clip space: `projection ∘ translation ∘ rotation ∘ scale`.
pub fn make_clip_space_2d(
    translation: &Translation2D,
    rotation: &Rotation2D,
    scale: &Scale2D,
    client_size: ClientSize,
) -> Matrix3x3 {
    let translation = translation_2d(translation.x, translation.y);
    let rotation = rotation_2d(deg_to_rad(rotation.angle));
    let scale = scale_2d(scale.x, scale.y);
    let projection = projection_2d(client_size.width, client_size.height);

    compose_2d(projection, &[translation, rotation, scale])
}

pub fn translation_3d(tx: f64, ty: f64, tz: f64) -> Matrix4x4 {
    Matrix4x4([
        1.0, 0.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, //
        tx, ty, tz, 1.0,
    ])
}

pub fn x_rotation_3d(angle_deg: f64) -> Matrix4x4 {
    let (sin, cos) = deg_to_rad(angle_deg).sin_cos();
    Matrix4x4([
        1.0, 0.0, 0.0, 0.0, //
        0.0, cos, sin, 0.0, //
        0.0, -sin, cos, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    ])
}

/// The only axis builder that can take radians directly.
pub fn y_rotation_3d(angle: f64, unit: AngleUnit) -> Matrix4x4 {
    let rad = match unit {
        AngleUnit::Degrees => deg_to_rad(angle),
        AngleUnit::Radians => angle,
    };
    let (sin, cos) = rad.sin_cos();
    Matrix4x4([
        cos, 0.0, -sin, 0.0, //
        0.0, 1.0, 0.0, 0.0, //
        sin, 0.0, cos, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    ])
}

pub fn z_rotation_3d(angle_deg: f64) -> Matrix4x4 {
    let (sin, cos) = deg_to_rad(angle_deg).sin_cos();
    Matrix4x4([
        cos, sin, 0.0, 0.0, //
        -sin, cos, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    ])
}

pub fn scale_3d(sx: f64, sy: f64, sz: f64) -> Matrix4x4 {
    Matrix4x4([
        sx, 0.0, 0.0, 0.0, //
        0.0, sy, 0.0, 0.0, //
        0.0, 0.0, sz, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    ])
}

/// Model transform through a perspective frustum:
/// `perspective ∘ translation ∘ x ∘ y ∘ z ∘ scale`. Rotations are in degrees.
///
/// `_client_size` is kept for symmetry with [`make_clip_space_2d`]; the
/// frustum's aspect already carries it.
pub fn make_clip_space_3d(
    translation: &Translation3D,
    rotation: &Angle3D,
    scale: &Scale3D,
    _client_size: ClientSize,
    frustum: &Perspective,
) -> Matrix4x4 {
    let projection = perspective(frustum);
    let translation = translation_3d(translation.x, translation.y, translation.z);
    let x_rotation = x_rotation_3d(rotation.rot_x);
    let y_rotation = y_rotation_3d(rotation.rot_y, AngleUnit::Degrees);
    let z_rotation = z_rotation_3d(rotation.rot_z);
    let scale = scale_3d(scale.x, scale.y, scale.z);

    compose_3d(
        projection,
        &[translation, x_rotation, y_rotation, z_rotation, scale],
    )
}
