//! Camera and view matrices: inverse, lookAt, view/projection helpers.

use crate::matrix::{Matrix4x4, Vector3, compose_3d};
use crate::transform::{AngleUnit, translation_3d, y_rotation_3d};
use crate::vector::{cross_vector3, normalize_vector3, subtract_vector3};

/// Default orbit radius for [`camera_space_3d`].
pub const DEFAULT_CAMERA_RADIUS: f64 = 200.0;

/// General 4x4 inverse by cofactor expansion.
///
/// A singular matrix (zero determinant, or one whose reciprocal overflows)
/// inverts to the zero matrix instead of producing `inf`/`NaN` entries.
pub fn inverse(m: &Matrix4x4) -> Matrix4x4 {
    let [
        m00, m01, m02, m03, //
        m10, m11, m12, m13, //
        m20, m21, m22, m23, //
        m30, m31, m32, m33,
    ] = m.0;

    let tmp_0 = m22 * m33;
    let tmp_1 = m32 * m23;
    let tmp_2 = m12 * m33;
    let tmp_3 = m32 * m13;
    let tmp_4 = m12 * m23;
    let tmp_5 = m22 * m13;
    let tmp_6 = m02 * m33;
    let tmp_7 = m32 * m03;
    let tmp_8 = m02 * m23;
    let tmp_9 = m22 * m03;
    let tmp_10 = m02 * m13;
    let tmp_11 = m12 * m03;
    let tmp_12 = m20 * m31;
    let tmp_13 = m30 * m21;
    let tmp_14 = m10 * m31;
    let tmp_15 = m30 * m11;
    let tmp_16 = m10 * m21;
    let tmp_17 = m20 * m11;
    let tmp_18 = m00 * m31;
    let tmp_19 = m30 * m01;
    let tmp_20 = m00 * m21;
    let tmp_21 = m20 * m01;
    let tmp_22 = m00 * m11;
    let tmp_23 = m10 * m01;

    let t0 = tmp_0 * m11 + tmp_3 * m21 + tmp_4 * m31 - (tmp_1 * m11 + tmp_2 * m21 + tmp_5 * m31);
    let t1 = tmp_1 * m01 + tmp_6 * m21 + tmp_9 * m31 - (tmp_0 * m01 + tmp_7 * m21 + tmp_8 * m31);
    let t2 =
        tmp_2 * m01 + tmp_7 * m11 + tmp_10 * m31 - (tmp_3 * m01 + tmp_6 * m11 + tmp_11 * m31);
    let t3 =
        tmp_5 * m01 + tmp_8 * m11 + tmp_11 * m21 - (tmp_4 * m01 + tmp_9 * m11 + tmp_10 * m21);

    let d = 1.0 / (m00 * t0 + m10 * t1 + m20 * t2 + m30 * t3);
    let d = if d.is_infinite() { 0.0 } else { d };

    Matrix4x4([
        d * t0,
        d * t1,
        d * t2,
        d * t3,
        d * (tmp_1 * m10 + tmp_2 * m20 + tmp_5 * m30 - (tmp_0 * m10 + tmp_3 * m20 + tmp_4 * m30)),
        d * (tmp_0 * m00 + tmp_7 * m20 + tmp_8 * m30 - (tmp_1 * m00 + tmp_6 * m20 + tmp_9 * m30)),
        d * (tmp_3 * m00 + tmp_6 * m10 + tmp_11 * m30
            - (tmp_2 * m00 + tmp_7 * m10 + tmp_10 * m30)),
        d * (tmp_4 * m00 + tmp_9 * m10 + tmp_10 * m20
            - (tmp_5 * m00 + tmp_8 * m10 + tmp_11 * m20)),
        d * (tmp_12 * m13 + tmp_15 * m23 + tmp_16 * m33
            - (tmp_13 * m13 + tmp_14 * m23 + tmp_17 * m33)),
        d * (tmp_13 * m03 + tmp_18 * m23 + tmp_21 * m33
            - (tmp_12 * m03 + tmp_19 * m23 + tmp_20 * m33)),
        d * (tmp_14 * m03 + tmp_19 * m13 + tmp_22 * m33
            - (tmp_15 * m03 + tmp_18 * m13 + tmp_23 * m33)),
        d * (tmp_17 * m03 + tmp_20 * m13 + tmp_23 * m23
            - (tmp_16 * m03 + tmp_21 * m13 + tmp_22 * m23)),
        d * (tmp_14 * m22 + tmp_17 * m32 + tmp_13 * m12
            - (tmp_16 * m32 + tmp_12 * m12 + tmp_15 * m22)),
        d * (tmp_20 * m32 + tmp_12 * m02 + tmp_19 * m22
            - (tmp_18 * m22 + tmp_21 * m32 + tmp_13 * m02)),
        d * (tmp_18 * m12 + tmp_23 * m32 + tmp_15 * m02
            - (tmp_22 * m32 + tmp_14 * m02 + tmp_19 * m12)),
        d * (tmp_22 * m22 + tmp_16 * m02 + tmp_21 * m12
            - (tmp_20 * m12 + tmp_23 * m22 + tmp_17 * m02)),
    ])
}

/// Camera-to-world matrix looking from `camera_position` at `target`.
///
/// Rows 0..2 hold the x/y/z basis (z points away from the target), row 3 the
/// position. Invert it (see [`view_matrix`]) to get a view matrix.
pub fn look_at(camera_position: Vector3, target: Vector3, up: Vector3) -> Matrix4x4 {
    let z_axis = normalize_vector3(subtract_vector3(camera_position, target));
    let x_axis = normalize_vector3(cross_vector3(up, z_axis));
    let y_axis = normalize_vector3(cross_vector3(z_axis, x_axis));

    Matrix4x4([
        x_axis[0],
        x_axis[1],
        x_axis[2],
        0.0,
        y_axis[0],
        y_axis[1],
        y_axis[2],
        0.0,
        z_axis[0],
        z_axis[1],
        z_axis[2],
        0.0,
        camera_position[0],
        camera_position[1],
        camera_position[2],
        1.0,
    ])
}

#[inline]
pub fn view_matrix(camera_matrix: &Matrix4x4) -> Matrix4x4 {
    inverse(camera_matrix)
}

#[inline]
pub fn view_project_matrix(projection: &Matrix4x4, view: &Matrix4x4) -> Matrix4x4 {
    compose_3d(*projection, &[*view])
}

/// `multiply_3d(m, translation_3d(tx, ty, tz))`.
pub fn translate(m: &Matrix4x4, tx: f64, ty: f64, tz: f64) -> Matrix4x4 {
    compose_3d(*m, &[translation_3d(tx, ty, tz)])
}

/// Camera placed `1.5 * radius` along +Z.
///
/// The Y rotation for `camera_angle` is built and then replaced by the plain
/// translation, so the angle has no effect on the result.
pub fn camera_space_3d(camera_angle: f64, radius: f64) -> Matrix4x4 {
    // TODO: decide whether the orbit rotation should be composed in; doing so
    // changes every caller's camera placement.
    let _rotation = y_rotation_3d(camera_angle, AngleUnit::Degrees);
    translation_3d(0.0, 0.0, radius * 1.5)
}
