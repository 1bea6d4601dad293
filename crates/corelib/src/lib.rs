//! Transform engine: flat row-major matrices for 2D/3D WebGL-style pipelines,
//! camera and projection helpers, and the spotlight scene built on them.
//!
//! Every function is pure: inputs are copied, outputs are fresh arrays, and
//! there is no cached scratch state, so callers on any thread can share it.

pub use glam::{DMat3, DMat4, DVec3};
pub use xform_core::{XformError, XformResult};

pub mod camera;
pub mod matrix;
pub mod params;
pub mod projection;
pub mod scene;
pub mod transform;
pub mod vector;

pub use camera::{
    DEFAULT_CAMERA_RADIUS, camera_space_3d, inverse, look_at, translate, view_matrix,
    view_project_matrix,
};
pub use matrix::{Matrix3x3, Matrix4x4, Vector3, Vector4, multiply_2d, multiply_3d, transpose};
pub use params::*;
pub use projection::{orthographic_3d, perspective, projection_2d, projection_3d};
pub use scene::{FrameUniforms, GpuFrameUniforms, SpotlightScene};
pub use transform::{
    AngleUnit, deg_to_rad, make_clip_space_2d, make_clip_space_3d, rad_to_deg, rotation_2d,
    scale_2d, scale_3d, translation_2d, translation_3d, x_rotation_3d, y_rotation_3d,
    z_rotation_3d,
};
pub use vector::{
    cross_vector3, normalize_vector3, subtract_vector3, transform_point, transform_vector,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_constants() {
        assert_eq!(Matrix3x3::default(), Matrix3x3::IDENTITY);
        assert_eq!(Matrix4x4::default(), Matrix4x4::IDENTITY);
        assert_eq!(DMat4::from(Matrix4x4::IDENTITY), DMat4::IDENTITY);
        assert_eq!(DMat3::from(Matrix3x3::IDENTITY), DMat3::IDENTITY);
    }

    #[test]
    fn translate_then_scale_matrix() {
        let m = multiply_3d(&[translation_3d(1.0, 2.0, 3.0), scale_3d(2.0, 2.0, 2.0)]).unwrap();
        // Bottom row = translation, diagonal = scale (no rotation).
        assert!((m[12] - 1.0).abs() < 1e-12);
        assert!((m[13] - 2.0).abs() < 1e-12);
        assert!((m[14] - 3.0).abs() < 1e-12);
        assert!((m[0] - 2.0).abs() < 1e-12);
        assert!((m[5] - 2.0).abs() < 1e-12);
        assert!((m[10] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn view_projection_is_finite() {
        let projection = perspective(&Perspective {
            fov: deg_to_rad(60.0),
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 100.0,
        });
        let view = view_matrix(&look_at([0.0, 0.0, 4.0], [0.0, 0.0, 0.0], [0.0, 1.0, 0.0]));
        let pv = view_project_matrix(&projection, &view);
        assert!(pv.is_finite());

        let glam_pv = DMat4::perspective_rh_gl(deg_to_rad(60.0), 16.0 / 9.0, 0.1, 100.0)
            * DMat4::look_at_rh(DVec3::new(0.0, 0.0, 4.0), DVec3::ZERO, DVec3::Y);
        assert!(DMat4::from(pv).abs_diff_eq(glam_pv, 1e-9));
    }

    #[test]
    fn engine_is_shareable_across_threads() {
        let handles: Vec<_> = (0..4)
            .map(|i| {
                std::thread::spawn(move || {
                    let m = y_rotation_3d(i as f64 * 10.0, AngleUnit::Degrees);
                    inverse(&inverse(&m))
                })
            })
            .collect();
        for (i, h) in handles.into_iter().enumerate() {
            let m = h.join().unwrap();
            let expected = y_rotation_3d(i as f64 * 10.0, AngleUnit::Degrees);
            assert!(m.0.iter().zip(expected.0).all(|(a, b)| (a - b).abs() < 1e-12));
        }
    }
}
