//! Spotlight scene: per-frame uniforms for a lit object rotating in front of a
//! fixed camera.

use bytemuck::{Pod, Zeroable};
use xform_core::{XformError, XformResult};

use crate::camera::{inverse, look_at, view_matrix, view_project_matrix};
use crate::matrix::{Matrix4x4, Vector3, compose_3d, transpose};
use crate::params::{ClientSize, LightAngle, Perspective, SpotlightLimits};
use crate::projection::perspective;
use crate::transform::{AngleUnit, deg_to_rad, translation_3d, x_rotation_3d, y_rotation_3d};

/// Fixed scene setup. Owned by the caller and passed by reference; nothing
/// here is global.
#[derive(Clone, Debug, PartialEq)]
pub struct SpotlightScene {
    pub camera_position: Vector3,
    pub target: Vector3,
    pub up: Vector3,
    pub light_position: Vector3,
    pub shininess: f64,
    pub color: [f64; 4],
    /// Vertical field of view in degrees.
    pub fov_deg: f64,
    pub z_near: f64,
    pub z_far: f64,
}

impl Default for SpotlightScene {
    fn default() -> Self {
        Self {
            camera_position: [100.0, 150.0, 200.0],
            target: [0.0, 35.0, 0.0],
            up: [0.0, 1.0, 0.0],
            light_position: [40.0, 60.0, 120.0],
            shininess: 150.0,
            color: [0.2, 1.0, 0.2, 1.0],
            fov_deg: 60.0,
            z_near: 1.0,
            z_far: 2000.0,
        }
    }
}

/// Everything the lighting shaders read for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameUniforms {
    pub world: Matrix4x4,
    pub world_view_projection: Matrix4x4,
    pub world_inverse_transpose: Matrix4x4,
    pub view_world_position: Vector3,
    pub light_world_position: Vector3,
    pub light_direction: Vector3,
    /// Cosine of the inner cone angle.
    pub inner_limit: f64,
    /// Cosine of the outer cone angle.
    pub outer_limit: f64,
    pub shininess: f64,
    pub color: [f64; 4],
}

/// Uniform block (std140-compatible, 16-byte aligned).
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct GpuFrameUniforms {
    pub world: [[f32; 4]; 4],
    pub world_view_projection: [[f32; 4]; 4],
    pub world_inverse_transpose: [[f32; 4]; 4],
    pub view_world_position: [f32; 4],
    pub light_world_position: [f32; 4],
    pub light_direction: [f32; 4],
    pub color: [f32; 4],
    /// inner limit, outer limit, shininess, unused.
    pub params: [f32; 4],
}

impl GpuFrameUniforms {
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

fn vec4(v: Vector3) -> [f32; 4] {
    [v[0] as f32, v[1] as f32, v[2] as f32, 0.0]
}

impl FrameUniforms {
    pub fn to_gpu(&self) -> GpuFrameUniforms {
        GpuFrameUniforms {
            world: self.world.to_f32_rows(),
            world_view_projection: self.world_view_projection.to_f32_rows(),
            world_inverse_transpose: self.world_inverse_transpose.to_f32_rows(),
            view_world_position: vec4(self.view_world_position),
            light_world_position: vec4(self.light_world_position),
            light_direction: vec4(self.light_direction),
            color: self.color.map(|c| c as f32),
            params: [
                self.inner_limit as f32,
                self.outer_limit as f32,
                self.shininess as f32,
                0.0,
            ],
        }
    }
}

impl SpotlightScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the uniforms for one frame. `camera_angle` spins the object about
    /// Y (degrees); `light` tilts the spotlight; `limits` are cone angles in
    /// degrees.
    pub fn frame(
        &self,
        client_size: ClientSize,
        camera_angle: f64,
        light: LightAngle,
        limits: SpotlightLimits,
    ) -> XformResult<FrameUniforms> {
        if !(client_size.width > 0.0 && client_size.height > 0.0) {
            return Err(XformError::CanvasSizeRange {
                width: client_size.width,
                height: client_size.height,
            });
        }
        log::debug!(
            "frame: size={}x{}, camera_angle={camera_angle}, light=({}, {}), limits=({}, {})",
            client_size.width,
            client_size.height,
            light.x,
            light.y,
            limits.inner,
            limits.outer
        );

        let projection = perspective(&Perspective {
            fov: deg_to_rad(self.fov_deg),
            aspect: client_size.aspect(),
            near: self.z_near,
            far: self.z_far,
        });
        let camera = look_at(self.camera_position, self.target, self.up);
        let view = view_matrix(&camera);
        let view_projection = view_project_matrix(&projection, &view);

        let world = y_rotation_3d(deg_to_rad(camera_angle), AngleUnit::Radians);
        // The model is authored upside down and offset; flip and recentre it.
        let world_view_projection = compose_3d(
            view_projection,
            &[world, x_rotation_3d(180.0), translation_3d(0.0, -60.0, 0.0)],
        );

        let world_inverse = inverse(&world);
        if world_inverse == Matrix4x4::ZERO {
            log::warn!("world matrix is singular; normals will be zeroed");
        }
        let world_inverse_transpose = transpose(&world_inverse);

        // Both tilt angles rotate about X; the rotation is the outer operand
        // at each step, so the look-at matrix is the one being folded in.
        let mut light_matrix = look_at(self.light_position, self.target, self.up);
        light_matrix = compose_3d(x_rotation_3d(light.x), &[light_matrix]);
        light_matrix = compose_3d(x_rotation_3d(light.y), &[light_matrix]);
        let light_direction = [-light_matrix[8], -light_matrix[9], -light_matrix[10]];

        Ok(FrameUniforms {
            world,
            world_view_projection,
            world_inverse_transpose,
            view_world_position: self.camera_position,
            light_world_position: self.light_position,
            light_direction,
            inner_limit: deg_to_rad(limits.inner).cos(),
            outer_limit: deg_to_rad(limits.outer).cos(),
            shininess: self.shininess,
            color: self.color,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::multiply_3d;
    use crate::vector::{normalize_vector3, subtract_vector3};

    fn default_frame(light: LightAngle) -> FrameUniforms {
        SpotlightScene::new()
            .frame(
                ClientSize::new(1280.0, 720.0),
                60.0,
                light,
                SpotlightLimits::default(),
            )
            .unwrap()
    }

    fn close(a: &[f64], b: &[f64]) -> bool {
        a.iter().zip(b).all(|(x, y)| (x - y).abs() < 1e-9)
    }

    #[test]
    fn frame_is_finite() {
        let f = default_frame(LightAngle::default());
        assert!(f.world.is_finite());
        assert!(f.world_view_projection.is_finite());
        assert!(f.world_inverse_transpose.is_finite());
        assert!(f.light_direction.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn zero_canvas_is_rejected() {
        let err = SpotlightScene::new()
            .frame(
                ClientSize::new(0.0, 720.0),
                0.0,
                LightAngle::default(),
                SpotlightLimits::default(),
            )
            .unwrap_err();
        assert!(matches!(err, XformError::CanvasSizeRange { .. }));
    }

    #[test]
    fn world_view_projection_matches_step_by_step_composition() {
        let scene = SpotlightScene::new();
        let f = default_frame(LightAngle::default());

        let projection = perspective(&Perspective {
            fov: deg_to_rad(60.0),
            aspect: 1280.0 / 720.0,
            near: 1.0,
            far: 2000.0,
        });
        let view = inverse(&look_at(scene.camera_position, scene.target, scene.up));
        let mut wvp = multiply_3d(&[projection, view]).unwrap();
        wvp = multiply_3d(&[wvp, y_rotation_3d(deg_to_rad(60.0), AngleUnit::Radians)]).unwrap();
        wvp = multiply_3d(&[wvp, x_rotation_3d(180.0)]).unwrap();
        wvp = multiply_3d(&[wvp, translation_3d(0.0, -60.0, 0.0)]).unwrap();

        assert_eq!(f.world_view_projection, wvp);
    }

    #[test]
    fn rotation_world_inverse_transpose_is_world() {
        let f = default_frame(LightAngle::default());
        assert!(close(&f.world_inverse_transpose.0, &f.world.0));
    }

    #[test]
    fn untilted_light_points_at_target() {
        let scene = SpotlightScene::new();
        let f = default_frame(LightAngle::default());
        let expected = normalize_vector3(subtract_vector3(scene.target, scene.light_position));
        assert!(close(&f.light_direction, &expected), "{:?}", f.light_direction);
    }

    #[test]
    fn both_light_angles_tilt_about_x() {
        let a = default_frame(LightAngle { x: 30.0, y: 0.0 });
        let b = default_frame(LightAngle { x: 0.0, y: 30.0 });
        assert!(close(&a.light_direction, &b.light_direction));

        let c = default_frame(LightAngle { x: 0.0, y: 0.0 });
        assert!(!close(&a.light_direction, &c.light_direction));
    }

    #[test]
    fn light_tilt_folds_look_at_into_each_rotation() {
        let scene = SpotlightScene::new();
        let f = default_frame(LightAngle { x: 30.0, y: 10.0 });

        let mut lmat = look_at(scene.light_position, scene.target, scene.up);
        lmat = multiply_3d(&[x_rotation_3d(30.0), lmat]).unwrap();
        lmat = multiply_3d(&[x_rotation_3d(10.0), lmat]).unwrap();
        assert_eq!(f.light_direction, [-lmat[8], -lmat[9], -lmat[10]]);
        let expected = [-0.3102, 0.4497, -0.8376];
        assert!(
            f.light_direction
                .iter()
                .zip(expected)
                .all(|(a, b)| (a - b).abs() < 1e-4),
            "{:?}",
            f.light_direction
        );

        let reversed = multiply_3d(&[
            look_at(scene.light_position, scene.target, scene.up),
            x_rotation_3d(30.0),
            x_rotation_3d(10.0),
        ])
        .unwrap();
        assert!(!close(
            &f.light_direction,
            &[-reversed[8], -reversed[9], -reversed[10]]
        ));
    }

    #[test]
    fn limits_become_cosines() {
        let f = default_frame(LightAngle::default());
        assert!((f.inner_limit - 20f64.to_radians().cos()).abs() < 1e-12);
        assert!((f.outer_limit - 40f64.to_radians().cos()).abs() < 1e-12);
        assert!(f.inner_limit > f.outer_limit);
    }

    #[test]
    fn gpu_block_layout() {
        let f = default_frame(LightAngle::default());
        let gpu = f.to_gpu();
        assert_eq!(gpu.as_bytes().len(), 3 * 64 + 5 * 16);
        assert_eq!(gpu.view_world_position, [100.0, 150.0, 200.0, 0.0]);
        assert_eq!(gpu.params[2], 150.0);
        assert_eq!(gpu.color, [0.2, 1.0, 0.2, 1.0]);
    }
}
