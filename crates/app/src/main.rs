//! Entry point for xform.
//! Builds one frame of transforms from `--flag=value` arguments and prints the matrices.

use std::fmt::Write as _;

use anyhow::{Context, Result};
use xform::{
    Angle3D, ClientSize, LightAngle, Perspective, Rotation2D, Scale2D, Scale3D, SpotlightLimits,
    SpotlightScene, Translation2D, Translation3D, camera_space_3d, deg_to_rad, make_clip_space_2d,
    make_clip_space_3d,
};
use xform_core::XformError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    TwoD,
    ThreeD,
    Lighting,
}

#[derive(Clone, Debug, PartialEq)]
struct Config {
    mode: Mode,
    width: u32,
    height: u32,
    translate: [f64; 3],
    rotate: [f64; 3],
    scale: [f64; 3],
    fov: f64,
    near: f64,
    far: f64,
    camera_angle: f64,
    camera_radius: Option<f64>,
    light: LightAngle,
    limits: SpotlightLimits,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: Mode::Lighting,
            width: 1280,
            height: 720,
            translate: [0.0; 3],
            rotate: [0.0; 3],
            scale: [1.0; 3],
            fov: 60.0,
            near: 1.0,
            far: 2000.0,
            camera_angle: 60.0,
            camera_radius: None,
            light: LightAngle::default(),
            limits: SpotlightLimits::default(),
        }
    }
}

fn invalid(flag: &str, value: &str) -> XformError {
    XformError::InvalidParameter(format!("{flag}={value}"))
}

fn parse_f64(flag: &str, value: &str) -> Result<f64, XformError> {
    value.trim().parse::<f64>().map_err(|_| invalid(flag, value))
}

/// Comma-separated numbers; between `min` and `max` of them.
fn parse_list(flag: &str, value: &str, min: usize, max: usize) -> Result<Vec<f64>, XformError> {
    let items = value
        .split(',')
        .map(|v| parse_f64(flag, v))
        .collect::<Result<Vec<_>, _>>()?;
    if items.len() < min || items.len() > max {
        return Err(invalid(flag, value));
    }
    Ok(items)
}

/// Fill `dst` from the front, leaving the remaining defaults untouched.
fn fill(dst: &mut [f64; 3], src: &[f64]) {
    for (d, s) in dst.iter_mut().zip(src) {
        *d = *s;
    }
}

fn parse_config<I, S>(args: I) -> Result<Config, XformError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut cfg = Config::default();
    let mut w: Option<u32> = None;
    let mut h: Option<u32> = None;

    for arg in args {
        let arg = arg.as_ref();
        let Some((flag, value)) = arg.split_once('=') else {
            log::warn!("Ignoring argument '{}' (expected --flag=value).", arg);
            continue;
        };

        match flag {
            "--mode" => {
                cfg.mode = match value.to_ascii_lowercase().as_str() {
                    "2d" => Mode::TwoD,
                    "3d" => Mode::ThreeD,
                    "lighting" | "light" => Mode::Lighting,
                    _ => return Err(invalid(flag, value)),
                }
            }
            "--size" => {
                let (sw, sh) = value
                    .split_once('x')
                    .or_else(|| value.split_once('X'))
                    .ok_or_else(|| invalid(flag, value))?;
                w = Some(sw.parse().map_err(|_| invalid(flag, value))?);
                h = Some(sh.parse().map_err(|_| invalid(flag, value))?);
            }
            "--width" => w = Some(value.parse().map_err(|_| invalid(flag, value))?),
            "--height" => h = Some(value.parse().map_err(|_| invalid(flag, value))?),
            "--translate" => fill(&mut cfg.translate, &parse_list(flag, value, 2, 3)?),
            "--rotate" => fill(&mut cfg.rotate, &parse_list(flag, value, 1, 3)?),
            "--scale" => fill(&mut cfg.scale, &parse_list(flag, value, 2, 3)?),
            "--fov" => cfg.fov = parse_f64(flag, value)?,
            "--near" => cfg.near = parse_f64(flag, value)?,
            "--far" => cfg.far = parse_f64(flag, value)?,
            "--camera-angle" => cfg.camera_angle = parse_f64(flag, value)?,
            "--camera-radius" => cfg.camera_radius = Some(parse_f64(flag, value)?),
            "--light" => {
                let v = parse_list(flag, value, 2, 2)?;
                cfg.light = LightAngle { x: v[0], y: v[1] };
            }
            "--limits" => {
                let v = parse_list(flag, value, 2, 2)?;
                cfg.limits = SpotlightLimits {
                    inner: v[0],
                    outer: v[1],
                };
            }
            other => {
                log::warn!("Unknown flag '{}', ignoring.", other);
            }
        }
    }

    cfg.width = w.unwrap_or(cfg.width).max(1);
    cfg.height = h.unwrap_or(cfg.height).max(1);
    Ok(cfg)
}

fn run(cfg: &Config) -> Result<String> {
    let size = ClientSize::new(f64::from(cfg.width), f64::from(cfg.height));
    let mut out = String::new();

    match cfg.mode {
        Mode::TwoD => {
            let m = make_clip_space_2d(
                &Translation2D {
                    x: cfg.translate[0],
                    y: cfg.translate[1],
                },
                &Rotation2D {
                    angle: cfg.rotate[0],
                },
                &Scale2D {
                    x: cfg.scale[0],
                    y: cfg.scale[1],
                },
                size,
            );
            writeln!(out, "clip space 2d:\n{m}")?;
        }
        Mode::ThreeD => {
            let frustum = Perspective {
                fov: deg_to_rad(cfg.fov),
                aspect: size.aspect(),
                near: cfg.near,
                far: cfg.far,
            };
            let [x, y, z] = cfg.translate;
            let [rot_x, rot_y, rot_z] = cfg.rotate;
            let m = make_clip_space_3d(
                &Translation3D { x, y, z },
                &Angle3D { rot_x, rot_y, rot_z },
                &Scale3D {
                    x: cfg.scale[0],
                    y: cfg.scale[1],
                    z: cfg.scale[2],
                },
                size,
                &frustum,
            );
            writeln!(out, "clip space 3d:\n{m}")?;
        }
        Mode::Lighting => {
            let scene = SpotlightScene {
                fov_deg: cfg.fov,
                z_near: cfg.near,
                z_far: cfg.far,
                ..SpotlightScene::default()
            };
            let frame = scene
                .frame(size, cfg.camera_angle, cfg.light, cfg.limits)
                .context("Failed to build spotlight frame")?;
            writeln!(out, "world:\n{}", frame.world)?;
            writeln!(out, "world view projection:\n{}", frame.world_view_projection)?;
            writeln!(out, "world inverse transpose:\n{}", frame.world_inverse_transpose)?;
            writeln!(out, "light direction: {:?}", frame.light_direction)?;
            writeln!(
                out,
                "limits (cos): inner={:.6} outer={:.6}",
                frame.inner_limit, frame.outer_limit
            )?;
            log::debug!("uniform block: {} bytes", frame.to_gpu().as_bytes().len());
        }
    }

    if let Some(radius) = cfg.camera_radius {
        let camera = camera_space_3d(cfg.camera_angle, radius);
        writeln!(out, "camera space (radius {radius}):\n{camera}")?;
    }

    Ok(out)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cfg = parse_config(std::env::args().skip(1)).context("Invalid command-line arguments")?;
    log::info!(
        "Starting xform. mode={:?}, size={}x{}, camera_angle={}",
        cfg.mode,
        cfg.width,
        cfg.height,
        cfg.camera_angle
    );

    let report = run(&cfg)?;
    print!("{report}");

    log::info!("Done.");
    Ok(())
}
