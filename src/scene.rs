//! Decorative sphere scene driven by the calculator's shared animation
//! parameters. Motion has no correctness contract beyond advancing
//! deterministically each tick given the current parameters.

use serde::Serialize;
use std::f32::consts::PI;

const ORBIT_RADIUS: f32 = 6.0;
const BOB_AMPLITUDE: f32 = 0.75;

/// Shared animation parameters, recomputed whenever a new percentage is
/// produced and read (not recomputed) by the render loop every tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnimationParams {
    pub rotation_speed: f32,
    pub scale_multiplier: f32,
}

impl AnimationParams {
    pub fn from_percentage(percentage: f32) -> Self {
        AnimationParams {
            rotation_speed: 0.005 + percentage / 1000.0,
            scale_multiplier: 0.8 + percentage / 200.0,
        }
    }
}

impl Default for AnimationParams {
    /// Base values before any percentage has been computed.
    fn default() -> Self {
        AnimationParams {
            rotation_speed: 0.005,
            scale_multiplier: 0.8,
        }
    }
}

struct Sphere {
    /// Fixed offset along the orbit, `i / count` of a full turn.
    phase: f32,
    spin_rate: f32,
    position: glm::Vec3,
    spin: f32,
    color: [f32; 3],
}

/// Fixed set of spheres orbiting the origin.
pub struct Scene {
    spheres: Vec<Sphere>,
    angle: f32,
}

impl Scene {
    pub fn new(count: usize) -> Self {
        let count = count.max(1);
        let spheres = (0..count)
            .map(|i| {
                let fraction = i as f32 / count as f32;
                let phase = fraction * 2.0 * PI;
                Sphere {
                    phase,
                    spin_rate: 0.01 + 0.002 * i as f32,
                    position: glm::vec3(
                        phase.cos() * ORBIT_RADIUS,
                        0.0,
                        phase.sin() * ORBIT_RADIUS,
                    ),
                    spin: 0.0,
                    color: hsl_to_rgb(fraction, 0.7, 0.55),
                }
            })
            .collect();
        Scene {
            spheres,
            angle: 0.0,
        }
    }

    /// Moves every sphere one tick: circular orbit scaled by the current
    /// multiplier, a vertical bob, and an individual spin.
    pub fn advance(&mut self, params: &AnimationParams) {
        self.angle += params.rotation_speed;
        let radius = ORBIT_RADIUS * params.scale_multiplier;
        for sphere in &mut self.spheres {
            let theta = self.angle + sphere.phase;
            sphere.position = glm::vec3(
                theta.cos() * radius,
                (self.angle * 2.0 + sphere.phase).sin() * BOB_AMPLITUDE,
                theta.sin() * radius,
            );
            sphere.spin += sphere.spin_rate;
        }
    }

    /// Re-derives per-sphere hues from a freshly computed yearly grade
    /// point: `hue = (yearly/10 + i/count) mod 1`.
    pub fn recolor(&mut self, yearly: f32) {
        let count = self.spheres.len() as f32;
        for (i, sphere) in self.spheres.iter_mut().enumerate() {
            let hue = (yearly / 10.0 + i as f32 / count).fract();
            sphere.color = hsl_to_rgb(hue, 0.7, 0.55);
        }
    }

    pub fn snapshot(&self) -> Vec<SphereView> {
        self.spheres
            .iter()
            .map(|s| SphereView {
                position: [s.position.x, s.position.y, s.position.z],
                spin: s.spin,
                color: s.color,
            })
            .collect()
    }
}

/// Per-sphere transform handed to the page's render loop.
#[derive(Debug, Clone, Serialize)]
pub struct SphereView {
    pub position: [f32; 3],
    pub spin: f32,
    pub color: [f32; 3],
}

fn hsl_to_rgb(h: f32, s: f32, l: f32) -> [f32; 3] {
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let h6 = h * 6.0;
    let x = c * (1.0 - (h6 % 2.0 - 1.0).abs());
    let (r, g, b) = match h6 as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = l - c / 2.0;
    [r + m, g + m, b + m]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_params_from_percentage() {
        let params = AnimationParams::from_percentage(77.5);
        assert!(close(params.rotation_speed, 0.005 + 77.5 / 1000.0));
        assert!(close(params.scale_multiplier, 0.8 + 77.5 / 200.0));

        let base = AnimationParams::default();
        assert!(close(base.rotation_speed, 0.005));
        assert!(close(base.scale_multiplier, 0.8));
    }

    #[test]
    fn test_advance_is_deterministic() {
        let params = AnimationParams::from_percentage(67.5);
        let mut a = Scene::new(8);
        let mut b = Scene::new(8);
        for _ in 0..100 {
            a.advance(&params);
            b.advance(&params);
        }
        for (va, vb) in a.snapshot().iter().zip(b.snapshot().iter()) {
            assert_eq!(va.position, vb.position);
            assert_eq!(va.spin, vb.spin);
        }
    }

    #[test]
    fn test_recolor_wraps_hue() {
        let mut full = Scene::new(4);
        let mut zero = Scene::new(4);
        // yearly = 10 puts the first sphere's hue at exactly 1.0, which
        // wraps to the same color as hue 0.
        full.recolor(10.0);
        zero.recolor(0.0);
        assert_eq!(full.snapshot()[0].color, zero.snapshot()[0].color);
    }

    #[test]
    fn test_recolor_gives_distinct_hues() {
        let mut scene = Scene::new(4);
        scene.recolor(8.5);
        let colors: Vec<_> = scene.snapshot().iter().map(|s| s.color).collect();
        assert_ne!(colors[0], colors[1]);
        assert_ne!(colors[1], colors[2]);
    }

    #[test]
    fn test_empty_scene_is_clamped_to_one_sphere() {
        assert_eq!(Scene::new(0).snapshot().len(), 1);
    }
}
