use nalgebra::{Point3, Vector3};

/// A light source in the preview scene.
#[derive(Debug, Clone)]
pub enum Light {
    /// Infinitely distant source with parallel rays. `direction` is the
    /// direction the light travels.
    Directional {
        direction: Vector3<f32>,
        color: Vector3<f32>,
        intensity: f32,
    },
    /// Positioned source radiating in all directions, with
    /// (constant, linear, quadratic) distance attenuation.
    Point {
        position: Point3<f32>,
        color: Vector3<f32>,
        intensity: f32,
        attenuation: (f32, f32, f32),
    },
}

impl Light {
    pub fn directional(direction: Vector3<f32>, color: Vector3<f32>, intensity: f32) -> Self {
        Self::Directional {
            direction: direction.normalize(),
            color,
            intensity,
        }
    }

    pub fn point(position: Point3<f32>, color: Vector3<f32>, intensity: f32) -> Self {
        Self::Point {
            position,
            color,
            intensity,
            attenuation: (1.0, 0.09, 0.032),
        }
    }

    /// Direction from the surface point toward the light, and the radiance
    /// arriving there (attenuated for point lights).
    pub fn illumination(&self, surface_point: &Point3<f32>) -> (Vector3<f32>, Vector3<f32>) {
        match self {
            Light::Directional {
                direction,
                color,
                intensity,
            } => (-direction, color * *intensity),
            Light::Point {
                position,
                color,
                intensity,
                attenuation,
            } => {
                let to_light = position - surface_point;
                let distance = to_light.norm();
                let (c, l, q) = attenuation;
                let falloff = 1.0 / (c + l * distance + q * distance * distance);
                (to_light / distance.max(1e-6), color * *intensity * falloff)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn directional_radiance_is_distance_independent() {
        let light = Light::directional(Vector3::new(0.0, -1.0, 0.0), Vector3::new(1.0, 1.0, 1.0), 0.8);
        let (dir, radiance) = light.illumination(&Point3::new(100.0, 0.0, 0.0));
        assert_relative_eq!(dir.y, 1.0);
        assert_relative_eq!(radiance.x, 0.8);
    }

    #[test]
    fn point_radiance_falls_off() {
        let light = Light::point(Point3::origin(), Vector3::new(1.0, 1.0, 1.0), 1.0);
        let (_, near) = light.illumination(&Point3::new(1.0, 0.0, 0.0));
        let (_, far) = light.illumination(&Point3::new(10.0, 0.0, 0.0));
        assert!(near.x > far.x);
    }
}
