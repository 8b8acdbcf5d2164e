//! Light sources as seen from a shaded point.

use crate::Color;
use lumen_core::{LightData, LightKind};
use lumen_math::Vec3;

/// Direction and distance from a surface point to a light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Incidence {
    /// Unit vector from the point towards the light
    pub to_light: Vec3,
    /// Distance to the light; infinite for directional lights
    pub distance: f32,
}

/// A light ready for shading.
#[derive(Debug, Clone)]
pub struct Light {
    kind: LightKind,
    color: Color,
    position: Vec3,
    direction: Vec3,
    attenuation: Vec3,
    angle: f32,
    penumbra: f32,
}

impl Light {
    pub fn new(data: &LightData) -> Self {
        Self {
            kind: data.kind,
            color: data.color,
            position: data.position,
            direction: data.direction.normalize_or_zero(),
            attenuation: data.attenuation,
            angle: data.angle,
            penumbra: data.penumbra,
        }
    }

    pub fn kind(&self) -> LightKind {
        self.kind
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Unit emission direction (directional and spot lights).
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    pub fn incidence(&self, p: Vec3) -> Incidence {
        match self.kind {
            LightKind::Directional => Incidence {
                to_light: -self.direction,
                distance: f32::INFINITY,
            },
            LightKind::Point | LightKind::Spot => {
                let offset = self.position - p;
                Incidence {
                    to_light: offset.normalize_or_zero(),
                    distance: offset.length(),
                }
            }
        }
    }

    /// Distance attenuation `min(1, 1 / (c0 + c1 d + c2 d^2))`.
    pub fn attenuation(&self, distance: f32) -> f32 {
        if self.kind == LightKind::Directional {
            return 1.0;
        }

        let c = self.attenuation;
        let denominator = c.x + c.y * distance + c.z * distance * distance;
        if denominator <= 0.0 {
            1.0
        } else {
            (1.0 / denominator).min(1.0)
        }
    }

    /// Angular falloff of a spot light at `p`; 1 for every other kind.
    ///
    /// Full intensity inside `angle - penumbra`, none outside `angle`, and a
    /// smooth Hermite ramp between.
    pub fn falloff(&self, p: Vec3) -> f32 {
        if self.kind != LightKind::Spot {
            return 1.0;
        }

        let Some(to_point) = (p - self.position).try_normalize() else {
            return 1.0;
        };
        let theta = to_point.dot(self.direction).clamp(-1.0, 1.0).acos();

        let outer = self.angle;
        let inner = self.angle - self.penumbra;
        if theta <= inner {
            1.0
        } else if theta >= outer {
            0.0
        } else {
            let x = (theta - inner) / (outer - inner);
            1.0 - x * x * (3.0 - 2.0 * x)
        }
    }
}
