/// Easing curves, named after their polynomial degree.
///
/// `Out*` curves decelerate into the end state, which is what every reveal on the
/// site uses. `OutBack` overshoots and settles; `OutElastic` rings around 1.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Ease {
    Linear,
    InQuad,
    OutQuad,
    InOutQuad,
    InCubic,
    OutCubic,
    InOutCubic,
    OutQuart,
    OutQuint,
    OutExpo,
    OutBack { overshoot: f64 },
    OutElastic { amplitude: f64, period: f64 },
}

impl Default for Ease {
    fn default() -> Self {
        Self::OutQuad
    }
}

impl Ease {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
            Self::OutQuart => 1.0 - (1.0 - t).powi(4),
            Self::OutQuint => 1.0 - (1.0 - t).powi(5),
            Self::OutExpo => {
                if t >= 1.0 {
                    1.0
                } else {
                    1.0 - 2f64.powf(-10.0 * t)
                }
            }
            Self::OutBack { overshoot } => {
                let u = t - 1.0;
                1.0 + (overshoot + 1.0) * u.powi(3) + overshoot * u.powi(2)
            }
            Self::OutElastic { amplitude, period } => {
                if t <= 0.0 || t >= 1.0 {
                    return t;
                }
                let amplitude = amplitude.max(1.0);
                let period = if period > 0.0 { period } else { 0.3 };
                let tau = std::f64::consts::TAU;
                let shift = period / tau * (1.0 / amplitude).asin();
                amplitude * 2f64.powf(-10.0 * t) * ((t - shift) * tau / period).sin() + 1.0
            }
        }
    }

    /// GSAP's `power2.out` family, by power index.
    pub fn power_out(power: u8) -> Self {
        match power {
            0 => Self::Linear,
            1 => Self::OutQuad,
            2 => Self::OutCubic,
            3 => Self::OutQuart,
            _ => Self::OutQuint,
        }
    }

    pub fn back_out(overshoot: f64) -> Self {
        Self::OutBack { overshoot }
    }

    pub fn elastic_out(amplitude: f64, period: f64) -> Self {
        Self::OutElastic { amplitude, period }
    }

    /// Whether the curve ever leaves `[0, 1]`.
    pub fn overshoots(self) -> bool {
        matches!(self, Self::OutBack { .. } | Self::OutElastic { .. })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
