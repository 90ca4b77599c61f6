use crate::foundation::error::{VitrineError, VitrineResult};

/// Easing curve mapping linear progress to eased progress.
///
/// Every curve is pinned: `apply(0.0) == 0.0` and `apply(1.0) == 1.0`. `OutBack` and
/// `OutElastic` overshoot in between.
///
/// Curves serialize as GSAP-style names (`"power3.out"`, `"back.out(1.7)"`), see [`Ease::parse`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Ease {
    Linear,
    InQuad,
    OutQuad,
    InOutQuad,
    InCubic,
    OutCubic,
    InOutCubic,
    InQuart,
    OutQuart,
    InOutQuart,
    InQuint,
    OutQuint,
    InOutQuint,
    OutExpo,
    OutBack { overshoot: f64 },
    OutElastic { amplitude: f64, period: f64 },
}

impl Default for Ease {
    fn default() -> Self {
        // GSAP's default ease.
        Self::OutQuad
    }
}

const BACK_OVERSHOOT: f64 = 1.70158;

fn in_pow(t: f64, n: i32) -> f64 {
    t.powi(n)
}

fn out_pow(t: f64, n: i32) -> f64 {
    1.0 - (1.0 - t).powi(n)
}

fn in_out_pow(t: f64, n: i32) -> f64 {
    if t < 0.5 {
        2f64.powi(n - 1) * t.powi(n)
    } else {
        1.0 - ((-2.0 * t + 2.0).powi(n) / 2.0)
    }
}

impl Ease {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        if t == 0.0 || t == 1.0 {
            return t;
        }
        match self {
            Self::Linear => t,
            Self::InQuad => in_pow(t, 2),
            Self::OutQuad => out_pow(t, 2),
            Self::InOutQuad => in_out_pow(t, 2),
            Self::InCubic => in_pow(t, 3),
            Self::OutCubic => out_pow(t, 3),
            Self::InOutCubic => in_out_pow(t, 3),
            Self::InQuart => in_pow(t, 4),
            Self::OutQuart => out_pow(t, 4),
            Self::InOutQuart => in_out_pow(t, 4),
            Self::InQuint => in_pow(t, 5),
            Self::OutQuint => out_pow(t, 5),
            Self::InOutQuint => in_out_pow(t, 5),
            Self::OutExpo => 1.0 - 2f64.powf(-10.0 * t),
            Self::OutBack { overshoot } => {
                let c3 = overshoot + 1.0;
                let u = t - 1.0;
                1.0 + c3 * u.powi(3) + overshoot * u.powi(2)
            }
            Self::OutElastic { amplitude, period } => {
                let a = amplitude.max(1.0);
                let p = period.max(1e-3);
                let s = p / std::f64::consts::TAU * (1.0 / a).asin();
                a * 2f64.powf(-10.0 * t) * ((t - s) * std::f64::consts::TAU / p).sin() + 1.0
            }
        }
    }

    /// Parse a GSAP-style ease name.
    ///
    /// Accepted: `none`/`linear`, `power1..4` and `quad|cubic|quart|quint` with an optional
    /// `.in`/`.out`/`.inOut` suffix (default `.out`), `expo.out`, `back.out(<overshoot>)`,
    /// `elastic.out(<amplitude>, <period>)`.
    pub fn parse(name: &str) -> VitrineResult<Self> {
        let raw = name.trim().to_ascii_lowercase();
        let (head, args) = split_args(&raw)?;

        let (family, dir) = match head.split_once('.') {
            Some((f, d)) => (f, d),
            None => (head, "out"),
        };

        let no_args = |ease: Self| -> VitrineResult<Self> {
            if args.is_empty() {
                Ok(ease)
            } else {
                Err(VitrineError::animation(format!(
                    "ease '{name}' does not take parameters"
                )))
            }
        };

        let degree = match family {
            "none" | "linear" => return no_args(Self::Linear),
            "power1" | "quad" => 2,
            "power2" | "cubic" => 3,
            "power3" | "quart" => 4,
            "power4" | "quint" => 5,
            "expo" if dir == "out" => return no_args(Self::OutExpo),
            "back" if dir == "out" => {
                let overshoot = match args.as_slice() {
                    [] => BACK_OVERSHOOT,
                    [s] => *s,
                    _ => {
                        return Err(VitrineError::animation(format!(
                            "ease '{name}' takes at most one parameter"
                        )));
                    }
                };
                return Ok(Self::OutBack { overshoot });
            }
            "elastic" if dir == "out" => {
                let (amplitude, period) = match args.as_slice() {
                    [] => (1.0, 0.3),
                    [a] => (*a, 0.3),
                    [a, p] => (*a, *p),
                    _ => {
                        return Err(VitrineError::animation(format!(
                            "ease '{name}' takes at most two parameters"
                        )));
                    }
                };
                if period <= 0.0 {
                    return Err(VitrineError::animation("elastic period must be > 0"));
                }
                return Ok(Self::OutElastic { amplitude, period });
            }
            _ => {
                return Err(VitrineError::animation(format!("unknown ease '{name}'")));
            }
        };

        let ease = match (degree, dir) {
            (2, "in") => Self::InQuad,
            (2, "out") => Self::OutQuad,
            (2, "inout") => Self::InOutQuad,
            (3, "in") => Self::InCubic,
            (3, "out") => Self::OutCubic,
            (3, "inout") => Self::InOutCubic,
            (4, "in") => Self::InQuart,
            (4, "out") => Self::OutQuart,
            (4, "inout") => Self::InOutQuart,
            (5, "in") => Self::InQuint,
            (5, "out") => Self::OutQuint,
            (5, "inout") => Self::InOutQuint,
            _ => {
                return Err(VitrineError::animation(format!(
                    "unknown ease direction in '{name}'"
                )));
            }
        };
        no_args(ease)
    }

    /// Canonical name, accepted back by [`Ease::parse`].
    pub fn name(self) -> String {
        match self {
            Self::Linear => "none".to_string(),
            Self::InQuad => "power1.in".to_string(),
            Self::OutQuad => "power1.out".to_string(),
            Self::InOutQuad => "power1.inOut".to_string(),
            Self::InCubic => "power2.in".to_string(),
            Self::OutCubic => "power2.out".to_string(),
            Self::InOutCubic => "power2.inOut".to_string(),
            Self::InQuart => "power3.in".to_string(),
            Self::OutQuart => "power3.out".to_string(),
            Self::InOutQuart => "power3.inOut".to_string(),
            Self::InQuint => "power4.in".to_string(),
            Self::OutQuint => "power4.out".to_string(),
            Self::InOutQuint => "power4.inOut".to_string(),
            Self::OutExpo => "expo.out".to_string(),
            Self::OutBack { overshoot } => format!("back.out({overshoot})"),
            Self::OutElastic { amplitude, period } => {
                format!("elastic.out({amplitude}, {period})")
            }
        }
    }
}

fn split_args(raw: &str) -> VitrineResult<(&str, Vec<f64>)> {
    let Some(open) = raw.find('(') else {
        return Ok((raw, Vec::new()));
    };
    let Some(inner) = raw[open + 1..].strip_suffix(')') else {
        return Err(VitrineError::animation(format!(
            "ease '{raw}' has unbalanced parentheses"
        )));
    };
    let mut args = Vec::new();
    for part in inner.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let v: f64 = part.parse().map_err(|_| {
            VitrineError::animation(format!("ease '{raw}' has a non-numeric parameter"))
        })?;
        if !v.is_finite() {
            return Err(VitrineError::animation(format!(
                "ease '{raw}' has a non-finite parameter"
            )));
        }
        args.push(v);
    }
    Ok((raw[..open].trim(), args))
}

impl TryFrom<String> for Ease {
    type Error = VitrineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Ease> for String {
    fn from(value: Ease) -> Self {
        value.name()
    }
}

impl std::str::FromStr for Ease {
    type Err = VitrineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
