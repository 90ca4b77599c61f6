/// Linear interpolation, exact at both endpoints.
pub(crate) fn lerp(a: f64, b: f64, t: f64) -> f64 {
    if t == 0.0 {
        a
    } else if t == 1.0 {
        b
    } else {
        a + (b - a) * t
    }
}

/// Fraction of the remaining distance covered in `dt` seconds by an exponential follower with
/// rate `lambda` (1/s). Frame-rate independent: two half steps equal one full step.
pub(crate) fn damp_factor(lambda: f64, dt: f64) -> f64 {
    if dt <= 0.0 || lambda <= 0.0 {
        return 0.0;
    }
    1.0 - (-lambda * dt).exp()
}

pub(crate) fn damp(current: f64, target: f64, lambda: f64, dt: f64) -> f64 {
    current + (target - current) * damp_factor(lambda, dt)
}

/// Rate for which `fraction` of a step is absorbed after `secs` seconds.
pub(crate) fn rate_for_fraction(fraction: f64, secs: f64) -> f64 {
    let remaining = (1.0 - fraction).clamp(1e-9, 1.0);
    -remaining.ln() / secs.max(1e-9)
}

#[derive(Clone, Copy, Debug)]
pub struct Rng64 {
    state: u64,
}

impl Rng64 {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn next_u64(&mut self) -> u64 {
        // SplitMix64
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    pub fn next_f64_01(&mut self) -> f64 {
        // 53 bits of precision.
        let v = self.next_u64() >> 11;
        (v as f64) * (1.0 / ((1u64 << 53) as f64))
    }

    pub fn next_index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        (self.next_u64() % len as u64) as usize
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
