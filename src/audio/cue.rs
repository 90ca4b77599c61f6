use crate::foundation::error::{VitrineError, VitrineResult};

/// Sample rate used when a cue is rendered offline.
pub const CUE_SAMPLE_RATE: u32 = 44_100;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

impl Waveform {
    /// Oscillator output in `[-1, 1]` at `phase` cycles.
    pub fn sample(self, phase: f64) -> f64 {
        let p = phase - phase.floor();
        match self {
            Self::Sine => (std::f64::consts::TAU * p).sin(),
            Self::Square => {
                if p < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Self::Sawtooth => 2.0 * p - 1.0,
            Self::Triangle => 1.0 - 4.0 * (p - 0.5).abs(),
        }
    }
}

/// Exponential decay from `peak` to `floor` over the cue's duration.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GainEnvelope {
    pub peak: f32,
    #[serde(default = "default_floor")]
    pub floor: f32,
}

fn default_floor() -> f32 {
    0.001
}

impl GainEnvelope {
    pub fn new(peak: f32) -> Self {
        Self {
            peak,
            floor: default_floor(),
        }
    }

    /// Gain at `t` seconds into a cue lasting `duration` seconds.
    pub fn at(&self, t: f64, duration: f64) -> f32 {
        if duration <= 0.0 || self.peak <= 0.0 {
            return 0.0;
        }
        let x = (t / duration).clamp(0.0, 1.0);
        let ratio = f64::from(self.floor) / f64::from(self.peak);
        (f64::from(self.peak) * ratio.powf(x)) as f32
    }
}

/// Short synthesized tone. Transient: rendered and dropped.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AudioCue {
    pub frequency_hz: f64,
    pub duration_secs: f64,
    pub waveform: Waveform,
    pub gain: GainEnvelope,
    #[serde(default)]
    pub start_delay_secs: f64,
}

impl AudioCue {
    pub fn new(frequency_hz: f64, duration_secs: f64, waveform: Waveform, peak: f32) -> Self {
        Self {
            frequency_hz,
            duration_secs,
            waveform,
            gain: GainEnvelope::new(peak),
            start_delay_secs: 0.0,
        }
    }

    pub fn with_delay(mut self, start_delay_secs: f64) -> Self {
        self.start_delay_secs = start_delay_secs;
        self
    }

    pub fn validate(&self) -> VitrineResult<()> {
        if !self.frequency_hz.is_finite() || self.frequency_hz <= 0.0 {
            return Err(VitrineError::validation("AudioCue frequency must be > 0"));
        }
        if !self.duration_secs.is_finite() || self.duration_secs <= 0.0 {
            return Err(VitrineError::validation("AudioCue duration must be > 0"));
        }
        if !self.start_delay_secs.is_finite() || self.start_delay_secs < 0.0 {
            return Err(VitrineError::validation("AudioCue start delay must be >= 0"));
        }
        if !(self.gain.peak.is_finite() && self.gain.peak >= 0.0 && self.gain.peak <= 1.0) {
            return Err(VitrineError::validation("AudioCue peak gain must be in [0, 1]"));
        }
        if !(self.gain.floor > 0.0 && self.gain.floor.is_finite()) {
            return Err(VitrineError::validation("AudioCue gain floor must be > 0"));
        }
        Ok(())
    }

    pub fn end_secs(&self) -> f64 {
        self.start_delay_secs + self.duration_secs
    }
}

/// Named UI sounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoundPreset {
    Hover,
    Click,
    Success,
}

impl SoundPreset {
    pub fn cues(self) -> Vec<AudioCue> {
        match self {
            Self::Hover => vec![AudioCue::new(800.0, 0.05, Waveform::Sine, 0.03)],
            Self::Click => vec![
                AudioCue::new(600.0, 0.1, Waveform::Square, 0.05),
                AudioCue::new(900.0, 0.08, Waveform::Sine, 0.03).with_delay(0.05),
            ],
            // C5, E5, G5
            Self::Success => vec![
                AudioCue::new(523.0, 0.1, Waveform::Sine, 0.05),
                AudioCue::new(659.0, 0.1, Waveform::Sine, 0.05).with_delay(0.1),
                AudioCue::new(784.0, 0.15, Waveform::Sine, 0.05).with_delay(0.2),
            ],
        }
    }
}

/// Render a cue to mono samples, including its start delay as leading silence.
pub fn synthesize(cue: &AudioCue, sample_rate: u32) -> Vec<f32> {
    if sample_rate == 0 || cue.validate().is_err() {
        return Vec::new();
    }
    let sr = f64::from(sample_rate);
    let lead = (cue.start_delay_secs * sr).round() as usize;
    let len = (cue.duration_secs * sr).round() as usize;

    let mut out = vec![0.0f32; lead + len];
    for (i, s) in out[lead..].iter_mut().enumerate() {
        let t = i as f64 / sr;
        let v = cue.waveform.sample(cue.frequency_hz * t) as f32;
        *s = (v * cue.gain.at(t, cue.duration_secs)).clamp(-1.0, 1.0);
    }
    out
}

/// Render several cues into one buffer, summing overlaps.
pub fn mix_cues(cues: &[AudioCue], sample_rate: u32) -> Vec<f32> {
    let mut out = Vec::<f32>::new();
    for cue in cues {
        let rendered = synthesize(cue, sample_rate);
        if rendered.len() > out.len() {
            out.resize(rendered.len(), 0.0);
        }
        for (dst, src) in out.iter_mut().zip(&rendered) {
            *dst += *src;
        }
    }
    for s in &mut out {
        *s = s.clamp(-1.0, 1.0);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/audio/cue.rs"]
mod tests;
