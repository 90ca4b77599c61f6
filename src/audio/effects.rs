use crate::{
    audio::cue::{AudioCue, CUE_SAMPLE_RATE, SoundPreset, mix_cues},
    foundation::error::{VitrineError, VitrineResult},
};

/// Fire-and-forget tone output.
pub trait AudioSynth {
    fn play(&mut self, cue: &AudioCue) -> VitrineResult<()>;
}

impl AudioSynth for Box<dyn AudioSynth> {
    fn play(&mut self, cue: &AudioCue) -> VitrineResult<()> {
        (**self).play(cue)
    }
}

/// Renders cues in memory; the last rendered buffer is kept for inspection.
#[derive(Clone, Debug)]
pub struct OfflineSynth {
    pub sample_rate: u32,
    pub played: Vec<AudioCue>,
    pub last_render: Vec<f32>,
}

impl Default for OfflineSynth {
    fn default() -> Self {
        Self {
            sample_rate: CUE_SAMPLE_RATE,
            played: Vec::new(),
            last_render: Vec::new(),
        }
    }
}

impl AudioSynth for OfflineSynth {
    fn play(&mut self, cue: &AudioCue) -> VitrineResult<()> {
        cue.validate()?;
        self.last_render = mix_cues(std::slice::from_ref(cue), self.sample_rate);
        self.played.push(*cue);
        Ok(())
    }
}

/// Stand-in for hosts without any audio backend.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoAudio;

impl AudioSynth for NoAudio {
    fn play(&mut self, _cue: &AudioCue) -> VitrineResult<()> {
        Err(VitrineError::audio_unavailable("no audio backend"))
    }
}

/// UI sound effects with a mute switch. Playback failures never reach the caller.
#[derive(Clone, Debug, Default)]
pub struct SoundEffects<S: AudioSynth> {
    synth: S,
    muted: bool,
}

impl<S: AudioSynth> SoundEffects<S> {
    pub fn new(synth: S) -> Self {
        Self {
            synth,
            muted: false,
        }
    }

    pub fn synth(&self) -> &S {
        &self.synth
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Flip the mute switch and return the new value.
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    /// Returns whether every cue of the preset was handed to the synth.
    pub fn play(&mut self, preset: SoundPreset) -> bool {
        if self.muted {
            return false;
        }
        for cue in preset.cues() {
            match self.synth.play(&cue) {
                Ok(()) => {}
                Err(VitrineError::AudioUnavailable(msg)) => {
                    tracing::debug!(?preset, %msg, "sound skipped");
                    return false;
                }
                Err(err) => {
                    tracing::warn!(?preset, error = %err, "sound skipped");
                    return false;
                }
            }
        }
        true
    }

    pub fn hover(&mut self) -> bool {
        self.play(SoundPreset::Hover)
    }

    pub fn click(&mut self) -> bool {
        self.play(SoundPreset::Click)
    }

    pub fn success(&mut self) -> bool {
        self.play(SoundPreset::Success)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/audio/effects.rs"]
mod tests;
