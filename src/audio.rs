//! Audio collaborators
//!
//! The simulation only emits [`SoundCue`]s; a sink turns them into sound.
//! On the web the sink synthesizes every effect with Web Audio oscillators,
//! so no sample files are needed.

use crate::sim::SoundCue;

/// Fire-and-forget playback interface
pub trait AudioSink {
    fn play(&mut self, cue: SoundCue);
    fn start_music(&mut self);
    fn stop_music(&mut self);
}

/// Silent sink for native and headless runs
#[derive(Debug, Default)]
pub struct NullAudio {
    pub music_playing: bool,
}

impl AudioSink for NullAudio {
    fn play(&mut self, cue: SoundCue) {
        log::trace!("cue {:?}", cue);
    }

    fn start_music(&mut self) {
        self.music_playing = true;
        log::debug!("music on");
    }

    fn stop_music(&mut self) {
        self.music_playing = false;
        log::debug!("music off");
    }
}

/// Browsers keep audio locked until the first user gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AudioUnlock {
    #[default]
    Pending,
    Unlocked,
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, AudioContextState, GainNode, OscillatorNode, OscillatorType};

    use super::{AudioSink, AudioUnlock};
    use crate::sim::SoundCue;

    /// Web Audio backed sink
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        unlock: AudioUnlock,
        volume: f32,
        /// Drone kept alive while music is on
        music: Option<(OscillatorNode, GainNode)>,
        /// Music was requested before unlock; start it on unlock
        music_wanted: bool,
    }

    impl Default for AudioManager {
        fn default() -> Self {
            Self::new()
        }
    }

    impl AudioManager {
        pub fn new() -> Self {
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                unlock: AudioUnlock::Pending,
                volume: 0.8,
                music: None,
                music_wanted: false,
            }
        }

        /// Call from a user gesture handler
        pub fn unlock(&mut self) {
            if self.unlock == AudioUnlock::Unlocked {
                return;
            }
            let Some(ctx) = &self.ctx else { return };
            if ctx.state() == AudioContextState::Suspended {
                let _ = ctx.resume();
            }
            self.unlock = AudioUnlock::Unlocked;
            log::info!("Audio unlocked");
            if self.music_wanted {
                self.start_music();
            }
        }

        fn create_osc(
            &self,
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        /// One enveloped tone sweeping from `from` to `to` Hz
        fn sweep(
            &self,
            ctx: &AudioContext,
            osc_type: OscillatorType,
            from: f32,
            to: f32,
            level: f32,
            len: f64,
        ) {
            let Some((osc, gain)) = self.create_osc(ctx, from, osc_type) else {
                return;
            };
            let t = ctx.current_time();
            gain.gain().set_value_at_time(self.volume * level, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + len)
                .ok();
            osc.frequency().set_value_at_time(from, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(to, t + len)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + len + 0.05).ok();
        }

        fn play_pickup(&self, ctx: &AudioContext) {
            for (i, freq) in [600.0, 800.0, 1000.0].iter().enumerate() {
                let delay = i as f64 * 0.08;
                if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) {
                    let t = ctx.current_time() + delay;
                    gain.gain().set_value_at_time(self.volume * 0.25, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + 0.2).ok();
                }
            }
        }

        fn play_explosion(&self, ctx: &AudioContext) {
            self.sweep(ctx, OscillatorType::Sawtooth, 100.0, 30.0, 0.5, 0.4);
            // High crack on top of the rumble
            self.sweep(ctx, OscillatorType::Square, 1500.0, 400.0, 0.2, 0.1);
        }
    }

    impl AudioSink for AudioManager {
        fn play(&mut self, cue: SoundCue) {
            if self.unlock == AudioUnlock::Pending || self.volume <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };

            match cue {
                SoundCue::Shoot => {
                    self.sweep(ctx, OscillatorType::Square, 900.0, 300.0, 0.2, 0.08)
                }
                SoundCue::PowerUp => self.play_pickup(ctx),
                SoundCue::PlayerHit => {
                    self.sweep(ctx, OscillatorType::Sawtooth, 220.0, 40.0, 0.5, 0.35)
                }
                SoundCue::EnemyLaser => {
                    self.sweep(ctx, OscillatorType::Triangle, 1400.0, 500.0, 0.25, 0.15)
                }
                SoundCue::Explosion => self.play_explosion(ctx),
            }
        }

        fn start_music(&mut self) {
            self.music_wanted = true;
            if self.unlock == AudioUnlock::Pending || self.music.is_some() {
                return;
            }
            let Some(ctx) = &self.ctx else { return };
            let Some((osc, gain)) = self.create_osc(ctx, 55.0, OscillatorType::Triangle) else {
                return;
            };
            gain.gain().set_value(self.volume * 0.08);
            osc.start().ok();
            self.music = Some((osc, gain));
        }

        fn stop_music(&mut self) {
            self.music_wanted = false;
            if let Some((osc, _gain)) = self.music.take() {
                osc.stop().ok();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_audio_tracks_music() {
        let mut audio = NullAudio::default();
        audio.play(SoundCue::Shoot);
        audio.start_music();
        assert!(audio.music_playing);
        audio.stop_music();
        assert!(!audio.music_playing);
    }

    #[test]
    fn test_unlock_starts_pending() {
        assert_eq!(AudioUnlock::default(), AudioUnlock::Pending);
    }
}
