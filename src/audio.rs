//! Background music: per-run random track selection over a fixed playlist
//!
//! The actual playback backend lives with the host (browser, native mixer);
//! the core only decides *what* to play and swallows playback failures - a
//! refused autoplay must never take the game down.

use std::fmt;

use rand::Rng;

/// Fixed music volume
pub const MUSIC_VOLUME: f32 = 0.5;

/// The run soundtrack pool; one track is drawn uniformly per run start
pub const PLAYLIST: [&str; 10] = [
    "songs/2Bros.mp3",
    "songs/Calico.mp3",
    "songs/Coagulate.mp3",
    "songs/Deteriorate.mp3",
    "songs/English.mp3",
    "songs/French.mp3",
    "songs/Piss-Phantom-II.mp3",
    "songs/RadioactiveBabies.mp3",
    "songs/too-long.mp3",
    "songs/War.mp3",
];

/// Playback was refused by the audio backend
#[derive(Debug, Clone)]
pub struct PlaybackError(pub String);

impl fmt::Display for PlaybackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "audio playback failed: {}", self.0)
    }
}

impl std::error::Error for PlaybackError {}

/// Seam for the host's audio backend
pub trait AudioSink {
    fn play_looped(&mut self, track: &str, volume: f32) -> Result<(), PlaybackError>;
    fn stop(&mut self);
}

/// No-op sink for headless runs and tests
#[derive(Debug, Default)]
pub struct NullSink;

impl AudioSink for NullSink {
    fn play_looped(&mut self, track: &str, volume: f32) -> Result<(), PlaybackError> {
        log::debug!("(silent) would loop '{track}' at volume {volume}");
        Ok(())
    }

    fn stop(&mut self) {}
}

/// Draw a track uniformly from the playlist
pub fn pick_track<R: Rng>(rng: &mut R) -> &'static str {
    PLAYLIST[rng.random_range(0..PLAYLIST.len())]
}

/// Owns the sink and the per-run track choice
pub struct MusicDirector<S> {
    sink: S,
    current: Option<&'static str>,
}

impl<S: AudioSink> MusicDirector<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            current: None,
        }
    }

    /// Pick and start a fresh track. Failures are logged and ignored - the
    /// game proceeds silently.
    pub fn start_run<R: Rng>(&mut self, rng: &mut R) {
        self.sink.stop();
        let track = pick_track(rng);
        match self.sink.play_looped(track, MUSIC_VOLUME) {
            Ok(()) => {
                log::info!("now playing '{track}'");
                self.current = Some(track);
            }
            Err(err) => {
                log::warn!("{err}");
                self.current = None;
            }
        }
    }

    pub fn end_run(&mut self) {
        self.sink.stop();
        self.current = None;
    }

    pub fn current_track(&self) -> Option<&'static str> {
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    struct RecordingSink {
        played: Vec<String>,
        stops: usize,
    }

    impl AudioSink for RecordingSink {
        fn play_looped(&mut self, track: &str, _volume: f32) -> Result<(), PlaybackError> {
            self.played.push(track.to_string());
            Ok(())
        }

        fn stop(&mut self) {
            self.stops += 1;
        }
    }

    struct RefusingSink;

    impl AudioSink for RefusingSink {
        fn play_looped(&mut self, _track: &str, _volume: f32) -> Result<(), PlaybackError> {
            Err(PlaybackError("autoplay blocked".into()))
        }

        fn stop(&mut self) {}
    }

    #[test]
    fn test_pick_track_is_from_playlist() {
        let mut rng = Pcg32::seed_from_u64(1);
        for _ in 0..50 {
            let track = pick_track(&mut rng);
            assert!(PLAYLIST.contains(&track));
        }
    }

    #[test]
    fn test_run_start_plays_and_stop_clears() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut director = MusicDirector::new(RecordingSink {
            played: Vec::new(),
            stops: 0,
        });
        director.start_run(&mut rng);
        assert!(director.current_track().is_some());
        director.end_run();
        assert_eq!(director.current_track(), None);
    }

    #[test]
    fn test_playback_failure_is_swallowed() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut director = MusicDirector::new(RefusingSink);
        // Must not panic; the run just goes silent
        director.start_run(&mut rng);
        assert_eq!(director.current_track(), None);
    }
}
