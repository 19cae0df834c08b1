//! Sound effects: symbolic ids, the playback seam, and the rodio backend

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

/// Sound effect ids requested by the game core
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sfx {
    Move,
    Rotate,
    Lock,
    Hold,
    Single,
    Double,
    Triple,
    Tetris,
    TSpin,
    LevelUp,
    GameOver,
}

impl Sfx {
    fn filename(&self) -> &'static str {
        match self {
            Sfx::Move => "move.wav",
            Sfx::Rotate => "rotate.wav",
            Sfx::Lock => "lock.wav",
            Sfx::Hold => "hold.wav",
            Sfx::Single => "single.wav",
            Sfx::Double => "double.wav",
            Sfx::Triple => "triple.wav",
            Sfx::Tetris => "tetris.wav",
            Sfx::TSpin => "t_spin.wav",
            Sfx::LevelUp => "level_up.wav",
            Sfx::GameOver => "game_over.wav",
        }
    }
}

/// Playback seam consumed by the scenario; implementations decide how (and
/// whether) a sound actually plays.
pub trait SoundPlayer {
    fn play(&mut self, sfx: Sfx);
}

/// Sound player that plays nothing; used headless and in tests
#[derive(Debug, Default)]
pub struct SilentPlayer;

impl SoundPlayer for SilentPlayer {
    fn play(&mut self, _sfx: Sfx) {}
}

/// rodio-backed sound playback
pub struct AudioManager {
    _stream: OutputStream,
    stream_handle: OutputStreamHandle,
    assets_path: PathBuf,
    volume: f32,
}

impl AudioManager {
    /// None when no audio device is available or the assets are missing;
    /// callers fall back to `SilentPlayer`.
    pub fn new() -> Option<Self> {
        let (stream, stream_handle) = OutputStream::try_default().ok()?;
        let assets_path = Self::find_assets_path()?;

        Some(Self {
            _stream: stream,
            stream_handle,
            assets_path,
            volume: 0.5,
        })
    }

    fn find_assets_path() -> Option<PathBuf> {
        let paths = [
            PathBuf::from("assets"),
            std::env::current_exe().ok()?.parent()?.join("assets"),
        ];

        paths
            .iter()
            .find(|p| p.join("sfx").exists())
            .cloned()
    }

}

impl SoundPlayer for AudioManager {
    fn play(&mut self, sfx: Sfx) {
        if self.volume <= 0.0 {
            return;
        }

        let path = self.assets_path.join("sfx").join(sfx.filename());
        if let Ok(file) = File::open(&path) {
            if let Ok(decoder) = Decoder::new(BufReader::new(file)) {
                if let Ok(sink) = Sink::try_new(&self.stream_handle) {
                    sink.set_volume(self.volume);
                    sink.append(decoder);
                    // Plays out and cleans up on its own
                    sink.detach();
                }
            }
        } else {
            tracing::debug!("missing sound asset: {}", path.display());
        }
    }
}
