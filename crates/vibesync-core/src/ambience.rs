//! Ambience track catalogue and selection.
//!
//! The core only decides *which* track is current -- decoding and
//! playback transport belong to the application shell.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmbienceTrack {
    pub id: u32,
    pub title: String,
    pub artist: String,
    pub src: String,
}

/// The built-in track catalogue.
pub fn builtin_tracks() -> Vec<AmbienceTrack> {
    vec![
        AmbienceTrack {
            id: 1,
            title: "Lofi Beats".into(),
            artist: "Chillhop Music".into(),
            src: "https://cdn.pixabay.com/audio/2023/11/22/audio_f1c50a1a51.mp3".into(),
        },
        AmbienceTrack {
            id: 2,
            title: "Calm River".into(),
            artist: "Nature Sounds".into(),
            src: "https://cdn.pixabay.com/audio/2022/10/18/audio_245229c997.mp3".into(),
        },
        AmbienceTrack {
            id: 3,
            title: "Rain Room".into(),
            artist: "Ambient Noise".into(),
            src: "https://cdn.pixabay.com/audio/2022/08/19/audio_d0a1b6a001.mp3".into(),
        },
        AmbienceTrack {
            id: 4,
            title: "Coffee Shop".into(),
            artist: "City Ambience".into(),
            src: "https://cdn.pixabay.com/audio/2022/04/18/audio_349069d5ce.mp3".into(),
        },
    ]
}

/// Track selection over a fixed catalogue, wrapping at both ends.
#[derive(Debug, Clone)]
pub struct Playlist {
    tracks: Vec<AmbienceTrack>,
    current: usize,
}

impl Playlist {
    pub fn new(tracks: Vec<AmbienceTrack>) -> Option<Self> {
        if tracks.is_empty() {
            return None;
        }
        Some(Self { tracks, current: 0 })
    }

    pub fn builtin() -> Self {
        Self {
            tracks: builtin_tracks(),
            current: 0,
        }
    }

    pub fn tracks(&self) -> &[AmbienceTrack] {
        &self.tracks
    }

    pub fn current(&self) -> &AmbienceTrack {
        &self.tracks[self.current]
    }

    pub fn next(&mut self) -> &AmbienceTrack {
        self.current = (self.current + 1) % self.tracks.len();
        self.current()
    }

    pub fn prev(&mut self) -> &AmbienceTrack {
        self.current = (self.current + self.tracks.len() - 1) % self.tracks.len();
        self.current()
    }

    /// Select the first track whose title contains `query`
    /// (case-insensitive). Used to apply advisory music suggestions, so
    /// a partial match like "lofi" is enough. Returns None and leaves
    /// the selection unchanged when nothing matches.
    pub fn select_by_title(&mut self, query: &str) -> Option<&AmbienceTrack> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }
        let index = self
            .tracks
            .iter()
            .position(|t| t.title.to_lowercase().contains(&needle))?;
        self.current = index;
        Some(self.current())
    }
}

impl Default for Playlist {
    fn default() -> Self {
        Self::builtin()
    }
}
