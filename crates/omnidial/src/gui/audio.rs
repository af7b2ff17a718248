use dial::{Cue, CueSink};
use gtk::prelude::*;
use gtk4 as gtk;
use std::collections::HashMap;
use std::path::PathBuf;

/// Plays dial cues through GTK media streams.
#[derive(Debug, Default)]
pub struct CuePlayer {
    streams: HashMap<Cue, gtk::MediaFile>,
}

impl CuePlayer {
    pub fn load(sounds: &HashMap<Cue, PathBuf>) -> Self {
        let streams = sounds
            .iter()
            .filter_map(|(cue, path)| {
                if !path.exists() {
                    log::warn!("Sound for cue '{}' not found: {}", cue, path.display());
                    return None;
                }
                Some((*cue, gtk::MediaFile::for_filename(path)))
            })
            .collect();
        Self { streams }
    }
}

impl CueSink for CuePlayer {
    fn play(&mut self, cue: Cue) {
        match self.streams.get(&cue) {
            Some(stream) => {
                stream.seek(0);
                stream.play();
            }
            None => log::debug!("No sound loaded for cue '{}'", cue),
        }
    }

    fn silence(&mut self, cue: Cue) {
        if let Some(stream) = self.streams.get(&cue) {
            stream.pause();
        }
    }
}
