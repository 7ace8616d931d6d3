//! Audio collaborator that drains cues on a dedicated thread.
//!
//! The headless CLI has no output device, so the worker only logs what it
//! would have played.

use std::{
    sync::mpsc::{self, Receiver, Sender},
    thread::{self, JoinHandle},
};

use anyhow::{Context, Result};
use house_defence_core::{Cue, MusicTrack};
use house_defence_rendering::AudioBackend;
use tracing::{debug, info};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AudioCommand {
    Cue(Cue),
    Music(MusicTrack),
}

/// Cloneable handle feeding the audio thread.
///
/// Sends never block and are dropped silently once the worker is gone.
#[derive(Clone, Debug)]
pub(crate) struct AudioSender {
    tx: Sender<AudioCommand>,
}

impl AudioBackend for AudioSender {
    fn play_cue(&self, cue: Cue) {
        let _ = self.tx.send(AudioCommand::Cue(cue));
    }

    fn change_music(&self, track: MusicTrack) {
        let _ = self.tx.send(AudioCommand::Music(track));
    }
}

/// Starts the audio worker.
///
/// The worker exits once every [`AudioSender`] is dropped and reports how
/// many commands it drained.
pub(crate) fn start_audio_thread() -> Result<(AudioSender, JoinHandle<usize>)> {
    let (tx, rx) = mpsc::channel();
    let handle = thread::Builder::new()
        .name("audio".to_owned())
        .spawn(move || drain(rx))
        .context("failed to spawn the audio thread")?;
    Ok((AudioSender { tx }, handle))
}

fn drain(rx: Receiver<AudioCommand>) -> usize {
    let mut drained = 0;
    while let Ok(command) = rx.recv() {
        drained += 1;
        match command {
            AudioCommand::Cue(cue) => debug!(cue = %cue.name(), "play cue"),
            AudioCommand::Music(track) => info!(?track, "switch music"),
        }
    }
    drained
}
