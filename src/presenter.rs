//! Seam between the engine and the audio/animation layers
//!
//! The engine only issues fire-and-forget requests and polls for completion of
//! the blocking sequences it waits on. [`Recorder`] is an in-memory
//! implementation used by the console player and by tests.

use crate::types::directive::Directive;
use crate::types::state::Sequence;
use std::collections::HashSet;

pub trait Presenter {
    fn play_effect(&mut self, id: &str);

    fn play_music(&mut self, id: &str);

    fn halt_music(&mut self);

    /// Begin a blocking sequence such as the testimony title card
    fn start_sequence(&mut self, sequence: Sequence);

    /// Polled once per tick while a sequence blocks the interpreter
    fn sequence_done(&self, sequence: Sequence) -> bool;
}

/// Records every request as a [`Directive`]
#[derive(Debug, Default)]
pub struct Recorder {
    directives: Vec<Directive>,
    running: HashSet<Sequence>,
    /// Keep sequences running until [`Recorder::finish`] is called
    hold_sequences: bool,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A recorder whose sequences never end on their own
    pub fn holding_sequences() -> Self {
        Self {
            hold_sequences: true,
            ..Self::default()
        }
    }

    pub fn finish(&mut self, sequence: Sequence) {
        self.running.remove(&sequence);
    }

    pub fn is_running(&self, sequence: Sequence) -> bool {
        self.running.contains(&sequence)
    }

    pub fn directives(&self) -> &[Directive] {
        &self.directives
    }

    /// Take everything recorded so far
    pub fn drain(&mut self) -> Vec<Directive> {
        std::mem::take(&mut self.directives)
    }

    /// Ids of effects played so far, in order
    pub fn effects(&self) -> Vec<&str> {
        self.directives
            .iter()
            .filter_map(|d| match d {
                Directive::PlayEffect { id } => Some(id.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Presenter for Recorder {
    fn play_effect(&mut self, id: &str) {
        self.directives.push(Directive::effect(id));
    }

    fn play_music(&mut self, id: &str) {
        self.directives.push(Directive::music(id));
    }

    fn halt_music(&mut self) {
        self.directives.push(Directive::HaltMusic);
    }

    fn start_sequence(&mut self, sequence: Sequence) {
        if self.hold_sequences {
            self.running.insert(sequence);
        }
    }

    fn sequence_done(&self, sequence: Sequence) -> bool {
        !self.running.contains(&sequence)
    }
}
