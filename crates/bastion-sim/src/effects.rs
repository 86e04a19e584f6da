//! Presentation hooks.
//!
//! The simulation announces visual effects and audio cues through an
//! `EffectSink` supplied at construction. Calls are fire-and-forget and have
//! no influence on simulation state; `NullEffects` satisfies the contract.

use std::sync::{Arc, Mutex};

use bastion_core::enums::{AudioCue, EffectKind};
use bastion_core::events::EffectOptions;
use bastion_core::types::Position;

pub trait EffectSink: Send {
    fn spawn_visual_effect(&mut self, kind: EffectKind, position: Position, options: EffectOptions);
    fn play_audio_cue(&mut self, cue: AudioCue);
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullEffects;

impl EffectSink for NullEffects {
    fn spawn_visual_effect(&mut self, _kind: EffectKind, _position: Position, _options: EffectOptions) {}
    fn play_audio_cue(&mut self, _cue: AudioCue) {}
}

/// One recorded presentation call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EffectRecord {
    Visual {
        kind: EffectKind,
        position: Position,
        options: EffectOptions,
    },
    Audio(AudioCue),
}

/// Records every call. Clones share the same log, so a caller can keep one
/// handle and give the other to the engine.
#[derive(Debug, Clone, Default)]
pub struct EffectLog {
    records: Arc<Mutex<Vec<EffectRecord>>>,
}

impl EffectLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<EffectRecord> {
        match self.records.lock() {
            Ok(records) => records.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn count_visual(&self, kind: EffectKind) -> usize {
        self.records()
            .iter()
            .filter(|r| matches!(r, EffectRecord::Visual { kind: k, .. } if *k == kind))
            .count()
    }

    fn push(&self, record: EffectRecord) {
        match self.records.lock() {
            Ok(mut records) => records.push(record),
            Err(poisoned) => poisoned.into_inner().push(record),
        }
    }
}

impl EffectSink for EffectLog {
    fn spawn_visual_effect(&mut self, kind: EffectKind, position: Position, options: EffectOptions) {
        self.push(EffectRecord::Visual {
            kind,
            position,
            options,
        });
    }

    fn play_audio_cue(&mut self, cue: AudioCue) {
        self.push(EffectRecord::Audio(cue));
    }
}
