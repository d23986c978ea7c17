//! Timeline editing: the animation side of the editor's document.
//!
//! Mirrors what the animation panel does to its collection of
//! [`Animation`]s, minus playback and selection state. Keyframes stay sorted
//! by time after every edit.

use crate::animation::{
    Animation, AnimationPreset, AnimationTrack, AnimationType, KeyframePoint,
};
use crate::errors::{CoreError, Result};
use crate::value::Value;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// All animations for one page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timeline {
    animations: Vec<Animation>,
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the collection wholesale.
    pub fn from_animations(animations: Vec<Animation>) -> Self {
        let mut timeline = Self { animations };
        for track in timeline.animations.iter_mut().flat_map(|a| a.tracks.iter_mut()) {
            track.sort_keyframes();
        }
        timeline
    }

    pub fn animations(&self) -> &[Animation] {
        &self.animations
    }

    pub fn into_animations(self) -> Vec<Animation> {
        self.animations
    }

    pub fn get(&self, id: &str) -> Option<&Animation> {
        self.animations.iter().find(|a| a.id == id)
    }

    /// Animations attached to `element_id`, in creation order.
    pub fn for_element<'a>(&'a self, element_id: &'a str) -> impl Iterator<Item = &'a Animation> + 'a {
        self.animations.iter().filter(move |a| a.element_id == element_id)
    }

    /// Create an animation for an element, optionally seeded from a preset.
    /// Returns the new animation id.
    pub fn add_animation(
        &mut self,
        element_id: &str,
        animation_type: AnimationType,
        preset_id: Option<&str>,
    ) -> Result<String> {
        let id = new_id();
        let mut animation = Animation::new(id.clone(), element_id, animation_type);

        if let Some(preset_id) = preset_id {
            let preset = AnimationPreset::find(preset_id)
                .ok_or_else(|| CoreError::UnknownPreset(preset_id.to_string()))?;
            animation.duration = preset.duration;
            animation.tracks = preset
                .tracks
                .iter()
                .map(|track| AnimationTrack {
                    id: new_id(),
                    element_id: element_id.to_string(),
                    property: track.property.to_string(),
                    keyframes: track
                        .keyframes
                        .iter()
                        .map(|(time, value)| KeyframePoint::new(new_id(), *time, *value))
                        .collect(),
                    easing: track.easing.to_string(),
                })
                .collect();
        }

        tracing::debug!(animation = %id, element = element_id, "added animation");
        self.animations.push(animation);
        Ok(id)
    }

    /// Change name, duration or delay of an animation.
    pub fn update_animation(
        &mut self,
        id: &str,
        name: Option<String>,
        duration: Option<f64>,
        delay: Option<f64>,
    ) -> Result<()> {
        let animation = self.animation_mut(id)?;
        if let Some(name) = name {
            animation.name = name;
        }
        if let Some(duration) = duration {
            animation.duration = duration;
        }
        if let Some(delay) = delay {
            animation.delay = delay;
        }
        Ok(())
    }

    pub fn remove_animation(&mut self, id: &str) -> Result<Animation> {
        let pos = self
            .animations
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| CoreError::AnimationNotFound(id.to_string()))?;
        Ok(self.animations.remove(pos))
    }

    /// Add a track with a two-point default ramp spanning the animation.
    ///
    /// Opacity ramps 0 → 1; every other property ramps `0px` → `100px`.
    pub fn add_track(&mut self, animation_id: &str, property: &str) -> Result<String> {
        let animation = self.animation_mut(animation_id)?;
        let (from, to) = if property == "opacity" {
            (Value::Number(0.0), Value::Number(1.0))
        } else {
            (Value::from("0px"), Value::from("100px"))
        };

        let id = new_id();
        animation.tracks.push(AnimationTrack {
            id: id.clone(),
            element_id: animation.element_id.clone(),
            property: property.to_string(),
            keyframes: vec![
                KeyframePoint::new(new_id(), 0.0, from),
                KeyframePoint::new(new_id(), animation.duration, to),
            ],
            easing: "ease-in-out".to_string(),
        });
        Ok(id)
    }

    pub fn set_track_easing(&mut self, track_id: &str, easing: impl Into<String>) -> Result<()> {
        self.track_mut(track_id)?.easing = easing.into();
        Ok(())
    }

    pub fn remove_track(&mut self, track_id: &str) -> Result<AnimationTrack> {
        for animation in &mut self.animations {
            if let Some(pos) = animation.tracks.iter().position(|t| t.id == track_id) {
                return Ok(animation.tracks.remove(pos));
            }
        }
        Err(CoreError::TrackNotFound(track_id.to_string()))
    }

    /// Insert a keyframe, keeping the track sorted. Returns the keyframe id.
    pub fn add_keyframe(
        &mut self,
        track_id: &str,
        time: f64,
        properties: IndexMap<String, Value>,
    ) -> Result<String> {
        let track = self.track_mut(track_id)?;
        let id = new_id();
        track.keyframes.push(KeyframePoint {
            id: id.clone(),
            time,
            properties,
        });
        track.sort_keyframes();
        Ok(id)
    }

    /// Change a keyframe's time and/or merge new property values into it.
    pub fn update_keyframe(
        &mut self,
        track_id: &str,
        keyframe_id: &str,
        time: Option<f64>,
        properties: Option<IndexMap<String, Value>>,
    ) -> Result<()> {
        let track = self.track_mut(track_id)?;
        let keyframe = track
            .keyframes
            .iter_mut()
            .find(|k| k.id == keyframe_id)
            .ok_or_else(|| CoreError::KeyframeNotFound(keyframe_id.to_string()))?;

        if let Some(properties) = properties {
            keyframe.properties.extend(properties);
        }
        if let Some(time) = time {
            keyframe.time = time;
            track.sort_keyframes();
        }
        Ok(())
    }

    pub fn remove_keyframe(&mut self, track_id: &str, keyframe_id: &str) -> Result<KeyframePoint> {
        let track = self.track_mut(track_id)?;
        let pos = track
            .keyframes
            .iter()
            .position(|k| k.id == keyframe_id)
            .ok_or_else(|| CoreError::KeyframeNotFound(keyframe_id.to_string()))?;
        Ok(track.keyframes.remove(pos))
    }

    /// Drop every animation attached to an element (used when the element is deleted).
    pub fn remove_for_element(&mut self, element_id: &str) -> usize {
        let before = self.animations.len();
        self.animations.retain(|a| a.element_id != element_id);
        before - self.animations.len()
    }

    fn animation_mut(&mut self, id: &str) -> Result<&mut Animation> {
        self.animations
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| CoreError::AnimationNotFound(id.to_string()))
    }

    fn track_mut(&mut self, track_id: &str) -> Result<&mut AnimationTrack> {
        self.animations
            .iter_mut()
            .flat_map(|a| a.tracks.iter_mut())
            .find(|t| t.id == track_id)
            .ok_or_else(|| CoreError::TrackNotFound(track_id.to_string()))
    }
}
