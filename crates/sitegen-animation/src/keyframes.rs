//! Percentage bucketing shared by the CSS backend.
//!
//! Every keyframe of every track lands in the bucket
//! `round(time / duration * 100)`. Transform channels fold into a single
//! `transform` declaration per bucket, in track order.

use indexmap::IndexMap;
use sitegen_core::{Animation, AnimationTrack, KeyframePoint, TransformChannel};
use std::collections::BTreeMap;

/// Declarations per percentage, ordered numerically.
pub type KeyframeBuckets = BTreeMap<i64, IndexMap<String, String>>;

/// Percentage of `duration` at which `time` falls, rounded half up.
///
/// A zero or negative duration puts everything at `0`.
pub fn percent_of(time: f64, duration: f64) -> i64 {
    if duration <= 0.0 || !duration.is_finite() {
        return 0;
    }
    (time / duration * 100.0 + 0.5).floor() as i64
}

/// Group all keyframes of `animation` into percentage buckets.
pub fn bucket_keyframes(animation: &Animation) -> KeyframeBuckets {
    let mut buckets = KeyframeBuckets::new();

    for track in &animation.tracks {
        for keyframe in &track.keyframes {
            let Some(value) = keyframe.value() else {
                continue;
            };
            let percent = percent_of(keyframe.time, animation.duration);
            let declarations = buckets.entry(percent).or_default();
            apply_sample(declarations, track, keyframe, &value.to_string());
        }
    }

    buckets
}

fn apply_sample(
    declarations: &mut IndexMap<String, String>,
    track: &AnimationTrack,
    keyframe: &KeyframePoint,
    value: &str,
) {
    if !track.is_transform() {
        declarations.insert(track.property.clone(), value.to_string());
        return;
    }

    let Some(channel) = track.transform_channel() else {
        tracing::debug!(property = %track.property, keyframe = %keyframe.id, "skipping unknown transform channel");
        return;
    };

    let call = format!("{}({})", channel.css_function(), value);
    declarations
        .entry("transform".to_string())
        .and_modify(|transform| {
            transform.push(' ');
            transform.push_str(&call);
        })
        .or_insert(call);
}

/// Motion-library key for a transform channel.
pub(crate) fn motion_key(channel: TransformChannel) -> &'static str {
    match channel {
        TransformChannel::TranslateX => "x",
        TransformChannel::TranslateY => "y",
        TransformChannel::Scale => "scale",
        TransformChannel::Rotate => "rotate",
    }
}
