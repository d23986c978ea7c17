//! Framer Motion backend: declarative variant props.

use crate::error::Result;
use crate::keyframes::motion_key;
use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use sitegen_core::value::number_to_json;
use sitegen_core::{Animation, AnimationType, KeyframePoint, TransformChannel};

/// Start and end states of a motion component.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Variants {
    pub initial: IndexMap<String, serde_json::Value>,
    pub animate: IndexMap<String, serde_json::Value>,
}

/// Transition timing, in seconds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transition {
    #[serde(serialize_with = "js_number")]
    pub duration: f64,
    #[serde(serialize_with = "js_number")]
    pub delay: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ease: Option<String>,
}

fn js_number<S: Serializer>(value: &f64, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    number_to_json(*value).serialize(serializer)
}

/// The prop bundle spread onto a `motion.*` element.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MotionProps {
    pub variants: Variants,
    pub initial: String,
    pub animate: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub while_hover: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub while_tap: Option<String>,
    pub transition: Transition,
}

impl MotionProps {
    /// Render as JSX attributes, e.g. `variants={{...}} initial="initial"`.
    pub fn to_jsx_attributes(&self) -> Result<String> {
        let mut attrs = vec![
            format!("variants={{{}}}", serde_json::to_string(&self.variants)?),
            format!("initial=\"{}\"", self.initial),
            format!("animate=\"{}\"", self.animate),
        ];
        if let Some(ref target) = self.while_hover {
            attrs.push(format!("whileHover=\"{}\"", target));
        }
        if let Some(ref target) = self.while_tap {
            attrs.push(format!("whileTap=\"{}\"", target));
        }
        attrs.push(format!("transition={{{}}}", serde_json::to_string(&self.transition)?));
        Ok(attrs.join(" "))
    }
}

/// Compiled Framer Motion animation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MotionAnimation {
    pub props: MotionProps,
    /// A standalone `const <Name>Animation = {...}` module snippet.
    pub implementation: String,
}

/// Build the prop bundle for an animation.
///
/// Each track contributes its time-0 keyframe to `initial` and its keyframe
/// at `duration` (or its last keyframe) to `animate`. Tracks without a
/// time-0 keyframe are skipped. The last non-empty track easing becomes the
/// transition ease.
pub fn generate_props(animation: &Animation) -> MotionProps {
    let mut variants = Variants::default();
    let mut transition = Transition {
        duration: animation.duration / 1000.0,
        delay: animation.delay / 1000.0,
        ease: None,
    };

    for track in &animation.tracks {
        let initial = track.keyframes.iter().find(|k| k.time == 0.0);
        let last = track
            .keyframes
            .iter()
            .find(|k| k.time == animation.duration)
            .or_else(|| track.keyframes.last());

        let target = match track.transform_channel() {
            Some(channel) => Some((motion_key(channel), channel == TransformChannel::Scale)),
            None if track.is_transform() => None,
            None => Some((track.property.as_str(), false)),
        };

        if let (Some(initial), Some(last), Some((key, as_float))) = (initial, last, target) {
            variants
                .initial
                .insert(key.to_string(), motion_value(initial, as_float));
            variants
                .animate
                .insert(key.to_string(), motion_value(last, as_float));
        }

        if !track.easing.is_empty() {
            transition.ease = Some(track.easing.clone());
        }
    }

    let target = |wanted: AnimationType| {
        (animation.animation_type == wanted).then(|| "animate".to_string())
    };

    MotionProps {
        variants,
        initial: "initial".to_string(),
        animate: if animation.animation_type == AnimationType::Entry {
            "animate".to_string()
        } else {
            "initial".to_string()
        },
        while_hover: target(AnimationType::Hover),
        while_tap: target(AnimationType::Click),
        transition,
    }
}

fn motion_value(keyframe: &KeyframePoint, as_float: bool) -> serde_json::Value {
    match keyframe.value() {
        None => serde_json::Value::Null,
        Some(value) if as_float => value
            .to_float()
            .map(number_to_json)
            .unwrap_or(serde_json::Value::Null),
        Some(value) => value.to_json(),
    }
}

/// Identifier-safe animation name: whitespace removed.
fn const_name(animation: &Animation) -> String {
    let base: String = animation.name.chars().filter(|c| !c.is_whitespace()).collect();
    format!("{}Animation", base)
}

fn indent_tail(json: &str) -> String {
    json.replace('\n', "\n  ")
}

pub fn compile(animation: &Animation) -> Result<MotionAnimation> {
    let props = generate_props(animation);
    let name = const_name(animation);

    let mut body = vec![
        format!("  variants: {},", indent_tail(&serde_json::to_string_pretty(&props.variants)?)),
        format!("  initial: \"{}\",", props.initial),
        format!("  animate: \"{}\",", props.animate),
    ];
    if let Some(ref target) = props.while_hover {
        body.push(format!("  whileHover: \"{}\",", target));
    }
    if let Some(ref target) = props.while_tap {
        body.push(format!("  whileTap: \"{}\",", target));
    }
    body.push(format!(
        "  transition: {}",
        indent_tail(&serde_json::to_string_pretty(&props.transition)?)
    ));

    let implementation = format!(
        "import {{ motion }} from 'framer-motion';\n\nconst {name} = {{\n{body}\n}};\n\n// Usage:\n// <motion.div {{...{name}}}>Content</motion.div>\n",
        name = name,
        body = body.join("\n"),
    );

    Ok(MotionAnimation {
        props,
        implementation,
    })
}
