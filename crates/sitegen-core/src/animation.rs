//! Keyframe animation model.

use crate::value::{deserialize_value_map, Value};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Named easing curves offered by the timeline panel.
pub mod easing {
    pub const LINEAR: &str = "linear";
    pub const EASE_IN: &str = "cubic-bezier(0.42, 0, 1.0, 1.0)";
    pub const EASE_OUT: &str = "cubic-bezier(0, 0, 0.58, 1.0)";
    pub const EASE_IN_OUT: &str = "cubic-bezier(0.42, 0, 0.58, 1.0)";
    pub const EASE_IN_BACK: &str = "cubic-bezier(0.6, -0.28, 0.735, 0.045)";
    pub const EASE_OUT_BACK: &str = "cubic-bezier(0.175, 0.885, 0.32, 1.275)";
    pub const EASE_IN_OUT_BACK: &str = "cubic-bezier(0.68, -0.55, 0.265, 1.55)";
}

/// What triggers an animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationType {
    Entry,
    Exit,
    Hover,
    Click,
    Scroll,
}

impl AnimationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Entry => "entry",
            Self::Exit => "exit",
            Self::Hover => "hover",
            Self::Click => "click",
            Self::Scroll => "scroll",
        }
    }
}

/// A value sample at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyframePoint {
    pub id: String,
    /// Milliseconds from animation start.
    pub time: f64,
    /// Property values at this time; `value` is the one every backend reads.
    #[serde(default, deserialize_with = "deserialize_value_map")]
    pub properties: IndexMap<String, Value>,
}

impl KeyframePoint {
    /// Create a keyframe holding a single `value`.
    pub fn new(id: impl Into<String>, time: f64, value: impl Into<Value>) -> Self {
        let mut properties = IndexMap::new();
        properties.insert("value".to_string(), value.into());
        Self {
            id: id.into(),
            time,
            properties,
        }
    }

    /// The sampled value, if any.
    pub fn value(&self) -> Option<&Value> {
        self.properties.get("value")
    }
}

/// One animated property of an element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationTrack {
    pub id: String,
    pub element_id: String,
    /// CSS property name, or `transform.<fn>` for a transform channel.
    pub property: String,
    /// Sorted by `time` ascending.
    #[serde(default)]
    pub keyframes: Vec<KeyframePoint>,
    #[serde(default)]
    pub easing: String,
}

impl AnimationTrack {
    /// The transform channel this track drives, if it is a transform track.
    pub fn transform_channel(&self) -> Option<TransformChannel> {
        self.property
            .strip_prefix("transform.")
            .and_then(TransformChannel::from_name)
    }

    /// True if the property uses the `transform.` prefix, known channel or not.
    pub fn is_transform(&self) -> bool {
        self.property.starts_with("transform.")
    }

    /// Restore time ordering after an edit. Stable for equal times.
    pub fn sort_keyframes(&mut self) {
        self.keyframes.sort_by(|a, b| a.time.total_cmp(&b.time));
    }
}

/// Composite transform functions the timeline can animate independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransformChannel {
    TranslateX,
    TranslateY,
    Scale,
    Rotate,
}

impl TransformChannel {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "translateX" => Some(Self::TranslateX),
            "translateY" => Some(Self::TranslateY),
            "scale" => Some(Self::Scale),
            "rotate" => Some(Self::Rotate),
            _ => None,
        }
    }

    /// CSS transform function name.
    pub fn css_function(&self) -> &'static str {
        match self {
            Self::TranslateX => "translateX",
            Self::TranslateY => "translateY",
            Self::Scale => "scale",
            Self::Rotate => "rotate",
        }
    }
}

/// A timeline attached to one element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Animation {
    pub id: String,
    pub element_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub animation_type: AnimationType,
    #[serde(default)]
    pub tracks: Vec<AnimationTrack>,
    /// Total length in milliseconds.
    pub duration: f64,
    /// Start delay in milliseconds.
    #[serde(default)]
    pub delay: f64,
}

impl Animation {
    pub fn new(
        id: impl Into<String>,
        element_id: impl Into<String>,
        animation_type: AnimationType,
    ) -> Self {
        Self {
            id: id.into(),
            element_id: element_id.into(),
            name: format!("{} animation", animation_type.as_str()),
            animation_type,
            tracks: Vec::new(),
            duration: 1000.0,
            delay: 0.0,
        }
    }

    /// Add a track built from `(time, value)` samples.
    pub fn with_track(
        mut self,
        property: impl Into<String>,
        easing: impl Into<String>,
        samples: impl IntoIterator<Item = (f64, Value)>,
    ) -> Self {
        let index = self.tracks.len();
        let keyframes = samples
            .into_iter()
            .enumerate()
            .map(|(i, (time, value))| KeyframePoint::new(format!("{}-{}-{}", self.id, index, i), time, value))
            .collect();
        let mut track = AnimationTrack {
            id: format!("{}-{}", self.id, index),
            element_id: self.element_id.clone(),
            property: property.into(),
            keyframes,
            easing: easing.into(),
        };
        track.sort_keyframes();
        self.tracks.push(track);
        self
    }

    pub fn with_timing(mut self, duration: f64, delay: f64) -> Self {
        self.duration = duration;
        self.delay = delay;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

/// A reusable track template.
#[derive(Debug, Clone, Copy)]
pub struct PresetTrack {
    pub property: &'static str,
    pub keyframes: &'static [(f64, PresetValue)],
    pub easing: &'static str,
}

/// Preset keyframe values are either numbers or CSS strings.
#[derive(Debug, Clone, Copy)]
pub enum PresetValue {
    Number(f64),
    Text(&'static str),
}

impl From<PresetValue> for Value {
    fn from(value: PresetValue) -> Self {
        match value {
            PresetValue::Number(n) => Value::Number(n),
            PresetValue::Text(s) => Value::Text(s.to_string()),
        }
    }
}

/// A built-in animation the editor can apply in one click.
#[derive(Debug, Clone, Copy)]
pub struct AnimationPreset {
    pub id: &'static str,
    pub name: &'static str,
    pub category: &'static str,
    pub tracks: &'static [PresetTrack],
    pub duration: f64,
}

impl AnimationPreset {
    pub fn find(id: &str) -> Option<&'static AnimationPreset> {
        ANIMATION_PRESETS.iter().find(|p| p.id == id)
    }
}

use PresetValue::{Number as N, Text as T};

pub static ANIMATION_PRESETS: &[AnimationPreset] = &[
    AnimationPreset {
        id: "fade-in",
        name: "Fade In",
        category: "Fade",
        tracks: &[PresetTrack {
            property: "opacity",
            keyframes: &[(0.0, N(0.0)), (1000.0, N(1.0))],
            easing: easing::EASE_IN_OUT,
        }],
        duration: 1000.0,
    },
    AnimationPreset {
        id: "fade-out",
        name: "Fade Out",
        category: "Fade",
        tracks: &[PresetTrack {
            property: "opacity",
            keyframes: &[(0.0, N(1.0)), (1000.0, N(0.0))],
            easing: easing::EASE_IN_OUT,
        }],
        duration: 1000.0,
    },
    AnimationPreset {
        id: "slide-in-right",
        name: "Slide In Right",
        category: "Slide",
        tracks: &[
            PresetTrack {
                property: "transform.translateX",
                keyframes: &[(0.0, T("100%")), (1000.0, T("0%"))],
                easing: easing::EASE_OUT,
            },
            PresetTrack {
                property: "opacity",
                keyframes: &[(0.0, N(0.0)), (750.0, N(1.0))],
                easing: easing::EASE_IN_OUT,
            },
        ],
        duration: 1000.0,
    },
    AnimationPreset {
        id: "bounce-in",
        name: "Bounce In",
        category: "Bounce",
        tracks: &[
            PresetTrack {
                property: "transform.scale",
                keyframes: &[(0.0, N(0.3)), (500.0, N(1.1)), (750.0, N(0.9)), (1000.0, N(1.0))],
                easing: easing::EASE_OUT_BACK,
            },
            PresetTrack {
                property: "opacity",
                keyframes: &[(0.0, N(0.0)), (500.0, N(1.0))],
                easing: easing::EASE_IN_OUT,
            },
        ],
        duration: 1000.0,
    },
];
