//! Core data model for sitegen.
//!
//! Pages are trees of typed [`Element`]s carrying open style and prop maps.
//! Animations are keyframe timelines attached to elements by id. Everything
//! here is plain data; code generation lives in `sitegen-codegen` and
//! `sitegen-animation`.

pub mod animation;
pub mod element;
pub mod errors;
pub mod page;
pub mod timeline;
pub mod tree;
pub mod value;

pub use animation::{
    easing, Animation, AnimationPreset, AnimationTrack, AnimationType, KeyframePoint,
    TransformChannel, ANIMATION_PRESETS,
};
pub use element::{Element, ElementType, PropMap, StyleMap};
pub use errors::{CoreError, Result};
pub use page::{MetaValue, PageConfig, PageMeta, RenderMode};
pub use timeline::Timeline;
pub use value::Value;
