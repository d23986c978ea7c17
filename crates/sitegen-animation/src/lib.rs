//! Animation compiler for sitegen.
//!
//! Compiles an [`Animation`] timeline to one of three targets:
//! - CSS `@keyframes` plus an animation shorthand rule
//! - Framer Motion variant props
//! - a GSAP timeline with trigger wiring
//!
//! # Example
//!
//! ```
//! use sitegen_animation::{compile, AnimationBackend};
//! use sitegen_core::{easing, Animation, AnimationType, Value};
//!
//! let fade = Animation::new("fade-in", "hero", AnimationType::Entry).with_track(
//!     "opacity",
//!     easing::EASE_IN_OUT,
//!     [(0.0, Value::from(0.0)), (1000.0, Value::from(1.0))],
//! );
//! let compiled = compile(&fade, AnimationBackend::Css).unwrap();
//! assert!(compiled.implementation().contains("@keyframes fade_in"));
//! ```

pub mod css;
pub mod error;
pub mod framer;
pub mod gsap;
pub mod keyframes;

pub use css::CssAnimation;
pub use error::{AnimationError, Result};
pub use framer::{MotionAnimation, MotionProps};
pub use gsap::GsapAnimation;

use serde::{Deserialize, Serialize};
use sitegen_core::Animation;
use std::fmt;
use std::str::FromStr;

/// Animation output target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AnimationBackend {
    Css,
    #[default]
    FramerMotion,
    Gsap,
}

impl AnimationBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Css => "css",
            Self::FramerMotion => "framerMotion",
            Self::Gsap => "gsap",
        }
    }

    /// Resolve a backend name, falling back to Framer Motion for anything
    /// unrecognized.
    pub fn from_name(name: &str) -> Self {
        name.parse().unwrap_or_else(|_| {
            tracing::warn!(backend = name, "unknown animation backend, using framerMotion");
            Self::FramerMotion
        })
    }
}

impl FromStr for AnimationBackend {
    type Err = AnimationError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "css" => Ok(Self::Css),
            "framerMotion" => Ok(Self::FramerMotion),
            "gsap" => Ok(Self::Gsap),
            other => Err(AnimationError::UnknownBackend(other.to_string())),
        }
    }
}

impl fmt::Display for AnimationBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of a backend compiler.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "backend", rename_all = "camelCase")]
pub enum CompiledAnimation {
    Css(CssAnimation),
    FramerMotion(MotionAnimation),
    Gsap(GsapAnimation),
}

impl CompiledAnimation {
    pub fn backend(&self) -> AnimationBackend {
        match self {
            Self::Css(_) => AnimationBackend::Css,
            Self::FramerMotion(_) => AnimationBackend::FramerMotion,
            Self::Gsap(_) => AnimationBackend::Gsap,
        }
    }

    /// Standalone source snippet for the compiled animation.
    pub fn implementation(&self) -> &str {
        match self {
            Self::Css(css) => &css.implementation,
            Self::FramerMotion(motion) => &motion.implementation,
            Self::Gsap(gsap) => &gsap.implementation,
        }
    }
}

/// Compile `animation` for `backend`.
pub fn compile(animation: &Animation, backend: AnimationBackend) -> Result<CompiledAnimation> {
    tracing::debug!(animation = %animation.id, %backend, tracks = animation.tracks.len(), "compiling animation");
    Ok(match backend {
        AnimationBackend::Css => CompiledAnimation::Css(css::compile(animation)),
        AnimationBackend::FramerMotion => CompiledAnimation::FramerMotion(framer::compile(animation)?),
        AnimationBackend::Gsap => CompiledAnimation::Gsap(gsap::compile(animation)),
    })
}

/// Compile by backend name, with the lenient fallback of
/// [`AnimationBackend::from_name`].
pub fn compile_named(animation: &Animation, backend: &str) -> Result<CompiledAnimation> {
    compile(animation, AnimationBackend::from_name(backend))
}

/// How a compiled animation attaches to its element in generated JSX.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnimationBinding {
    /// Motion attributes spread onto a `motion.*` tag.
    MotionProps(String),
    /// A class merged into `className`, matched by the keyframes rule.
    ClassName(String),
    /// An `id` attribute, matched by the GSAP element lookup.
    ElementId(String),
}

/// The attribute binding `animation` needs under `backend`.
pub fn binding_for(animation: &Animation, backend: AnimationBackend) -> Result<AnimationBinding> {
    Ok(match backend {
        AnimationBackend::FramerMotion => {
            AnimationBinding::MotionProps(framer::generate_props(animation).to_jsx_attributes()?)
        }
        AnimationBackend::Css => AnimationBinding::ClassName(css::element_class(&animation.element_id)),
        AnimationBackend::Gsap => AnimationBinding::ElementId(css::element_class(&animation.element_id)),
    })
}
