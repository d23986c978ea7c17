//! CSS `@keyframes` backend.

use crate::keyframes::bucket_keyframes;
use serde::Serialize;
use sitegen_core::Animation;
use std::fmt::Write;

/// Compiled CSS animation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CssAnimation {
    /// The `@keyframes` block.
    pub keyframes: String,
    /// `animation-*` declarations, one per line.
    pub style: String,
    /// Keyframes plus a `.element-<id>` rule applying them.
    pub implementation: String,
}

/// Keyframes name for an animation: its id with hyphens replaced by underscores.
pub fn animation_name(animation: &Animation) -> String {
    animation.id.replace('-', "_")
}

/// CSS class that carries the animation for an element.
pub fn element_class(element_id: &str) -> String {
    format!("element-{}", element_id)
}

/// Build the `@keyframes` block, selectors in ascending numeric order.
pub fn generate_keyframes(animation: &Animation) -> String {
    let mut css = format!("@keyframes {} {{\n", animation_name(animation));

    for (percent, declarations) in bucket_keyframes(animation) {
        let _ = writeln!(css, "  {}% {{", percent);
        for (property, value) in &declarations {
            let _ = writeln!(css, "    {}: {};", property, value);
        }
        css.push_str("  }\n");
    }

    css.push_str("}\n");
    css
}

/// Build the animation shorthand declarations.
///
/// Timing function comes from the first track, `ease` when there is none.
pub fn generate_style(animation: &Animation) -> String {
    let easing = animation
        .tracks
        .first()
        .map(|track| track.easing.as_str())
        .filter(|easing| !easing.is_empty())
        .unwrap_or("ease");

    format!(
        "animation-name: {};\nanimation-duration: {}ms;\nanimation-delay: {}ms;\nanimation-timing-function: {};\nanimation-fill-mode: forwards;\n",
        animation_name(animation),
        animation.duration,
        animation.delay,
        easing,
    )
}

pub fn compile(animation: &Animation) -> CssAnimation {
    let keyframes = generate_keyframes(animation);
    let style = generate_style(animation);

    let mut rule = String::new();
    for line in style.lines() {
        let _ = writeln!(rule, "  {}", line);
    }
    let implementation = format!(
        "{}\n.{} {{\n{}}}\n",
        keyframes,
        element_class(&animation.element_id),
        rule
    );

    CssAnimation {
        keyframes,
        style,
        implementation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitegen_core::{easing, AnimationType, Value};

    fn fade() -> Animation {
        Animation::new("fade-in-1", "hero", AnimationType::Entry).with_track(
            "opacity",
            easing::EASE_IN_OUT,
            [(0.0, Value::from(0.0)), (1000.0, Value::from(1.0))],
        )
    }

    #[test]
    fn test_opacity_keyframes() {
        let css = generate_keyframes(&fade());
        assert_eq!(
            css,
            "@keyframes fade_in_1 {\n  0% {\n    opacity: 0;\n  }\n  100% {\n    opacity: 1;\n  }\n}\n"
        );
    }

    #[test]
    fn test_style_uses_first_track_easing() {
        let style = generate_style(&fade().with_timing(800.0, 200.0));
        assert!(style.contains("animation-name: fade_in_1;"));
        assert!(style.contains("animation-duration: 800ms;"));
        assert!(style.contains("animation-delay: 200ms;"));
        assert!(style.contains(&format!("animation-timing-function: {};", easing::EASE_IN_OUT)));
        assert!(style.contains("animation-fill-mode: forwards;"));
    }

    #[test]
    fn test_style_defaults_to_ease() {
        let anim = Animation::new("a", "el", AnimationType::Entry);
        assert!(generate_style(&anim).contains("animation-timing-function: ease;"));
        assert_eq!(generate_keyframes(&anim), "@keyframes a {\n}\n");
    }

    #[test]
    fn test_implementation_targets_element_class() {
        let compiled = compile(&fade());
        assert!(compiled.implementation.starts_with("@keyframes fade_in_1 {"));
        assert!(compiled.implementation.contains(".element-hero {\n  animation-name: fade_in_1;"));
        assert!(compiled.implementation.ends_with("}\n"));
    }
}
