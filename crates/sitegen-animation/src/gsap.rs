//! GSAP backend: an imperative paused timeline plus trigger wiring.
//!
//! Each track becomes one `.to()` step. Only the last sampled value of a
//! track reaches the step, and every step uses the animation's total
//! duration and delay rather than per-keyframe timing.

use crate::keyframes::motion_key;
use indexmap::IndexMap;
use serde::Serialize;
use sitegen_core::value::Value;
use sitegen_core::{Animation, AnimationTrack, AnimationType, TransformChannel};
use std::fmt::Write;

/// Replacement for `cubic-bezier` in easing strings.
pub const PLACEHOLDER_EASE: &str = "power4";

/// One `.to(element, {...})` call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GsapStep {
    pub values: IndexMap<String, String>,
    /// Seconds.
    pub duration: f64,
    /// Seconds.
    pub delay: f64,
    pub ease: String,
}

/// Compiled GSAP animation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GsapAnimation {
    pub steps: Vec<GsapStep>,
    /// Timeline construction plus trigger code.
    pub code: String,
    /// `code` with imports and the element lookup prepended.
    pub implementation: String,
}

fn gsap_key(track: &AnimationTrack) -> Option<(String, bool)> {
    match track.transform_channel() {
        Some(TransformChannel::Rotate) => Some(("rotation".to_string(), false)),
        Some(channel) => Some((
            motion_key(channel).to_string(),
            channel == TransformChannel::Scale,
        )),
        None if track.is_transform() => None,
        None => Some((track.property.clone(), false)),
    }
}

fn step_value(value: &Value, as_float: bool) -> String {
    if !as_float {
        return value.to_string();
    }
    match value.to_float() {
        Some(n) => Value::Number(n).to_string(),
        None => "NaN".to_string(),
    }
}

/// Collapse every track into a single timeline step.
pub fn generate_steps(animation: &Animation) -> Vec<GsapStep> {
    animation
        .tracks
        .iter()
        .map(|track| {
            let mut values = IndexMap::new();
            if let Some((key, as_float)) = gsap_key(track) {
                for keyframe in &track.keyframes {
                    if let Some(value) = keyframe.value() {
                        values.insert(key.clone(), step_value(value, as_float));
                    }
                }
            } else {
                tracing::debug!(property = %track.property, "skipping unknown transform channel");
            }

            GsapStep {
                values,
                duration: animation.duration / 1000.0,
                delay: animation.delay / 1000.0,
                ease: track.easing.replacen("cubic-bezier", PLACEHOLDER_EASE, 1),
            }
        })
        .collect()
}

fn render_step(step: &GsapStep) -> String {
    let mut fields: Vec<String> = step
        .values
        .iter()
        .map(|(key, value)| format!("{}: \"{}\"", key, value))
        .collect();
    fields.push(format!("duration: {}", Value::Number(step.duration)));
    fields.push(format!("delay: {}", Value::Number(step.delay)));
    fields.push(format!("ease: \"{}\"", step.ease));

    format!("\n  .to(element, {{\n    {}\n  }})", fields.join(",\n    "))
}

/// Trigger wiring for an animation type.
pub fn generate_trigger(animation_type: AnimationType) -> &'static str {
    match animation_type {
        AnimationType::Entry => "timeline.play();",
        AnimationType::Exit => "timeline.reverse();",
        AnimationType::Hover => {
            "element.addEventListener('mouseenter', () => timeline.play());\nelement.addEventListener('mouseleave', () => timeline.reverse());"
        }
        AnimationType::Click => "element.addEventListener('click', () => timeline.play());",
        AnimationType::Scroll => {
            "const scrollTrigger = ScrollTrigger.create({\n  trigger: element,\n  start: \"top 80%\",\n  onEnter: () => timeline.play(),\n  onLeaveBack: () => timeline.reverse()\n});"
        }
    }
}

/// Timeline and trigger code, expecting `element` and `gsap` in scope.
pub fn generate_code(animation: &Animation, steps: &[GsapStep]) -> String {
    let mut code = String::from("const timeline = gsap.timeline({\n  paused: true");
    if animation.animation_type == AnimationType::Hover {
        code.push_str(",\n  repeat: 0");
    }
    code.push_str("\n})");
    for step in steps {
        code.push_str(&render_step(step));
    }
    code.push_str(";\n\n");
    code.push_str(generate_trigger(animation.animation_type));
    code.push('\n');
    code
}

fn imports(animation: &Animation) -> String {
    let mut imports = String::from("import gsap from 'gsap';\n");
    if animation.animation_type == AnimationType::Scroll {
        imports.push_str(
            "import ScrollTrigger from 'gsap/ScrollTrigger';\n\ngsap.registerPlugin(ScrollTrigger);\n",
        );
    }
    imports
}

fn element_lookup(animation: &Animation) -> String {
    format!("const element = document.querySelector('#element-{}');", animation.element_id)
}

/// A module whose default export wires the animation up when called.
///
/// Nothing touches `document` until the export runs, so the module is safe
/// to import from a client effect.
pub fn generate_module(animation: &Animation, code: &str) -> String {
    let body = code
        .lines()
        .map(|line| if line.is_empty() { String::new() } else { format!("  {}", line) })
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "{}\nexport default function runAnimation() {{\n  {}\n  if (!element) return;\n\n{}\n}}\n",
        imports(animation),
        element_lookup(animation),
        body
    )
}

pub fn compile(animation: &Animation) -> GsapAnimation {
    let steps = generate_steps(animation);
    let code = generate_code(animation, &steps);

    let mut implementation = imports(animation);
    let _ = write!(implementation, "\n{}\n\n{}", element_lookup(animation), code);

    GsapAnimation {
        steps,
        code,
        implementation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitegen_core::easing;

    fn pop(kind: AnimationType) -> Animation {
        Animation::new("pop", "cta", kind)
            .with_timing(500.0, 100.0)
            .with_track(
                "transform.scale",
                easing::EASE_OUT_BACK,
                [(0.0, Value::from("1")), (500.0, Value::from("1.05"))],
            )
            .with_track(
                "opacity",
                easing::LINEAR,
                [(0.0, Value::from(0.5)), (250.0, Value::from(0.8)), (500.0, Value::from(1.0))],
            )
    }

    #[test]
    fn test_last_value_wins_per_track() {
        let steps = generate_steps(&pop(AnimationType::Entry));
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].values["scale"], "1.05");
        assert_eq!(steps[1].values["opacity"], "1");
        assert_eq!(steps[1].values.len(), 1);
        assert_eq!(steps[0].duration, 0.5);
        assert_eq!(steps[0].delay, 0.1);
    }

    #[test]
    fn test_cubic_bezier_replaced() {
        let steps = generate_steps(&pop(AnimationType::Entry));
        assert_eq!(steps[0].ease, "power4(0.175, 0.885, 0.32, 1.275)");
        assert_eq!(steps[1].ease, "linear");
    }

    #[test]
    fn test_rotate_maps_to_rotation() {
        let anim = Animation::new("r", "el", AnimationType::Entry).with_track(
            "transform.rotate",
            easing::LINEAR,
            [(0.0, Value::from("0deg")), (1000.0, Value::from("90deg"))],
        );
        let code = compile(&anim).code;
        assert!(code.contains("rotation: \"90deg\""));
    }

    #[test]
    fn test_step_text() {
        let code = compile(&pop(AnimationType::Entry)).code;
        assert!(code.starts_with("const timeline = gsap.timeline({\n  paused: true\n})\n  .to(element, {\n    scale: \"1.05\",\n    duration: 0.5,\n    delay: 0.1,\n"));
        assert!(code.ends_with("});\n\ntimeline.play();\n"));
    }

    #[test]
    fn test_hover_trigger() {
        let code = compile(&pop(AnimationType::Hover)).code;
        assert!(code.contains("paused: true,\n  repeat: 0"));
        assert!(code.contains("element.addEventListener('mouseenter', () => timeline.play());"));
        assert!(code.contains("element.addEventListener('mouseleave', () => timeline.reverse());"));
        assert!(!code.contains("timeline.play();\n"));
        assert!(!code.contains("'click'"));
        assert!(!code.contains("ScrollTrigger"));
    }

    #[test]
    fn test_scroll_registers_plugin() {
        let compiled = compile(&pop(AnimationType::Scroll));
        assert!(compiled.implementation.contains("import ScrollTrigger from 'gsap/ScrollTrigger';"));
        assert!(compiled.implementation.contains("gsap.registerPlugin(ScrollTrigger);"));
        assert!(compiled.implementation.contains("document.querySelector('#element-cta')"));
        assert!(compiled.code.contains("start: \"top 80%\""));
    }

    #[test]
    fn test_module_defers_element_lookup() {
        let anim = pop(AnimationType::Click);
        let module = generate_module(&anim, &compile(&anim).code);
        assert!(module.starts_with("import gsap from 'gsap';\n\nexport default function runAnimation() {\n"));
        assert!(module.contains("  const element = document.querySelector('#element-cta');\n  if (!element) return;\n"));
        assert!(module.contains("\n  element.addEventListener('click', () => timeline.play());\n}\n"));
    }

    #[test]
    fn test_exit_and_click_triggers() {
        assert_eq!(generate_trigger(AnimationType::Exit), "timeline.reverse();");
        assert!(generate_trigger(AnimationType::Click).contains("'click'"));
    }
}
