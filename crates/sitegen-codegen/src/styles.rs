//! CSS declarations to Tailwind utility classes.
//!
//! Numeric scales snap a pixel length to the smallest bucket whose bound is
//! at least that length. Values with no utility (arbitrary colors, widths
//! past the top of the scale) are dropped without error.

use sitegen_core::value::parse_leading_int;
use sitegen_core::{StyleMap, Value};

/// `(max px, suffix)` buckets for `w-*` and `h-*`.
const SIZE_SCALE: &[(i64, &str)] = &[
    (4, "px"),
    (8, "2"),
    (12, "3"),
    (16, "4"),
    (20, "5"),
    (24, "6"),
    (32, "8"),
    (40, "10"),
    (48, "12"),
    (64, "16"),
    (80, "20"),
    (96, "24"),
    (128, "32"),
    (160, "40"),
    (192, "48"),
    (256, "64"),
    (320, "80"),
    (384, "96"),
];

/// `(max px, suffix)` buckets for margin, padding and gap.
const SPACING_SCALE: &[(i64, &str)] = &[
    (1, "px"),
    (2, "0.5"),
    (4, "1"),
    (6, "1.5"),
    (8, "2"),
    (10, "2.5"),
    (12, "3"),
    (14, "3.5"),
    (16, "4"),
    (20, "5"),
    (24, "6"),
    (28, "7"),
    (32, "8"),
    (36, "9"),
    (40, "10"),
    (44, "11"),
    (48, "12"),
    (56, "14"),
    (64, "16"),
    (80, "20"),
    (96, "24"),
    (112, "28"),
    (128, "32"),
    (144, "36"),
    (160, "40"),
    (176, "44"),
    (192, "48"),
    (208, "52"),
    (224, "56"),
    (240, "60"),
    (256, "64"),
    (288, "72"),
    (320, "80"),
    (384, "96"),
];

const SPACING_MAX: i64 = 384;
const GAP_MAX: i64 = 96;
const DIRECTIONAL_MAX: i64 = 24;

/// `(max opacity, class)` buckets; anything above the last is `opacity-100`.
const OPACITY_SCALE: &[(f64, &str)] = &[
    (0.05, "opacity-5"),
    (0.1, "opacity-10"),
    (0.2, "opacity-20"),
    (0.25, "opacity-25"),
    (0.3, "opacity-30"),
    (0.4, "opacity-40"),
    (0.5, "opacity-50"),
    (0.6, "opacity-60"),
    (0.7, "opacity-70"),
    (0.75, "opacity-75"),
    (0.8, "opacity-80"),
    (0.9, "opacity-90"),
    (0.95, "opacity-95"),
];

const DISPLAY: &[(&str, &str)] = &[
    ("block", "block"),
    ("inline", "inline"),
    ("inline-block", "inline-block"),
    ("flex", "flex"),
    ("inline-flex", "inline-flex"),
    ("grid", "grid"),
    ("inline-grid", "inline-grid"),
    ("none", "hidden"),
];

const POSITION: &[(&str, &str)] = &[
    ("static", "static"),
    ("relative", "relative"),
    ("absolute", "absolute"),
    ("fixed", "fixed"),
    ("sticky", "sticky"),
];

/// Named colors and the hex codes that alias them, as `(css, tailwind color)`.
const COLORS: &[(&str, &str)] = &[
    ("black", "black"),
    ("white", "white"),
    ("transparent", "transparent"),
    ("red", "red-500"),
    ("blue", "blue-500"),
    ("green", "green-500"),
    ("yellow", "yellow-500"),
    ("purple", "purple-500"),
    ("pink", "pink-500"),
    ("gray", "gray-500"),
    ("#000", "black"),
    ("#000000", "black"),
    ("#fff", "white"),
    ("#ffffff", "white"),
    ("#f00", "red-500"),
    ("#0f0", "green-500"),
    ("#00f", "blue-500"),
];

const FONT_SIZE: &[(&str, &str)] = &[
    ("12px", "text-xs"),
    ("14px", "text-sm"),
    ("16px", "text-base"),
    ("18px", "text-lg"),
    ("20px", "text-xl"),
    ("24px", "text-2xl"),
    ("30px", "text-3xl"),
    ("36px", "text-4xl"),
    ("48px", "text-5xl"),
    ("60px", "text-6xl"),
    ("72px", "text-7xl"),
    ("96px", "text-8xl"),
    ("128px", "text-9xl"),
];

const FONT_WEIGHT: &[(&str, &str)] = &[
    ("100", "font-thin"),
    ("200", "font-extralight"),
    ("300", "font-light"),
    ("400", "font-normal"),
    ("500", "font-medium"),
    ("600", "font-semibold"),
    ("700", "font-bold"),
    ("800", "font-extrabold"),
    ("900", "font-black"),
    ("thin", "font-thin"),
    ("extralight", "font-extralight"),
    ("light", "font-light"),
    ("normal", "font-normal"),
    ("medium", "font-medium"),
    ("semibold", "font-semibold"),
    ("bold", "font-bold"),
    ("extrabold", "font-extrabold"),
    ("black", "font-black"),
];

const BORDER: &[(&str, &str)] = &[
    ("none", "border-0"),
    ("1px solid black", "border border-black"),
    ("1px solid", "border"),
    ("2px solid", "border-2"),
    ("4px solid", "border-4"),
    ("8px solid", "border-8"),
];

const BORDER_RADIUS: &[(&str, &str)] = &[
    ("0", "rounded-none"),
    ("0px", "rounded-none"),
    ("2px", "rounded-sm"),
    ("4px", "rounded"),
    ("6px", "rounded-md"),
    ("8px", "rounded-lg"),
    ("12px", "rounded-xl"),
    ("16px", "rounded-2xl"),
    ("24px", "rounded-3xl"),
    ("9999px", "rounded-full"),
    ("50%", "rounded-full"),
];

const FLEX_DIRECTION: &[(&str, &str)] = &[
    ("row", "flex-row"),
    ("column", "flex-col"),
    ("row-reverse", "flex-row-reverse"),
    ("column-reverse", "flex-col-reverse"),
];

const JUSTIFY_CONTENT: &[(&str, &str)] = &[
    ("flex-start", "justify-start"),
    ("flex-end", "justify-end"),
    ("center", "justify-center"),
    ("space-between", "justify-between"),
    ("space-around", "justify-around"),
    ("space-evenly", "justify-evenly"),
];

const ALIGN_ITEMS: &[(&str, &str)] = &[
    ("flex-start", "items-start"),
    ("flex-end", "items-end"),
    ("center", "items-center"),
    ("baseline", "items-baseline"),
    ("stretch", "items-stretch"),
];

const CURSOR: &[(&str, &str)] = &[
    ("pointer", "cursor-pointer"),
    ("default", "cursor-default"),
    ("text", "cursor-text"),
    ("move", "cursor-move"),
    ("not-allowed", "cursor-not-allowed"),
    ("grab", "cursor-grab"),
    ("grabbing", "cursor-grabbing"),
    ("wait", "cursor-wait"),
    ("help", "cursor-help"),
];

const TEXT_ALIGN: &[(&str, &str)] = &[
    ("left", "text-left"),
    ("center", "text-center"),
    ("right", "text-right"),
    ("justify", "text-justify"),
];

const Z_INDEX: &[(i64, &str)] = &[
    (0, "z-0"),
    (10, "z-10"),
    (20, "z-20"),
    (30, "z-30"),
    (40, "z-40"),
    (50, "z-50"),
    (-10, "z-[-10]"),
    (-20, "z-[-20]"),
];

/// Directional longhands handled after the main pass, with their prefixes.
const DIRECTIONAL: &[(&str, &str)] = &[
    ("marginTop", "mt"),
    ("marginRight", "mr"),
    ("marginBottom", "mb"),
    ("marginLeft", "ml"),
    ("paddingTop", "pt"),
    ("paddingRight", "pr"),
    ("paddingBottom", "pb"),
    ("paddingLeft", "pl"),
];

fn lookup(table: &[(&str, &'static str)], value: &str) -> Option<&'static str> {
    table.iter().find(|(key, _)| *key == value).map(|(_, class)| *class)
}

/// True for `0`, `0px`, `0rem`, `0%` and other unit-suffixed zeros.
pub fn is_zero_length(value: &str) -> bool {
    value
        .trim()
        .trim_end_matches(|c: char| c.is_ascii_alphabetic() || c == '%')
        .parse::<f64>()
        .map_or(false, |n| n == 0.0)
}

/// Snap a `<n>px` length onto `scale`, ignoring buckets above `max`.
fn quantize_px(value: &str, scale: &[(i64, &'static str)], max: i64) -> Option<&'static str> {
    if !value.ends_with("px") {
        return None;
    }
    let size = parse_leading_int(value)?;
    scale
        .iter()
        .take_while(|(bound, _)| *bound <= max)
        .find(|(bound, _)| size <= *bound)
        .map(|(_, suffix)| *suffix)
}

fn size_class(prefix: &str, value: &str) -> Option<String> {
    if is_zero_length(value) {
        return Some(format!("{}-0", prefix));
    }
    match value {
        "auto" => Some(format!("{}-auto", prefix)),
        "100%" => Some(format!("{}-full", prefix)),
        _ => quantize_px(value, SIZE_SCALE, SPACING_MAX).map(|s| format!("{}-{}", prefix, s)),
    }
}

fn spacing_class(prefix: &str, value: &str, max: i64, allow_auto: bool) -> Option<String> {
    if is_zero_length(value) {
        return Some(format!("{}-0", prefix));
    }
    if allow_auto && value == "auto" {
        return Some(format!("{}-auto", prefix));
    }
    quantize_px(value, SPACING_SCALE, max).map(|s| format!("{}-{}", prefix, s))
}

/// Every hex alias matches case-insensitively (`#FFF` is `white`), not only
/// the `#f00`/`#0f0`/`#00f` shorthands.
fn color_class(prefix: &str, value: &str) -> Option<String> {
    let color = lookup(COLORS, value).or_else(|| {
        if value.starts_with('#') {
            lookup(COLORS, &value.to_ascii_lowercase())
        } else {
            None
        }
    })?;
    Some(format!("{}-{}", prefix, color))
}

/// Opacity bucket for a value in `[0, 1]`; `None` when it does not parse.
pub fn opacity_class(value: &Value) -> Option<&'static str> {
    let opacity = value.to_float()?;
    if opacity.is_nan() {
        return None;
    }
    if opacity <= 0.0 {
        return Some("opacity-0");
    }
    Some(
        OPACITY_SCALE
            .iter()
            .find(|(bound, _)| opacity <= *bound)
            .map_or("opacity-100", |(_, class)| *class),
    )
}

fn z_index_class(value: &Value) -> Option<&'static str> {
    let z = match value {
        Value::Number(n) if n.is_finite() => n.trunc() as i64,
        other => parse_leading_int(&other.to_string())?,
    };
    Z_INDEX.iter().find(|(level, _)| *level == z).map(|(_, class)| *class)
}

/// Map a single declaration to its utility class, if it has one.
///
/// Numbers are only meaningful for `opacity` and `zIndex`; every other
/// numeric value maps to nothing.
pub fn map_property(property: &str, value: &Value) -> Option<String> {
    match property {
        "opacity" => return opacity_class(value).map(str::to_string),
        "zIndex" => return z_index_class(value).map(str::to_string),
        _ if value.is_number() => return None,
        _ => {}
    }

    let text = value.to_string();
    let text = text.as_str();
    let literal = |table: &[(&str, &'static str)]| lookup(table, text).map(str::to_string);

    match property {
        "display" => literal(DISPLAY),
        "position" => literal(POSITION),
        "width" => size_class("w", text),
        "height" => size_class("h", text),
        "margin" => spacing_class("m", text, SPACING_MAX, true),
        "padding" => spacing_class("p", text, SPACING_MAX, false),
        "gap" => spacing_class("gap", text, GAP_MAX, false),
        "color" => color_class("text", text),
        "backgroundColor" => color_class("bg", text),
        "fontSize" => literal(FONT_SIZE),
        "fontWeight" => literal(FONT_WEIGHT),
        "border" => literal(BORDER),
        "borderRadius" => literal(BORDER_RADIUS),
        "flexDirection" => literal(FLEX_DIRECTION),
        "justifyContent" => literal(JUSTIFY_CONTENT),
        "alignItems" => literal(ALIGN_ITEMS),
        "cursor" => literal(CURSOR),
        "textAlign" => literal(TEXT_ALIGN),
        _ => None,
    }
}

/// Convert a style map to a space-separated class list.
///
/// Classes follow the map's insertion order, then the directional margin
/// and padding longhands in top, right, bottom, left order.
pub fn map_styles(styles: &StyleMap) -> String {
    let mut classes: Vec<String> = styles
        .iter()
        .filter_map(|(property, value)| map_property(property, value))
        .collect();

    for (property, prefix) in DIRECTIONAL {
        let Some(Value::Text(text)) = styles.get(*property) else {
            continue;
        };
        if let Some(class) = spacing_class(prefix, text, DIRECTIONAL_MAX, true) {
            classes.push(class);
        }
    }

    classes.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn styles(pairs: &[(&str, Value)]) -> StyleMap {
        pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
    }

    fn class(property: &str, value: &str) -> Option<String> {
        map_property(property, &Value::from(value))
    }

    #[test]
    fn test_zero_lengths() {
        for zero in ["0", "0px", "0rem", "0em"] {
            assert_eq!(class("width", zero).as_deref(), Some("w-0"));
            assert_eq!(class("height", zero).as_deref(), Some("h-0"));
            assert_eq!(class("margin", zero).as_deref(), Some("m-0"));
            assert_eq!(class("padding", zero).as_deref(), Some("p-0"));
            assert_eq!(class("gap", zero).as_deref(), Some("gap-0"));
        }
        let map = styles(&[("marginTop", "0px".into()), ("paddingLeft", "0".into())]);
        assert_eq!(map_styles(&map), "mt-0 pl-0");
    }

    #[test]
    fn test_width_buckets() {
        assert_eq!(class("width", "3px").as_deref(), Some("w-px"));
        assert_eq!(class("width", "100px").as_deref(), Some("w-32"));
        assert_eq!(class("width", "384px").as_deref(), Some("w-96"));
        assert_eq!(class("width", "385px"), None);
        assert_eq!(class("width", "auto").as_deref(), Some("w-auto"));
        assert_eq!(class("height", "100%").as_deref(), Some("h-full"));
        assert_eq!(class("width", "50%"), None);
        assert_eq!(class("width", "12.9px").as_deref(), Some("w-3"));
    }

    #[test]
    fn test_spacing_buckets() {
        assert_eq!(class("margin", "1px").as_deref(), Some("m-px"));
        assert_eq!(class("margin", "3px").as_deref(), Some("m-1"));
        assert_eq!(class("margin", "auto").as_deref(), Some("m-auto"));
        assert_eq!(class("padding", "auto"), None);
        assert_eq!(class("padding", "260px").as_deref(), Some("p-72"));
        assert_eq!(class("gap", "96px").as_deref(), Some("gap-24"));
        assert_eq!(class("gap", "97px"), None);
    }

    #[test]
    fn test_directional_after_main_list() {
        let map = styles(&[
            ("paddingRight", "10px".into()),
            ("marginBottom", "auto".into()),
            ("display", "flex".into()),
            ("marginTop", "30px".into()),
        ]);
        assert_eq!(map_styles(&map), "flex mb-auto pr-2.5");
    }

    #[test]
    fn test_literal_tables() {
        assert_eq!(class("display", "none").as_deref(), Some("hidden"));
        assert_eq!(class("fontWeight", "600").as_deref(), Some("font-semibold"));
        assert_eq!(class("fontSize", "30px").as_deref(), Some("text-3xl"));
        assert_eq!(class("border", "1px solid black").as_deref(), Some("border border-black"));
        assert_eq!(class("borderRadius", "50%").as_deref(), Some("rounded-full"));
        assert_eq!(class("justifyContent", "space-between").as_deref(), Some("justify-between"));
        assert_eq!(class("cursor", "not-allowed").as_deref(), Some("cursor-not-allowed"));
        assert_eq!(class("textAlign", "justify").as_deref(), Some("text-justify"));
        assert_eq!(class("display", "table"), None);
    }

    #[test]
    fn test_colors() {
        assert_eq!(class("color", "red").as_deref(), Some("text-red-500"));
        assert_eq!(class("backgroundColor", "#FFF").as_deref(), Some("bg-white"));
        assert_eq!(class("backgroundColor", "#00F").as_deref(), Some("bg-blue-500"));
        assert_eq!(class("color", "#123456"), None);
        assert_eq!(class("color", "rgb(0, 0, 0)"), None);
    }

    #[test]
    fn test_numeric_values_only_for_opacity_and_z_index() {
        let map = styles(&[
            ("width", Value::from(100.0)),
            ("opacity", Value::from(0.5)),
            ("zIndex", Value::from(10.0)),
            ("fontWeight", Value::from(700.0)),
        ]);
        assert_eq!(map_styles(&map), "opacity-50 z-10");
    }

    #[test]
    fn test_z_index() {
        assert_eq!(class("zIndex", "-10").as_deref(), Some("z-[-10]"));
        assert_eq!(class("zIndex", "15"), None);
        assert_eq!(class("zIndex", "auto"), None);
    }

    #[test]
    fn test_opacity_edges() {
        assert_eq!(opacity_class(&Value::from(0.0)), Some("opacity-0"));
        assert_eq!(opacity_class(&Value::from(1.0)), Some("opacity-100"));
        assert_eq!(opacity_class(&Value::from("0.25")), Some("opacity-25"));
        assert_eq!(opacity_class(&Value::from("half")), None);
    }

    fn opacity_rank(class: &str) -> u32 {
        class.trim_start_matches("opacity-").parse().unwrap()
    }

    proptest! {
        #[test]
        fn prop_opacity_monotonic(a in 0.0f64..=1.0, b in 0.0f64..=1.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let lo_rank = opacity_rank(opacity_class(&Value::from(lo)).unwrap());
            let hi_rank = opacity_rank(opacity_class(&Value::from(hi)).unwrap());
            prop_assert!(lo_rank <= hi_rank);
        }

        #[test]
        fn prop_width_bucket_covers_value(px in 5i64..=384) {
            let class = class("width", &format!("{}px", px)).unwrap();
            let suffix = class.trim_start_matches("w-");
            let bound = SIZE_SCALE.iter().find(|(_, s)| *s == suffix).unwrap().0;
            prop_assert!(bound >= px);
        }

        #[test]
        fn prop_width_saturates(px in 385i64..10_000) {
            prop_assert_eq!(class("width", &format!("{}px", px)), None);
        }

        #[test]
        fn prop_spacing_bucket_is_smallest(px in 1i64..=384) {
            let class = class("padding", &format!("{}px", px)).unwrap();
            let suffix = class.trim_start_matches("p-");
            let index = SPACING_SCALE.iter().position(|(_, s)| *s == suffix).unwrap();
            prop_assert!(SPACING_SCALE[index].0 >= px);
            if index > 0 {
                prop_assert!(SPACING_SCALE[index - 1].0 < px);
            }
        }
    }
}
