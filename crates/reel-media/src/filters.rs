//! Drawtext filter construction for text overlays.

use std::collections::HashMap;

use reel_models::{FontWeight, TextOverlay};

/// Substitute `{{name}}` placeholders in overlay text with content
/// variables. Unknown placeholders are left as-is so a typo is visible in
/// the rendered clip instead of silently vanishing.
pub fn substitute_variables(text: &str, variables: &HashMap<String, String>) -> String {
    let mut result = text.to_string();
    for (key, value) in variables {
        result = result.replace(&format!("{{{{{}}}}}", key), value);
    }
    result
}

/// Escape a string for use inside a drawtext `text='...'` value.
///
/// Backslash first, then the characters the filter parser treats as
/// delimiters. A stray quote or colon would otherwise terminate the value
/// mid-text.
pub fn escape_drawtext(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace(':', "\\:")
        .replace('%', "\\%")
}

/// Build a drawtext filter for one overlay.
///
/// The normalized anchor maps to `(w-text_w)*x` / `(h-text_h)*y`, so the
/// text box stays fully inside the frame at both extremes.
pub fn build_overlay_filter(overlay: &TextOverlay, variables: &HashMap<String, String>) -> String {
    let text = escape_drawtext(&substitute_variables(&overlay.content, variables));
    let style = &overlay.style;

    let font = match style.weight {
        FontWeight::Normal => "Sans".to_string(),
        FontWeight::Bold => "Sans\\:bold".to_string(),
    };

    let mut filter = format!(
        "drawtext=text='{}':font='{}':fontsize={}:fontcolor={}:x=(w-text_w)*{:.4}:y=(h-text_h)*{:.4}",
        text, font, style.font_size, style.color, overlay.position.x, overlay.position.y,
    );

    if let Some(stroke) = &style.stroke_color {
        filter.push_str(&format!(":borderw={}:bordercolor={}", style.stroke_width, stroke));
    }

    if let Some(background) = &style.background_color {
        filter.push_str(&format!(":box=1:boxcolor={}:boxborderw=12", background));
    }

    filter
}

#[cfg(test)]
mod tests {
    use super::*;
    use reel_models::OverlayStyle;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_substitute_variables() {
        let out = substitute_variables(
            "Try {{product}} today",
            &vars(&[("product", "GlowSerum")]),
        );
        assert_eq!(out, "Try GlowSerum today");
    }

    #[test]
    fn test_unknown_placeholder_left_visible() {
        let out = substitute_variables("Hello {{nobody}}", &vars(&[]));
        assert_eq!(out, "Hello {{nobody}}");
    }

    #[test]
    fn test_escape_drawtext() {
        assert_eq!(escape_drawtext("it's 100%: a\\b"), "it\\'s 100\\%\\: a\\\\b");
    }

    #[test]
    fn test_filter_contains_position_and_style() {
        let overlay = TextOverlay::new("Watch this", 0.5, 0.1);
        let filter = build_overlay_filter(&overlay, &HashMap::new());

        assert!(filter.starts_with("drawtext=text='Watch this'"));
        assert!(filter.contains("x=(w-text_w)*0.5000"));
        assert!(filter.contains("y=(h-text_h)*0.1000"));
        assert!(filter.contains("fontsize=64"));
        assert!(filter.contains("borderw=4:bordercolor=black"));
        assert!(!filter.contains("box=1"));
    }

    #[test]
    fn test_filter_with_background_box() {
        let mut overlay = TextOverlay::new("Caption", 0.5, 0.8);
        overlay.style = OverlayStyle {
            stroke_color: None,
            background_color: Some("black@0.5".to_string()),
            ..OverlayStyle::default()
        };
        let filter = build_overlay_filter(&overlay, &HashMap::new());

        assert!(filter.contains("box=1:boxcolor=black@0.5"));
        assert!(!filter.contains("borderw"));
    }

    #[test]
    fn test_apostrophe_in_content_is_escaped() {
        let overlay = TextOverlay::new("O'Brien's pick: {{item}}", 0.5, 0.5);
        let filter = build_overlay_filter(&overlay, &vars(&[("item", "5% off")]));
        assert!(filter.contains("O\\'Brien\\'s pick\\: 5\\% off"));
    }
}
