//! Page markers shared by the browser host
//!
//! Kept free of `web-sys` so the gate can be checked natively.

/// Id of the background canvas element
pub const CANVAS_ID: &str = "starfield";
/// Pages whose body carries this class get no background effects
pub const SKIP_BODY_CLASS: &str = "about-page-body";
/// Optional JSON config string on `window`
pub const CONFIG_GLOBAL: &str = "__starfield_config";

/// Whether a page with the given `<body>` class attribute runs the effects.
pub fn effects_enabled(body_class: &str) -> bool {
    !body_class.split_whitespace().any(|c| c == SKIP_BODY_CLASS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_pages_run_effects() {
        assert!(effects_enabled(""));
        assert!(effects_enabled("home-page dark"));
    }

    #[test]
    fn test_about_page_marker_disables_effects() {
        assert!(!effects_enabled("about-page-body"));
        assert!(!effects_enabled("  dark\tabout-page-body  "));
    }

    #[test]
    fn test_marker_must_match_whole_class() {
        assert!(effects_enabled("about-page-body-wide"));
        assert!(effects_enabled("not-about-page-body"));
    }
}
