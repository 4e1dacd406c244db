//! DOM rendering module
//!
//! Each entity is an absolutely positioned `<img>` inside the board element.
//! Only the formatting helpers are compiled off the web.

#[cfg(target_arch = "wasm32")]
pub mod dom;

#[cfg(target_arch = "wasm32")]
pub use dom::{ClickQueue, DomHud, SpriteBoard};

/// CSS length for an arena coordinate
pub fn css_px(value: f32) -> String {
    format!("{:.1}px", value)
}

/// Banner text for the creature to find
pub fn target_label(target: &str) -> String {
    format!("Find: {}!", target.to_uppercase())
}

/// Whether a failed `<img>` should fall back to `placeholder`.
///
/// `src_attr` is the raw `src` attribute, not the resolved `src` property, so
/// relative placeholder URLs compare equal to themselves.
pub fn needs_placeholder(src_attr: Option<&str>, placeholder: &str) -> bool {
    src_attr != Some(placeholder)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_px() {
        assert_eq!(css_px(12.0), "12.0px");
        assert_eq!(css_px(7.26), "7.3px");
    }

    #[test]
    fn test_placeholder_swapped_once_for_relative_urls() {
        let sprites = crate::SpriteSource {
            base_url: "/assets/sprites/".into(),
            ..crate::SpriteSource::default()
        };
        let placeholder = sprites.placeholder_url();
        assert!(needs_placeholder(Some(&sprites.url("pikachu")), &placeholder));
        assert!(needs_placeholder(None, &placeholder));
        // Placeholder failing too must not trigger another swap
        assert!(!needs_placeholder(Some(&placeholder), &placeholder));
    }

    #[test]
    fn test_target_label() {
        assert_eq!(target_label("mr_mime"), "Find: MR_MIME!");
    }
}
