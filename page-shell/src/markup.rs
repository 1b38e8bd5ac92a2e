//! Class names, inline styles and small markup fragments the page layer
//! writes into the DOM.

use sentiment_core::format::format_megabytes;

pub const DRAG_OVER_CLASS: &str = "drag-over";
pub const FADE_IN_CLASS: &str = "fade-in";
pub const COUNTED_CLASS: &str = "counted";
pub const LOADING_CLASS: &str = "loading";
pub const SLIDE_IN_ANIMATION: &str = "slideInUp 0.6s ease-out forwards";
pub const UPLOAD_PULSE_ANIMATION: &str = "pulse 0.5s ease-in-out";
pub const UPLOAD_PULSE_MS: u32 = 500;

pub const SPINNER_LABEL: &str = r#"<i class="fas fa-spinner fa-spin me-2"></i>Loading..."#;

pub const COPY_OK_MESSAGE: &str = "Text copied to clipboard!";
pub const COPY_FAILED_MESSAGE: &str = "Failed to copy text";

pub const RIPPLE_STYLE_ID: &str = "ripple-animation";
pub const RIPPLE_KEYFRAMES: &str = "@keyframes ripple { to { transform: scale(2); opacity: 0; } }";
pub const RIPPLE_STYLE: &str = "position: absolute; border-radius: 50%; \
    background: rgba(255, 255, 255, 0.6); transform: scale(0); \
    animation: ripple 0.6s linear; pointer-events: none; left: 50%; top: 50%; \
    width: 40px; height: 40px; margin-left: -20px; margin-top: -20px;";
pub const RIPPLE_MS: u32 = 600;
pub const SPIN_DELAY_MS: u32 = 50;
pub const SPIN_SETTLE_MS: u32 = 300;

/// Name and size lines shown inside an upload area once a file is chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSummary {
    pub name: String,
    pub size: String,
}

impl FileSummary {
    pub fn new(name: &str, bytes: u64) -> Self {
        Self {
            name: name.to_string(),
            size: format_megabytes(bytes),
        }
    }
}

/// Inline style for a scroll-reveal target before it enters the viewport.
pub fn hidden_reveal_style() -> [(&'static str, &'static str); 2] {
    [("opacity", "0"), ("transform", "translateY(30px)")]
}

/// Pixel height for an auto-resized textarea; never collapses to nothing.
pub fn textarea_height(scroll_height: i32) -> String {
    format!("{}px", scroll_height.max(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_summary_uses_megabytes() {
        let summary = FileSummary::new("reviews.csv", 1_572_864);
        assert_eq!(summary.name, "reviews.csv");
        assert_eq!(summary.size, "1.50 MB");
        assert_eq!(FileSummary::new("empty.txt", 0).size, "0.00 MB");
    }

    #[test]
    fn textarea_height_is_pixels() {
        assert_eq!(textarea_height(120), "120px");
        assert_eq!(textarea_height(-4), "0px");
    }

    #[test]
    fn reveal_starts_hidden() {
        let style = hidden_reveal_style();
        assert!(style.contains(&("opacity", "0")));
    }
}
