use serde::{Deserialize, Serialize};

use crate::format::capitalize;

pub const DEFAULT_TOAST_MS: u32 = 5_000;

/// Toast severity; each maps to a fixed icon and colour class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
    Warning,
    #[default]
    Info,
}

impl ToastKind {
    /// Unknown levels fall back to `Info`.
    pub fn parse(level: &str) -> Self {
        match level.trim().to_ascii_lowercase().as_str() {
            "success" => ToastKind::Success,
            "error" => ToastKind::Error,
            "warning" => ToastKind::Warning,
            _ => ToastKind::Info,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ToastKind::Success => "success",
            ToastKind::Error => "error",
            ToastKind::Warning => "warning",
            ToastKind::Info => "info",
        }
    }

    /// Font Awesome icon name (without the `fa-` prefix).
    pub fn icon(self) -> &'static str {
        match self {
            ToastKind::Success => "check-circle",
            ToastKind::Error => "exclamation-triangle",
            ToastKind::Warning => "exclamation-circle",
            ToastKind::Info => "info-circle",
        }
    }

    pub fn color_class(self) -> &'static str {
        match self {
            ToastKind::Success => "text-success",
            ToastKind::Error => "text-danger",
            ToastKind::Warning => "text-warning",
            ToastKind::Info => "text-info",
        }
    }

    pub fn title(self) -> String {
        capitalize(self.as_str())
    }

    pub fn container_class(self) -> String {
        format!("toast show position-fixed top-0 end-0 m-3 toast-{}", self.as_str())
    }

    pub fn icon_class(self) -> String {
        format!("fas fa-{} {} me-2", self.icon(), self.color_class())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_map_to_icon_and_color() {
        assert_eq!(ToastKind::parse("success").icon(), "check-circle");
        assert_eq!(ToastKind::parse("error").color_class(), "text-danger");
        assert_eq!(
            ToastKind::Warning.icon_class(),
            "fas fa-exclamation-circle text-warning me-2"
        );
        assert_eq!(ToastKind::Info.title(), "Info");
    }

    #[test]
    fn unknown_level_is_info() {
        assert_eq!(ToastKind::parse("fatal"), ToastKind::Info);
        assert_eq!(ToastKind::parse(" Error "), ToastKind::Error);
    }
}
