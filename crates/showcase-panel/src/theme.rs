use serde::Serialize;
use showcase_core::ColorMode;

pub const COPY_ICON: &str = "/img/purpleCopy.svg";
pub const COST_ICON: &str = "/img/Cost.svg";
pub const TIMER_ICON: &str = "/img/Timer.svg";
pub const INFO_ICON: &str = "/img/info.svg";

/// Colors and theme-dependent icons for one render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleSet {
    pub text_color: &'static str,
    /// Underline of the selected tab
    pub selected_indicator: &'static str,
    pub hover_background: &'static str,
    /// Callout beak/background; the light theme keeps the framework default
    pub callout_background: Option<&'static str>,
    pub callout_padding: &'static str,
    pub chevron_icon: &'static str,
    pub redirect_icon: &'static str,
}

pub fn style_for(mode: ColorMode) -> StyleSet {
    match mode {
        ColorMode::Light => StyleSet {
            text_color: "black",
            selected_indicator: "#6656d1",
            hover_background: "#f3f2f1",
            callout_background: None,
            callout_padding: "3px 10px",
            chevron_icon: "/img/leftChevron.svg",
            redirect_icon: "/img/redirect.svg",
        },
        ColorMode::Dark => StyleSet {
            text_color: "white",
            selected_indicator: "#A79CF1",
            hover_background: "#242424",
            callout_background: Some("#292929"),
            callout_padding: "3px 10px",
            chevron_icon: "/img/leftChevronDark.svg",
            redirect_icon: "/img/redirectDark.svg",
        },
    }
}
