pub mod copy;
pub mod panel;
pub mod render;
pub mod services;
pub mod state;
pub mod theme;

pub use copy::{CalloutState, CopyButton};
pub use panel::{
    resolved_course_blueprint_badges, resolved_service_badges, CardPanel, CopyTarget, Services,
};
pub use render::{render_panel, PanelRenderer, RenderError};
pub use services::{AssetResolver, BaseUrlResolver, Clipboard, ColorModeSource, FixedColorMode, MemoryClipboard};
pub use state::{PanelSection, PanelState, PanelTab, PanelToggles};
pub use theme::{style_for, StyleSet};

use showcase_core::{Catalog, Result};

/// Build the panel for the template addressed by file stem or title.
pub fn build_panel(
    catalog: &Catalog,
    template: &str,
    services: Services<'_>,
    toggles: PanelToggles,
) -> Result<CardPanel> {
    let entry = catalog.find_template(template)?;
    CardPanel::build(catalog, &entry.record, services, toggles)
}

/// Build and render in one step, for callers that only want HTML.
pub fn render_template(
    catalog: &Catalog,
    template: &str,
    services: Services<'_>,
    toggles: PanelToggles,
) -> std::result::Result<String, RenderError> {
    let panel = build_panel(catalog, template, services, toggles)?;
    render_panel(&panel)
}
