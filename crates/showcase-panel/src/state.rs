use serde::{Deserialize, Serialize};

/// Visibility of a collapsible section. Only `toggle` moves between states.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PanelState {
    Collapsed,
    #[default]
    Expanded,
}

impl PanelState {
    pub fn toggle(self) -> Self {
        match self {
            PanelState::Collapsed => PanelState::Expanded,
            PanelState::Expanded => PanelState::Collapsed,
        }
    }

    pub fn is_expanded(self) -> bool {
        self == PanelState::Expanded
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PanelSection {
    /// "3-Step Deployment"
    Deployment,
    /// "Included in this template"
    Services,
}

/// Per-panel-instance section state. Both sections start expanded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelToggles {
    pub deployment: PanelState,
    pub services: PanelState,
}

impl PanelToggles {
    pub fn get(&self, section: PanelSection) -> PanelState {
        match section {
            PanelSection::Deployment => self.deployment,
            PanelSection::Services => self.services,
        }
    }

    pub fn toggle(&mut self, section: PanelSection) -> PanelState {
        let state = match section {
            PanelSection::Deployment => &mut self.deployment,
            PanelSection::Services => &mut self.services,
        };
        *state = state.toggle();
        *state
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PanelTab {
    #[default]
    TemplateDetails,
    DemoGuide,
    CourseBlueprint,
    Legal,
}

impl PanelTab {
    pub const ALL: [PanelTab; 4] = [
        PanelTab::TemplateDetails,
        PanelTab::DemoGuide,
        PanelTab::CourseBlueprint,
        PanelTab::Legal,
    ];

    pub fn header(self) -> &'static str {
        match self {
            PanelTab::TemplateDetails => "Template Details",
            PanelTab::DemoGuide => "Demo Guide",
            PanelTab::CourseBlueprint => "Course Blueprint",
            PanelTab::Legal => "Legal",
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            PanelTab::TemplateDetails => "details",
            PanelTab::DemoGuide => "demo-guide",
            PanelTab::CourseBlueprint => "course-blueprint",
            PanelTab::Legal => "legal",
        }
    }
}
