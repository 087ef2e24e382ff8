use serde::Serialize;
use showcase_core::tags::{course_blueprint_badges, service_badges};
use showcase_core::{
    Catalog, ColorMode, CourseBlueprintBadge, DeploymentCommands, ResolvedTag, Result,
    ServiceBadge, TagId, TemplateRecord,
};

use crate::copy::CopyButton;
use crate::services::{AssetResolver, Clipboard, ColorModeSource};
use crate::state::{PanelSection, PanelState, PanelTab, PanelToggles};
use crate::theme::{style_for, StyleSet, COPY_ICON, COST_ICON, INFO_ICON, TIMER_ICON};

/// Injected collaborators for one render pass.
#[derive(Clone, Copy)]
pub struct Services<'a> {
    pub assets: &'a dyn AssetResolver,
    pub theme: &'a dyn ColorModeSource,
}

/// Everything the card panel shows for one template, already themed and with
/// asset paths resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardPanel {
    pub title: String,
    pub color_mode: ColorMode,
    pub style: StyleSet,
    pub selected_tab: PanelTab,
    pub header: PanelHeader,
    /// Every tag in canonical order
    pub tags: Vec<TagChip>,
    pub details: TemplateDetails,
    pub demo_guide: Option<String>,
    pub course_blueprints: Vec<CourseBlueprintBadge>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelHeader {
    pub authors: Vec<String>,
    pub source_url: String,
    pub redirect_icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagChip {
    pub id: TagId,
    pub label: String,
    pub description: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Estimate {
    pub icon: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateDetails {
    pub description: String,
    pub cost: Estimate,
    pub deploy_time: Estimate,
    pub prereqs: Option<Estimate>,
    pub chevron_icon: String,
    pub deployment: DeploymentSection,
    pub services: ServicesSection,
    pub preview: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentSection {
    pub state: PanelState,
    pub commands: DeploymentCommands,
    pub copy_icon: String,
    pub init: CopyButton,
    pub up: CopyButton,
    pub down: CopyButton,
    /// Template path pasted into the editor extension
    pub template_url: CopyButton,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicesSection {
    pub state: PanelState,
    pub badges: Vec<ServiceBadge>,
}

/// Which copy button was clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyTarget {
    Init,
    Up,
    Down,
    TemplateUrl,
}

/// Service badges for canonically sorted tags, with icons resolved to URLs.
pub fn resolved_service_badges(
    sorted: &[ResolvedTag<'_>],
    mode: ColorMode,
    assets: &dyn AssetResolver,
) -> Vec<ServiceBadge> {
    service_badges(sorted, mode)
        .into_iter()
        .map(|badge| ServiceBadge {
            icon: badge.icon.as_deref().map(|p| assets.resolve_asset_url(p)),
            ..badge
        })
        .collect()
}

/// Course blueprint badges, with diagram images resolved to URLs.
pub fn resolved_course_blueprint_badges(
    sorted: &[ResolvedTag<'_>],
    assets: &dyn AssetResolver,
) -> Vec<CourseBlueprintBadge> {
    course_blueprint_badges(sorted)
        .into_iter()
        .map(|badge| CourseBlueprintBadge {
            diagram: badge.diagram.as_deref().map(|p| assets.resolve_asset_url(p)),
            ..badge
        })
        .collect()
}

impl CardPanel {
    pub fn build(
        catalog: &Catalog,
        record: &TemplateRecord,
        services: Services<'_>,
        toggles: PanelToggles,
    ) -> Result<Self> {
        let title = record.title.as_str();
        let mode = services.theme.current_color_mode();
        let style = style_for(mode);
        let assets = services.assets;

        let sorted = catalog
            .resolve_sorted(&record.tags)
            .map_err(|e| e.in_template(title))?;
        let commands =
            DeploymentCommands::from_source_url(&record.source).map_err(|e| e.in_template(title))?;

        let badges = resolved_service_badges(&sorted, mode, assets);
        let course_blueprints = resolved_course_blueprint_badges(&sorted, assets);
        tracing::debug!(
            template = title,
            mode = %mode,
            tags = sorted.len(),
            services = badges.len(),
            blueprints = course_blueprints.len(),
            "built card panel"
        );

        let tags = sorted
            .iter()
            .map(|tag| TagChip {
                id: tag.id.clone(),
                label: tag.definition.label.clone(),
                description: tag.definition.description.clone(),
                color: tag.definition.color.clone(),
            })
            .collect();

        let deployment = DeploymentSection {
            state: toggles.deployment,
            copy_icon: assets.resolve_asset_url(COPY_ICON),
            init: CopyButton::new(&commands.init),
            up: CopyButton::new(&commands.up),
            down: CopyButton::new(&commands.down),
            template_url: CopyButton::new(commands.template_path.as_str()),
            commands,
        };

        let details = TemplateDetails {
            description: record.description.clone(),
            cost: Estimate {
                icon: assets.resolve_asset_url(COST_ICON),
                text: format!("Cost Estimate (per 24h): +/- ${}", record.cost),
            },
            deploy_time: Estimate {
                icon: assets.resolve_asset_url(TIMER_ICON),
                text: format!("Deploy Time Estimate (in min): +/- {}", record.deploy_time),
            },
            prereqs: record.prereqs.as_ref().map(|url| Estimate {
                icon: assets.resolve_asset_url(INFO_ICON),
                text: url.clone(),
            }),
            chevron_icon: assets.resolve_asset_url(style.chevron_icon),
            deployment,
            services: ServicesSection {
                state: toggles.services,
                badges,
            },
            preview: Some(record.preview.trim())
                .filter(|p| !p.is_empty())
                .map(|p| assets.resolve_asset_url(p)),
        };

        Ok(CardPanel {
            title: record.title.clone(),
            color_mode: mode,
            style,
            selected_tab: PanelTab::default(),
            header: PanelHeader {
                authors: record.authors().into_iter().map(str::to_string).collect(),
                source_url: record.source.clone(),
                redirect_icon: assets.resolve_asset_url(style.redirect_icon),
            },
            tags,
            details,
            demo_guide: record.demo_guide.clone(),
            course_blueprints,
        })
    }

    pub fn toggles(&self) -> PanelToggles {
        PanelToggles {
            deployment: self.details.deployment.state,
            services: self.details.services.state,
        }
    }

    pub fn toggle(&mut self, section: PanelSection) -> PanelState {
        let state = match section {
            PanelSection::Deployment => &mut self.details.deployment.state,
            PanelSection::Services => &mut self.details.services.state,
        };
        *state = state.toggle();
        *state
    }

    pub fn select_tab(&mut self, tab: PanelTab) {
        self.selected_tab = tab;
    }

    pub fn copy_button(&mut self, target: CopyTarget) -> &mut CopyButton {
        let deployment = &mut self.details.deployment;
        match target {
            CopyTarget::Init => &mut deployment.init,
            CopyTarget::Up => &mut deployment.up,
            CopyTarget::Down => &mut deployment.down,
            CopyTarget::TemplateUrl => &mut deployment.template_url,
        }
    }

    pub fn click_copy(&mut self, target: CopyTarget, clipboard: &mut dyn Clipboard) {
        self.copy_button(target).click(clipboard);
    }
}
