//! HTML for a [`CardPanel`], rendered from an embedded minijinja template
//! with HTML auto-escaping on.

use minijinja::{context, default_auto_escape_callback, Environment};
use serde::Serialize;
use showcase_core::ShowcaseError;
use thiserror::Error;

use crate::panel::CardPanel;
use crate::state::PanelTab;

pub const PRICING_CALCULATOR_URL: &str = "https://azure.microsoft.com/en-us/pricing/calculator/";
pub const EXTENSION_URL: &str =
    "https://marketplace.visualstudio.com/items?itemName=ms-azuretools.azure-dev";
pub const BLUEPRINT_OVERVIEW_URL: &str = "https://techcommunity.microsoft.com/discussions/azurearchitecture/azure-course-blueprints/4012399";
pub const CODE_OF_CONDUCT_URL: &str =
    "https://github.com/MicrosoftLearning/trainer-demo-deploy/blob/main/CODE_OF_CONDUCT.md";

const BLUEPRINT_INTRO: [&str; 3] = [
    "is a comprehensive visual guide to the Azure ecosystem, integrating all the resources, tools, structures, and connections covered in the course into one inclusive diagram.",
    "It enables students to map out and understand the elements they've studied, providing a clear picture of their place within the larger Azure ecosystem.",
    "It serves as a 1:1 representation of all the topics officially covered in the instructor-led training.",
];

pub const LEGAL_NOTICE: [&str; 4] = [
    "Trainer-Demo-Deploy is an Open-Sourced Catalog of AZD-based templates, which primarily targets trainers and learners of Microsoft ILT courses.",
    "Please note that each template is licensed by its respective owner (which may or may not be Microsoft) under the agreement which accompanies the template. It is your responsibility to determine what license applies to any template you choose to use.",
    "Microsoft is not responsible for any non-Microsoft code and does not screen templates included in the Trainer-Demo-Deploy catalog for security, privacy, compatibility, or performance issues.",
    "The templates included in the Trainer-Demo-Deploy Catalog are not supported by any Microsoft support program or service. Trainer-Demo-Deploy Catalog and any Microsoft-provided templates are provided without warranty of any kind.",
];

const CARD_PANEL_TEMPLATE: &str = "card_panel.html";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Catalog(#[from] ShowcaseError),
    #[error("failed to render the card panel template")]
    Template(#[from] minijinja::Error),
}

#[derive(Serialize)]
struct TabHeader {
    slug: &'static str,
    header: &'static str,
    selected: bool,
}

/// Renders card panels through a template environment built once.
pub struct PanelRenderer {
    env: Environment<'static>,
}

impl PanelRenderer {
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_auto_escape_callback(default_auto_escape_callback);
        env.set_loader(embedded_template_loader);
        PanelRenderer { env }
    }

    pub fn render(&self, panel: &CardPanel) -> Result<String, RenderError> {
        let tabs: Vec<TabHeader> = PanelTab::ALL
            .into_iter()
            .map(|tab| TabHeader {
                slug: tab.slug(),
                header: tab.header(),
                selected: tab == panel.selected_tab,
            })
            .collect();

        let template = self.env.get_template(CARD_PANEL_TEMPLATE)?;
        let html = template.render(context! {
            panel => panel,
            tabs => tabs,
            pricing_calculator_url => PRICING_CALCULATOR_URL,
            extension_url => EXTENSION_URL,
            blueprint_overview_url => BLUEPRINT_OVERVIEW_URL,
            code_of_conduct_url => CODE_OF_CONDUCT_URL,
            blueprint_intro => BLUEPRINT_INTRO,
            legal_notice => LEGAL_NOTICE,
        })?;
        Ok(html)
    }
}

impl Default for PanelRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn embedded_template_loader(name: &str) -> Result<Option<String>, minijinja::Error> {
    let source = match name {
        CARD_PANEL_TEMPLATE => Some(include_str!("templates/card_panel.html")),
        _ => None,
    };
    Ok(source.map(str::to_string))
}

/// One-off render with a fresh environment.
pub fn render_panel(panel: &CardPanel) -> Result<String, RenderError> {
    PanelRenderer::new().render(panel)
}
