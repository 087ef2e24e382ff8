use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use serde_json::json;
use showcase_core::commands::{CommandVerb, DeploymentCommands};
use showcase_core::tags::sort_canonical;
use showcase_core::{
    data_dir, init_data_dir, read_settings, Catalog, ColorMode, CourseBlueprintBadge, ServiceBadge,
    SiteSettings, TagDefinition, TagId, TagRegistry, TemplateRecord,
};
use showcase_panel::{
    build_panel, resolved_course_blueprint_badges, resolved_service_badges, BaseUrlResolver,
    CalloutState, Clipboard, CopyTarget, FixedColorMode, PanelRenderer, PanelSection, PanelState,
    PanelTab, PanelToggles, Services,
};
use std::error::Error;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "showcase", version)]
#[command(about = "Inspect and render template showcase card panels")]
#[command(
    after_help = "Environment:\n  SHOWCASE_DATA_DIR   Catalog directory (default ~/.showcase)\n  SHOWCASE_LOG        Log filter override, e.g. \"debug\""
)]
struct Cli {
    /// Catalog directory holding tags.json, tag-order.json and templates/
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    /// Print machine-readable JSON instead of text
    #[arg(long, global = true, default_value_t = false)]
    json: bool,
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a starter catalog into the data directory
    Init,
    /// Check every template against the registry and canonical order
    Validate,
    /// Print tags in canonical display order
    Sort {
        #[arg(required = true)]
        tags: Vec<String>,
    },
    /// Print the deployment commands for a template
    #[command(name = "commands")]
    DeployCommands { template: String },
    /// Print the service and course-blueprint badges for a template
    Badges {
        template: String,
        #[arg(long, value_enum)]
        mode: Option<ModeArg>,
    },
    /// Render a template's card panel as HTML (or its view model with --json)
    Render {
        template: String,
        #[arg(long, value_enum)]
        mode: Option<ModeArg>,
        /// Sections to render collapsed
        #[arg(long, value_enum)]
        collapse: Vec<SectionArg>,
        #[arg(long, value_enum, default_value_t = TabArg::Details)]
        tab: TabArg,
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Copy a command through the clipboard service (written to stdout)
    Copy {
        template: String,
        #[arg(value_enum)]
        target: TargetArg,
    },
    /// Print JSON schemas for the catalog files
    Schema,
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Light,
    Dark,
}

impl From<ModeArg> for ColorMode {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::Light => ColorMode::Light,
            ModeArg::Dark => ColorMode::Dark,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum SectionArg {
    Deployment,
    Services,
}

impl From<SectionArg> for PanelSection {
    fn from(value: SectionArg) -> Self {
        match value {
            SectionArg::Deployment => PanelSection::Deployment,
            SectionArg::Services => PanelSection::Services,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum TabArg {
    Details,
    DemoGuide,
    CourseBlueprint,
    Legal,
}

impl From<TabArg> for PanelTab {
    fn from(value: TabArg) -> Self {
        match value {
            TabArg::Details => PanelTab::TemplateDetails,
            TabArg::DemoGuide => PanelTab::DemoGuide,
            TabArg::CourseBlueprint => PanelTab::CourseBlueprint,
            TabArg::Legal => PanelTab::Legal,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum TargetArg {
    Init,
    Up,
    Down,
    Url,
}

impl From<TargetArg> for CopyTarget {
    fn from(value: TargetArg) -> Self {
        match value {
            TargetArg::Init => CopyTarget::Init,
            TargetArg::Up => CopyTarget::Up,
            TargetArg::Down => CopyTarget::Down,
            TargetArg::Url => CopyTarget::TemplateUrl,
        }
    }
}

/// Clipboard stand-in for a terminal: the copied text goes to stdout.
struct StdoutClipboard;

impl Clipboard for StdoutClipboard {
    fn copy_to_clipboard(&mut self, text: &str) {
        let mut stdout = std::io::stdout().lock();
        if let Err(e) = writeln!(stdout, "{}", text) {
            tracing::warn!(error = %e, "clipboard write failed");
        }
    }
}

fn init_tracing(verbose: u8) {
    let default = if verbose > 0 { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("SHOWCASE_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {}", e);
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {}", cause);
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode, Box<dyn Error>> {
    let dir = cli.data_dir.clone().unwrap_or_else(data_dir);
    tracing::debug!(dir = %dir.display(), "using data directory");

    match cli.command {
        Commands::Init => init(&dir),
        Commands::Validate => validate(&dir, cli.json),
        Commands::Sort { tags } => sort(&dir, &tags, cli.json),
        Commands::DeployCommands { template } => deploy_commands(&dir, &template, cli.json),
        Commands::Badges { template, mode } => badges(&dir, &template, mode, cli.json),
        Commands::Render {
            template,
            mode,
            collapse,
            tab,
            output,
        } => render(&dir, &template, mode, &collapse, tab, output.as_deref(), cli.json),
        Commands::Copy { template, target } => copy(&dir, &template, target),
        Commands::Schema => schema(),
    }
}

fn print_json(value: &impl serde::Serialize) -> Result<(), Box<dyn Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn init(dir: &Path) -> Result<ExitCode, Box<dyn Error>> {
    let written = init_data_dir(dir)?;
    if written.is_empty() {
        eprintln!("{} already holds a catalog; nothing written.", dir.display());
    }
    for path in written {
        eprintln!("Wrote {}", path.display());
    }
    Ok(ExitCode::SUCCESS)
}

fn validate(dir: &Path, as_json: bool) -> Result<ExitCode, Box<dyn Error>> {
    let catalog = Catalog::open(dir)?;
    let report = catalog.validate();
    if as_json {
        print_json(&report)?;
    } else {
        for issue in &report.errors {
            println!("error: {}", issue);
        }
        for issue in &report.warnings {
            println!("warning: {}", issue);
        }
        println!(
            "{} templates, {} tags: {} errors, {} warnings",
            catalog.templates.len(),
            catalog.registry.len(),
            report.errors.len(),
            report.warnings.len()
        );
    }
    Ok(if report.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn sort(dir: &Path, raw: &[String], as_json: bool) -> Result<ExitCode, Box<dyn Error>> {
    let catalog = Catalog::open(dir)?;
    let ids: Vec<TagId> = raw.iter().map(|s| TagId::new(s.as_str())).collect();
    let sorted = sort_canonical(ids, &catalog.order);
    if as_json {
        print_json(&sorted)?;
        return Ok(ExitCode::SUCCESS);
    }
    for id in &sorted {
        println!("{}", describe_tag(&catalog.registry, id));
    }
    Ok(ExitCode::SUCCESS)
}

fn describe_tag(registry: &TagRegistry, id: &TagId) -> String {
    match registry.get(id) {
        Some(TagDefinition { label, category, .. }) if !category.is_empty() => {
            format!("{}\t{} ({})", id, label, category)
        }
        Some(definition) => format!("{}\t{}", id, definition.label),
        None => format!("{}\t(unregistered)", id),
    }
}

fn find_record<'a>(catalog: &'a Catalog, template: &str) -> Result<&'a TemplateRecord, Box<dyn Error>> {
    Ok(&catalog.find_template(template)?.record)
}

fn deploy_commands(dir: &Path, template: &str, as_json: bool) -> Result<ExitCode, Box<dyn Error>> {
    let catalog = Catalog::open(dir)?;
    let record = find_record(&catalog, template)?;
    let commands =
        DeploymentCommands::from_source_url(&record.source).map_err(|e| e.in_template(&record.title))?;
    if as_json {
        print_json(&commands)?;
    } else {
        for verb in CommandVerb::ALL {
            println!("{}", commands.get(verb));
        }
        println!("template path: {}", commands.template_path);
    }
    Ok(ExitCode::SUCCESS)
}

fn color_mode(settings: &SiteSettings, mode: Option<ModeArg>) -> ColorMode {
    mode.map(ColorMode::from).unwrap_or(settings.color_mode)
}

/// Badges for one template, with asset paths resolved against the site settings.
fn badge_lists(
    catalog: &Catalog,
    template: &str,
    settings: &SiteSettings,
    mode: Option<ModeArg>,
) -> Result<(Vec<ServiceBadge>, Vec<CourseBlueprintBadge>), Box<dyn Error>> {
    let assets = BaseUrlResolver::from_settings(settings);
    let mode = color_mode(settings, mode);
    let record = find_record(catalog, template)?;
    let sorted = catalog
        .resolve_sorted(&record.tags)
        .map_err(|e| e.in_template(&record.title))?;
    Ok((
        resolved_service_badges(&sorted, mode, &assets),
        resolved_course_blueprint_badges(&sorted, &assets),
    ))
}

fn badges(dir: &Path, template: &str, mode: Option<ModeArg>, as_json: bool) -> Result<ExitCode, Box<dyn Error>> {
    let catalog = Catalog::open(dir)?;
    let settings = read_settings(dir);
    let (services, courses) = badge_lists(&catalog, template, &settings, mode)?;

    if as_json {
        print_json(&json!({ "services": services, "courseBlueprints": courses }))?;
        return Ok(ExitCode::SUCCESS);
    }
    for badge in &services {
        println!(
            "service\t{}\t{}\t{}",
            badge.label,
            badge.icon.as_deref().unwrap_or("-"),
            badge.learn_more_url
        );
    }
    for badge in &courses {
        println!(
            "course\t{}\t{}\t{}",
            badge.title,
            badge.blueprint_url,
            badge.diagram.as_deref().unwrap_or("-")
        );
    }
    Ok(ExitCode::SUCCESS)
}

fn render(
    dir: &Path,
    template: &str,
    mode: Option<ModeArg>,
    collapse: &[SectionArg],
    tab: TabArg,
    output: Option<&Path>,
    as_json: bool,
) -> Result<ExitCode, Box<dyn Error>> {
    let catalog = Catalog::load(dir)?;
    let settings = read_settings(dir);
    let assets = BaseUrlResolver::from_settings(&settings);
    let theme = FixedColorMode(color_mode(&settings, mode));

    let mut toggles = PanelToggles::default();
    for section in collapse {
        let section = PanelSection::from(*section);
        if toggles.get(section) == PanelState::Expanded {
            toggles.toggle(section);
        }
    }

    let mut panel = build_panel(
        &catalog,
        template,
        Services {
            assets: &assets,
            theme: &theme,
        },
        toggles,
    )?;
    panel.select_tab(tab.into());

    let rendered = if as_json {
        serde_json::to_string_pretty(&panel)?
    } else {
        PanelRenderer::new().render(&panel)?
    };
    match output {
        Some(path) => {
            std::fs::write(path, rendered)?;
            eprintln!("Wrote {}", path.display());
        }
        None => print!("{}", rendered),
    }
    Ok(ExitCode::SUCCESS)
}

fn copy(dir: &Path, template: &str, target: TargetArg) -> Result<ExitCode, Box<dyn Error>> {
    let catalog = Catalog::load(dir)?;
    let settings = read_settings(dir);
    let assets = BaseUrlResolver::from_settings(&settings);
    let theme = FixedColorMode(settings.color_mode);
    let mut panel = build_panel(
        &catalog,
        template,
        Services {
            assets: &assets,
            theme: &theme,
        },
        PanelToggles::default(),
    )?;

    let target = CopyTarget::from(target);
    panel.click_copy(target, &mut StdoutClipboard);
    if panel.copy_button(target).callout == CalloutState::Shown {
        eprintln!("Copied");
    }
    Ok(ExitCode::SUCCESS)
}

fn schema() -> Result<ExitCode, Box<dyn Error>> {
    let schemas = json!({
        "tags.json": serde_json::to_value(schemars::schema_for!(TagRegistry))?,
        "tag-order.json": serde_json::to_value(schemars::schema_for!(Vec<TagId>))?,
        "templates/*.json": serde_json::to_value(schemars::schema_for!(TemplateRecord))?,
        "settings.json": serde_json::to_value(schemars::schema_for!(SiteSettings))?,
    });
    print_json(&schemas)?;
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_render_flags() {
        let cli = Cli::try_parse_from([
            "showcase",
            "--data-dir",
            "/tmp/catalog",
            "render",
            "serverless-web-app",
            "--mode",
            "dark",
            "--collapse",
            "deployment",
            "--collapse",
            "services",
            "--tab",
            "course-blueprint",
        ])
        .expect("parse");
        assert_eq!(cli.data_dir.as_deref(), Some(Path::new("/tmp/catalog")));
        match cli.command {
            Commands::Render {
                mode,
                collapse,
                tab,
                ..
            } => {
                assert!(matches!(mode, Some(ModeArg::Dark)));
                assert_eq!(collapse.len(), 2);
                assert!(tab == TabArg::CourseBlueprint);
            }
            _ => panic!("expected render"),
        }
    }

    #[test]
    fn sort_requires_tags() {
        assert!(Cli::try_parse_from(["showcase", "sort"]).is_err());
    }

    #[test]
    fn describe_marks_unregistered_tags() {
        let registry: TagRegistry = [(
            TagId::from("bicep"),
            TagDefinition {
                label: "Bicep".to_string(),
                category: "Infrastructure as Code".to_string(),
                ..TagDefinition::default()
            },
        )]
        .into_iter()
        .collect();
        assert_eq!(
            describe_tag(&registry, &"bicep".into()),
            "bicep\tBicep (Infrastructure as Code)"
        );
        assert_eq!(describe_tag(&registry, &"x".into()), "x\t(unregistered)");
    }

    #[test]
    fn badge_assets_resolve_against_site_base_url() {
        let dir = tempfile::tempdir().expect("tempdir");
        init_data_dir(dir.path()).expect("init");
        let catalog = Catalog::load(dir.path()).expect("load");
        let settings = SiteSettings {
            base_url: "/trainer-demo-deploy/".to_string(),
            ..SiteSettings::default()
        };

        let (services, courses) =
            badge_lists(&catalog, "AZ-104 Storage Lab", &settings, Some(ModeArg::Dark)).expect("badges");
        assert_eq!(
            services[0].icon.as_deref(),
            Some("/trainer-demo-deploy/img/Azure-Storage-Dark.svg")
        );
        assert_eq!(
            courses[0].diagram.as_deref(),
            Some("/trainer-demo-deploy/img/az104blueprint.png")
        );
    }
}
