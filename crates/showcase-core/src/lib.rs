pub mod catalog;
pub mod commands;
mod error;
pub mod starter;
pub mod tags;

pub use catalog::{Catalog, CatalogEntry, ValidationIssue, ValidationReport};
pub use commands::{CommandVerb, DeploymentCommands, TemplatePath};
pub use error::{Result, ShowcaseError};
pub use tags::{BadgeCategory, CourseBlueprintBadge, ResolvedTag, ServiceBadge, Tagged};

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

// --- Types ---

/// Opaque key naming a tag in the registry.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, schemars::JsonSchema,
)]
#[serde(transparent)]
pub struct TagId(String);

impl TagId {
    pub fn new(id: impl Into<String>) -> Self {
        TagId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TagId {
    fn from(id: &str) -> Self {
        TagId(id.to_string())
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, schemars::JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Light,
    Dark,
}

impl ColorMode {
    pub fn is_dark(self) -> bool {
        self == ColorMode::Dark
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ColorMode::Light => "light",
            ColorMode::Dark => "dark",
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static metadata describing one tag. Only `label` is always present.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TagDefinition {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Category string, e.g. "ILT Courses"
    #[serde(rename = "type", default)]
    pub category: String,
    #[serde(default)]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub azure_icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dark_mode_azure_icon: Option<String>,
    /// External course blueprint reference (usually an aka.ms short link)
    #[serde(
        rename = "courseblueprint",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub course_blueprint: Option<String>,
    /// Asset path of the blueprint diagram image
    #[serde(
        rename = "courseblueprintdiag",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub course_blueprint_diagram: Option<String>,
}

impl TagDefinition {
    /// Pick the icon for the given mode: the dark-mode icon when in dark mode
    /// and one is set, the default icon otherwise.
    pub fn icon_for(&self, mode: ColorMode) -> Option<&str> {
        match (&self.dark_mode_azure_icon, mode) {
            (Some(dark), ColorMode::Dark) => Some(dark.as_str()),
            _ => self.azure_icon.as_deref(),
        }
    }
}

/// Process-wide tag registry, keyed by identifier.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, schemars::JsonSchema)]
#[serde(transparent)]
pub struct TagRegistry(BTreeMap<TagId, TagDefinition>);

impl TagRegistry {
    pub fn get(&self, id: &TagId) -> Option<&TagDefinition> {
        self.0.get(id)
    }

    pub fn contains(&self, id: &TagId) -> bool {
        self.0.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TagId, &TagDefinition)> {
        self.0.iter()
    }
}

impl FromIterator<(TagId, TagDefinition)> for TagRegistry {
    fn from_iter<I: IntoIterator<Item = (TagId, TagDefinition)>>(iter: I) -> Self {
        TagRegistry(iter.into_iter().collect())
    }
}

/// Global display precedence of tags. Each identifier appears at most once.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "Vec<TagId>", into = "Vec<TagId>")]
pub struct CanonicalTagOrder {
    ids: Vec<TagId>,
    positions: HashMap<TagId, usize>,
}

impl CanonicalTagOrder {
    pub fn new(ids: Vec<TagId>) -> Result<Self> {
        let mut positions = HashMap::with_capacity(ids.len());
        for (index, id) in ids.iter().enumerate() {
            if positions.insert(id.clone(), index).is_some() {
                return Err(ShowcaseError::DuplicateOrderEntry { tag: id.clone() });
            }
        }
        Ok(CanonicalTagOrder { ids, positions })
    }

    pub fn position(&self, id: &TagId) -> Option<usize> {
        self.positions.get(id).copied()
    }

    /// Sort key for `id`. Identifiers missing from the order rank after all known ones.
    pub fn rank(&self, id: &TagId) -> usize {
        self.position(id).unwrap_or(usize::MAX)
    }

    pub fn contains(&self, id: &TagId) -> bool {
        self.positions.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TagId> {
        self.ids.iter()
    }
}

impl TryFrom<Vec<TagId>> for CanonicalTagOrder {
    type Error = ShowcaseError;

    fn try_from(ids: Vec<TagId>) -> Result<Self> {
        CanonicalTagOrder::new(ids)
    }
}

impl From<CanonicalTagOrder> for Vec<TagId> {
    fn from(order: CanonicalTagOrder) -> Self {
        order.ids
    }
}

/// One deployable template's metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TemplateRecord {
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Preview image path or URL
    #[serde(default)]
    pub preview: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    /// Comma-separated author display names
    #[serde(default)]
    pub author: String,
    /// Repository URL, e.g. "https://github.com/Org/Repo"
    pub source: String,
    #[serde(default)]
    pub tags: Vec<TagId>,
    /// Estimated cost per 24h, in dollars
    #[serde(default, deserialize_with = "string_or_number")]
    #[schemars(with = "String")]
    pub cost: String,
    /// Estimated deployment time, in minutes
    #[serde(rename = "deploytime", default, deserialize_with = "string_or_number")]
    #[schemars(with = "String")]
    pub deploy_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prereqs: Option<String>,
    #[serde(rename = "demoguide", default, skip_serializing_if = "Option::is_none")]
    pub demo_guide: Option<String>,
}

impl TemplateRecord {
    pub fn authors(&self) -> Vec<&str> {
        self.author
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .collect()
    }
}

fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Null => Ok(String::new()),
        other => Err(D::Error::custom(format!(
            "expected a string or number, found {other}"
        ))),
    }
}

// --- Settings ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteSettings {
    /// Prefix joined onto site-relative asset paths
    pub base_url: String,
    pub color_mode: ColorMode,
    /// Returned for empty asset paths
    pub asset_placeholder: String,
}

impl Default for SiteSettings {
    fn default() -> Self {
        SiteSettings {
            base_url: "/".to_string(),
            color_mode: ColorMode::Light,
            asset_placeholder: "/img/placeholder.svg".to_string(),
        }
    }
}

// --- Storage ---

pub const TAGS_FILE: &str = "tags.json";
pub const TAG_ORDER_FILE: &str = "tag-order.json";
pub const SETTINGS_FILE: &str = "settings.json";
pub const TEMPLATES_DIR: &str = "templates";

/// Resolve the data directory: `$SHOWCASE_DATA_DIR`, else ~/.showcase/.
pub fn data_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os("SHOWCASE_DATA_DIR").filter(|d| !d.is_empty()) {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".showcase")
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path).map_err(|e| ShowcaseError::file(path, e))?;
    serde_json::from_str(&raw).map_err(|source| ShowcaseError::InvalidJson {
        path: path.to_path_buf(),
        source,
    })
}

pub fn read_registry(dir: &Path) -> Result<TagRegistry> {
    read_json(&dir.join(TAGS_FILE))
}

pub fn read_tag_order(dir: &Path) -> Result<CanonicalTagOrder> {
    let ids: Vec<TagId> = read_json(&dir.join(TAG_ORDER_FILE))?;
    CanonicalTagOrder::new(ids)
}

/// List template files (`templates/*.json`), sorted by path.
pub fn list_template_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let base = glob::Pattern::escape(&dir.join(TEMPLATES_DIR).to_string_lossy());
    let pattern = format!("{}/*.json", base);
    let mut paths = glob::glob(&pattern)?.collect::<std::result::Result<Vec<_>, _>>()?;
    paths.sort();
    Ok(paths)
}

pub fn read_template(path: &Path) -> Result<TemplateRecord> {
    read_json(path)
}

/// Read site settings. A missing or unreadable file yields the defaults.
pub fn read_settings(dir: &Path) -> SiteSettings {
    let path = dir.join(SETTINGS_FILE);
    if !path.exists() {
        return SiteSettings::default();
    }
    fs::read_to_string(&path)
        .ok()
        .and_then(|s| serde_json::from_str(&s).ok())
        .unwrap_or_default()
}

pub fn write_settings(dir: &Path, settings: &SiteSettings) -> Result<()> {
    let json = serde_json::to_string_pretty(settings)?;
    write_atomic(&dir.join(SETTINGS_FILE), &json)
}

/// Write through a temp file + rename so readers never see a partial file.
pub fn write_atomic(path: &Path, data: &str) -> Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir).map_err(|e| ShowcaseError::file(dir, e))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let tmp = dir.join(format!(".{}.tmp", name));
    fs::write(&tmp, data).map_err(|e| ShowcaseError::file(&tmp, e))?;
    fs::rename(&tmp, path).map_err(|e| ShowcaseError::file(path, e))
}

/// Seed `dir` with a starter catalog. Existing files are left untouched.
/// Returns the files that were written.
pub fn init_data_dir(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    for (relative, contents) in starter::FILES {
        let path = dir.join(relative);
        if path.exists() {
            tracing::debug!(path = %path.display(), "keeping existing file");
            continue;
        }
        write_atomic(&path, contents)?;
        written.push(path);
    }
    Ok(written)
}
