use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;

use crate::commands::TemplatePath;
use crate::tags::{self, ResolvedTag};
use crate::{
    list_template_files, read_registry, read_tag_order, read_template, CanonicalTagOrder, Result,
    ShowcaseError, TagId, TagRegistry, TemplateRecord,
};

/// A template record together with the file stem it was loaded from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogEntry {
    pub slug: String,
    pub record: TemplateRecord,
}

/// Registry, canonical order and template records, loaded once and read-only after.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub registry: TagRegistry,
    pub order: CanonicalTagOrder,
    pub templates: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn new(registry: TagRegistry, order: CanonicalTagOrder, templates: Vec<CatalogEntry>) -> Self {
        Catalog {
            registry,
            order,
            templates,
        }
    }

    /// Read a catalog from `dir` without checking cross-references.
    pub fn open(dir: &Path) -> Result<Self> {
        let registry = read_registry(dir)?;
        let order = read_tag_order(dir)?;
        let mut templates = Vec::new();
        for path in list_template_files(dir)? {
            let slug = path
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_default();
            templates.push(CatalogEntry {
                slug,
                record: read_template(&path)?,
            });
        }
        tracing::info!(
            dir = %dir.display(),
            tags = registry.len(),
            templates = templates.len(),
            "loaded catalog"
        );
        Ok(Catalog::new(registry, order, templates))
    }

    /// Read a catalog and fail on the first template that cannot be rendered.
    pub fn load(dir: &Path) -> Result<Self> {
        let catalog = Catalog::open(dir)?;
        catalog.check()?;
        Ok(catalog)
    }

    /// Fail on the first unknown tag or malformed source URL. Ordering gaps
    /// are only logged, since they degrade display order rather than content.
    pub fn check(&self) -> Result<()> {
        for entry in &self.templates {
            let title = &entry.record.title;
            tags::resolve(&self.registry, &entry.record.tags).map_err(|e| e.in_template(title))?;
            TemplatePath::from_source_url(&entry.record.source).map_err(|e| e.in_template(title))?;
        }
        for issue in self.validate().warnings {
            tracing::warn!("{}", issue);
        }
        Ok(())
    }

    /// Collect every problem in the catalog instead of stopping at the first.
    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::default();
        let mut unordered = BTreeSet::new();
        let mut titles = BTreeSet::new();

        for entry in &self.templates {
            let title = &entry.record.title;
            if !titles.insert(title.to_lowercase()) {
                report.warnings.push(ValidationIssue::DuplicateTitle {
                    title: title.clone(),
                });
            }
            for tag in &entry.record.tags {
                if !self.registry.contains(tag) {
                    report.errors.push(ValidationIssue::UnknownTag {
                        template: title.clone(),
                        tag: tag.clone(),
                    });
                } else if !self.order.contains(tag) {
                    unordered.insert(tag.clone());
                }
            }
            if let Err(ShowcaseError::MalformedSourceUrl { reason, .. }) =
                TemplatePath::from_source_url(&entry.record.source)
            {
                report.errors.push(ValidationIssue::MalformedSource {
                    template: title.clone(),
                    url: entry.record.source.clone(),
                    reason,
                });
            }
        }

        report
            .warnings
            .extend(unordered.into_iter().map(|tag| ValidationIssue::NotInOrder { tag }));
        report.warnings.extend(
            self.order
                .iter()
                .filter(|tag| !self.registry.contains(tag))
                .map(|tag| ValidationIssue::OrderEntryNotRegistered { tag: tag.clone() }),
        );
        report
    }

    /// Look a template up by file stem, then by case-insensitive title.
    pub fn find_template(&self, key: &str) -> Result<&CatalogEntry> {
        self.templates
            .iter()
            .find(|e| e.slug == key)
            .or_else(|| {
                self.templates
                    .iter()
                    .find(|e| e.record.title.eq_ignore_ascii_case(key))
            })
            .ok_or_else(|| ShowcaseError::TemplateNotFound(key.to_string()))
    }

    pub fn resolve_sorted<'a>(&'a self, ids: &'a [TagId]) -> Result<Vec<ResolvedTag<'a>>> {
        tags::resolve_sorted(&self.registry, &self.order, ids)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ValidationIssue {
    UnknownTag { template: String, tag: TagId },
    MalformedSource {
        template: String,
        url: String,
        reason: String,
    },
    NotInOrder { tag: TagId },
    OrderEntryNotRegistered { tag: TagId },
    DuplicateTitle { title: String },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::UnknownTag { template, tag } => {
                write!(f, "template '{}' references unknown tag '{}'", template, tag)
            }
            ValidationIssue::MalformedSource {
                template,
                url,
                reason,
            } => write!(f, "template '{}' has malformed source '{}': {}", template, url, reason),
            ValidationIssue::NotInOrder { tag } => {
                write!(f, "tag '{}' is missing from the canonical order and will sort last", tag)
            }
            ValidationIssue::OrderEntryNotRegistered { tag } => {
                write!(f, "canonical order lists unregistered tag '{}'", tag)
            }
            ValidationIssue::DuplicateTitle { title } => {
                write!(f, "more than one template is titled '{}'", title)
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationReport {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TagDefinition;

    fn record(title: &str, source: &str, tags: &[&str]) -> CatalogEntry {
        CatalogEntry {
            slug: title.to_lowercase().replace(' ', "-"),
            record: TemplateRecord {
                title: title.to_string(),
                description: String::new(),
                preview: String::new(),
                website: None,
                author: String::new(),
                source: source.to_string(),
                tags: tags.iter().map(|t| TagId::from(*t)).collect(),
                cost: "0".to_string(),
                deploy_time: "5".to_string(),
                prereqs: None,
                demo_guide: None,
            },
        }
    }

    fn catalog(templates: Vec<CatalogEntry>) -> Catalog {
        let registry = ["compute", "storage", "stray"]
            .into_iter()
            .map(|id| {
                (
                    TagId::from(id),
                    TagDefinition {
                        label: id.to_string(),
                        ..TagDefinition::default()
                    },
                )
            })
            .collect();
        let order =
            CanonicalTagOrder::new(vec!["storage".into(), "compute".into(), "ghost".into()]).unwrap();
        Catalog::new(registry, order, templates)
    }

    #[test]
    fn clean_catalog_passes() {
        let c = catalog(vec![record("Web", "https://github.com/o/web", &["compute", "storage"])]);
        assert!(c.check().is_ok());
        let report = c.validate();
        assert!(report.is_ok());
        assert_eq!(
            report.warnings,
            vec![ValidationIssue::OrderEntryNotRegistered { tag: "ghost".into() }]
        );
    }

    #[test]
    fn unknown_tag_is_reported_with_template() {
        let c = catalog(vec![record("Web", "https://github.com/o/web", &["compute", "missing"])]);
        let err = c.check().unwrap_err();
        assert_eq!(err.to_string(), "in template 'Web'");
        assert!(matches!(
            &err,
            ShowcaseError::Template { source, .. }
                if matches!(**source, ShowcaseError::UnknownTag { ref tag } if tag.as_str() == "missing")
        ));

        let report = c.validate();
        assert_eq!(
            report.errors,
            vec![ValidationIssue::UnknownTag {
                template: "Web".to_string(),
                tag: "missing".into(),
            }]
        );
    }

    #[test]
    fn unordered_tags_are_warnings_only() {
        let c = catalog(vec![
            record("A", "https://github.com/o/a", &["stray", "stray"]),
            record("B", "https://github.com/o/b", &["stray"]),
        ]);
        assert!(c.check().is_ok());
        let report = c.validate();
        assert!(report.is_ok());
        assert!(report
            .warnings
            .contains(&ValidationIssue::NotInOrder { tag: "stray".into() }));
        assert_eq!(
            report
                .warnings
                .iter()
                .filter(|w| matches!(w, ValidationIssue::NotInOrder { .. }))
                .count(),
            1
        );
    }

    #[test]
    fn malformed_source_is_an_error() {
        let c = catalog(vec![record("Bad", "not a url", &[])]);
        assert!(matches!(
            c.check().unwrap_err(),
            ShowcaseError::Template { ref template, .. } if template == "Bad"
        ));
        assert!(matches!(
            c.validate().errors.as_slice(),
            [ValidationIssue::MalformedSource { .. }]
        ));
    }

    #[test]
    fn find_template_by_slug_or_title() {
        let c = catalog(vec![record("Serverless Web", "https://github.com/o/w", &[])]);
        assert_eq!(c.find_template("serverless-web").unwrap().record.title, "Serverless Web");
        assert_eq!(c.find_template("SERVERLESS WEB").unwrap().slug, "serverless-web");
        assert!(matches!(
            c.find_template("other"),
            Err(ShowcaseError::TemplateNotFound(_))
        ));
    }
}
