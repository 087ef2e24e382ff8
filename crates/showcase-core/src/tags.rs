//! Tag resolution, canonical ordering and badge classification.
//!
//! The pipeline for a template's tag list is resolve -> sort -> filter:
//! every identifier must exist in the registry, the resolved tags are put in
//! canonical display order, and each badge variant then picks the subsequence
//! it cares about.

use serde::Serialize;

use crate::{CanonicalTagOrder, ColorMode, Result, ShowcaseError, TagDefinition, TagId, TagRegistry};

/// Labels containing this brand mark a platform service tag.
pub const SERVICE_BRAND: &str = "Azure";
/// Category of instructor-led-training course tags.
pub const COURSE_CATEGORY: &str = "ILT Courses";
/// Stripped from blueprint links when shown as text.
pub const BLUEPRINT_HOST_PREFIX: &str = "https://aka.ms/";

/// Anything carrying a tag identifier, so ids and resolved tags sort alike.
pub trait Tagged {
    fn tag_id(&self) -> &TagId;
}

impl Tagged for TagId {
    fn tag_id(&self) -> &TagId {
        self
    }
}

impl<T: Tagged + ?Sized> Tagged for &T {
    fn tag_id(&self) -> &TagId {
        (**self).tag_id()
    }
}

/// A tag identifier paired with its registry entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResolvedTag<'a> {
    pub id: &'a TagId,
    pub definition: &'a TagDefinition,
}

impl Tagged for ResolvedTag<'_> {
    fn tag_id(&self) -> &TagId {
        self.id
    }
}

/// Resolve every identifier against the registry, keeping positions and duplicates.
pub fn resolve<'a>(registry: &'a TagRegistry, ids: &'a [TagId]) -> Result<Vec<ResolvedTag<'a>>> {
    ids.iter()
        .map(|id| {
            registry
                .get(id)
                .map(|definition| ResolvedTag { id, definition })
                .ok_or_else(|| ShowcaseError::UnknownTag { tag: id.clone() })
        })
        .collect()
}

/// Stable sort by canonical position; identifiers missing from the order go last.
pub fn sort_canonical<T: Tagged>(mut items: Vec<T>, order: &CanonicalTagOrder) -> Vec<T> {
    items.sort_by_key(|item| order.rank(item.tag_id()));
    items
}

/// Resolve then sort, the form every badge list starts from.
pub fn resolve_sorted<'a>(
    registry: &'a TagRegistry,
    order: &CanonicalTagOrder,
    ids: &'a [TagId],
) -> Result<Vec<ResolvedTag<'a>>> {
    Ok(sort_canonical(resolve(registry, ids)?, order))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeCategory {
    Service,
    CourseBlueprint,
}

impl BadgeCategory {
    pub fn matches(self, definition: &TagDefinition) -> bool {
        match self {
            BadgeCategory::Service => definition.label.contains(SERVICE_BRAND),
            BadgeCategory::CourseBlueprint => definition.category == COURSE_CATEGORY,
        }
    }
}

/// Order-preserving subsequence of `sorted` matching `category`.
pub fn filter_category<'a>(sorted: &[ResolvedTag<'a>], category: BadgeCategory) -> Vec<ResolvedTag<'a>> {
    sorted
        .iter()
        .filter(|tag| category.matches(tag.definition))
        .copied()
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceBadge {
    pub tag: TagId,
    pub label: String,
    /// Theme-selected icon asset path, not yet resolved to a URL
    pub icon: Option<String>,
    pub learn_more_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseBlueprintBadge {
    pub tag: TagId,
    /// Blueprint link with the short-link host removed
    pub title: String,
    pub blueprint_url: String,
    pub diagram: Option<String>,
}

pub fn service_badges(sorted: &[ResolvedTag<'_>], mode: ColorMode) -> Vec<ServiceBadge> {
    filter_category(sorted, BadgeCategory::Service)
        .into_iter()
        .map(|tag| ServiceBadge {
            tag: tag.id.clone(),
            label: tag.definition.label.clone(),
            icon: tag.definition.icon_for(mode).map(str::to_string),
            learn_more_url: tag.definition.url.clone(),
        })
        .collect()
}

pub fn course_blueprint_badges(sorted: &[ResolvedTag<'_>]) -> Vec<CourseBlueprintBadge> {
    filter_category(sorted, BadgeCategory::CourseBlueprint)
        .into_iter()
        .filter_map(|tag| {
            let Some(blueprint) = tag.definition.course_blueprint.as_deref() else {
                tracing::debug!(tag = %tag.id, "course tag has no blueprint link, skipping badge");
                return None;
            };
            Some(CourseBlueprintBadge {
                tag: tag.id.clone(),
                title: blueprint.replacen(BLUEPRINT_HOST_PREFIX, "", 1),
                blueprint_url: blueprint.to_string(),
                diagram: tag.definition.course_blueprint_diagram.clone(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn def(label: &str, category: &str) -> TagDefinition {
        TagDefinition {
            label: label.to_string(),
            category: category.to_string(),
            url: format!("https://learn.example/{}", label.to_lowercase().replace(' ', "-")),
            ..TagDefinition::default()
        }
    }

    fn registry() -> TagRegistry {
        let mut course = def("AZ-104 Administrator", COURSE_CATEGORY);
        course.course_blueprint = Some("https://aka.ms/az104blueprint".to_string());
        course.course_blueprint_diagram = Some("/img/az104.png".to_string());

        let mut storage = def("Azure Storage", "Storage");
        storage.azure_icon = Some("/img/storage.svg".to_string());
        storage.dark_mode_azure_icon = Some("/img/storage-dark.svg".to_string());

        let mut compute = def("Azure Compute", "Compute");
        compute.azure_icon = Some("/img/compute.svg".to_string());

        [
            ("compute", compute),
            ("storage", storage),
            ("unlisted", def("Bicep", "Tooling")),
            ("az104", course),
            ("az900", def("AZ-900 Fundamentals", COURSE_CATEGORY)),
        ]
        .into_iter()
        .map(|(id, d)| (TagId::from(id), d))
        .collect()
    }

    fn order() -> CanonicalTagOrder {
        CanonicalTagOrder::new(vec!["storage".into(), "compute".into(), "az104".into(), "az900".into()])
            .unwrap()
    }

    fn ids(raw: &[&str]) -> Vec<TagId> {
        raw.iter().map(|s| TagId::from(*s)).collect()
    }

    fn id_strs<T: Tagged>(items: &[T]) -> Vec<&str> {
        items.iter().map(|t| t.tag_id().as_str()).collect()
    }

    #[test]
    fn resolve_keeps_positions_and_duplicates() {
        let registry = registry();
        let input = ids(&["compute", "storage", "compute"]);
        let resolved = resolve(&registry, &input).unwrap();
        assert_eq!(resolved.len(), input.len());
        assert_eq!(id_strs(&resolved), vec!["compute", "storage", "compute"]);
        assert_eq!(resolved[1].definition.label, "Azure Storage");
    }

    #[test]
    fn resolve_empty_list() {
        let registry = registry();
        assert!(resolve(&registry, &[]).unwrap().is_empty());
    }

    #[test]
    fn resolve_fails_on_unknown_tag() {
        let registry = registry();
        let input = ids(&["compute", "nope"]);
        let err = resolve(&registry, &input).unwrap_err();
        assert!(matches!(err, ShowcaseError::UnknownTag { tag } if tag.as_str() == "nope"));
    }

    #[test]
    fn unlisted_tags_sort_after_known_ones() {
        let registry = registry();
        let input = ids(&["compute", "unlisted", "storage"]);
        let sorted = resolve_sorted(&registry, &order(), &input).unwrap();
        assert_eq!(id_strs(&sorted), vec!["storage", "compute", "unlisted"]);
    }

    #[test]
    fn sort_is_stable_for_duplicates_and_unknowns() {
        let order = order();
        let input = ids(&["x", "compute", "y", "storage", "compute", "x"]);
        let sorted = sort_canonical(input, &order);
        assert_eq!(id_strs(&sorted), vec!["storage", "compute", "compute", "x", "y", "x"]);
    }

    #[test]
    fn sort_is_idempotent() {
        let order = order();
        let input = ids(&["az900", "unlisted", "compute", "storage", "az104", "compute"]);
        let once = sort_canonical(input, &order);
        let twice = sort_canonical(once.clone(), &order);
        assert_eq!(once, twice);
    }

    #[test]
    fn sort_works_on_borrowed_ids() {
        let order = order();
        let input = ids(&["compute", "storage"]);
        let sorted = sort_canonical(input.iter().collect(), &order);
        assert_eq!(id_strs(&sorted), vec!["storage", "compute"]);
    }

    #[test]
    fn filters_are_order_preserving_subsequences() {
        let registry = registry();
        let input = ids(&["az900", "compute", "unlisted", "az104", "storage"]);
        let sorted = resolve_sorted(&registry, &order(), &input).unwrap();

        let services = filter_category(&sorted, BadgeCategory::Service);
        assert_eq!(id_strs(&services), vec!["storage", "compute"]);

        let courses = filter_category(&sorted, BadgeCategory::CourseBlueprint);
        assert_eq!(id_strs(&courses), vec!["az104", "az900"]);

        // Each filtered list appears in `sorted` in the same relative order.
        for filtered in [&services, &courses] {
            let mut rest = sorted.iter();
            assert!(filtered.iter().all(|f| rest.any(|s| s == f)));
        }
    }

    #[test]
    fn service_badges_pick_icon_by_mode() {
        let registry = registry();
        let input = ids(&["compute", "storage", "unlisted"]);
        let sorted = resolve_sorted(&registry, &order(), &input).unwrap();

        let dark = service_badges(&sorted, ColorMode::Dark);
        assert_eq!(dark.len(), 2);
        assert_eq!(dark[0].icon.as_deref(), Some("/img/storage-dark.svg"));
        assert_eq!(dark[1].icon.as_deref(), Some("/img/compute.svg"));
        assert_eq!(dark[0].learn_more_url, "https://learn.example/azure-storage");

        let light = service_badges(&sorted, ColorMode::Light);
        assert_eq!(light[0].icon.as_deref(), Some("/img/storage.svg"));
    }

    #[test]
    fn course_badges_strip_short_link_host() {
        let registry = registry();
        let input = ids(&["az104", "storage"]);
        let sorted = resolve_sorted(&registry, &order(), &input).unwrap();
        let badges = course_blueprint_badges(&sorted);
        assert_eq!(badges.len(), 1);
        assert_eq!(badges[0].title, "az104blueprint");
        assert_eq!(badges[0].blueprint_url, "https://aka.ms/az104blueprint");
        assert_eq!(badges[0].diagram.as_deref(), Some("/img/az104.png"));
    }

    #[test]
    fn course_tag_without_blueprint_is_skipped() {
        let registry = registry();
        let input = ids(&["az900"]);
        let sorted = resolve_sorted(&registry, &order(), &input).unwrap();
        assert!(course_blueprint_badges(&sorted).is_empty());
    }

    #[test]
    fn tags_matching_neither_variant_produce_nothing() {
        let registry = registry();
        let input = ids(&["unlisted"]);
        let sorted = resolve_sorted(&registry, &order(), &input).unwrap();
        assert!(service_badges(&sorted, ColorMode::Light).is_empty());
        assert!(course_blueprint_badges(&sorted).is_empty());
    }
}
