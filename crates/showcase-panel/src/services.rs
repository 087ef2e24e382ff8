//! Collaborators the panel reads from or writes to but does not own.

use showcase_core::{ColorMode, SiteSettings};

/// Turns site-relative asset paths into URLs. Never fails.
pub trait AssetResolver {
    fn resolve_asset_url(&self, path: &str) -> String;
}

/// Fire-and-forget clipboard writes.
pub trait Clipboard {
    fn copy_to_clipboard(&mut self, text: &str);
}

/// Reports the theme in effect at render time.
pub trait ColorModeSource {
    fn current_color_mode(&self) -> ColorMode;
}

/// Joins relative asset paths onto a configured base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrlResolver {
    base_url: String,
    placeholder: String,
}

impl BaseUrlResolver {
    pub fn new(base_url: impl Into<String>, placeholder: impl Into<String>) -> Self {
        BaseUrlResolver {
            base_url: base_url.into(),
            placeholder: placeholder.into(),
        }
    }

    pub fn from_settings(settings: &SiteSettings) -> Self {
        BaseUrlResolver::new(&settings.base_url, &settings.asset_placeholder)
    }

    fn join(&self, path: &str) -> String {
        if is_absolute_url(path) {
            return path.to_string();
        }
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl AssetResolver for BaseUrlResolver {
    fn resolve_asset_url(&self, path: &str) -> String {
        let path = path.trim();
        if path.is_empty() {
            return self.join(&self.placeholder);
        }
        self.join(path)
    }
}

fn is_absolute_url(path: &str) -> bool {
    ["http://", "https://", "//", "data:"]
        .iter()
        .any(|scheme| path.starts_with(scheme))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixedColorMode(pub ColorMode);

impl ColorModeSource for FixedColorMode {
    fn current_color_mode(&self) -> ColorMode {
        self.0
    }
}

/// Keeps every copied string, newest last.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryClipboard {
    pub entries: Vec<String>,
}

impl MemoryClipboard {
    pub fn last(&self) -> Option<&str> {
        self.entries.last().map(String::as_str)
    }
}

impl Clipboard for MemoryClipboard {
    fn copy_to_clipboard(&mut self, text: &str) {
        self.entries.push(text.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_relative_paths_with_one_slash() {
        let root = BaseUrlResolver::new("/", "/img/none.svg");
        assert_eq!(root.resolve_asset_url("/img/a.svg"), "/img/a.svg");
        assert_eq!(root.resolve_asset_url("img/a.svg"), "/img/a.svg");

        let site = BaseUrlResolver::new("/trainer-demo-deploy/", "/img/none.svg");
        assert_eq!(site.resolve_asset_url("/img/a.svg"), "/trainer-demo-deploy/img/a.svg");
    }

    #[test]
    fn absolute_urls_pass_through() {
        let site = BaseUrlResolver::new("/base", "/img/none.svg");
        for url in ["https://cdn.example/a.png", "http://x/y", "//cdn/x.png", "data:image/png;base64,AA"] {
            assert_eq!(site.resolve_asset_url(url), url);
        }
    }

    #[test]
    fn empty_path_yields_placeholder() {
        let site = BaseUrlResolver::new("/base/", "/img/none.svg");
        assert_eq!(site.resolve_asset_url("  "), "/base/img/none.svg");
    }

    #[test]
    fn memory_clipboard_records_in_order() {
        let mut clipboard = MemoryClipboard::default();
        clipboard.copy_to_clipboard("azd up");
        clipboard.copy_to_clipboard("azd down --purge --force");
        assert_eq!(clipboard.entries.len(), 2);
        assert_eq!(clipboard.last(), Some("azd down --purge --force"));
    }
}
