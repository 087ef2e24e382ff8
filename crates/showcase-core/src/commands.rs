use serde::Serialize;
use std::fmt;

use crate::{Result, ShowcaseError};

/// Repository host every template source URL must live under.
pub const SOURCE_HOST_PREFIX: &str = "https://github.com/";

/// Lower-cased `owner/repo` path derived from a template's source URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TemplatePath(String);

impl TemplatePath {
    /// Derive the template path from a repository URL.
    ///
    /// The URL is lower-cased before the host prefix is stripped, so
    /// `https://github.com/Org/Repo-Name` becomes `org/repo-name`. One
    /// trailing slash is tolerated; anything that cannot be an
    /// `owner/repo[/...]` path is rejected.
    pub fn from_source_url(url: &str) -> Result<Self> {
        let lowered = url.to_lowercase();
        let rest = lowered.strip_prefix(SOURCE_HOST_PREFIX).ok_or_else(|| {
            ShowcaseError::malformed_source(url, "expected a https://github.com/ repository URL")
        })?;
        let rest = rest.strip_suffix('/').unwrap_or(rest);

        if rest.is_empty() {
            return Err(ShowcaseError::malformed_source(url, "missing owner/repository path"));
        }
        if rest.chars().any(char::is_whitespace) {
            return Err(ShowcaseError::malformed_source(url, "contains whitespace"));
        }
        if rest.contains(['?', '#']) {
            return Err(ShowcaseError::malformed_source(
                url,
                "contains a query string or fragment",
            ));
        }
        let segments: Vec<&str> = rest.split('/').collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(ShowcaseError::malformed_source(url, "contains an empty path segment"));
        }
        if segments.len() < 2 {
            return Err(ShowcaseError::malformed_source(url, "expected owner/repository"));
        }

        Ok(TemplatePath(rest.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TemplatePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandVerb {
    MakeDirectory,
    ChangeDirectory,
    InitTemplate,
    Up,
    Down,
}

impl CommandVerb {
    pub const ALL: [CommandVerb; 5] = [
        CommandVerb::MakeDirectory,
        CommandVerb::ChangeDirectory,
        CommandVerb::InitTemplate,
        CommandVerb::Up,
        CommandVerb::Down,
    ];

    /// Whether the command line ends with the template path.
    pub fn takes_path(self) -> bool {
        matches!(
            self,
            CommandVerb::MakeDirectory | CommandVerb::ChangeDirectory | CommandVerb::InitTemplate
        )
    }

    fn prefix(self) -> &'static str {
        match self {
            CommandVerb::MakeDirectory => "mkdir",
            CommandVerb::ChangeDirectory => "cd",
            CommandVerb::InitTemplate => "azd init -t",
            CommandVerb::Up => "azd up",
            CommandVerb::Down => "azd down --purge --force",
        }
    }
}

/// Build the literal shell command for `verb`.
pub fn command(path: &TemplatePath, verb: CommandVerb) -> String {
    if verb.takes_path() {
        format!("{} {}", verb.prefix(), path)
    } else {
        verb.prefix().to_string()
    }
}

/// Every command shown for one template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentCommands {
    pub template_path: TemplatePath,
    pub make_directory: String,
    pub change_directory: String,
    pub init: String,
    pub up: String,
    pub down: String,
}

impl DeploymentCommands {
    pub fn new(path: TemplatePath) -> Self {
        DeploymentCommands {
            make_directory: command(&path, CommandVerb::MakeDirectory),
            change_directory: command(&path, CommandVerb::ChangeDirectory),
            init: command(&path, CommandVerb::InitTemplate),
            up: command(&path, CommandVerb::Up),
            down: command(&path, CommandVerb::Down),
            template_path: path,
        }
    }

    pub fn from_source_url(url: &str) -> Result<Self> {
        TemplatePath::from_source_url(url).map(DeploymentCommands::new)
    }

    pub fn get(&self, verb: CommandVerb) -> &str {
        match verb {
            CommandVerb::MakeDirectory => &self.make_directory,
            CommandVerb::ChangeDirectory => &self.change_directory,
            CommandVerb::InitTemplate => &self.init,
            CommandVerb::Up => &self.up,
            CommandVerb::Down => &self.down,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reason(url: &str) -> String {
        match TemplatePath::from_source_url(url) {
            Err(ShowcaseError::MalformedSourceUrl { reason, .. }) => reason,
            other => panic!("expected malformed URL for {url:?}, got {other:?}"),
        }
    }

    #[test]
    fn derives_lowercase_path_and_commands() {
        let cmds = DeploymentCommands::from_source_url("https://github.com/Org/Repo-Name").unwrap();
        assert_eq!(cmds.template_path.as_str(), "org/repo-name");
        assert_eq!(cmds.init, "azd init -t org/repo-name");
        assert_eq!(cmds.make_directory, "mkdir org/repo-name");
        assert_eq!(cmds.change_directory, "cd org/repo-name");
        assert_eq!(cmds.up, "azd up");
        assert_eq!(cmds.down, "azd down --purge --force");
    }

    #[test]
    fn host_prefix_match_is_case_insensitive() {
        let path = TemplatePath::from_source_url("HTTPS://GitHub.com/Org/Repo/").unwrap();
        assert_eq!(path.as_str(), "org/repo");
    }

    #[test]
    fn nested_paths_are_kept() {
        let path = TemplatePath::from_source_url("https://github.com/Org/Repo/tree/main").unwrap();
        assert_eq!(path.as_str(), "org/repo/tree/main");
    }

    #[test]
    fn rejects_malformed_urls() {
        assert!(reason("http://github.com/org/repo").contains("github.com"));
        assert!(reason("https://gitlab.com/org/repo").contains("github.com"));
        assert_eq!(reason("https://github.com/"), "missing owner/repository path");
        assert_eq!(reason("https://github.com/org"), "expected owner/repository");
        assert_eq!(reason("https://github.com/org//repo"), "contains an empty path segment");
        assert_eq!(reason("https://github.com/org/my repo"), "contains whitespace");
        assert_eq!(
            reason("https://github.com/org/repo?tab=readme"),
            "contains a query string or fragment"
        );
    }

    #[test]
    fn lookup_by_verb_matches_fields() {
        let path = TemplatePath::from_source_url("https://github.com/a/b").unwrap();
        let cmds = DeploymentCommands::new(path.clone());
        for verb in CommandVerb::ALL {
            assert_eq!(cmds.get(verb), command(&path, verb));
        }
    }
}
