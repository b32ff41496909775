//! Rule sets shipped with devlint.
//!
//! Paths follow the layer layout discovery walks:
//!
//! - `100-directory`: any directory
//! - `200-version-control`: git repositories
//! - `300-remote-url`: repositories with a parseable remote
//! - `400-ecosystem/<tag>` and `400-ecosystem/_`: per ecosystem, and always
//! - `500-name/...`: specific project names and owners

mod clang;
mod cmake;
mod code_of_conduct;
mod deno_json;
mod editorconfig;
mod funding;
mod gitattributes;
mod github_workflows;
mod java_formatting;
mod lefthook;
mod license;
mod ls_lint;
mod metadata;
mod nofiles;
mod package_json;
mod project_name;
mod readme;
mod remote_url;
mod ruff;

use crate::error::Result;
use crate::rules::catalog::RuleCatalog;
use crate::rules::{Dependency, RuleContext};

pub use clang::{ClangFormat, Clangd};
pub use cmake::Cmake;
pub use code_of_conduct::CodeOfConduct;
pub use deno_json::DenoJson;
pub use editorconfig::EditorConfig;
pub use funding::Funding;
pub use gitattributes::GitAttributes;
pub use github_workflows::GithubWorkflows;
pub use java_formatting::JavaFormatting;
pub use lefthook::Lefthook;
pub use license::{License, NoLicense};
pub use ls_lint::LsLint;
pub use metadata::{LocalMetadata, RemoteMetadata};
pub use nofiles::NoFiles;
pub use package_json::PackageJson;
pub use project_name::ProjectName;
pub use readme::Readme;
pub use remote_url::{GitSuffix, GithubRemoteUrl};
pub use ruff::Ruff;

/// Register every built-in rule set.
pub fn register_all(catalog: &mut RuleCatalog) {
    catalog.register("100-directory/10-license", || Box::new(NoLicense));
    catalog.register("100-directory/20-nofiles", || Box::new(NoFiles));
    catalog.register("100-directory/30-readme", || Box::new(Readme));

    catalog.register("200-version-control/10-project-name", || Box::new(ProjectName));
    catalog.register("200-version-control/12-git-remote-url", || Box::new(GitSuffix));
    catalog.register("200-version-control/20-gitattributes", || Box::new(GitAttributes));

    catalog.register("300-remote-url/10-local-metadata", || Box::new(LocalMetadata));
    catalog.register("300-remote-url/11-git-remote-url", || Box::new(GithubRemoteUrl));
    catalog.register("300-remote-url/20-remote-metadata", || Box::new(RemoteMetadata));
    catalog.register("300-remote-url/30-license", || Box::new(License));
    catalog.register("300-remote-url/40-github", || Box::new(GithubWorkflows));

    catalog.register("400-ecosystem/_/10-editorconfig", || Box::new(EditorConfig));
    catalog.register("400-ecosystem/_/20-lefthook", || Box::new(Lefthook));
    catalog.register("400-ecosystem/_/30-ls-lint", || Box::new(LsLint));
    catalog.register("400-ecosystem/c/10-clang-format", || Box::new(ClangFormat));
    catalog.register("400-ecosystem/c/20-clangd", || Box::new(Clangd));
    catalog.register("400-ecosystem/cpp/10-cmake", || Box::new(Cmake));
    catalog.register("400-ecosystem/deno/10-deno-json", || Box::new(DenoJson));
    catalog.register("400-ecosystem/java/10-formatting", || Box::new(JavaFormatting));
    catalog.register("400-ecosystem/nodejs/10-package-json", || Box::new(PackageJson));
    catalog.register("400-ecosystem/python/10-ruff", || Box::new(Ruff));

    catalog.register("500-name/_/.github/10-funding", || Box::new(Funding));
    catalog.register("500-name/_/.github/20-code-of-conduct", || Box::new(CodeOfConduct));
}

/// The hosted repository API can be reached.
pub(crate) const REMOTE_API: Dependency = Dependency {
    name: "remote repository API (gh)",
    check: remote_api_available,
};

fn remote_api_available(cx: &RuleContext<'_>) -> Result<bool> {
    Ok(cx.project.has_remote() && cx.remote.available())
}

/// `owner` and `name` of a project that has a remote.
pub(crate) fn owner_and_name<'a>(cx: &'a RuleContext<'a>) -> Result<(&'a str, &'a str)> {
    match cx.project.owner() {
        Some(owner) => Ok((owner, cx.project.name())),
        None => Err(crate::error::Error::Content {
            file: cx.project.root_dir().display().to_string(),
            message: "expected the project to be associated with a remote".to_string(),
        }),
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::path::Path;

    use crate::context::ProjectContext;
    use crate::error::Result;
    use crate::rules::{Issue, RuleContext, RuleSet};

    pub fn plain(root: &Path) -> ProjectContext {
        ProjectContext::OnlyDirectory {
            root_dir: root.to_path_buf(),
            name: root
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default(),
        }
    }

    pub fn with_remote(root: &Path, owner: &str, name: &str, url: &str) -> ProjectContext {
        ProjectContext::WithRemote {
            root_dir: root.to_path_buf(),
            name: name.to_string(),
            branch_name: "main".to_string(),
            remote_name: "origin".to_string(),
            remote_url: url.to_string(),
            owner: owner.to_string(),
        }
    }

    /// Drain a rule set's stream, applying every fix when `fix` is set.
    ///
    /// Returns the issue ids (or `-` for issues without one) in order.
    pub fn drain(rule_set: &dyn RuleSet, cx: &RuleContext<'_>, fix: bool) -> Result<Vec<String>> {
        let mut ids = Vec::new();
        for issue in rule_set.issues(cx)? {
            let Issue { id, fix: action, .. } = issue?;
            ids.push(id.unwrap_or_else(|| "-".to_string()));
            if let (true, Some(action)) = (fix, action) {
                action()?;
            }
        }
        Ok(ids)
    }
}
