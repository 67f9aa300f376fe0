/*!
 * Hyperlink classification for tapped in-document links.
 *
 * A URL encountered in rendered content routes to one of three
 * behaviors: scroll to an in-document anchor, navigate to another
 * proposal document, or hand off to an external browser. Classification
 * is total; any shape that matches no rule opens externally.
 */

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use crate::document::{MarkupWalker, Node};

/// Host proposals are linked from
const CODE_HOST: &str = "github.com";
/// Host serving raw document bytes
const RAW_CONTENT_HOST: &str = "raw.githubusercontent.com";
/// Project segment identifying proposal repositories
const DEFAULT_PROJECT: &str = "swift-evolution";
/// Prefix for document identifiers derived from file names
const DEFAULT_ID_PREFIX: &str = "SE-";

/// Absolute path within the code host: `.../<project>/.../<digits>-<slug>.md`
static PROPOSAL_PATH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^.+/swift-evolution/.*/(\d+)-[^/]*\.md$").expect("valid proposal path regex")
});

/// Relative path: `<digits>-<slug>.md`, with nothing after the file name
static RELATIVE_PROPOSAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)-[^/]*\.md$").expect("valid relative proposal regex"));

/// The classified behavior for a tapped link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkAction {
    /// Scroll the current document to the row with this anchor id
    ScrollTo(String),
    /// Navigate to another proposal document.
    ///
    /// `source_url` is present when the link named an exact branch or
    /// ref; resolution of the canonical URL is otherwise left to the
    /// caller.
    ShowDocument {
        id: String,
        source_url: Option<Url>,
    },
    /// Hand the URL to an external browser
    OpenExternal(String),
}

/// Router from raw link strings to [`LinkAction`]s.
#[derive(Debug, Clone)]
pub struct LinkClassifier {
    host: String,
    id_prefix: String,
    path_pattern: Regex,
    relative_pattern: Regex,
}

impl Default for LinkClassifier {
    fn default() -> Self {
        Self {
            host: CODE_HOST.to_string(),
            id_prefix: DEFAULT_ID_PREFIX.to_string(),
            path_pattern: PROPOSAL_PATH.clone(),
            relative_pattern: RELATIVE_PROPOSAL.clone(),
        }
    }
}

impl LinkClassifier {
    /// Classifier for a different code host, project and id prefix.
    pub fn with_project(
        host: &str,
        project: &str,
        id_prefix: &str,
    ) -> Result<Self, regex::Error> {
        let project = regex::escape(project);
        Ok(Self {
            host: host.to_string(),
            id_prefix: id_prefix.to_string(),
            path_pattern: Regex::new(&format!(r"^.+/{project}/.*/(\d+)-[^/]*\.md$"))?,
            relative_pattern: RELATIVE_PROPOSAL.clone(),
        })
    }

    /// Classify a raw link string; rules apply in order, first match
    /// wins, and unrecognized shapes always open externally.
    pub fn classify(&self, raw: &str) -> LinkAction {
        match Url::parse(raw) {
            Ok(url) => {
                if url.host_str() == Some(self.host.as_str()) {
                    if let Some(caps) = self.path_pattern.captures(url.path()) {
                        // The explicit URL lets the caller fetch from the
                        // exact branch the link named
                        return LinkAction::ShowDocument {
                            id: format!("{}{}", self.id_prefix, &caps[1]),
                            source_url: Some(url),
                        };
                    }
                }
                LinkAction::OpenExternal(raw.to_string())
            }
            // No scheme and no host
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                if let Some(fragment) = raw.strip_prefix('#') {
                    if !fragment.is_empty() {
                        return LinkAction::ScrollTo(fragment.to_string());
                    }
                }
                let path = raw.split('#').next().unwrap_or(raw);
                if let Some(caps) = self.relative_pattern.captures(path) {
                    return LinkAction::ShowDocument {
                        id: format!("{}{}", self.id_prefix, &caps[1]),
                        source_url: None,
                    };
                }
                LinkAction::OpenExternal(raw.to_string())
            }
            Err(_) => LinkAction::OpenExternal(raw.to_string()),
        }
    }
}

/// Rewrite a code-host blob URL to the raw-content host.
pub fn raw_content_url(url: &Url) -> Result<Url, url::ParseError> {
    let mut raw = url.clone();
    raw.set_host(Some(RAW_CONTENT_HOST))?;
    let path = raw.path().replacen("/blob", "", 1);
    raw.set_path(&path);
    Ok(raw)
}

/// Canonical main-branch URL for a proposal file name.
pub fn proposal_source_url(file_name: &str) -> Result<Url, url::ParseError> {
    Url::parse(&format!(
        "https://{RAW_CONTENT_HOST}/apple/{DEFAULT_PROJECT}/main/proposals/{file_name}"
    ))
}

/// Walker collecting every link destination in a tree, document order.
#[derive(Default)]
pub struct LinkScanner {
    /// Destinations in the order encountered
    pub destinations: Vec<String>,
}

impl MarkupWalker for LinkScanner {
    fn visit_link(&mut self, node: &Node) {
        if let Some(destination) = node.destination() {
            self.destinations.push(destination.to_string());
        }
        self.descend_into(node);
    }
}

/// Collect every link destination under `root`.
pub fn collect_links(root: &Node) -> Vec<String> {
    let mut scanner = LinkScanner::default();
    scanner.visit(root);
    scanner.destinations
}
