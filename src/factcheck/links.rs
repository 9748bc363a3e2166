//! Manual verification links and the fact-checking organizations directory.

use serde::Serialize;
use url::Url;

use super::truncate_chars;

pub const MAX_LINK_QUERY_CHARS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FactCheckOrg {
    pub name: &'static str,
    pub domain: &'static str,
    pub color: &'static str,
}

pub const FACTCHECK_ORGS: &[FactCheckOrg] = &[
    FactCheckOrg { name: "Snopes", domain: "snopes.com", color: "#4a90d9" },
    FactCheckOrg { name: "PolitiFact", domain: "politifact.com", color: "#c41e3a" },
    FactCheckOrg { name: "FactCheck.org", domain: "factcheck.org", color: "#1a5f7a" },
    FactCheckOrg { name: "AFP Fact Check", domain: "factcheck.afp.com", color: "#0066cc" },
    FactCheckOrg { name: "Reuters Fact Check", domain: "reuters.com/fact-check", color: "#ff8000" },
    FactCheckOrg { name: "AP Fact Check", domain: "apnews.com/APFactCheck", color: "#ff322e" },
    FactCheckOrg { name: "Full Fact (UK)", domain: "fullfact.org", color: "#006699" },
    FactCheckOrg { name: "Alt News (India)", domain: "altnews.in", color: "#e74c3c" },
    FactCheckOrg { name: "Boom (India)", domain: "boomlive.in", color: "#f39c12" },
    FactCheckOrg { name: "The Quint (India)", domain: "thequint.com/news/webqoof", color: "#d4af37" },
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchLink {
    pub name: &'static str,
    pub url: String,
    pub icon: &'static str,
    pub description: &'static str,
}

enum QueryPlacement {
    /// Appended as the last path segment.
    Path,
    /// Sent as the named query parameter.
    Param(&'static str),
}

struct LinkTemplate {
    name: &'static str,
    base: &'static str,
    placement: QueryPlacement,
    icon: &'static str,
    description: &'static str,
}

const LINK_TEMPLATES: &[LinkTemplate] = &[
    LinkTemplate {
        name: "Google Fact Check Explorer",
        base: "https://toolbox.google.com/factcheck/explorer/search",
        placement: QueryPlacement::Path,
        icon: "fact_check",
        description: "Search all verified fact-checkers",
    },
    LinkTemplate {
        name: "Snopes",
        base: "https://www.snopes.com/",
        placement: QueryPlacement::Param("s"),
        icon: "search",
        description: "Popular fact-checking site since 1994",
    },
    LinkTemplate {
        name: "PolitiFact",
        base: "https://www.politifact.com/search/",
        placement: QueryPlacement::Param("q"),
        icon: "gavel",
        description: "Pulitzer Prize-winning political fact-checker",
    },
    LinkTemplate {
        name: "FactCheck.org",
        base: "https://www.factcheck.org/",
        placement: QueryPlacement::Param("s"),
        icon: "verified",
        description: "Annenberg Public Policy Center project",
    },
    LinkTemplate {
        name: "AFP Fact Check",
        base: "https://factcheck.afp.com/list/all/all",
        placement: QueryPlacement::Path,
        icon: "language",
        description: "Global fact-checking by AFP",
    },
    LinkTemplate {
        name: "Alt News (India)",
        base: "https://www.altnews.in/",
        placement: QueryPlacement::Param("s"),
        icon: "flag",
        description: "Indian fact-checking platform",
    },
];

fn build_url(template: &LinkTemplate, query: &str) -> Option<Url> {
    let mut url = Url::parse(template.base).ok()?;
    match template.placement {
        QueryPlacement::Path => {
            url.path_segments_mut().ok()?.push(query);
        }
        QueryPlacement::Param(name) => {
            url.query_pairs_mut().append_pair(name, query);
        }
    }
    Some(url)
}

/// One search link per well-known fact-checker for `query` (first 200 chars).
pub fn search_links(query: &str) -> Vec<SearchLink> {
    let q = truncate_chars(query, MAX_LINK_QUERY_CHARS);
    LINK_TEMPLATES
        .iter()
        .filter_map(|t| {
            build_url(t, q).map(|url| SearchLink {
                name: t.name,
                url: url.into(),
                icon: t.icon,
                description: t.description,
            })
        })
        .collect()
}
