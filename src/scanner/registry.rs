use regex::Regex;
use std::fmt;

use crate::error::ProbeError;

// =========================================================================
//                              PAGE KINDS
// =========================================================================

/// Status page families this tool knows how to confirm and scrape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PageKind {
    PhpFpm,
    ApacheServerStatus,
    Prometheus,
}

impl PageKind {
    /// Probe order. First kind whose signature shows up wins.
    pub const ALL: [PageKind; 3] = [
        PageKind::PhpFpm,
        PageKind::ApacheServerStatus,
        PageKind::Prometheus,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PageKind::PhpFpm => "php-fpm",
            PageKind::ApacheServerStatus => "apache-server-status",
            PageKind::Prometheus => "prometheus",
        }
    }

    pub fn suffix(self) -> &'static str {
        match self {
            PageKind::PhpFpm => "/status?full=true",
            PageKind::ApacheServerStatus => "/server-status",
            PageKind::Prometheus => "/metrics",
        }
    }

    /// Plain substring that confirms the page is exposed.
    pub fn signature(self) -> &'static str {
        match self {
            PageKind::PhpFpm => "request URI:",
            PageKind::ApacheServerStatus => "Apache Server Status",
            PageKind::Prometheus => "endpoint=",
        }
    }

    // Whitespace is the ASCII set `[\t\n\f\r ]` only; NBSP and VT are token bytes.
    fn pattern(self) -> &'static str {
        match self {
            PageKind::PhpFpm => r"(script|request URI):[\t\n\f\r ]+([^\t\n\f\r ]+)",
            PageKind::ApacheServerStatus => {
                r"(?:GET|OPTIONS)[\t\n\f\r ]+([^\t\n\f\r ]+)[\t\n\f\r ]+HTTP"
            }
            PageKind::Prometheus => r#"endpoint="([^"]+)""#,
        }
    }

    fn capture_group(self) -> usize {
        match self {
            PageKind::PhpFpm => 2,
            PageKind::ApacheServerStatus | PageKind::Prometheus => 1,
        }
    }
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =========================================================================
//                              PAGE TYPES
// =========================================================================

/// A page kind bound to its compiled extraction rule.
#[derive(Clone, Debug)]
pub struct PageType {
    kind: PageKind,
    pattern: Regex,
    group: usize,
}

impl PageType {
    pub fn new(kind: PageKind) -> Result<Self, ProbeError> {
        let pattern = Regex::new(kind.pattern()).map_err(|source| ProbeError::Pattern {
            page: kind.name(),
            source,
        })?;
        Ok(Self {
            kind,
            pattern,
            group: kind.capture_group(),
        })
    }

    pub fn kind(&self) -> PageKind {
        self.kind
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn suffix(&self) -> &'static str {
        self.kind.suffix()
    }

    pub fn signature(&self) -> &'static str {
        self.kind.signature()
    }

    pub fn matches_signature(&self, line: &str) -> bool {
        line.contains(self.signature())
    }

    /// Captured value from one body line, if the rule fires on it.
    pub fn extract<'l>(&self, line: &'l str) -> Option<&'l str> {
        self.pattern
            .captures(line)
            .and_then(|caps| caps.get(self.group))
            .map(|m| m.as_str())
    }
}

// =========================================================================
//                               REGISTRY
// =========================================================================

/// Ordered, immutable list of page types. Built once per run.
#[derive(Clone, Debug)]
pub struct Registry {
    types: Vec<PageType>,
}

impl Registry {
    pub fn builtin() -> Result<Self, ProbeError> {
        Self::with_order(&PageKind::ALL)
    }

    pub fn with_order(kinds: &[PageKind]) -> Result<Self, ProbeError> {
        let types = kinds
            .iter()
            .map(|&kind| PageType::new(kind))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { types })
    }

    pub fn iter(&self) -> impl Iterator<Item = &PageType> {
        self.types.iter()
    }
}
