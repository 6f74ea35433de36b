//! Path patterns the waiting-room gate never intercepts.
//!
//! Supported pattern forms:
//! - `/error` exact path
//! - `/*.css` `*` matches within one segment
//! - `/static/**` trailing `**` matches any remaining segments

use waitroom_core::config::queue::WaitingQueueConfig;

/// Path of the read-only status endpoint.
pub const STATUS_PATH: &str = "/api/waiting-queue/status";

/// Path of the liveness endpoint.
pub const HEALTH_PATH: &str = "/health";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Pattern {
    Exact(String),
    Segments { segments: Vec<String>, open: bool },
}

impl Pattern {
    fn parse(raw: &str) -> Self {
        if !raw.contains('*') {
            return Self::Exact(raw.to_string());
        }
        let mut segments: Vec<String> = split(raw).map(str::to_string).collect();
        let open = segments.last().is_some_and(|s| s == "**");
        if open {
            segments.pop();
        }
        Self::Segments { segments, open }
    }

    fn matches(&self, path: &str) -> bool {
        match self {
            Self::Exact(exact) => exact == path,
            Self::Segments { segments, open } => {
                let parts: Vec<&str> = split(path).collect();
                let count_ok = if *open {
                    parts.len() >= segments.len()
                } else {
                    parts.len() == segments.len()
                };
                count_ok
                    && segments
                        .iter()
                        .zip(parts.iter())
                        .all(|(pattern, part)| segment_matches(pattern, part))
            }
        }
    }
}

fn split(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// Glob match of one segment where `*` spans any run of characters.
fn segment_matches(pattern: &str, segment: &str) -> bool {
    let mut pieces = pattern.split('*');
    let Some(first) = pieces.next() else {
        return segment.is_empty();
    };
    let Some(mut rest) = segment.strip_prefix(first) else {
        return false;
    };

    let pieces: Vec<&str> = pieces.collect();
    let Some((last, middle)) = pieces.split_last() else {
        return rest.is_empty();
    };

    for piece in middle {
        match rest.find(piece) {
            Some(idx) => rest = &rest[idx + piece.len()..],
            None => return false,
        }
    }
    rest.len() >= last.len() && rest.ends_with(last)
}

/// Compiled set of excluded path patterns.
#[derive(Debug, Clone, Default)]
pub struct PathExclusions {
    patterns: Vec<Pattern>,
}

impl PathExclusions {
    /// Compile `patterns`.
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            patterns: patterns
                .into_iter()
                .map(|p| Pattern::parse(p.as_ref()))
                .collect(),
        }
    }

    /// Configured exclusions plus the waiting page and the built-in endpoints.
    pub fn from_config(config: &WaitingQueueConfig) -> Self {
        let mut exclusions = Self::new(&config.excluded_paths);
        if config.waiting_page_url.starts_with('/') {
            let page = config
                .waiting_page_url
                .split(['?', '#'])
                .next()
                .unwrap_or_default();
            exclusions.patterns.push(Pattern::Exact(page.to_string()));
        }
        for path in [STATUS_PATH, HEALTH_PATH] {
            exclusions.patterns.push(Pattern::Exact(path.to_string()));
        }
        exclusions
    }

    /// Whether `path` bypasses the gate.
    pub fn is_excluded(&self, path: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(path))
    }
}
