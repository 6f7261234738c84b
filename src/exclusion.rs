
/// Substrings that protect a bucket from being swept.
pub const DEFAULT_EXCLUSIONS: [&str; 3] = ["chikitsa", "echaritra", "details"];


/// A bucket is excluded when its name contains any member of the set (case-sensitive).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionSet {
    patterns: Vec<String>,
}

impl ExclusionSet {

    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let patterns = patterns.into_iter().map(Into::into).collect();
        Self { patterns }
    }

    /// An empty set excludes nothing.
    pub fn empty() -> Self {
        Self { patterns: Vec::new() }
    }

    pub fn is_excluded(&self, bucket_name: &str) -> bool {
        self.patterns
            .iter()
            .any(|pattern| bucket_name.contains(pattern.as_str()))
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}

impl Default for ExclusionSet {
    fn default() -> Self {
        Self::new(DEFAULT_EXCLUSIONS)
    }
}
