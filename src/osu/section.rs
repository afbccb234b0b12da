//! Splits `.osu` text into its `[Section]`s.

use std::collections::HashMap;

use super::mixin::SourceRangeMixin;

/// Lines of one section, each trimmed and carrying its byte range.
pub type SectionLines<'a> = Vec<SourceRangeMixin<&'a str>>;

/// All sections of a file by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sections<'a> {
    sections: HashMap<&'a str, SectionLines<'a>>,
}

impl<'a> Sections<'a> {
    /// Splits `source` into sections.
    ///
    /// Blank lines and `//` comments are skipped, as is anything before the first header (the
    /// `osu file format vN` line). A repeated header appends to the earlier section.
    #[must_use]
    pub fn split(source: &'a str) -> Self {
        let mut sections: HashMap<&'a str, SectionLines<'a>> = HashMap::new();
        let mut current: Option<&'a str> = None;
        let mut offset = 0;
        for raw in source.split_inclusive('\n') {
            let start = offset;
            offset += raw.len();
            let line = raw.trim();
            if line.is_empty() || line.starts_with("//") {
                continue;
            }
            if let Some(name) = line.strip_prefix('[').and_then(|rest| rest.strip_suffix(']')) {
                let name = name.trim();
                sections.entry(name).or_default();
                current = Some(name);
                continue;
            }
            let Some(name) = current else {
                continue;
            };
            let leading = raw.len() - raw.trim_start().len();
            let begin = start + leading;
            sections
                .entry(name)
                .or_default()
                .push(SourceRangeMixin::new(line, begin, begin + line.len()));
        }
        Self { sections }
    }

    /// Whether the section exists, even if empty.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.sections.contains_key(name)
    }

    /// Lines of the section, empty when it is missing.
    #[must_use]
    pub fn lines(&self, name: &str) -> &[SourceRangeMixin<&'a str>] {
        self.sections
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// The last line of the section defining `key`, with its value trimmed.
    #[must_use]
    pub fn property_line(&self, name: &str, key: &str) -> Option<SourceRangeMixin<&'a str>> {
        self.lines(name).iter().rev().find_map(|line| {
            let content: &'a str = *line.content();
            let (found, value) = content.split_once(':')?;
            (found.trim() == key).then(|| line.map(|_| value.trim()))
        })
    }

    /// `Key: Value` pairs of the section, both trimmed. Later duplicates win.
    #[must_use]
    pub fn properties(&self, name: &str) -> HashMap<&'a str, &'a str> {
        self.lines(name)
            .iter()
            .filter_map(|line| (*line.content()).split_once(':'))
            .map(|(key, value)| (key.trim(), value.trim()))
            .collect()
    }
}
