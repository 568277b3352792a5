use regex::Regex;

/// Finds `<...>` groups in a log line.
///
/// Matching is naive and non-nested: a group runs from a `<` to the next `>`,
/// so `<a<b>` yields `a<b`. Empty `<>` pairs are not groups.
#[derive(Debug, Clone)]
pub struct BracketExtractor {
    re: Regex,
}

impl BracketExtractor {
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self {
            re: Regex::new(r"<([^>]+)>")?,
        })
    }

    /// Group contents, left to right, without the enclosing brackets.
    pub fn groups<'a>(&self, line: &'a str) -> impl Iterator<Item = &'a str> {
        self.re
            .captures_iter(line)
            .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
    }
}
