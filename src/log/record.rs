use std::fmt;

/// Bracket groups of one line, split into their roles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRecord<'a> {
    /// Trimmed title.
    pub title: &'a str,
    /// Raw `label:value, ...` group.
    pub pairs: &'a str,
    /// Raw chart-type group, if the line has one.
    pub chart_types: Option<&'a str>,
}

/// Why a line contributed nothing to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// No `<...>` group at all.
    NoGroups,
    /// Exactly one group: formatted, but not graphed.
    MissingPairs,
    /// Title contains `<`, `>` or `,`, or is blank.
    InvalidTitle(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoGroups => f.write_str("no bracket groups"),
            SkipReason::MissingPairs => f.write_str("missing label:value group"),
            SkipReason::InvalidTitle(t) => write!(f, "invalid title {:?}", t),
        }
    }
}

/// Assign roles to the extracted groups of one line.
///
/// Groups past the third are ignored.
pub fn classify<'a, I>(groups: I) -> Result<LineRecord<'a>, SkipReason>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut groups = groups.into_iter();

    let Some(raw_title) = groups.next() else {
        return Err(SkipReason::NoGroups);
    };
    let Some(pairs) = groups.next() else {
        return Err(SkipReason::MissingPairs);
    };

    let title = raw_title.trim();
    if title.is_empty() || title.contains(['<', '>', ',']) {
        return Err(SkipReason::InvalidTitle(raw_title.to_string()));
    }

    Ok(LineRecord {
        title,
        pairs,
        chart_types: groups.next(),
    })
}
