use std::fmt;

/// One recorded value for a label.
///
/// Values that parse as `f64` are numeric; anything else keeps its trimmed
/// text so categorical charts (pie) can still count it.
#[derive(Debug, Clone, PartialEq)]
pub enum Observation {
    Numeric(f64),
    Categorical(String),
}

impl Observation {
    /// Classify an already-trimmed value.
    pub fn parse(raw: &str) -> Self {
        match raw.parse::<f64>() {
            Ok(v) => Observation::Numeric(v),
            Err(_) => Observation::Categorical(raw.to_string()),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Observation::Numeric(v) => Some(*v),
            Observation::Categorical(_) => None,
        }
    }
}

impl fmt::Display for Observation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Observation::Numeric(v) => write!(f, "{}", v),
            Observation::Categorical(s) => f.write_str(s),
        }
    }
}

/// Append-only history of observations for one (title, label).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series(Vec<Observation>);

impl Series {
    pub fn push(&mut self, value: Observation) {
        self.0.push(value);
    }

    pub fn values(&self) -> &[Observation] {
        &self.0
    }
}
