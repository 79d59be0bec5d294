use std::fmt;
use tracing::warn;

/// A non-fatal condition met during conversion. The offending data is
/// dropped and processing continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    UnexpectedMetadata { key: String },
    UnexpectedPropertyKey { key: String },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::UnexpectedMetadata { key } => {
                write!(f, "ignoring unexpected metadata: {key}")
            }
            Warning::UnexpectedPropertyKey { key } => {
                write!(f, "ignoring unexpected property key: {key}")
            }
        }
    }
}

pub type WarningCallback<'a> = Box<dyn Fn(&Warning) + Send + Sync + 'a>;

/// Forwards each warning to a caller-supplied callback as soon as it is
/// raised.
#[derive(Default)]
pub struct WarningReporter<'a> {
    callback: Option<WarningCallback<'a>>,
}

impl<'a> WarningReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: WarningCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, warning: &Warning) {
        if let Some(cb) = &self.callback {
            cb(warning);
        }
    }
}

/// Per-conversion collector of warnings.
pub(crate) struct Diagnostics<'r, 'a> {
    reporter: &'r WarningReporter<'a>,
    warnings: Vec<Warning>,
}

impl<'r, 'a> Diagnostics<'r, 'a> {
    pub(crate) fn new(reporter: &'r WarningReporter<'a>) -> Self {
        Self {
            reporter,
            warnings: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, warning: Warning) {
        warn!("{}", warning);
        self.reporter.report(&warning);
        self.warnings.push(warning);
    }

    pub(crate) fn into_warnings(self) -> Vec<Warning> {
        self.warnings
    }
}
