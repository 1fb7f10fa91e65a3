//! Error adapter for converting TsErrError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use tserr::{TsErrError, registry::RegistryError};

/// Adapter rendering a [`TsErrError`] as a miette diagnostic.
pub struct ErrorAdapter<'a>(pub &'a TsErrError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            TsErrError::Io(_) => "tserr::io",
            TsErrError::Registry(_) => "tserr::registry",
            TsErrError::Config(_) => "tserr::config",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            TsErrError::Io(_) => "check that the input file exists and is readable",
            TsErrError::Registry(RegistryError::Io { .. }) => {
                "check the --registry flag or the [registry] path setting"
            }
            TsErrError::Registry(RegistryError::Json(_)) => {
                "expected an object mapping each message to { \"category\", \"code\" }"
            }
            TsErrError::Config(_) => "check the configuration file or pass --config",
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// Wrap `err` for rendering with a miette report handler.
pub fn to_reportable(err: &TsErrError) -> ErrorAdapter<'_> {
    ErrorAdapter(err)
}
