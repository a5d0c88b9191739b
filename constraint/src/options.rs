//! Checker configuration.

/// Options for a consistency check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckOptions {
    /// Treat every warning as an error.
    pub warnings_as_errors: bool,
    /// Report unreferenced species, compartments and parameters.
    pub report_dead_declarations: bool,
}

impl CheckOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strict() -> Self {
        Self {
            warnings_as_errors: true,
            ..Self::default()
        }
    }

    pub fn warnings_as_errors(mut self, on: bool) -> Self {
        self.warnings_as_errors = on;
        self
    }

    pub fn report_dead_declarations(mut self, on: bool) -> Self {
        self.report_dead_declarations = on;
        self
    }
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            warnings_as_errors: false,
            report_dead_declarations: true,
        }
    }
}
