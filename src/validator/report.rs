use std::fmt;

#[cfg(feature = "colorized_output")]
use console::style;

/// Validation check result status
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    /// Check passed
    Ok,
    /// Check passed with warnings
    Warning(String),
    /// Check failed
    Failed(String),
}

impl CheckStatus {
    fn is_ok(&self) -> bool {
        matches!(self, CheckStatus::Ok)
    }

    fn is_warning(&self) -> bool {
        matches!(self, CheckStatus::Warning(_))
    }

    fn is_failed(&self) -> bool {
        matches!(self, CheckStatus::Failed(_))
    }

    fn symbol(&self) -> &'static str {
        match self {
            CheckStatus::Ok => "✓",
            CheckStatus::Warning(_) => "⚠",
            CheckStatus::Failed(_) => "✗",
        }
    }
}

/// Stage of validation a check belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CheckCategory {
    /// Archive layout and entry storage
    Structure,
    /// Full decode of every stream
    Decoding,
    /// Consistency of the decoded values
    Semantics,
}

impl CheckCategory {
    const ALL: [CheckCategory; 3] = [
        CheckCategory::Structure,
        CheckCategory::Decoding,
        CheckCategory::Semantics,
    ];

    fn title(&self) -> &'static str {
        match self {
            CheckCategory::Structure => "Structure",
            CheckCategory::Decoding => "Decoding",
            CheckCategory::Semantics => "Semantics",
        }
    }
}

/// Individual validation check result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationCheck {
    /// Stage the check ran in
    pub category: CheckCategory,
    /// Name of the validation check
    pub name: String,
    /// Result status of the check
    pub status: CheckStatus,
}

impl ValidationCheck {
    pub(crate) fn ok(category: CheckCategory, name: impl Into<String>) -> Self {
        Self {
            category,
            name: name.into(),
            status: CheckStatus::Ok,
        }
    }

    pub(crate) fn warning(category: CheckCategory, name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            category,
            name: name.into(),
            status: CheckStatus::Warning(message.into()),
        }
    }

    pub(crate) fn failed(category: CheckCategory, name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            category,
            name: name.into(),
            status: CheckStatus::Failed(message.into()),
        }
    }
}

/// Complete validation report for one container
#[derive(Debug, Clone)]
pub struct ValidationReport {
    /// Checks in the order they ran
    pub checks: Vec<ValidationCheck>,
    /// Path of the container that was validated
    pub file_path: String,
    /// Version marker, once it could be read
    pub version: Option<String>,
}

impl ValidationReport {
    /// Empty report for `file_path`
    pub fn new(file_path: impl Into<String>) -> Self {
        Self {
            checks: Vec::new(),
            file_path: file_path.into(),
            version: None,
        }
    }

    /// Add a validation check result to the report
    pub fn add_check(&mut self, check: ValidationCheck) {
        self.checks.push(check);
    }

    /// Checks of one category
    pub fn checks_in(&self, category: CheckCategory) -> impl Iterator<Item = &ValidationCheck> {
        self.checks.iter().filter(move |c| c.category == category)
    }

    /// Check named `name`
    pub fn check(&self, name: &str) -> Option<&ValidationCheck> {
        self.checks.iter().find(|c| c.name == name)
    }

    /// True if no check failed
    pub fn is_valid(&self) -> bool {
        !self.has_failures()
    }

    /// Check if any validation checks failed
    pub fn has_failures(&self) -> bool {
        self.checks.iter().any(|c| c.status.is_failed())
    }

    /// Check if any validation checks produced warnings
    pub fn has_warnings(&self) -> bool {
        self.checks.iter().any(|c| c.status.is_warning())
    }

    /// Count the number of successful checks
    pub fn success_count(&self) -> usize {
        self.checks.iter().filter(|c| c.status.is_ok()).count()
    }

    /// Count the number of warnings
    pub fn warning_count(&self) -> usize {
        self.checks.iter().filter(|c| c.status.is_warning()).count()
    }

    /// Count the number of failures
    pub fn failure_count(&self) -> usize {
        self.checks.iter().filter(|c| c.status.is_failed()).count()
    }

    fn verdict(&self) -> &'static str {
        if self.has_failures() {
            "Validation FAILED"
        } else if self.has_warnings() {
            "Validation PASSED with warnings"
        } else {
            "Validation PASSED"
        }
    }

    /// Format the report with colors (requires the `colorized_output` feature)
    pub fn format_colored(&self) -> String {
        #[cfg(feature = "colorized_output")]
        {
            let mut output = String::new();
            output.push_str(&format!("{}\n", style("Chromatogram Container Validation").bold().cyan()));
            output.push_str(&format!("{}: {}\n", style("File").bold(), self.file_path));
            if let Some(version) = &self.version {
                output.push_str(&format!("{}: {}\n", style("Version").bold(), version));
            }

            for category in CheckCategory::ALL {
                let mut checks = self.checks_in(category).peekable();
                if checks.peek().is_none() {
                    continue;
                }
                output.push_str(&format!("\n{}\n", style(category.title()).bold().underlined()));
                for check in checks {
                    let symbol = check.status.symbol();
                    let line = match &check.status {
                        CheckStatus::Ok => format!("  {} {}", style(symbol).green(), check.name),
                        CheckStatus::Warning(msg) => {
                            format!("  {} {} - {}", style(symbol).yellow(), check.name, style(msg).yellow())
                        }
                        CheckStatus::Failed(msg) => {
                            format!("  {} {} - {}", style(symbol).red(), check.name, style(msg).red())
                        }
                    };
                    output.push_str(&line);
                    output.push('\n');
                }
            }

            output.push_str(&format!(
                "\n{}: {} passed, {} warnings, {} failed\n",
                style("Summary").bold(),
                style(self.success_count()).green(),
                style(self.warning_count()).yellow(),
                style(self.failure_count()).red()
            ));
            let verdict = if self.has_failures() {
                style(self.verdict()).red().bold()
            } else if self.has_warnings() {
                style(self.verdict()).yellow().bold()
            } else {
                style(self.verdict()).green().bold()
            };
            output.push_str(&format!("{}\n", verdict));
            output
        }

        #[cfg(not(feature = "colorized_output"))]
        {
            self.to_string()
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Chromatogram Container Validation")?;
        writeln!(f, "File: {}", self.file_path)?;
        if let Some(version) = &self.version {
            writeln!(f, "Version: {}", version)?;
        }

        for category in CheckCategory::ALL {
            let mut checks = self.checks_in(category).peekable();
            if checks.peek().is_none() {
                continue;
            }
            writeln!(f)?;
            writeln!(f, "{}", category.title())?;
            for check in checks {
                write!(f, "  {} {}", check.status.symbol(), check.name)?;
                match &check.status {
                    CheckStatus::Ok => writeln!(f)?,
                    CheckStatus::Warning(msg) => writeln!(f, " - WARNING: {}", msg)?,
                    CheckStatus::Failed(msg) => writeln!(f, " - FAILED: {}", msg)?,
                }
            }
        }

        writeln!(f)?;
        writeln!(
            f,
            "Summary: {} passed, {} warnings, {} failed",
            self.success_count(),
            self.warning_count(),
            self.failure_count()
        )?;
        writeln!(f, "{}", self.verdict())
    }
}
