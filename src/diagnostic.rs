use crate::fault::RuntimeFault;
use colored::*;
use serde::Serialize;
use std::borrow::Cow;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Compiler severity codes at or above this value are errors.
pub const ERROR_SEVERITY_CODE: u32 = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Syntax,
    Runtime,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl Severity {
    pub fn from_code(code: u32) -> Self {
        if code >= ERROR_SEVERITY_CODE {
            Severity::Error
        } else {
            Severity::Warning
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

/// Half-open source range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Location {
    pub start: Position,
    pub end: Position,
}

impl Location {
    /// A single character span starting at `(line, column)`.
    pub fn point(line: u32, column: u32) -> Self {
        Location {
            start: Position { line, column },
            end: Position {
                line,
                column: column.saturating_add(1),
            },
        }
    }

    /// Used when no precise location is available.
    pub fn unknown() -> Self {
        let origin = Position { line: 0, column: 0 };
        Location {
            start: origin,
            end: origin,
        }
    }

    pub fn is_unknown(&self) -> bool {
        *self == Location::unknown()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.start.line, self.start.column)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Diagnostic {
    kind: Kind,
    severity: Severity,
    location: Location,
    explain: Cow<'static, str>,
    elaborate: Cow<'static, str>,
}

impl Diagnostic {
    pub fn new(
        kind: Kind,
        severity: Severity,
        location: Location,
        explain: impl Into<Cow<'static, str>>,
        elaborate: impl Into<Cow<'static, str>>,
    ) -> Self {
        Diagnostic {
            kind,
            severity,
            location,
            explain: explain.into(),
            elaborate: elaborate.into(),
        }
    }

    /// A diagnostic emitted by the compiler through its context callback.
    pub fn syntax(severity_code: u32, message: &str, line: u32, column: u32) -> Self {
        Diagnostic::new(
            Kind::Syntax,
            Severity::from_code(severity_code),
            Location::point(line, column),
            String::from(message),
            "",
        )
    }

    /// The host rejected bytes the compiler reported as clean.
    pub fn validation_failure(message: &str) -> Self {
        Diagnostic::new(
            Kind::Syntax,
            Severity::Error,
            Location::unknown(),
            String::from(message),
            "The generated module failed host validation. This is likely a bug in the compiler.",
        )
    }

    pub fn fault(fault: RuntimeFault, line: u32, column: u32) -> Self {
        Diagnostic::new(
            Kind::Runtime,
            Severity::Error,
            Location::point(line, column),
            fault.explain(),
            fault.elaborate(),
        )
    }

    /// An execution failure that did not come through the fault import.
    pub fn host_failure(description: &str) -> Self {
        Diagnostic::new(
            Kind::Runtime,
            Severity::Error,
            Location::unknown(),
            String::from(description),
            String::from(description),
        )
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn location(&self) -> Location {
        self.location
    }

    pub fn explain(&self) -> &str {
        &self.explain
    }

    pub fn elaborate(&self) -> &str {
        &self.elaborate
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "[{:?} {:?}] {}: {}",
            self.kind, self.severity, self.location, self.explain
        )
    }
}

pub trait DiagnosticString {
    fn diagnostic_string(&self) -> String;
}

impl DiagnosticString for [Diagnostic] {
    fn diagnostic_string(&self) -> String {
        let diags = self
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        String::from("Vec(") + &diags + ")"
    }
}

/// Append-only diagnostic sink shared by every stage of one request.
pub trait Reporter {
    fn report(&self, diagnostic: Diagnostic);
}

pub struct DefaultReporter {}

impl DefaultReporter {
    pub fn new() -> Rc<Self> {
        Rc::new(DefaultReporter {})
    }
}

impl Reporter for DefaultReporter {
    fn report(&self, diagnostic: Diagnostic) {
        let header = if diagnostic.is_error() {
            "• Error:".red().bold()
        } else {
            "• Warning:".yellow().bold()
        };
        println!("\n{} {}\n", header, diagnostic.explain());
        if !diagnostic.elaborate().is_empty() {
            println!("  {}", diagnostic.elaborate());
        }
        if !diagnostic.location().is_unknown() {
            println!("  at {}\n", diagnostic.location());
        }
    }
}

/// Holds diagnostics until the caller decides how to present them.
pub struct BufferedReporter {
    diagnostics: RefCell<Vec<Diagnostic>>,
}

impl BufferedReporter {
    pub fn new() -> Rc<Self> {
        Rc::new(BufferedReporter {
            diagnostics: RefCell::new(Vec::new()),
        })
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.borrow().clone()
    }

    pub fn has_errored(&self) -> bool {
        self.diagnostics.borrow().iter().any(Diagnostic::is_error)
    }
}

impl Reporter for BufferedReporter {
    fn report(&self, diagnostic: Diagnostic) {
        self.diagnostics.borrow_mut().push(diagnostic);
    }
}
