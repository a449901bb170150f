mod backend;
mod context;

pub use backend::{Compiler, DiagnosticCallback, Parser};
use context::ContextGuard;

use crate::config::Config;
use crate::diagnostic::*;
use crate::error::CompileError;
use crate::running::{CompiledModule, Host};
use log::{debug, trace};
use std::cell::Cell;
use std::rc::Rc;

/// Parses, compiles and validates `source`.
///
/// Every diagnostic the compiler emits is in `reporter` before this returns.
/// A module is only produced when the compiler returned bytes *and* none of
/// its diagnostics were errors; validation is skipped otherwise.
pub async fn compile<P, C>(
    parser: &P,
    compiler: &C,
    host: &Host,
    config: &Config,
    source: &str,
    reporter: Rc<dyn Reporter>,
) -> Result<CompiledModule, CompileError>
where
    P: Parser,
    C: Compiler,
{
    let tree = match parser.parse(source, Rc::clone(&reporter)) {
        Some(tree) => tree,
        None => return Err(CompileError::Parse),
    };

    let serialized = serde_json::to_string(&tree)?;
    trace!(target: "compile", "Serialized tree is {} bytes", serialized.len());

    let has_error = Rc::new(Cell::new(false));
    let bytes = {
        let on_diagnostic = report_to(Rc::clone(&reporter), Rc::clone(&has_error));
        let mut context = ContextGuard::create(compiler, on_diagnostic);
        context.compile(&serialized, &config.compile_options).await?
    };

    debug!(target: "compile", "Compiler produced {} bytes", bytes.len());

    if has_error.get() {
        return Err(CompileError::Syntax);
    }

    match host.validate(bytes).await {
        Ok(module) => Ok(module),
        Err(message) => {
            reporter.report(Diagnostic::validation_failure(&message));
            Err(CompileError::Validation)
        }
    }
}

fn report_to(reporter: Rc<dyn Reporter>, has_error: Rc<Cell<bool>>) -> DiagnosticCallback {
    Box::new(move |severity_code, message, line, column| {
        if Severity::from_code(severity_code) == Severity::Error {
            has_error.set(true);
        }
        reporter.report(Diagnostic::syntax(severity_code, message, line, column));
    })
}
