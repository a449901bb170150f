use crate::diagnostic::Reporter;
use futures_util::future::LocalBoxFuture;
use serde::Serialize;
use std::rc::Rc;

/// Turns source text into a tree, or `None` when the source does not parse.
pub trait Parser {
    type Tree: Serialize;

    fn parse(&self, source: &str, reporter: Rc<dyn Reporter>) -> Option<Self::Tree>;
}

/// Invoked by the compiler as `(severity_code, message, line, column)`.
pub type DiagnosticCallback = Box<dyn Fn(u32, &str, u32, u32)>;

/// The external compiler.
///
/// A context is created once per compilation and receives the diagnostic
/// callback. `destroy_context` is called on it exactly once, after which the
/// context is dropped and never used again.
pub trait Compiler {
    type Context;

    fn create_context(&self, on_diagnostic: DiagnosticCallback) -> Self::Context;

    /// Compiles a serialized tree into module bytes. `options` is the
    /// auxiliary string from `Config::compile_options`.
    fn compile<'a>(
        &'a self,
        context: &'a mut Self::Context,
        tree: &'a str,
        options: &'a str,
    ) -> LocalBoxFuture<'a, anyhow::Result<Vec<u8>>>;

    fn destroy_context(&self, context: &mut Self::Context);
}
