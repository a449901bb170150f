use super::backend::*;
use log::trace;

/// Owns one compiler context and destroys it when dropped, whichever way
/// the compilation exits.
pub(crate) struct ContextGuard<'c, C: Compiler> {
    compiler: &'c C,
    context: C::Context,
}

impl<'c, C: Compiler> ContextGuard<'c, C> {
    pub(crate) fn create(compiler: &'c C, on_diagnostic: DiagnosticCallback) -> Self {
        trace!(target: "compile", "Creating compile context");
        ContextGuard {
            compiler,
            context: compiler.create_context(on_diagnostic),
        }
    }

    pub(crate) async fn compile(&mut self, tree: &str, options: &str) -> anyhow::Result<Vec<u8>> {
        self.compiler.compile(&mut self.context, tree, options).await
    }
}

impl<C: Compiler> Drop for ContextGuard<'_, C> {
    fn drop(&mut self) {
        trace!(target: "compile", "Destroying compile context");
        self.compiler.destroy_context(&mut self.context);
    }
}
