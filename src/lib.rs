pub mod compiling;
pub mod config;
pub mod diagnostic;
pub mod error;
pub mod fault;
pub mod running;

pub use compiling::{Compiler, DiagnosticCallback, Parser};
pub use config::Config;
pub use diagnostic::*;
pub use error::*;
pub use running::{CompiledModule, DecodedValue, Host};
use std::rc::Rc;

/// Compiles and runs programs for one host, collecting diagnostics into a
/// caller-owned reporter.
pub struct Pipeline<P, C> {
    parser: P,
    compiler: C,
    host: Host,
    config: Config,
}

impl<P: Parser, C: Compiler> Pipeline<P, C> {
    pub fn new(parser: P, compiler: C) -> Self {
        Pipeline::with_config(parser, compiler, Config::default())
    }

    pub fn with_config(parser: P, compiler: C, config: Config) -> Self {
        Pipeline {
            parser,
            compiler,
            host: Host::new(),
            config,
        }
    }

    pub fn compiler(&self) -> &C {
        &self.compiler
    }

    pub async fn compile(
        &self,
        source: &str,
        reporter: Rc<dyn Reporter>,
    ) -> Result<CompiledModule, CompileError> {
        compiling::compile(
            &self.parser,
            &self.compiler,
            &self.host,
            &self.config,
            source,
            reporter,
        )
        .await
    }

    pub async fn run(
        &self,
        module: &CompiledModule,
        reporter: Rc<dyn Reporter>,
    ) -> Result<DecodedValue, RunError> {
        running::run(&self.host, module, &self.config, reporter).await
    }

    /// Compile then run, reporting both stages into the same sink.
    pub async fn evaluate(
        &self,
        source: &str,
        reporter: Rc<dyn Reporter>,
    ) -> Result<DecodedValue, EvalError> {
        let module = self.compile(source, Rc::clone(&reporter)).await?;
        Ok(self.run(&module, reporter).await?)
    }
}
