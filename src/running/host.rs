use log::debug;
use tokio::runtime::Handle;
use wasmtime::{Engine, Module};

/// The host module system. Validates module bytes into executable modules.
#[derive(Clone, Default)]
pub struct Host {
    engine: Engine,
}

impl Host {
    pub fn new() -> Self {
        Host::default()
    }

    pub(crate) fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Accepts binary modules, and text-format modules through wasmtime's
    /// `wat` support. The error is the host's message, nothing more.
    ///
    /// Inside a Tokio runtime the work moves to the blocking pool; under any
    /// other executor it runs inline and the future completes on first poll.
    pub async fn validate(&self, bytes: Vec<u8>) -> Result<CompiledModule, String> {
        let engine = self.engine.clone();
        let validated = match Handle::try_current() {
            Ok(handle) => handle
                .spawn_blocking(move || Module::new(&engine, bytes))
                .await
                .map_err(|join_error| join_error.to_string())?,
            Err(_) => Module::new(&engine, bytes),
        };

        match validated {
            Ok(module) => {
                debug!(target: "host", "Module validated");
                Ok(CompiledModule { module })
            }
            Err(error) => {
                debug!(target: "host", "Module rejected: {:#}", error);
                Err(format!("{:#}", error))
            }
        }
    }
}

/// A validated module, ready to be instantiated any number of times.
#[derive(Clone)]
pub struct CompiledModule {
    module: Module,
}

impl CompiledModule {
    pub fn module(&self) -> &Module {
        &self.module
    }
}
