use super::decoder::{decode, DecodedValue};
use super::host::{CompiledModule, Host};
use crate::config::Config;
use crate::diagnostic::*;
use crate::error::RunError;
use crate::fault::RuntimeFault;
use anyhow::anyhow;
use log::{debug, trace};
use std::rc::Rc;
use thiserror::Error;
use wasmtime::{Caller, Linker, Store};

/// Raised from the fault import to unwind out of the entry point. Only
/// constructed here, so seeing it means the diagnostic is already reported.
#[derive(Debug, Error)]
#[error("module reported a runtime fault")]
struct FaultSignal;

struct RunState {
    reporter: Rc<dyn Reporter>,
}

/// Instantiates `module`, calls its entry point and decodes the value it
/// left in memory.
pub async fn run(
    host: &Host,
    module: &CompiledModule,
    config: &Config,
    reporter: Rc<dyn Reporter>,
) -> Result<DecodedValue, RunError> {
    let mut store = Store::new(
        host.engine(),
        RunState {
            reporter: Rc::clone(&reporter),
        },
    );

    match execute(&mut store, host, module, config) {
        Ok(value) => {
            trace!(target: "run", "Decoded {}", value);
            Ok(value)
        }
        Err(error) if error.is::<FaultSignal>() => Err(RunError::Runtime),
        Err(error) => {
            let description = format!("{:#}", error);
            debug!(target: "run", "Execution failed: {}", description);
            reporter.report(Diagnostic::host_failure(&description));
            Err(RunError::Host(error))
        }
    }
}

fn execute(
    store: &mut Store<RunState>,
    host: &Host,
    module: &CompiledModule,
    config: &Config,
) -> wasmtime::Result<DecodedValue> {
    let mut linker = Linker::new(host.engine());
    linker.func_wrap(
        &config.import_module,
        &config.fault_import,
        |caller: Caller<'_, RunState>,
         code: u32,
         detail: u32,
         file: u32,
         line: u32,
         column: u32|
         -> wasmtime::Result<()> {
            debug!(
                target: "run",
                "Fault {:#x} (detail {}, file {}) at {}:{}",
                code, detail, file, line, column
            );
            let fault = RuntimeFault::from_code(code);
            caller
                .data()
                .reporter
                .report(Diagnostic::fault(fault, line, column));
            Err(FaultSignal.into())
        },
    )?;

    let instance = linker.instantiate(&mut *store, module.module())?;
    let entry = instance.get_typed_func::<(), ()>(&mut *store, &config.entry_point)?;
    entry.call(&mut *store, ())?;

    let memory = instance
        .get_memory(&mut *store, &config.memory_export)
        .ok_or_else(|| anyhow!("module does not export a memory named `{}`", config.memory_export))?;

    Ok(decode(memory.data(&*store)))
}
