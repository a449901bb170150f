use clap::Parser;
use conduit::*;
use std::path::PathBuf;
use std::process;
use std::rc::Rc;

/// Validate and run a compiled module, reporting its diagnostics.
#[derive(Parser)]
#[command(name = "conduit", version)]
struct Cli {
    /// Module to run, in binary (.wasm) or text (.wat) format
    module: PathBuf,

    /// Exported entry point function
    #[arg(long, default_value = "main")]
    entry: String,

    /// Exported linear memory holding the result
    #[arg(long, default_value = "memory")]
    memory: String,

    /// Import namespace of the fault entry point
    #[arg(long, default_value = "env")]
    import_module: String,

    /// Import name of the fault entry point
    #[arg(long, default_value = "fault")]
    fault_import: String,

    /// Print the value and diagnostics as JSON
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn config(&self) -> Config {
        Config {
            import_module: self.import_module.clone(),
            fault_import: self.fault_import.clone(),
            entry_point: self.entry.clone(),
            memory_export: self.memory.clone(),
            ..Config::default()
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let bytes = match std::fs::read(&cli.module) {
        Ok(bytes) => bytes,
        Err(error) => {
            eprintln!("Could not read {}: {}", cli.module.display(), error);
            process::exit(2);
        }
    };

    let buffered = BufferedReporter::new();
    let reporter: Rc<dyn Reporter> = if cli.json {
        buffered.clone()
    } else {
        DefaultReporter::new()
    };

    let value = execute(&cli.config(), bytes, reporter).await;

    if cli.json {
        let output = serde_json::json!({
            "value": value.as_ref().ok(),
            "diagnostics": buffered.diagnostics(),
        });
        println!("{}", output);
    } else if let Ok(value) = &value {
        println!("{}", value);
    }

    if value.is_err() {
        process::exit(1);
    }
}

async fn execute(
    config: &Config,
    bytes: Vec<u8>,
    reporter: Rc<dyn Reporter>,
) -> Result<DecodedValue, EvalError> {
    let host = Host::new();

    let module = match host.validate(bytes).await {
        Ok(module) => module,
        Err(message) => {
            reporter.report(Diagnostic::validation_failure(&message));
            return Err(CompileError::Validation.into());
        }
    };

    Ok(running::run(&host, &module, config, reporter).await?)
}
