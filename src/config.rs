/// Names of the binary interface a compiled module is linked against.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub import_module: String,
    pub fault_import: String,
    pub entry_point: String,
    pub memory_export: String,
    /// Passed verbatim as the compiler's auxiliary argument.
    pub compile_options: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            import_module: String::from("env"),
            fault_import: String::from("fault"),
            entry_point: String::from("main"),
            memory_export: String::from("memory"),
            compile_options: String::new(),
        }
    }
}
