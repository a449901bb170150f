pub use conduit::diagnostic::*;
use std::cell::RefCell;
use std::rc::Rc;

pub type TestResult = std::result::Result<(), String>;

#[allow(dead_code)]
pub mod test_backend {

    use conduit::compiling::*;
    use conduit::diagnostic::Reporter;
    use futures_util::future::{FutureExt, LocalBoxFuture};
    use serde::Serialize;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    #[derive(Serialize)]
    pub struct TestTree {
        pub source: String,
    }

    /// Parses anything except sources containing `@unparseable`.
    pub struct TestParser;

    impl Parser for TestParser {
        type Tree = TestTree;

        fn parse(&self, source: &str, _reporter: Rc<dyn Reporter>) -> Option<TestTree> {
            if source.contains("@unparseable") {
                None
            } else {
                Some(TestTree {
                    source: String::from(source),
                })
            }
        }
    }

    pub struct TestContext {
        id: usize,
        on_diagnostic: DiagnosticCallback,
    }

    /// Replays scripted diagnostics, then returns scripted output.
    pub struct TestCompiler {
        diagnostics: Vec<(u32, String, u32, u32)>,
        output: Result<Vec<u8>, String>,
        panics: bool,
        pub created: Cell<usize>,
        pub destroyed: Cell<usize>,
        pub live: RefCell<Vec<usize>>,
        pub trees: RefCell<Vec<String>>,
        pub options: RefCell<Vec<String>>,
    }

    impl TestCompiler {
        pub fn producing(bytes: &[u8]) -> Self {
            TestCompiler {
                diagnostics: Vec::new(),
                output: Ok(bytes.to_vec()),
                panics: false,
                created: Cell::new(0),
                destroyed: Cell::new(0),
                live: RefCell::new(Vec::new()),
                trees: RefCell::new(Vec::new()),
                options: RefCell::new(Vec::new()),
            }
        }

        pub fn failing(message: &str) -> Self {
            let mut compiler = TestCompiler::producing(&[]);
            compiler.output = Err(String::from(message));
            compiler
        }

        /// Panics partway through compiling, after its diagnostics.
        pub fn panicking() -> Self {
            let mut compiler = TestCompiler::producing(&[]);
            compiler.panics = true;
            compiler
        }

        pub fn with_diagnostic(mut self, severity: u32, message: &str, line: u32, column: u32) -> Self {
            self.diagnostics
                .push((severity, String::from(message), line, column));
            self
        }
    }

    impl Compiler for TestCompiler {
        type Context = TestContext;

        fn create_context(&self, on_diagnostic: DiagnosticCallback) -> TestContext {
            let id = self.created.get();
            self.created.set(id + 1);
            self.live.borrow_mut().push(id);
            TestContext { id, on_diagnostic }
        }

        fn compile<'a>(
            &'a self,
            context: &'a mut TestContext,
            tree: &'a str,
            options: &'a str,
        ) -> LocalBoxFuture<'a, anyhow::Result<Vec<u8>>> {
            async move {
                assert!(self.live.borrow().contains(&context.id));
                self.trees.borrow_mut().push(String::from(tree));
                self.options.borrow_mut().push(String::from(options));

                for (severity, message, line, column) in &self.diagnostics {
                    (context.on_diagnostic)(*severity, message.as_str(), *line, *column);
                }

                tokio::task::yield_now().await;

                if self.panics {
                    panic!("compiler crashed");
                }

                match &self.output {
                    Ok(bytes) => Ok(bytes.clone()),
                    Err(message) => Err(anyhow::anyhow!("{}", message)),
                }
            }
            .boxed_local()
        }

        fn destroy_context(&self, context: &mut TestContext) {
            self.destroyed.set(self.destroyed.get() + 1);
            self.live.borrow_mut().retain(|id| *id != context.id);
        }
    }
}

/// Modules in text format, linked against the default `Config` names.
#[allow(dead_code)]
pub mod test_module {

    pub const TAG_OFFSET: u32 = 1_048_564;
    pub const DATA_OFFSET: u32 = 1_048_568;

    fn wrap(data: &str, body: &str) -> Vec<u8> {
        format!(
            r#"(module
  (import "env" "fault" (func $fault (param i32 i32 i32 i32 i32)))
  (memory (export "memory") 16)
  {}
  (func (export "main")
    {}))"#,
            data, body
        )
        .into_bytes()
    }

    pub fn tag_only(tag: u32) -> Vec<u8> {
        wrap(
            "",
            &format!("(i32.store (i32.const {}) (i32.const {}))", TAG_OFFSET, tag),
        )
    }

    pub fn number(value: f64) -> Vec<u8> {
        wrap(
            "",
            &format!(
                "(i32.store (i32.const {}) (i32.const 2))
    (f64.store (i32.const {}) (f64.const {}))",
                TAG_OFFSET, DATA_OFFSET, value
            ),
        )
    }

    pub fn hello() -> Vec<u8> {
        wrap(
            r#"(data (i32.const 1024) "\05\00\00\00hello")"#,
            &format!(
                "(i32.store (i32.const {}) (i32.const 4))
    (i32.store (i32.const {}) (i32.const 1024))",
                TAG_OFFSET, DATA_OFFSET
            ),
        )
    }

    /// Faults with `code` at 3:7, then tries to leave a number behind.
    pub fn faulting(code: u32) -> Vec<u8> {
        wrap(
            "",
            &format!(
                "(call $fault (i32.const {}) (i32.const 0) (i32.const 0) (i32.const 3) (i32.const 7))
    (i32.store (i32.const {}) (i32.const 2))
    (f64.store (i32.const {}) (f64.const 1))
    (call $fault (i32.const 0) (i32.const 0) (i32.const 0) (i32.const 9) (i32.const 9))",
                code, TAG_OFFSET, DATA_OFFSET
            ),
        )
    }

    pub fn trapping() -> Vec<u8> {
        wrap("", "unreachable")
    }

    pub fn without_entry_point() -> Vec<u8> {
        String::from(
            r#"(module
  (import "env" "fault" (func $fault (param i32 i32 i32 i32 i32)))
  (memory (export "memory") 16))"#,
        )
        .into_bytes()
    }
}

pub struct DiagnosticCapture {
    diagnostics: Rc<RefCell<Vec<Diagnostic>>>,
}

impl DiagnosticCapture {
    pub fn unwrap(&mut self) -> Vec<Diagnostic> {
        let captured = RefCell::new(Vec::new());
        self.diagnostics.swap(&captured);
        captured.into_inner()
    }
}

pub struct TestReporter {
    diagnostics: Rc<RefCell<Vec<Diagnostic>>>,
}

impl TestReporter {
    pub fn new() -> (Rc<dyn Reporter>, DiagnosticCapture) {
        let diagnostics = Rc::new(RefCell::new(Vec::new()));
        (
            Rc::new(TestReporter {
                diagnostics: Rc::clone(&diagnostics),
            }),
            DiagnosticCapture { diagnostics },
        )
    }
}

impl Reporter for TestReporter {
    fn report(&self, diagnostic: Diagnostic) {
        self.diagnostics.borrow_mut().push(diagnostic);
    }
}

#[allow(dead_code)]
pub fn assert_slices_equal<T, U>(
    kind: &str,
    got: &[T],
    expected: &[T],
    test: U,
    list: &str,
) -> TestResult
where
    T: std::fmt::Display,
    U: Fn(&T, &T) -> bool,
{
    if got.len() != expected.len() {
        let one_line = format!("Expected {} {}, got {}", expected.len(), kind, got.len());
        println!("{}\n{}", &one_line, list);
        return Err(one_line);
    }

    for (lhs, rhs) in got.iter().zip(expected) {
        if !test(lhs, rhs) {
            println!("Expected:\n  {}\nGot:\n  {}", rhs, lhs);
            return Err(String::from("Unexpected item"));
        }
    }

    Ok(())
}

#[allow(dead_code)]
pub fn assert_diagnostics(got: &[Diagnostic], expected: &[Diagnostic]) -> TestResult {
    assert_slices_equal(
        "diagnostics",
        got,
        expected,
        |lhs, rhs| lhs == rhs,
        &got.diagnostic_string(),
    )
}
