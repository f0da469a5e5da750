use std::env;

/// Execution contexts that influence how logging is routed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecutionContext {
    /// A person is watching the terminal; diagnostics go to stderr.
    Interactive,
    /// Scripted or CI use where the console should stay silent.
    Quiet,
}

impl ExecutionContext {
    /// Returns `true` when console sinks should be disabled.
    pub fn disables_console(self) -> bool {
        matches!(self, ExecutionContext::Quiet)
    }
}

/// Derive the active execution context from the `--quiet` flag plus overrides.
pub fn detect_context(quiet: bool) -> ExecutionContext {
    if quiet || quiet_override_enabled() {
        ExecutionContext::Quiet
    } else {
        ExecutionContext::Interactive
    }
}

fn quiet_override_enabled() -> bool {
    env::var("CHIRPY_QUIET")
        .map(|value| value.trim() == "1")
        .unwrap_or(false)
}
