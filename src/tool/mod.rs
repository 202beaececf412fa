// In: src/tool/mod.rs

// ====================================================================================
// ARCHITECTURAL OVERVIEW: The Tool Adapter Layer
// ====================================================================================
//
// The `tool` module is the external-facing boundary of the fixrec library. It
// adapts the pure `Decoder`/`Generator` engines to the wrapper-tool lifecycle
// of the host configuration framework:
//
//   1. [configure]  -> `ReaderTool::new(name, ToolOptions)`
//         |              options arrive as a typed struct deserialized from the
//         |              host's option dictionary; unknown keys pass through
//         |              untouched for the host to interpret
//         |
//   2. [initialize] -> `tool.initialize()`
//         |              re-validates the bound layout and emits the resolved
//         |              configuration as structured diagnostic events (the
//         |              host owns the actual log sink)
//         |
//   3. [execute]    -> `tool.execute(block)`
//                        one raw block in, one columnar batch out; fatal
//                        errors propagate, lenient bounds diagnostics ride on
//                        the returned batch
//
// The adapters are thin by design: all decode/generate semantics live in the
// engines, and the adapters only resolve options and surface events.
// ====================================================================================

mod generator;
mod options;
mod reader;
#[cfg(test)]
mod tests;

pub use generator::GeneratorTool;
pub use options::ToolOptions;
pub use reader::ReaderTool;

/// Installs a stderr logger for the crate's diagnostic events, for host
/// processes and tests that bring no log sink of their own. Safe to call more
/// than once; later calls are no-ops.
pub fn init_diagnostics() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default()).try_init();
}
