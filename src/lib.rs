// Library surface for headless/integration tests and reuse.
// The render layer lives in the binary; keep this free of UI types.
pub mod app_dirs;
pub mod metrics;
pub mod passages;
pub mod runtime;
pub mod session;
pub mod settings;
pub mod stats;
pub mod theme;
