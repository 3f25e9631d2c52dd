/// Domain layer - cookbook versions, analysis findings, per-version records and node inventory
///
/// Pure business logic with no knowledge of the Chef server, the analyzer
/// process, or how reports are rendered.
pub mod domain;
pub mod services;
