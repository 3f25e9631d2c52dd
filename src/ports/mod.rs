/// Ports module defining interfaces for hexagonal architecture
///
/// Outbound ports are the interfaces the application core drives:
/// the cookbook catalog, the usage index, the static analyzer, and the
/// presentation side (formatters, presenters, progress).
pub mod outbound;
