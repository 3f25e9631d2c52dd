mod node_resolver;

pub use node_resolver::NodeResolver;
