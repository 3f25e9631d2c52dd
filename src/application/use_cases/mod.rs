/// Use cases module containing application business logic orchestration
mod aggregate_cookbooks;
mod aggregate_nodes;

pub use aggregate_cookbooks::AggregateCookbooksUseCase;
pub use aggregate_nodes::AggregateNodesUseCase;
