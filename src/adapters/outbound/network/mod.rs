/// Network adapters for the Chef Infra Server API
mod chef_server_client;
mod request_signer;

pub use chef_server_client::ChefServerClient;
pub use request_signer::RequestSigner;
