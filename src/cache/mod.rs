pub mod assertion_cache;
pub mod federated_token;
pub mod token_cache;
