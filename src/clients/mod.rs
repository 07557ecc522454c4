//! Outbound HTTP collaborators

pub mod search_index;
pub mod texting;

pub use search_index::{HttpSearchIndexClient, NoopSearchIndexClient, SearchIndexClient};
pub use texting::TextingProviderClient;
