// Common test utilities, fixtures and provider stubs

pub mod fixtures;

// Re-export commonly used items
// Note: These may appear unused in some test binaries
#[allow(unused_imports)]
pub use fixtures::{sky_text, write_document, TestDocs};
#[allow(unused_imports)]
pub use helpers::{assert_valid_ready, test_config, test_service, test_service_with};
#[allow(unused_imports)]
pub use stubs::{
    CountingEmbedder, CountingLlm, EchoLlm, FailingEmbedder, FailingLlm, ScriptedLlm,
    StaticCatalog,
};
