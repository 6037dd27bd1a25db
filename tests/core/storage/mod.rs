//! Storage layer tests
//!
//! Collection build, reopen, replacement, corruption and cleanup.

mod test_lifecycle;
