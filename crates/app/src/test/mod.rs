//! Test support


pub use context::TestContext;
