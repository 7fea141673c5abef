//! Patreon Sync Test Utils
//!
//! Provides shared testing utilities for building tests for the Patreon entitlement sync. This
//! crate offers a builder pattern for creating test contexts with in-memory SQLite databases and
//! customizable table schemas, plus factories and fixtures for entitlement data.
//!
//! # Overview
//!
//! The test utilities consist of these components:
//! - **TestBuilder**: Fluent builder for configuring test environments
//! - **TestContext**: Test environment containing the database connection
//! - **TestError**: Error types that can occur during test setup
//! - **factory**: Builders that insert entitlement rows with sensible defaults
//! - **fixture**: In-memory entity models that are never persisted
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::builder::TestBuilder;
//!
//! #[tokio::test]
//! async fn test_entitlement_operations() -> Result<(), TestError> {
//!     let test = TestBuilder::new()
//!         .with_entitlement_tables()
//!         .build()
//!         .await?;
//!
//!     let db = test.db.unwrap();
//!     // Perform database operations...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
pub mod fixture;
