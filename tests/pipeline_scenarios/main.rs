//! Pipeline Scenario Test Suite
//!
//! End-to-end checks of the ingestion pipeline through the public facade.
//!
//! ## Test Groups
//!
//! - **end_to_end**: one upload per test, from trigger event to stored row
//! - **store_acknowledgment**: how store answers decide success
//! - **concurrency**: independent invocations sharing one store
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test pipeline_scenarios
//! ```

mod test_utils;

mod concurrency;
mod end_to_end;
mod store_acknowledgment;
