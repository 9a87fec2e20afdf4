//! Markdown → HTML → Markdown round trips.
//!
//! fixtures.rs pins the exact output for the constructs a README editor produces;
//! props.rs checks stability over generated documents.

mod fixtures;
mod props;
