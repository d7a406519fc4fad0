//! lingo - request contracts and app shell declarations for a
//! language-learning product
//!
//! - `contract`: validation of backend API request inputs
//! - `navigation`: stack layouts of the mobile app sections
//! - `branding`: header logo component

pub mod branding;
pub mod cli;
pub mod contract;
pub mod navigation;
pub mod observability;
