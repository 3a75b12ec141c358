//! Domain types and DTOs
//!
//! These types define the catalog entities served by the tours API and the
//! receipts returned for form submissions.

pub mod category;
pub mod content;
pub mod leads;
pub mod tours;

// Re-export commonly used types
pub use category::*;
pub use content::*;
pub use leads::*;
pub use tours::*;
