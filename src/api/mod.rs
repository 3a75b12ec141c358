//! API response envelopes

pub mod preview;
pub mod response;

pub use preview::{Preview, PreviewMeta};
pub use response::{Created, DataResponse};
