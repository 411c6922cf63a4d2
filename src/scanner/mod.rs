//! Status page probing: registry of known pages, detection, extraction and output.

pub mod detect;
pub mod extract;
pub mod registry;
pub mod report;

pub use detect::{detect, Detection};
pub use extract::{extract, UniqueValues};
pub use registry::{PageKind, PageType, Registry};
pub use report::{finalize, render, Blacklist};
