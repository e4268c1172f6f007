//! up10 Processing Library
//!
//! Everything the service decides from the raw bytes of an upload: the
//! identifier, the detected content type, the storage key and disposition,
//! and whether the file is accepted at all.

pub mod classify;
pub mod identifier;
pub mod naming;
pub mod policy;

pub use classify::{classify, Classification};
pub use identifier::IdentifierGenerator;
pub use naming::{
    content_disposition, display_name, name_extension, resolve_extension, NamingDecision,
};
pub use policy::{PolicyError, UploadPolicy, DEFAULT_DENIED_EXTENSIONS};
