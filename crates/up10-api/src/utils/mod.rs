pub mod public_url;
pub mod upload;
