// * The Network Layer
// * Content-scraping collaborator: HTTP client, error-to-status mapping and the bounded scanner

pub mod client;
pub mod errors;
pub mod scanner;

pub use client::PageClient;
pub use errors::NetworkError;
pub use scanner::ContentScanner;
