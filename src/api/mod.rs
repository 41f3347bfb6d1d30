pub mod client;
pub mod request;
pub mod session;
pub mod transport;

pub use client::IgClient;
pub use request::{ApiRequest, FileUpload, RawResponse, Request};
pub use session::{Session, csrf_token_from_cookies};
pub use transport::{HttpTransport, Transport};
