pub mod cache;
pub mod coordinator;
pub mod fetch_state;
pub mod http;
pub mod memo;
pub mod memory;
pub mod protocol;
pub mod request;
pub mod source;

pub use cache::*;
pub use coordinator::*;
pub use fetch_state::*;
pub use http::*;
pub use memo::*;
pub use memory::*;
pub use protocol::*;
pub use request::*;
pub use source::*;
