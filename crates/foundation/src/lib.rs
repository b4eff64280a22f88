pub mod category;
pub mod dataset;
pub mod ids;
pub mod region;

// Foundation crate: plain data types shared by the client, the proxy and the chart code.
pub use category::*;
pub use dataset::*;
pub use ids::*;
pub use region::*;
