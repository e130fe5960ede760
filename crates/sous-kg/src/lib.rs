pub mod error;
pub mod registry;
pub mod row;
pub mod store;

pub use error::KgError;
pub use registry::{QueryTool, ToolHandler, ToolRegistry, QUERY_TOOL_NAME};
pub use row::{render_rows, Row, Scalar, NO_RESULTS};
pub use store::{GraphStore, HttpGraphStore};
