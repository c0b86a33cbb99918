pub mod errors;
pub mod session;


pub use errors::{ApiError, ApiResult};
pub use session::{Output, Session};
