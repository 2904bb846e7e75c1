pub mod pagination;
pub mod shutdown;

pub use pagination::{PaginatedResult, PaginationParams};
pub use shutdown::{ShutdownCoordinator, ShutdownSignal};
