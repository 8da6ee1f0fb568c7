mod import;
mod models;
mod ordering;
mod payload;
mod resource;
mod response;
mod state;

pub use import::*;
pub use models::*;
pub use ordering::*;
pub use payload::*;
pub use resource::*;
pub use response::*;
pub use state::*;
