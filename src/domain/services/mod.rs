pub mod actions;
mod app_state;
mod events;
mod router;
mod scroll;
mod session_store;
mod shared_data;
mod upload_flow;

pub use app_state::*;
pub use events::*;
pub use router::*;
pub use scroll::*;
pub use session_store::*;
pub use shared_data::*;
pub use upload_flow::*;
