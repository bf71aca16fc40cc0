mod action;
mod author;
mod event;
mod form;
mod loading;
mod message;
mod preview;
mod related;
mod route;
mod session;
mod textarea;
mod upload;

pub use action::*;
pub use author::*;
pub use event::*;
pub use form::*;
pub use loading::*;
pub use message::*;
pub use preview::*;
pub use related::*;
pub use route::*;
pub use session::*;
pub use textarea::*;
pub use upload::*;
