//! flatboard/crates/fb-services/src/lib.rs
//!
//! Session registry, identity resolution, and the content/mutation services
//! that every request goes through.

pub mod content;
pub mod identity;
pub mod mutation;
pub mod service;
pub mod session;

pub use identity::Identity;
pub use mutation::{Login, ProfileDefaults, ProfileEdit, Registration, ReplyDeletion, RoleFlags};
pub use service::ForumService;
pub use session::SessionRegistry;
