// User store module
// In-memory user records and the store that owns them

mod model;
mod store;

pub use model::UserPayload;
pub use store::{IdStrategy, SharedUserStore, UserStore};
