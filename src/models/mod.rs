mod role;
mod user;

pub use role::{Role, RoleSelection};
pub use user::{NewUser, User, UserPatch};
