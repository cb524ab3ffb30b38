pub mod airlines;
pub mod airports;
pub mod filter;
pub mod flights;
pub mod remarks;
pub mod roles;
pub mod schema;
pub mod sessions;
pub mod user_roles;
pub mod users;

pub use airlines::*;
pub use airports::*;
pub use flights::*;
pub use remarks::*;
pub use roles::*;
pub use schema::*;
pub use sessions::*;
pub use user_roles::*;
pub use users::*;
