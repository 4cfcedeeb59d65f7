pub mod router;
pub mod server;
pub mod types;
pub mod handlers {
    pub mod health;
    pub mod home;
    pub mod records;
}

pub use router::{create_router, ApiDoc};
pub use server::RecordServer;
pub use types::{AppState, Catalog};
