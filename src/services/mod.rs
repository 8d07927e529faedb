pub mod history_service;
pub mod prize_service;
pub mod seed_service;
pub mod spin_service;

pub use history_service::*;
pub use prize_service::*;
pub use seed_service::*;
pub use spin_service::*;
