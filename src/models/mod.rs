pub mod callback;
pub mod company;
pub mod draft;
pub mod keyboard;
pub mod posting;
pub mod session;
pub mod user;
