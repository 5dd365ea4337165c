pub mod add;
pub mod auth;
pub mod backup;
pub mod del;
pub mod edit;
pub mod guard;
pub mod log;
pub mod session;
pub mod validate;
pub mod view;
