pub mod groups;
pub mod history;
pub mod sort;
pub mod status;
