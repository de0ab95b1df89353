pub mod add;
pub mod days;
pub mod deactivate;
pub mod delete;
pub mod show;
