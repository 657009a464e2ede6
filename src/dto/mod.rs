pub mod accounting;
pub mod auth;
pub mod branches;
pub mod catalog;
pub mod customers;
pub mod orders;
pub mod users;
