pub mod display;
pub mod entities;
pub mod requests;
pub mod responses;
