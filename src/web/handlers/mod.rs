// Request handlers, one module per resource.

pub mod activities;
pub mod recommend;
pub mod users;
