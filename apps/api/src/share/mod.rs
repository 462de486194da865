// Share: one validated summary, one email, one transport call.

pub mod handlers;
pub mod service;
pub mod validation;
