#![deny(unsafe_code)]

mod validator;

pub use validator::Validator;
