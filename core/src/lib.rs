pub mod canonical;
pub mod contract;
pub mod manifest;
pub mod mapper;
pub mod validator;
pub mod writer;

pub mod error;
