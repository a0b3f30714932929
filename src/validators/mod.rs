pub mod json_body;
pub mod request_validator;
