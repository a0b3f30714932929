pub mod models;
pub mod otp;
