pub mod catalog_service;
pub mod cleanup_service;
pub mod mail_service;
pub mod otp_service;
pub mod playlist_service;
