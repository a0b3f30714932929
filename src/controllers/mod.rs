pub mod auth_controller;
pub mod home_controller;
pub mod playlist_controller;
pub mod song_controller;
