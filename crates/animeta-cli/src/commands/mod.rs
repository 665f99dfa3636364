pub mod browse;
pub mod config;
pub mod genres;
pub mod home;
pub mod new_releases;
pub mod render;
pub mod search;
pub mod show;
pub mod trending;
