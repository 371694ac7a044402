// Library exports for pulse-server
// Lets integration tests and other tooling build the app without main()

pub mod api;
pub mod config;
pub mod db;
pub mod state;
