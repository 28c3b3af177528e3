pub mod controller;
pub mod engine;
pub mod host;
pub mod observer;
pub mod session;
pub mod sim;
