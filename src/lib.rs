pub mod config;
pub mod controller;
pub mod dispatch;
pub mod events;
pub mod gui;
pub mod layout;
pub mod macros;
pub mod menu;
pub mod sys;
pub mod update;
