// UI module - console front end
//
// This module contains:
// - ConsoleController: input loop wiring user commands to the workflow
// - render: the two display templates (normal and math) plus history and
//   error rendering

pub mod controller;
pub mod render;

pub use controller::ConsoleController;
