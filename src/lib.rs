pub mod analysis;
pub mod app;
pub mod color;
pub mod corpus;
pub mod state;
pub mod ui;
