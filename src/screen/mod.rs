pub mod impl_gui;
pub mod state;
