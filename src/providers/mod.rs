pub mod bundled;
pub mod mindicador;
