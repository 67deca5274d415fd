pub mod bootstrap;
pub mod install;
pub mod launch;
pub mod state;
