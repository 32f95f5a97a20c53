pub mod startup;

pub use startup::{AppContext, BootstrapOptions};
