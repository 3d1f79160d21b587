pub mod shell;

pub use shell::{MenuChoice, MenuShell};
