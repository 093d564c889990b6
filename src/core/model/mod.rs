//! Typed entities built from a descriptor tree.

pub mod command;
pub mod container;
pub mod input;
pub mod naming;
pub mod output;
pub mod process;

pub use command::Command;
pub use container::{Container, ContainerSource};
pub use input::{Input, InputKind, ScalarType};
pub use naming::Named;
pub use output::{Output, OutputKind};
pub use process::Process;
