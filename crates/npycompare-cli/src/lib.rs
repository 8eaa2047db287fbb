pub mod cli;
pub mod compare;
pub mod options;
pub mod util;
