//! mmgr：静态站点项目脚手架
//! 生成站点骨架，可选初始化 git 仓库与存储桶。

pub mod cli;
pub mod commands;
pub mod config;
pub mod console;
pub mod error;
pub mod init;
pub mod storage;
pub mod templates;
mod utils;
pub mod vcs;

pub use config::InitOptions;
pub use console::Console;
pub use error::{ErrorKind, FatalError};
pub use init::Initializer;
