//! CLI 定义模块：仅负责命令行参数结构体与解析
//! 将 clap 的声明与业务逻辑解耦，便于在其它模块中复用参数。

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// 顶层 CLI 入口
#[derive(Parser, Debug)]
#[command(name = "mmgr", about = "Static site project scaffolding", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// 子命令定义
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Set up a site project in the specified directory
    Init {
        /// Include git initialization (env: MMGR_GH)
        #[arg(long, visible_alias = "with-github")]
        gh: bool,
        /// Include s3 bucket creation (env: MMGR_S3)
        #[arg(long, visible_alias = "with-s3")]
        s3: bool,
        /// Site template to use, default 'mbot-haml' (env: MMGR_TEMPLATE)
        #[arg(short = 't', long = "with-template", value_name = "NAME")]
        template: Option<String>,
        /// Project directory; asked for interactively when omitted
        #[arg(value_name = "PROJECT_DIR")]
        dir: Option<PathBuf>,
    },
    /// List the available site templates
    Templates,
}
