//! 初始化流程的终止性错误
//! - 用户输入错误（空项目名）
//! - 前置条件错误（目录非空、模板不存在）
//! - 协作方（模板生成、git、存储桶）原样透传的错误

use std::{io, path::PathBuf};
use thiserror::Error;

/// 错误分类，用于调用方区分处理
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    UserInput,
    Precondition,
    Collaborator,
}

/// 初始化过程中任何一步失败都会以此错误终止
#[derive(Debug, Error)]
pub enum FatalError {
    #[error("empty project name")]
    EmptyProjectName,

    #[error("directory exists and isn't empty")]
    DirectoryNotEmpty { path: PathBuf },

    #[error("unknown project template '{0}'")]
    UnknownTemplate(String),

    #[error("{0:#}")]
    Collaborator(#[from] anyhow::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl FatalError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FatalError::EmptyProjectName => ErrorKind::UserInput,
            FatalError::DirectoryNotEmpty { .. } | FatalError::UnknownTemplate(_) => {
                ErrorKind::Precondition
            }
            FatalError::Collaborator(_) | FatalError::Io(_) => ErrorKind::Collaborator,
        }
    }
}
