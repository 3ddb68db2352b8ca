//! 初始化选项与固定常量
//! - `InitOptions`：一次初始化运行的不可变配置
//! - 模板清单 `template.yaml` 的结构
//! - `.gitignore` 内容、提交信息、占位远端地址

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// 未指定模板时使用的模板标识
pub const DEFAULT_TEMPLATE: &str = "mbot-haml";

/// 写入新仓库 `.gitignore` 的固定条目：构建缓存、系统元数据文件、构建输出目录
pub const GITIGNORE_ENTRIES: [&str; 3] = [".sass_cache", ".DS_Store", "build"];

/// 初始提交的固定提交信息
pub const COMMIT_MESSAGE: &str = "middle-manager commits everything";

/// 远端仓库占位地址（尚未真正创建远端或推送）
pub const PLACEHOLDER_REMOTE: &str = "git@github.com/user/project";

/// 一次初始化运行的配置
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InitOptions {
    pub create_version_control: bool,
    pub create_storage_bucket: bool,
    pub template_name: Option<String>,
}

impl InitOptions {
    /// 实际使用的模板标识
    pub fn template_id(&self) -> &str {
        self.template_name.as_deref().unwrap_or(DEFAULT_TEMPLATE)
    }
}

/// `.gitignore` 文件内容，每行一个条目
pub fn gitignore_contents() -> String {
    let mut s = GITIGNORE_ENTRIES.join("\n");
    s.push('\n');
    s
}

/// 内置模板目录中的 `template.yaml`
#[derive(Debug, Clone, Deserialize)]
pub struct TemplateManifest {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl TemplateManifest {
    pub fn parse(text: &str) -> Result<Self> {
        serde_yaml::from_str(text).context("解析模板清单失败")
    }
}
