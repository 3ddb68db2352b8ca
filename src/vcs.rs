//! 版本控制协作方
//! - `VersionControl`：初始化仓库、暂存全部文件、提交
//! - `GitCli`：通过系统 `git` 命令实现

use anyhow::{bail, Context, Result};
use std::{
    path::Path,
    process::{Command, Output},
};

/// 未配置 `user.name` / `user.email` 时使用的提交身份
const FALLBACK_NAME: &str = "mmgr";
const FALLBACK_EMAIL: &str = "mmgr@localhost";

pub trait VersionControl {
    fn init(&self, dir: &Path) -> Result<()>;
    fn add_all(&self, dir: &Path) -> Result<()>;
    fn commit(&self, dir: &Path, message: &str) -> Result<()>;
}

/// 调用系统 `git` 的实现，所有命令都以 `git -C <dir>` 运行
#[derive(Debug, Default, Clone)]
pub struct GitCli {
    envs: Vec<(String, String)>,
}

impl GitCli {
    pub fn new() -> Self {
        Self::default()
    }

    /// 为每次 git 调用附加环境变量（如 `GIT_CONFIG_GLOBAL`）
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    /// `git` 是否可用
    pub fn available() -> bool {
        Command::new("git")
            .arg("--version")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    fn command(&self, dir: &Path) -> Command {
        let mut cmd = Command::new("git");
        cmd.arg("-C").arg(dir);
        cmd.envs(self.envs.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        cmd
    }

    fn run(&self, dir: &Path, args: &[&str]) -> Result<Output> {
        tracing::debug!(dir = %dir.display(), ?args, "git");
        let output = self
            .command(dir)
            .args(args)
            .output()
            .with_context(|| format!("无法执行 git {}", args.join(" ")))?;

        if !output.status.success() {
            bail!(
                "git {} 失败: {}",
                args.join(" "),
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        Ok(output)
    }

    /// 读取配置项；未设置或为空时返回 false
    fn has_config(&self, dir: &Path, key: &str) -> bool {
        self.command(dir)
            .args(["config", key])
            .output()
            .map(|o| o.status.success() && !String::from_utf8_lossy(&o.stdout).trim().is_empty())
            .unwrap_or(false)
    }
}

impl VersionControl for GitCli {
    fn init(&self, dir: &Path) -> Result<()> {
        self.run(dir, &["init", "--quiet"])?;
        Ok(())
    }

    fn add_all(&self, dir: &Path) -> Result<()> {
        self.run(dir, &["add", "--all"])?;
        Ok(())
    }

    fn commit(&self, dir: &Path, message: &str) -> Result<()> {
        let mut overrides = Vec::new();
        if !self.has_config(dir, "user.name") {
            overrides.push(format!("user.name={}", FALLBACK_NAME));
        }
        if !self.has_config(dir, "user.email") {
            overrides.push(format!("user.email={}", FALLBACK_EMAIL));
        }
        if !overrides.is_empty() {
            tracing::info!(?overrides, "git 用户信息不完整，使用默认身份补齐");
        }

        let mut args: Vec<&str> = Vec::new();
        for o in &overrides {
            args.push("-c");
            args.push(o);
        }
        args.extend(["commit", "--quiet", "-m", message]);
        self.run(dir, &args)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn git_stdout(git: &GitCli, dir: &Path, args: &[&str]) -> String {
        let out = git.run(dir, args).unwrap();
        String::from_utf8_lossy(&out.stdout).trim().to_string()
    }

    /// 隔离全局/系统配置，只读取 `global` 指向的文件
    fn isolated_git(global: &Path) -> GitCli {
        GitCli::new()
            .with_env("GIT_CONFIG_GLOBAL", global.display().to_string())
            .with_env("GIT_CONFIG_NOSYSTEM", "1")
    }

    /// 进程环境中的作者变量会覆盖配置，此时无法验证身份补齐
    fn author_env_set() -> bool {
        ["GIT_AUTHOR_NAME", "GIT_AUTHOR_EMAIL", "EMAIL"]
            .iter()
            .any(|k| std::env::var_os(k).is_some())
    }

    fn commit_one_file(git: &GitCli, dir: &Path) {
        fs::write(dir.join("a.txt"), "a").unwrap();
        git.init(dir).unwrap();
        git.add_all(dir).unwrap();
        git.commit(dir, "first").unwrap();
    }

    #[test]
    fn init_add_commit() {
        if !GitCli::available() {
            eprintln!("跳过: 未找到 git");
            return;
        }
        let tmp = TempDir::new().unwrap();
        let git = GitCli::new();
        commit_one_file(&git, tmp.path());

        assert_eq!(git_stdout(&git, tmp.path(), &["rev-list", "--count", "HEAD"]), "1");
        assert_eq!(git_stdout(&git, tmp.path(), &["log", "-1", "--format=%s"]), "first");
        assert_eq!(git_stdout(&git, tmp.path(), &["ls-files"]), "a.txt");
    }

    #[test]
    fn commit_without_identity_uses_fallback() {
        if !GitCli::available() || author_env_set() {
            eprintln!("跳过: 未找到 git 或设置了作者环境变量");
            return;
        }
        let tmp = TempDir::new().unwrap();
        let global = tmp.path().join("gitconfig");
        fs::write(&global, "").unwrap();
        let repo = tmp.path().join("repo");
        fs::create_dir(&repo).unwrap();
        let git = isolated_git(&global);

        commit_one_file(&git, &repo);

        assert_eq!(
            git_stdout(&git, &repo, &["log", "-1", "--format=%an <%ae>"]),
            "mmgr <mmgr@localhost>"
        );
    }

    #[test]
    fn commit_with_email_only_fills_in_name() {
        if !GitCli::available() || author_env_set() {
            eprintln!("跳过: 未找到 git 或设置了作者环境变量");
            return;
        }
        let tmp = TempDir::new().unwrap();
        let global = tmp.path().join("gitconfig");
        fs::write(&global, "[user]\n\temail = me@example.com\n").unwrap();
        let repo = tmp.path().join("repo");
        fs::create_dir(&repo).unwrap();
        let git = isolated_git(&global);

        commit_one_file(&git, &repo);

        assert_eq!(
            git_stdout(&git, &repo, &["log", "-1", "--format=%an <%ae>"]),
            "mmgr <me@example.com>"
        );
    }

    #[test]
    fn failing_command_reports_stderr() {
        if !GitCli::available() {
            eprintln!("跳过: 未找到 git");
            return;
        }
        let tmp = TempDir::new().unwrap();
        let err = GitCli::new().commit(tmp.path(), "nothing here").unwrap_err();
        assert!(err.to_string().contains("git"));
    }
}
