//! 项目初始化流程：
//! - 解析目标目录（未提供时交互询问），检查目录可用
//! - 按模板生成站点骨架
//! - 可选：初始化 git 仓库并提交；可选：创建存储桶
//! 任一步失败立即终止，后续步骤不再执行。

use std::{
    fs,
    io::{self, BufRead, Write},
    path::{Path, PathBuf},
};

use crate::{
    config::{gitignore_contents, InitOptions, COMMIT_MESSAGE, PLACEHOLDER_REMOTE},
    console::Console,
    error::FatalError,
    storage::BucketProvisioner,
    templates::TemplateRegistry,
    vcs::VersionControl,
};

/// 目录可用：不存在，或是没有任何条目的目录（隐藏文件也算条目）
pub fn is_available(dir: &Path) -> io::Result<bool> {
    match fs::metadata(dir) {
        Ok(meta) => Ok(meta.is_dir() && fs::read_dir(dir)?.next().is_none()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(true),
        Err(e) => Err(e),
    }
}

/// 初始化编排器，所有协作方在构造时注入
pub struct Initializer<'a, R, W, E> {
    console: Console<R, W, E>,
    templates: &'a TemplateRegistry,
    vcs: &'a dyn VersionControl,
    storage: &'a dyn BucketProvisioner,
}

impl<'a, R: BufRead, W: Write, E: Write> Initializer<'a, R, W, E> {
    pub fn new(
        console: Console<R, W, E>,
        templates: &'a TemplateRegistry,
        vcs: &'a dyn VersionControl,
        storage: &'a dyn BucketProvisioner,
    ) -> Self {
        Self { console, templates, vcs, storage }
    }

    pub fn console(&self) -> &Console<R, W, E> {
        &self.console
    }

    /// 执行一次初始化；失败时先以 ERR 标签输出错误再返回
    pub fn initialize(
        &mut self,
        target: Option<&Path>,
        options: &InitOptions,
    ) -> Result<PathBuf, FatalError> {
        self.run(target, options).map_err(|err| self.console.crash(err))
    }

    fn run(&mut self, target: Option<&Path>, options: &InitOptions) -> Result<PathBuf, FatalError> {
        let dir = match target {
            Some(p) => p.to_path_buf(),
            None => self.ask_for_project_name()?,
        };
        tracing::info!(dir = %dir.display(), ?options, "开始初始化");

        if !is_available(&dir)? {
            return Err(FatalError::DirectoryNotEmpty { path: dir });
        }

        self.generate_site(&dir, options)?;

        if options.create_version_control {
            self.init_version_control(&dir)?;
        } else {
            self.ask_about_version_control()?;
        }

        if options.create_storage_bucket {
            self.init_storage(&dir, options)?;
        } else {
            self.ask_about_storage()?;
        }

        self.console.message(&format!("site created at {}", shown(&dir)))?;
        Ok(dir)
    }

    fn ask_for_project_name(&mut self) -> Result<PathBuf, FatalError> {
        let answer = self
            .console
            .ask("What directory do you want to create your project in?", "")?;
        let name = answer.trim();
        if name.is_empty() {
            return Err(FatalError::EmptyProjectName);
        }
        Ok(PathBuf::from(name))
    }

    fn generate_site(&mut self, dir: &Path, options: &InitOptions) -> Result<(), FatalError> {
        let id = options.template_id();
        self.console.message(&format!("creating a site at {}", shown(dir)))?;
        self.console
            .message(&format!("doing: init {} --template={}", dir.display(), id))?;

        // 查找必须先于任何写入
        let templates = self.templates;
        let generator = templates
            .get(id)
            .ok_or_else(|| FatalError::UnknownTemplate(id.to_string()))?;
        generator.generate(dir, options)?;

        self.console.message("template: DONE!")?;
        Ok(())
    }

    fn init_version_control(&mut self, dir: &Path) -> Result<(), FatalError> {
        self.console
            .message(&format!("initializing git at {}", dir.display()))?;
        self.vcs.init(dir)?;
        fs::write(dir.join(".gitignore"), gitignore_contents())?;
        self.vcs.add_all(dir)?;
        self.vcs.commit(dir, COMMIT_MESSAGE)?;

        // TODO: 创建 GitHub 仓库、添加 origin 远端并推送；目前只输出占位地址
        self.console
            .message(&format!("pushed to {}.", PLACEHOLDER_REMOTE))?;
        Ok(())
    }

    // TODO: 肯定回答尚未接到 init_version_control / init_storage，
    // 只做确认输出，待明确是否应在交互中补做这两步
    fn ask_about_version_control(&mut self) -> Result<(), FatalError> {
        if self.console.confirm("would you like to set up a github project?")? {
            self.console.message("setting up a github project.")?;
        }
        Ok(())
    }

    fn init_storage(&mut self, dir: &Path, options: &InitOptions) -> Result<(), FatalError> {
        let bucket = bucket_name(dir);
        self.console
            .message(&format!("initializing s3 bucket: {}", bucket))?;
        self.storage.provision(&bucket, options)?;
        Ok(())
    }

    fn ask_about_storage(&mut self) -> Result<(), FatalError> {
        if self.console.confirm("would you like to set up an s3 bucket?")? {
            self.console.message("setting up an s3 bucket.")?;
        }
        Ok(())
    }
}

/// 相对路径显示为 `./dir`，绝对路径原样显示
fn shown(dir: &Path) -> String {
    if dir.is_relative() {
        format!("./{}", dir.display())
    } else {
        dir.display().to_string()
    }
}

/// 以目录名作为存储桶名
fn bucket_name(dir: &Path) -> String {
    dir.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| dir.display().to_string())
}
