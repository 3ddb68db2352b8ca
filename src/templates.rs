//! 模板注册表与内置模板生成器
//! - `Generator`：把一个模板写出到目标目录
//! - `TemplateRegistry`：模板标识到生成器的映射，由调用方注入初始化流程
//! - `EmbeddedTemplate`：编译期内嵌的模板，`.tera` 文件经渲染后去掉后缀写出

use anyhow::{bail, Context, Result};
use chrono::Datelike;
use include_dir::{include_dir, Dir};
use std::{
    collections::BTreeMap,
    fs,
    path::Path,
};
use tera::{Context as TContext, Tera};

use crate::config::{InitOptions, TemplateManifest};

// 内置模板（每个子目录一个模板）
static TEMPLATES_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/templates");

const MANIFEST_FILE: &str = "template.yaml";
const RENDER_SUFFIX: &str = "tera";

/// 模板生成器：负责在目标目录中写出全部文件
pub trait Generator {
    fn description(&self) -> &str {
        ""
    }

    fn generate(&self, target: &Path, options: &InitOptions) -> Result<()>;
}

/// 模板标识到生成器的映射
#[derive(Default)]
pub struct TemplateRegistry {
    generators: BTreeMap<String, Box<dyn Generator>>,
}

impl TemplateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 加载全部内置模板
    pub fn builtin() -> Result<Self> {
        let mut registry = Self::new();
        for dir in TEMPLATES_DIR.dirs() {
            let template = EmbeddedTemplate::load(dir)?;
            tracing::debug!(template = %template.name, "注册内置模板");
            registry.register(template.name.clone(), template);
        }
        Ok(registry)
    }

    /// 注册生成器；同名时覆盖旧的
    pub fn register<G: Generator + 'static>(&mut self, id: impl Into<String>, generator: G) {
        self.generators.insert(id.into(), Box::new(generator));
    }

    pub fn get(&self, id: &str) -> Option<&dyn Generator> {
        self.generators.get(id).map(|g| g.as_ref())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.generators.contains_key(id)
    }

    /// 按标识排序遍历
    pub fn iter(&self) -> impl Iterator<Item = (&str, &dyn Generator)> {
        self.generators.iter().map(|(id, g)| (id.as_str(), g.as_ref()))
    }
}

/// 内嵌在二进制中的模板目录
pub struct EmbeddedTemplate {
    name: String,
    description: String,
    root: &'static Dir<'static>,
}

impl EmbeddedTemplate {
    fn load(root: &'static Dir<'static>) -> Result<Self> {
        let dir_name = root
            .path()
            .file_name()
            .and_then(|s| s.to_str())
            .with_context(|| format!("模板目录名无效: {}", root.path().display()))?;
        let manifest_path = root.path().join(MANIFEST_FILE);
        let text = root
            .get_file(&manifest_path)
            .and_then(|f| f.contents_utf8())
            .with_context(|| format!("缺少模板清单: {}", manifest_path.display()))?;
        let manifest = TemplateManifest::parse(text)
            .with_context(|| format!("模板清单无效: {}", manifest_path.display()))?;
        if manifest.name != dir_name {
            bail!("模板清单名称 {} 与目录 {} 不一致", manifest.name, dir_name);
        }
        Ok(Self { name: manifest.name, description: manifest.description, root })
    }

    fn write_dir(&self, dir: &Dir<'_>, target: &Path, ctx: &TContext) -> Result<()> {
        for file in dir.files() {
            let rel = file.path().strip_prefix(self.root.path())?;
            if rel == Path::new(MANIFEST_FILE) {
                continue;
            }
            let render = rel.extension().is_some_and(|ext| ext == RENDER_SUFFIX);
            let out_path = if render { target.join(rel.with_extension("")) } else { target.join(rel) };
            if let Some(parent) = out_path.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("创建目录失败: {}", parent.display()))?;
            }

            let written = if render {
                let source = file
                    .contents_utf8()
                    .with_context(|| format!("模板文件不是 UTF-8: {}", rel.display()))?;
                let rendered = Tera::one_off(source, ctx, false)
                    .with_context(|| format!("渲染模板失败: {}", rel.display()))?;
                fs::write(&out_path, rendered)
            } else {
                fs::write(&out_path, file.contents())
            };
            written.with_context(|| format!("写出模板文件失败: {}", out_path.display()))?;
            tracing::debug!(path = %out_path.display(), "写入");
        }
        for sub in dir.dirs() {
            self.write_dir(sub, target, ctx)?;
        }
        Ok(())
    }
}

impl Generator for EmbeddedTemplate {
    fn description(&self) -> &str {
        &self.description
    }

    fn generate(&self, target: &Path, options: &InitOptions) -> Result<()> {
        fs::create_dir_all(target)
            .with_context(|| format!("创建项目目录失败: {}", target.display()))?;
        let ctx = render_context(target, options)?;
        self.write_dir(self.root, target, &ctx)
    }
}

/// 渲染上下文：选项本身加上项目名、模板标识与年份
fn render_context(target: &Path, options: &InitOptions) -> Result<TContext> {
    let project_name = target
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| target.display().to_string());
    let mut ctx = TContext::from_serialize(options).context("构建渲染上下文失败")?;
    ctx.insert("project_name", &project_name);
    ctx.insert("template", options.template_id());
    ctx.insert("year", &chrono::Local::now().year());
    Ok(ctx)
}
