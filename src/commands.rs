//! 命令调度模块：
//! - 接收解析好的 CLI 参数，结合环境变量计算“有效参数”
//! - 组装模板注册表、git、存储桶协作方并调用初始化流程

use anyhow::Result;
use std::{
    io::{self, Write},
    process::ExitCode,
};

use crate::{
    cli::{Cli, Command},
    config::{InitOptions, DEFAULT_TEMPLATE},
    console::StdConsole,
    init::Initializer,
    storage::StubBucketProvisioner,
    templates::TemplateRegistry,
    utils::{bool_truthy, env_var, opt_string},
    vcs::GitCli,
};

/// 运行指定的子命令
pub fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Command::Init { gh, s3, template, dir } => {
            let options = effective_options(gh, s3, template, env_var);
            let templates = TemplateRegistry::builtin()?;
            let git = GitCli::default();
            let storage = StubBucketProvisioner;

            let mut initializer = Initializer::new(StdConsole::stdio(), &templates, &git, &storage);
            // 错误信息已由初始化流程以 ERR 标签输出
            match initializer.initialize(dir.as_deref(), &options) {
                Ok(path) => {
                    tracing::debug!(path = %path.display(), "初始化完成");
                    Ok(ExitCode::SUCCESS)
                }
                Err(err) => {
                    tracing::debug!(kind = ?err.kind(), "初始化失败");
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        Command::Templates => {
            let templates = TemplateRegistry::builtin()?;
            list_templates(&templates, &mut io::stdout().lock())?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// 每行一个模板：`标识[ (default)]<TAB>描述`
fn list_templates(templates: &TemplateRegistry, out: &mut impl Write) -> io::Result<()> {
    for (id, generator) in templates.iter() {
        let marker = if id == DEFAULT_TEMPLATE { " (default)" } else { "" };
        writeln!(out, "{}{}\t{}", id, marker, generator.description())?;
    }
    Ok(())
}

/// CLI 优先，其次环境变量 MMGR_GH / MMGR_S3 / MMGR_TEMPLATE
fn effective_options(
    gh: bool,
    s3: bool,
    template: Option<String>,
    env: impl Fn(&str) -> Option<String>,
) -> InitOptions {
    InitOptions {
        create_version_control: gh || bool_truthy(env("MMGR_GH")).unwrap_or(false),
        create_storage_bucket: s3 || bool_truthy(env("MMGR_S3")).unwrap_or(false),
        template_name: template.or_else(|| opt_string(env("MMGR_TEMPLATE"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn cli_flags_win() {
        let env = env_of(&[("MMGR_GH", "0"), ("MMGR_S3", "off"), ("MMGR_TEMPLATE", "mbot-haml")]);
        let opts = effective_options(true, true, Some("plain-html".into()), env);
        assert!(opts.create_version_control);
        assert!(opts.create_storage_bucket);
        assert_eq!(opts.template_id(), "plain-html");
    }

    #[test]
    fn env_fills_in_missing_flags() {
        let env = env_of(&[("MMGR_GH", "yes"), ("MMGR_S3", "1"), ("MMGR_TEMPLATE", " plain-html ")]);
        let opts = effective_options(false, false, None, env);
        assert!(opts.create_version_control);
        assert!(opts.create_storage_bucket);
        assert_eq!(opts.template_name.as_deref(), Some("plain-html"));
    }

    #[test]
    fn falsy_or_blank_env_values_are_ignored() {
        let env = env_of(&[("MMGR_GH", "false"), ("MMGR_S3", "maybe"), ("MMGR_TEMPLATE", "   ")]);
        let opts = effective_options(false, false, None, env);
        assert_eq!(opts, InitOptions::default());
        assert_eq!(opts.template_id(), DEFAULT_TEMPLATE);
    }

    #[test]
    fn no_env_means_defaults() {
        let opts = effective_options(false, false, None, env_of(&[]));
        assert_eq!(opts, InitOptions::default());
    }

    #[test]
    fn templates_listing_marks_default() {
        let templates = TemplateRegistry::builtin().unwrap();
        let mut out = Vec::new();
        list_templates(&templates, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("mbot-haml (default)\t"));
        assert!(lines[1].starts_with("plain-html\t"));
        assert!(lines[1].len() > "plain-html\t".len());
    }
}
