//! 对象存储桶协作方

use anyhow::Result;

use crate::config::InitOptions;

pub trait BucketProvisioner {
    fn provision(&self, bucket: &str, options: &InitOptions) -> Result<()>;
}

/// 占位实现：只记录日志，不访问任何存储服务
#[derive(Debug, Default, Clone, Copy)]
pub struct StubBucketProvisioner;

impl BucketProvisioner for StubBucketProvisioner {
    fn provision(&self, bucket: &str, _options: &InitOptions) -> Result<()> {
        // TODO: 读取凭据、检查同名桶、创建并配置桶，需要先选定存储服务的客户端库
        tracing::warn!(bucket, "存储桶创建尚未实现，已跳过");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stub_never_fails() {
        StubBucketProvisioner.provision("myapp", &InitOptions::default()).unwrap();
    }
}
