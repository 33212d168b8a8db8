//! 框架统一错误类型：最小化枚举，避免依赖第三方错误栈，实现简单直接。
use std::{error::Error as StdError, fmt};

#[derive(Debug)]
pub enum AppframeError {
    DuplicateExtension(&'static str), // 同名扩展重复绑定（每次装配仅允许一次）
    ExtensionFailed {
        // 扩展注册失败：anyhow 接缝，原始错误原样携带
        name: &'static str,
        source: anyhow::Error,
    },
    InvalidConfig(String),  // 配置对象/文件不是 JSON object
    MissingSetting(String), // 访问缺失配置项（仅在访问时出现，装配阶段不校验）
    InvalidSetting { key: String, reason: String },
    UnknownHelper(String),
}

impl fmt::Display for AppframeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppframeError::DuplicateExtension(name) => {
                write!(f, "extension already bound: {name}")
            }
            AppframeError::ExtensionFailed { name, source } => {
                write!(f, "extension {name} failed to register: {source}")
            }
            AppframeError::InvalidConfig(msg) => write!(f, "invalid configuration: {msg}"),
            AppframeError::MissingSetting(key) => write!(f, "missing setting: {key}"),
            AppframeError::InvalidSetting { key, reason } => {
                write!(f, "invalid setting {key}: {reason}")
            }
            AppframeError::UnknownHelper(name) => write!(f, "unknown helper: {name}"),
        }
    }
}
impl StdError for AppframeError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            AppframeError::ExtensionFailed { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

pub type Result<T = ()> = std::result::Result<T, AppframeError>;
