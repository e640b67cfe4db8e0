use crate::models::ExamTemplate;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

/// 从 TOML 文件加载试卷模板
///
/// 反序列化时会完成模板校验，权重非法或题目 ID 重复都会在这里报错。
pub async fn load_toml_to_exam_template(toml_file_path: &Path) -> Result<ExamTemplate> {
    let content = fs::read_to_string(toml_file_path)
        .await
        .with_context(|| format!("无法读取TOML文件: {}", toml_file_path.display()))?;

    let template: ExamTemplate = toml::from_str(&content)
        .with_context(|| format!("无法解析TOML文件: {}", toml_file_path.display()))?;

    Ok(template)
}

/// 从文件夹中加载所有 TOML 模板
///
/// 单个文件失败只记录警告并跳过，文件夹不存在则报错。
pub async fn load_all_toml_templates(folder_path: &str) -> Result<Vec<ExamTemplate>> {
    let folder = PathBuf::from(folder_path);

    if !folder.exists() {
        anyhow::bail!("文件夹不存在: {}", folder_path);
    }

    let mut paths = Vec::new();
    let mut entries = fs::read_dir(&folder)
        .await
        .with_context(|| format!("无法读取文件夹: {}", folder_path))?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) == Some("toml") {
            paths.push(path);
        }
    }
    // read_dir 顺序不稳定
    paths.sort();

    let mut templates = Vec::new();
    for path in paths {
        tracing::info!(
            "正在加载模板: {}",
            path.file_name().unwrap_or_default().to_string_lossy()
        );

        match load_toml_to_exam_template(&path).await {
            Ok(template) => {
                tracing::info!(
                    "成功加载试卷 {}（{}），共 {} 题",
                    template.exam_id(),
                    template.name(),
                    template.question_count()
                );
                templates.push(template);
            }
            Err(e) => {
                tracing::warn!("加载模板失败 {}: {:#}", path.display(), e);
            }
        }
    }

    Ok(templates)
}
