use crate::models::ExamSubmission;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

/// 评估报告的文件名后缀，加载作答时跳过
pub const REPORT_FILE_SUFFIX: &str = ".report.json";

/// 待评分的提交及其来源文件
#[derive(Debug, Clone)]
pub struct SubmissionFile {
    pub path: PathBuf,
    pub submission: ExamSubmission,
}

impl SubmissionFile {
    /// 文件名去掉扩展名，用作报告文件名
    pub fn stem(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "submission".to_string())
    }

    /// 对应的报告文件名
    pub fn report_file_name(&self) -> String {
        format!("{}{}", self.stem(), REPORT_FILE_SUFFIX)
    }
}

/// 从 JSON 文件加载一份提交
pub async fn load_json_to_submission(json_file_path: &Path) -> Result<ExamSubmission> {
    let content = fs::read_to_string(json_file_path)
        .await
        .with_context(|| format!("无法读取JSON文件: {}", json_file_path.display()))?;

    let submission: ExamSubmission = serde_json::from_str(&content)
        .with_context(|| format!("无法解析JSON文件: {}", json_file_path.display()))?;

    Ok(submission)
}

/// 从文件夹中加载所有 JSON 提交，失败的文件记录警告后跳过
pub async fn load_all_submissions(folder_path: &str) -> Result<Vec<SubmissionFile>> {
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
        if is_report_file(&path) {
            tracing::debug!("跳过报告文件: {}", path.display());
            continue;
        }
        if path.extension().and_then(|s| s.to_str()) == Some("json") {
            paths.push(path);
        }
    }
    paths.sort();

    let mut submissions = Vec::new();
    for path in paths {
        match load_json_to_submission(&path).await {
            Ok(submission) => {
                tracing::debug!(
                    "加载提交: {} ({} / {}，{} 题作答)",
                    path.display(),
                    submission.student_name,
                    submission.exam_id,
                    submission.results.len()
                );
                submissions.push(SubmissionFile { path, submission });
            }
            Err(e) => {
                tracing::warn!("加载提交失败 {}: {:#}", path.display(), e);
            }
        }
    }

    Ok(submissions)
}

fn is_report_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .is_some_and(|name| name.ends_with(REPORT_FILE_SUFFIX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load_all_submissions_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("b.json"),
            r#"{"student_name": "小華", "exam_id": "grade5_entrance", "results": []}"#,
        )
        .unwrap();
        std::fs::write(
            dir.path().join("a.json"),
            r#"{"student_name": "小明", "exam_id": "grade5_entrance",
                "results": [{"question_id": "1-1", "score": 1.0}]}"#,
        )
        .unwrap();
        std::fs::write(dir.path().join("broken.json"), "{not json").unwrap();
        std::fs::write(dir.path().join("readme.md"), "# ignored").unwrap();

        let folder = dir.path().to_string_lossy().to_string();
        let files = load_all_submissions(&folder).await.unwrap();

        let names: Vec<&str> = files.iter().map(|f| f.submission.student_name.as_str()).collect();
        assert_eq!(names, vec!["小明", "小華"]);
        assert_eq!(files[0].stem(), "a");
        assert_eq!(files[0].submission.results.len(), 1);
        assert_eq!(files[0].report_file_name(), "a.report.json");
    }

    #[tokio::test]
    async fn test_report_files_are_not_loaded() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("alice.json"),
            r#"{"student_name": "Alice", "exam_id": "grade5_entrance"}"#,
        )
        .unwrap();
        std::fs::write(
            dir.path().join("alice.report.json"),
            r#"{"student_name": "Alice", "exam_id": "grade5_entrance",
                "assessment": {}, "ai_analysis": null,
                "generated_at": "2026-01-01T00:00:00+08:00"}"#,
        )
        .unwrap();

        let folder = dir.path().to_string_lossy().to_string();
        let files = load_all_submissions(&folder).await.unwrap();

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].stem(), "alice");
    }
}
