//! 批量评估处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责批量作答的评估和资源管理。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：写日志文件头、注册试卷模板、创建 LLM 客户端
//! 2. **批量加载**：扫描并加载所有待评估的作答（`Vec<SubmissionFile>`）
//! 3. **并发控制**：使用 Semaphore 限制同时进行的评估数量
//! 4. **报告输出**：每份作答写一份 `<文件名>.report.json`
//! 5. **全局统计**：汇总成功、失败和 AI 分析失败的数量
//!
//! ## 设计特点
//!
//! - **顶层编排**：不处理单份作答的细节，委托 `AssessmentFlow`
//! - **资源所有者**：唯一持有注册表和文本生成器的模块

use crate::clients::{LlmClient, TextGenerator};
use crate::config::Config;
use crate::models::{
    load_all_submissions, load_all_toml_templates, AssessmentReport, ExamRegistry, SubmissionFile,
};
use crate::utils::logging;
use crate::workflow::AssessmentFlow;
use anyhow::{Context, Result};
use futures::future::join_all;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{error, info, warn};

/// 应用主结构
pub struct App {
    config: Config,
    flow: AssessmentFlow,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        config.validate()?;

        // 初始化日志文件
        logging::init_log_file(&config.output_log_file)?;

        let analysis_enabled = config.analysis_enabled();
        logging::log_startup(config.max_concurrent_analyses, analysis_enabled);

        let registry = build_registry(&config).await?;

        let generator: Option<Arc<dyn TextGenerator>> = if analysis_enabled {
            let client = LlmClient::new(&config);
            info!("🤖 LLM 模型: {}", client.model_name());
            Some(Arc::new(client))
        } else {
            None
        };

        Ok(Self::with_flow(
            config,
            AssessmentFlow::new(Arc::new(registry), generator),
        ))
    }

    /// 使用已组装好的流程创建应用
    pub fn with_flow(config: Config, flow: AssessmentFlow) -> Self {
        Self { config, flow }
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<ProcessingStats> {
        info!("\n📁 正在扫描待评估的作答...");
        let submissions = load_all_submissions(&self.config.submission_folder).await?;

        if submissions.is_empty() {
            warn!("⚠️ 没有找到待评估的JSON文件，程序结束");
            return Ok(ProcessingStats::default());
        }

        tokio::fs::create_dir_all(&self.config.report_folder)
            .await
            .with_context(|| format!("无法创建报告目录: {}", self.config.report_folder))?;

        logging::log_submissions_loaded(submissions.len(), self.config.max_concurrent_analyses);

        let stats = self.process_all(submissions).await?;

        logging::print_final_stats(
            stats.success,
            stats.failed,
            stats.analysis_failed,
            stats.total,
            &self.config.output_log_file,
        );

        Ok(stats)
    }

    /// 并发评估所有作答
    async fn process_all(&self, submissions: Vec<SubmissionFile>) -> Result<ProcessingStats> {
        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrent_analyses));
        let report_folder = PathBuf::from(&self.config.report_folder);
        let mut stats = ProcessingStats {
            total: submissions.len(),
            ..Default::default()
        };

        let mut handles = Vec::with_capacity(submissions.len());
        for (idx, file) in submissions.into_iter().enumerate() {
            let index = idx + 1;
            let permit = semaphore.clone().acquire_owned().await?;
            let flow = self.flow.clone();
            let report_folder = report_folder.clone();

            let handle = tokio::spawn(async move {
                let _permit = permit;
                process_submission(&flow, &file, &report_folder, index).await
            });
            handles.push((index, handle));
        }

        let (indices, handles): (Vec<usize>, Vec<_>) = handles.into_iter().unzip();
        for (index, joined) in indices.into_iter().zip(join_all(handles).await) {
            match joined {
                Ok(Ok(report)) => {
                    stats.success += 1;
                    if report.analysis_error.is_some() {
                        stats.analysis_failed += 1;
                    }
                }
                Ok(Err(e)) => {
                    error!("[作答 {}] ❌ 评估失败: {:#}", index, e);
                    stats.failed += 1;
                }
                Err(e) => {
                    error!("[作答 {}] 任务执行失败: {}", index, e);
                    stats.failed += 1;
                }
            }
        }

        Ok(stats)
    }
}

/// 处理统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ProcessingStats {
    pub success: usize,
    pub failed: usize,
    /// 报告已写出，但 AI 分析失败
    pub analysis_failed: usize,
    pub total: usize,
}

/// 注册内置试卷和目录中的 TOML 试卷
///
/// 模板目录不存在时只使用内置试卷；exam_id 冲突的模板跳过。
async fn build_registry(config: &Config) -> Result<ExamRegistry> {
    let mut registry = ExamRegistry::with_builtin()?;

    if Path::new(&config.template_folder).exists() {
        for template in load_all_toml_templates(&config.template_folder).await? {
            let exam_id = template.exam_id().to_string();
            if let Err(e) = registry.register(template) {
                warn!("⚠️ 跳过试卷模板 {}: {}", exam_id, e);
            }
        }
    } else {
        info!("📁 模板目录不存在，只使用内置试卷: {}", config.template_folder);
    }

    logging::log_registry_ready(&registry.list_ids());
    Ok(registry)
}

/// 评估单份作答并写出报告
async fn process_submission(
    flow: &AssessmentFlow,
    file: &SubmissionFile,
    report_folder: &Path,
    index: usize,
) -> Result<AssessmentReport> {
    info!(
        "[作答 {}] 📄 {} ({})",
        index,
        file.submission.student_name,
        file.path.display()
    );

    let report = flow.run(&file.submission).await?;

    let report_path = report_folder.join(file.report_file_name());
    let json = serde_json::to_string_pretty(&report).context("无法序列化评估报告")?;
    tokio::fs::write(&report_path, json)
        .await
        .with_context(|| format!("无法写入报告: {}", report_path.display()))?;

    info!("[作答 {}] ✓ 报告已写入 {}", index, report_path.display());
    Ok(report)
}
