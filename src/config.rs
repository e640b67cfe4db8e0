use crate::error::ConfigError;

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 额外试卷模板（TOML）目录
    pub template_folder: String,
    /// 学生作答（JSON）目录
    pub submission_folder: String,
    /// 评估报告输出目录
    pub report_folder: String,
    /// 同时进行的评估数量
    pub max_concurrent_analyses: usize,
    /// 是否生成 AI 分析
    pub enable_ai_analysis: bool,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
    // --- LLM 配置 ---
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
    pub llm_temperature: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            template_folder: "exam_templates".to_string(),
            submission_folder: "submissions".to_string(),
            report_folder: "reports".to_string(),
            max_concurrent_analyses: 4,
            enable_ai_analysis: true,
            verbose_logging: false,
            output_log_file: "assessment_log.txt".to_string(),
            llm_api_key: String::new(),
            llm_api_base_url: "https://api.openai.com/v1".to_string(),
            llm_model_name: "gpt-4o-mini".to_string(),
            llm_temperature: 0.3,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            template_folder: env_or("TEMPLATE_FOLDER", default.template_folder),
            submission_folder: env_or("SUBMISSION_FOLDER", default.submission_folder),
            report_folder: env_or("REPORT_FOLDER", default.report_folder),
            max_concurrent_analyses: env_parse_or(
                "MAX_CONCURRENT_ANALYSES",
                default.max_concurrent_analyses,
            ),
            enable_ai_analysis: env_parse_or("ENABLE_AI_ANALYSIS", default.enable_ai_analysis),
            verbose_logging: env_parse_or("VERBOSE_LOGGING", default.verbose_logging),
            output_log_file: env_or("OUTPUT_LOG_FILE", default.output_log_file),
            llm_api_key: env_or("LLM_API_KEY", default.llm_api_key),
            llm_api_base_url: env_or("LLM_API_BASE_URL", default.llm_api_base_url),
            llm_model_name: env_or("LLM_MODEL_NAME", default.llm_model_name),
            llm_temperature: env_parse_or("LLM_TEMPERATURE", default.llm_temperature),
        }
    }

    /// 检查配置是否可用
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_concurrent_analyses == 0 {
            return Err(ConfigError::InvalidValue {
                var_name: "MAX_CONCURRENT_ANALYSES".to_string(),
                reason: "must be greater than 0".to_string(),
            });
        }
        if !(0.0..=2.0).contains(&self.llm_temperature) {
            return Err(ConfigError::InvalidValue {
                var_name: "LLM_TEMPERATURE".to_string(),
                reason: format!("must be within [0.0, 2.0], got {}", self.llm_temperature),
            });
        }
        Ok(())
    }

    /// 开关打开且配置了 API key 时才生成 AI 分析
    pub fn analysis_enabled(&self) -> bool {
        self.enable_ai_analysis && !self.llm_api_key.trim().is_empty()
    }
}

fn env_or(var_name: &str, default: String) -> String {
    std::env::var(var_name).unwrap_or(default)
}

/// 无法解析时使用默认值
fn env_parse_or<T: std::str::FromStr>(var_name: &str, default: T) -> T {
    std::env::var(var_name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
