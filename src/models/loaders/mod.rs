pub mod submission_loader;
pub mod toml_loader;

pub use submission_loader::{
    load_all_submissions, load_json_to_submission, SubmissionFile, REPORT_FILE_SUFFIX,
};
pub use toml_loader::{load_all_toml_templates, load_toml_to_exam_template};
