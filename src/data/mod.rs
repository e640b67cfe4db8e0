//! 内置试卷数据

pub mod grade5_entrance;

pub use grade5_entrance::{grade5_entrance_template, GRADE5_ENTRANCE_EXAM_ID};
