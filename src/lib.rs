//! # Question Admin
//!
//! 题库管理后台：新建、查看、编辑、删除远程题库服务中的选择题
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Clients）
//! - `clients/` - 题库服务 HTTP 客户端
//! - `QuestionApi` - list / create / update / delete 四个能力
//! - `QuestionClient` - 基于 reqwest 的实现
//!
//! ### ② 模型层（Models）
//! - `Question` - 题目（恰好 4 个选项 + 正确答案索引）
//! - `Difficulty` / `CorrectAnswer`
//!
//! ### ③ 组件层（Components）
//! - `QuestionForm` - 草稿编辑与提交
//! - `QuestionList` - 拉取、编辑、删除
//! - `Dashboard` - 视图状态机（Add { editing } / List）
//!
//! ### ④ 应用层（App）
//! - `app` - 控制台主循环与命令解析
//! - `render` - 文本渲染
//!
//! ## 已知限制
//!
//! 没有乐观并发控制：两个会话同时编辑同一道题时，后写入者覆盖先写入者。

pub mod app;
pub mod clients;
pub mod components;
pub mod config;
pub mod error;
pub mod models;
pub mod render;
pub mod utils;

// 重新导出常用类型
pub use app::App;
pub use clients::{QuestionApi, QuestionClient};
pub use components::{Dashboard, QuestionForm, QuestionList, ViewState};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{Difficulty, Question};
