//! 组件层
//!
//! ```text
//! Dashboard (ViewState: Add { editing } | List)
//!     ├── QuestionForm  (草稿 + 提交)
//!     └── QuestionList  (拉取 + 编辑 + 删除)
//!             ↓
//! clients::QuestionApi
//! ```

pub mod dashboard;
pub mod form;
pub mod lifecycle;
pub mod list;

pub use dashboard::{Dashboard, Mounted, ViewState};
pub use form::{FormField, FormView, PendingSubmit, QuestionForm, SubmitOutcome};
pub use lifecycle::{Confirm, LoadHandle};
pub use list::{
    DeleteOutcome, FetchOutcome, ListView, OptionRow, QuestionList, QuestionRow, DELETE_PROMPT,
    PLACEHOLDER_ROWS,
};
