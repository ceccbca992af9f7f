use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 题库服务调用错误
    #[error("API错误: {0}")]
    Api(#[from] ApiError),
    /// 表单校验错误
    #[error("校验错误: {0}")]
    Validation(#[from] ValidationError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 题库服务调用错误
#[derive(Debug, Error)]
pub enum ApiError {
    /// 网络不可达 / 连接失败
    #[error("网络请求失败 ({method} {endpoint}): {source}")]
    Transport {
        method: String,
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    /// 服务返回 404
    #[error("资源不存在 ({endpoint}), id={id:?}")]
    NotFound { endpoint: String, id: Option<String> },
    /// 服务返回非 2xx 状态码
    #[error("服务返回错误状态 ({endpoint}): status={status}, body={body}")]
    Service {
        endpoint: String,
        status: u16,
        body: String,
    },
    /// 响应体不是合法 JSON
    #[error("JSON解析失败 ({endpoint}): {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}

/// 表单校验错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// 正确答案索引超出选项范围
    #[error("正确答案索引 {index} 超出范围 [0, {max_index}]")]
    CorrectAnswerOutOfRange { index: i64, max_index: usize },
    /// 选项位置超出范围
    #[error("选项位置 {index} 超出范围 [0, {max_index}]")]
    OptionIndex { index: usize, max_index: usize },
    /// 无法解析的数字输入
    #[error("无法解析数字: '{input}'")]
    NotANumber { input: String },
    /// 无法识别的难度
    #[error("无法识别的难度: '{input}' (可选 easy / medium / hard)")]
    UnknownDifficulty { input: String },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 基础地址不是合法 URL
    #[error("API 基础地址无效: '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    /// 读取配置文件失败
    #[error("读取配置文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    /// 创建 HTTP 客户端失败
    #[error("创建 HTTP 客户端失败: {0}")]
    HttpClient(#[source] reqwest::Error),
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建网络请求失败错误
    pub fn transport(method: impl Into<String>, endpoint: impl Into<String>, source: reqwest::Error) -> Self {
        AppError::Api(ApiError::Transport {
            method: method.into(),
            endpoint: endpoint.into(),
            source,
        })
    }

    /// 创建 JSON 解析失败错误
    pub fn decode(endpoint: impl Into<String>, source: serde_json::Error) -> Self {
        AppError::Api(ApiError::Decode {
            endpoint: endpoint.into(),
            source,
        })
    }

    /// 是否为 404
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::Api(ApiError::NotFound { .. }))
    }

    /// 是否为校验错误（未发出任何请求）
    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::Validation(_))
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
