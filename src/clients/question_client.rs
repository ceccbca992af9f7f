/// 题库服务客户端
///
/// 把 list / create / update / delete 四个操作映射为对 `/questions` 资源的 HTTP 调用
use crate::config::Config;
use crate::error::{ApiError, AppError, AppResult, ConfigError};
use crate::models::Question;
use futures::future::BoxFuture;
use reqwest::{Client, Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

/// 资源路径
pub const QUESTIONS_PATH: &str = "questions";

/// 题库服务能力
///
/// 组件只依赖这个 trait，测试时可以替换为内存实现
pub trait QuestionApi: Send + Sync {
    /// 获取全部题目，顺序与服务端返回一致
    fn list(&self) -> BoxFuture<'_, AppResult<Vec<Question>>>;

    /// 创建题目，返回带 id 的记录
    fn create<'a>(&'a self, question: &'a Question) -> BoxFuture<'a, AppResult<Question>>;

    /// 更新题目
    fn update<'a>(&'a self, id: &'a str, question: &'a Question) -> BoxFuture<'a, AppResult<Question>>;

    /// 删除题目，返回服务端的确认内容
    fn delete<'a>(&'a self, id: &'a str) -> BoxFuture<'a, AppResult<Value>>;
}

/// 基于 reqwest 的题库客户端
#[derive(Debug, Clone)]
pub struct QuestionClient {
    http: Client,
    collection_url: Url,
}

impl QuestionClient {
    /// 创建新的题库客户端
    pub fn new(config: &Config) -> AppResult<Self> {
        let http = Client::builder().build().map_err(ConfigError::HttpClient)?;
        Self::with_client(http, &config.api_base_url)
    }

    /// 使用已有的 reqwest::Client
    pub fn with_client(http: Client, base_url: &str) -> AppResult<Self> {
        let collection_url = collection_url(base_url)?;
        Ok(Self { http, collection_url })
    }

    /// `{base}/questions`
    pub fn collection_url(&self) -> &Url {
        &self.collection_url
    }

    /// `{base}/questions/{id}`，id 作为单独的路径段转义
    pub fn item_url(&self, id: &str) -> Url {
        let mut url = self.collection_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push(id);
        }
        url
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        url: Url,
        body: Option<&Question>,
        id: Option<&str>,
    ) -> AppResult<T> {
        let method_name = method.as_str().to_string();
        let endpoint = url.to_string();
        debug!("➡️ {} {}", method_name, endpoint);

        let mut request = self.http.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            warn!("⚠️ {} {} 网络请求失败: {}", method_name, endpoint, e);
            AppError::transport(method_name.clone(), endpoint.clone(), e)
        })?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| AppError::transport(method_name.clone(), endpoint.clone(), e))?;

        if !status.is_success() {
            warn!("⚠️ {} {} 返回状态 {}", method_name, endpoint, status);
            return Err(status_error(status, endpoint, id, &bytes).into());
        }

        debug!("⬅️ {} {} -> {} ({} 字节)", method_name, endpoint, status, bytes.len());

        // DELETE 可能返回空响应体
        let payload: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
            b"null"
        } else {
            &bytes
        };
        serde_json::from_slice(payload).map_err(|e| AppError::decode(endpoint, e))
    }
}

impl QuestionApi for QuestionClient {
    fn list(&self) -> BoxFuture<'_, AppResult<Vec<Question>>> {
        Box::pin(self.send::<Vec<Question>>(Method::GET, self.collection_url.clone(), None, None))
    }

    fn create<'a>(&'a self, question: &'a Question) -> BoxFuture<'a, AppResult<Question>> {
        Box::pin(self.send::<Question>(Method::POST, self.collection_url.clone(), Some(question), None))
    }

    fn update<'a>(&'a self, id: &'a str, question: &'a Question) -> BoxFuture<'a, AppResult<Question>> {
        Box::pin(self.send::<Question>(Method::PUT, self.item_url(id), Some(question), Some(id)))
    }

    fn delete<'a>(&'a self, id: &'a str) -> BoxFuture<'a, AppResult<Value>> {
        Box::pin(self.send::<Value>(Method::DELETE, self.item_url(id), None, Some(id)))
    }
}

// ========== 辅助函数 ==========

fn collection_url(base_url: &str) -> AppResult<Url> {
    let invalid = |reason: String| ConfigError::InvalidBaseUrl {
        url: base_url.to_string(),
        reason,
    };

    let mut url = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| invalid("不能作为基础路径".to_string()))?
        .pop_if_empty()
        .push(QUESTIONS_PATH);
    Ok(url)
}

fn status_error(status: StatusCode, endpoint: String, id: Option<&str>, body: &[u8]) -> ApiError {
    if status == StatusCode::NOT_FOUND {
        ApiError::NotFound {
            endpoint,
            id: id.map(str::to_string),
        }
    } else {
        ApiError::Service {
            endpoint,
            status: status.as_u16(),
            body: String::from_utf8_lossy(body).into_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> QuestionClient {
        QuestionClient::with_client(Client::new(), base).unwrap()
    }

    #[test]
    fn test_collection_url_handles_trailing_slash() {
        assert_eq!(
            client("https://example.com/api").collection_url().as_str(),
            "https://example.com/api/questions"
        );
        assert_eq!(
            client("https://example.com/api/").collection_url().as_str(),
            "https://example.com/api/questions"
        );
        assert_eq!(
            client("http://localhost:5000").collection_url().as_str(),
            "http://localhost:5000/questions"
        );
    }

    #[test]
    fn test_item_url_escapes_id() {
        let c = client("https://example.com/api");
        assert_eq!(c.item_url("q1").as_str(), "https://example.com/api/questions/q1");
        assert_eq!(
            c.item_url("a/b c").as_str(),
            "https://example.com/api/questions/a%2Fb%20c"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let err = QuestionClient::with_client(Client::new(), "not a url").unwrap_err();
        assert!(matches!(err, AppError::Config(ConfigError::InvalidBaseUrl { .. })));

        let err = QuestionClient::with_client(Client::new(), "mailto:admin@example.com").unwrap_err();
        assert!(matches!(err, AppError::Config(ConfigError::InvalidBaseUrl { .. })));
    }

    #[test]
    fn test_status_error_mapping() {
        let err = status_error(StatusCode::NOT_FOUND, "u".to_string(), Some("q9"), b"");
        assert!(matches!(err, ApiError::NotFound { id: Some(ref id), .. } if id == "q9"));

        let err = status_error(StatusCode::INTERNAL_SERVER_ERROR, "u".to_string(), None, b"boom");
        assert!(matches!(err, ApiError::Service { status: 500, ref body, .. } if body == "boom"));
    }
}
