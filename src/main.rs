use anyhow::Result;
use question_admin::utils::logging;
use question_admin::{App, Config};

/// 默认配置文件
const CONFIG_FILE: &str = "question_admin.toml";

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config_path = std::env::var("QUESTION_ADMIN_CONFIG").unwrap_or_else(|_| CONFIG_FILE.to_string());
    let config = Config::load(&config_path)?;

    // 初始化日志
    logging::init(&config);

    // 初始化并运行应用
    App::initialize(config)?.run().await?;

    Ok(())
}
