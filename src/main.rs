use anyhow::Context;
use product_api::{
    create_router,
    infrastructure::{config::load_config, logger::Logger},
    AppState,
};
use std::{env, path::PathBuf, time::Duration};
use tokio::{net::TcpListener, signal};
use tower_http::timeout::TimeoutLayer;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 第一个命令行参数可指定配置文件
    let config_path = env::args().nth(1).map(PathBuf::from);
    let config = load_config(config_path.as_deref())?;
    config.validate()?;

    Logger::init(&config.logging.level)?;
    info!("启动产品 API 服务器...");
    info!("当前配置: {:?}", config);

    let app = create_router(AppState::new()).layer(TimeoutLayer::new(Duration::from_secs(
        config.http.timeout_seconds,
    )));

    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("无法绑定到 {addr}"))?;

    info!("🚀 产品 API 服务器运行在 http://{}", addr);
    info!("📖 API 端点:");
    info!("   GET    /               - API 信息");
    info!("   GET    /health         - 健康检查");
    info!("   GET    /products       - 获取所有产品");
    info!("   POST   /products       - 创建产品");
    info!("   GET    /products/:id   - 获取特定产品");
    info!("   PUT    /products/:id   - 更新产品");
    info!("   DELETE /products/:id   - 删除产品");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("服务器运行失败")?;

    info!("服务器已关闭");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        tracing::error!("监听关闭信号失败: {}", e);
        std::future::pending::<()>().await;
    }
    info!("收到关闭信号，正在停止服务器...");
}
