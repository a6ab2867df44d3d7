//! # Routine Advisor - 应用核心初始化模块
//!
//! 产品筛选、选购清单与 AI 护理方案对话小组件的 Rust 后端。
//! 所有状态（目录缓存、选购清单、筛选条件、网格交互状态、对话）都由后端持有，
//! 每个用户操作返回显示指令，前端只负责绘制。
//!
//! ## 架构说明
//! 核心状态逻辑（`models/`、`services/`）不依赖 Tauri，可无头构建和测试；
//! Tauri 壳（`commands/` 与 `run()`）只在启用 `desktop` feature 时编译。
//!
//! ## 模块结构
//! - `commands/` - Tauri command 处理函数（IPC 接口层，`desktop` feature）
//! - `models/` - 数据模型（对应前端 TypeScript 类型）
//! - `services/` - 核心业务逻辑（目录、清单、筛选、渲染、对话、编排）
//! - `utils/` - 通用工具函数
//! - `error` - 类型化错误

#[cfg(feature = "desktop")]
mod commands;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

#[cfg(feature = "desktop")]
use services::advisor::Advisor;

// `#[cfg_attr(mobile, tauri::mobile_entry_point)]`：条件编译属性
// 当目标平台为移动端（Android/iOS）时，此属性将 `run()` 函数标记为
// Tauri 移动端入口点；桌面端编译时不生效，`run()` 由 `main.rs` 直接调用。
#[cfg(feature = "desktop")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
/// Tauri 应用启动函数
///
/// 构建并运行 Tauri 应用实例。该函数完成以下工作：
/// 1. 创建 `tauri::Builder` 默认实例
/// 2. 在 `setup` 钩子中按需注册调试专用插件（日志）
/// 3. 加载运行配置（`config.json` + 环境变量覆盖）
/// 4. 以应用资源目录为基准定位产品目录，组装 `Advisor` 并注册为 managed state
/// 5. 注册所有自定义 Tauri commands
/// 6. 生成应用上下文并启动主事件循环
///
/// # Panics
/// 如果 Tauri 应用启动失败（例如配置文件损坏或窗口创建失败），
/// 将通过 `.expect()` 触发 panic 并输出错误信息。
pub fn run() {
    use tauri::Manager;

    tauri::Builder::default()
        // `setup` 闭包：在应用窗口创建之前执行的初始化钩子
        .setup(|app| {
            // 仅在开发调试模式下启用日志插件
            if cfg!(debug_assertions) {
                app.handle().plugin(
                    tauri_plugin_log::Builder::default()
                        .level(log::LevelFilter::Info)
                        .build(),
                )?;
            }

            // 配置文件不存在时使用默认配置；内容损坏时启动失败
            let config = services::config::load_config()?;
            // 相对路径的产品目录（默认 `products.json`）随应用资源一起打包
            let resource_dir = app.path().resource_dir()?;

            // === 应用全局状态初始化 ===
            // 注册 Advisor 为 Tauri managed state，所有 command 函数可通过
            // `State<Advisor>` 参数注入访问。Advisor 包含：
            // - 产品目录缓存（首次成功加载后不再读取文件）
            // - 选购清单（每次变更同步写入本地存储文件）
            // - 筛选条件与网格交互状态
            // - 对话轮次与聊天窗口
            app.manage(Advisor::from_config(&config, &resource_dir)?);
            Ok(())
        })
        // === 自定义 Tauri Commands 注册 ===
        // 所有 command 函数通过 `invoke_handler` 注册，前端通过 `invoke()` 调用
        .invoke_handler(tauri::generate_handler![
            // 商品网格 commands
            commands::products::init_advisor,
            commands::products::set_category,
            commands::products::search_products,
            commands::products::toggle_product,
            commands::products::toggle_description,
            commands::products::toggle_show_more,
            // 已选列表 commands
            commands::selection::remove_selected,
            commands::selection::clear_selection,
            // 对话 commands（进行中的窗口通过 `chat-window` 事件推送）
            commands::chat::generate_routine,
            commands::chat::send_chat_message,
        ])
        // `tauri::generate_context!()` 宏：在编译时读取 `tauri.conf.json` 配置文件，
        // 生成包含应用名称、窗口配置、安全策略等信息的上下文对象。
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
