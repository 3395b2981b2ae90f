use thiserror::Error;

/// 渲染核心错误类型
///
/// 整个渲染调用以单一错误向调用方汇报，内部不做重试；
/// 重试与用户提示由外层（网络层 / 机器人层）决定。
#[derive(Debug, Error)]
pub enum SheetError {
    /// 载荷缺少预期字段或嵌套 JSON 无法解析
    #[error("数据格式错误: {0}")]
    DataFormat(String),
    /// 配置错误（未知纸张类型等）
    #[error("配置错误: {0}")]
    Configuration(String),
    /// 渲染过程失败（字体、图片、得分数据异常）
    #[error("渲染失败: {0}")]
    Render(String),
}

// ========== 便捷构造函数 ==========

impl SheetError {
    /// 创建数据格式错误
    pub fn data_format(message: impl Into<String>) -> Self {
        SheetError::DataFormat(message.into())
    }

    /// 创建配置错误
    pub fn configuration(message: impl Into<String>) -> Self {
        SheetError::Configuration(message.into())
    }

    /// 创建渲染错误
    pub fn render(message: impl Into<String>) -> Self {
        SheetError::Render(message.into())
    }
}

// ========== Result 类型别名 ==========

/// 渲染核心结果类型
pub type Result<T> = std::result::Result<T, SheetError>;
