/// 渲染配置
///
/// 字体与字号沿用原答题卡的视觉效果：批注 25px、整卷总分 50px。
#[derive(Clone, Debug)]
pub struct RenderConfig {
    /// 批注字体文件路径（需支持中文）
    pub font_path: String,
    /// 每题批注文字字号（像素）
    pub annotation_font_size: f32,
    /// 整卷总分与声明文字字号（像素）
    pub summary_font_size: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            font_path: "msyh.ttc".to_string(),
            annotation_font_size: 25.0,
            summary_font_size: 50.0,
        }
    }
}

impl RenderConfig {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            font_path: std::env::var("ANSWERSHEET_FONT_PATH").unwrap_or(default.font_path),
            annotation_font_size: std::env::var("ANSWERSHEET_FONT_SIZE").ok().and_then(|v| v.parse().ok()).unwrap_or(default.annotation_font_size),
            summary_font_size: std::env::var("ANSWERSHEET_SUMMARY_FONT_SIZE").ok().and_then(|v| v.parse().ok()).unwrap_or(default.summary_font_size),
        }
    }
}
