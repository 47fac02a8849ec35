pub struct DefaultConfig;

impl DefaultConfig {
    /// 默认读缓冲区大小
    pub const BUFFER_SIZE: usize = 1_000_000;

    /// 默认百分比小数位数
    pub const PRECISION: usize = 2;

    pub const MAX_PRECISION: usize = 10;

    /// 配置目录名
    pub const APP_DIR: &'static str = "bit-counter-cli";

    /// 配置文件名
    pub const CONFIG_FILE: &'static str = "config.toml";
}
