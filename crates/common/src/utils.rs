//! 通用工具函数

use uuid::Uuid;

/// 生成不可预测的会话令牌
///
/// UUID v4 的 122 位随机数来自操作系统 CSPRNG。
pub fn random_token() -> String {
    Uuid::new_v4().simple().to_string()
}
