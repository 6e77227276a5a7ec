use serde::{Deserialize, Serialize};

/// 农户：被监控作物的所有者，同时是告警通知的接收人
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Farmer {
    pub id: i64,
    pub name: String,

    /// 天气查询位置
    pub location: String,

    /// 通知邮箱（可能缺失）
    pub email: Option<String>,
}

impl Farmer {
    pub fn new(id: i64, name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            location: location.into(),
            email: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// 是否存在有效的通知邮箱
    pub fn has_valid_email(&self) -> bool {
        self.email
            .as_deref()
            .map(|e| !e.trim().is_empty())
            .unwrap_or(false)
    }
}
