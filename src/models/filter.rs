//! # 筛选条件数据模型

use serde::{Deserialize, Serialize};

/// 当前作用于目录视图的分类与搜索条件
///
/// 由 UI 输入派生，每次分类切换或搜索输入时重新计算。
/// 空白字符串与 `None` 等价，均视为“未设置”。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    /// 分类：非空时对 `Product::category` 精确匹配
    pub category: Option<String>,
    /// 搜索词：非空时对 名称 + 品牌 + 描述 做大小写不敏感的子串匹配
    pub query: Option<String>,
}

impl FilterCriteria {
    /// 返回有效的分类（去除首尾空白后非空）
    pub fn category(&self) -> Option<&str> {
        self.category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }

    /// 返回有效的搜索词（去除首尾空白后非空）
    pub fn query(&self) -> Option<&str> {
        self.query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
    }

    /// 是否设置了任一条件
    ///
    /// 编排层据此决定网格显示筛选结果还是显示占位提示。
    pub fn is_active(&self) -> bool {
        self.category().is_some() || self.query().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_fields_are_inactive() {
        let criteria = FilterCriteria {
            category: Some(String::new()),
            query: Some("   ".into()),
        };
        assert!(!criteria.is_active());
        assert_eq!(criteria.category(), None);
        assert_eq!(criteria.query(), None);
    }

    #[test]
    fn test_query_is_trimmed() {
        let criteria = FilterCriteria {
            category: None,
            query: Some("  serum ".into()),
        };
        assert!(criteria.is_active());
        assert_eq!(criteria.query(), Some("serum"));
    }
}
