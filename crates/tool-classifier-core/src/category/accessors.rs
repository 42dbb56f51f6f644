//! Convenience accessors
//!
//! ビルトインテーブルで分類して特定カテゴリだけを取り出す薄いヘルパー。
//! エージェント構築側が `booking_tools(&mcp_tools)` のように使う想定。

use crate::error::Result;
use crate::tool::ToolMetadata;

use super::classifier::ToolClassifier;
use super::result::ClassificationResult;
use super::strategy::StrategyKind;

/// ビルトインテーブルでツール一覧を分類
pub fn classify_mcp_tools<T: ToolMetadata>(
    tools: &[T],
    kind: StrategyKind,
) -> Result<ClassificationResult<'_, T>> {
    let classifier = ToolClassifier::builtin(kind)?;
    Ok(classifier.classify_tools(tools))
}

/// 予約関連ツール（デフォルト戦略）
pub fn booking_tools<T: ToolMetadata>(tools: &[T]) -> Result<Vec<&T>> {
    builtin_bucket(tools, "booking")
}

/// 照会関連ツール（デフォルト戦略）
pub fn query_tools<T: ToolMetadata>(tools: &[T]) -> Result<Vec<&T>> {
    builtin_bucket(tools, "query")
}

/// 予約管理関連ツール（デフォルト戦略）
pub fn management_tools<T: ToolMetadata>(tools: &[T]) -> Result<Vec<&T>> {
    builtin_bucket(tools, "management")
}

fn builtin_bucket<'a, T: ToolMetadata>(tools: &'a [T], category: &str) -> Result<Vec<&'a T>> {
    ToolClassifier::builtin(StrategyKind::default())?.get_tools_by_category(tools, category)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::ToolDescriptor;

    fn tools() -> Vec<ToolDescriptor> {
        vec![
            ToolDescriptor::new("get_available_buildings", "查詢所有可預約的大樓列表。"),
            ToolDescriptor::new("book_meeting_room", "預約會議室。"),
            ToolDescriptor::new("cancel_reservation", "取消會議室預約。"),
        ]
    }

    fn names(tools: Vec<&ToolDescriptor>) -> Vec<&str> {
        tools.into_iter().map(|t| t.name.as_str()).collect()
    }

    #[test]
    fn test_named_buckets() {
        let tools = tools();
        assert_eq!(
            names(booking_tools(&tools).unwrap()),
            vec!["get_available_buildings", "book_meeting_room"]
        );
        assert_eq!(
            names(query_tools(&tools).unwrap()),
            vec!["get_available_buildings"]
        );
        assert_eq!(
            names(management_tools(&tools).unwrap()),
            vec!["cancel_reservation"]
        );
    }

    #[test]
    fn test_classify_mcp_tools_with_keyword_strategy() {
        let tools = tools();
        let result = classify_mcp_tools(&tools, StrategyKind::Keyword).unwrap();
        assert_eq!(
            result.categories_of("cancel_reservation"),
            vec!["booking", "management"]
        );
        assert!(result.uncategorized().is_empty());
    }
}
