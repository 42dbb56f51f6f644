//! Classification Result
//!
//! `classify_tools` の戻り値。カテゴリ名 → ツール参照リストの対応。

use std::collections::btree_map;
use std::collections::BTreeMap;

use crate::tool::ToolMetadata;

use super::builtin::UNCATEGORIZED;

/// 分類結果
///
/// 設定上のすべてのカテゴリと `uncategorized` が必ずキーとして存在する（空リスト可）。
/// 各リストは入力順を保持し、同じツールが複数のリストに現れることがある。
#[derive(Debug, PartialEq, Eq)]
pub struct ClassificationResult<'a, T> {
    buckets: BTreeMap<String, Vec<&'a T>>,
}

impl<'a, T> ClassificationResult<'a, T> {
    pub(crate) fn new<'c>(categories: impl IntoIterator<Item = &'c String>) -> Self {
        let mut buckets: BTreeMap<String, Vec<&'a T>> = categories
            .into_iter()
            .map(|c| (c.clone(), Vec::new()))
            .collect();
        buckets.insert(UNCATEGORIZED.to_string(), Vec::new());
        Self { buckets }
    }

    /// 登録済みカテゴリに追加。未登録なら何もせず false
    pub(crate) fn push(&mut self, category: &str, tool: &'a T) -> bool {
        match self.buckets.get_mut(category) {
            Some(list) => {
                list.push(tool);
                true
            }
            None => false,
        }
    }

    /// 特定カテゴリのツールを取得（未知のカテゴリは None）
    pub fn get(&self, category: &str) -> Option<&[&'a T]> {
        self.buckets.get(category).map(Vec::as_slice)
    }

    /// 特定カテゴリのツールを取得（未知のカテゴリは空）
    pub fn tools(&self, category: &str) -> &[&'a T] {
        self.get(category).unwrap_or_default()
    }

    /// 未分類ツールを取得
    pub fn uncategorized(&self) -> &[&'a T] {
        self.tools(UNCATEGORIZED)
    }

    /// カテゴリ名一覧（`uncategorized` を除く、ソート済み）
    pub fn category_names(&self) -> Vec<&str> {
        self.buckets
            .keys()
            .map(String::as_str)
            .filter(|c| *c != UNCATEGORIZED)
            .collect()
    }

    /// カテゴリ別のツール数（`uncategorized` を含む）
    pub fn category_counts(&self) -> BTreeMap<&str, usize> {
        self.buckets
            .iter()
            .map(|(c, tools)| (c.as_str(), tools.len()))
            .collect()
    }

    /// 全バケットの要素数の合計（複数カテゴリに属するツールは重複して数える）
    pub fn total_assignments(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    /// どのバケットにもツールが無いか
    pub fn is_empty(&self) -> bool {
        self.buckets.values().all(Vec::is_empty)
    }

    /// (カテゴリ名, ツール一覧) を名前順に走査
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[&'a T])> {
        self.buckets.iter().map(|(c, t)| (c.as_str(), t.as_slice()))
    }

    /// 1つのバケットを取り出す
    pub fn into_bucket(mut self, category: &str) -> Option<Vec<&'a T>> {
        self.buckets.remove(category)
    }

    /// 内部マップを取り出す
    pub fn into_map(self) -> BTreeMap<String, Vec<&'a T>> {
        self.buckets
    }
}

impl<'a, T: ToolMetadata> ClassificationResult<'a, T> {
    /// ツール名から所属カテゴリを逆引き
    pub fn categories_of(&self, tool_name: &str) -> Vec<&str> {
        self.buckets
            .iter()
            .filter(|(_, tools)| tools.iter().any(|t| t.name() == tool_name))
            .map(|(c, _)| c.as_str())
            .collect()
    }
}

impl<'r, 'a, T> IntoIterator for &'r ClassificationResult<'a, T> {
    type Item = (&'r String, &'r Vec<&'a T>);
    type IntoIter = btree_map::Iter<'r, String, Vec<&'a T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.buckets.iter()
    }
}

impl<T> Clone for ClassificationResult<'_, T> {
    fn clone(&self) -> Self {
        Self {
            buckets: self.buckets.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::ToolDescriptor;

    fn categories(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_new_always_has_uncategorized() {
        let none: Vec<String> = Vec::new();
        let result: ClassificationResult<'_, ToolDescriptor> = ClassificationResult::new(&none);
        assert_eq!(result.get(UNCATEGORIZED), Some(&[][..]));
        assert!(result.category_names().is_empty());
        assert!(result.is_empty());
    }

    #[test]
    fn test_push_to_unknown_category_is_rejected() {
        let tool = ToolDescriptor::new("a", "");
        let cats = categories(&["booking"]);
        let mut result = ClassificationResult::new(&cats);
        assert!(result.push("booking", &tool));
        assert!(!result.push("query", &tool));
        assert_eq!(result.total_assignments(), 1);
        assert!(result.get("query").is_none());
        assert!(result.tools("query").is_empty());
    }

    #[test]
    fn test_counts_and_reverse_lookup() {
        let a = ToolDescriptor::new("a", "");
        let b = ToolDescriptor::new("b", "");
        let cats = categories(&["booking", "query"]);
        let mut result = ClassificationResult::new(&cats);
        result.push("booking", &a);
        result.push("query", &a);
        result.push(UNCATEGORIZED, &b);

        let counts = result.category_counts();
        assert_eq!(counts["booking"], 1);
        assert_eq!(counts["query"], 1);
        assert_eq!(counts[UNCATEGORIZED], 1);
        assert_eq!(result.total_assignments(), 3);
        assert_eq!(result.categories_of("a"), vec!["booking", "query"]);
        assert_eq!(result.categories_of("b"), vec![UNCATEGORIZED]);
        assert!(result.categories_of("c").is_empty());
        assert_eq!(result.uncategorized().len(), 1);
    }

    #[test]
    fn test_into_bucket() {
        let a = ToolDescriptor::new("a", "");
        let cats = categories(&["booking"]);
        let mut result = ClassificationResult::new(&cats);
        result.push("booking", &a);
        let bucket = result.clone().into_bucket("booking").unwrap();
        assert_eq!(bucket, vec![&a]);
        assert!(result.into_bucket("management").is_none());
    }
}
