//! Classification Config Store
//!
//! 分類戦略ごとの設定テーブル。
//! ビルトインテーブル、またはカスタムテーブルで丸ごと置き換えて保持する
//! （マージはしない）。

use std::collections::{BTreeMap, BTreeSet};

use serde_json::Value;

use crate::error::{ClassifierError, Result};

use super::builtin::{BUILTIN_CATEGORIES, BUILTIN_TOOL_MAPPINGS, UNCATEGORIZED};
use super::strategy::{
    ClassificationStrategy, ExplicitStrategy, KeywordStrategy, PrefixStrategy, StrategyKind,
};

/// 文字列キー→文字列リストの表
///
/// - Explicit: ツール名 → カテゴリ名
/// - Prefix: カテゴリ名 → プレフィックス
/// - Keyword: カテゴリ名 → キーワード
pub type PatternTable = BTreeMap<String, Vec<String>>;

/// 戦略ごとの分類設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassificationConfig {
    /// ツール名 → カテゴリ一覧
    Explicit(PatternTable),
    /// カテゴリ → ツール名プレフィックス一覧
    Prefix(PatternTable),
    /// カテゴリ → 説明文キーワード一覧
    Keyword(PatternTable),
}

impl ClassificationConfig {
    /// ビルトインテーブルを取得
    pub fn builtin(kind: StrategyKind) -> Self {
        match kind {
            StrategyKind::Explicit => Self::Explicit(
                BUILTIN_TOOL_MAPPINGS
                    .iter()
                    .map(|m| (m.tool.to_string(), to_strings(m.categories)))
                    .collect(),
            ),
            StrategyKind::Prefix => Self::Prefix(
                BUILTIN_CATEGORIES
                    .iter()
                    .map(|c| (c.name.to_string(), to_strings(c.prefixes)))
                    .collect(),
            ),
            StrategyKind::Keyword => Self::Keyword(
                BUILTIN_CATEGORIES
                    .iter()
                    .map(|c| (c.name.to_string(), to_strings(c.keywords)))
                    .collect(),
            ),
        }
    }

    /// 種類とテーブルから構築
    pub fn from_table(kind: StrategyKind, table: PatternTable) -> Self {
        match kind {
            StrategyKind::Explicit => Self::Explicit(table),
            StrategyKind::Prefix => Self::Prefix(table),
            StrategyKind::Keyword => Self::Keyword(table),
        }
    }

    /// 型なしの値（JSON / TOML由来）から構築
    ///
    /// 値は「文字列キー → 文字列配列」のオブジェクトでなければならない。
    /// 形が合わない場合は `Configuration` エラー。
    pub fn from_value(kind: StrategyKind, value: &Value) -> Result<Self> {
        let object = value.as_object().ok_or_else(|| {
            ClassifierError::configuration(format!(
                "{} config must be a table of string lists, got {}",
                kind,
                value_type(value)
            ))
        })?;

        let mut table = PatternTable::new();
        for (key, entry) in object {
            let items = entry.as_array().ok_or_else(|| {
                ClassifierError::configuration(format!(
                    "{} config: value for '{}' must be a list of strings, got {}",
                    kind,
                    key,
                    value_type(entry)
                ))
            })?;

            let strings = items
                .iter()
                .map(|item| {
                    item.as_str().map(str::to_string).ok_or_else(|| {
                        ClassifierError::configuration(format!(
                            "{} config: '{}' contains {} where a string was expected",
                            kind,
                            key,
                            value_type(item)
                        ))
                    })
                })
                .collect::<Result<Vec<_>>>()?;

            table.insert(key.clone(), strings);
        }

        Ok(Self::from_table(kind, table))
    }

    /// 対応する戦略の種類
    pub fn kind(&self) -> StrategyKind {
        match self {
            Self::Explicit(_) => StrategyKind::Explicit,
            Self::Prefix(_) => StrategyKind::Prefix,
            Self::Keyword(_) => StrategyKind::Keyword,
        }
    }

    /// 内部テーブル
    pub fn table(&self) -> &PatternTable {
        match self {
            Self::Explicit(t) | Self::Prefix(t) | Self::Keyword(t) => t,
        }
    }

    /// 型なしの値に変換（設定ファイル保存用）
    pub fn to_value(&self) -> Value {
        Value::Object(
            self.table()
                .iter()
                .map(|(k, vs)| {
                    (
                        k.clone(),
                        Value::Array(vs.iter().cloned().map(Value::String).collect()),
                    )
                })
                .collect(),
        )
    }

    /// このテーブルが定義するカテゴリ名（ソート済み）
    pub fn category_names(&self) -> Vec<String> {
        match self {
            Self::Explicit(t) => t
                .values()
                .flatten()
                .cloned()
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect(),
            Self::Prefix(t) | Self::Keyword(t) => t.keys().cloned().collect(),
        }
    }

    /// 設定を検証し、警告メッセージ一覧を返す
    ///
    /// 分類結果を壊す設定（予約名・空文字列）はエラー、
    /// 曖昧なだけの設定は警告として扱う。
    pub fn validate(&self) -> Result<Vec<String>> {
        let kind = self.kind();
        let mut warnings = Vec::new();

        for label in self.category_names() {
            check_label(kind, &label)?;
        }

        match self {
            Self::Explicit(table) => {
                for (tool, cats) in table {
                    if tool.is_empty() {
                        return Err(ClassifierError::configuration(
                            "explicit config: empty tool name",
                        ));
                    }
                    if cats.is_empty() {
                        warnings.push(format!(
                            "explicit config: '{}' maps to no category and will always be uncategorized",
                            tool
                        ));
                    }
                    if let Some(dup) = first_duplicate(cats.iter().map(String::as_str)) {
                        warnings.push(format!(
                            "explicit config: '{}' lists category '{}' more than once",
                            tool, dup
                        ));
                    }
                }
            }
            Self::Prefix(table) | Self::Keyword(table) => {
                let normalize = |p: &str| match kind {
                    StrategyKind::Keyword => p.to_lowercase(),
                    _ => p.to_string(),
                };

                let mut seen_sets: Vec<(&str, BTreeSet<String>)> = Vec::new();
                for (category, patterns) in table {
                    if patterns.iter().any(|p| p.is_empty()) {
                        return Err(ClassifierError::configuration(format!(
                            "{} config: '{}' contains an empty pattern, which would match every tool",
                            kind, category
                        )));
                    }
                    if patterns.is_empty() {
                        warnings.push(format!(
                            "{} config: '{}' has no patterns and will never match",
                            kind, category
                        ));
                        continue;
                    }

                    let normalized: Vec<String> =
                        patterns.iter().map(|p| normalize(p.as_str())).collect();
                    if let Some(dup) = first_duplicate(normalized.iter().map(String::as_str)) {
                        warnings.push(format!(
                            "{} config: '{}' lists pattern '{}' more than once",
                            kind, category, dup
                        ));
                    }

                    let set: BTreeSet<String> = normalized.into_iter().collect();
                    if let Some((other, _)) = seen_sets.iter().find(|(_, s)| *s == set) {
                        warnings.push(format!(
                            "{} config: '{}' and '{}' have identical patterns; every match lands in both",
                            kind, other, category
                        ));
                    }
                    seen_sets.push((category.as_str(), set));
                }
            }
        }

        let names = self.category_names();
        for (i, a) in names.iter().enumerate() {
            for b in &names[i + 1..] {
                if a.to_lowercase() == b.to_lowercase() {
                    warnings.push(format!(
                        "{} config: categories '{}' and '{}' differ only by case and are kept separate",
                        kind, a, b
                    ));
                }
            }
        }

        Ok(warnings)
    }

    /// 設定から戦略を構築
    pub fn to_strategy(&self) -> Box<dyn ClassificationStrategy> {
        match self {
            Self::Explicit(t) => Box::new(ExplicitStrategy::new(t)),
            Self::Prefix(t) => Box::new(PrefixStrategy::new(t)),
            Self::Keyword(t) => Box::new(KeywordStrategy::new(t)),
        }
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn check_label(kind: StrategyKind, label: &str) -> Result<()> {
    if label.is_empty() {
        return Err(ClassifierError::configuration(format!(
            "{} config: empty category name",
            kind
        )));
    }
    if label == UNCATEGORIZED {
        return Err(ClassifierError::configuration(format!(
            "{} config: '{}' is reserved and cannot be used as a category",
            kind, UNCATEGORIZED
        )));
    }
    Ok(())
}

fn first_duplicate<'a>(items: impl Iterator<Item = &'a str>) -> Option<&'a str> {
    let mut seen = BTreeSet::new();
    items.into_iter().find(|item| !seen.insert(*item))
}

fn value_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a table",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builtin_tables() {
        let explicit = ClassificationConfig::builtin(StrategyKind::Explicit);
        assert_eq!(explicit.kind(), StrategyKind::Explicit);
        assert_eq!(
            explicit.table().get("get_available_rooms").unwrap(),
            &vec!["booking".to_string(), "query".to_string()]
        );

        let prefix = ClassificationConfig::builtin(StrategyKind::Prefix);
        assert_eq!(
            prefix.category_names(),
            vec!["booking", "management", "query"]
        );

        let keyword = ClassificationConfig::builtin(StrategyKind::Keyword);
        assert!(keyword.table()["booking"].contains(&"預約".to_string()));
    }

    #[test]
    fn test_builtin_tables_validate_cleanly() {
        for kind in StrategyKind::all() {
            let warnings = ClassificationConfig::builtin(*kind).validate().unwrap();
            assert!(warnings.is_empty(), "{}: {:?}", kind, warnings);
        }
    }

    #[test]
    fn test_from_value() {
        let config = ClassificationConfig::from_value(
            StrategyKind::Prefix,
            &json!({"booking": ["get_available_"], "query": ["get_"]}),
        )
        .unwrap();
        assert_eq!(config.kind(), StrategyKind::Prefix);
        assert_eq!(config.table()["query"], vec!["get_"]);
    }

    #[test]
    fn test_from_value_rejects_non_table() {
        let err = ClassificationConfig::from_value(StrategyKind::Keyword, &json!(["book"]))
            .unwrap_err();
        assert!(matches!(err, ClassifierError::Configuration { .. }));
    }

    #[test]
    fn test_from_value_rejects_nested_table() {
        let err = ClassificationConfig::from_value(
            StrategyKind::Explicit,
            &json!({"book_room": {"booking": ["book_"]}}),
        )
        .unwrap_err();
        assert!(err.to_string().contains("book_room"));
    }

    #[test]
    fn test_from_value_rejects_non_string_items() {
        let err = ClassificationConfig::from_value(
            StrategyKind::Prefix,
            &json!({"booking": ["book_", 3]}),
        )
        .unwrap_err();
        assert!(matches!(err, ClassifierError::Configuration { .. }));
    }

    #[test]
    fn test_to_value_round_trips_table() {
        let config = ClassificationConfig::builtin(StrategyKind::Keyword);
        let back = ClassificationConfig::from_value(StrategyKind::Keyword, &config.to_value())
            .unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_validate_rejects_reserved_category() {
        let config = ClassificationConfig::from_value(
            StrategyKind::Explicit,
            &json!({"ping": ["uncategorized"]}),
        )
        .unwrap();
        assert!(config.validate().is_err());

        let config = ClassificationConfig::from_value(
            StrategyKind::Prefix,
            &json!({"uncategorized": ["x_"]}),
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_pattern() {
        let config =
            ClassificationConfig::from_value(StrategyKind::Keyword, &json!({"booking": [""]}))
                .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_warns_on_identical_pattern_sets() {
        let config = ClassificationConfig::from_value(
            StrategyKind::Prefix,
            &json!({"booking": ["get_", "book_"], "query": ["book_", "get_"]}),
        )
        .unwrap();
        let warnings = config.validate().unwrap();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("identical"));
    }

    #[test]
    fn test_validate_keyword_sets_compare_case_insensitively() {
        let config = ClassificationConfig::from_value(
            StrategyKind::Keyword,
            &json!({"a": ["Book"], "b": ["book"]}),
        )
        .unwrap();
        let warnings = config.validate().unwrap();
        assert!(warnings.iter().any(|w| w.contains("identical")));
    }

    #[test]
    fn test_validate_warns_on_case_only_difference() {
        let config = ClassificationConfig::from_value(
            StrategyKind::Prefix,
            &json!({"Booking": ["reserve_"], "booking": ["book_"]}),
        )
        .unwrap();
        let warnings = config.validate().unwrap();
        assert!(warnings.iter().any(|w| w.contains("differ only by case")));
    }

    #[test]
    fn test_validate_warns_on_empty_explicit_entry() {
        let config =
            ClassificationConfig::from_value(StrategyKind::Explicit, &json!({"ping": []}))
                .unwrap();
        let warnings = config.validate().unwrap();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("ping"));
    }
}
