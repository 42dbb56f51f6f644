//! Classification Strategies
//!
//! 1つのツールをカテゴリ集合に写像する3つの分類戦略。
//!
//! - `ExplicitStrategy`: ツール名の完全一致による対応表
//! - `PrefixStrategy`: ツール名の前方一致
//! - `KeywordStrategy`: 説明文の部分一致（大文字小文字を区別しない）
//!
//! Prefix / Keyword は「最初のマッチで打ち切り」ではなく、マッチした
//! すべてのカテゴリを返す。複数エージェントで共有されるツール
//! （例: 予約と照会の両方で使う一覧取得）が両方のバケットに入る必要があるため。

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ClassifierError;
use crate::tool::ToolMetadata;

use super::store::PatternTable;

/// 分類戦略の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    /// ツール名→カテゴリの明示的な対応表（デフォルト）
    #[default]
    Explicit,
    /// カテゴリ→ツール名の前方一致パターン
    Prefix,
    /// カテゴリ→説明文キーワード
    Keyword,
}

impl StrategyKind {
    /// 識別子（設定ファイル・CLIで使うタグ）
    pub fn id(&self) -> &'static str {
        match self {
            Self::Explicit => "explicit",
            Self::Prefix => "prefix",
            Self::Keyword => "keyword",
        }
    }

    /// 全戦略
    pub fn all() -> &'static [StrategyKind] {
        &[Self::Explicit, Self::Prefix, Self::Keyword]
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for StrategyKind {
    type Err = ClassifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|k| k.id() == s)
            .ok_or_else(|| {
                ClassifierError::configuration(format!(
                    "unknown strategy '{}' (expected one of: explicit, prefix, keyword)",
                    s
                ))
            })
    }
}

/// 分類戦略の共通インターフェース
///
/// 独自戦略を実装して [`ToolClassifier::from_strategy`] に渡すこともできる。
///
/// [`ToolClassifier::from_strategy`]: super::ToolClassifier::from_strategy
pub trait ClassificationStrategy: fmt::Debug + Send + Sync {
    /// 戦略名（ログ・表示用）
    fn name(&self) -> &str;

    /// この戦略が出力し得るカテゴリ名（ソート済み・重複なし）
    fn categories(&self) -> &[String];

    /// 1つのツールが属するカテゴリ集合を返す。空集合は未分類を意味する
    fn classify_one(&self, tool: &dyn ToolMetadata) -> BTreeSet<String>;
}

/// ツール名の完全一致による分類
#[derive(Debug, Clone)]
pub struct ExplicitStrategy {
    mapping: BTreeMap<String, BTreeSet<String>>,
    categories: Vec<String>,
}

impl ExplicitStrategy {
    /// ツール名→カテゴリ一覧の表から構築
    pub fn new(table: &PatternTable) -> Self {
        let mapping: BTreeMap<String, BTreeSet<String>> = table
            .iter()
            .map(|(tool, cats)| (tool.clone(), cats.iter().cloned().collect()))
            .collect();

        let categories = mapping
            .values()
            .flatten()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        Self {
            mapping,
            categories,
        }
    }
}

impl ClassificationStrategy for ExplicitStrategy {
    fn name(&self) -> &str {
        StrategyKind::Explicit.id()
    }

    fn categories(&self) -> &[String] {
        &self.categories
    }

    fn classify_one(&self, tool: &dyn ToolMetadata) -> BTreeSet<String> {
        self.mapping.get(tool.name()).cloned().unwrap_or_default()
    }
}

/// ツール名の前方一致による分類
#[derive(Debug, Clone)]
pub struct PrefixStrategy {
    rules: Vec<(String, Vec<String>)>,
    categories: Vec<String>,
}

impl PrefixStrategy {
    /// カテゴリ→プレフィックス一覧の表から構築
    pub fn new(table: &PatternTable) -> Self {
        let rules: Vec<(String, Vec<String>)> = table
            .iter()
            .map(|(cat, prefixes)| (cat.clone(), prefixes.clone()))
            .collect();
        let categories = rules.iter().map(|(cat, _)| cat.clone()).collect();
        Self { rules, categories }
    }
}

impl ClassificationStrategy for PrefixStrategy {
    fn name(&self) -> &str {
        StrategyKind::Prefix.id()
    }

    fn categories(&self) -> &[String] {
        &self.categories
    }

    fn classify_one(&self, tool: &dyn ToolMetadata) -> BTreeSet<String> {
        let name = tool.name();
        self.rules
            .iter()
            .filter(|(_, prefixes)| prefixes.iter().any(|p| name.starts_with(p.as_str())))
            .map(|(cat, _)| cat.clone())
            .collect()
    }
}

/// 説明文のキーワード部分一致による分類
///
/// 単語境界は見ないため、無関係な単語の一部にキーワードが含まれていても
/// マッチする（例: `"my"` は `"dummy"` にマッチ）。
#[derive(Debug, Clone)]
pub struct KeywordStrategy {
    /// キーワードは構築時に小文字化済み
    rules: Vec<(String, Vec<String>)>,
    categories: Vec<String>,
}

impl KeywordStrategy {
    /// カテゴリ→キーワード一覧の表から構築
    pub fn new(table: &PatternTable) -> Self {
        let rules: Vec<(String, Vec<String>)> = table
            .iter()
            .map(|(cat, keywords)| {
                (
                    cat.clone(),
                    keywords.iter().map(|k| k.to_lowercase()).collect(),
                )
            })
            .collect();
        let categories = rules.iter().map(|(cat, _)| cat.clone()).collect();
        Self { rules, categories }
    }
}

impl ClassificationStrategy for KeywordStrategy {
    fn name(&self) -> &str {
        StrategyKind::Keyword.id()
    }

    fn categories(&self) -> &[String] {
        &self.categories
    }

    fn classify_one(&self, tool: &dyn ToolMetadata) -> BTreeSet<String> {
        let description = tool.description();
        if description.is_empty() {
            return BTreeSet::new();
        }

        let haystack = description.to_lowercase();
        self.rules
            .iter()
            .filter(|(_, keywords)| keywords.iter().any(|k| haystack.contains(k.as_str())))
            .map(|(cat, _)| cat.clone())
            .collect()
    }
}
