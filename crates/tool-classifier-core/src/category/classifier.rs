//! Tool Classifier
//!
//! 選択された戦略をツール一覧全体に適用し、カテゴリ別に振り分ける。

use tracing::{debug, warn};

use crate::error::{ClassifierError, Result};
use crate::tool::ToolMetadata;

use super::builtin::UNCATEGORIZED;
use super::result::ClassificationResult;
use super::store::ClassificationConfig;
use super::strategy::{ClassificationStrategy, StrategyKind};

/// ツール分類器
///
/// 構築後は設定を変更しないため、同じインスタンスを複数スレッドから
/// 同時に使ってよい。
#[derive(Debug)]
pub struct ToolClassifier {
    strategy: Box<dyn ClassificationStrategy>,
    warnings: Vec<String>,
}

impl ToolClassifier {
    /// 戦略タグと任意のカスタム設定から分類器を作成
    ///
    /// `strategy` は `"explicit"`, `"prefix"`, `"keyword"` のいずれか。
    /// `custom_config` を渡すとその戦略のビルトインテーブルを丸ごと置き換える。
    pub fn new(strategy: &str, custom_config: Option<ClassificationConfig>) -> Result<Self> {
        let kind: StrategyKind = strategy.parse()?;
        Self::with_kind(kind, custom_config)
    }

    /// 戦略種別を指定して作成
    pub fn with_kind(
        kind: StrategyKind,
        custom_config: Option<ClassificationConfig>,
    ) -> Result<Self> {
        let config = match custom_config {
            Some(config) if config.kind() != kind => {
                return Err(ClassifierError::configuration(format!(
                    "{} config supplied for {} strategy",
                    config.kind(),
                    kind
                )));
            }
            Some(config) => config,
            None => ClassificationConfig::builtin(kind),
        };

        let warnings = config.validate()?;
        for warning in &warnings {
            warn!(strategy = %kind, "{}", warning);
        }

        let strategy = config.to_strategy();
        debug!(
            strategy = %kind,
            categories = strategy.categories().len(),
            "tool classifier ready"
        );

        Ok(Self { strategy, warnings })
    }

    /// ビルトインテーブルのみで分類器を構築
    pub fn builtin(kind: StrategyKind) -> Result<Self> {
        Self::with_kind(kind, None)
    }

    /// 独自実装の戦略から分類器を構築
    pub fn from_strategy(strategy: Box<dyn ClassificationStrategy>) -> Result<Self> {
        if let Some(bad) = strategy
            .categories()
            .iter()
            .find(|c| c.is_empty() || c.as_str() == UNCATEGORIZED)
        {
            return Err(ClassifierError::configuration(format!(
                "strategy '{}' declares invalid category '{}'",
                strategy.name(),
                bad
            )));
        }

        debug!(strategy = strategy.name(), "tool classifier ready");
        Ok(Self {
            strategy,
            warnings: Vec::new(),
        })
    }

    /// 使用中の戦略名
    pub fn strategy_name(&self) -> &str {
        self.strategy.name()
    }

    /// 利用可能なカテゴリ名（`uncategorized` を除く、ソート済み）
    pub fn category_names(&self) -> Vec<&str> {
        self.strategy.categories().iter().map(String::as_str).collect()
    }

    /// カテゴリ名が有効か（`uncategorized` を含む、大文字小文字を区別）
    pub fn has_category(&self, category: &str) -> bool {
        category == UNCATEGORIZED || self.strategy.categories().iter().any(|c| c == category)
    }

    /// 構築時に検出した設定上の警告
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// ツール一覧を分類
    ///
    /// 入力順に1回だけ走査する。どのカテゴリにもマッチしないツールは
    /// `uncategorized` に、複数マッチしたツールはすべてのカテゴリに入る。
    pub fn classify_tools<'a, T: ToolMetadata>(
        &self,
        tools: &'a [T],
    ) -> ClassificationResult<'a, T> {
        let mut result = ClassificationResult::new(self.strategy.categories());

        for tool in tools {
            let categories = self.strategy.classify_one(tool);
            let mut placed = false;
            for category in &categories {
                placed |= result.push(category, tool);
            }
            if !placed {
                result.push(UNCATEGORIZED, tool);
            }
        }

        debug!(
            strategy = self.strategy.name(),
            tools = tools.len(),
            uncategorized = result.uncategorized().len(),
            "classified tools"
        );
        result
    }

    /// 特定カテゴリのツールのみ取得
    ///
    /// 未知のカテゴリ名は `UnknownCategory` エラー。既知カテゴリに
    /// マッチするツールが無いだけなら空リストを返す。
    pub fn get_tools_by_category<'a, T: ToolMetadata>(
        &self,
        tools: &'a [T],
        category: &str,
    ) -> Result<Vec<&'a T>> {
        if !self.has_category(category) {
            let mut available = self.strategy.categories().to_vec();
            available.push(UNCATEGORIZED.to_string());
            return Err(ClassifierError::UnknownCategory {
                category: category.to_string(),
                available,
            });
        }

        Ok(self
            .classify_tools(tools)
            .into_bucket(category)
            .unwrap_or_default())
    }
}
