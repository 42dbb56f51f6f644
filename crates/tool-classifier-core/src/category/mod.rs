//! # Category Module
//!
//! 実行時に取得したツール（MCP Server等）を意味的なカテゴリに分類する機能を提供する。
//!
//! ## 設計目的
//!
//! MCP Serverから動的に読み込まれるツールはフラットな一覧で届くが、
//! 各エージェントに渡すべきなのは自分の役割に関係するツールだけである：
//!
//! - **booking**: 予約可能なリソースの一覧、空き状況、予約作成
//! - **query**: 検索・一覧・照会
//! - **management**: 既存予約の確認・変更・取消
//!
//! カテゴリはコード上の列挙型ではなく設定データのキーとして扱う。
//! どのカテゴリにも当てはまらないツールは `uncategorized` に入る。
//!
//! ## モジュール構成
//!
//! - `builtin`: ビルトイン分類テーブル
//! - `store`: 戦略ごとの設定テーブル
//! - `strategy`: 分類戦略（Explicit / Prefix / Keyword）
//! - `classifier`: 分類器
//! - `result`: 分類結果
//! - `accessors`: カテゴリ別の便利関数
//!
//! ## 使用例
//!
//! ### ビルトインテーブルで分類
//!
//! ```rust
//! use tool_classifier_core::category::{StrategyKind, ToolClassifier, UNCATEGORIZED};
//! use tool_classifier_core::ToolDescriptor;
//!
//! let tools = vec![
//!     ToolDescriptor::new("book_meeting_room", "預約會議室。"),
//!     ToolDescriptor::new("ping_server", "health check"),
//! ];
//!
//! let classifier = ToolClassifier::builtin(StrategyKind::Explicit).unwrap();
//! let classified = classifier.classify_tools(&tools);
//!
//! assert_eq!(classified.tools("booking").len(), 1);
//! assert_eq!(classified.tools(UNCATEGORIZED)[0].name, "ping_server");
//! ```
//!
//! ### カスタム設定
//!
//! ```rust
//! use serde_json::json;
//! use tool_classifier_core::category::{ClassificationConfig, StrategyKind, ToolClassifier};
//! use tool_classifier_core::ToolDescriptor;
//!
//! let config = ClassificationConfig::from_value(
//!     StrategyKind::Prefix,
//!     &json!({"booking": ["get_available_"], "query": ["get_"]}),
//! )
//! .unwrap();
//! let classifier = ToolClassifier::new("prefix", Some(config)).unwrap();
//!
//! let tools = vec![ToolDescriptor::new("get_available_rooms", "")];
//! let classified = classifier.classify_tools(&tools);
//!
//! // 重なるプレフィックスは両方のカテゴリに入る
//! assert_eq!(classified.categories_of("get_available_rooms"), vec!["booking", "query"]);
//! ```

mod accessors;
mod builtin;
mod classifier;
mod result;
mod store;
mod strategy;

// Re-exports
pub use accessors::{booking_tools, classify_mcp_tools, management_tools, query_tools};
pub use builtin::{
    builtin_category, BuiltinCategory, BuiltinToolMapping, BUILTIN_CATEGORIES,
    BUILTIN_TOOL_MAPPINGS, UNCATEGORIZED,
};
pub use classifier::ToolClassifier;
pub use result::ClassificationResult;
pub use store::{ClassificationConfig, PatternTable};
pub use strategy::{
    ClassificationStrategy, ExplicitStrategy, KeywordStrategy, PrefixStrategy, StrategyKind,
};
