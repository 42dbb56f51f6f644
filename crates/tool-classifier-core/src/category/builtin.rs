//! Builtin Category Definitions
//!
//! コード内で定義されるビルトイン分類テーブル。
//! カスタム設定が渡されない場合に各戦略のデフォルトとして使われる。

/// 予約済みカテゴリ名。どのカテゴリにもマッチしなかったツールが入る
pub const UNCATEGORIZED: &str = "uncategorized";

/// ビルトインカテゴリ定義（Prefix / Keyword 戦略のデフォルト）
pub const BUILTIN_CATEGORIES: &[BuiltinCategory] = &[
    BuiltinCategory {
        name: "booking",
        description: "Reserving resources. \
                      Listing what can be booked, checking availability, creating reservations.",
        prefixes: &["book_", "reserve_", "get_available_"],
        keywords: &["預約", "訂", "book", "reserve", "安排"],
    },
    BuiltinCategory {
        name: "query",
        description: "Read-only lookups. \
                      Searching, listing and fetching information.",
        prefixes: &["get_", "list_", "search_", "query_"],
        keywords: &["查詢", "搜尋", "列出", "query", "search", "list", "get"],
    },
    BuiltinCategory {
        name: "management",
        description: "Managing existing records owned by the user. \
                      Viewing, updating and cancelling reservations.",
        prefixes: &["cancel_", "update_", "delete_", "get_user_", "my_"],
        keywords: &["取消", "管理", "我的", "cancel", "delete", "update", "my"],
    },
];

/// ビルトインのツール名→カテゴリ対応表（Explicit 戦略のデフォルト）
pub const BUILTIN_TOOL_MAPPINGS: &[BuiltinToolMapping] = &[
    BuiltinToolMapping {
        tool: "get_available_buildings",
        categories: &["booking", "query"],
    },
    BuiltinToolMapping {
        tool: "get_available_rooms",
        categories: &["booking", "query"],
    },
    BuiltinToolMapping {
        tool: "book_meeting_room",
        categories: &["booking"],
    },
    BuiltinToolMapping {
        tool: "get_user_reservations",
        categories: &["management"],
    },
    BuiltinToolMapping {
        tool: "cancel_reservation",
        categories: &["management"],
    },
];

/// ビルトインカテゴリの静的定義
#[derive(Debug, Clone)]
pub struct BuiltinCategory {
    /// カテゴリ名（一意識別子）
    pub name: &'static str,
    /// カテゴリの説明（一覧表示用）
    pub description: &'static str,
    /// ツール名の前方一致パターン
    pub prefixes: &'static [&'static str],
    /// 説明文に対する部分一致キーワード（大文字小文字を区別しない）
    pub keywords: &'static [&'static str],
}

/// ビルトインのツール対応エントリ
#[derive(Debug, Clone)]
pub struct BuiltinToolMapping {
    /// ツール名（完全一致）
    pub tool: &'static str,
    /// 所属カテゴリ
    pub categories: &'static [&'static str],
}

/// ビルトインカテゴリを名前で取得
pub fn builtin_category(name: &str) -> Option<&'static BuiltinCategory> {
    BUILTIN_CATEGORIES.iter().find(|c| c.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_categories_exist() {
        assert!(!BUILTIN_CATEGORIES.is_empty());
        assert!(builtin_category("booking").is_some());
        assert!(builtin_category("query").is_some());
        assert!(builtin_category("management").is_some());
        assert!(builtin_category("Booking").is_none());
    }

    #[test]
    fn test_uncategorized_is_not_a_builtin_category() {
        assert!(BUILTIN_CATEGORIES.iter().all(|c| c.name != UNCATEGORIZED));
        assert!(BUILTIN_TOOL_MAPPINGS
            .iter()
            .all(|m| !m.categories.contains(&UNCATEGORIZED)));
    }

    #[test]
    fn test_tool_mappings_reference_builtin_categories() {
        for mapping in BUILTIN_TOOL_MAPPINGS {
            for cat in mapping.categories {
                assert!(
                    builtin_category(cat).is_some(),
                    "{} maps to unknown category {}",
                    mapping.tool,
                    cat
                );
            }
        }
    }

    #[test]
    fn test_keywords_cover_two_scripts() {
        let booking = builtin_category("booking").unwrap();
        assert!(booking.keywords.iter().any(|k| k.is_ascii()));
        assert!(booking.keywords.iter().any(|k| !k.is_ascii()));
    }
}
