pub mod category;
pub mod config;
pub mod error;
pub mod tool;

pub use config::Config;
pub use error::{ClassifierError, Result};
pub use tool::{load_tool_list, parse_tool_list, ToolDescriptor, ToolMetadata};

// Category system
pub use category::{
    booking_tools, classify_mcp_tools, management_tools, query_tools, ClassificationConfig,
    ClassificationResult, ClassificationStrategy, StrategyKind, ToolClassifier, UNCATEGORIZED,
};
