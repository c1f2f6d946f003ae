//! Extractors rejecting with the handler error type.

pub mod enhanced_path;
pub mod enhanced_query;
pub mod validated_query;

pub use self::enhanced_path::Path;
pub use self::enhanced_query::Query;
pub use self::validated_query::ValidateQuery;
