

/// Operation table properties.
pub mod op_table;
