//! Tool definitions module.
//!
//! This module exports all available tool definitions.
//! Each tool is defined in its own file for better maintainability.

pub mod fetch_data;
pub mod file_operation;
pub mod process_text;

pub use fetch_data::{DataFilters, FetchDataParams, FetchDataTool};
pub use file_operation::{FileOperation, FileOperationParams, FileOperationTool};
pub use process_text::{ProcessTextParams, ProcessTextTool, TextOperation};
