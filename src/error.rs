use thiserror::Error;

#[derive(Error, Debug)]
pub enum SalesInsightsError {
    #[error("Failed to open workbook '{path}': {source}")]
    WorkbookOpen {
        path: String,
        #[source]
        source: calamine::Error,
    },

    #[error("Workbook '{0}' contains no worksheets")]
    NoWorksheets(String),

    #[error("Failed to read sheet '{sheet}': {source}")]
    SheetRead {
        sheet: String,
        #[source]
        source: calamine::Error,
    },

    #[error("Sheet '{0}' has no header row")]
    EmptySheet(String),

    #[error("Required column '{0}' not found in the header row")]
    MissingColumn(&'static str),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SalesInsightsError>;
