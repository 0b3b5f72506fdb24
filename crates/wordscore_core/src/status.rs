/// Status of a background job as reported by the backend.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskStatus {
    Pending { progress: Option<f64> },
    Success {
        total_occurrences: u64,
        all_pages: Vec<String>,
    },
    Error { message: String },
    /// Any status value the client does not know, or a body it could not read.
    Unrecognized { raw: String },
}
