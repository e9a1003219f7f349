/// Prescription index loaded from the spreadsheet
pub mod prescriptions;
/// Image queue with the resume filter
pub mod queue;
