//! CV intake: forward an uploaded PDF to the external parsing service and merge the
//! structured result into a candidate profile.

pub mod document;
pub mod parser;
pub mod router;
pub mod service;

pub use document::{AppliedChanges, ParsedDocument, ParsedExperience, ParsedProject, ParsedSkill};
pub use parser::{CvUpload, DocumentParser, HttpDocumentParser, ParserError};
pub use router::intake_router;
pub use service::{CvIntakeOutcome, IntakeError, IntakeService};
