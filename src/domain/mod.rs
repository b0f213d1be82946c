pub mod report;
pub mod scenario;
pub mod summary;

pub use report::{Execution, Header, Item, Report, ReportedAssertion, Response, ResponseStream, Run};
pub use scenario::{Check, Scenario, COLLECTION_FILE, SCENARIOS};
pub use summary::{ScenarioOutcome, SuiteSummary};
