// ─── Scenario Catalog ─────────────────────────────────────────────────────────

/// Which validation procedure a scenario applies to its report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    /// Actual status code equals the first recorded expected value.
    StatusCodes,
    /// Every response time stays strictly below the configured budget.
    ResponseTimes,
    /// `Content-Type` header is exactly `application/json`.
    ContentType,
    /// Body `name` and `email` fields match the first two expected values.
    BodyFields,
    /// Same comparison as `StatusCodes`, against the error-condition dataset.
    NegativeStatusCodes,
    /// Body contains an `id` field, value irrelevant.
    RequiredField,
    /// Body is an array whose length equals the first expected value.
    Pagination,
}

/// One (data file, collection, report name) pairing fed to the runner.
/// Scenarios are static and enumerated, never derived at runtime.
#[derive(Debug, Clone)]
pub struct Scenario {
    /// Namespaces the exported report and correlates logs.
    pub name: &'static str,
    pub collection: &'static str,
    pub data_file: &'static str,
    pub check: Check,
}

/// The one collection every scenario runs.
pub const COLLECTION_FILE: &str = "JSONPlaceholder.postman_collection.json";

/// The full suite, in execution order.
pub static SCENARIOS: [Scenario; 7] = [
    Scenario {
        name: "Status_Code_Test",
        collection: COLLECTION_FILE,
        data_file: "status_codes.csv",
        check: Check::StatusCodes,
    },
    Scenario {
        name: "Response_Time_Test",
        collection: COLLECTION_FILE,
        data_file: "status_codes.csv",
        check: Check::ResponseTimes,
    },
    Scenario {
        name: "Content_Type_Test",
        collection: COLLECTION_FILE,
        data_file: "status_codes.csv",
        check: Check::ContentType,
    },
    Scenario {
        name: "Data_Validation_Test",
        collection: COLLECTION_FILE,
        data_file: "user_data.csv",
        check: Check::BodyFields,
    },
    Scenario {
        name: "Negative_Test",
        collection: COLLECTION_FILE,
        data_file: "negative_tests.csv",
        check: Check::NegativeStatusCodes,
    },
    Scenario {
        name: "Parameterized_Test",
        collection: COLLECTION_FILE,
        data_file: "parameterized_tests.csv",
        check: Check::RequiredField,
    },
    Scenario {
        name: "Pagination_Test",
        collection: COLLECTION_FILE,
        data_file: "pagination_tests.csv",
        check: Check::Pagination,
    },
];

impl Scenario {
    /// File name of the JSON report this scenario exports.
    pub fn report_file(&self) -> String {
        format!("{}_summary.json", self.name)
    }

    pub fn by_name(name: &str) -> Option<&'static Scenario> {
        SCENARIOS.iter().find(|scenario| scenario.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_files_are_namespaced_per_scenario() {
        assert_eq!(
            SCENARIOS[0].report_file(),
            "Status_Code_Test_summary.json"
        );

        let mut names: Vec<String> = SCENARIOS.iter().map(Scenario::report_file).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), SCENARIOS.len());
    }

    #[test]
    fn by_name_finds_known_scenarios() {
        assert!(Scenario::by_name("Pagination_Test").is_some());
        assert!(Scenario::by_name("Unknown_Test").is_none());
    }
}
