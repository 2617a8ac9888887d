use std::fmt;

/// Breadth of coverage (percent) at or above which the query is called present.
pub const DEFAULT_THRESHOLD: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticCall {
    Positive,
    Negative,
}

impl DiagnosticCall {
    pub fn classify(percentage: f64, threshold: f64) -> Self {
        if percentage >= threshold {
            DiagnosticCall::Positive
        } else {
            DiagnosticCall::Negative
        }
    }

    pub fn is_positive(self) -> bool {
        self == DiagnosticCall::Positive
    }

    pub fn verdict(self) -> &'static str {
        match self {
            DiagnosticCall::Positive => "Test Result: Positive",
            DiagnosticCall::Negative => "Test Result: Negative",
        }
    }

    pub fn captions(self, query_name: &str) -> [String; 2] {
        match self {
            DiagnosticCall::Positive => [
                format!("{} was detected", query_name),
                "in the sample".to_string(),
            ],
            DiagnosticCall::Negative => [
                format!("{} was not detected", query_name),
                "in the sample".to_string(),
            ],
        }
    }
}

impl fmt::Display for DiagnosticCall {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DiagnosticCall::Positive => write!(f, "POSITIVE"),
            DiagnosticCall::Negative => write!(f, "NEGATIVE"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_is_inclusive() {
        assert_eq!(DiagnosticCall::classify(5.0, DEFAULT_THRESHOLD), DiagnosticCall::Positive);
        assert_eq!(DiagnosticCall::classify(4.999, DEFAULT_THRESHOLD), DiagnosticCall::Negative);
        assert_eq!(DiagnosticCall::classify(100.0, DEFAULT_THRESHOLD), DiagnosticCall::Positive);
        assert_eq!(DiagnosticCall::classify(0.0, DEFAULT_THRESHOLD), DiagnosticCall::Negative);
    }

    #[test]
    fn custom_threshold() {
        assert!(DiagnosticCall::classify(50.0, 50.0).is_positive());
        assert!(!DiagnosticCall::classify(49.0, 50.0).is_positive());
    }

    #[test]
    fn text() {
        let c = DiagnosticCall::Negative;
        assert_eq!(c.verdict(), "Test Result: Negative");
        assert_eq!(c.captions("SARS-CoV-2")[0], "SARS-CoV-2 was not detected");
        assert_eq!(c.to_string(), "NEGATIVE");
    }
}
