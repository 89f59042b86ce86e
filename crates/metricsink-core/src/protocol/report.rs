//! Report filter (`GET /report?filter=...`).

use std::fmt;
use std::str::FromStr;

use crate::error::MetricError;

/// Which column the report maximizes per IP.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFilter {
    #[default]
    Cpu,
    Memory,
}

impl ReportFilter {
    pub fn as_str(self) -> &'static str {
        match self {
            ReportFilter::Cpu => "cpu",
            ReportFilter::Memory => "memory",
        }
    }

    /// Resolve the raw query value. Absent or empty selects `cpu`.
    pub fn from_query(raw: Option<&str>) -> Result<Self, MetricError> {
        match raw {
            None | Some("") => Ok(ReportFilter::default()),
            Some(s) => s.parse(),
        }
    }
}

impl FromStr for ReportFilter {
    type Err = MetricError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cpu" => Ok(ReportFilter::Cpu),
            "memory" => Ok(ReportFilter::Memory),
            other => Err(MetricError::BadRequest(format!("unknown report filter: {other}"))),
        }
    }
}

impl fmt::Display for ReportFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_cpu() {
        assert_eq!(ReportFilter::from_query(None).ok(), Some(ReportFilter::Cpu));
        assert_eq!(ReportFilter::from_query(Some("")).ok(), Some(ReportFilter::Cpu));
        assert_eq!(ReportFilter::from_query(Some("memory")).ok(), Some(ReportFilter::Memory));
    }

    #[test]
    fn matching_is_exact() {
        for raw in ["CPU", "bogus", " memory", "cpu;drop table metrics"] {
            let err = ReportFilter::from_query(Some(raw)).err();
            assert_eq!(err.map(|e| e.status_code()), Some(400), "{raw}");
        }
    }
}
