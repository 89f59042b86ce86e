//! SQL text for the metrics table.
//!
//! Table names are the only interpolated fragment and must pass
//! [`validate_table_name`] first. Report SQL is a closed set of two templates
//! keyed by [`ReportFilter`]; request values never reach SQL text.

use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use metricsink_core::error::{MetricError, Result};
use metricsink_core::{MetricRecord, ReportFilter};

/// `[A-Za-z_][A-Za-z0-9_]*`
pub fn validate_table_name(table: &str) -> Result<()> {
    let mut chars = table.chars();
    let head_ok = chars
        .next()
        .map(|c| c.is_ascii_alphabetic() || c == '_')
        .unwrap_or(false);
    if !head_ok || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(MetricError::Schema(format!("malformed table name: {table:?}")));
    }
    Ok(())
}

pub fn create_table(table: &str) -> String {
    format!(
        r#"CREATE TABLE IF NOT EXISTS {table} (
            percentage_cpu_used INTEGER,
            percentage_memory_used INTEGER,
            ip TEXT,
            date TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )"#
    )
}

pub fn insert_metric(table: &str) -> String {
    format!("INSERT INTO {table} (percentage_cpu_used, percentage_memory_used, ip) VALUES (?, ?, ?)")
}

pub fn select_default(table: &str) -> String {
    format!("SELECT percentage_cpu_used, percentage_memory_used, ip, date FROM {table} LIMIT 10")
}

pub fn drop_table(table: &str) -> String {
    format!("DROP TABLE {table}")
}

/// Per-IP aggregate. SQLite takes the bare columns from the row holding the max.
pub fn report(filter: ReportFilter, table: &str) -> String {
    let selector = match filter {
        ReportFilter::Cpu => "MAX(percentage_cpu_used), percentage_memory_used",
        ReportFilter::Memory => "percentage_cpu_used, MAX(percentage_memory_used)",
    };
    format!("SELECT {selector}, ip, date FROM {table} GROUP BY ip ORDER BY ip")
}

/// Positional scan: cpu, memory, ip, date. Every column must be non-NULL.
pub fn scan_metric_row(row: &SqliteRow) -> std::result::Result<MetricRecord, sqlx::Error> {
    let recorded_at: chrono::NaiveDateTime = required(row, 3)?;
    Ok(MetricRecord {
        cpu_used: required(row, 0)?,
        memory_used: required(row, 1)?,
        ip: required(row, 2)?,
        recorded_at: recorded_at.and_utc(),
    })
}

// SQLite hands NULL to a plain `try_get::<i64>` as 0, so decode through Option.
fn required<'r, T>(row: &'r SqliteRow, index: usize) -> std::result::Result<T, sqlx::Error>
where
    Option<T>: sqlx::Decode<'r, sqlx::Sqlite> + sqlx::Type<sqlx::Sqlite>,
{
    row.try_get::<Option<T>, _>(index)?
        .ok_or_else(|| sqlx::Error::ColumnDecode {
            index: index.to_string(),
            source: Box::new(sqlx::error::UnexpectedNullError),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_names() {
        for ok in ["metrics", "testing_table_metrics", "_t1"] {
            assert!(validate_table_name(ok).is_ok(), "{ok}");
        }
        for bad in ["", "1metrics", "metrics; drop table x", "m-etrics", "métrics"] {
            assert!(validate_table_name(bad).is_err(), "{bad}");
        }
    }

    #[test]
    fn report_templates() {
        assert_eq!(
            report(ReportFilter::Cpu, "metrics"),
            "SELECT MAX(percentage_cpu_used), percentage_memory_used, ip, date FROM metrics GROUP BY ip ORDER BY ip"
        );
        assert_eq!(
            report(ReportFilter::Memory, "metrics"),
            "SELECT percentage_cpu_used, MAX(percentage_memory_used), ip, date FROM metrics GROUP BY ip ORDER BY ip"
        );
    }
}
