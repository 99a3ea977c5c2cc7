pub mod commit;
pub mod fetch;
pub mod parse;

pub use commit::{commit_url, group_into_commits};
pub use fetch::{fetch_log, LogData};
pub use parse::{load_log, parse_rows, ParseMode};

#[cfg(test)]
pub(crate) mod test_rows {
    use crate::model::LineRecord;
    use chrono::DateTime;

    pub fn row(
        commit: &str,
        file: &str,
        line: u32,
        depth: u32,
        length: u32,
        kind: &str,
        datetime: &str,
    ) -> LineRecord {
        let datetime = DateTime::parse_from_rfc3339(datetime).unwrap();
        let day = datetime
            .date_naive()
            .and_hms_opt(0, 0, 0)
            .unwrap()
            .and_local_timezone(*datetime.offset())
            .unwrap();
        LineRecord {
            commit: commit.to_string(),
            file: file.to_string(),
            line,
            depth,
            length,
            kind: kind.to_string(),
            author: "ana".to_string(),
            date: datetime.format("%Y-%m-%d").to_string(),
            time: datetime.format("%H:%M:%S").to_string(),
            timezone: datetime.format("%:z").to_string(),
            day,
            datetime,
        }
    }
}
