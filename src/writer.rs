use crate::models::JobRecord;
use crate::Result;
use std::fs::File;

/// The header row is written up front so an empty crawl still leaves a valid file.
pub fn save_to_csv(jobs: &[JobRecord], file_path: &str) -> Result<()> {
    let file = File::create(file_path)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);

    writer.write_record(JobRecord::COLUMNS)?;
    for job in jobs {
        writer.serialize(job)?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NOT_AVAILABLE;

    #[test]
    fn empty_export_has_header_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");

        save_to_csv(&[], path.to_str().unwrap()).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents,
            "Category,Subcategory,Job Title,Company,Salary,Job URL\n"
        );
    }

    #[test]
    fn rows_follow_column_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jobs.csv");
        let job = JobRecord {
            category: "IT".to_string(),
            subcategory: "Java".to_string(),
            title: "Java Developer".to_string(),
            company: NOT_AVAILABLE.to_string(),
            salary: "INR 5-8 LPA".to_string(),
            url: "https://www.foundit.in/job/1".to_string(),
        };

        save_to_csv(&[job], path.to_str().unwrap()).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let rows: Vec<_> = contents.lines().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[1],
            "IT,Java,Java Developer,Not Available,INR 5-8 LPA,https://www.foundit.in/job/1"
        );
    }
}
