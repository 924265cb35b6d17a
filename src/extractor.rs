use crate::models::{JobRecord, NOT_AVAILABLE, SubcategoryLink};
use crate::{CrawlError, Result};
use regex::{Captures, Regex};

/// Fields of one job card, before category names are attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobFields {
    pub title: String,
    pub company: String,
    pub salary: String,
    pub url: String,
}

pub trait JobExtractor: Sync {
    fn extract_fields(&self, html: &str) -> Result<Vec<JobFields>>;

    fn extract_jobs(&self, html: &str, branch: &SubcategoryLink) -> Result<Vec<JobRecord>> {
        let jobs = self
            .extract_fields(html)?
            .into_iter()
            .map(|fields| JobRecord {
                category: branch.parent_category.clone(),
                subcategory: branch.name.clone(),
                title: fields.title,
                company: fields.company,
                salary: fields.salary,
                url: fields.url,
            })
            .collect();
        Ok(jobs)
    }
}

/// Scans the raw markup of a rendered listing page.
///
/// Job URL and title come from the JSON-LD blob embedded in the page, company
/// names from `<img alt>` and salaries from `<label>INR .. LPA</label>`. The
/// three sequences are matched independently and joined by index, so a
/// missing logo shifts every later company by one.
pub struct FounditJobExtractor {
    job_re: Regex,
    company_re: Regex,
    salary_re: Regex,
}

impl FounditJobExtractor {
    pub fn new(base_url: &str) -> Result<Self> {
        let job_pattern = format!(
            r#""url":"({}/job/.*?)".*?"name":"(.*?)""#,
            regex::escape(base_url.trim_end_matches('/'))
        );

        Ok(Self {
            job_re: compile(&job_pattern)?,
            company_re: compile(r#"<img.*?alt="(.*?)""#)?,
            salary_re: compile(r"<label>(INR .*? LPA)</label>")?,
        })
    }

    fn extract_companies(&self, html: &str) -> Result<Vec<String>> {
        self.company_re
            .captures_iter(html)
            .map(|caps| group(&caps, 1))
            .collect()
    }

    fn extract_salaries(&self, html: &str) -> Result<Vec<String>> {
        self.salary_re
            .captures_iter(html)
            .map(|caps| group(&caps, 1))
            .collect()
    }
}

impl JobExtractor for FounditJobExtractor {
    fn extract_fields(&self, html: &str) -> Result<Vec<JobFields>> {
        let companies = self.extract_companies(html)?;
        let salaries = self.extract_salaries(html)?;

        self.job_re
            .captures_iter(html)
            .enumerate()
            .map(|(index, caps)| -> Result<JobFields> {
                Ok(JobFields {
                    title: group(&caps, 2)?,
                    company: field_at(&companies, index),
                    salary: field_at(&salaries, index),
                    url: group(&caps, 1)?,
                })
            })
            .collect()
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| CrawlError::Extraction(e.to_string()))
}

fn group(caps: &Captures<'_>, index: usize) -> Result<String> {
    caps.get(index)
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| CrawlError::Extraction(format!("missing capture group {}", index)))
}

fn field_at(values: &[String], index: usize) -> String {
    values
        .get(index)
        .cloned()
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE_URL: &str = "https://www.foundit.in";

    fn job_blob(id: u32, title: &str) -> String {
        format!(
            concat!(
                r#"{{"@type":"JobPosting","url":"https://www.foundit.in/job/{}","#,
                r#""hiringOrganization":{{}},"name":"{}"}}"#
            ),
            id, title
        )
    }

    fn listing(jobs: &[(u32, &str)], companies: &[&str], salaries: &[&str]) -> String {
        let mut html = String::from("<html><body>");
        for company in companies {
            html.push_str(&format!("<div><img src=\"logo.png\" alt=\"{}\"></div>\n", company));
        }
        for salary in salaries {
            html.push_str(&format!("<span><label>{}</label></span>\n", salary));
        }
        html.push_str("<script type=\"application/ld+json\">\n");
        for (id, title) in jobs {
            html.push_str(&job_blob(*id, title));
            html.push('\n');
        }
        html.push_str("</script></body></html>");
        html
    }

    fn branch() -> SubcategoryLink {
        SubcategoryLink::new(
            "Java",
            "https://www.foundit.in/search/java-jobs",
            "IT",
        )
    }

    #[test]
    fn correlates_fields_by_index_with_sentinel() {
        let extractor = FounditJobExtractor::new(BASE_URL).unwrap();
        let html = listing(
            &[(1, "Java Developer"), (2, "Backend Engineer"), (3, "SRE")],
            &["Acme", "Globex"],
            &["INR 5-8 LPA", "INR 8-12 LPA", "INR 10-15 LPA", "INR 20-30 LPA"],
        );

        let jobs = extractor.extract_jobs(&html, &branch()).unwrap();

        assert_eq!(jobs.len(), 3);
        assert_eq!(jobs[0].title, "Java Developer");
        assert_eq!(jobs[0].company, "Acme");
        assert_eq!(jobs[1].company, "Globex");
        assert_eq!(jobs[2].company, NOT_AVAILABLE);
        assert!(jobs.iter().all(|job| job.salary != NOT_AVAILABLE));
        assert_eq!(jobs[2].salary, "INR 10-15 LPA");
        assert_eq!(jobs[2].url, "https://www.foundit.in/job/3");
        assert!(jobs.iter().all(|job| job.category == "IT" && job.subcategory == "Java"));
    }

    #[test]
    fn record_count_follows_job_matches_only() {
        let extractor = FounditJobExtractor::new(BASE_URL).unwrap();
        let oversupplied = listing(
            &[(1, "QA")],
            &["Acme", "Globex", "Initech"],
            &["INR 1-2 LPA", "INR 2-3 LPA"],
        );
        let undersupplied = listing(&[(1, "QA"), (2, "Dev")], &[], &[]);

        let jobs = extractor.extract_fields(&oversupplied).unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].company, "Acme");

        let jobs = extractor.extract_fields(&undersupplied).unwrap();
        assert_eq!(jobs.len(), 2);
        assert!(
            jobs.iter()
                .all(|job| job.company == NOT_AVAILABLE && job.salary == NOT_AVAILABLE)
        );
    }

    #[test]
    fn ignores_urls_outside_job_path() {
        let extractor = FounditJobExtractor::new(BASE_URL).unwrap();
        let html = r#"{"url":"https://www.foundit.in/search/java-jobs","name":"Search"}"#;

        assert!(extractor.extract_fields(html).unwrap().is_empty());
    }

    #[test]
    fn repeated_url_still_yields_one_record_per_match() {
        let extractor = FounditJobExtractor::new(BASE_URL).unwrap();
        let html = listing(
            &[(1, "Dev"), (1, "Dev"), (2, "Ops")],
            &["Acme", "Initech", "Globex"],
            &[],
        );

        let matches = extractor.job_re.captures_iter(&html).count();
        let jobs = extractor.extract_fields(&html).unwrap();

        assert_eq!(matches, 3);
        assert_eq!(jobs.len(), 3);
        assert_eq!(jobs[0].url, jobs[1].url);
        assert_eq!(jobs[1].company, "Initech");
        assert_eq!(jobs[2].url, "https://www.foundit.in/job/2");
        assert_eq!(jobs[2].company, "Globex");
    }

    #[test]
    fn empty_page_yields_no_jobs() {
        let extractor = FounditJobExtractor::new(BASE_URL).unwrap();
        assert!(extractor.extract_fields("<html></html>").unwrap().is_empty());
    }
}
