use lookup::sort::SortSpec;

/// Preferences kept between invocations.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Used when a command does not specify a job number.
    pub default_job: Option<String>,
    pub default_sort: SortSpec,
}

impl Config {
    /// A blank job number clears the default.
    pub fn set_default_job(&mut self, job: &str) {
        let job = job.trim();
        self.default_job = if job.is_empty() { None } else { Some(job.to_string()) };
    }

    pub fn job_or_default(&self, job: Option<String>) -> Option<String> {
        job.or_else(|| self.default_job.clone())
    }
}
