use serde::Deserialize;

/// A container as reported by the server's container listing.
#[derive(Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Container {
    pub id: String,
    pub worker_name: String,
    #[serde(default)]
    pub build_id: Option<u64>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub step_name: Option<String>,
    #[serde(default)]
    pub pipeline_name: Option<String>,
    #[serde(default)]
    pub job_name: Option<String>,
    #[serde(default)]
    pub build_name: Option<String>,
    #[serde(default)]
    pub resource_name: Option<String>,
}

impl Container {
    pub fn belongs_to_build(&self, build_id: u64) -> bool {
        self.build_id == Some(build_id)
    }

    /// Short human description, e.g. `pipeline/job #3 task unit-tests`.
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();
        match (&self.pipeline_name, &self.job_name) {
            (Some(pipeline), Some(job)) => parts.push(format!("{pipeline}/{job}")),
            (Some(pipeline), None) => parts.push(pipeline.clone()),
            (None, Some(job)) => parts.push(job.clone()),
            (None, None) => {}
        }
        if let Some(build) = &self.build_name {
            parts.push(format!("#{build}"));
        }
        parts.extend(self.kind.clone());
        parts.extend(self.step_name.clone().or_else(|| self.resource_name.clone()));
        if parts.is_empty() {
            self.id.clone()
        } else {
            parts.join(" ")
        }
    }
}
