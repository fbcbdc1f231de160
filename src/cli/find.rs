use std::io::Write;

use clap::Parser;
use miette::Diagnostic;
use serde::Serialize;

use super::Global;
use crate::{
    config::Config,
    logger::Logger,
    model::Container,
    ui::{json_print, Table, TableOptions},
};

const NO_WORKER: &str = "no worker found";

#[derive(thiserror::Error, Debug, Diagnostic)]
#[error("Must specify --build-id")]
#[diagnostic(code(hangar::find::build_id), help("e.g. hangar find --build-id 122"))]
pub struct MissingBuildId;

/// Find the workers running a build's containers
#[derive(Parser)]
pub struct Args {
    /// Build ID to get worker information for
    #[clap(short = 'b', long = "build-id", allow_negative_numbers = true)]
    build_id: Option<i64>,
    /// Print command result as JSON
    #[clap(long)]
    json: bool,
}

#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct Placement<'a> {
    pub build_id: String,
    pub worker_name: &'a str,
}

impl<'a> Placement<'a> {
    fn of(container: &'a Container, build_id: u64) -> Placement<'a> {
        Placement {
            build_id: build_id.to_string(),
            worker_name: &container.worker_name,
        }
    }
}

impl Args {
    /// The requested build, rejecting a missing or non-positive ID.
    pub fn build_id(&self) -> Result<u64, MissingBuildId> {
        match self.build_id {
            Some(id) if id > 0 => Ok(id.unsigned_abs()),
            _ => Err(MissingBuildId),
        }
    }

    pub async fn execute(self, global: &Global, config: Config, logger: Logger) -> miette::Result<()> {
        let build_id = self.build_id()?;

        let target = config.target(&logger, global.target.as_deref())?;
        target.validate()?;
        let team = target.team(&logger)?;
        logger.trace(format!("Listing containers for team {}", team.name()));
        let containers = team.list_containers(&[]).await?;

        let matches = matching(&containers, build_id);
        for container in &matches {
            logger.trace(format!("{} on {}: {}", container.id, container.worker_name, container.describe()));
        }
        let stdout = std::io::stdout().lock();
        if self.json {
            print_json(stdout, &logger, &matches, build_id)
        } else {
            print_table(stdout, TableOptions::for_stdout(global.print_table_headers), &matches, build_id)
        }
    }
}

/// Containers belonging to `build_id`, in the order the server listed them.
fn matching(containers: &[Container], build_id: u64) -> Vec<&Container> {
    containers.iter().filter(|c| c.belongs_to_build(build_id)).collect()
}

fn print_table(out: impl Write, options: TableOptions, matches: &[&Container], build_id: u64) -> miette::Result<()> {
    let mut table = Table::new(["build id", "worker"]);
    for container in matches {
        table.push([build_id.to_string(), container.worker_name.clone()]);
    }
    if table.rows.is_empty() {
        table.push([build_id.to_string(), NO_WORKER.to_string()]);
    }
    table.render(out, options)
}

// one object per invocation: the first match, or null
fn print_json(out: impl Write, logger: &Logger, matches: &[&Container], build_id: u64) -> miette::Result<()> {
    if matches.len() > 1 {
        logger.warn(format!(
            "{} containers belong to build {build_id}, showing the first; run without --json to list all",
            matches.len()
        ));
    }
    let placement = matches.first().map(|container| Placement::of(container, build_id));
    json_print(out, &placement)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn container(id: &str, worker: &str, build_id: Option<u64>) -> Container {
        Container {
            id: id.into(),
            worker_name: worker.into(),
            build_id,
            ..Default::default()
        }
    }

    fn fixture() -> Vec<Container> {
        vec![
            container("handle-1", "worker-name-1", None),
            container("early-handle", "worker-name-1", Some(123)),
            container("other-handle", "worker-name-2", Some(122)),
            container("post-handle", "worker-name-3", Some(142)),
        ]
    }

    fn table(matches: &[&Container], build_id: u64) -> String {
        let mut out = Vec::new();
        let options = TableOptions {
            print_headers: true,
            color: false,
        };
        print_table(&mut out, options, matches, build_id).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn json(matches: &[&Container], build_id: u64) -> serde_json::Value {
        let mut out = Vec::new();
        print_json(&mut out, &Logger::new(), matches, build_id).unwrap();
        serde_json::from_slice(&out).unwrap()
    }

    #[test]
    fn keeps_only_the_requested_build() {
        let containers = fixture();
        let matches = matching(&containers, 122);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].id, "other-handle");
    }

    #[test]
    fn preserves_server_order() {
        let containers = vec![
            container("a", "worker-b", Some(9)),
            container("b", "worker-a", Some(8)),
            container("c", "worker-c", Some(9)),
        ];
        let ids: Vec<_> = matching(&containers, 9).iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["a", "c"]);
    }

    #[test]
    fn table_lists_the_matching_worker() {
        let containers = fixture();
        assert_eq!(
            table(&matching(&containers, 122), 122),
            "build id  worker\n122       worker-name-2\n"
        );
    }

    #[test]
    fn table_reports_absent_build() {
        let containers = fixture();
        assert_eq!(
            table(&matching(&containers, 456), 456),
            "build id  worker\n456       no worker found\n"
        );
    }

    #[test]
    fn table_lists_every_match() {
        let containers = vec![container("a", "worker-1", Some(5)), container("b", "worker-2", Some(5))];
        assert_eq!(
            table(&matching(&containers, 5), 5),
            "build id  worker\n5         worker-1\n5         worker-2\n"
        );
    }

    #[test]
    fn json_is_a_single_flat_object() {
        let containers = fixture();
        assert_eq!(
            json(&matching(&containers, 122), 122),
            serde_json::json!({"build_id": "122", "worker_name": "worker-name-2"})
        );
    }

    #[test]
    fn json_is_null_without_matches() {
        let containers = fixture();
        assert_eq!(json(&matching(&containers, 456), 456), serde_json::Value::Null);
    }

    #[test]
    fn json_reports_first_of_several_matches() {
        let containers = vec![container("a", "worker-1", Some(5)), container("b", "worker-2", Some(5))];
        assert_eq!(
            json(&matching(&containers, 5), 5),
            serde_json::json!({"build_id": "5", "worker_name": "worker-1"})
        );
    }

    #[test]
    fn zero_build_id_is_rejected() {
        let args = Args {
            build_id: Some(0),
            json: false,
        };
        let global = Global::default();
        let err = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap()
            .block_on(args.execute(&global, Config::default(), Logger::new()))
            .unwrap_err();
        assert_eq!(err.to_string(), "Must specify --build-id");
    }

    #[test]
    fn only_positive_build_ids_are_accepted() {
        let args = |build_id| Args { build_id, json: false };
        assert!(args(None).build_id().is_err());
        assert!(args(Some(0)).build_id().is_err());
        assert!(args(Some(-3)).build_id().is_err());
        assert_eq!(args(Some(122)).build_id().unwrap(), 122);
    }
}
