//! OpenLineage event model.
//!
//! Only the pieces the olkit demos emit: run events with jobs and datasets,
//! standalone dataset events, and the schema, version and column-lineage
//! dataset facets. Field names serialize to the OpenLineage JSON names.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// Schema URL stamped on run events
pub const RUN_EVENT_SCHEMA_URL: &str =
    "https://openlineage.io/spec/2-0-2/OpenLineage.json#/$defs/RunEvent";

/// Schema URL stamped on dataset events
pub const DATASET_EVENT_SCHEMA_URL: &str =
    "https://openlineage.io/spec/2-0-2/OpenLineage.json#/$defs/DatasetEvent";

/// Producer recorded on facets built by this crate
pub const FACET_PRODUCER: &str = concat!("olkit-client/", env!("CARGO_PKG_VERSION"));

const SCHEMA_FACET_URL: &str =
    "https://openlineage.io/spec/facets/1-1-1/SchemaDatasetFacet.json#/$defs/SchemaDatasetFacet";
const VERSION_FACET_URL: &str =
    "https://openlineage.io/spec/facets/1-0-1/DatasetVersionDatasetFacet.json#/$defs/DatasetVersionDatasetFacet";
const COLUMN_LINEAGE_FACET_URL: &str =
    "https://openlineage.io/spec/facets/1-2-0/ColumnLineageDatasetFacet.json#/$defs/ColumnLineageDatasetFacet";

/// Run lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RunState {
    /// Run started
    Start,
    /// Run in progress
    Running,
    /// Run finished successfully
    Complete,
    /// Run was aborted
    Abort,
    /// Run failed
    Fail,
    /// Any other transition
    Other,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunState::Start => "START",
            RunState::Running => "RUNNING",
            RunState::Complete => "COMPLETE",
            RunState::Abort => "ABORT",
            RunState::Fail => "FAIL",
            RunState::Other => "OTHER",
        };
        f.write_str(name)
    }
}

/// A single run of a job
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    /// Unique run id
    #[serde(rename = "runId")]
    pub run_id: Uuid,
}

impl Run {
    /// A run with a fresh v4 id
    pub fn new() -> Self {
        Run {
            run_id: Uuid::new_v4(),
        }
    }

    /// A run with a caller-chosen id
    pub fn with_id(run_id: Uuid) -> Self {
        Run { run_id }
    }
}

impl Default for Run {
    fn default() -> Self {
        Self::new()
    }
}

/// The job a run belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    /// Job namespace
    pub namespace: String,
    /// Job name
    pub name: String,
}

impl Job {
    /// A job in `namespace`
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Job {
            namespace: namespace.into(),
            name: name.into(),
        }
    }
}

/// A field in a schema facet; struct fields nest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaField {
    /// Column name
    pub name: String,
    /// Column type
    #[serde(rename = "type")]
    pub field_type: String,
    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Nested fields of a struct column
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<SchemaField>,
}

impl SchemaField {
    /// A field with no description or children
    pub fn new(name: impl Into<String>, field_type: impl Into<String>) -> Self {
        SchemaField {
            name: name.into(),
            field_type: field_type.into(),
            description: None,
            fields: Vec::new(),
        }
    }

    /// Attach a description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attach nested fields
    pub fn with_fields(mut self, fields: Vec<SchemaField>) -> Self {
        self.fields = fields;
        self
    }
}

/// `schema` dataset facet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaDatasetFacet {
    /// Producer of this facet
    #[serde(rename = "_producer")]
    pub producer: String,
    /// Schema URL of this facet
    #[serde(rename = "_schemaURL")]
    pub schema_url: String,
    /// Columns of the dataset
    pub fields: Vec<SchemaField>,
}

impl SchemaDatasetFacet {
    /// A schema facet over `fields`
    pub fn new(fields: Vec<SchemaField>) -> Self {
        SchemaDatasetFacet {
            producer: FACET_PRODUCER.to_string(),
            schema_url: SCHEMA_FACET_URL.to_string(),
            fields,
        }
    }
}

/// `version` dataset facet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetVersionDatasetFacet {
    /// Producer of this facet
    #[serde(rename = "_producer")]
    pub producer: String,
    /// Schema URL of this facet
    #[serde(rename = "_schemaURL")]
    pub schema_url: String,
    /// Version label
    #[serde(rename = "datasetVersion")]
    pub dataset_version: String,
}

impl DatasetVersionDatasetFacet {
    /// A version facet for `dataset_version`
    pub fn new(dataset_version: impl fmt::Display) -> Self {
        DatasetVersionDatasetFacet {
            producer: FACET_PRODUCER.to_string(),
            schema_url: VERSION_FACET_URL.to_string(),
            dataset_version: dataset_version.to_string(),
        }
    }
}

/// Source column of a derived output column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputField {
    /// Namespace of the source dataset
    pub namespace: String,
    /// Name of the source dataset
    pub name: String,
    /// Source column
    pub field: String,
}

impl InputField {
    /// A source column reference
    pub fn new(
        namespace: impl Into<String>,
        name: impl Into<String>,
        field: impl Into<String>,
    ) -> Self {
        InputField {
            namespace: namespace.into(),
            name: name.into(),
            field: field.into(),
        }
    }
}

/// Inputs feeding one output column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnLineageField {
    /// Source columns
    #[serde(rename = "inputFields")]
    pub input_fields: Vec<InputField>,
}

/// `columnLineage` dataset facet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnLineageDatasetFacet {
    /// Producer of this facet
    #[serde(rename = "_producer")]
    pub producer: String,
    /// Schema URL of this facet
    #[serde(rename = "_schemaURL")]
    pub schema_url: String,
    /// Output column to its sources
    pub fields: BTreeMap<String, ColumnLineageField>,
}

impl ColumnLineageDatasetFacet {
    /// An empty column lineage facet
    pub fn new() -> Self {
        ColumnLineageDatasetFacet {
            producer: FACET_PRODUCER.to_string(),
            schema_url: COLUMN_LINEAGE_FACET_URL.to_string(),
            fields: BTreeMap::new(),
        }
    }

    /// Record that `column` is derived from `inputs`
    pub fn with_column(mut self, column: impl Into<String>, inputs: Vec<InputField>) -> Self {
        self.fields.insert(
            column.into(),
            ColumnLineageField {
                input_fields: inputs,
            },
        );
        self
    }
}

impl Default for ColumnLineageDatasetFacet {
    fn default() -> Self {
        Self::new()
    }
}

/// Facets attached to a dataset
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetFacets {
    /// Schema facet
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaDatasetFacet>,
    /// Version facet
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<DatasetVersionDatasetFacet>,
    #[serde(
        rename = "columnLineage",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    /// Column lineage facet
    pub column_lineage: Option<ColumnLineageDatasetFacet>,
}

impl DatasetFacets {
    /// True when no facet is set
    pub fn is_empty(&self) -> bool {
        self.schema.is_none() && self.version.is_none() && self.column_lineage.is_none()
    }
}

/// An input or output dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    /// Dataset namespace
    pub namespace: String,
    /// Dataset name
    pub name: String,
    /// Attached facets
    #[serde(default)]
    pub facets: DatasetFacets,
}

impl Dataset {
    /// A dataset with no facets
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Dataset {
            namespace: namespace.into(),
            name: name.into(),
            facets: DatasetFacets::default(),
        }
    }

    /// Attach a schema facet
    pub fn with_schema(mut self, facet: SchemaDatasetFacet) -> Self {
        self.facets.schema = Some(facet);
        self
    }

    /// Attach a version facet
    pub fn with_version(mut self, facet: DatasetVersionDatasetFacet) -> Self {
        self.facets.version = Some(facet);
        self
    }

    /// Attach a column lineage facet
    pub fn with_column_lineage(mut self, facet: ColumnLineageDatasetFacet) -> Self {
        self.facets.column_lineage = Some(facet);
        self
    }
}

/// A run state transition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunEvent {
    /// Transition this event records
    #[serde(rename = "eventType")]
    pub event_type: RunState,
    /// When the transition happened
    #[serde(rename = "eventTime")]
    pub event_time: DateTime<Utc>,
    /// The run
    pub run: Run,
    /// The job the run belongs to
    pub job: Job,
    /// Producer URI or name
    pub producer: String,
    /// Datasets read
    #[serde(default)]
    pub inputs: Vec<Dataset>,
    /// Datasets written
    #[serde(default)]
    pub outputs: Vec<Dataset>,
    /// Event schema URL
    #[serde(rename = "schemaURL")]
    pub schema_url: String,
}

impl RunEvent {
    /// An event stamped with the current UTC time
    pub fn new(event_type: RunState, run: Run, job: Job, producer: impl Into<String>) -> Self {
        RunEvent {
            event_type,
            event_time: Utc::now(),
            run,
            job,
            producer: producer.into(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            schema_url: RUN_EVENT_SCHEMA_URL.to_string(),
        }
    }

    /// A `START` event
    pub fn start(run: Run, job: Job, producer: impl Into<String>) -> Self {
        Self::new(RunState::Start, run, job, producer)
    }

    /// A `COMPLETE` event
    pub fn complete(run: Run, job: Job, producer: impl Into<String>) -> Self {
        Self::new(RunState::Complete, run, job, producer)
    }

    /// Set the input datasets
    pub fn with_inputs(mut self, inputs: Vec<Dataset>) -> Self {
        self.inputs = inputs;
        self
    }

    /// Set the output datasets
    pub fn with_outputs(mut self, outputs: Vec<Dataset>) -> Self {
        self.outputs = outputs;
        self
    }
}

/// A dataset observed outside any run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetEvent {
    /// The observed dataset
    pub dataset: Dataset,
    /// Producer URI or name
    pub producer: String,
    /// When the dataset was observed
    #[serde(rename = "eventTime")]
    pub event_time: DateTime<Utc>,
    /// Event schema URL
    #[serde(rename = "schemaURL")]
    pub schema_url: String,
}

impl DatasetEvent {
    /// A dataset event stamped with the current UTC time
    pub fn new(dataset: Dataset, producer: impl Into<String>) -> Self {
        DatasetEvent {
            dataset,
            producer: producer.into(),
            event_time: Utc::now(),
            schema_url: DATASET_EVENT_SCHEMA_URL.to_string(),
        }
    }

    /// Override the event schema URL
    pub fn with_schema_url(mut self, schema_url: impl Into<String>) -> Self {
        self.schema_url = schema_url.into();
        self
    }
}

/// Anything a [`LineageClient`](crate::LineageClient) can emit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LineageEvent {
    /// A run event
    Run(RunEvent),
    /// A dataset event
    Dataset(DatasetEvent),
}

impl LineageEvent {
    /// Short label for log lines: the run state, or `DATASET`
    pub fn label(&self) -> String {
        match self {
            LineageEvent::Run(event) => event.event_type.to_string(),
            LineageEvent::Dataset(_) => "DATASET".to_string(),
        }
    }

    /// Timestamp of either event kind
    pub fn event_time(&self) -> DateTime<Utc> {
        match self {
            LineageEvent::Run(event) => event.event_time,
            LineageEvent::Dataset(event) => event.event_time,
        }
    }
}

impl From<RunEvent> for LineageEvent {
    fn from(event: RunEvent) -> Self {
        LineageEvent::Run(event)
    }
}

impl From<DatasetEvent> for LineageEvent {
    fn from(event: DatasetEvent) -> Self {
        LineageEvent::Dataset(event)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_run_event_json_names() {
        let event = RunEvent::start(Run::new(), Job::new("ol_poc.dev", "job"), "manual-example");
        let json: Value = serde_json::to_value(&event).unwrap();

        assert_eq!(json["eventType"], "START");
        assert!(json["run"]["runId"].is_string());
        assert_eq!(json["job"]["namespace"], "ol_poc.dev");
        assert_eq!(json["schemaURL"], RUN_EVENT_SCHEMA_URL);
        assert!(json["eventTime"].as_str().unwrap().ends_with('Z'));
        assert_eq!(json["inputs"], Value::Array(vec![]));
    }

    #[test]
    fn test_run_ids_are_unique() {
        assert_ne!(Run::new().run_id, Run::new().run_id);
    }

    #[test]
    fn test_dataset_facets_json_names() {
        let dataset = Dataset::new("ns", "processed_data")
            .with_schema(SchemaDatasetFacet::new(vec![
                SchemaField::new("id", "INTEGER"),
                SchemaField::new("example_struct", "struct")
                    .with_description("nested")
                    .with_fields(vec![SchemaField::new("val1", "STRING")]),
            ]))
            .with_version(DatasetVersionDatasetFacet::new(2))
            .with_column_lineage(
                ColumnLineageDatasetFacet::new()
                    .with_column("id", vec![InputField::new("ns", "input_data", "id")]),
            );

        let json: Value = serde_json::to_value(&dataset).unwrap();
        let facets = &json["facets"];
        assert_eq!(facets["schema"]["fields"][0]["type"], "INTEGER");
        assert_eq!(facets["schema"]["fields"][1]["fields"][0]["name"], "val1");
        assert!(facets["schema"]["fields"][0].get("fields").is_none());
        assert_eq!(facets["version"]["datasetVersion"], "2");
        assert_eq!(facets["version"]["_producer"], FACET_PRODUCER);
        assert_eq!(
            facets["columnLineage"]["fields"]["id"]["inputFields"][0]["field"],
            "id"
        );
    }

    #[test]
    fn test_empty_facets_serialize_as_empty_object() {
        let dataset = Dataset::new("ns", "first_dataset");
        assert!(dataset.facets.is_empty());
        let json = serde_json::to_string(&dataset).unwrap();
        assert!(json.contains("\"facets\":{}"));
    }

    #[test]
    fn test_lineage_event_parses_either_shape() {
        let run: LineageEvent =
            RunEvent::complete(Run::new(), Job::new("ns", "job"), "p").into();
        let dataset: LineageEvent = DatasetEvent::new(Dataset::new("ns", "ds"), "p").into();

        for event in [run, dataset] {
            let json = serde_json::to_string(&event).unwrap();
            let parsed: LineageEvent = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed, event);
        }
    }

    #[test]
    fn test_labels() {
        let run: LineageEvent =
            RunEvent::complete(Run::new(), Job::new("ns", "job"), "p").into();
        assert_eq!(run.label(), "COMPLETE");
        let dataset: LineageEvent = DatasetEvent::new(Dataset::new("ns", "ds"), "p").into();
        assert_eq!(dataset.label(), "DATASET");
    }
}
