// olkit - OpenLineage integration toolkit
// Copyright (C) 2026 olkit Contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published
// by the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.

//! Lineage-tracked demo functions behind the olkit commands.
//!
//! Every demo is a plain function wrapped with a [`LineageInjector`], so the
//! client arrives through a [`CallContext`] slot. The demos are generic over
//! the client type; the binary runs them against the process-wide
//! [`OpenLineageClient`](olkit_client::OpenLineageClient) singleton.

use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use olkit_client::{
    CallContext, ClientSingleton, ColumnLineageDatasetFacet, Dataset, DatasetEvent,
    DatasetVersionDatasetFacet, FromUrl, InjectOptions, InputField, Job, LineageClient,
    LineageInjector, Run, RunEvent, SchemaDatasetFacet, SchemaField,
};
use olkit_config::NamespaceConfig;
use olkit_namespace::NamespaceBuilder;
use olkit_observability::lineage_debug;
use serde_json::{json, Value};
use std::fmt::Debug;
use tracing::info;

/// Endpoint used by the `square` demo
pub const CUSTOM_URL: &str = "http://custom-server:5000";

/// Slot name used by the `square` demo
pub const CUSTOM_CLIENT_PARAM: &str = "lineage_client";

const TRACK_PRODUCER: &str = "manual-example";
const DATASET_PRODUCER: &str = "dataset-example";
const DATASET_EVENT_PRODUCER: &str = "sample_producer";

fn product(a: i64, b: i64) -> Result<i64> {
    a.checked_mul(b)
        .ok_or_else(|| anyhow!("{} * {}: result overflows i64", a, b))
}

/// Records fed to the `datasets` demo
pub fn sample_records() -> Vec<Value> {
    vec![
        json!({"id": 1, "value": "first"}),
        json!({"id": 2, "value": "second"}),
    ]
}

/// Demo runner bound to a singleton, injection options and namespace defaults
pub struct Demos<C: 'static> {
    singleton: &'static ClientSingleton<C>,
    options: InjectOptions,
    namespace: NamespaceConfig,
}

impl<C> Demos<C>
where
    C: LineageClient + FromUrl + Debug + 'static,
{
    pub fn new(
        singleton: &'static ClientSingleton<C>,
        options: InjectOptions,
        namespace: NamespaceConfig,
    ) -> Self {
        Demos {
            singleton,
            options,
            namespace,
        }
    }

    fn injector(&self) -> LineageInjector<C> {
        LineageInjector::with_singleton(self.singleton)
            .url(self.options.url.clone())
            .client_param_name(self.options.client_param_name.clone())
    }

    /// Namespace for the configured project; arguments override the config
    pub fn namespace(&self, prefix: Option<&str>, environment: Option<&str>) -> Result<String> {
        NamespaceBuilder::new(
            &self.namespace.project,
            environment.unwrap_or(&self.namespace.environment),
        )
        .maybe_prefix(prefix.or(self.namespace.prefix.as_deref()).map(str::to_string))
        .include_hostname(self.namespace.include_hostname)
        .build()
        .context("Failed to build lineage namespace")
    }

    /// Multiply with the client injected under the configured slot
    pub fn multiply(&self, a: i64, b: i64) -> Result<i64> {
        let slot = self.options.client_param_name.as_str();
        self.injector()
            .wrap(|(a, b): (i64, i64), ctx: &CallContext<C>| -> Result<i64> {
                let client = ctx.client(slot)?;
                info!("Using OpenLineage client: {:?}", client);
                product(a, b)
            })
            .invoke((a, b))
    }

    /// Square with the client injected under `lineage_client` for a custom URL
    pub fn square(&self, x: i64) -> Result<i64> {
        LineageInjector::with_singleton(self.singleton)
            .url(CUSTOM_URL)
            .client_param_name(CUSTOM_CLIENT_PARAM)
            .wrap(|x: i64, ctx: &CallContext<C>| -> Result<i64> {
                let client = ctx.client(CUSTOM_CLIENT_PARAM)?;
                info!("Using custom-named client parameter: {:?}", client);
                product(x, x)
            })
            .invoke(x)
    }

    /// Multiply inside a run, emitting START before and COMPLETE after
    pub fn track(
        &self,
        a: i64,
        b: i64,
        prefix: Option<&str>,
        environment: Option<&str>,
    ) -> Result<i64> {
        let slot = self.options.client_param_name.as_str();
        self.injector()
            .wrap(|(a, b): (i64, i64), ctx: &CallContext<C>| -> Result<i64> {
                let client = ctx.client(slot)?;
                lineage_debug!("OpenLineage client instance: {:?}", client);

                let run = Run::new();
                lineage_debug!("Generated run ID: {}", run.run_id);

                let namespace = self.namespace(prefix, environment)?;
                let job = Job::new(namespace.as_str(), format!("internal_function.a{}_b{}", a, b));
                info!("Using namespace: {}", namespace);
                info!("Using job name: {}", job.name);

                let start = RunEvent::start(run.clone(), job.clone(), TRACK_PRODUCER);
                lineage_debug!("Creating START event at {}", start.event_time.to_rfc3339());
                lineage_debug!("Emitting START event");
                client.emit(&start.into())?;

                lineage_debug!("Performing operation: {} * {}", a, b);
                let result = product(a, b)?;

                let complete = RunEvent::complete(run, job, TRACK_PRODUCER);
                lineage_debug!("Creating COMPLETE event at {}", complete.event_time.to_rfc3339());
                lineage_debug!("Emitting COMPLETE event");
                client.emit(&complete.into())?;

                Ok(result)
            })
            .invoke((a, b))
    }

    /// Emit a standalone dataset event in the `uat` environment, without hostname
    pub fn dataset_event(&self) -> Result<DatasetEvent> {
        let slot = self.options.client_param_name.as_str();
        self.injector()
            .wrap(|_: (), ctx: &CallContext<C>| -> Result<DatasetEvent> {
                let client = ctx.client(slot)?;
                let namespace = NamespaceBuilder::new(&self.namespace.project, "uat")
                    .include_hostname(false)
                    .build()?;

                let event = DatasetEvent::new(
                    Dataset::new(namespace, "first_dataset"),
                    DATASET_EVENT_PRODUCER,
                );
                client.emit(&event.clone().into())?;
                Ok(event)
            })
            .invoke(())
    }

    /// Process records inside a run with faceted input and output datasets.
    ///
    /// Returns the records with a `processed_at` timestamp added.
    pub fn datasets(
        &self,
        records: Vec<Value>,
        prefix: Option<&str>,
        environment: Option<&str>,
    ) -> Result<Vec<Value>> {
        let slot = self.options.client_param_name.as_str();
        self.injector()
            .wrap(|records: Vec<Value>, ctx: &CallContext<C>| -> Result<Vec<Value>> {
                let client = ctx.client(slot)?;

                let run = Run::new();
                lineage_debug!("Generated run ID: {}", run.run_id);

                let namespace = self.namespace(prefix, environment)?;
                let input = input_dataset(&namespace);
                let output = output_dataset(&namespace);
                let job = Job::new(namespace.as_str(), "process_with_datasets");

                let start = RunEvent::start(run.clone(), job.clone(), DATASET_PRODUCER)
                    .with_inputs(vec![input.clone()]);
                lineage_debug!("Creating START event at {}", start.event_time.to_rfc3339());
                lineage_debug!("Emitting START event");
                client.emit(&start.into())?;

                lineage_debug!("Processing input data");
                let processed_at = Utc::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string();
                let processed = records
                    .into_iter()
                    .map(|mut record| {
                        if let Value::Object(fields) = &mut record {
                            fields.insert("processed_at".to_string(), json!(processed_at));
                        }
                        record
                    })
                    .collect();

                let complete = RunEvent::complete(run, job, DATASET_PRODUCER)
                    .with_inputs(vec![input])
                    .with_outputs(vec![output]);
                lineage_debug!("Creating COMPLETE event at {}", complete.event_time.to_rfc3339());
                lineage_debug!("Emitting COMPLETE event");
                client.emit(&complete.into())?;

                Ok(processed)
            })
            .invoke(records)
    }
}

fn input_dataset(namespace: &str) -> Dataset {
    Dataset::new(namespace, "input_data")
        .with_schema(SchemaDatasetFacet::new(vec![
            SchemaField::new("id", "INTEGER"),
            SchemaField::new("value", "STRING"),
            SchemaField::new("example_struct", "struct")
                .with_description("example struct")
                .with_fields(vec![
                    SchemaField::new("val1", "STRING"),
                    SchemaField::new("val2", "STRING"),
                ]),
        ]))
        .with_version(DatasetVersionDatasetFacet::new(2))
}

fn output_dataset(namespace: &str) -> Dataset {
    Dataset::new(namespace, "processed_data")
        .with_schema(SchemaDatasetFacet::new(vec![
            SchemaField::new("id", "INTEGER"),
            SchemaField::new("name", "STRING"),
            SchemaField::new("processed_at", "TIMESTAMP"),
        ]))
        .with_column_lineage(
            ColumnLineageDatasetFacet::new()
                .with_column("id", vec![InputField::new(namespace, "input_data", "id")])
                .with_column("name", vec![InputField::new(namespace, "input_data", "value")]),
        )
        .with_version(DatasetVersionDatasetFacet::new(2))
}
