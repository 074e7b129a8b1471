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
// Command modules for the olkit CLI
pub mod dataset_event;
pub mod datasets;
pub mod multiply;
pub mod namespace;
pub mod square;
pub mod track;

pub use dataset_event::DatasetEventCmd;
pub use datasets::DatasetsCmd;
pub use multiply::MultiplyCmd;
pub use namespace::NamespaceCmd;
pub use square::SquareCmd;
pub use track::TrackCmd;
