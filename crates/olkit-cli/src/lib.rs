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

//! Library side of the `olkit` binary: startup, commands and the demos
//! they run.

pub mod app;
pub mod commands;
pub mod demos;
pub mod output;
