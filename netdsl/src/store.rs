// NetDSL: Command Interpreter for Simulated Network Topologies
// Copyright (C) 2021  Tibor Schneider
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

//! # Configuration stores
//!
//! The `save` command hands the generated configuration of a device to a [`ConfigStore`].

use crate::error::StoreError;

use log::*;
use std::collections::HashMap;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Persistence of device configurations
pub trait ConfigStore {
    /// Store the configuration lines of a device, replacing any previous version.
    fn save(&mut self, device: &str, lines: &[String]) -> Result<(), StoreError>;
}

/// Writes every configuration to `<dir>/<device>.cfg`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store writing into `dir`. The directory is created on the first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The output directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding the configuration of `device`
    pub fn path(&self, device: &str) -> PathBuf {
        self.dir.join(format!("{}.cfg", device))
    }
}

impl ConfigStore for FileStore {
    fn save(&mut self, device: &str, lines: &[String]) -> Result<(), StoreError> {
        if !is_file_name(device) {
            return Err(StoreError::InvalidName(device.to_string()));
        }
        fs::create_dir_all(&self.dir)?;
        let path = self.path(device);
        let mut content = lines.join("\n");
        content.push('\n');
        fs::write(&path, content)?;
        info!("Saved {} lines to {}", lines.len(), path.display());
        Ok(())
    }
}

/// Returns true if `name` is a single path component that stays inside the output directory.
fn is_file_name(name: &str) -> bool {
    if name.contains(&['/', '\\', ':'][..]) {
        return false;
    }
    let mut components = Path::new(name).components();
    matches!((components.next(), components.next()), (Some(Component::Normal(_)), None))
}

/// Keeps all configurations in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    configs: HashMap<String, Vec<String>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// The last saved configuration of a device
    pub fn get(&self, device: &str) -> Option<&[String]> {
        self.configs.get(device).map(|c| c.as_slice())
    }

    /// Number of stored configurations
    pub fn len(&self) -> usize {
        self.configs.len()
    }

    /// Returns true if nothing was saved yet
    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }
}

impl ConfigStore for MemoryStore {
    fn save(&mut self, device: &str, lines: &[String]) -> Result<(), StoreError> {
        self.configs.insert(device.to_string(), lines.to_vec());
        Ok(())
    }
}
